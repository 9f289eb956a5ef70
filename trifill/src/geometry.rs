//! Vertex data and raw vertex buffers.
//!
//! Generators emit [`Vertex`]es, which pair a two-dimensional position with an
//! [`Rgb`] color. Rasterizers consume _raw_ vertex buffers, which flatten each
//! vertex into [`VERTEX_STRIDE`] numbers in the order $(x, y, z, r, g, b)$. The
//! $z$ component is always zero.
//!
//! # Examples
//!
//! Flattening vertices into a raw buffer and decoding them again:
//!
//! ```rust
//! use trifill::color::Rgb;
//! use trifill::geometry::{self, Vertex};
//!
//! let vertices = vec![Vertex::from_xy(1.0, 2.0, Rgb::RED)];
//! let raw = geometry::into_raw_buffer(vertices.iter().copied());
//! assert_eq!(raw, vec![1.0, 2.0, 0.0, 255.0, 0.0, 0.0]);
//! assert_eq!(vertices, geometry::from_raw_buffer(&raw).unwrap());
//! ```
//!
//! [`Rgb`]: crate::color::Rgb
//! [`Vertex`]: crate::geometry::Vertex
//! [`VERTEX_STRIDE`]: crate::geometry::VERTEX_STRIDE

use approx::AbsDiffEq;
use nalgebra::Point2;
use num::ToPrimitive;

use crate::buffer::BufferError;
use crate::color::Rgb;

/// Two-dimensional Euclidean space.
pub type E2 = Point2<f64>;

/// Number of values that describe a vertex in a raw vertex buffer.
pub const VERTEX_STRIDE: usize = 6;

pub trait FromGeometry<T> {
    fn from_geometry(other: T) -> Self;
}

impl<T> FromGeometry<T> for T {
    fn from_geometry(other: T) -> Self {
        other
    }
}

pub trait IntoGeometry<T> {
    fn into_geometry(self) -> T;
}

impl<T, U> IntoGeometry<U> for T
where
    U: FromGeometry<T>,
{
    fn into_geometry(self) -> U {
        U::from_geometry(self)
    }
}

/// Geometry with a position in [`E2`].
///
/// [`E2`]: crate::geometry::E2
pub trait AsPosition {
    fn as_position(&self) -> &E2;
}

impl AsPosition for E2 {
    fn as_position(&self) -> &E2 {
        self
    }
}

impl AsPosition for Vertex {
    fn as_position(&self) -> &E2 {
        &self.position
    }
}

/// Dimensions of a drawable surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(width: f64, height: f64) -> Self {
        Extent { width, height }
    }

    pub fn center(&self) -> E2 {
        E2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl From<(u32, u32)> for Extent {
    fn from((width, height): (u32, u32)) -> Self {
        Extent::new(width.into(), height.into())
    }
}

impl From<(f64, f64)> for Extent {
    fn from((width, height): (f64, f64)) -> Self {
        Extent::new(width, height)
    }
}

/// Colored vertex in the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: E2,
    pub color: Rgb,
}

impl Vertex {
    pub fn new(position: E2, color: Rgb) -> Self {
        Vertex { position, color }
    }

    pub fn from_xy(x: f64, y: f64, color: Rgb) -> Self {
        Vertex::new(E2::new(x, y), color)
    }

    /// Decodes a vertex from exactly [`VERTEX_STRIDE`] raw values.
    ///
    /// The $z$ component is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice has the wrong length or if a color channel
    /// is not an integer in $[0, 255]$.
    ///
    /// [`VERTEX_STRIDE`]: crate::geometry::VERTEX_STRIDE
    pub fn try_from_raw(raw: &[f64]) -> Result<Self, BufferError> {
        match *raw {
            [x, y, _, r, g, b] => Ok(Vertex::from_xy(
                x,
                y,
                Rgb::new(channel(r)?, channel(g)?, channel(b)?),
            )),
            _ => Err(BufferError::VertexUnaligned),
        }
    }

    pub fn into_raw(self) -> [f64; VERTEX_STRIDE] {
        let Vertex { position, color } = self;
        [
            position.x,
            position.y,
            0.0,
            color.r.into(),
            color.g.into(),
            color.b.into(),
        ]
    }

    /// Gets a hashable key that identifies the exact data of the vertex.
    pub fn key(&self) -> VertexKey {
        VertexKey {
            position: [self.position.x.to_bits(), self.position.y.to_bits()],
            color: self.color,
        }
    }
}

impl AbsDiffEq for Vertex {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.color == other.color && self.position.abs_diff_eq(&other.position, epsilon)
    }
}

impl FromGeometry<(E2, Rgb)> for Vertex {
    fn from_geometry((position, color): (E2, Rgb)) -> Self {
        Vertex::new(position, color)
    }
}

impl FromGeometry<Vertex> for (E2, Rgb) {
    fn from_geometry(vertex: Vertex) -> Self {
        (vertex.position, vertex.color)
    }
}

impl FromGeometry<Vertex> for [f64; VERTEX_STRIDE] {
    fn from_geometry(vertex: Vertex) -> Self {
        vertex.into_raw()
    }
}

/// Bitwise identity of a [`Vertex`].
///
/// Positions are compared by their bit patterns, so `-0.0` and `0.0` are
/// distinct keys.
///
/// [`Vertex`]: crate::geometry::Vertex
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VertexKey {
    position: [u64; 2],
    color: Rgb,
}

/// Flattens vertices into a raw vertex buffer.
pub fn into_raw_buffer<I>(vertices: I) -> Vec<f64>
where
    I: IntoIterator<Item = Vertex>,
{
    vertices.into_iter().flat_map(Vertex::into_raw).collect()
}

/// Decodes a raw vertex buffer.
///
/// # Errors
///
/// Returns an error if the length of the buffer is not a multiple of
/// [`VERTEX_STRIDE`] or if any color channel is not an integer in $[0, 255]$.
///
/// [`VERTEX_STRIDE`]: crate::geometry::VERTEX_STRIDE
pub fn from_raw_buffer(raw: &[f64]) -> Result<Vec<Vertex>, BufferError> {
    if raw.len() % VERTEX_STRIDE != 0 {
        return Err(BufferError::VertexUnaligned);
    }
    raw.chunks_exact(VERTEX_STRIDE)
        .map(Vertex::try_from_raw)
        .collect()
}

fn channel(value: f64) -> Result<u8, BufferError> {
    let channel = if value.fract() == 0.0 {
        value.to_u8()
    }
    else {
        None
    };
    channel.ok_or(BufferError::ChannelOutOfRange { value })
}

//! Linear representation of meshes.
//!
//! This module provides a `MeshBuffer` that represents a mesh as a linear
//! collection of vertex data and an ordered collection of indices into that
//! vertex data. These two buffers are called the _vertex buffer_ and _index
//! buffer_, respectively. `MeshBuffer` combines these buffers and exposes them
//! as slices. This layout is what indexed rasterization expects.
//!
//! # Vertex Buffers
//!
//! `MeshBuffer`s use _composite_ vertex buffers. Each element of the vertex
//! buffer completely describes that vertex. For the test geometry, each
//! element is a [`Vertex`] with a position and color. A raw vertex buffer of
//! `f64`s can be produced with [`MeshBuffer::raw_vertex_buffer`].
//!
//! # Index Buffers
//!
//! Index buffers describe the topology of a `MeshBuffer`. Both _structured_ and
//! _flat_ index buffers are supported. See the [`index`] module for more
//! information about index buffer formats.
//!
//! # Triangle Lists
//!
//! A triangular `MeshBuffer` can be expanded into a _triangle list_, in which
//! each trigon owns copies of its three vertices and no index buffer is needed.
//! See [`MeshBuffer::into_triangle_list`].
//!
//! # Examples
//!
//! Building a flat `MeshBuffer` from raw buffers:
//!
//! ```rust
//! use trifill::buffer::MeshBuffer;
//! use trifill::color::Rgb;
//! use trifill::geometry::Vertex;
//! use trifill::index::Flat3;
//! use trifill::prelude::*;
//!
//! let buffer = MeshBuffer::<Flat3<u32>, _>::from_raw_buffers(
//!     vec![0u32, 1, 2, 2, 1, 3],
//!     vec![
//!         Vertex::from_xy(0.0, 0.0, Rgb::RED),
//!         Vertex::from_xy(1.0, 0.0, Rgb::GREEN),
//!         Vertex::from_xy(0.0, 1.0, Rgb::BLUE),
//!         Vertex::from_xy(1.0, 1.0, Rgb::YELLOW),
//!     ],
//! )
//! .unwrap();
//! assert_eq!(2, buffer.triangle_count());
//! assert_eq!(6, buffer.into_triangle_list().len());
//! ```
//!
//! [`Vertex`]: crate::geometry::Vertex
//! [`index`]: crate::index
//! [`MeshBuffer::into_triangle_list`]: crate::buffer::MeshBuffer::into_triangle_list
//! [`MeshBuffer::raw_vertex_buffer`]: crate::buffer::MeshBuffer::raw_vertex_buffer

// Indices are converted to `usize` to address the vertex buffer. These
// conversions cannot fail for a consistent `MeshBuffer`, because its vertex
// buffer cannot be larger than the maximum value of `usize`.

use itertools::Itertools;
use num::{Integer, NumCast, Unsigned};
use std::fmt::{self, Debug, Formatter};
use std::vec;
use thiserror::Error;
use typenum::{self, NonZero, Unsigned as _, U3};

use crate::geometry::{self, FromGeometry, IntoGeometry, Vertex};
use crate::index::{
    BufferOf, Flat, Flat3, FromIndexer, Grouping, IndexOf, IndexVertices, Indexer, Push,
};
use crate::primitive::decompose::Vertices;
use crate::primitive::{IntoPolygons, Map, Polygonal, Topological, Trigon};
use crate::FromRawBuffers;

#[derive(Debug, Error, PartialEq)]
pub enum BufferError {
    #[error("index into vertex data out of bounds")]
    IndexOutOfBounds,
    #[error("index overflow")]
    IndexOverflow,
    #[error("index buffer conflicts with arity")]
    IndexUnaligned,
    #[error("vertex buffer conflicts with vertex stride")]
    VertexUnaligned,
    #[error("color channel out of range: {value}")]
    ChannelOutOfRange { value: f64 },
}

/// Linear representation of a mesh.
///
/// A `MeshBuffer` is composed of two separate buffers: an _index buffer_ and a
/// _vertex buffer_. The index buffer contains ordered indices into the data in
/// the vertex buffer and describes the topology of the mesh. The vertex buffer
/// contains arbitrary vertex data.
///
/// See the module documentation for more information.
pub struct MeshBuffer<R, G>
where
    R: Grouping,
{
    indices: Vec<R::Group>,
    vertices: Vec<G>,
}

impl<R, G> MeshBuffer<R, G>
where
    R: Grouping,
{
    /// Creates an empty `MeshBuffer`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_raw_buffers(self) -> (Vec<R::Group>, Vec<G>) {
        let MeshBuffer { indices, vertices } = self;
        (indices, vertices)
    }

    /// Maps over the vertex data in a `MeshBuffer`.
    ///
    /// # Examples
    ///
    /// Translating the positions of a grid:
    ///
    /// ```rust
    /// use nalgebra::Vector2;
    /// use trifill::primitive::grid::Grid;
    ///
    /// let buffer = Grid::new(2, 2).to_mesh_buffer::<u32>().unwrap();
    /// let translation = Vector2::new(5.0, 0.0);
    /// let buffer = buffer.map_vertices(|mut vertex| {
    ///     vertex.position += translation;
    ///     vertex
    /// });
    /// assert_eq!(15.0, buffer.as_vertex_slice()[0].position.x);
    /// ```
    pub fn map_vertices<H, F>(self, f: F) -> MeshBuffer<R, H>
    where
        F: FnMut(G) -> H,
    {
        let (indices, vertices) = self.into_raw_buffers();
        MeshBuffer {
            indices,
            vertices: vertices.into_iter().map(f).collect::<Vec<_>>(),
        }
    }

    /// Gets a slice of the index data.
    pub fn as_index_slice(&self) -> &[R::Group] {
        self.indices.as_slice()
    }

    /// Gets a slice of the vertex data.
    pub fn as_vertex_slice(&self) -> &[G] {
        self.vertices.as_slice()
    }

    /// Expands the buffer into a triangle list.
    ///
    /// Every index is replaced by a copy of the vertex that it addresses, so
    /// vertices are no longer shared between trigons. Each consecutive triple
    /// of vertices in the output forms a trigon and the trigons are in the
    /// same order as in the index buffer.
    pub fn into_triangle_list(self) -> Vec<G>
    where
        Self: IntoPolygons<Polygon = Trigon<G>>,
    {
        self.into_polygons().into_iter().vertices().collect()
    }
}

impl<R> MeshBuffer<R, Vertex>
where
    R: Grouping,
{
    /// Flattens the vertex buffer into raw `f64`s.
    ///
    /// See [`geometry::into_raw_buffer`].
    ///
    /// [`geometry::into_raw_buffer`]: crate::geometry::into_raw_buffer
    pub fn raw_vertex_buffer(&self) -> Vec<f64> {
        geometry::into_raw_buffer(self.vertices.iter().copied())
    }
}

impl<N, G> MeshBuffer<Flat3<N>, G>
where
    N: Copy + Integer + Unsigned,
{
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / U3::USIZE
    }

    /// Converts a flat index buffer into a structured index buffer.
    pub fn into_structured_index(self) -> MeshBuffer<Trigon<N>, G> {
        let MeshBuffer { indices, vertices } = self;
        let indices = indices
            .into_iter()
            .chunks(U3::USIZE)
            .into_iter()
            .map(|chunk| chunk.collect_tuple().map(|(a, b, c)| Trigon::new(a, b, c)))
            .collect::<Option<Vec<_>>>()
            .expect("inconsistent index buffer");
        MeshBuffer { indices, vertices }
    }
}

impl<N, G> MeshBuffer<Trigon<N>, G>
where
    N: Copy + Integer + Unsigned,
{
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Converts a structured index buffer into a flat index buffer.
    pub fn into_flat_index(self) -> MeshBuffer<Flat3<N>, G> {
        let MeshBuffer { indices, vertices } = self;
        MeshBuffer {
            indices: indices.into_iter().vertices().collect(),
            vertices,
        }
    }
}

impl<R, G> Clone for MeshBuffer<R, G>
where
    R: Grouping,
    R::Group: Clone,
    G: Clone,
{
    fn clone(&self) -> Self {
        MeshBuffer {
            indices: self.indices.clone(),
            vertices: self.vertices.clone(),
        }
    }
}

impl<R, G> Debug for MeshBuffer<R, G>
where
    R: Grouping,
    R::Group: Debug,
    G: Debug,
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MeshBuffer")
            .field("indices", &self.indices)
            .field("vertices", &self.vertices)
            .finish()
    }
}

impl<R, G> Default for MeshBuffer<R, G>
where
    R: Grouping,
{
    fn default() -> Self {
        MeshBuffer {
            indices: Default::default(),
            vertices: Default::default(),
        }
    }
}

impl<R, G> PartialEq for MeshBuffer<R, G>
where
    R: Grouping,
    R::Group: PartialEq,
    G: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.indices == other.indices && self.vertices == other.vertices
    }
}

impl<R, P, G> FromIndexer<P, P> for MeshBuffer<R, G>
where
    R: Grouping,
    G: FromGeometry<P::Vertex>,
    P: Map<IndexOf<R>> + Topological,
    P::Output: Topological<Vertex = IndexOf<R>>,
    BufferOf<R>: Push<R, P::Output>,
    IndexOf<R>: NumCast,
    Self: FromRawBuffers<R::Group, G, Error = BufferError>,
{
    type Error = BufferError;

    fn from_indexer<I, M>(input: I, indexer: M) -> Result<Self, Self::Error>
    where
        I: IntoIterator<Item = P>,
        M: Indexer<P>,
    {
        let (indices, vertices) = input.into_iter().index_vertices::<R, _>(indexer)?;
        MeshBuffer::<R, _>::from_raw_buffers(
            indices,
            vertices.into_iter().map(|vertex| vertex.into_geometry()),
        )
    }
}

impl<A, N, M, G> FromRawBuffers<M, G> for MeshBuffer<Flat<A, N>, G>
where
    A: NonZero + typenum::Unsigned,
    N: Copy + Integer + NumCast + Unsigned,
    M: Copy + Integer + NumCast + Unsigned,
{
    type Error = BufferError;

    /// Creates a flat `MeshBuffer` from raw index and vertex buffers.
    ///
    /// # Errors
    ///
    /// Returns an error if the index data is out of bounds within the vertex
    /// buffer, if an index cannot be represented by `N`, or if the number of
    /// indices disagrees with the arity of the index buffer.
    fn from_raw_buffers<I, J>(indices: I, vertices: J) -> Result<Self, BufferError>
    where
        I: IntoIterator<Item = M>,
        J: IntoIterator<Item = G>,
    {
        let indices = indices
            .into_iter()
            .map(|index| <N as NumCast>::from(index).ok_or(BufferError::IndexOverflow))
            .collect::<Result<Vec<_>, _>>()?;
        if indices.len() % A::USIZE != 0 {
            Err(BufferError::IndexUnaligned)
        }
        else {
            let vertices: Vec<_> = vertices.into_iter().collect();
            if indices
                .iter()
                .any(|index| !is_in_bounds(*index, vertices.len()))
            {
                Err(BufferError::IndexOutOfBounds)
            }
            else {
                Ok(MeshBuffer { indices, vertices })
            }
        }
    }
}

impl<P, Q, G> FromRawBuffers<Q, G> for MeshBuffer<P, G>
where
    P: From<Q> + Grouping<Group = P> + Polygonal,
    P::Vertex: Copy + Integer + NumCast + Unsigned,
{
    type Error = BufferError;

    /// Creates a structured `MeshBuffer` from raw index and vertex buffers.
    ///
    /// # Errors
    ///
    /// Returns an error if the index data is out of bounds within the vertex
    /// buffer.
    fn from_raw_buffers<I, J>(indices: I, vertices: J) -> Result<Self, BufferError>
    where
        I: IntoIterator<Item = Q>,
        J: IntoIterator<Item = G>,
    {
        let indices: Vec<_> = indices.into_iter().map(P::from).collect();
        let vertices: Vec<_> = vertices.into_iter().collect();
        let is_out_of_bounds = indices.iter().any(|polygon| {
            polygon
                .as_ref()
                .iter()
                .any(|index| !is_in_bounds(*index, vertices.len()))
        });
        if is_out_of_bounds {
            Err(BufferError::IndexOutOfBounds)
        }
        else {
            Ok(MeshBuffer { indices, vertices })
        }
    }
}

impl<N, G> IntoPolygons for MeshBuffer<Flat3<N>, G>
where
    N: Copy + Integer + NumCast + Unsigned,
    G: Clone,
{
    type Output = vec::IntoIter<Self::Polygon>;
    type Polygon = Trigon<G>;

    /// Converts a triangular flat `MeshBuffer` into an iterator of `Trigon`s
    /// containing vertex data.
    fn into_polygons(self) -> Self::Output {
        self.into_structured_index().into_polygons()
    }
}

impl<N, G> IntoPolygons for MeshBuffer<Trigon<N>, G>
where
    N: Copy + Integer + NumCast + Unsigned,
    G: Clone,
{
    type Output = vec::IntoIter<Self::Polygon>;
    type Polygon = Trigon<G>;

    /// Converts a triangular structured `MeshBuffer` into an iterator of
    /// `Trigon`s containing vertex data.
    fn into_polygons(self) -> Self::Output {
        let (indices, vertices) = self.into_raw_buffers();
        indices
            .into_iter()
            .map(|trigon| {
                trigon.map(|index| {
                    let index = <usize as NumCast>::from(index).expect("index overflow");
                    vertices[index].clone()
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
    }
}

fn is_in_bounds<N>(index: N, len: usize) -> bool
where
    N: NumCast,
{
    <usize as NumCast>::from(index).map_or(false, |index| index < len)
}

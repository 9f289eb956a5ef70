//! Grid primitives.
//!
//! A [`Grid`] tessellates an axis-aligned rectangle into cells, each of which
//! is split into two trigons. Vertex colors are blended bilinearly between the
//! [`Corners`] of the rectangle.
//!
//! Grids are emitted in two forms. The _indexed_ form shares vertices between
//! adjacent trigons via an index buffer. The _flattened_ form expands the
//! indexed form into a triangle list, in which each trigon owns copies of its
//! three vertices. Both describe exactly the same trigons.
//!
//! # Examples
//!
//! Building an indexed mesh and flattening it into a triangle list:
//!
//! ```rust
//! use trifill::primitive::grid::Grid;
//!
//! let grid = Grid::new(1, 1);
//! let buffer = grid.to_mesh_buffer::<u32>().unwrap();
//! assert_eq!(&[0, 1, 2, 1, 3, 2], buffer.as_index_slice());
//!
//! let vertices = buffer.into_triangle_list();
//! assert_eq!(6, vertices.len());
//! ```
//!
//! [`Corners`]: crate::color::Corners
//! [`Grid`]: crate::primitive::grid::Grid

use num::{Integer, NumCast, Unsigned};
use std::cmp;
use tracing::warn;

use crate::buffer::{BufferError, MeshBuffer};
use crate::color::Corners;
use crate::geometry::{Vertex, E2};
use crate::index::Flat3;
use crate::primitive::generate::{
    Generator, IndexingPolygonGenerator, PolygonGenerator, VertexGenerator,
};
use crate::primitive::Trigon;
use crate::FromRawBuffers;

/// Bilinearly colored grid anchored in surface coordinates.
///
/// The resolution of a grid is the number of cells along each axis. Vertex
/// $(i, j)$ is at index $i(y + 1) + j$, where $y$ is the resolution along the
/// $y$ axis. Cells are emitted in the same order and each cell $(i, j)$ emits
/// the trigons $\{(i, j), (i, j + 1), (i + 1, j)\}$ and
/// $\{(i, j + 1), (i + 1, j + 1), (i + 1, j)\}$.
///
/// Unlike the other generators, grids are not placed relative to a surface, so
/// their state is the unit type `()`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    origin: E2,
    width: f64,
    height: f64,
    resolution: (usize, usize),
    corners: Corners,
}

impl Grid {
    pub const DEFAULT_OFFSET: f64 = 10.0;
    pub const DEFAULT_WIDTH: f64 = 180.0;
    pub const DEFAULT_HEIGHT: f64 = 100.0;
    pub const DEFAULT_RESOLUTION: (usize, usize) = (10, 5);

    /// Creates a grid with the given number of cells along the $x$ and $y$
    /// axes.
    ///
    /// At least one cell is used along each axis.
    pub fn new(x: usize, y: usize) -> Self {
        if x == 0 || y == 0 {
            warn!(x, y, "grid requires at least one cell along each axis");
        }
        Grid {
            origin: E2::new(Self::DEFAULT_OFFSET, Self::DEFAULT_OFFSET),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            resolution: (cmp::max(1, x), cmp::max(1, y)),
            corners: Corners::default(),
        }
    }

    pub fn with_resolution(self, x: usize, y: usize) -> Self {
        Grid {
            resolution: Grid::new(x, y).resolution,
            ..self
        }
    }

    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = E2::new(x, y);
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_corners(mut self, corners: Corners) -> Self {
        self.corners = corners;
        self
    }

    pub fn origin(&self) -> &E2 {
        &self.origin
    }

    pub fn resolution(&self) -> (usize, usize) {
        self.resolution
    }

    pub fn corners(&self) -> &Corners {
        &self.corners
    }

    /// Builds an indexed mesh of the grid.
    ///
    /// The index buffer is flat: each consecutive triple of indices forms a
    /// trigon.
    ///
    /// # Errors
    ///
    /// Returns an error if `N` cannot represent the index of every vertex.
    pub fn to_mesh_buffer<N>(&self) -> Result<MeshBuffer<Flat3<N>, Vertex>, BufferError>
    where
        N: Copy + Integer + NumCast + Unsigned,
    {
        MeshBuffer::<Flat3<N>, _>::from_raw_buffers(
            self.indexing_polygons().flat_map(|trigon| trigon.into_array()),
            self.vertices(),
        )
    }

    fn index(&self, i: usize, j: usize) -> usize {
        (i * (self.resolution.1 + 1)) + j
    }
}

impl Default for Grid {
    fn default() -> Self {
        let (x, y) = Self::DEFAULT_RESOLUTION;
        Grid::new(x, y)
    }
}

impl Generator for Grid {}

impl VertexGenerator for Grid {
    type State = ();

    fn vertex_count(&self) -> usize {
        let (x, y) = self.resolution;
        (x + 1) * (y + 1)
    }

    fn vertex_from(&self, _: &Self::State, index: usize) -> Vertex {
        let (x, y) = self.resolution;
        let (i, j) = (index / (y + 1), index % (y + 1));
        let (s, t) = (i as f64 / x as f64, j as f64 / y as f64);
        let position = E2::new(
            self.origin.x + (i as f64 * (self.width / x as f64)),
            self.origin.y + (j as f64 * (self.height / y as f64)),
        );
        Vertex::new(position, self.corners.at(s, t))
    }
}

impl PolygonGenerator for Grid {
    fn polygon_count(&self) -> usize {
        let (x, y) = self.resolution;
        2 * x * y
    }
}

impl IndexingPolygonGenerator for Grid {
    type Output = Trigon<usize>;

    fn indexing_polygon(&self, index: usize) -> Self::Output {
        debug_assert!(index < self.polygon_count());
        let cell = index / 2;
        let (i, j) = (cell / self.resolution.1, cell % self.resolution.1);
        if index % 2 == 0 {
            Trigon::new(self.index(i, j), self.index(i, j + 1), self.index(i + 1, j))
        }
        else {
            Trigon::new(
                self.index(i, j + 1),
                self.index(i + 1, j + 1),
                self.index(i + 1, j),
            )
        }
    }
}

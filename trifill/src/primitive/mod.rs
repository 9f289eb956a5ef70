//! Primitive topological structures.
//!
//! This module provides composable primitives that describe polygonal
//! structures, the [generators][`generate`] that emit the test geometry, and
//! iterator expressions that [decompose][`decompose`] streams of primitives.
//!
//! Types in this module describe cycle graphs and are not strictly geometric.
//! For example, a [`Trigon`] may contain vertex data (positions and colors) or
//! indices into a vertex buffer, in which case its representation is entirely
//! topological. The term _trigon_ is used for triangles, but the term
//! _triangle_ is still used in some contexts, such as _triangle strips_ and
//! _triangulation_.
//!
//! # Generators
//!
//! | Generator    | Primitive              | Vertices                 |
//! |--------------|------------------------|--------------------------|
//! | `TorusStrip` | Triangle strip         | $2n + 2$                 |
//! | `QuarterFan` | Triangle fan           | $n + 2$                  |
//! | `Grid`       | Indexed triangles      | $(x + 1)(y + 1)$         |
//! | `Grid`       | Triangle list (flat)   | $6xy$                    |
//!
//! # Examples
//!
//! Generating the indices of a grid as a stream of trigons:
//!
//! ```rust
//! use trifill::prelude::*;
//! use trifill::primitive::grid::Grid;
//!
//! let indices: Vec<usize> = Grid::default()
//!     .with_resolution(2, 2)
//!     .indexing_polygons()
//!     .vertices()
//!     .collect();
//! assert_eq!(24, indices.len());
//! ```
//!
//! [`decompose`]: crate::primitive::decompose
//! [`generate`]: crate::primitive::generate
//! [`Trigon`]: crate::primitive::Trigon

pub mod decompose;
pub mod fan;
pub mod generate;
pub mod grid;
pub mod strip;

use std::ops::{Index, IndexMut};

use crate::geometry::AsPosition;

/// Topological structure.
///
/// Types implementing `Topological` provide some notion of adjacency between
/// vertices of their `Vertex` type.
pub trait Topological:
    AsMut<[<Self as Topological>::Vertex]>
    + AsRef<[<Self as Topological>::Vertex]>
    + IntoIterator<Item = <Self as Topological>::Vertex>
    + Sized
{
    type Vertex;

    const ARITY: usize;

    fn try_from_slice<T>(vertices: T) -> Option<Self>
    where
        Self::Vertex: Copy,
        T: AsRef<[Self::Vertex]>;

    fn arity(&self) -> usize {
        Self::ARITY
    }
}

/// Polygonal structure.
///
/// `Polygonal` types form cycle graphs of three or more vertices.
pub trait Polygonal: Topological {}

pub trait IntoPolygons: Sized {
    type Output: IntoIterator<Item = Self::Polygon>;
    type Polygon: Polygonal;

    fn into_polygons(self) -> Self::Output;
}

pub trait Map<T>: Topological {
    type Output: Topological<Vertex = T>;

    fn map<F>(self, f: F) -> Self::Output
    where
        F: FnMut(Self::Vertex) -> T;
}

pub trait Rotate {
    /// Rotates the vertices of a structure by `n` positions, such that the
    /// vertex at index `n` becomes the first vertex. Negative values rotate in
    /// the opposite direction.
    fn rotate(self, n: isize) -> Self;
}

/// Direction in which the vertices of a polygon circulate.
///
/// Directions are given with respect to a $y$-up frame. In a $y$-down frame,
/// such as a raster surface, the directions appear reversed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Monomorphic $n$-gon.
///
/// `NGon` represents a polygonal structure as an array. Each array element
/// represents vertex data in order with adjacent elements being connected by an
/// implicit undirected edge.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NGon<A>(pub A);

impl<T, const N: usize> NGon<[T; N]> {
    pub fn into_array(self) -> [T; N] {
        self.0
    }
}

impl<T, const N: usize> AsRef<[T]> for NGon<[T; N]> {
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

impl<T, const N: usize> AsMut<[T]> for NGon<[T; N]> {
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.0
    }
}

impl<T, const N: usize> From<[T; N]> for NGon<[T; N]> {
    fn from(array: [T; N]) -> Self {
        NGon(array)
    }
}

impl<T, const N: usize> Index<usize> for NGon<[T; N]> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for NGon<[T; N]> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl<T, const N: usize> IntoIterator for NGon<[T; N]> {
    type Item = T;
    type IntoIter = std::array::IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T, U, const N: usize> Map<U> for NGon<[T; N]> {
    type Output = NGon<[U; N]>;

    fn map<F>(self, f: F) -> Self::Output
    where
        F: FnMut(Self::Vertex) -> U,
    {
        NGon(self.0.map(f))
    }
}

impl<T, const N: usize> Rotate for NGon<[T; N]> {
    fn rotate(mut self, n: isize) -> Self {
        if N > 0 {
            self.0.rotate_left(umod(n, N as isize) as usize);
        }
        self
    }
}

impl<T, const N: usize> Topological for NGon<[T; N]> {
    type Vertex = T;

    const ARITY: usize = N;

    fn try_from_slice<U>(vertices: U) -> Option<Self>
    where
        Self::Vertex: Copy,
        U: AsRef<[Self::Vertex]>,
    {
        vertices.as_ref().try_into().map(NGon).ok()
    }
}

/// Triangle.
pub type Trigon<T> = NGon<[T; 3]>;

impl<T> Trigon<T> {
    pub fn new(a: T, b: T, c: T) -> Self {
        NGon([a, b, c])
    }

    /// Gets the signed area of the trigon.
    ///
    /// The area is positive if the vertices circulate counter-clockwise in a
    /// $y$-up frame.
    pub fn signed_area(&self) -> f64
    where
        T: AsPosition,
    {
        let [a, b, c] = &self.0;
        let a = a.as_position();
        let (ab, ac) = (b.as_position() - a, c.as_position() - a);
        ((ab.x * ac.y) - (ab.y * ac.x)) / 2.0
    }

    /// Gets the winding of the trigon or `None` if it is degenerate (its
    /// vertices are collinear or converged).
    pub fn winding(&self) -> Option<Winding>
    where
        T: AsPosition,
    {
        let area = self.signed_area();
        if area > 0.0 {
            Some(Winding::CounterClockwise)
        }
        else if area < 0.0 {
            Some(Winding::Clockwise)
        }
        else {
            None
        }
    }

    /// Determines if two trigons describe the same cycle, ignoring which vertex
    /// is first.
    pub fn is_rotation_of(&self, other: &Self) -> bool
    where
        T: Clone + PartialEq,
    {
        (0..3).any(|n| other.clone().rotate(n) == *self)
    }
}

impl<T> Polygonal for Trigon<T> {}

fn umod(n: isize, m: isize) -> isize {
    ((n % m) + m) % m
}

#[cfg(test)]
mod tests {
    use crate::color::Rgb;
    use crate::geometry::{Vertex, E2};
    use crate::primitive::{Map, NGon, Rotate, Topological, Trigon, Winding};

    #[test]
    fn rotate_trigon() {
        let trigon = Trigon::new(0usize, 1, 2);

        assert_eq!(Trigon::new(1, 2, 0), trigon.rotate(1));
        assert_eq!(Trigon::new(2, 0, 1), trigon.rotate(2));
        assert_eq!(Trigon::new(2, 0, 1), trigon.rotate(-1));
        assert_eq!(trigon, trigon.rotate(3));
        assert!(trigon.is_rotation_of(&Trigon::new(2, 0, 1)));
        assert!(!trigon.is_rotation_of(&Trigon::new(0, 2, 1)));
    }

    #[test]
    fn winding() {
        let ccw = Trigon::new(E2::new(0.0, 0.0), E2::new(1.0, 0.0), E2::new(0.0, 1.0));
        let cw = Trigon::new(E2::new(0.0, 0.0), E2::new(0.0, 1.0), E2::new(1.0, 0.0));
        let degenerate = Trigon::new(E2::new(0.0, 0.0), E2::new(1.0, 1.0), E2::new(2.0, 2.0));

        assert_eq!(0.5, ccw.signed_area());
        assert_eq!(Some(Winding::CounterClockwise), ccw.winding());
        assert_eq!(Some(Winding::Clockwise), cw.winding());
        assert_eq!(None, degenerate.winding());
    }

    #[test]
    fn winding_of_vertices() {
        let trigon = Trigon::new(
            Vertex::from_xy(0.0, 0.0, Rgb::RED),
            Vertex::from_xy(0.0, 2.0, Rgb::GREEN),
            Vertex::from_xy(2.0, 0.0, Rgb::BLUE),
        );

        assert_eq!(-2.0, trigon.signed_area());
    }

    #[test]
    fn map_and_slice() {
        let trigon = Trigon::new(1usize, 2, 3).map(|index| index * 10);

        assert_eq!(&[10, 20, 30], trigon.as_ref());
        assert_eq!(3, trigon.arity());
        assert_eq!(Some(NGon([4usize, 5, 6])), Trigon::try_from_slice([4, 5, 6]));
        assert_eq!(None, Trigon::<usize>::try_from_slice([4, 5]));
    }
}

//! Indexing and aggregation.
//!
//! This module provides types and traits that describe _index buffers_ and
//! _indexers_ that disambiguate vertex data to construct minimal _index_ and
//! _vertex buffers_. Independent vertex and index buffers are referred to as
//! _raw buffers_. See the [`buffer`] module and [`MeshBuffer`] type for tools
//! for working with these buffers.
//!
//! # Index Buffers
//!
//! Index buffers describe the topology of a mesh as ordered groups of indices
//! into a vertex buffer. Each group of indices represents a trigon. Both
//! _structured_ and _flat_ index buffers are supported via the [`Grouping`] and
//! [`IndexBuffer`] traits, which are implemented for [`Vec`].
//!
//! Flat index buffers contain unstructured indices with an implicit grouping,
//! such as `Vec<u32>`. The arity of these buffers is constant and is described
//! by the [`Flat`] meta-grouping. Rasterizers expect this format.
//!
//! Structured index buffers contain elements that explicitly group indices,
//! such as `Vec<Trigon<usize>>`.
//!
//! # Indexers
//!
//! [`Indexer`]s construct index and vertex buffers from iterators of
//! topological types, such as [`Trigon`]. The [`IndexVertices`] trait provides
//! functions for collecting an iterator of trigons into these buffers and
//! [`CollectWithIndexer`] collects them into a [`MeshBuffer`].
//!
//! Vertices that contain floating-point data cannot be hashed directly, so a
//! [`HashIndexer`] is constructed with a function that maps each vertex to a
//! hashable key, such as [`Vertex::key`].
//!
//! # Examples
//!
//! Re-indexing a triangle list:
//!
//! ```rust
//! use trifill::color::Rgb;
//! use trifill::geometry::Vertex;
//! use trifill::index::{Flat3, HashIndexer};
//! use trifill::prelude::*;
//! use trifill::primitive::Trigon;
//!
//! let a = Vertex::from_xy(0.0, 0.0, Rgb::RED);
//! let b = Vertex::from_xy(1.0, 0.0, Rgb::GREEN);
//! let c = Vertex::from_xy(0.0, 1.0, Rgb::BLUE);
//! let d = Vertex::from_xy(1.0, 1.0, Rgb::YELLOW);
//!
//! let (indices, vertices) = vec![Trigon::new(a, b, c), Trigon::new(c, b, d)]
//!     .into_iter()
//!     .index_vertices::<Flat3, _>(HashIndexer::with_key(Vertex::key))
//!     .unwrap();
//! assert_eq!(vec![0, 1, 2, 2, 1, 3], indices);
//! assert_eq!(4, vertices.len());
//! ```
//!
//! [`Vec`]: std::vec::Vec
//! [`MeshBuffer`]: crate::buffer::MeshBuffer
//! [`buffer`]: crate::buffer
//! [`Vertex::key`]: crate::geometry::Vertex::key
//! [`CollectWithIndexer`]: crate::index::CollectWithIndexer
//! [`Flat`]: crate::index::Flat
//! [`Grouping`]: crate::index::Grouping
//! [`HashIndexer`]: crate::index::HashIndexer
//! [`IndexBuffer`]: crate::index::IndexBuffer
//! [`Indexer`]: crate::index::Indexer
//! [`IndexVertices`]: crate::index::IndexVertices
//! [`Trigon`]: crate::primitive::Trigon

use ahash::RandomState;
use num::{Integer, NumCast, Unsigned, Zero};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use typenum::{self, NonZero, U3};

use crate::buffer::BufferError;
use crate::primitive::decompose::IntoVertices;
use crate::primitive::{Map, Polygonal, Topological};

pub(crate) type BufferOf<R> = Vec<<R as Grouping>::Group>;
pub(crate) type IndexOf<R> = <BufferOf<R> as IndexBuffer<R>>::Index;

/// Index buffer.
pub trait IndexBuffer<R>
where
    R: Grouping,
{
    /// The type of individual indices in the buffer.
    type Index: Copy + Integer + Unsigned;
}

impl<A, N> IndexBuffer<Flat<A, N>> for Vec<N>
where
    A: NonZero + typenum::Unsigned,
    N: Copy + Integer + Unsigned,
{
    type Index = N;
}

impl<P> IndexBuffer<P> for Vec<P>
where
    P: Polygonal,
    P::Vertex: Copy + Integer + Unsigned,
{
    type Index = P::Vertex;
}

pub trait Push<R, P>: IndexBuffer<R>
where
    R: Grouping,
    P: Topological<Vertex = Self::Index>,
{
    fn push(&mut self, index: P);
}

impl<A, N, P> Push<Flat<A, N>, P> for Vec<N>
where
    A: NonZero + typenum::Unsigned,
    N: Copy + Integer + Unsigned,
    P: IntoVertices + Topological<Vertex = N>,
{
    fn push(&mut self, index: P) {
        debug_assert_eq!(A::USIZE, index.arity());
        for index in index.into_vertices() {
            self.push(index);
        }
    }
}

impl<P, Q> Push<P, Q> for Vec<P>
where
    P: From<Q> + Grouping + Polygonal,
    P::Vertex: Copy + Integer + Unsigned,
    Q: Topological<Vertex = P::Vertex>,
    Self: IndexBuffer<P, Index = P::Vertex>,
{
    fn push(&mut self, index: Q) {
        self.push(P::from(index));
    }
}

pub trait Grouping {
    type Group;
}

/// Flat index buffer meta-grouping.
///
/// Describes a flat index buffer with a constant arity `A`. Indices are of type
/// `N`.
///
/// # Examples
///
/// ```rust
/// use trifill::buffer::MeshBuffer;
/// use trifill::color::Rgb;
/// use trifill::geometry::Vertex;
/// use trifill::index::Flat3;
/// use trifill::prelude::*;
///
/// let buffer = MeshBuffer::<Flat3<u32>, _>::from_raw_buffers(
///     vec![0u32, 1, 2],
///     vec![
///         Vertex::from_xy(0.0, 0.0, Rgb::RED),
///         Vertex::from_xy(1.0, 0.0, Rgb::GREEN),
///         Vertex::from_xy(0.0, 1.0, Rgb::BLUE),
///     ],
/// )
/// .unwrap();
/// assert_eq!(1, buffer.triangle_count());
/// ```
#[derive(Debug)]
pub struct Flat<A = U3, N = usize>
where
    A: NonZero + typenum::Unsigned,
    N: Copy + Integer + Unsigned,
{
    phantom: PhantomData<(A, N)>,
}

impl<A, N> Grouping for Flat<A, N>
where
    A: NonZero + typenum::Unsigned,
    N: Copy + Integer + Unsigned,
{
    type Group = N;
}

/// Alias for a flat and triangular index buffer.
pub type Flat3<N = usize> = Flat<U3, N>;

/// Structured index buffer grouping.
impl<P> Grouping for P
where
    P: Polygonal,
    P::Vertex: Copy + Integer + Unsigned,
{
    type Group = P;
}

/// Vertex indexer.
///
/// Disambiguates arbitrary vertex data and emits a one-to-one mapping of
/// indices to vertices.
pub trait Indexer<T>
where
    T: Topological,
{
    /// Indexes a vertex.
    ///
    /// Returns a tuple containing the index and optionally the vertex itself.
    /// The vertex is only returned the first time it is indexed, at which
    /// point it must be pushed onto a vertex buffer in the order given by its
    /// index.
    fn index(&mut self, vertex: T::Vertex) -> (usize, Option<T::Vertex>);
}

/// Hashing vertex indexer.
///
/// Indexes vertices by the keys produced by a function, such that vertices with
/// equal keys share an index. Indices are assigned in the order in which
/// vertices are first seen.
pub struct HashIndexer<T, K, F>
where
    T: Topological,
    K: Eq + Hash,
    F: Fn(&T::Vertex) -> K,
{
    hash: HashMap<K, usize, RandomState>,
    key: F,
    n: usize,
    phantom: PhantomData<T>,
}

impl<T, K, F> HashIndexer<T, K, F>
where
    T: Topological,
    K: Eq + Hash,
    F: Fn(&T::Vertex) -> K,
{
    /// Creates a `HashIndexer` that keys vertices with the given function.
    pub fn with_key(key: F) -> Self {
        HashIndexer {
            hash: HashMap::default(),
            key,
            n: 0,
            phantom: PhantomData,
        }
    }
}

impl<T> HashIndexer<T, T::Vertex, fn(&T::Vertex) -> T::Vertex>
where
    T: Topological,
    T::Vertex: Clone + Eq + Hash,
{
    /// Creates a `HashIndexer` that keys vertices by their own data.
    pub fn new() -> Self {
        let key: fn(&T::Vertex) -> T::Vertex = <T::Vertex as Clone>::clone;
        HashIndexer::with_key(key)
    }
}

impl<T> Default for HashIndexer<T, T::Vertex, fn(&T::Vertex) -> T::Vertex>
where
    T: Topological,
    T::Vertex: Clone + Eq + Hash,
{
    fn default() -> Self {
        HashIndexer::new()
    }
}

impl<T, K, F> Indexer<T> for HashIndexer<T, K, F>
where
    T: Topological,
    K: Eq + Hash,
    F: Fn(&T::Vertex) -> K,
{
    fn index(&mut self, input: T::Vertex) -> (usize, Option<T::Vertex>) {
        let mut vertex = None;
        let mut n = self.n;
        let index = self.hash.entry((self.key)(&input)).or_insert_with(|| {
            vertex = Some(input);
            let m = n;
            n += 1;
            m
        });
        self.n = n;
        (*index, vertex)
    }
}

pub trait GroupedIndexVertices<R, P>: Sized
where
    R: Grouping,
    P: Topological,
{
    fn index_vertices<N>(self, indexer: N) -> Result<(Vec<R::Group>, Vec<P::Vertex>), BufferError>
    where
        N: Indexer<P>;
}

impl<R, P, I> GroupedIndexVertices<R, P> for I
where
    I: Iterator<Item = P>,
    R: Grouping,
    P: Map<IndexOf<R>> + Topological,
    P::Output: Topological<Vertex = IndexOf<R>>,
    BufferOf<R>: Push<R, P::Output>,
    IndexOf<R>: NumCast,
{
    fn index_vertices<N>(
        self,
        mut indexer: N,
    ) -> Result<(Vec<R::Group>, Vec<P::Vertex>), BufferError>
    where
        N: Indexer<P>,
    {
        let mut indices = Vec::new();
        let mut vertices = Vec::new();
        for topology in self {
            let mut is_overflow = false;
            let topology = topology.map(|vertex| {
                let (index, vertex) = indexer.index(vertex);
                if let Some(vertex) = vertex {
                    vertices.push(vertex);
                }
                NumCast::from(index).unwrap_or_else(|| {
                    is_overflow = true;
                    Zero::zero()
                })
            });
            if is_overflow {
                return Err(BufferError::IndexOverflow);
            }
            Push::push(&mut indices, topology);
        }
        Ok((indices, vertices))
    }
}

/// Functions for collecting an iterator of topological types into raw index
/// and vertex buffers.
pub trait IndexVertices<P>
where
    P: Topological,
{
    /// Indexes an iterator of topological structures into raw index and vertex
    /// buffers using the given grouping and indexer.
    ///
    /// # Errors
    ///
    /// Returns an error if an index cannot be represented by the index type of
    /// the grouping.
    fn index_vertices<R, N>(
        self,
        indexer: N,
    ) -> Result<(Vec<R::Group>, Vec<P::Vertex>), BufferError>
    where
        Self: GroupedIndexVertices<R, P>,
        R: Grouping,
        N: Indexer<P>,
    {
        GroupedIndexVertices::<R, P>::index_vertices(self, indexer)
    }
}

impl<P, I> IndexVertices<P> for I
where
    I: Iterator<Item = P>,
    P: Topological,
{
}

pub trait FromIndexer<P, Q>: Sized
where
    P: Topological,
    Q: Topological<Vertex = P::Vertex>,
{
    type Error: Debug;

    fn from_indexer<I, N>(input: I, indexer: N) -> Result<Self, Self::Error>
    where
        I: IntoIterator<Item = P>,
        N: Indexer<Q>;
}

/// Functions for collecting an iterator of topological types into a mesh data
/// structure.
pub trait CollectWithIndexer<P, Q>
where
    P: Topological,
    Q: Topological<Vertex = P::Vertex>,
{
    /// Collects an iterator into a mesh data structure using the provided
    /// indexer.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh data structure cannot be constructed from
    /// the indexed buffers.
    fn collect_with_indexer<T, N>(self, indexer: N) -> Result<T, T::Error>
    where
        T: FromIndexer<P, Q>,
        N: Indexer<Q>;
}

impl<P, Q, I> CollectWithIndexer<P, Q> for I
where
    I: Iterator<Item = P>,
    P: Topological,
    Q: Topological<Vertex = P::Vertex>,
{
    fn collect_with_indexer<T, N>(self, indexer: N) -> Result<T, T::Error>
    where
        T: FromIndexer<P, Q>,
        N: Indexer<Q>,
    {
        T::from_indexer(self, indexer)
    }
}

#[cfg(test)]
mod tests {
    use crate::buffer::BufferError;
    use crate::index::{Flat3, HashIndexer, IndexVertices, Indexer};
    use crate::primitive::Trigon;

    #[test]
    fn index_first_seen_vertices() {
        let mut indexer = HashIndexer::<Trigon<char>, _, _>::new();

        assert_eq!((0, Some('a')), indexer.index('a'));
        assert_eq!((1, Some('b')), indexer.index('b'));
        assert_eq!((0, None), indexer.index('a'));
        assert_eq!((2, Some('c')), indexer.index('c'));
    }

    #[test]
    fn index_by_key() {
        let mut indexer = HashIndexer::<Trigon<i32>, _, _>::with_key(|n: &i32| n.abs());

        assert_eq!((0, Some(-1)), indexer.index(-1));
        assert_eq!((0, None), indexer.index(1));
        assert_eq!((1, Some(2)), indexer.index(2));
    }

    #[test]
    fn index_into_flat_buffer() {
        let (indices, vertices) = vec![Trigon::new('a', 'b', 'c'), Trigon::new('c', 'b', 'd')]
            .into_iter()
            .index_vertices::<Flat3<u8>, _>(HashIndexer::default())
            .unwrap();

        assert_eq!(vec![0, 1, 2, 2, 1, 3], indices);
        assert_eq!(vec!['a', 'b', 'c', 'd'], vertices);
    }

    #[test]
    fn index_into_structured_buffer() {
        let (indices, vertices) = vec![Trigon::new(5u64, 6, 7), Trigon::new(7, 6, 5)]
            .into_iter()
            .index_vertices::<Trigon<u32>, _>(HashIndexer::default())
            .unwrap();

        assert_eq!(vec![Trigon::new(0, 1, 2), Trigon::new(2, 1, 0)], indices);
        assert_eq!(vec![5, 6, 7], vertices);
    }

    #[test]
    fn reject_index_overflow() {
        let result = (0u32..300)
            .map(|n| Trigon::new(n, n, n))
            .index_vertices::<Flat3<u8>, _>(HashIndexer::default());

        assert_eq!(Err(BufferError::IndexOverflow), result.map(|_| ()));
    }
}

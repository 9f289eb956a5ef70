//! Decomposition of primitives.
//!
//! The [`Decompose`] iterator uses conversion traits to decompose iterators of
//! topological structures. For example, [`IntoVertices`] converts a
//! [`Topological`] type into an iterator of its vertices while [`Vertices`]
//! does the same to the items of an iterator.
//!
//! This module also decomposes the vertex streams of triangle strips and
//! triangle fans into [`Trigon`]s, which describes the triangles that a
//! rasterizer fills for these primitives. See [`TriangleStrip`] and
//! [`TriangleFan`].
//!
//! Many of these traits are re-exported in the [`prelude`] module.
//!
//! # Examples
//!
//! Decomposing a triangle strip:
//!
//! ```rust
//! use trifill::prelude::*;
//! use trifill::primitive::Trigon;
//!
//! let trigons: Vec<_> = vec![0usize, 1, 2, 3].into_iter().triangle_strip().collect();
//! assert_eq!(vec![Trigon::new(0, 1, 2), Trigon::new(2, 1, 3)], trigons);
//! ```
//!
//! [`prelude`]: crate::prelude
//! [`Decompose`]: crate::primitive::decompose::Decompose
//! [`IntoVertices`]: crate::primitive::decompose::IntoVertices
//! [`TriangleFan`]: crate::primitive::decompose::TriangleFan
//! [`TriangleStrip`]: crate::primitive::decompose::TriangleStrip
//! [`Vertices`]: crate::primitive::decompose::Vertices
//! [`Topological`]: crate::primitive::Topological
//! [`Trigon`]: crate::primitive::Trigon

use std::collections::VecDeque;
use std::iter::Fuse;

use crate::primitive::{Topological, Trigon};

pub struct Decompose<I, P, Q, R>
where
    R: IntoIterator<Item = Q>,
{
    input: I,
    output: VecDeque<Q>,
    f: fn(P) -> R,
}

impl<I, P, Q, R> Decompose<I, P, Q, R>
where
    R: IntoIterator<Item = Q>,
{
    pub(in crate::primitive) fn new(input: I, f: fn(P) -> R) -> Self {
        Decompose {
            input,
            output: VecDeque::new(),
            f,
        }
    }
}

impl<I, P, Q, R> Iterator for Decompose<I, P, Q, R>
where
    I: Iterator<Item = P>,
    R: IntoIterator<Item = Q>,
{
    type Item = Q;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.output.pop_front() {
                return Some(item);
            }
            if let Some(topology) = self.input.next() {
                self.output.extend((self.f)(topology));
            }
            else {
                return None;
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, _) = self.input.size_hint();
        (lower, None)
    }
}

pub trait IntoVertices: Topological {
    type Output: IntoIterator<Item = Self::Vertex>;

    fn into_vertices(self) -> Self::Output;
}

impl<T> IntoVertices for T
where
    T: Topological,
{
    type Output = Self;

    fn into_vertices(self) -> Self::Output {
        self
    }
}

pub trait Vertices<P>: Sized
where
    P: IntoVertices,
{
    /// Flattens an iterator of topological structures into an iterator of
    /// their vertices.
    fn vertices(self) -> Decompose<Self, P, P::Vertex, P::Output>;
}

impl<I, P> Vertices<P> for I
where
    I: Iterator<Item = P>,
    P: IntoVertices,
{
    fn vertices(self) -> Decompose<Self, P, P::Vertex, P::Output> {
        Decompose::new(self, P::into_vertices)
    }
}

/// Iterator over the trigons of a triangle strip.
///
/// See [`TriangleStrip`].
///
/// [`TriangleStrip`]: crate::primitive::decompose::TriangleStrip
pub struct Strip<I>
where
    I: Iterator,
{
    input: Fuse<I>,
    window: Option<(I::Item, I::Item)>,
    n: usize,
}

impl<I> Iterator for Strip<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = Trigon<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let (a, b) = match self.window.take() {
            Some(window) => window,
            None => (self.input.next()?, self.input.next()?),
        };
        let c = self.input.next()?;
        // Odd trigons swap their leading vertices so that every trigon in the
        // strip has the same winding.
        let trigon = if self.n % 2 == 0 {
            Trigon::new(a, b.clone(), c.clone())
        }
        else {
            Trigon::new(b.clone(), a, c.clone())
        };
        self.window = Some((b, c));
        self.n += 1;
        Some(trigon)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.input.size_hint();
        let pending = if self.window.is_some() { 0 } else { 2 };
        (
            lower.saturating_sub(pending),
            upper.map(|upper| upper.saturating_sub(pending)),
        )
    }
}

/// Iterator over the trigons of a triangle fan.
///
/// See [`TriangleFan`].
///
/// [`TriangleFan`]: crate::primitive::decompose::TriangleFan
pub struct Fan<I>
where
    I: Iterator,
{
    input: Fuse<I>,
    window: Option<(I::Item, I::Item)>,
}

impl<I> Iterator for Fan<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = Trigon<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let (apex, b) = match self.window.take() {
            Some(window) => window,
            None => (self.input.next()?, self.input.next()?),
        };
        let c = self.input.next()?;
        let trigon = Trigon::new(apex.clone(), b, c.clone());
        self.window = Some((apex, c));
        Some(trigon)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.input.size_hint();
        let pending = if self.window.is_some() { 0 } else { 2 };
        (
            lower.saturating_sub(pending),
            upper.map(|upper| upper.saturating_sub(pending)),
        )
    }
}

pub trait TriangleStrip: Iterator + Sized {
    /// Decomposes a triangle strip into trigons.
    ///
    /// Each vertex after the first two forms a trigon with the two vertices
    /// that precede it. The leading vertices of every other trigon are swapped
    /// to preserve winding, so a strip of $n$ vertices yields $n - 2$ trigons
    /// that all circulate in the same direction.
    fn triangle_strip(self) -> Strip<Self>;
}

impl<I> TriangleStrip for I
where
    I: Iterator,
{
    fn triangle_strip(self) -> Strip<Self> {
        Strip {
            input: self.fuse(),
            window: None,
            n: 0,
        }
    }
}

pub trait TriangleFan: Iterator + Sized {
    /// Decomposes a triangle fan into trigons.
    ///
    /// The first vertex is the apex of the fan. Each vertex after the second
    /// forms a trigon with the apex and the vertex that precedes it, so a fan
    /// of $n$ vertices yields $n - 2$ trigons.
    fn triangle_fan(self) -> Fan<Self>;
}

impl<I> TriangleFan for I
where
    I: Iterator,
{
    fn triangle_fan(self) -> Fan<Self> {
        Fan {
            input: self.fuse(),
            window: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::primitive::decompose::{TriangleFan, TriangleStrip, Vertices};
    use crate::primitive::Trigon;

    #[test]
    fn decompose_strip() {
        let trigons: Vec<_> = (0usize..6).triangle_strip().collect();

        assert_eq!(
            vec![
                Trigon::new(0, 1, 2),
                Trigon::new(2, 1, 3),
                Trigon::new(2, 3, 4),
                Trigon::new(4, 3, 5),
            ],
            trigons
        );
    }

    #[test]
    fn decompose_fan() {
        let trigons: Vec<_> = (0usize..5).triangle_fan().collect();

        assert_eq!(
            vec![
                Trigon::new(0, 1, 2),
                Trigon::new(0, 2, 3),
                Trigon::new(0, 3, 4),
            ],
            trigons
        );
    }

    #[test]
    fn decompose_degenerate_sequences() {
        assert_eq!(0, (0usize..2).triangle_strip().count());
        assert_eq!(0, (0usize..1).triangle_fan().count());
        assert_eq!(0, (0usize..0).triangle_strip().count());
    }

    #[test]
    fn flatten_vertices() {
        let vertices: Vec<_> = vec![Trigon::new(0usize, 1, 2), Trigon::new(3, 4, 5)]
            .into_iter()
            .vertices()
            .collect();

        assert_eq!(vec![0, 1, 2, 3, 4, 5], vertices);
    }
}

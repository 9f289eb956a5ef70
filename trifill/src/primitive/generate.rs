//! Primitive generation.
//!
//! This module provides a generic iterator and traits for generating streams
//! of vertex and topological data for the test geometry emitted by
//! [`TorusStrip`], [`QuarterFan`], and [`Grid`].
//!
//! Generators are random access: a vertex or polygon is computed from its
//! index alone. Generators that place geometry relative to a drawable surface
//! accept a _state_, which is typically an [`Extent`].
//!
//! The primary API of this module is exposed by the [`Generator`] trait.
//!
//! [`Extent`]: crate::geometry::Extent
//! [`Generator`]: crate::primitive::generate::Generator
//! [`Grid`]: crate::primitive::grid::Grid
//! [`QuarterFan`]: crate::primitive::fan::QuarterFan
//! [`TorusStrip`]: crate::primitive::strip::TorusStrip

use std::ops::Range;

use crate::geometry::Vertex;
use crate::primitive::{Map, Polygonal};

pub struct Generate<'a, G, S, P>
where
    G: 'a,
{
    generator: &'a G,
    state: S,
    range: Range<usize>,
    f: fn(&'a G, &S, usize) -> P,
}

impl<'a, G, S, P> Generate<'a, G, S, P>
where
    G: 'a,
{
    fn new(generator: &'a G, state: S, n: usize, f: fn(&'a G, &S, usize) -> P) -> Self {
        Generate {
            generator,
            state,
            range: 0..n,
            f,
        }
    }
}

impl<'a, G, S, P> Iterator for Generate<'a, G, S, P>
where
    G: 'a,
{
    type Item = P;

    fn next(&mut self) -> Option<Self::Item> {
        self.range
            .next()
            .map(|index| (self.f)(self.generator, &self.state, index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<'a, G, S, P> ExactSizeIterator for Generate<'a, G, S, P> where G: 'a {}

pub trait VertexGenerator {
    /// Placement of the generated vertices.
    type State: Default;

    fn vertex_count(&self) -> usize;

    fn vertex_from(&self, state: &Self::State, index: usize) -> Vertex;
}

pub trait PolygonGenerator {
    fn polygon_count(&self) -> usize;
}

pub trait IndexingPolygonGenerator: PolygonGenerator {
    type Output: Polygonal<Vertex = usize>;

    fn indexing_polygon(&self, index: usize) -> Self::Output;
}

/// Functions for iterating over the vertices and topology of generators.
pub trait Generator: Sized {
    /// Provides an iterator over the vertices of the generator placed with the
    /// default state.
    ///
    /// Vertices are emitted in buffer order, so the index of a vertex in the
    /// iteration is also its index in a vertex buffer.
    fn vertices(&self) -> Generate<'_, Self, Self::State, Vertex>
    where
        Self: VertexGenerator,
    {
        self.vertices_from(Default::default())
    }

    /// Provides an iterator over the vertices of the generator placed with the
    /// given state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trifill::geometry::Extent;
    /// use trifill::prelude::*;
    /// use trifill::primitive::strip::TorusStrip;
    ///
    /// let vertices: Vec<_> = TorusStrip::default()
    ///     .vertices_from(Extent::new(200.0, 200.0))
    ///     .collect();
    /// assert_eq!(38, vertices.len());
    /// ```
    fn vertices_from(&self, state: Self::State) -> Generate<'_, Self, Self::State, Vertex>
    where
        Self: VertexGenerator,
    {
        Generate::new(self, state, self.vertex_count(), Self::vertex_from)
    }

    /// Provides an iterator over polygons that index the vertices of the
    /// generator.
    ///
    /// This can be paired with [`vertices`] to build raw index and vertex
    /// buffers.
    ///
    /// [`vertices`]: crate::primitive::generate::Generator::vertices
    fn indexing_polygons(&self) -> Generate<'_, Self, (), Self::Output>
    where
        Self: IndexingPolygonGenerator,
    {
        Generate::new(self, (), self.polygon_count(), |generator, _, index| {
            generator.indexing_polygon(index)
        })
    }

    /// Provides an iterator over polygons containing vertex data placed with
    /// the default state.
    ///
    /// Unlike [`indexing_polygons`], vertices are not shared: each polygon owns
    /// copies of its vertices.
    ///
    /// [`indexing_polygons`]: crate::primitive::generate::Generator::indexing_polygons
    fn polygons(
        &self,
    ) -> Generate<'_, Self, Self::State, <Self::Output as Map<Vertex>>::Output>
    where
        Self: IndexingPolygonGenerator + VertexGenerator,
        Self::Output: Map<Vertex>,
    {
        self.polygons_from(Default::default())
    }

    fn polygons_from(
        &self,
        state: Self::State,
    ) -> Generate<'_, Self, Self::State, <Self::Output as Map<Vertex>>::Output>
    where
        Self: IndexingPolygonGenerator + VertexGenerator,
        Self::Output: Map<Vertex>,
    {
        Generate::new(
            self,
            state,
            self.polygon_count(),
            |generator, state, index| {
                generator
                    .indexing_polygon(index)
                    .map(|index| generator.vertex_from(state, index))
            },
        )
    }
}

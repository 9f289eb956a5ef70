//! Rasterization interfaces.
//!
//! Test geometry is consumed by a [`Rasterizer`] that fills triangles on a
//! [`Surface`]. Both are implemented outside of this crate; this module only
//! describes how they are driven.
//!
//! Rasterizers receive raw vertex buffers, in which each vertex is flattened
//! into [`VERTEX_STRIDE`] `f64`s, and raw `u32` index buffers. Buffers are
//! borrowed for the duration of a fill and are not retained.
//!
//! [`VERTEX_STRIDE`]: crate::geometry::VERTEX_STRIDE

use crate::color::Rgb;
use crate::geometry::{Extent, VERTEX_STRIDE};

/// Drawable surface with integer pixel dimensions.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn extent(&self) -> Extent {
        Extent::from((self.width(), self.height()))
    }
}

/// Triangle rasterizer.
pub trait Rasterizer<S>
where
    S: Surface,
{
    /// Fills the trigons of a triangle strip.
    fn fill_triangle_strip(&mut self, vertices: &[f64], surface: &mut S, options: &DrawOptions);

    /// Fills the trigons of a triangle fan. The first vertex is the apex.
    fn fill_triangle_fan(&mut self, vertices: &[f64], surface: &mut S, options: &DrawOptions);

    /// Fills `triangle_count` trigons described by consecutive triples of
    /// `indices` into `vertices`.
    fn fill_indexed_triangles(
        &mut self,
        vertices: &[f64],
        indices: &[u32],
        triangle_count: usize,
        surface: &mut S,
        options: &DrawOptions,
    );

    /// Fills a triangle list, in which consecutive triples of vertices form
    /// trigons.
    fn fill_triangles(&mut self, vertices: &[f64], surface: &mut S, options: &DrawOptions);
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DrawOptions {
    /// Outlines each trigon when `true`.
    pub border: bool,
    pub border_color: Rgb,
}

impl DrawOptions {
    pub fn with_border(color: Rgb) -> Self {
        DrawOptions {
            border: true,
            border_color: color,
        }
    }
}

impl Default for DrawOptions {
    fn default() -> Self {
        DrawOptions {
            border: false,
            border_color: Rgb::BLACK,
        }
    }
}

/// Primitive kind of test geometry, which determines how a rasterizer
/// assembles vertices into trigons.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Primitive {
    TriangleStrip,
    TriangleFan,
    IndexedTriangles,
    Triangles,
}

impl Primitive {
    /// Gets the number of trigons assembled from `vertex_count` vertices and
    /// `index_count` indices.
    pub fn triangle_count(&self, vertex_count: usize, index_count: usize) -> usize {
        match *self {
            Primitive::TriangleStrip | Primitive::TriangleFan => vertex_count.saturating_sub(2),
            Primitive::IndexedTriangles => index_count / 3,
            Primitive::Triangles => vertex_count / 3,
        }
    }

    /// Gets the number of trigons assembled from raw vertex and index buffers.
    pub fn raw_triangle_count(&self, vertices: &[f64], indices: &[u32]) -> usize {
        self.triangle_count(vertices.len() / VERTEX_STRIDE, indices.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Rgb;
    use crate::geometry::Extent;
    use crate::render::{DrawOptions, Primitive, Surface};

    struct Canvas(u32, u32);

    impl Surface for Canvas {
        fn width(&self) -> u32 {
            self.0
        }

        fn height(&self) -> u32 {
            self.1
        }
    }

    #[test]
    fn surface_extent() {
        assert_eq!(Extent::new(320.0, 240.0), Canvas(320, 240).extent());
    }

    #[test]
    fn draw_without_border_by_default() {
        let options = DrawOptions::default();

        assert!(!options.border);
        assert_eq!(Rgb::BLACK, options.border_color);
        assert!(DrawOptions::with_border(Rgb::WHITE).border);
    }

    #[test]
    fn count_assembled_triangles() {
        let vertices = [0.0; 6 * 7];

        assert_eq!(5, Primitive::TriangleStrip.raw_triangle_count(&vertices, &[]));
        assert_eq!(5, Primitive::TriangleFan.raw_triangle_count(&vertices, &[]));
        assert_eq!(2, Primitive::Triangles.raw_triangle_count(&vertices, &[]));
        assert_eq!(
            2,
            Primitive::IndexedTriangles.raw_triangle_count(&vertices, &[0, 1, 2, 2, 1, 3])
        );
        assert_eq!(0, Primitive::TriangleStrip.raw_triangle_count(&[], &[]));
        assert_eq!(0, Primitive::TriangleFan.triangle_count(1, 0));
    }
}

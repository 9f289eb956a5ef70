//! Triangle strip primitives.
//!
//! # Examples
//!
//! Generating a raw vertex buffer for a ring in a $200 \times 200$ surface:
//!
//! ```rust
//! use trifill::geometry::{self, Extent};
//! use trifill::prelude::*;
//! use trifill::primitive::strip::TorusStrip;
//!
//! let raw = geometry::into_raw_buffer(
//!     TorusStrip::default().vertices_from(Extent::new(200.0, 200.0)),
//! );
//! assert_eq!(&[140.0, 100.0, 0.0], &raw[..3]);
//! ```

use nalgebra::Vector2;
use std::cmp;
use std::f64::consts::TAU;
use tracing::warn;

use crate::color::Palette;
use crate::geometry::{Extent, IntoGeometry, Vertex, E2};
use crate::primitive::generate::{Generator, VertexGenerator};

/// Ring of alternating colored trigons emitted as a triangle strip.
///
/// The ring is divided into segments of equal angle. The strip begins with the
/// inner and outer points at angle zero and then emits the inner and outer
/// points at the far angle of each segment, so each segment contributes two
/// trigons. The strip is not welded back onto its first vertices; the last
/// segment ends at a full turn, which coincides with the beginning of the
/// ring.
///
/// The ring is centered on the surface given by an [`Extent`].
///
/// [`Extent`]: crate::geometry::Extent
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TorusStrip {
    inner_radius: f64,
    outer_radius: f64,
    segments: usize,
    palette: Palette,
}

impl TorusStrip {
    pub const DEFAULT_INNER_RADIUS: f64 = 40.0;
    pub const DEFAULT_OUTER_RADIUS: f64 = 80.0;
    pub const DEFAULT_SEGMENTS: usize = 18;

    /// Creates a ring with the given radii and number of segments.
    ///
    /// At least one segment is used.
    pub fn new(inner_radius: f64, outer_radius: f64, segments: usize) -> Self {
        if segments == 0 {
            warn!(segments, "torus strip requires at least one segment");
        }
        TorusStrip {
            inner_radius,
            outer_radius,
            segments: cmp::max(1, segments),
            palette: Palette::default(),
        }
    }

    pub fn with_radii(self, inner_radius: f64, outer_radius: f64) -> Self {
        TorusStrip {
            inner_radius,
            outer_radius,
            ..self
        }
    }

    pub fn with_segments(self, segments: usize) -> Self {
        TorusStrip {
            palette: self.palette,
            ..TorusStrip::new(self.inner_radius, self.outer_radius, segments)
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Gets the angle of the `n`th boundary between segments.
    fn angle(&self, n: usize) -> f64 {
        n as f64 * (TAU / self.segments as f64)
    }
}

impl Default for TorusStrip {
    fn default() -> Self {
        TorusStrip::new(
            Self::DEFAULT_INNER_RADIUS,
            Self::DEFAULT_OUTER_RADIUS,
            Self::DEFAULT_SEGMENTS,
        )
    }
}

impl Generator for TorusStrip {}

impl VertexGenerator for TorusStrip {
    type State = Extent;

    fn vertex_count(&self) -> usize {
        (self.segments * 2) + 2
    }

    fn vertex_from(&self, state: &Self::State, index: usize) -> Vertex {
        debug_assert!(index < self.vertex_count());
        // Vertices alternate between the inner and outer ring. The `n`th pair
        // lies on the `n`th boundary between segments. The first pair seeds the
        // strip and every other pair completes a segment.
        let n = index / 2;
        let (radius, color) = if index % 2 == 0 {
            (self.inner_radius, self.palette.get(n))
        }
        else {
            // The seeding outer point takes the third color of the palette and
            // the outer point of each segment takes the color of that segment.
            // Both are two colors beyond the color of the paired inner point.
            (self.outer_radius, self.palette.get(n + 2))
        };
        let angle = self.angle(n);
        let position: E2 = state.center() + (Vector2::new(angle.cos(), angle.sin()) * radius);
        (position, color).into_geometry()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    use crate::color::{Palette, Rgb};
    use crate::geometry::{Extent, Vertex};
    use crate::prelude::*;
    use crate::primitive::strip::TorusStrip;

    fn extent() -> Extent {
        Extent::new(200.0, 200.0)
    }

    // Emits the strip segment by segment.
    fn emit(strip: &TorusStrip, extent: Extent) -> Vec<Vertex> {
        let n = strip.segments();
        let palette = strip.palette();
        let center = extent.center();
        let point = |radius: f64, angle: f64| {
            (
                center.x + (radius * angle.cos()),
                center.y + (radius * angle.sin()),
            )
        };
        let mut vertices = Vec::new();
        for i in 0..n {
            let current = i as f64 * (2.0 * PI / n as f64);
            let next = (i + 1) as f64 * (2.0 * PI / n as f64);
            if i == 0 {
                let (x, y) = point(strip.inner_radius(), current);
                vertices.push(Vertex::from_xy(x, y, palette.get(i % 3)));
                let (x, y) = point(strip.outer_radius(), current);
                vertices.push(Vertex::from_xy(x, y, palette.get((i + 2) % 3)));
            }
            let (x, y) = point(strip.inner_radius(), next);
            vertices.push(Vertex::from_xy(x, y, palette.get((i + 1) % 3)));
            let (x, y) = point(strip.outer_radius(), next);
            vertices.push(Vertex::from_xy(x, y, palette.get(i % 3)));
        }
        vertices
    }

    #[test]
    fn vertex_count() {
        let vertices: Vec<_> = TorusStrip::default().vertices_from(extent()).collect();

        // Two seeding vertices and two vertices for each of 18 segments.
        assert_eq!(38, vertices.len());
        assert_eq!(38 * 6, crate::geometry::into_raw_buffer(vertices).len());
    }

    #[test]
    fn seed_with_inner_and_outer_points() {
        let vertices: Vec<_> = TorusStrip::default().vertices_from(extent()).collect();

        assert_abs_diff_eq!(Vertex::from_xy(140.0, 100.0, Rgb::RED), vertices[0]);
        assert_abs_diff_eq!(Vertex::from_xy(180.0, 100.0, Rgb::BLUE), vertices[1]);
    }

    #[test]
    fn match_segment_emission() {
        for strip in [
            TorusStrip::default(),
            TorusStrip::new(10.0, 25.0, 5),
            TorusStrip::default().with_radii(3.0, 4.0).with_segments(1),
        ] {
            let expected = emit(&strip, extent());
            let vertices: Vec<_> = strip.vertices_from(extent()).collect();

            assert_eq!(expected.len(), vertices.len());
            for (expected, vertex) in expected.into_iter().zip(vertices) {
                assert_abs_diff_eq!(expected, vertex, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn bound_positions_by_outer_radius() {
        let strip = TorusStrip::default();
        let center = extent().center();
        let r = strip.outer_radius() + 1e-9;

        for vertex in strip.vertices_from(extent()) {
            assert!((center.x - r..=center.x + r).contains(&vertex.position.x));
            assert!((center.y - r..=center.y + r).contains(&vertex.position.y));
        }
    }

    #[test]
    fn close_ring_at_full_turn() {
        let vertices: Vec<_> = TorusStrip::default().vertices_from(extent()).collect();
        let n = vertices.len();

        assert_abs_diff_eq!(vertices[0].position, vertices[n - 2].position, epsilon = 1e-9);
        assert_abs_diff_eq!(vertices[1].position, vertices[n - 1].position, epsilon = 1e-9);
    }

    #[test]
    fn wind_consistently() {
        let trigons: Vec<_> = TorusStrip::default()
            .vertices_from(extent())
            .triangle_strip()
            .collect();

        assert_eq!(36, trigons.len());
        let winding = trigons[0].winding();
        assert!(winding.is_some());
        assert!(trigons.iter().all(|trigon| trigon.winding() == winding));
    }

    #[test]
    fn cycle_palette() {
        let palette = Palette::new(Rgb::BLACK, Rgb::WHITE, Rgb::YELLOW);
        let colors: Vec<_> = TorusStrip::default()
            .with_palette(palette)
            .vertices_from(extent())
            .map(|vertex| vertex.color)
            .take(8)
            .collect();

        assert_eq!(
            vec![
                Rgb::BLACK,
                Rgb::YELLOW,
                Rgb::WHITE,
                Rgb::BLACK,
                Rgb::YELLOW,
                Rgb::WHITE,
                Rgb::BLACK,
                Rgb::YELLOW,
            ],
            colors
        );
    }

    #[test]
    fn clamp_segments() {
        let strip = TorusStrip::new(1.0, 2.0, 0);

        assert_eq!(1, strip.segments());
        assert_eq!(4, strip.vertices_from(extent()).count());
    }

    #[test]
    fn degenerate_extent() {
        let vertices: Vec<_> = TorusStrip::default()
            .vertices_from(Extent::new(0.0, 0.0))
            .collect();

        assert_eq!(38, vertices.len());
        assert_abs_diff_eq!(40.0, vertices[0].position.x);
    }
}

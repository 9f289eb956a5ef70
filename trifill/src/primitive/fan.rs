//! Triangle fan primitives.

use nalgebra::Vector2;
use std::cmp;
use std::f64::consts::PI;
use tracing::warn;

use crate::color::Palette;
use crate::geometry::{Extent, IntoGeometry, Vertex, E2};
use crate::primitive::generate::{Generator, VertexGenerator};

/// Quarter circle emitted as a triangle fan.
///
/// The apex of the fan is anchored near the lower left corner of the surface
/// given by an [`Extent`], inset by an offset along both axes. The rim sweeps
/// a quarter turn from angle zero to $-\frac{\pi}{2}$, divided into trigons of
/// equal angle.
///
/// The apex takes the first color of the palette. Rim vertices alternate
/// between the third and second colors, beginning with the third.
///
/// # Examples
///
/// ```rust
/// use trifill::geometry::Extent;
/// use trifill::prelude::*;
/// use trifill::primitive::fan::QuarterFan;
///
/// let fan = QuarterFan::default();
/// let vertices: Vec<_> = fan.vertices_from(Extent::new(200.0, 200.0)).collect();
/// assert_eq!(fan.triangles() + 2, vertices.len());
/// ```
///
/// [`Extent`]: crate::geometry::Extent
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuarterFan {
    offset: f64,
    radius: f64,
    triangles: usize,
    palette: Palette,
}

impl QuarterFan {
    pub const DEFAULT_OFFSET: f64 = 10.0;
    pub const DEFAULT_RADIUS: f64 = 150.0;
    pub const DEFAULT_TRIANGLES: usize = 5;

    /// Creates a fan with the given radius and number of trigons.
    ///
    /// At least one trigon is used.
    pub fn new(radius: f64, triangles: usize) -> Self {
        if triangles == 0 {
            warn!(triangles, "quarter fan requires at least one triangle");
        }
        QuarterFan {
            offset: Self::DEFAULT_OFFSET,
            radius,
            triangles: cmp::max(1, triangles),
            palette: Palette::default(),
        }
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_triangles(self, triangles: usize) -> Self {
        QuarterFan {
            offset: self.offset,
            palette: self.palette,
            ..QuarterFan::new(self.radius, triangles)
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn triangles(&self) -> usize {
        self.triangles
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Gets the position of the apex within the given extent.
    pub fn apex(&self, extent: &Extent) -> E2 {
        E2::new(self.offset, extent.height - self.offset)
    }
}

impl Default for QuarterFan {
    fn default() -> Self {
        QuarterFan::new(Self::DEFAULT_RADIUS, Self::DEFAULT_TRIANGLES)
    }
}

impl Generator for QuarterFan {}

impl VertexGenerator for QuarterFan {
    type State = Extent;

    fn vertex_count(&self) -> usize {
        self.triangles + 2
    }

    fn vertex_from(&self, state: &Self::State, index: usize) -> Vertex {
        debug_assert!(index < self.vertex_count());
        let apex = self.apex(state);
        if index == 0 {
            (apex, self.palette.get(0)).into_geometry()
        }
        else {
            let i = index - 1;
            let s = i as f64 / self.triangles as f64;
            let angle = -s * PI / 2.0;
            let color = if i % 2 == 0 {
                self.palette.get(2)
            }
            else {
                self.palette.get(1)
            };
            let position: E2 = apex + (Vector2::new(angle.cos(), angle.sin()) * self.radius);
            (position, color).into_geometry()
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::color::Rgb;
    use crate::geometry::{Extent, Vertex};
    use crate::prelude::*;
    use crate::primitive::fan::QuarterFan;
    use crate::primitive::Winding;

    fn extent() -> Extent {
        Extent::new(200.0, 200.0)
    }

    #[test]
    fn vertex_count() {
        assert_eq!(7, QuarterFan::default().vertices_from(extent()).count());
        assert_eq!(
            12,
            QuarterFan::default()
                .with_triangles(10)
                .vertices_from(extent())
                .count()
        );
    }

    #[test]
    fn anchor_apex_and_sweep_rim() {
        let vertices: Vec<_> = QuarterFan::default().vertices_from(extent()).collect();

        assert_abs_diff_eq!(Vertex::from_xy(10.0, 190.0, Rgb::RED), vertices[0]);
        assert_abs_diff_eq!(Vertex::from_xy(160.0, 190.0, Rgb::BLUE), vertices[1]);
        assert_abs_diff_eq!(
            Vertex::from_xy(10.0, 40.0, Rgb::GREEN),
            vertices[6],
            epsilon = 1e-9
        );
        for vertex in &vertices[1..] {
            let d = vertex.position - vertices[0].position;
            assert_abs_diff_eq!(150.0, d.norm(), epsilon = 1e-9);
        }
    }

    #[test]
    fn alternate_rim_colors() {
        let colors: Vec<_> = QuarterFan::default()
            .vertices_from(extent())
            .map(|vertex| vertex.color)
            .collect();

        assert_eq!(
            vec![
                Rgb::RED,
                Rgb::BLUE,
                Rgb::GREEN,
                Rgb::BLUE,
                Rgb::GREEN,
                Rgb::BLUE,
                Rgb::GREEN,
            ],
            colors
        );
    }

    #[test]
    fn wind_consistently() {
        let trigons: Vec<_> = QuarterFan::default()
            .vertices_from(extent())
            .triangle_fan()
            .collect();

        assert_eq!(5, trigons.len());
        // The rim sweeps toward $-y$, which is up on a raster surface.
        assert!(trigons
            .iter()
            .all(|trigon| trigon.winding() == Some(Winding::Clockwise)));
    }

    #[test]
    fn clamp_triangles() {
        let fan = QuarterFan::new(150.0, 0);

        assert_eq!(1, fan.triangles());
        assert_eq!(3, fan.vertices_from(extent()).count());
    }
}

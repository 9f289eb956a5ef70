//! Catalog of test geometry.
//!
//! The [`Catalog`] dispatches string identifiers to the generators of the crate
//! and drives a [`Rasterizer`] with the resulting buffers. Identifiers are
//! parsed into a closed set of [`Model`]s.
//!
//! | Identifier       | Generator    | Primitive         |
//! |------------------|--------------|-------------------|
//! | `"torus"`        | `TorusStrip` | Triangle strip    |
//! | `"fan"`          | `QuarterFan` | Triangle fan      |
//! | `"indexed-grid"` | `Grid`       | Indexed triangles |
//! | `"grid"`         | `Grid`       | Triangle list     |
//!
//! The string-keyed API is lenient: unknown identifiers produce empty buffers
//! and draw nothing. Parsing a [`Model`] directly reports unknown identifiers
//! as a [`CatalogError`].
//!
//! # Examples
//!
//! ```rust
//! use trifill::catalog::Catalog;
//!
//! let catalog = Catalog::new();
//! assert_eq!(
//!     vec!["torus", "fan", "indexed-grid", "grid"],
//!     catalog.models().collect::<Vec<_>>()
//! );
//!
//! let raw = catalog.vertex_buffer("torus", 200, 200);
//! assert_eq!(228, raw.len());
//! assert!(catalog.vertex_buffer("fan", 200, 200).is_empty());
//! ```
//!
//! [`Catalog`]: crate::catalog::Catalog
//! [`CatalogError`]: crate::catalog::CatalogError
//! [`Model`]: crate::catalog::Model
//! [`Rasterizer`]: crate::render::Rasterizer

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, trace};

use crate::buffer::{BufferError, MeshBuffer};
use crate::geometry::{self, Extent, Vertex};
use crate::index::Flat3;
use crate::primitive::fan::QuarterFan;
use crate::primitive::generate::Generator;
use crate::primitive::grid::Grid;
use crate::primitive::strip::TorusStrip;
use crate::render::{DrawOptions, Primitive, Rasterizer, Surface};

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("unknown model `{0}`")]
    UnknownModel(String),
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Test geometry model.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Model {
    Torus,
    Fan,
    IndexedGrid,
    Grid,
}

impl Model {
    /// All models in the order in which they are listed by a [`Catalog`].
    ///
    /// [`Catalog`]: crate::catalog::Catalog
    pub const ALL: [Model; 4] = [Model::Torus, Model::Fan, Model::IndexedGrid, Model::Grid];

    pub fn id(self) -> &'static str {
        match self {
            Model::Torus => "torus",
            Model::Fan => "fan",
            Model::IndexedGrid => "indexed-grid",
            Model::Grid => "grid",
        }
    }

    pub fn primitive(self) -> Primitive {
        match self {
            Model::Torus => Primitive::TriangleStrip,
            Model::Fan => Primitive::TriangleFan,
            Model::IndexedGrid => Primitive::IndexedTriangles,
            Model::Grid => Primitive::Triangles,
        }
    }
}

impl Display for Model {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.id())
    }
}

impl FromStr for Model {
    type Err = CatalogError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        Model::ALL
            .into_iter()
            .find(|model| model.id() == id)
            .ok_or_else(|| CatalogError::UnknownModel(id.to_owned()))
    }
}

/// Generated test geometry.
///
/// Each variant holds the buffers of one [`Primitive`] kind.
///
/// [`Primitive`]: crate::render::Primitive
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    TriangleStrip(Vec<Vertex>),
    TriangleFan(Vec<Vertex>),
    IndexedTriangles(MeshBuffer<Flat3<u32>, Vertex>),
    Triangles(Vec<Vertex>),
}

impl Geometry {
    pub fn primitive(&self) -> Primitive {
        match *self {
            Geometry::TriangleStrip(_) => Primitive::TriangleStrip,
            Geometry::TriangleFan(_) => Primitive::TriangleFan,
            Geometry::IndexedTriangles(_) => Primitive::IndexedTriangles,
            Geometry::Triangles(_) => Primitive::Triangles,
        }
    }

    /// Gets the vertex buffer of the geometry.
    pub fn vertices(&self) -> &[Vertex] {
        match *self {
            Geometry::TriangleStrip(ref vertices)
            | Geometry::TriangleFan(ref vertices)
            | Geometry::Triangles(ref vertices) => vertices.as_slice(),
            Geometry::IndexedTriangles(ref buffer) => buffer.as_vertex_slice(),
        }
    }

    /// Gets the index buffer of the geometry, which is empty unless the
    /// geometry is indexed.
    pub fn indices(&self) -> &[u32] {
        match *self {
            Geometry::IndexedTriangles(ref buffer) => buffer.as_index_slice(),
            _ => &[],
        }
    }

    pub fn raw_vertex_buffer(&self) -> Vec<f64> {
        geometry::into_raw_buffer(self.vertices().iter().copied())
    }

    pub fn triangle_count(&self) -> usize {
        self.primitive()
            .triangle_count(self.vertices().len(), self.indices().len())
    }

    /// Fills the geometry on a surface.
    pub fn draw<S, R>(&self, rasterizer: &mut R, surface: &mut S, options: &DrawOptions)
    where
        S: Surface,
        R: Rasterizer<S>,
    {
        let vertices = self.raw_vertex_buffer();
        match *self {
            Geometry::TriangleStrip(_) => {
                rasterizer.fill_triangle_strip(&vertices, surface, options)
            }
            Geometry::TriangleFan(_) => rasterizer.fill_triangle_fan(&vertices, surface, options),
            Geometry::IndexedTriangles(ref buffer) => rasterizer.fill_indexed_triangles(
                &vertices,
                buffer.as_index_slice(),
                self.triangle_count(),
                surface,
                options,
            ),
            Geometry::Triangles(_) => rasterizer.fill_triangles(&vertices, surface, options),
        }
    }
}

/// Dispatcher over the test geometry models.
///
/// A `Catalog` holds the parameters of each generator and is immutable once
/// constructed. By default, the indexed grid has a resolution of $10 \times 5$
/// and the flattened grid a single cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    torus: TorusStrip,
    fan: QuarterFan,
    indexed_grid: Grid,
    grid: Grid,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog {
            torus: TorusStrip::default(),
            fan: QuarterFan::default(),
            indexed_grid: Grid::default(),
            grid: Grid::new(1, 1),
        }
    }

    pub fn with_torus(self, torus: TorusStrip) -> Self {
        Catalog { torus, ..self }
    }

    pub fn with_fan(self, fan: QuarterFan) -> Self {
        Catalog { fan, ..self }
    }

    pub fn with_indexed_grid(self, indexed_grid: Grid) -> Self {
        Catalog {
            indexed_grid,
            ..self
        }
    }

    pub fn with_grid(self, grid: Grid) -> Self {
        Catalog { grid, ..self }
    }

    /// Gets the identifiers of all models in registration order.
    pub fn models(&self) -> impl ExactSizeIterator<Item = &'static str> {
        Model::ALL.into_iter().map(Model::id)
    }

    /// Generates the geometry of a model placed in the given extent.
    ///
    /// # Errors
    ///
    /// Returns an error if the indexed geometry has more vertices than a `u32`
    /// index can address.
    pub fn generate(&self, model: Model, extent: Extent) -> Result<Geometry, CatalogError> {
        let geometry = match model {
            Model::Torus => Geometry::TriangleStrip(self.torus.vertices_from(extent).collect()),
            Model::Fan => Geometry::TriangleFan(self.fan.vertices_from(extent).collect()),
            Model::IndexedGrid => {
                Geometry::IndexedTriangles(self.indexed_grid.to_mesh_buffer::<u32>()?)
            }
            Model::Grid => {
                Geometry::Triangles(self.grid.to_mesh_buffer::<u32>()?.into_triangle_list())
            }
        };
        trace!(
            %model,
            vertices = geometry.vertices().len(),
            indices = geometry.indices().len(),
            "generated geometry"
        );
        Ok(geometry)
    }

    /// Gets the raw vertex buffer of a model sized for a surface.
    ///
    /// Only the `"torus"` model is queryable; any other identifier, including
    /// unknown identifiers, yields an empty buffer. Use [`generate`] to query
    /// any model.
    ///
    /// [`generate`]: crate::catalog::Catalog::generate
    pub fn vertex_buffer(&self, id: &str, width: u32, height: u32) -> Vec<f64> {
        match id.parse::<Model>() {
            Ok(Model::Torus) => {
                geometry::into_raw_buffer(self.torus.vertices_from(Extent::from((width, height))))
            }
            Ok(model) => {
                debug!(%model, "model has no queryable vertex buffer");
                Vec::new()
            }
            Err(error) => {
                debug!(%error, "no vertex buffer for model");
                Vec::new()
            }
        }
    }

    /// Generates a model sized for a surface and fills it with a rasterizer.
    ///
    /// Unknown identifiers are ignored and nothing is drawn.
    ///
    /// # Errors
    ///
    /// Returns an error if the geometry of the model cannot be generated. See
    /// [`generate`].
    ///
    /// [`generate`]: crate::catalog::Catalog::generate
    pub fn draw<S, R>(
        &self,
        id: &str,
        rasterizer: &mut R,
        surface: &mut S,
        options: &DrawOptions,
    ) -> Result<(), CatalogError>
    where
        S: Surface,
        R: Rasterizer<S>,
    {
        let model = match id.parse::<Model>() {
            Ok(model) => model,
            Err(error) => {
                debug!(%error, "skipping draw");
                return Ok(());
            }
        };
        debug!(%model, width = surface.width(), height = surface.height(), "drawing model");
        self.generate(model, surface.extent())?
            .draw(rasterizer, surface, options);
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::{Catalog, CatalogError, Model};
    use crate::color::Rgb;
    use crate::geometry::Extent;
    use crate::primitive::grid::Grid;
    use crate::render::{DrawOptions, Rasterizer, Surface};

    struct Canvas {
        width: u32,
        height: u32,
    }

    impl Surface for Canvas {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }
    }

    #[derive(Debug, PartialEq)]
    enum Fill {
        Strip(Vec<f64>),
        Fan(Vec<f64>),
        Indexed(Vec<f64>, Vec<u32>, usize),
        Triangles(Vec<f64>),
    }

    #[derive(Default)]
    struct Recorder {
        fills: Vec<(Fill, DrawOptions)>,
    }

    impl Rasterizer<Canvas> for Recorder {
        fn fill_triangle_strip(&mut self, vertices: &[f64], _: &mut Canvas, options: &DrawOptions) {
            self.fills.push((Fill::Strip(vertices.to_vec()), *options));
        }

        fn fill_triangle_fan(&mut self, vertices: &[f64], _: &mut Canvas, options: &DrawOptions) {
            self.fills.push((Fill::Fan(vertices.to_vec()), *options));
        }

        fn fill_indexed_triangles(
            &mut self,
            vertices: &[f64],
            indices: &[u32],
            triangle_count: usize,
            _: &mut Canvas,
            options: &DrawOptions,
        ) {
            self.fills.push((
                Fill::Indexed(vertices.to_vec(), indices.to_vec(), triangle_count),
                *options,
            ));
        }

        fn fill_triangles(&mut self, vertices: &[f64], _: &mut Canvas, options: &DrawOptions) {
            self.fills.push((Fill::Triangles(vertices.to_vec()), *options));
        }
    }

    fn canvas() -> Canvas {
        Canvas {
            width: 200,
            height: 200,
        }
    }

    #[test]
    fn list_models_in_order() {
        assert_eq!(
            vec!["torus", "fan", "indexed-grid", "grid"],
            Catalog::new().models().collect::<Vec<_>>()
        );
    }

    #[test]
    fn parse_model_ids() {
        for model in Model::ALL {
            assert_eq!(Ok(model), model.to_string().parse::<Model>());
        }
        assert_eq!(
            Err(CatalogError::UnknownModel("sphere".to_owned())),
            "sphere".parse::<Model>()
        );
        assert!("Torus".parse::<Model>().is_err());
    }

    #[test]
    fn query_torus_vertex_buffer() {
        let raw = Catalog::new().vertex_buffer("torus", 200, 200);

        assert_eq!(228, raw.len());
        assert_eq!(&[140.0, 100.0, 0.0], &raw[..3]);
    }

    #[test]
    fn query_other_vertex_buffers() {
        let catalog = Catalog::new();

        assert!(catalog.vertex_buffer("fan", 200, 200).is_empty());
        assert!(catalog.vertex_buffer("indexed-grid", 200, 200).is_empty());
        assert!(catalog.vertex_buffer("grid", 200, 200).is_empty());
        assert!(catalog.vertex_buffer("unknown", 200, 200).is_empty());
    }

    #[test]
    fn generate_every_model() {
        let catalog = Catalog::new();
        for model in Model::ALL {
            let geometry = catalog
                .generate(model, Extent::new(200.0, 200.0))
                .unwrap();

            assert_eq!(model.primitive(), geometry.primitive());
        }
    }

    #[test]
    fn generate_grids() {
        let catalog = Catalog::new();
        let extent = Extent::new(200.0, 200.0);
        let indexed = catalog.generate(Model::IndexedGrid, extent).unwrap();
        let flat = catalog.generate(Model::Grid, extent).unwrap();

        assert_eq!(66, indexed.vertices().len());
        assert_eq!(300, indexed.indices().len());
        assert_eq!(100, indexed.triangle_count());
        assert_eq!(6, flat.vertices().len());
        assert_eq!(36, flat.raw_vertex_buffer().len());
        assert_eq!(2, flat.triangle_count());
        assert!(flat.indices().is_empty());
    }

    #[test]
    fn count_trigons_of_each_model() {
        let catalog = Catalog::new();
        let extent = Extent::new(200.0, 200.0);
        let counts: Vec<_> = Model::ALL
            .into_iter()
            .map(|model| {
                let geometry = catalog.generate(model, extent).unwrap();
                let raw = geometry.raw_vertex_buffer();
                assert_eq!(
                    geometry.triangle_count(),
                    geometry
                        .primitive()
                        .raw_triangle_count(&raw, geometry.indices())
                );
                geometry.triangle_count()
            })
            .collect();

        assert_eq!(vec![36, 5, 100, 2], counts);
    }

    #[test]
    fn draw_unknown_model() {
        let mut rasterizer = Recorder::default();

        assert_eq!(
            Ok(()),
            Catalog::new().draw(
                "unknown",
                &mut rasterizer,
                &mut canvas(),
                &DrawOptions::default()
            )
        );
        assert!(rasterizer.fills.is_empty());
    }

    #[test]
    fn draw_with_matching_primitive() {
        let catalog = Catalog::new();
        let mut rasterizer = Recorder::default();
        let options = DrawOptions::with_border(Rgb::WHITE);
        for id in catalog.models() {
            catalog
                .draw(id, &mut rasterizer, &mut canvas(), &options)
                .unwrap();
        }

        assert_eq!(4, rasterizer.fills.len());
        assert!(rasterizer.fills.iter().all(|(_, used)| *used == options));
        match &rasterizer.fills[0].0 {
            Fill::Strip(vertices) => {
                assert_eq!(228, vertices.len());
                assert_eq!(&[140.0, 100.0, 0.0], &vertices[..3]);
            }
            fill => panic!("unexpected fill: {:?}", fill),
        }
        match &rasterizer.fills[1].0 {
            Fill::Fan(vertices) => {
                assert_eq!(42, vertices.len());
                assert_eq!(&[10.0, 190.0, 0.0, 255.0, 0.0, 0.0], &vertices[..6]);
            }
            fill => panic!("unexpected fill: {:?}", fill),
        }
        match &rasterizer.fills[2].0 {
            Fill::Indexed(vertices, indices, triangle_count) => {
                assert_eq!(66 * 6, vertices.len());
                assert_eq!(300, indices.len());
                assert_eq!(100, *triangle_count);
            }
            fill => panic!("unexpected fill: {:?}", fill),
        }
        match &rasterizer.fills[3].0 {
            Fill::Triangles(vertices) => assert_eq!(36, vertices.len()),
            fill => panic!("unexpected fill: {:?}", fill),
        }
    }

    #[test]
    fn draw_with_configured_generators() {
        let catalog = Catalog::new().with_grid(Grid::new(2, 3));
        let mut rasterizer = Recorder::default();
        catalog
            .draw("grid", &mut rasterizer, &mut canvas(), &DrawOptions::default())
            .unwrap();
        let expected = catalog
            .generate(Model::Grid, Extent::default())
            .unwrap()
            .raw_vertex_buffer();

        // Two trigons of three vertices for each of six cells.
        assert_eq!(2 * 3 * 6 * 6, expected.len());
        assert_eq!(
            vec![(Fill::Triangles(expected), DrawOptions::default())],
            rasterizer.fills
        );
    }

    #[test]
    fn share_catalog_between_threads() {
        fn is_send_sync<T: Send + Sync>() {}

        is_send_sync::<Catalog>();
    }
}

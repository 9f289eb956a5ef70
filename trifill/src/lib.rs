//! **Trifill** generates procedural test geometry for triangle rasterizers.
//!
//! The crate emits small, deterministic meshes that exercise the fill paths of
//! a rasterizer: a ring of trigons as a triangle strip, a quarter circle as a
//! triangle fan, and a bilinearly colored grid as both indexed triangles and a
//! flattened triangle list. The [`catalog`] module dispatches model
//! identifiers to these generators and drives a [`Rasterizer`].
//!
//! Please note that versions in the `0.0.*` series are experimental and
//! unstable! Use exact version constraints when specifying a dependency to
//! avoid spurious breakage.
//!
//! # Examples
//!
//! Generating the vertices of a triangle strip and decomposing them into
//! trigons:
//!
//! ```rust
//! use trifill::geometry::Extent;
//! use trifill::prelude::*;
//! use trifill::primitive::strip::TorusStrip;
//!
//! let trigons: Vec<_> = TorusStrip::default()
//!     .vertices_from(Extent::new(200.0, 200.0))
//!     .triangle_strip()
//!     .collect();
//! assert_eq!(36, trigons.len());
//! ```
//!
//! [`catalog`]: crate::catalog
//! [`Rasterizer`]: crate::render::Rasterizer
#![allow(unknown_lints)] // Allow clippy lints.

use std::fmt::Debug;

pub mod buffer;
pub mod catalog;
pub mod color;
pub mod geometry;
pub mod index;
pub mod primitive;
pub mod render;

pub mod prelude {
    //! Re-exports commonly used types and traits.
    //!
    //! Importing the contents of this module is recommended when working with
    //! generators and iterator expressions, as those operations are expressed
    //! mostly through traits.
    //!
    //! Traits from the `primitive` module for generating and decomposing
    //! iterators over topological data are re-exported so that functions in
    //! iterator expressions can be used without lengthy imports. Basic traits
    //! for constructing and re-indexing `MeshBuffer`s are also re-exported.

    pub use crate::geometry::{FromGeometry as _, IntoGeometry as _};
    pub use crate::index::{CollectWithIndexer as _, IndexVertices as _};
    pub use crate::primitive::decompose::{
        IntoVertices as _, TriangleFan as _, TriangleStrip as _, Vertices as _,
    };
    pub use crate::primitive::generate::Generator as _;
    pub use crate::primitive::{IntoPolygons as _, Map as _, Rotate as _, Topological as _};
    pub use crate::FromRawBuffers as _;
}

pub trait FromRawBuffers<N, G>: Sized {
    type Error: Debug;

    fn from_raw_buffers<I, J>(indices: I, vertices: J) -> Result<Self, Self::Error>
    where
        I: IntoIterator<Item = N>,
        J: IntoIterator<Item = G>;
}

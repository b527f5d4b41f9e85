//! Editable vector shape primitives with cached tessellation.
//!
//! Shapes (circles, arcs and points) keep their parametric form, answer hit-testing queries,
//! tessellate lazily into triangle meshes, project themselves onto circular colliders and export
//! as SVG.

#[macro_use]
extern crate failure_derive;
#[macro_use]
extern crate log;

pub mod collider;
pub mod data;
pub mod export;
pub mod render;
pub mod shape;

pub use crate::collider::{ColliderHost, ColliderSet};
pub use crate::export::{write_svg_document, MarkupWriter, SvgWriter};
pub use crate::render::{PathTessellator, TessellationOptions, Tessellator};
pub use crate::shape::{CircleShape, PointShape, Shape, ShapeStyle};

//! Tessellation.

mod mesh;
pub mod stroke_tess;
mod tessellator;

pub use self::mesh::*;
pub use self::tessellator::*;

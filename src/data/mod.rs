//! Data types and definitions.

pub mod cgmath_ext;
mod color;
mod path;
mod rect;
mod scene;

pub use self::color::*;
pub use self::path::*;
pub use self::rect::*;
pub use self::scene::*;

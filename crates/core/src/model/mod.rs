//! Parsed model types - contours, objects, and the image stack.
//!
//! - `contour` - one traced boundary or point set (Contour)
//! - `object` - a named IMOD object and its type (ImodObject, ObjectType)
//! - `stack` - per-image object lists for a whole log (Stack, StackImage)

pub mod contour;
pub mod object;
pub mod stack;

// Re-export main types for convenience
pub use contour::Contour;
pub use object::{ImodObject, ObjectType};
pub use stack::{Stack, StackImage};

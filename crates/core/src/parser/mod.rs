//! Area log parsing modules.
//!
//! - `splitter`: groups log lines by image on a boundary phrase
//! - `segment`: splits one image into object blocks
//! - `object`: parses one object block into an `ImodObject`
//! - `fields`: token locating and value extraction for single lines
//! - `stack`: parses all images into a `Stack`

pub mod fields;
pub mod object;
pub mod segment;
pub mod splitter;
pub mod stack;

// Re-export main types for convenience
pub use object::{ObjectLocation, parse_object};
pub use segment::{object_blocks, parse_segment};
pub use splitter::{DEFAULT_BOUNDARY, ImageSegment, LogLine, LogSplitter, split_log};
pub use stack::parse_stack;

//! goldarea - immunogold density from IMOD area logs.
//!
//! Parses the `imodinfo` output collected by `areas.com` for a stack of
//! micrographs, sums structure areas and gold particle counts per image,
//! and reports gold particles per unit area.

pub mod api;
pub mod converter;
pub mod density;
pub mod error;
pub mod model;
pub mod parser;

pub use api::high_level;

pub use error::{GoldAreaError, Result, Stage};

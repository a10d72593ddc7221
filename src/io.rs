//!
//! Model serialization and training-data files
//!
pub mod graphml;
pub mod json;
pub mod text;

//! Wrapper to perform file system operations
//!

mod file;
pub use file::*;

mod path;
pub use path::*;

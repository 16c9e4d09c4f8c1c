//! # fileset
//! A small file-collection layer: resolve path patterns, glob expressions
//! and in-memory buffers into an ordered list of [`Resource`]s that lazily
//! load their content and know where they came from and where they should
//! be written.
//!
//! # fileset as a library
//! The primary entry point is [`resolve`] (or [`Resolver::run`] with an
//! explicit [`Config`]). The resolved resources expose their content through
//! [`Resource::content`] and can be materialized with [`Resource::save`] or
//! the helpers in [`fs`].
//!
//! ```no_run
//! use fileset::resolve;
//!
//! let resources = resolve(vec!["src/**/*.txt", "assets/*.css"]).unwrap();
//! for res in resources {
//!     println!("{:?} -> {:?}", res.origin(), res.dest());
//! }
//! ```

mod core;
pub use crate::core::{
    normalize, resolve, resolve_read, Config, Input, Item, Merge, NormalizedInput, ResolveError,
    ResolveOptions, Resolver, Resource, ResourceData, Verbosity,
};
pub mod error;
pub mod fs;

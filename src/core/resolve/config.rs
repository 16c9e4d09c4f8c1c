use crate::core::Merge;
use std::path::PathBuf;

/// Config for running resolution
///
/// Use this to configure resolution when calling it from the library
/// # Example
/// ```no_run
/// use fileset::{Resolver, Config, Verbosity};
///
/// // Use the default config
/// let mut cfg = Config::default();
/// // Change verbosity to verbose
/// cfg.verbosity = Verbosity::Verbose;
/// let resources = Resolver::run(vec!["*.txt"], cfg).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory patterns are expanded against when the input options
    /// carry no `cwd`. This is usually the current directory.
    pub base_dir: PathBuf,
    /// The number of threads to use
    pub num_threads: usize,
    /// The verbosity. See [`Verbosity`]
    pub verbosity: Verbosity,
    /// Baseline options merged under the input's own options
    pub options: ResolveOptions,
}

impl Default for Config {
    /// Get the default config.
    ///
    /// This means:
    /// - Expanding patterns against the current directory
    /// - Using 4 threads
    /// - Regular verbosity
    /// - No baseline options
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            num_threads: 4,
            verbosity: Verbosity::Normal,
            options: ResolveOptions::default(),
        }
    }
}

/// The verbosity config options
#[derive(Debug, PartialEq, Clone)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

/// Options carried through resolution into each resource.
///
/// Merging is shallow and later-wins (see [`Merge`]); each resolved
/// resource receives its own copy of the merged value, so no resource ever
/// mutates options shared with another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Working directory patterns are expanded against
    pub cwd: Option<PathBuf>,
    /// Destination path prefix applied to each resolved resource
    pub prefix: Option<String>,
}

impl Merge for ResolveOptions {
    fn merge(&mut self, src: Option<&Self>) {
        let src = match src {
            Some(src) => src,
            None => return,
        };
        if src.cwd.is_some() {
            self.cwd = src.cwd.clone();
        }
        if src.prefix.is_some() {
            self.prefix = src.prefix.clone();
        }
    }
}

#[cfg(test)]
mod ut {
    use super::*;

    #[test]
    fn test_merge_later_wins() {
        let mut options = ResolveOptions {
            cwd: Some(PathBuf::from("/a")),
            prefix: Some("one".to_string()),
        };
        let over = ResolveOptions {
            prefix: Some("two".to_string()),
            ..Default::default()
        };
        options.merge(Some(&over));
        assert_eq!(options.cwd, Some(PathBuf::from("/a")));
        assert_eq!(options.prefix, Some("two".to_string()));
    }

    #[test]
    fn test_merge_none_skipped() {
        let mut options = ResolveOptions {
            prefix: Some("keep".to_string()),
            ..Default::default()
        };
        options.merge(None);
        assert_eq!(options.prefix, Some("keep".to_string()));
    }
}

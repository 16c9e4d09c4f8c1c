//! Input normalization
//!
//! Callers hand resolution anything from a single path string to a full
//! options-bearing structure. Everything is classified into one [`Input`]
//! variant at the call boundary and collapsed into a canonical
//! [`NormalizedInput`] before any I/O happens.

use super::ResolveOptions;

/// One element of a pattern list: a path pattern to expand against the
/// filesystem, or a raw buffer that becomes a content-only resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Pattern(String),
    Content(Vec<u8>),
}

/// The accepted input shapes for resolution.
///
/// This is the explicit sum over the shapes the resolver accepts, decided
/// at the call boundary instead of probed at runtime:
/// - [`Pattern`](Self::Pattern)/[`Content`](Self::Content): a single
///   scalar, wrapped into a one-element list
/// - [`List`](Self::List): a sequence used as the item list directly
/// - [`WithOptions`](Self::WithOptions): an item list with options riding
///   along (the options survive into resolution, the list becomes the
///   patterns)
/// - [`Normalized`](Self::Normalized): an already-normalized value, passed
///   through untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Pattern(String),
    Content(Vec<u8>),
    List(Vec<Item>),
    WithOptions {
        src: Vec<Item>,
        options: ResolveOptions,
    },
    Normalized(NormalizedInput),
}

impl Input {
    /// An item list with options attached.
    pub fn with_options<I>(src: Vec<I>, options: ResolveOptions) -> Self
    where
        I: Into<Item>,
    {
        Self::WithOptions {
            src: src.into_iter().map(Into::into).collect(),
            options,
        }
    }

    /// A single item with options attached, wrapped into a one-element list.
    pub fn one_with_options<I>(src: I, options: ResolveOptions) -> Self
    where
        I: Into<Item>,
    {
        Self::WithOptions {
            src: vec![src.into()],
            options,
        }
    }
}

/// Canonical resolution input: an ordered item list plus options.
///
/// Transient: exists only for the duration of a resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedInput {
    pub items: Vec<Item>,
    pub options: ResolveOptions,
}

/// Collapse any accepted input shape into a [`NormalizedInput`].
///
/// Pure and deterministic: no I/O, and normalizing an already-normalized
/// value is a pass-through.
pub fn normalize(input: Input) -> NormalizedInput {
    match input {
        Input::List(items) => NormalizedInput {
            items,
            options: ResolveOptions::default(),
        },
        Input::Normalized(normalized) => normalized,
        Input::WithOptions { src, options } => NormalizedInput {
            items: src,
            options,
        },
        Input::Pattern(pattern) => NormalizedInput {
            items: vec![Item::Pattern(pattern)],
            options: ResolveOptions::default(),
        },
        Input::Content(content) => NormalizedInput {
            items: vec![Item::Content(content)],
            options: ResolveOptions::default(),
        },
    }
}

impl From<&str> for Item {
    fn from(p: &str) -> Self {
        Self::Pattern(p.to_string())
    }
}

impl From<String> for Item {
    fn from(p: String) -> Self {
        Self::Pattern(p)
    }
}

impl From<Vec<u8>> for Item {
    fn from(content: Vec<u8>) -> Self {
        Self::Content(content)
    }
}

impl From<&str> for Input {
    fn from(p: &str) -> Self {
        Self::Pattern(p.to_string())
    }
}

impl From<String> for Input {
    fn from(p: String) -> Self {
        Self::Pattern(p)
    }
}

impl From<Vec<u8>> for Input {
    fn from(content: Vec<u8>) -> Self {
        Self::Content(content)
    }
}

impl From<Vec<Item>> for Input {
    fn from(items: Vec<Item>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for Input {
    fn from(patterns: Vec<&str>) -> Self {
        Self::List(patterns.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for Input {
    fn from(patterns: Vec<String>) -> Self {
        Self::List(patterns.into_iter().map(Into::into).collect())
    }
}

impl From<NormalizedInput> for Input {
    fn from(normalized: NormalizedInput) -> Self {
        Self::Normalized(normalized)
    }
}

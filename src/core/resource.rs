use crate::core::Merge;
use crate::error::{ResourceError, ResourceErrorKind};
use error_stack::{Report, Result, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};

/// A logical file gathered by resolution.
///
/// A resource knows where its content comes from ([`origin`](Self::origin))
/// and where it should be written under an output root
/// ([`dest`](Self::dest)). The content itself is loaded from the origin on
/// first access and cached; a resource created directly from an in-memory
/// buffer has no filesystem identity and must carry its content eagerly.
#[derive(Debug)]
pub struct Resource {
    /// Base directory the relative path resolves against
    working_dir: Option<PathBuf>,
    /// Path of the file relative to `working_dir`. `None` for buffer resources.
    relative_path: Option<PathBuf>,
    /// Path segment prepended to `relative_path` when computing `dest`
    prefix: String,
    /// Cached content. `None` until loaded or assigned.
    content: Option<String>,
}

/// Construction data for a [`Resource`], also used as the override set
/// for [`Resource::copy_with`].
///
/// Unset fields fall back to defaults on construction and leave the copied
/// value untouched on override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceData {
    pub working_dir: Option<PathBuf>,
    pub relative_path: Option<PathBuf>,
    pub prefix: Option<String>,
    pub content: Option<String>,
}

impl Merge for ResourceData {
    fn merge(&mut self, src: Option<&Self>) {
        let src = match src {
            Some(src) => src,
            None => return,
        };
        if src.working_dir.is_some() {
            self.working_dir = src.working_dir.clone();
        }
        if src.relative_path.is_some() {
            self.relative_path = src.relative_path.clone();
        }
        if src.prefix.is_some() {
            self.prefix = src.prefix.clone();
        }
        if src.content.is_some() {
            self.content = src.content.clone();
        }
    }
}

impl Resource {
    pub fn new(data: ResourceData) -> Self {
        Self {
            working_dir: data.working_dir,
            relative_path: data.relative_path,
            prefix: data.prefix.unwrap_or_default(),
            content: data.content,
        }
    }

    /// Create a resource from literal content, with no filesystem identity.
    pub fn from_content<S>(content: S) -> Self
    where
        S: Into<String>,
    {
        Self::new(ResourceData {
            content: Some(content.into()),
            ..Default::default()
        })
    }

    #[inline]
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    #[inline]
    pub fn relative_path(&self) -> Option<&Path> {
        self.relative_path.as_deref()
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether the content has been loaded or assigned yet.
    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.content.is_some()
    }

    /// The path the content is read from.
    ///
    /// `None` for resources created from literal content.
    pub fn origin(&self) -> Option<PathBuf> {
        self.relative_path.as_ref().map(|rel| match &self.working_dir {
            Some(wd) => wd.join(rel),
            None => rel.clone(),
        })
    }

    /// The relative path the content should be written to under an output
    /// root. The prefix is prepended only when it is non-empty.
    ///
    /// `None` for resources created from literal content.
    pub fn dest(&self) -> Option<PathBuf> {
        self.relative_path.as_ref().map(|rel| {
            if self.prefix.is_empty() {
                rel.clone()
            } else {
                Path::new(&self.prefix).join(rel)
            }
        })
    }

    /// Get the content, loading it from [`origin`](Self::origin) on first
    /// access.
    ///
    /// The load happens exactly once: the value is cached and subsequent
    /// calls never touch the filesystem again. Taking `&mut self` makes the
    /// one-shot transition impossible to re-enter concurrently.
    pub fn content(&mut self) -> Result<&str, ResourceError> {
        self.ensure_loaded()
    }

    /// Assign the content directly, replacing any cached value.
    ///
    /// A resource whose content was assigned never loads from the origin.
    pub fn set_content<S>(&mut self, content: S)
    where
        S: Into<String>,
    {
        self.content = Some(content.into());
    }

    /// Make a copy of this resource with some fields overridden.
    ///
    /// The current content is materialized first (forcing the lazy load if
    /// needed, which also caches it here), then copied into the new
    /// resource, then the overrides are applied on top. The copy is fully
    /// independent: mutating it never affects this resource.
    pub fn copy_with(&mut self, overrides: ResourceData) -> Result<Resource, ResourceError> {
        self.ensure_loaded()?;
        let mut data = ResourceData {
            working_dir: self.working_dir.clone(),
            relative_path: self.relative_path.clone(),
            prefix: Some(self.prefix.clone()),
            content: self.content.clone(),
        };
        data.merge(Some(&overrides));
        Ok(Resource::new(data))
    }

    /// Save the content under the given output root, at
    /// [`dest`](Self::dest). Parent directories are created as needed and
    /// an existing file is overwritten.
    ///
    /// When `dest_root` is `None`, the process current directory is used.
    pub fn save(&mut self, dest_root: Option<&Path>) -> Result<(), ResourceError> {
        let dest = self.dest().ok_or_else(|| {
            Report::new(self.make_error(ResourceErrorKind::NoDestination))
                .attach_printable("resource was created from literal content")
        })?;
        let full_dest = match dest_root {
            Some(root) => root.join(&dest),
            None => std::env::current_dir()
                .change_context_lazy(|| self.make_error(ResourceErrorKind::WriteContent))
                .attach_printable("cannot get current directory")?
                .join(&dest),
        };
        self.ensure_loaded()?;
        let content = self.content.as_deref().unwrap_or_default();
        log::debug!("saving resource to {}", full_dest.display());
        crate::fs::save_file(&full_dest, content)
            .change_context_lazy(|| {
                ResourceError::new(
                    ResourceErrorKind::WriteContent,
                    full_dest.display().to_string(),
                )
            })
            .attach_printable_lazy(|| {
                format!("could not save resource to `{}`", full_dest.display())
            })
    }

    /// One-shot load transition. No-op once content is present.
    fn ensure_loaded(&mut self) -> Result<&str, ResourceError> {
        if self.content.is_none() {
            let origin = self.origin().ok_or_else(|| {
                Report::new(self.make_error(ResourceErrorKind::NoContent))
                    .attach_printable("content must be supplied eagerly for buffer resources")
            })?;
            log::debug!("loading resource content from {}", origin.display());
            let content = fs::read_to_string(&origin)
                .change_context_lazy(|| {
                    ResourceError::new(ResourceErrorKind::ReadContent, origin.display().to_string())
                })
                .attach_printable_lazy(|| {
                    format!("could not read origin file: `{}`", origin.display())
                })?;
            self.content = Some(content);
        }
        Ok(self.content.as_deref().unwrap_or_default())
    }

    fn make_error(&self, kind: ResourceErrorKind) -> ResourceError {
        let path = self
            .origin()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string());
        ResourceError::new(kind, path)
    }
}

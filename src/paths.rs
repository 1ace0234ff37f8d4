//! Expansion of include/exclude glob patterns into the set of template paths
//! to materialize.

use crate::error::{Error, Result};
use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const GLOB_META: [char; 5] = ['*', '?', '[', '{', '!'];

/// Compiled include and exclude patterns rooted at a template stem.
///
/// A path is selected when it matches an include pattern and no exclude
/// pattern, whatever order the patterns were declared in.
#[derive(Debug)]
pub struct PathPatterns {
    includes: GlobSet,
    /// Include patterns whose final segment is literal. A directory matching
    /// one of them is selected whole.
    units: GlobSet,
    excludes: GlobSet,
}

/// Strips a leading `./`, leading and trailing slashes and surrounding
/// whitespace from a stem-relative pattern or name.
pub(crate) fn normalize(pattern: &str) -> &str {
    let pattern = pattern.trim();
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    pattern.trim_start_matches('/').trim_end_matches('/')
}

fn compile(pattern: &str) -> Result<Glob> {
    GlobBuilder::new(normalize(pattern))
        .literal_separator(true)
        .build()
        .map_err(Error::GlobError)
}

fn is_unit_pattern(pattern: &str) -> bool {
    let last = normalize(pattern).rsplit('/').next().unwrap_or_default();
    !last.is_empty() && !last.contains(GLOB_META)
}

impl PathPatterns {
    pub fn new<S: AsRef<str>>(includes: &[S], excludes: &[S]) -> Result<Self> {
        let mut include_builder = GlobSetBuilder::new();
        let mut unit_builder = GlobSetBuilder::new();
        for pattern in includes.iter().map(AsRef::as_ref) {
            if normalize(pattern).is_empty() {
                continue;
            }
            let glob = compile(pattern)?;
            if is_unit_pattern(pattern) {
                unit_builder.add(glob.clone());
            }
            include_builder.add(glob);
        }

        let mut exclude_builder = GlobSetBuilder::new();
        for pattern in excludes.iter().map(AsRef::as_ref) {
            if normalize(pattern).is_empty() {
                continue;
            }
            exclude_builder.add(compile(pattern)?);
        }

        Ok(Self {
            includes: include_builder.build()?,
            units: unit_builder.build()?,
            excludes: exclude_builder.build()?,
        })
    }

    /// Whether a stem-relative, `/`-separated file path is selected.
    pub fn is_selected(&self, relative: &str) -> bool {
        self.includes.is_match(relative) && !self.excludes.is_match(relative)
    }

    pub fn is_excluded(&self, relative: &str) -> bool {
        self.excludes.is_match(relative)
    }

    /// Whether a directory is selected as a unit.
    pub fn is_unit(&self, relative: &str) -> bool {
        self.units.is_match(relative) && !self.excludes.is_match(relative)
    }
}

/// Stem-relative path with `/` separators, the form patterns are matched against.
pub fn relative_key(stem: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(stem)
        .map_err(|e| Error::ConfigError(format!("{}: {e}", path.display())))?;
    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

/// Walks the stem and returns the selected paths in file-name order.
///
/// Symlinks are followed and hidden entries are visited. Directories matching
/// an exclude pattern are not descended into; directories selected as units
/// are returned once and not descended into either.
pub fn resolve_paths<P: AsRef<Path>>(stem: P, patterns: &PathPatterns) -> Result<Vec<PathBuf>> {
    let stem = stem.as_ref();
    let mut selected = Vec::new();
    let mut walker =
        WalkDir::new(stem).follow_links(true).min_depth(1).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry?;
        let relative = relative_key(stem, entry.path())?;
        let is_dir = entry.file_type().is_dir();

        if patterns.is_excluded(&relative) {
            debug!("Excluding {relative}");
            if is_dir {
                walker.skip_current_dir();
            }
            continue;
        }

        if is_dir {
            if patterns.is_unit(&relative) {
                debug!("Selecting directory {relative}");
                selected.push(entry.into_path());
                walker.skip_current_dir();
            }
        } else if patterns.is_selected(&relative) {
            debug!("Selecting file {relative}");
            selected.push(entry.into_path());
        }
    }

    Ok(selected)
}

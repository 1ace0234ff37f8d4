//! Template loading for bolt-init.
//! Locates the init configuration directory and the template package (the
//! stem) whose files are materialized.
use crate::config::BaseInfo;
use crate::constants::LOCAL_PACKAGES_DIR;
use crate::error::{Error, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// Represents the source location of a template stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// The configuration directory is itself the stem.
    FileSystem(PathBuf),
    /// A named package, looked up in the global installation directory first
    /// and in the local packages directory second.
    Package { module: String, global: PathBuf, local: PathBuf },
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::FileSystem(path) => {
                write!(f, "local path: '{}'", path.display())
            }
            TemplateSource::Package { module, .. } => write!(f, "package: '{module}'"),
        }
    }
}

impl TemplateSource {
    /// Chooses the source for a configuration directory and its base info.
    ///
    /// `global_dir` overrides the global installation directory, which
    /// defaults to the parent of the configuration directory.
    pub fn new(template_dir: &Path, base: &BaseInfo, global_dir: Option<&Path>) -> Result<Self> {
        let Some(module) = &base.module else {
            return Ok(Self::FileSystem(template_dir.to_path_buf()));
        };
        let global_root = match global_dir {
            Some(dir) => dir.to_path_buf(),
            None => {
                let absolute = template_dir.canonicalize()?;
                absolute.parent().map(Path::to_path_buf).unwrap_or(absolute)
            }
        };
        Ok(Self::Package {
            module: module.clone(),
            global: global_root.join(module),
            local: template_dir.join(LOCAL_PACKAGES_DIR).join(module),
        })
    }
}

/// Trait for loading templates from different sources.
pub trait TemplateLoader {
    /// Returns the path of the loaded template.
    fn load(&self) -> Result<PathBuf>;
}

/// Loader for templates from the local filesystem.
pub struct LocalLoader<P: AsRef<Path>> {
    path: P,
}

impl<P: AsRef<Path>> LocalLoader<P> {
    pub fn new(path: P) -> Self {
        Self { path }
    }
}

impl<P: AsRef<Path>> TemplateLoader for LocalLoader<P> {
    /// # Errors
    /// * `Error::TemplateDoesNotExistError` if the path is not a directory
    fn load(&self) -> Result<PathBuf> {
        let path = self.path.as_ref();
        if !path.is_dir() {
            return Err(Error::TemplateDoesNotExistError {
                template: path.display().to_string(),
            });
        }
        Ok(path.to_path_buf())
    }
}

/// Loader for named template packages.
pub struct PackageLoader<'a> {
    module: &'a str,
    candidates: [&'a Path; 2],
}

impl<'a> PackageLoader<'a> {
    pub fn new(module: &'a str, global: &'a Path, local: &'a Path) -> Self {
        Self { module, candidates: [global, local] }
    }
}

impl TemplateLoader for PackageLoader<'_> {
    fn load(&self) -> Result<PathBuf> {
        for candidate in self.candidates {
            debug!("Looking for '{}' in '{}'", self.module, candidate.display());
            if candidate.is_dir() {
                return Ok(candidate.to_path_buf());
            }
        }
        Err(Error::TemplateDoesNotExistError { template: self.module.to_string() })
    }
}

/// Returns the stem directory for the given source.
pub fn load_template(source: &TemplateSource) -> Result<PathBuf> {
    let loader: Box<dyn TemplateLoader + '_> = match source {
        TemplateSource::FileSystem(path) => Box::new(LocalLoader::new(path)),
        TemplateSource::Package { module, global, local } => {
            Box::new(PackageLoader::new(module, global, local))
        }
    };
    loader.load()
}

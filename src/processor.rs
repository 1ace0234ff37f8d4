//! Materialization of a resolved template path set into the output tree.
//! Copies every selected path, runs file contents through the marker
//! transformer, and maps renamed and promoted files to their final names
//! before anything is written.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::{
    args::ResolvedArgs,
    config::{BaseInfo, BoltConfig},
    error::{Error, Result},
    features::{resolve_features, FeatureSet},
    markers::MarkerTransformer,
    paths::{normalize, relative_key, resolve_paths, PathPatterns},
    renderer::{render_name, MiniJinjaRenderer, TemplateRenderer},
};

/// What happened to a materialized path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Written with the template's bytes.
    Copied,
    /// Written with marker-processed content.
    Transformed,
    /// The destination already held the final content.
    Unchanged,
    /// A directory unit copied verbatim.
    Directory,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileAction::Copied => "Copying",
            FileAction::Transformed => "Updating changed",
            FileAction::Unchanged => "Unchanged",
            FileAction::Directory => "Copying directory",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    pub source: PathBuf,
    pub target: PathBuf,
    pub action: FileAction,
    /// Files written, including those inside a directory unit.
    pub writes: usize,
}

/// Outcome of a materialization run.
#[derive(Debug, Default)]
pub struct MaterializeReport {
    pub entries: Vec<ProcessResult>,
    pub renames: Vec<(PathBuf, PathBuf)>,
    pub identity: Option<PathBuf>,
}

impl MaterializeReport {
    /// Total number of files written.
    pub fn writes(&self) -> usize {
        self.entries.iter().map(|entry| entry.writes).sum()
    }

    /// Files rewritten by the marker transformer.
    pub fn transformed(&self) -> impl Iterator<Item = &ProcessResult> + '_ {
        self.entries.iter().filter(|entry| entry.action == FileAction::Transformed)
    }
}

/// Removes the destination if it exists and recreates it empty.
///
/// Callers confirm with the user first; nothing is kept.
pub fn reset_destination<P: AsRef<Path>>(output_root: P) -> Result<()> {
    let output_root = output_root.as_ref();
    if output_root.exists() {
        debug!("Removing '{}'", output_root.display());
        fs::remove_dir_all(output_root)?;
    }
    fs::create_dir_all(output_root)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn same_content(target: &Path, content: &[u8]) -> bool {
    fs::read(target).map(|existing| existing == content).unwrap_or(false)
}

/// Copies a file unless the target already holds the same bytes. Returns
/// whether a write happened.
fn copy_file(source: &Path, target: &Path) -> Result<bool> {
    let content = fs::read(source)?;
    if same_content(target, &content) {
        return Ok(false);
    }
    ensure_parent(target)?;
    fs::copy(source, target)?;
    Ok(true)
}

/// Sets a top-level field of a JSON object document, keeping key order.
fn promote_json(content: &[u8], field: &str, value: &str, name: &str) -> Result<String> {
    let mut document: serde_json::Value = serde_json::from_slice(content)?;
    let object = document
        .as_object_mut()
        .ok_or_else(|| Error::ConfigError(format!("'{name}' is not a JSON object")))?;
    object.insert(field.to_string(), serde_json::Value::String(value.to_string()));
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Identity promotion with names rendered and the value resolved.
struct Identity {
    source: String,
    target: String,
    field: String,
    value: String,
}

/// Drives copy, transform and conditional write for every resolved path.
///
/// Renames and identity promotion are applied to destination paths and
/// contents before writing, so a destination already holding the final tree
/// is left untouched.
pub struct Processor<'a> {
    transformer: &'a MarkerTransformer,
    stem: &'a Path,
    output_root: &'a Path,
    features: &'a FeatureSet,
    args: &'a ResolvedArgs,
    renames: Vec<(String, String)>,
    identity: Option<Identity>,
    applied: Vec<bool>,
    promoted: bool,
}

impl<'a> Processor<'a> {
    /// Renders the rename table and identity names against the arguments.
    ///
    /// # Errors
    /// * `Error::MissingArgumentError` if the identity argument is unresolved
    pub fn new(
        transformer: &'a MarkerTransformer,
        engine: &dyn TemplateRenderer,
        stem: &'a Path,
        output_root: &'a Path,
        features: &'a FeatureSet,
        args: &'a ResolvedArgs,
        base: &BaseInfo,
    ) -> Result<Self> {
        let render = |name: &str| -> Result<String> {
            Ok(normalize(&render_name(engine, name, args)?).to_string())
        };

        let renames = base
            .file_renames
            .iter()
            .map(|(old, new)| -> Result<(String, String)> {
                Ok((render(old.as_str())?, render(new.as_str())?))
            })
            .collect::<Result<Vec<_>>>()?;

        let identity = match &base.identity {
            Some(identity) => {
                let value = args
                    .get(&identity.arg)
                    .ok_or_else(|| Error::MissingArgumentError { name: identity.arg.clone() })?;
                Some(Identity {
                    source: render(identity.source.as_str())?,
                    target: render(identity.target.as_str())?,
                    field: identity.field.clone(),
                    value: value.to_string(),
                })
            }
            None => None,
        };

        Ok(Self {
            transformer,
            stem,
            output_root,
            features,
            args,
            applied: vec![false; renames.len()],
            renames,
            identity,
            promoted: false,
        })
    }

    /// Applies the rename table in order to a stem-relative path. An entry
    /// matches the path itself or any directory above it.
    fn rename_path(&mut self, relative: &str) -> String {
        let mut current = relative.to_string();
        for (i, (old, new)) in self.renames.iter().enumerate() {
            let renamed = if current == *old {
                Some(new.clone())
            } else {
                current
                    .strip_prefix(old.as_str())
                    .filter(|rest| rest.starts_with('/'))
                    .map(|rest| format!("{new}{rest}"))
            };
            if let Some(renamed) = renamed {
                self.applied[i] = true;
                current = renamed;
            }
        }
        current
    }

    /// Materializes one resolved path.
    ///
    /// Directories are copied verbatim. Files are transformed when they are
    /// valid UTF-8 and written only when the destination differs.
    pub fn process(&mut self, source: &Path) -> Result<ProcessResult> {
        let relative = relative_key(self.stem, source)?;

        if source.is_dir() {
            debug!("Copying directory {relative}");
            let target = self.output_root.join(self.rename_path(&relative));
            let mut writes = 0;
            for entry in WalkDir::new(source).follow_links(true) {
                let entry = entry?;
                let inner = relative_key(self.stem, entry.path())?;
                let dest = self.output_root.join(self.rename_path(&inner));
                if entry.file_type().is_dir() {
                    fs::create_dir_all(&dest)?;
                } else if copy_file(entry.path(), &dest)? {
                    writes += 1;
                }
            }
            return Ok(ProcessResult {
                source: source.to_path_buf(),
                target,
                action: FileAction::Directory,
                writes,
            });
        }

        let renamed = self.rename_path(&relative);
        let original = fs::read(source)?;
        let mut transformed = match std::str::from_utf8(&original) {
            Ok(text) => {
                let extension = source.extension().and_then(|e| e.to_str()).unwrap_or_default();
                let new_text = self.transformer.transform(
                    text,
                    extension,
                    &self.features.keyword_excludes,
                    self.args,
                );
                (new_text != text).then_some(new_text)
            }
            Err(_) => {
                debug!("Not transforming binary file {relative}");
                None
            }
        };

        let mut destination = renamed;
        if let Some(identity) = self.identity.as_ref().filter(|id| id.source == destination) {
            let content = transformed.as_deref().map_or(original.as_slice(), str::as_bytes);
            transformed =
                Some(promote_json(content, &identity.field, &identity.value, &destination)?);
            debug!("Promoting '{destination}' to '{}'", identity.target);
            destination = identity.target.clone();
            self.promoted = true;
        }
        let target = self.output_root.join(destination);

        let (content, action) = match &transformed {
            Some(text) => (text.as_bytes(), FileAction::Transformed),
            None => (original.as_slice(), FileAction::Copied),
        };

        if same_content(&target, content) {
            debug!("Unchanged {}", target.display());
            return Ok(ProcessResult {
                source: source.to_path_buf(),
                target,
                action: FileAction::Unchanged,
                writes: 0,
            });
        }

        ensure_parent(&target)?;
        if action == FileAction::Transformed {
            fs::write(&target, content)?;
            fs::set_permissions(&target, fs::metadata(source)?.permissions())?;
        } else {
            fs::copy(source, &target)?;
        }

        Ok(ProcessResult { source: source.to_path_buf(), target, action, writes: 1 })
    }

    /// Processes every path and reports the renames and identity promotion
    /// that took effect. Rename entries whose source was not materialized are
    /// skipped.
    pub fn materialize(&mut self, paths: &[PathBuf]) -> Result<MaterializeReport> {
        let mut report = MaterializeReport::default();
        for path in paths {
            report.entries.push(self.process(path)?);
        }

        for ((old, new), applied) in self.renames.iter().zip(&self.applied) {
            if *applied {
                report.renames.push((self.output_root.join(old), self.output_root.join(new)));
            } else {
                debug!("Skipping rename of missing '{old}'");
            }
        }

        report.identity = match &self.identity {
            Some(identity) if self.promoted => Some(self.output_root.join(&identity.target)),
            Some(identity) => {
                warn!("Identity file '{}' was not materialized", identity.source);
                None
            }
            None => None,
        };
        Ok(report)
    }
}

/// Resolves features and paths for the answers and materializes the stem
/// into `output_root`, which must already exist.
pub fn materialize(
    stem: &Path,
    output_root: &Path,
    config: &BoltConfig,
    args: &ResolvedArgs,
) -> Result<MaterializeReport> {
    let features = resolve_features(config, args);
    let patterns = PathPatterns::new(&features.file_includes, &features.file_excludes)?;
    let paths = resolve_paths(stem, &patterns)?;
    debug!("Resolved {} paths from '{}'", paths.len(), stem.display());

    let transformer = MarkerTransformer::new()?;
    let engine = MiniJinjaRenderer::new();
    let mut processor =
        Processor::new(&transformer, &engine, stem, output_root, &features, args, &config.base)?;
    processor.materialize(&paths)
}

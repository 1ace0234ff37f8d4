//! Configuration handling for bolt-init template packages.
//! This module loads the init configuration (`bolt.json`, `bolt.yml`, `bolt.yaml`)
//! that declares the argument schema and the file-selection baseline.

use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Branding shown before prompting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntroData {
    pub pretty_name: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub by_line: Option<String>,
}

impl IntroData {
    /// Name used in headings, falling back from `pretty_name` to `name`.
    pub fn display_name(&self) -> &str {
        self.pretty_name.as_deref().or(self.name.as_deref()).unwrap_or("bolt-init")
    }
}

/// A selectable value of a select, multiselect or boolean argument.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArgOption {
    pub value: String,
    #[serde(default)]
    pub label: String,
    /// Glob patterns pulled in when the option is chosen and excluded otherwise.
    #[serde(default)]
    pub files: Vec<String>,
}

impl ArgOption {
    /// Label shown in prompts; the value when no label was authored.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.value
        } else {
            &self.label
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ArgumentKind {
    #[serde(alias = "text")]
    String,
    /// A string naming the output folder.
    Folder,
    #[serde(alias = "confirm")]
    Boolean {
        #[serde(default)]
        options: Vec<ArgOption>,
    },
    Select {
        options: Vec<ArgOption>,
    },
    Multiselect {
        options: Vec<ArgOption>,
    },
}

/// One entry of the argument schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArgumentDefinition {
    pub name: String,
    #[serde(flatten)]
    pub kind: ArgumentKind,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub describe: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub initial_value: Option<serde_json::Value>,
}

impl ArgumentDefinition {
    /// Declared options of select, multiselect and boolean arguments.
    pub fn options(&self) -> &[ArgOption] {
        match &self.kind {
            ArgumentKind::Boolean { options }
            | ArgumentKind::Select { options }
            | ArgumentKind::Multiselect { options } => options,
            ArgumentKind::String | ArgumentKind::Folder => &[],
        }
    }

    /// Finds a declared option by value, ignoring case.
    pub fn option(&self, value: &str) -> Option<&ArgOption> {
        self.options().iter().find(|opt| opt.value.eq_ignore_ascii_case(value))
    }

    /// Text shown when prompting for this argument.
    pub fn prompt_text(&self) -> &str {
        if !self.message.is_empty() {
            &self.message
        } else if !self.describe.is_empty() {
            &self.describe
        } else {
            &self.name
        }
    }
}

/// The identity/configuration file promoted to its canonical name after copying.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdentityFile {
    /// Source file name relative to the output root; rendered against the
    /// resolved arguments, e.g. `package.{{ framework }}.json`.
    pub source: String,
    /// Canonical file name relative to the output root.
    pub target: String,
    /// Top-level JSON field receiving the identity value.
    #[serde(default = "default_identity_field")]
    pub field: String,
    /// Argument supplying the identity value.
    #[serde(default = "default_identity_arg")]
    pub arg: String,
}

fn default_identity_field() -> String {
    "name".to_string()
}

fn default_identity_arg() -> String {
    "id".to_string()
}

/// File-selection baseline of a template package.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BaseInfo {
    /// Name of the template package. The configuration directory itself is
    /// the stem when unset.
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub global_includes: Vec<String>,
    #[serde(default)]
    pub global_excludes: Vec<String>,
    /// Ordered `[old, new]` renames applied to the output tree.
    #[serde(default)]
    pub file_renames: Vec<(String, String)>,
    #[serde(default)]
    pub identity: Option<IdentityFile>,
}

/// Top-level init configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoltConfig {
    #[serde(default)]
    pub intro: IntroData,
    #[serde(default)]
    pub base: BaseInfo,
    #[serde(default)]
    pub args: Vec<ArgumentDefinition>,
}

impl BoltConfig {
    /// Looks up an argument definition by name.
    pub fn argument(&self, name: &str) -> Option<&ArgumentDefinition> {
        self.args.iter().find(|arg| arg.name == name)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for arg in &self.args {
            if !seen.insert(arg.name.as_str()) {
                return Err(Error::ConfigError(format!(
                    "argument '{}' is declared more than once",
                    arg.name
                )));
            }
            if let ArgumentKind::Select { options } | ArgumentKind::Multiselect { options } =
                &arg.kind
            {
                if options.is_empty() {
                    return Err(Error::ConfigError(format!(
                        "argument '{}' declares no options",
                        arg.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Loads configuration from a template directory, trying multiple file formats.
///
/// # Returns
/// * `Result<String>` - Contents of the first found configuration file
///
/// # Errors
/// * `Error::ConfigNotFoundError` if no config file exists
pub fn load_config<P: AsRef<Path>>(template_dir: P, config_files: &[&str]) -> Result<String> {
    let template_dir = template_dir.as_ref();
    for file in config_files {
        let config_path = template_dir.join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(std::fs::read_to_string(&config_path)?);
        }
    }

    Err(Error::ConfigNotFoundError {
        template_dir: template_dir.display().to_string(),
        tried: config_files.join(", "),
    })
}

/// Parses the configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if neither format parses or the schema is inconsistent
pub fn parse_config(content: &str) -> Result<BoltConfig> {
    let config: BoltConfig = match serde_json::from_str(content) {
        Ok(config) => config,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}")))?,
    };
    config.validate()?;
    Ok(config)
}

/// Loads and parses the init configuration of a template directory.
pub fn get_config<P: AsRef<Path>>(template_dir: P) -> Result<BoltConfig> {
    let content = load_config(template_dir, &CONFIG_FILES)?;
    parse_config(&content)
}

//! Error handling for the bolt-init application.
//! Defines custom error types and results used throughout the application.

use thiserror::Error;

/// Custom error types for bolt-init operations.
///
/// This enum represents all possible errors that can occur while resolving
/// a template package and materializing it into an output tree.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Glob error: {0}.")]
    GlobError(#[from] globset::Error),

    #[error("Directory traversal error: {0}.")]
    WalkError(#[from] walkdir::Error),

    #[error("Pattern error: {0}.")]
    RegexError(#[from] regex::Error),

    #[error("Template rendering error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Prompt error: {0}.")]
    PromptError(#[from] dialoguer::Error),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// No init configuration could be found in the template directory.
    #[error("No configuration file found in '{template_dir}' (tried: {tried}).")]
    ConfigNotFoundError { template_dir: String, tried: String },

    /// The template directory or the resolved template package does not exist.
    #[error("Template '{template}' does not exist.")]
    TemplateDoesNotExistError { template: String },

    /// A required argument has no value after CLI parsing and prompting.
    #[error("Missing required argument '{name}'.")]
    MissingArgumentError { name: String },

    /// A `name=value` assignment names no declared argument.
    #[error("Unknown argument '{name}'.")]
    UnknownArgumentError { name: String },

    /// Represents validation failures in user input or data
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// The output directory exists and the user declined to replace it.
    #[error("Output directory '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },

    /// The package manager exited unsuccessfully.
    #[error("Dependency installation failed: {0}.")]
    InstallError(String),
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}

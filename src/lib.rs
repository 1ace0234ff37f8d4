//! bolt-init creates projects from feature-gated template packages.
//! Chosen options decide which template files are copied and which marked
//! regions inside them survive.

/// Resolved argument values and `name=value` parsing
pub mod args;

/// Command-line interface module for the bolt-init application
pub mod cli;

/// Init configuration loading (bolt.json, bolt.yml, bolt.yaml)
pub mod config;

pub mod constants;

/// Error types and handling for the bolt-init application
pub mod error;

/// Keyword and file-pattern resolution from chosen arguments
pub mod features;

/// Package manager detection and dependency installation
pub mod install;

/// Template stem resolution: global installation first, local packages second
pub mod loader;

pub mod logger;

/// Sentinel marker parsing and text transformation
pub mod markers;

/// Answer resolution from stdin, assignments and prompts
pub mod parser;

/// Include/exclude glob expansion against the template stem
pub mod paths;

/// Copy, transform and conditional write of the output tree
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Argument interpolation in configuration names
pub mod renderer;

//! Command-line interface implementation for bolt-init.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for bolt-init.
#[derive(Parser, Debug)]
#[command(author, version, about = "bolt-init: create a project from a feature-gated template package", long_about = None)]
pub struct Args {
    /// Directory holding the init configuration (bolt.json, bolt.yml or bolt.yaml)
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Folder where the project will be created
    #[arg(value_name = "FOLDER")]
    pub output_dir: PathBuf,

    /// Replace an existing output folder without asking
    #[arg(short, long)]
    pub force: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Read answers as a JSON object from stdin
    #[arg(short, long)]
    pub stdin: bool,

    /// Set an argument, e.g. `--set framework=react` or `--set plugins=react,vue`.
    /// A bare name sets a boolean argument to true.
    #[arg(short = 'a', long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Never prompt; unanswered arguments take their initial values
    #[arg(long)]
    pub no_input: bool,

    /// Keep the existing output folder and only write files whose content changed
    #[arg(long)]
    pub incremental: bool,

    /// Install dependencies in the generated project
    #[arg(long)]
    pub install: bool,

    /// Directory searched first for the template package, before the local
    /// node_modules of TEMPLATE. Defaults to the parent of TEMPLATE.
    #[arg(long, value_name = "DIR")]
    pub global_dir: Option<PathBuf>,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

//! bolt-init's main application entry point and orchestration logic.
//! Handles command-line argument parsing, answer resolution and the
//! materialization flow.

use std::path::Path;

use bolt_init::{
    args::{ArgValue, ResolvedArgs},
    cli::{get_args, Args},
    config::{get_config, IntroData},
    error::{default_error_handler, Error, Result},
    install::{detect_package_manager, install_dependencies},
    loader::{load_template, LocalLoader, TemplateLoader, TemplateSource},
    logger::init_logger,
    parser::{answers_from_assignments, answers_from_json, folder_argument, get_answers, load_from_stdin},
    processor::{materialize, reset_destination, FileAction},
    prompt::{DefaultsPrompter, DialoguerPrompter, Prompter},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn print_intro(intro: &IntroData) {
    println!("{}", intro.display_name());
    let by_line = [intro.by_line.as_deref(), intro.url.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" | ");
    if !by_line.is_empty() {
        println!("{by_line}");
    }
    println!();
}

/// Replaces the output directory after confirmation, or keeps it in
/// incremental mode.
fn prepare_output_dir(prompt: &dyn Prompter, output_dir: &Path, args: &Args) -> Result<()> {
    if args.incremental {
        std::fs::create_dir_all(output_dir)?;
        return Ok(());
    }
    if output_dir.exists() {
        let replace = prompt.confirm(
            args.force,
            format!("Folder '{}' already exists. Overwrite it?", output_dir.display()),
        )?;
        if !replace {
            return Err(Error::OutputDirectoryExistsError {
                output_dir: output_dir.display().to_string(),
            });
        }
    }
    reset_destination(output_dir)
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the init configuration and resolves the template stem
/// 2. Resolves answers from stdin, `--set` flags and prompts
/// 3. Validates required arguments before touching the filesystem
/// 4. Resets the output folder and materializes the template
/// 5. Optionally installs dependencies
fn run(args: Args) -> Result<()> {
    let template_dir = LocalLoader::new(&args.template).load()?;
    let config = get_config(&template_dir)?;
    print_intro(&config.intro);

    let source = TemplateSource::new(&template_dir, &config.base, args.global_dir.as_deref())?;
    println!("Using template from the {source}");
    let stem = load_template(&source)?;

    let prompt: Box<dyn Prompter> = if args.no_input {
        Box::new(DefaultsPrompter)
    } else {
        Box::new(DialoguerPrompter)
    };

    let mut preloaded = if args.stdin {
        answers_from_json(&config, &load_from_stdin()?)?
    } else {
        ResolvedArgs::new()
    };
    preloaded.extend(answers_from_assignments(&config, &args.set)?);
    preloaded.insert(
        folder_argument(&config).to_string(),
        ArgValue::String(args.output_dir.display().to_string()),
    );
    let answers = get_answers(&*prompt, &config, preloaded)?;

    let output_dir = args.output_dir.clone();
    println!("Creating {} in '{}'", config.intro.display_name(), output_dir.display());
    prepare_output_dir(&*prompt, &output_dir, &args)?;

    let report = materialize(&stem, &output_dir, &config, &answers)?;
    for entry in &report.entries {
        if entry.action != FileAction::Unchanged {
            println!("{}: '{}'", entry.action, entry.target.display());
        }
    }
    for (from, to) in &report.renames {
        println!("Renamed: '{}' -> '{}'", from.display(), to.display());
    }

    let package_manager = detect_package_manager();
    if args.install {
        println!("Installing dependencies...");
        install_dependencies(&output_dir, package_manager)?;
    }

    for (name, value) in &answers {
        println!("{name} {value}");
    }
    println!(
        "{} generated in {} ({} files written).",
        config.intro.display_name(),
        output_dir.display(),
        report.writes()
    );
    if !args.install {
        let folder = output_dir.file_name().map(|f| f.to_string_lossy()).unwrap_or_default();
        println!("Dependencies not installed. To install, run: cd {folder} && {package_manager} install");
    }
    Ok(())
}

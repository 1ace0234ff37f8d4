//! Resolution of the final argument map from preloaded answers (stdin JSON,
//! `--set` assignments) and prompting.

use crate::args::{from_json, parse_assignment, ArgValue, ResolvedArgs};
use crate::config::{ArgumentKind, BoltConfig};
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use log::warn;
use std::io::Read;

/// Reads a JSON object of answers from stdin. Empty input yields no answers.
pub fn load_from_stdin() -> Result<serde_json::Value> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    let buffer = buffer.trim();
    if buffer.is_empty() {
        return Ok(serde_json::Value::Null);
    }
    Ok(serde_json::from_str(buffer)?)
}

/// Converts a JSON object of answers into resolved values. Keys naming no
/// declared argument are ignored.
pub fn answers_from_json(config: &BoltConfig, answers: &serde_json::Value) -> Result<ResolvedArgs> {
    let mut resolved = ResolvedArgs::new();
    let Some(object) = answers.as_object() else {
        if !answers.is_null() {
            return Err(Error::ValidationError("answers must be a JSON object".to_string()));
        }
        return Ok(resolved);
    };
    for (key, value) in object {
        match config.argument(key) {
            Some(arg) => {
                resolved.insert(arg.name.clone(), from_json(arg, value)?);
            }
            None => warn!("Ignoring answer for unknown argument '{key}'"),
        }
    }
    Ok(resolved)
}

/// Parses `name=value` assignments. Later assignments win.
pub fn answers_from_assignments<S: AsRef<str>>(
    config: &BoltConfig,
    assignments: &[S],
) -> Result<ResolvedArgs> {
    let mut resolved = ResolvedArgs::new();
    for assignment in assignments {
        let (name, value) = parse_assignment(config, assignment.as_ref())?;
        resolved.insert(name, value);
    }
    Ok(resolved)
}

/// Name under which the output folder is recorded: the first folder
/// argument of the schema, `folder` otherwise.
pub fn folder_argument(config: &BoltConfig) -> &str {
    config
        .args
        .iter()
        .find(|arg| arg.kind == ArgumentKind::Folder)
        .map(|arg| arg.name.as_str())
        .unwrap_or("folder")
}

/// Names of arguments that must be resolved before anything is written.
pub fn required_arguments(config: &BoltConfig) -> Vec<&str> {
    let mut required: Vec<&str> =
        config.args.iter().filter(|arg| arg.required).map(|arg| arg.name.as_str()).collect();
    if let Some(identity) = &config.base.identity {
        if !required.contains(&identity.arg.as_str()) {
            required.push(identity.arg.as_str());
        }
    }
    required
}

/// Fails on the first required argument without a usable value.
pub fn validate_required(config: &BoltConfig, answers: &ResolvedArgs) -> Result<()> {
    for name in required_arguments(config) {
        let missing = match answers.get(name) {
            None => true,
            Some(ArgValue::String(s)) => s.trim().is_empty(),
            Some(ArgValue::List(items)) => items.is_empty(),
            Some(ArgValue::Bool(_)) => false,
        };
        if missing {
            return Err(Error::MissingArgumentError { name: name.to_string() });
        }
    }
    Ok(())
}

/// Resolves every declared argument in schema order: preloaded answers are
/// taken as given and the rest are asked for. Preloaded values of
/// undeclared names (such as the output folder) are kept after them.
pub fn get_answers(
    prompt: &dyn Prompter,
    config: &BoltConfig,
    mut preloaded: ResolvedArgs,
) -> Result<ResolvedArgs> {
    let mut answers = ResolvedArgs::new();
    for arg in &config.args {
        let value = match preloaded.shift_remove(&arg.name) {
            Some(value) => Some(value),
            None => prompt.answer(arg)?,
        };
        if let Some(value) = value {
            answers.insert(arg.name.clone(), value);
        }
    }
    answers.extend(preloaded);
    validate_required(config, &answers)?;
    Ok(answers)
}

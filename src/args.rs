//! Resolved argument values and parsing of `name=value` assignments.

use crate::config::{ArgumentDefinition, ArgumentKind, BoltConfig};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The chosen value of one argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    String(String),
    List(Vec<String>),
}

impl ArgValue {
    /// Truthiness used for boolean arguments. Strings and lists count as
    /// true when non-empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            ArgValue::Bool(b) => *b,
            ArgValue::String(s) => !s.is_empty(),
            ArgValue::List(items) => !items.is_empty(),
        }
    }

    /// Whether `value` is the chosen string or a member of the chosen list.
    pub fn selects(&self, value: &str) -> bool {
        match self {
            ArgValue::String(s) => s.eq_ignore_ascii_case(value),
            ArgValue::List(items) => items.iter().any(|item| item.eq_ignore_ascii_case(value)),
            ArgValue::Bool(_) => false,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(b) => write!(f, "{b}"),
            ArgValue::String(s) => f.write_str(s),
            ArgValue::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::String(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::String(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<Vec<String>> for ArgValue {
    fn from(value: Vec<String>) -> Self {
        ArgValue::List(value)
    }
}

/// Argument name to chosen value, in resolution order.
pub type ResolvedArgs = IndexMap<String, ArgValue>;

/// Parses a boolean flag value.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "yes" | "y" | "1" | "on" => Some(true),
        "false" | "no" | "n" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Converts a raw string into a value of the argument's kind.
///
/// Select values must name a declared option and multiselect values are
/// comma separated lists of declared options.
pub fn parse_value(arg: &ArgumentDefinition, raw: &str) -> Result<ArgValue> {
    match &arg.kind {
        ArgumentKind::String | ArgumentKind::Folder => Ok(ArgValue::String(raw.to_string())),
        ArgumentKind::Boolean { .. } => parse_bool(raw).map(ArgValue::Bool).ok_or_else(|| {
            Error::ValidationError(format!("'{raw}' is not a boolean value for '{}'", arg.name))
        }),
        ArgumentKind::Select { .. } => Ok(ArgValue::String(choice(arg, raw.trim())?)),
        ArgumentKind::Multiselect { .. } => {
            let values = raw
                .split(',')
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(|value| choice(arg, value))
                .collect::<Result<Vec<_>>>()?;
            Ok(ArgValue::List(values))
        }
    }
}

fn choice(arg: &ArgumentDefinition, raw: &str) -> Result<String> {
    arg.option(raw).map(|opt| opt.value.clone()).ok_or_else(|| {
        let choices: Vec<&str> = arg.options().iter().map(|opt| opt.value.as_str()).collect();
        Error::ValidationError(format!(
            "'{raw}' is not a valid choice for '{}' (choices: {})",
            arg.name,
            choices.join(", ")
        ))
    })
}

/// Parses a `name=value` assignment against the schema. A bare `name`
/// sets a boolean argument to true.
pub fn parse_assignment(config: &BoltConfig, assignment: &str) -> Result<(String, ArgValue)> {
    let (name, raw) = match assignment.split_once('=') {
        Some((name, raw)) => (name.trim(), raw),
        None => (assignment.trim(), ""),
    };
    let arg = config
        .args
        .iter()
        .find(|arg| arg.name == name || arg.alias.as_deref() == Some(name))
        .ok_or_else(|| Error::UnknownArgumentError { name: name.to_string() })?;
    if raw.is_empty() && !matches!(arg.kind, ArgumentKind::Boolean { .. }) {
        return Err(Error::ValidationError(format!("no value given for '{}'", arg.name)));
    }
    Ok((arg.name.clone(), parse_value(arg, raw)?))
}

/// Converts a JSON answer into a value, coercing by argument kind where the
/// JSON shape allows it.
pub fn from_json(arg: &ArgumentDefinition, value: &serde_json::Value) -> Result<ArgValue> {
    match value {
        serde_json::Value::Bool(b) => match arg.kind {
            ArgumentKind::Boolean { .. } => Ok(ArgValue::Bool(*b)),
            _ => parse_value(arg, &b.to_string()),
        },
        serde_json::Value::String(s) => parse_value(arg, s),
        serde_json::Value::Array(items) => {
            let joined = items
                .iter()
                .map(|item| match item {
                    serde_json::Value::String(s) => Ok(s.clone()),
                    other => Err(Error::ValidationError(format!(
                        "'{other}' is not a valid list item for '{}'",
                        arg.name
                    ))),
                })
                .collect::<Result<Vec<_>>>()?
                .join(",");
            parse_value(arg, &joined)
        }
        serde_json::Value::Number(n) => parse_value(arg, &n.to_string()),
        other => Err(Error::ValidationError(format!(
            "'{other}' is not a valid value for '{}'",
            arg.name
        ))),
    }
}

//! User input and interaction handling.
//! Arguments not supplied on the command line or stdin are asked for through
//! a [`Prompter`], backed by dialoguer in interactive runs.

use crate::args::{from_json, ArgValue};
use crate::config::{ArgumentDefinition, ArgumentKind};
use crate::error::Result;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use log::warn;

pub trait Prompter {
    /// Asks a yes/no question. `skip` answers yes without asking.
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool>;

    /// Asks for the value of one argument. `None` leaves it unset.
    fn answer(&self, arg: &ArgumentDefinition) -> Result<Option<ArgValue>>;
}

/// The authored initial value of an argument, if it is usable for its kind.
pub fn initial_value(arg: &ArgumentDefinition) -> Option<ArgValue> {
    let value = arg.initial_value.as_ref()?;
    match from_json(arg, value) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring initial value of '{}': {e}", arg.name);
            None
        }
    }
}

/// Prompter that never asks: arguments take their initial values and
/// confirmations are declined unless skipped.
#[derive(Debug, Default)]
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn confirm(&self, skip: bool, _prompt: String) -> Result<bool> {
        Ok(skip)
    }

    fn answer(&self, arg: &ArgumentDefinition) -> Result<Option<ArgValue>> {
        Ok(initial_value(arg).or(match arg.kind {
            ArgumentKind::Boolean { .. } => Some(ArgValue::Bool(false)),
            _ => None,
        }))
    }
}

/// Interactive prompter using dialoguer widgets.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    fn ask_text(&self, arg: &ArgumentDefinition) -> Result<Option<ArgValue>> {
        let mut input = Input::<String>::new().with_prompt(arg.prompt_text());
        if let Some(ArgValue::String(default)) = initial_value(arg) {
            input = input.default(default);
        }
        if !arg.required {
            input = input.allow_empty(true);
        }
        let value = input.interact_text()?;
        Ok((!value.is_empty()).then_some(ArgValue::String(value)))
    }

    fn ask_bool(&self, arg: &ArgumentDefinition) -> Result<Option<ArgValue>> {
        let default = initial_value(arg).is_some_and(|value| value.is_truthy());
        let value = Confirm::new().with_prompt(arg.prompt_text()).default(default).interact()?;
        Ok(Some(ArgValue::Bool(value)))
    }

    fn ask_select(&self, arg: &ArgumentDefinition) -> Result<Option<ArgValue>> {
        let options = arg.options();
        let labels: Vec<&str> = options.iter().map(|opt| opt.display_label()).collect();
        let default = initial_value(arg)
            .and_then(|value| options.iter().position(|opt| value.selects(&opt.value)))
            .unwrap_or(0);
        let selection = Select::new()
            .with_prompt(arg.prompt_text())
            .items(&labels)
            .default(default)
            .interact()?;
        Ok(Some(ArgValue::String(options[selection].value.clone())))
    }

    fn ask_multiselect(&self, arg: &ArgumentDefinition) -> Result<Option<ArgValue>> {
        let options = arg.options();
        let labels: Vec<&str> = options.iter().map(|opt| opt.display_label()).collect();
        let initial = initial_value(arg);
        let defaults: Vec<bool> = options
            .iter()
            .map(|opt| initial.as_ref().is_some_and(|value| value.selects(&opt.value)))
            .collect();
        loop {
            let selection = MultiSelect::new()
                .with_prompt(arg.prompt_text())
                .items(&labels)
                .defaults(&defaults)
                .interact()?;
            if arg.required && selection.is_empty() {
                warn!("Select at least one option for '{}'", arg.name);
                continue;
            }
            let values = selection.into_iter().map(|i| options[i].value.clone()).collect();
            return Ok(Some(ArgValue::List(values)));
        }
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool> {
        if skip {
            return Ok(true);
        }
        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    }

    fn answer(&self, arg: &ArgumentDefinition) -> Result<Option<ArgValue>> {
        match arg.kind {
            ArgumentKind::String | ArgumentKind::Folder => self.ask_text(arg),
            ArgumentKind::Boolean { .. } => self.ask_bool(arg),
            ArgumentKind::Select { .. } => self.ask_select(arg),
            ArgumentKind::Multiselect { .. } => self.ask_multiselect(arg),
        }
    }
}

//! Interpolation of resolved arguments into configuration names, such as
//! `package.{{ framework }}.json` in the identity file or rename table.
//! File contents are never rendered; they go through the marker transformer.
use crate::args::ResolvedArgs;
use crate::error::{Error, Result};
use minijinja::{Environment, UndefinedBehavior};

/// Trait for name rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based renderer. Referencing an unresolved argument is an error.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        if !template.contains("{{") && !template.contains("{%") {
            return Ok(template.to_string());
        }
        self.env.render_str(template, context).map_err(Error::MinijinjaError)
    }
}

/// Builds the rendering context from the resolved arguments.
pub fn args_context(args: &ResolvedArgs) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(args)?)
}

/// Renders a relative path name against the resolved arguments.
pub fn render_name(
    engine: &dyn TemplateRenderer,
    name: &str,
    args: &ResolvedArgs,
) -> Result<String> {
    let rendered = engine.render(name, &args_context(args)?)?;
    if rendered.trim().is_empty() {
        return Err(Error::ConfigError(format!("'{name}' renders to an empty path")));
    }
    Ok(rendered)
}

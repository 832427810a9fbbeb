//! Instructional prompt sent to the generation service.
//!
//! The template is configuration data: a minijinja source with a single
//! `response` variable. Everything outside the variable is sent verbatim.

use crate::error::{DiscoError, Result};
use minijinja::{Environment, UndefinedBehavior, context};

const TEMPLATE_NAME: &str = "analysis_prompt";
const RESPONSE_VAR: &str = "response";

/// Template used when `config.toml` does not provide one.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "\
You are a Business Analyst discovery assistant.
Extract in structured bullets:

1) Core challenge
2) Functional requirement
3) Non-functional requirement
4) Assumption
5) Open question

Stakeholder response:
{{ response }}
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    source: String,
}

impl PromptTemplate {
    /// Compiles the template and rejects references to any variable other
    /// than `response`, including ones inside branches a render would skip.
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let template = Self {
            source: source.into(),
        };

        let mut unknown: Vec<String> = {
            let env = template.environment()?;
            env.get_template(TEMPLATE_NAME)?
                .undeclared_variables(false)
                .into_iter()
                .filter(|name| name != RESPONSE_VAR)
                .collect()
        };
        if !unknown.is_empty() {
            unknown.sort();
            return Err(DiscoError::config(format!(
                "prompt template: unknown variable(s) {}; only `{RESPONSE_VAR}` is available",
                unknown.join(", ")
            )));
        }

        template.render("")?;
        Ok(template)
    }

    /// Renders the prompt with the raw response text interpolated.
    pub fn render(&self, response: &str) -> Result<String> {
        let env = self.environment()?;
        let rendered = env
            .get_template(TEMPLATE_NAME)?
            .render(context! { response => response })?;
        Ok(rendered)
    }

    fn environment(&self) -> Result<Environment<'_>> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.add_template(TEMPLATE_NAME, &self.source)?;
        Ok(env)
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }
}

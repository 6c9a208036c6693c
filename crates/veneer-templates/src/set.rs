//! Compiled template containers.
//!
//! A [`TemplateSet`] is the output of one compilation pass: a complete
//! mapping from logical name to [`CompiledTemplate`]. Sets are immutable
//! after compilation and meant to be shared behind an `Arc`; reloading
//! replaces the whole set rather than mutating it, so concurrent readers
//! never observe a partially populated mapping.

use std::collections::HashMap;

use minijinja::{Environment, Value};
use serde::Serialize;

use crate::error::RenderError;

/// One compiled mapping entry.
///
/// Each entry is its own `minijinja::Environment` holding the template's
/// source under its logical name and, when a layout is configured, the
/// layout's source under the layout's name. The environment also carries a
/// `content` global bound to the template's logical name, which is how a
/// shared layout reaches the template it wraps:
///
/// ```jinja
/// <html><body>{% include content %}</body></html>
/// ```
pub struct CompiledTemplate {
    name: String,
    env: Environment<'static>,
}

impl CompiledTemplate {
    pub(crate) fn new(name: String, env: Environment<'static>) -> Self {
        Self { name, env }
    }

    /// The logical name this entry is keyed by.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders the named definition `target` within this container, with
    /// `binding` as the data context.
    ///
    /// The target is either this template's own name or, when a layout is
    /// configured, the layout's name.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Execution`] if the target definition is absent
    /// from the container or fails while executing.
    pub fn render<T: Serialize>(&self, target: &str, binding: &T) -> Result<String, RenderError> {
        let template = self
            .env
            .get_template(target)
            .map_err(|e| RenderError::Execution {
                name: target.to_string(),
                source: e,
            })?;

        template
            .render(Value::from_serialize(binding))
            .map_err(|e| RenderError::Execution {
                name: target.to_string(),
                source: e,
            })
    }
}

/// An immutable mapping of logical template names to compiled containers.
#[derive(Default)]
pub struct TemplateSet {
    templates: HashMap<String, CompiledTemplate>,
}

impl TemplateSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: String, template: CompiledTemplate) {
        self.templates.insert(name, template);
    }

    /// Looks up a compiled template by logical name.
    pub fn get(&self, name: &str) -> Option<&CompiledTemplate> {
        self.templates.get(name)
    }

    /// Returns true if `name` has a compiled entry.
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Looks up `name` and renders the `target` definition within it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TemplateNotFound`] if `name` is absent from
    /// the set, or [`RenderError::Execution`] if rendering fails.
    pub fn render<T: Serialize>(
        &self,
        name: &str,
        target: &str,
        binding: &T,
    ) -> Result<String, RenderError> {
        let template = self.get(name).ok_or_else(|| RenderError::TemplateNotFound {
            name: name.to_string(),
        })?;
        template.render(target, binding)
    }

    /// Number of compiled templates in the set.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true if the set holds no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterator over the logical names in the set.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(name: &str, source: &str) -> CompiledTemplate {
        let mut env = Environment::new();
        env.add_template_owned(name.to_string(), source.to_string())
            .unwrap();
        CompiledTemplate::new(name.to_string(), env)
    }

    #[test]
    fn test_render_simple_binding() {
        let template = entry("greet", "Hello, {{ name }}");
        let output = template
            .render("greet", &json!({ "name": "World" }))
            .unwrap();
        assert_eq!(output, "Hello, World");
    }

    #[test]
    fn test_set_lookup_and_render() {
        let mut set = TemplateSet::new();
        set.insert("greet".to_string(), entry("greet", "Hi {{ who }}"));

        assert!(set.contains("greet"));
        assert_eq!(set.len(), 1);

        let output = set
            .render("greet", "greet", &json!({ "who": "there" }))
            .unwrap();
        assert_eq!(output, "Hi there");
    }

    #[test]
    fn test_set_missing_name_is_not_found() {
        let set = TemplateSet::new();
        let result = set.render("missing", "missing", &json!(null));
        assert!(matches!(
            result,
            Err(RenderError::TemplateNotFound { ref name }) if name == "missing"
        ));
    }

    #[test]
    fn test_missing_target_is_execution_error() {
        let template = entry("page", "body");
        let result = template.render("layout", &json!(null));
        assert!(matches!(result, Err(RenderError::Execution { .. })));
    }
}

//! Compiled templates: parse once, render against many models.

use serde_json::Value;

use crate::error::PlaceholderResult;
use crate::placeholder::Placeholder;
use crate::resolver::{placeholders, resolve, ResolveOptions};

/// A value with its placeholders parsed up front.
///
/// The captured value and options are immutable, so a `Template` can be
/// rendered repeatedly (and shared across threads), with each call
/// re-resolving against the given model. Rendered output is never
/// cached. Because parsing happens at construction, malformed metadata
/// fails here rather than on a later introspection call.
#[derive(Debug, Clone)]
pub struct Template {
    value: Value,
    options: ResolveOptions,
    placeholders: Vec<Placeholder>,
}

impl Template {
    /// Compile a template with default options.
    pub fn new(value: Value) -> PlaceholderResult<Self> {
        Self::with_options(value, ResolveOptions::default())
    }

    /// Compile a template with the options every render will use.
    pub fn with_options(value: Value, options: ResolveOptions) -> PlaceholderResult<Self> {
        let placeholders = placeholders(&value)?;
        Ok(Self {
            value,
            options,
            placeholders,
        })
    }

    /// Resolve the captured value against `model`.
    pub fn render(&self, model: &Value) -> PlaceholderResult<Value> {
        if self.placeholders.is_empty() {
            return Ok(self.value.clone());
        }
        resolve(&self.value, model, &self.options)
    }

    pub fn has_placeholders(&self) -> bool {
        !self.placeholders.is_empty()
    }

    /// The placeholders found at construction, in traversal order.
    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    /// The captured, unresolved value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_template_with_arbitrary_values() {
        for value in [json!(null), json!(true), json!(55)] {
            let template = Template::new(value.clone()).unwrap();
            assert!(!template.has_placeholders());
            assert!(template.placeholders().is_empty());
            assert_eq!(template.render(&json!({})).unwrap(), value);
        }
    }

    #[test]
    fn test_template_without_placeholders_ignores_the_model() {
        let template = Template::new(json!("Hello world")).unwrap();
        assert_eq!(template.render(&json!("dummy")).unwrap(), json!("Hello world"));

        let template = Template::new(json!({"hello": "world"})).unwrap();
        assert_eq!(
            template.render(&json!("dummy")).unwrap(),
            json!({"hello": "world"})
        );

        let template = Template::new(json!(["Hello world", 123])).unwrap();
        assert_eq!(
            template.render(&json!(null)).unwrap(),
            json!(["Hello world", 123])
        );
    }

    #[test]
    fn test_template_renders_against_each_model() {
        let template = Template::new(json!("Hello {?.}")).unwrap();
        assert!(template.has_placeholders());
        assert_eq!(template.render(&json!("world")).unwrap(), json!("Hello world"));
        // A second render reflects the new model; nothing was cached.
        assert_eq!(template.render(&json!("again")).unwrap(), json!("Hello again"));
    }

    #[test]
    fn test_template_over_containers() {
        let template = Template::new(json!(["Hello {?./0}{?/1:!}", 123])).unwrap();
        let rendered = template.render(&json!(["world"])).unwrap();
        assert_eq!(rendered, json!(["Hello world!", 123]));
        assert!(template.has_placeholders());

        let template = Template::new(json!([{"str": "Hello {?who}{?/1:!}"}, 123])).unwrap();
        let rendered = template.render(&json!({"who": "world"})).unwrap();
        assert_eq!(rendered, json!([{"str": "Hello world!"}, 123]));
    }

    #[test]
    fn test_template_placeholder_introspection() {
        let template = Template::new(json!("Hello { ? who : 4} {? when | type: [day]}")).unwrap();
        let found = template.placeholders();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].expression.as_deref(), Some("who"));
        assert_eq!(found[0].default_value, Some(json!(4)));
        assert_eq!(found[1].expression.as_deref(), Some("when"));
        assert_eq!(found[1].metadata, Some(json!({"type": ["day"]})));
    }

    #[test]
    fn test_template_rejects_malformed_metadata_at_construction() {
        assert!(Template::new(json!("{? x | {broken }")).is_err());
    }

    #[test]
    fn test_template_is_shareable_across_threads() {
        let template = Template::new(json!("Hello {?.}")).unwrap();
        let handle = std::thread::spawn(move || template.render(&json!("thread")).unwrap());
        assert_eq!(handle.join().unwrap(), json!("Hello thread"));
    }
}

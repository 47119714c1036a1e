//! Template-driven output formatting.
//!
//! Columns can pipe their result through a template fragment before it
//! reaches the list view. The fragment sees the wrapped result as a
//! variable named `value`, so the full minijinja filter set is available:
//!
//! ```text
//! {{ value|upper }}
//! <a href="{{ value }}">{{ value|truncate(20) }}</a>
//! ```
//!
//! Templates are compiled once, when the column is built, and re-rendered
//! on every cell. Auto-escaping is set to HTML: the engine owns escaping,
//! this module never touches the text itself.

use minijinja::{AutoEscape, Environment, Value};

use crate::error::Result;

const TEMPLATE_NAME: &str = "output";

/// Fragment used by `external_url`: an anchor pointing at the value itself.
pub(crate) const EXTERNAL_URL_TEMPLATE: &str =
    r#"<a href="{{ value }}" target="_blank">{{ value }}</a>"#;

/// A compiled template fragment rendering a single `value` variable.
pub struct OutputTemplate {
    env: Environment<'static>,
}

impl OutputTemplate {
    /// Compiles `source`.
    ///
    /// Syntax errors surface here, before any row is rendered.
    pub fn new(source: &str) -> Result<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template_owned(TEMPLATE_NAME.to_string(), source.to_string())?;
        Ok(Self { env })
    }

    /// Renders the fragment with `value` bound to the given template value.
    pub fn render(&self, value: Value) -> Result<String> {
        let tmpl = self.env.get_template(TEMPLATE_NAME)?;
        Ok(tmpl.render(Value::from_iter([("value", value)]))?)
    }
}

/// Builds the `{{ value|<filter> }}` fragment behind `apply_filter`.
pub fn filter_expr(filter: &str) -> String {
    format!("{{{{ value|{} }}}}", filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::mark_safe;

    #[test]
    fn renders_value_substitution() {
        let tpl = OutputTemplate::new("value is {{ value }}").unwrap();
        assert_eq!(tpl.render(Value::from("x")).unwrap(), "value is x");
    }

    #[test]
    fn renders_on_every_call() {
        let tpl = OutputTemplate::new("{{ value }}!").unwrap();
        assert_eq!(tpl.render(Value::from("a")).unwrap(), "a!");
        assert_eq!(tpl.render(Value::from("b")).unwrap(), "b!");
    }

    #[test]
    fn filter_expr_wraps_filter_string() {
        assert_eq!(filter_expr("upper"), "{{ value|upper }}");
        assert_eq!(filter_expr("truncate(2)"), "{{ value|truncate(2) }}");
    }

    #[test]
    fn applies_filters() {
        let tpl = OutputTemplate::new(&filter_expr("upper")).unwrap();
        assert_eq!(tpl.render(Value::from("abc")).unwrap(), "ABC");
    }

    #[test]
    fn escapes_plain_values() {
        let tpl = OutputTemplate::new("{{ value }}").unwrap();
        assert_eq!(tpl.render(Value::from("<b>")).unwrap(), "&lt;b&gt;");
    }

    #[test]
    fn does_not_escape_safe_values() {
        let tpl = OutputTemplate::new("{{ value }}").unwrap();
        let safe = mark_safe("<b>bold</b>");
        assert_eq!(tpl.render(safe.into()).unwrap(), "<b>bold</b>");
    }

    #[test]
    fn syntax_error_fails_at_compile_time() {
        assert!(OutputTemplate::new("{{ unclosed").is_err());
    }

    #[test]
    fn external_url_template_links_to_value() {
        let tpl = OutputTemplate::new(EXTERNAL_URL_TEMPLATE).unwrap();
        let out = tpl.render(Value::from("example.com")).unwrap();
        assert_eq!(
            out,
            r#"<a href="example.com" target="_blank">example.com</a>"#
        );
    }
}

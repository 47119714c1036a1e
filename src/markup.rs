//! Safe-markup classification.
//!
//! Admin list views escape computed values by default. A [`Markup`] wraps a
//! string that is already valid markup and must be inserted verbatim; it
//! never changes the content, only how the rendering side classifies it.
//!
//! Converting a `Markup` into a template value keeps that classification:
//! feeding it back through a template with auto-escaping enabled does not
//! escape it a second time.

use std::fmt;

use serde::Serialize;

/// A string exempt from automatic output escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    /// Wraps `content` without inspecting or altering it.
    ///
    /// The caller vouches that `content` is already escaped or otherwise
    /// safe to emit as-is.
    pub fn raw(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Markup> for minijinja::Value {
    fn from(markup: Markup) -> Self {
        Self::from_safe_string(markup.0)
    }
}

/// Marks `content` as safe markup.
///
/// Convenience alias for [`Markup::raw`].
pub fn mark_safe(content: impl Into<String>) -> Markup {
    Markup::raw(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::{AutoEscape, Environment, Value};

    fn render_value(value: Value) -> String {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template_owned("t".to_string(), "{{ value }}".to_string())
            .unwrap();
        env.get_template("t")
            .unwrap()
            .render(Value::from_iter([("value", value)]))
            .unwrap()
    }

    #[test]
    fn mark_safe_preserves_content() {
        let markup = mark_safe("<b>bold</b>");
        assert_eq!(markup.as_str(), "<b>bold</b>");
        assert_eq!(markup.to_string(), "<b>bold</b>");
        assert_eq!(markup.into_string(), "<b>bold</b>");
    }

    #[test]
    fn safe_value_is_not_escaped_by_templates() {
        let out = render_value(mark_safe("<b>bold</b>").into());
        assert_eq!(out, "<b>bold</b>");
    }

    #[test]
    fn plain_value_is_escaped_by_templates() {
        let out = render_value(Value::from("<b>"));
        assert_eq!(out, "&lt;b&gt;");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&mark_safe("<i>x</i>")).unwrap();
        assert_eq!(json, "\"<i>x</i>\"");
    }
}

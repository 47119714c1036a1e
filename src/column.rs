//! Columns: the descriptor record, the builder, and the registration surface.
//!
//! A [`Column`] bundles three things:
//!
//! - a **name**, the identifier the host uses to address the column;
//! - a [`ColumnSpec`], the metadata the host's rendering layer reads
//!   (header label, sort field, boolean rendering, markup safety);
//! - a **handler**, the accessor computing the cell value for one row.
//!
//! Builder methods come in two flavors. Metadata-only methods
//! ([`Column::short_description`], [`Column::order_field`],
//! [`Column::boolean`], [`Column::with_spec`]) touch the spec and leave the
//! handler alone. Wrapping methods ([`Column::allow_tags`],
//! [`Column::limit_width`], [`Column::format_output`],
//! [`Column::apply_filter`], [`Column::external_url`]) stack a
//! transformation on top of the current handler, so order matters the same
//! way stacking order matters for function decorators:
//!
//! ```rust
//! use vitrine::Column;
//!
//! struct Repo { url: String }
//!
//! let column = Column::new("object_url", |repo: &Repo| repo.url.clone())
//!     .format_output("{{ value|upper }}")
//!     .unwrap()
//!     .allow_tags()
//!     .short_description("URL");
//! ```
//!
//! Columns never render themselves into a page. The host iterates a
//! [`ListDisplay`], reads each spec, and decides how to put the resulting
//! [`Cell`]s on screen.

use serde::Serialize;

use crate::error::Result;
use crate::markup::Markup;
use crate::output::{filter_expr, OutputTemplate, EXTERNAL_URL_TEMPLATE};

/// Suffix appended by [`Column::limit_width`] and [`truncate_chars`].
const ELLIPSIS: &str = "...";

/// Metadata the host's rendering layer reads for one column.
///
/// Every field is optional: an unset field means "no opinion", letting a
/// partial spec overlay another without clobbering it (see
/// [`Column::with_spec`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    /// Header label for the column.
    pub short_description: Option<String>,
    /// Database column the host may sort this column by.
    pub order_field: Option<String>,
    /// Render the value as a boolean checkmark instead of text.
    pub boolean: Option<bool>,
    /// Insert the value without escaping it.
    pub allow_markup: Option<bool>,
}

impl ColumnSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn short_description(mut self, label: impl Into<String>) -> Self {
        self.short_description = Some(label.into());
        self
    }

    pub fn order_field(mut self, field: impl Into<String>) -> Self {
        self.order_field = Some(field.into());
        self
    }

    pub fn boolean(mut self, flag: bool) -> Self {
        self.boolean = Some(flag);
        self
    }

    pub fn allow_markup(mut self, flag: bool) -> Self {
        self.allow_markup = Some(flag);
        self
    }

    pub fn is_boolean(&self) -> bool {
        self.boolean.unwrap_or(false)
    }

    pub fn allows_markup(&self) -> bool {
        self.allow_markup.unwrap_or(false)
    }

    /// Copies the set fields of `overlay` over self, leaving the rest
    /// untouched.
    fn merge(&mut self, overlay: ColumnSpec) {
        if let Some(label) = overlay.short_description {
            self.short_description = Some(label);
        }
        if let Some(field) = overlay.order_field {
            self.order_field = Some(field);
        }
        if let Some(flag) = overlay.boolean {
            self.boolean = Some(flag);
        }
        if let Some(flag) = overlay.allow_markup {
            self.allow_markup = Some(flag);
        }
    }
}

/// One rendered cell value.
///
/// `Text` is escaped by the host before insertion; `Markup` goes in
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Markup(Markup),
}

impl Cell {
    pub fn as_str(&self) -> &str {
        match self {
            Cell::Text(text) => text,
            Cell::Markup(markup) => markup.as_str(),
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Cell::Text(text) => text,
            Cell::Markup(markup) => markup.into_string(),
        }
    }

    pub fn is_markup(&self) -> bool {
        matches!(self, Cell::Markup(_))
    }
}

impl From<Cell> for minijinja::Value {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Text(text) => Self::from(text),
            Cell::Markup(markup) => Self::from(markup),
        }
    }
}

type Handler<R> = Box<dyn Fn(&R) -> Result<Cell> + Send + Sync>;

/// A computed column: name, metadata, and the accessor producing its cells.
pub struct Column<R> {
    name: &'static str,
    spec: ColumnSpec,
    handler: Handler<R>,
}

impl<R: 'static> Column<R> {
    /// Creates a text column from a plain accessor.
    pub fn new<F>(name: &'static str, accessor: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        Self {
            name,
            spec: ColumnSpec::new(),
            handler: Box::new(move |row| Ok(Cell::Text(accessor(row)))),
        }
    }

    pub(crate) fn from_handler(name: &'static str, spec: ColumnSpec, handler: Handler<R>) -> Self {
        Self { name, spec, handler }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn spec(&self) -> &ColumnSpec {
        &self.spec
    }

    /// Header label: the short description if set, otherwise the column
    /// name with underscores spaced out and the first letter capitalized.
    pub fn header(&self) -> String {
        match &self.spec.short_description {
            Some(label) => label.clone(),
            None => humanize(self.name),
        }
    }

    /// Computes the cell for one row.
    pub fn render(&self, row: &R) -> Result<Cell> {
        (self.handler)(row)
    }

    /// Sets the header label.
    pub fn short_description(mut self, label: impl Into<String>) -> Self {
        self.spec.short_description = Some(label.into());
        self
    }

    /// Names the database column the host may sort by.
    pub fn order_field(mut self, field: impl Into<String>) -> Self {
        self.spec.order_field = Some(field.into());
        self
    }

    /// Flags the value for boolean (checkmark) rendering.
    pub fn boolean(mut self) -> Self {
        self.spec.boolean = Some(true);
        self
    }

    /// Applies every set field of `overlay` in one call.
    ///
    /// Fields the overlay leaves unset keep their current value.
    pub fn with_spec(mut self, overlay: ColumnSpec) -> Self {
        self.spec.merge(overlay);
        self
    }

    /// Marks the handler's output as safe markup and flags the column so
    /// the host skips escaping it.
    pub fn allow_tags(mut self) -> Self {
        self.spec.allow_markup = Some(true);
        let inner = self.handler;
        self.handler = Box::new(move |row| Ok(Cell::Markup(Markup::raw(inner(row)?.into_string()))));
        self
    }

    /// Truncates the handler's output to at most `max_len` characters.
    ///
    /// Panics when `max_len` leaves no room for the ellipsis (3 or less).
    pub fn limit_width(mut self, max_len: usize) -> Self {
        assert!(
            max_len > ELLIPSIS.len(),
            "limit_width maximum must exceed the {}-character ellipsis",
            ELLIPSIS.len()
        );
        let inner = self.handler;
        self.handler = Box::new(move |row| {
            Ok(Cell::Text(truncate_chars(&inner(row)?.into_string(), max_len)))
        });
        self
    }

    /// Pipes the handler's output through a template fragment.
    ///
    /// The fragment sees the current value as `value`; the template is
    /// compiled here, once, and syntax errors surface immediately.
    ///
    /// ```rust
    /// use vitrine::Column;
    ///
    /// struct Repo { url: String }
    ///
    /// let column = Column::new("object_url", |repo: &Repo| repo.url.clone())
    ///     .format_output("{{ value|urlencode }}")
    ///     .unwrap()
    ///     .allow_tags();
    /// ```
    pub fn format_output(mut self, source: &str) -> Result<Self> {
        let template = OutputTemplate::new(source)?;
        let inner = self.handler;
        self.handler = Box::new(move |row| {
            let value = inner(row)?.into();
            Ok(Cell::Text(template.render(value)?))
        });
        Ok(self)
    }

    /// Applies a single template filter to the handler's output.
    ///
    /// Sugar for `format_output("{{ value|<filter> }}")`.
    ///
    /// ```rust
    /// use vitrine::Column;
    ///
    /// struct Repo { description: String }
    ///
    /// let column = Column::new("description", |repo: &Repo| repo.description.clone())
    ///     .apply_filter("capitalize")
    ///     .unwrap();
    /// ```
    pub fn apply_filter(self, filter: &str) -> Result<Self> {
        self.format_output(&filter_expr(filter))
    }

    /// Renders the value as an anchor pointing at itself, marked safe.
    pub fn external_url(self) -> Result<Self> {
        Ok(self.format_output(EXTERNAL_URL_TEMPLATE)?.allow_tags())
    }
}

/// Truncates `text` to at most `max_len` characters, ellipsis included.
///
/// Strings shorter than `max_len` come back unchanged; anything at or over
/// the limit keeps its first `max_len - 3` characters followed by `"..."`.
pub fn truncate_chars(text: &str, max_len: usize) -> String {
    assert!(
        max_len > ELLIPSIS.len(),
        "truncation maximum must exceed the {}-character ellipsis",
        ELLIPSIS.len()
    );
    if text.chars().count() < max_len {
        return text.to_string();
    }
    let prefix: String = text.chars().take(max_len - ELLIPSIS.len()).collect();
    format!("{prefix}{ELLIPSIS}")
}

fn humanize(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

/// The ordered set of columns a host renders for a listing.
///
/// Adding a column under a name that is already present replaces the
/// previous one.
pub struct ListDisplay<R> {
    columns: Vec<Column<R>>,
}

impl<R: 'static> ListDisplay<R> {
    pub fn new() -> Self {
        Self { columns: Vec::new() }
    }

    /// Registers a column, returning the display for chaining.
    pub fn add(mut self, column: Column<R>) -> Self {
        match self.columns.iter().position(|c| c.name == column.name) {
            Some(i) => self.columns[i] = column,
            None => self.columns.push(column),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Header labels in registration order.
    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(Column::header).collect()
    }

    /// Computes every cell for one row, in registration order.
    pub fn render_row(&self, row: &R) -> Result<Vec<Cell>> {
        self.columns.iter().map(|c| c.render(row)).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<R: 'static> Default for ListDisplay<R> {
    fn default() -> Self {
        Self::new()
    }
}

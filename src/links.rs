//! Links into other admin views.
//!
//! An [`AdminUrl`] column renders an anchor whose href is a reversed route
//! plus a query string. The handler does not build the URL itself: it
//! returns [`LinkParams`] — which route to reverse, with which arguments,
//! and which extra pairs to carry in the query string — and the column does
//! the rest:
//!
//! 1. reverse the route (the handler may override the configured name);
//! 2. percent-encode every query pair;
//! 3. merge them into the reversed path, appending to an existing query
//!    string when the path already has one;
//! 4. wrap the result in an anchor, marked as safe markup.
//!
//! ```rust
//! use std::sync::Arc;
//! use vitrine::{AdminUrl, LinkParams, RouteTable};
//!
//! struct Widget { shelf_id: u32 }
//!
//! let routes = Arc::new(RouteTable::new().route("widget-changelist", "/admin/widgets/"));
//!
//! let column = AdminUrl::new(routes, "widget-changelist")
//!     .display_text("same shelf")
//!     .column("same_shelf", |widget: &Widget| {
//!         LinkParams::new().param("shelf__id__exact", widget.shelf_id.to_string())
//!     });
//!
//! let cell = column.render(&Widget { shelf_id: 3 }).unwrap();
//! assert_eq!(
//!     cell.as_str(),
//!     r#"<a href="/admin/widgets/?shelf__id__exact=3">same shelf</a>"#
//! );
//! ```
//!
//! Reversal failures come back unmodified from the [`UrlReverser`]; nothing
//! is caught or translated here.

use std::collections::BTreeMap;
use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::debug;

use crate::column::{Cell, Column, ColumnSpec};
use crate::error::Result;
use crate::markup::Markup;
use crate::routes::{ReverseRequest, UrlReverser};

/// Everything except unreserved characters gets percent-encoded.
const QUERY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// What one link handler wants in its href.
///
/// The reversal fields (`view_name`, `urlconf`, `arg`/`kwarg`,
/// `current_app`) configure the route lookup; every [`param`] pair lands in
/// the query string instead, in insertion order.
///
/// [`param`]: LinkParams::param
#[derive(Debug, Clone, Default)]
pub struct LinkParams {
    pub(crate) view_name: Option<String>,
    pub(crate) urlconf: Option<String>,
    pub(crate) args: Vec<String>,
    pub(crate) kwargs: BTreeMap<String, String>,
    pub(crate) current_app: Option<String>,
    pub(crate) query: Vec<(String, String)>,
}

impl LinkParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the route name the column was configured with.
    pub fn view_name(mut self, name: impl Into<String>) -> Self {
        self.view_name = Some(name.into());
        self
    }

    /// Names an alternate routing config for reversers that carry several.
    pub fn urlconf(mut self, urlconf: impl Into<String>) -> Self {
        self.urlconf = Some(urlconf.into());
        self
    }

    /// Appends a positional pattern argument.
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Sets a named pattern argument.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.kwargs.insert(name.into(), value.into());
        self
    }

    /// Marks the active sub-application for namespaced lookups.
    pub fn current_app(mut self, app: impl Into<String>) -> Self {
        self.current_app = Some(app.into());
        self
    }

    /// Appends a query-string pair.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// A configured link column factory: route name, optional display text,
/// and the reverser to resolve against.
pub struct AdminUrl {
    routes: Arc<dyn UrlReverser>,
    view_name: String,
    display_text: Option<String>,
}

impl AdminUrl {
    pub fn new(routes: Arc<dyn UrlReverser>, view_name: impl Into<String>) -> Self {
        Self {
            routes,
            view_name: view_name.into(),
            display_text: None,
        }
    }

    /// Fixed anchor text. Without it, the anchor shows the URL itself.
    pub fn display_text(mut self, text: impl Into<String>) -> Self {
        self.display_text = Some(text.into());
        self
    }

    /// Builds the anchor for one set of link parameters.
    pub fn render(&self, params: LinkParams) -> Result<Markup> {
        let request = ReverseRequest {
            view_name: params.view_name.unwrap_or_else(|| self.view_name.clone()),
            urlconf: params.urlconf,
            args: params.args,
            kwargs: params.kwargs,
            current_app: params.current_app,
        };
        let resolved = self.routes.reverse(&request)?;
        let url = merge_query(&resolved, &params.query);
        let text = self.display_text.as_deref().unwrap_or(&url);
        debug!(view = %request.view_name, url = %url, "built admin link");
        Ok(Markup::raw(format!(r#"<a href="{url}">{text}</a>"#)))
    }

    /// Wraps a handler returning [`LinkParams`] into a markup column.
    pub fn column<R, F>(self, name: &'static str, params_fn: F) -> Column<R>
    where
        R: 'static,
        F: Fn(&R) -> LinkParams + Send + Sync + 'static,
    {
        let spec = ColumnSpec::new().allow_markup(true);
        Column::from_handler(
            name,
            spec,
            Box::new(move |row| Ok(Cell::Markup(self.render(params_fn(row))?))),
        )
    }
}

fn encode(text: &str) -> String {
    utf8_percent_encode(text, QUERY_SET).to_string()
}

fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Merges `pairs` into `url`'s query string.
///
/// With no pairs the URL passes through untouched. An existing query
/// string gets the new pairs appended after a `&`; otherwise the path gains
/// a fresh `?`. A URL with an empty path degrades to `/`.
fn merge_query(url: &str, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return url.to_string();
    }
    let mut querystring = encode_pairs(pairs);
    let (path, existing) = match url.split_once('?') {
        Some((path, existing)) => (path, Some(existing)),
        None => (url, None),
    };
    if let Some(existing) = existing {
        if !existing.is_empty() {
            querystring = format!("{existing}&{querystring}");
        }
    }
    if path.is_empty() {
        format!("/?{querystring}")
    } else {
        format!("{path}?{querystring}")
    }
}

//! # Vitrine
//!
//! Display helpers for the computed, non-persisted columns an admin-style
//! UI shows in list views and detail pages. The host framework owns the
//! page; vitrine owns the description of each column — what to call it,
//! what to sort it by, whether its value is safe markup — and the small
//! value transformations (truncation, template filters, link building)
//! that sit between a row accessor and the rendered cell.
//!
//! ## The Shape
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host rendering layer (not this crate)                      │
//! │  - Iterates a ListDisplay, reads each ColumnSpec            │
//! │  - Escapes Text cells, inserts Markup cells verbatim        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Columns (column.rs)                                        │
//! │  - ColumnSpec: label, sort field, boolean + markup flags    │
//! │  - Column: spec + stacked value transformations             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Delegates                                                  │
//! │  - output.rs: minijinja fragments ({{ value|filter }})      │
//! │  - links.rs + routes.rs: reverse routing, query strings     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every column render is synchronous, stateless and reentrant: templates
//! and route tables are built once, when the column is built, and only
//! read afterwards.
//!
//! ## Quick Example
//!
//! ```rust
//! use std::sync::Arc;
//! use vitrine::{AdminUrl, Column, LinkParams, ListDisplay, RouteTable};
//!
//! struct Widget {
//!     name: String,
//!     homepage: String,
//!     shelf_id: u32,
//! }
//!
//! let routes = Arc::new(RouteTable::new().route("widget-changelist", "/admin/widgets/"));
//!
//! let display = ListDisplay::new()
//!     .add(
//!         Column::new("name", |widget: &Widget| widget.name.clone())
//!             .short_description("Widget")
//!             .order_field("name")
//!             .limit_width(40),
//!     )
//!     .add(
//!         Column::new("homepage", |widget: &Widget| widget.homepage.clone())
//!             .external_url()
//!             .unwrap(),
//!     )
//!     .add(
//!         AdminUrl::new(routes, "widget-changelist")
//!             .display_text("same shelf")
//!             .column("same_shelf", |widget: &Widget| {
//!                 LinkParams::new().param("shelf__id__exact", widget.shelf_id.to_string())
//!             }),
//!     );
//!
//! let widget = Widget {
//!     name: "flux capacitor".into(),
//!     homepage: "example.com".into(),
//!     shelf_id: 3,
//! };
//! let cells = display.render_row(&widget).unwrap();
//! assert_eq!(cells[0].as_str(), "flux capacitor");
//! assert!(cells[2].as_str().contains("/admin/widgets/?shelf__id__exact=3"));
//! ```
//!
//! ## Module Overview
//!
//! - [`column`]: the descriptor record, the column builder, [`ListDisplay`]
//! - [`markup`]: the safe-markup classification ([`Markup`], [`mark_safe`])
//! - [`output`]: template-driven output formatting
//! - [`links`]: anchors into other admin views ([`AdminUrl`])
//! - [`routes`]: the reverse-routing seam ([`UrlReverser`], [`RouteTable`])
//! - [`error`]: error types

pub mod column;
pub mod error;
pub mod links;
pub mod markup;
pub mod output;
pub mod routes;

pub use column::{truncate_chars, Cell, Column, ColumnSpec, ListDisplay};
pub use error::{Result, VitrineError};
pub use links::{AdminUrl, LinkParams};
pub use markup::{mark_safe, Markup};
pub use output::{filter_expr, OutputTemplate};
pub use routes::{ReverseRequest, RouteTable, UrlReverser};

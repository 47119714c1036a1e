//! URL reversal.
//!
//! Link columns turn a route name back into a concrete path. The
//! [`UrlReverser`] trait is the seam where the host application plugs in
//! whatever routing layer it already has; [`RouteTable`] is a small
//! register-and-reverse implementation for applications without one (and
//! for tests).
//!
//! ```rust
//! use vitrine::{ReverseRequest, RouteTable, UrlReverser};
//!
//! let routes = RouteTable::new().route("user-detail", "/users/{id}/");
//!
//! let mut request = ReverseRequest::new("user-detail");
//! request.kwargs.insert("id".to_string(), "123".to_string());
//! assert_eq!(routes.reverse(&request).unwrap(), "/users/123/");
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::error::{Result, VitrineError};

/// Arguments for one reverse-routing call.
///
/// These are the reserved fields a link handler may override: the route
/// name, an alternate routing config, positional and named pattern
/// arguments, and the active sub-application.
#[derive(Debug, Clone, Default)]
pub struct ReverseRequest {
    pub view_name: String,
    pub urlconf: Option<String>,
    pub args: Vec<String>,
    pub kwargs: BTreeMap<String, String>,
    pub current_app: Option<String>,
}

impl ReverseRequest {
    pub fn new(view_name: impl Into<String>) -> Self {
        Self {
            view_name: view_name.into(),
            ..Self::default()
        }
    }
}

/// Host-provided reverse routing: a named route plus arguments in, a URL
/// path out.
///
/// Implementations report failures (unknown name, argument mismatch)
/// through the crate error type; callers propagate them unmodified.
pub trait UrlReverser: Send + Sync {
    fn reverse(&self, request: &ReverseRequest) -> Result<String>;
}

/// A flat name-to-pattern table.
///
/// Patterns carry `{param}` placeholders, filled from the request's kwargs
/// first and its positional args in order after that. A request naming a
/// `current_app` is first tried under the `app:view-name` namespace, then
/// under the bare name. A single table has no second routing config, so
/// `urlconf` overrides are left to [`UrlReverser`] implementations that
/// have one.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `pattern` under `name`, replacing any previous pattern.
    pub fn route(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.routes.insert(name.into(), pattern.into());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn lookup(&self, request: &ReverseRequest) -> Option<(&str, &str)> {
        if let Some(app) = &request.current_app {
            let namespaced = format!("{}:{}", app, request.view_name);
            if let Some((name, pattern)) = self.routes.get_key_value(namespaced.as_str()) {
                return Some((name.as_str(), pattern.as_str()));
            }
        }
        self.routes
            .get_key_value(request.view_name.as_str())
            .map(|(name, pattern)| (name.as_str(), pattern.as_str()))
    }
}

impl UrlReverser for RouteTable {
    fn reverse(&self, request: &ReverseRequest) -> Result<String> {
        let (name, pattern) = self
            .lookup(request)
            .ok_or_else(|| VitrineError::UnknownRoute(request.view_name.clone()))?;

        let mismatch = |detail: String| VitrineError::ReverseMismatch {
            name: name.to_string(),
            detail,
        };

        let mut url = String::with_capacity(pattern.len());
        let mut positional = request.args.iter();
        let mut used_kwargs: HashSet<&str> = HashSet::new();
        let mut rest = pattern;

        while let Some(open) = rest.find('{') {
            let (literal, tail) = rest.split_at(open);
            url.push_str(literal);
            let close = tail
                .find('}')
                .ok_or_else(|| mismatch("unclosed '{' in pattern".to_string()))?;
            let param = &tail[1..close];
            let value = match request.kwargs.get(param) {
                Some(value) => {
                    used_kwargs.insert(param);
                    value.as_str()
                }
                None => positional
                    .next()
                    .map(String::as_str)
                    .ok_or_else(|| mismatch(format!("missing argument '{}'", param)))?,
            };
            url.push_str(value);
            rest = &tail[close + 1..];
        }
        url.push_str(rest);

        if positional.next().is_some() {
            return Err(mismatch("too many positional arguments".to_string()));
        }
        if used_kwargs.len() != request.kwargs.len() {
            let unused: Vec<&str> = request
                .kwargs
                .keys()
                .map(String::as_str)
                .filter(|key| !used_kwargs.contains(key))
                .collect();
            return Err(mismatch(format!(
                "unused keyword arguments: {}",
                unused.join(", ")
            )));
        }

        debug!(route = name, url = %url, "reversed route");
        Ok(url)
    }
}

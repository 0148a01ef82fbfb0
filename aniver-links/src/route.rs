// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Route matching for the two establishment URL shapes.
//!
//! Patterns use the `/literal/:param` notation of client-side routers and are
//! compiled into anchored regular expressions with one named group per
//! parameter.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::{
    error::Error,
    url::{LEGACY_SEGMENT, LookupKey, parse_url},
};

/// Route pattern for identifier-based legacy links.
pub const LEGACY_PATTERN: &str = "/estabelecimento/:id";
/// Route pattern for canonical establishment pages.
pub const CANONICAL_PATTERN: &str = "/:estado/:cidade/:slug";

static LEGACY_ROUTE: LazyLock<Option<RoutePattern,>,> =
    LazyLock::new(|| RoutePattern::new(LEGACY_PATTERN,).ok(),);
static CANONICAL_ROUTE: LazyLock<Option<RoutePattern,>,> =
    LazyLock::new(|| RoutePattern::new(CANONICAL_PATTERN,).ok(),);

/// Compiled `/literal/:param` route pattern.
#[derive(Debug, Clone,)]
pub struct RoutePattern
{
    pattern: String,
    regex:   Regex,
    params:  Vec<String,>,
}

impl RoutePattern
{
    /// Compiles a route pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the pattern does not start with `/`,
    /// contains an empty segment or an unnamed parameter.
    pub fn new(pattern: &str,) -> Result<Self, Error,>
    {
        let body = pattern
            .strip_prefix('/',)
            .ok_or_else(|| Error::validation(format!("route '{pattern}' must start with '/'"),),)?;

        let mut expression = String::from("^",);
        let mut params = Vec::new();

        for segment in body.split('/',) {
            if segment.is_empty() {
                return Err(Error::validation(format!("route '{pattern}' has an empty segment"),),);
            }

            expression.push('/',);
            match segment.strip_prefix(':',) {
                Some(name,) => {
                    if name.is_empty() {
                        return Err(Error::validation(format!(
                            "route '{pattern}' has an unnamed parameter"
                        ),),);
                    }
                    expression.push_str(&format!("(?P<{name}>[^/]+)"),);
                    params.push(name.to_owned(),);
                }
                None => expression.push_str(&regex::escape(segment,),),
            }
        }
        expression.push('$',);

        let regex = Regex::new(&expression,)
            .map_err(|e| Error::validation(format!("invalid route '{pattern}': {e}"),),)?;

        Ok(Self {
            pattern: pattern.to_owned(),
            regex,
            params,
        },)
    }

    /// Returns the source pattern.
    pub fn as_str(&self,) -> &str
    {
        &self.pattern
    }

    /// Matches a bare path and returns the captured parameters.
    pub fn captures(&self, path: &str,) -> Option<HashMap<String, String,>,>
    {
        let captures = self.regex.captures(path,)?;
        let mut values = HashMap::with_capacity(self.params.len(),);
        for name in &self.params {
            let value = captures.name(name,)?;
            values.insert(name.clone(), value.as_str().to_owned(),);
        }
        Some(values,)
    }
}

/// Establishment route recognized from a request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Route
{
    /// `/estabelecimento/:id`, to be redirected to the canonical form.
    Legacy
    {
        /// Identifier captured from the path.
        id: String,
    },
    /// `/:estado/:cidade/:slug`, rendered directly.
    Canonical(LookupKey,),
}

/// Matches a request path against the legacy and canonical patterns.
///
/// Query strings, fragments and a single trailing slash are ignored. The
/// legacy pattern is tried first so `/estabelecimento/...` never resolves as
/// a canonical page.
///
/// # Examples
///
/// ```
/// use aniver_links::{Route, match_route};
///
/// assert_eq!(
///     match_route("/estabelecimento/abc123?ref=share",),
///     Some(Route::Legacy {
///         id: "abc123".to_owned(),
///     },)
/// );
/// assert!(match_route("/explorar",).is_none());
/// ```
pub fn match_route(path: &str,) -> Option<Route,>
{
    let bare = strip_path(path,);

    if let Some(mut params,) = LEGACY_ROUTE.as_ref()?.captures(bare,) {
        return params.remove("id",).map(|id| Route::Legacy {
            id,
        },);
    }

    let params = CANONICAL_ROUTE.as_ref()?.captures(bare,)?;
    if params.get("estado",).map(String::as_str,) == Some(LEGACY_SEGMENT,) {
        return None;
    }

    Some(Route::Canonical(parse_url(
        params.get("estado",)?,
        params.get("cidade",)?,
        params.get("slug",)?,
    ),),)
}

fn strip_path(path: &str,) -> &str
{
    let end = path.find(['?', '#',],).unwrap_or(path.len(),);
    let bare = &path[..end];
    if bare.len() > 1 { bare.strip_suffix('/',).unwrap_or(bare,) } else { bare }
}

// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Canonical and legacy path construction for establishment pages.
//!
//! Two URL shapes are externally observable and must stay stable for
//! bookmarked, shared and indexed links:
//!
//! * canonical: `/{estado}/{cidade-slug}/{slug}`, e.g. `/sp/sao-paulo/loja-x`
//! * legacy: `/estabelecimento/{id}`
//!
//! Both generators are pure functions of their inputs.

use serde::{Deserialize, Serialize};

use crate::slug::normalize;

/// Leading path segment of the identifier-based legacy URL.
pub const LEGACY_SEGMENT: &str = "estabelecimento";

/// Minimal establishment record needed to compute either URL form.
///
/// Instances are read-only projections of backend records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct EstablishmentRef
{
    /// Stable opaque identifier, always present.
    pub id:     String,
    /// Two-letter state code.
    #[serde(default)]
    pub estado: Option<String,>,
    /// City display name.
    #[serde(default)]
    pub cidade: Option<String,>,
    /// Pre-normalized slug, unique within the city and state.
    #[serde(default)]
    pub slug:   Option<String,>,
}

impl EstablishmentRef
{
    /// Returns the canonical path when estado, cidade and slug are all set.
    pub fn canonical_path(&self,) -> Option<String,>
    {
        canonical_path(
            self.estado.as_deref(),
            self.cidade.as_deref(),
            self.slug.as_deref(),
        )
    }
}

/// Lookup key reconstructed from the segments of a canonical URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize,)]
pub struct LookupKey
{
    /// Upper-cased state code.
    pub estado: String,
    /// City segment exactly as it appeared in the path.
    pub cidade: String,
    /// Slug segment exactly as it appeared in the path.
    pub slug:   String,
}

/// Builds the preferred path for an establishment.
///
/// Falls back to the legacy identifier path whenever estado, cidade or slug
/// is missing or blank, or the city has no slug-worthy characters. The city
/// segment goes through [`normalize`]; the slug is used verbatim.
///
/// # Examples
///
/// ```
/// use aniver_links::{EstablishmentRef, build_url};
///
/// let canonical = EstablishmentRef {
///     id:     "abc123".to_owned(),
///     estado: Some("SP".to_owned(),),
///     cidade: Some("São Paulo".to_owned(),),
///     slug:   Some("loja-x".to_owned(),),
/// };
/// assert_eq!(build_url(&canonical,), "/sp/sao-paulo/loja-x");
///
/// let legacy = EstablishmentRef {
///     id: "abc123".to_owned(), estado: None, cidade: None, slug: None,
/// };
/// assert_eq!(build_url(&legacy,), "/estabelecimento/abc123");
/// ```
pub fn build_url(establishment: &EstablishmentRef,) -> String
{
    establishment.canonical_path().unwrap_or_else(|| legacy_path(&establishment.id,),)
}

/// Builds `/{lower(estado)}/{normalize(cidade)}/{slug}` when every segment
/// is present and non-blank.
///
/// A city whose slug normalizes to nothing (punctuation or non-Latin text
/// only) counts as missing, so no path with an empty segment is produced.
pub fn canonical_path(
    estado: Option<&str,>,
    cidade: Option<&str,>,
    slug: Option<&str,>,
) -> Option<String,>
{
    let estado = estado.map(str::trim,).filter(|value| !value.is_empty(),)?;
    let cidade = cidade.map(normalize,).filter(|value| !value.is_empty(),)?;
    let slug = slug.filter(|value| !value.trim().is_empty(),)?;

    Some(format!("/{}/{}/{}", estado.to_lowercase(), cidade, slug),)
}

/// Builds the identifier-based legacy path.
pub fn legacy_path(id: &str,) -> String
{
    format!("/{LEGACY_SEGMENT}/{id}")
}

/// Reconstructs a lookup key from canonical route segments.
///
/// Only the state code is case-normalized; city and slug already arrive in
/// canonical form and are passed through unchanged.
///
/// # Examples
///
/// ```
/// use aniver_links::parse_url;
///
/// let key = parse_url("sp", "sao-paulo", "loja-x",);
/// assert_eq!(key.estado, "SP");
/// assert_eq!(key.cidade, "sao-paulo");
/// ```
pub fn parse_url(estado: &str, cidade: &str, slug: &str,) -> LookupKey
{
    LookupKey {
        estado: estado.to_uppercase(),
        cidade: cidade.to_owned(),
        slug:   slug.to_owned(),
    }
}

// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Establishment lookup collaborators and the file-backed catalog.

use std::{fs, future::Future, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{self, Error},
    slug::normalize,
    url::{EstablishmentRef, LookupKey, canonical_path},
};

/// Location columns returned by a lookup by establishment id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize,)]
pub struct EstablishmentLocation
{
    /// State code.
    #[serde(default)]
    pub estado: Option<String,>,
    /// City display name.
    #[serde(default)]
    pub cidade: Option<String,>,
    /// Establishment slug.
    #[serde(default)]
    pub slug:   Option<String,>,
}

impl EstablishmentLocation
{
    /// Canonical path for this location, or `None` when a segment is
    /// missing or blank.
    pub fn canonical_path(&self,) -> Option<String,>
    {
        canonical_path(self.estado.as_deref(), self.cidade.as_deref(), self.slug.as_deref(),)
    }
}

impl From<&EstablishmentRef,> for EstablishmentLocation
{
    fn from(establishment: &EstablishmentRef,) -> Self
    {
        Self {
            estado: establishment.estado.clone(),
            cidade: establishment.cidade.clone(),
            slug:   establishment.slug.clone(),
        }
    }
}

/// Backend query by establishment id.
///
/// `Ok(None)` means no row matched; `Err` means the backend could not answer.
pub trait EstablishmentLookup
{
    /// Fetches the location columns for the establishment with `id`.
    fn find_location(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<EstablishmentLocation,>, Error,>,> + Send;
}

/// Root document of a catalog file.
///
/// # Examples
///
/// ```
/// use aniver_links::Catalog;
///
/// let yaml = r#"
/// establishments:
///   - id: abc123
///     estado: SP
///     cidade: São Paulo
///     slug: loja-x
/// "#;
/// let catalog: Catalog = serde_yaml::from_str(yaml,).expect("valid catalog",);
/// assert_eq!(catalog.establishments.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize,)]
pub struct Catalog
{
    /// Establishment records.
    #[serde(default)]
    pub establishments: Vec<EstablishmentRef,>,
}

/// Loads a catalog from a YAML or JSON file.
///
/// # Errors
///
/// Returns an [`Error`] when the file cannot be read or decoded, or when a
/// record has an empty id.
pub fn load_catalog(path: &Path,) -> Result<Catalog, Error,>
{
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    parse_catalog(&contents,)
}

/// Parses a catalog from a YAML document. JSON input is accepted as well,
/// being a subset of YAML.
///
/// # Errors
///
/// Propagates [`Error::Parse`] for malformed documents and returns
/// [`Error::Validation`] for records with an empty id.
pub fn parse_catalog(contents: &str,) -> Result<Catalog, Error,>
{
    let catalog: Catalog = serde_yaml::from_str(contents,)?;
    if let Some(position,) =
        catalog.establishments.iter().position(|record| record.id.trim().is_empty(),)
    {
        return Err(Error::validation(format!("establishment #{position} has an empty id"),),);
    }
    Ok(catalog,)
}

/// In-memory lookup over a [`Catalog`].
#[derive(Debug, Clone, Default,)]
pub struct CatalogLookup
{
    catalog: Catalog,
}

impl CatalogLookup
{
    /// Wraps a loaded catalog.
    pub fn new(catalog: Catalog,) -> Self
    {
        Self {
            catalog,
        }
    }

    /// Returns the record with the given id.
    pub fn find_by_id(&self, id: &str,) -> Option<&EstablishmentRef,>
    {
        self.catalog.establishments.iter().find(|record| record.id == id,)
    }

    /// Resolves a canonical-route lookup key to its record.
    ///
    /// The state code is compared case-insensitively and the city through its
    /// normalized slug, mirroring how canonical paths are built.
    pub fn find_by_key(&self, key: &LookupKey,) -> Option<&EstablishmentRef,>
    {
        self.catalog.establishments.iter().find(|record| {
            record.slug.as_deref() == Some(key.slug.as_str(),)
                && record.estado.as_deref().is_some_and(|estado| estado.eq_ignore_ascii_case(&key.estado,),)
                && record.cidade.as_deref().is_some_and(|cidade| normalize(cidade,) == key.cidade,)
        },)
    }
}

impl EstablishmentLookup for CatalogLookup
{
    async fn find_location(&self, id: &str,) -> Result<Option<EstablishmentLocation,>, Error,>
    {
        Ok(self.find_by_id(id,).map(EstablishmentLocation::from,),)
    }
}

//! Canonical URL index over an establishment catalog.
//!
//! The index assigns every record exactly one public path and rejects
//! catalogs where two records would share an identifier or a canonical URL.
//! The resulting document is ready for JSON serialization, e.g. as sitemap
//! input.

use std::collections::HashSet;

use serde::Serialize;

use crate::{
    error::Error,
    url::{EstablishmentRef, legacy_path},
};

/// Which URL shape an index entry uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize,)]
#[serde(rename_all = "snake_case")]
pub enum PathKind
{
    /// `/{estado}/{cidade-slug}/{slug}`.
    Canonical,
    /// `/estabelecimento/{id}`, used while slug data is missing.
    Legacy,
}

/// Public path assigned to one establishment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub struct IndexEntry
{
    /// Establishment identifier.
    pub id:   String,
    /// Path produced by [`build_url`](crate::build_url).
    pub path: String,
    /// Shape of `path`.
    pub kind: PathKind,
}

/// Collision-free path assignment for a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub struct CanonicalIndex
{
    /// One entry per record, in catalog order.
    pub entries: Vec<IndexEntry,>,
}

impl CanonicalIndex
{
    /// Builds the index for the given records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when an id is empty or repeated, or when
    /// two records produce the same canonical path.
    ///
    /// # Examples
    ///
    /// ```
    /// use aniver_links::{CanonicalIndex, EstablishmentRef, PathKind};
    ///
    /// let records = vec![
    ///     EstablishmentRef {
    ///         id:     "a".to_owned(),
    ///         estado: Some("SP".to_owned(),),
    ///         cidade: Some("Santos".to_owned(),),
    ///         slug:   Some("padaria".to_owned(),),
    ///     },
    ///     EstablishmentRef {
    ///         id: "b".to_owned(), estado: None, cidade: None, slug: None,
    ///     },
    /// ];
    /// let index = CanonicalIndex::build(&records,)?;
    /// assert_eq!(index.entries[0].path, "/sp/santos/padaria");
    /// assert_eq!(index.entries[1].kind, PathKind::Legacy);
    /// # Ok::<(), aniver_links::Error>(())
    /// ```
    pub fn build(records: &[EstablishmentRef],) -> Result<Self, Error,>
    {
        let mut entries = Vec::with_capacity(records.len(),);
        let mut seen_ids = HashSet::with_capacity(records.len(),);
        let mut seen_paths = HashSet::with_capacity(records.len(),);

        for record in records {
            let id = record.id.as_str();
            if id.trim().is_empty() {
                return Err(Error::validation("establishment id cannot be empty",),);
            }
            if !seen_ids.insert(id,) {
                return Err(Error::validation(format!("duplicate establishment id '{id}'"),),);
            }

            let entry = match record.canonical_path() {
                Some(path,) => IndexEntry {
                    id: id.to_owned(),
                    path,
                    kind: PathKind::Canonical,
                },
                None => IndexEntry {
                    id:   id.to_owned(),
                    path: legacy_path(id,),
                    kind: PathKind::Legacy,
                },
            };

            if !seen_paths.insert(entry.path.clone(),) {
                return Err(Error::validation(format!(
                    "duplicate canonical path '{}' for establishment '{id}'",
                    entry.path
                ),),);
            }

            entries.push(entry,);
        }

        Ok(Self {
            entries,
        },)
    }

    /// Returns the entry for `id`.
    pub fn get(&self, id: &str,) -> Option<&IndexEntry,>
    {
        self.entries.iter().find(|entry| entry.id == id,)
    }
}

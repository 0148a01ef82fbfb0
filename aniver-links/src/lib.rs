//! Canonical URL building and legacy link redirects for establishment pages.
//!
//! Establishments offering birthday benefits are published under a canonical
//! `/{estado}/{cidade-slug}/{slug}` path. Older identifier-only links of the
//! form `/estabelecimento/{id}` stay valid: the [`RedirectResolver`] looks the
//! identifier up and replaces the history entry with the canonical URL, or
//! with the listing page when no canonical data exists.
//!
//! Backend access, navigation and telemetry are injected through the
//! [`EstablishmentLookup`], [`Navigator`] and [`Telemetry`] traits.

mod config;
mod error;
mod index;
mod lookup;
mod navigation;
mod resolver;
mod retry;
mod route;
mod slug;
mod telemetry;
mod url;

pub use config::{DEFAULT_FALLBACK_PATH, ResolverConfig, load_config, parse_config};
pub use error::{Error, io_error};
pub use index::{CanonicalIndex, IndexEntry, PathKind};
pub use lookup::{
    Catalog, CatalogLookup, EstablishmentLocation, EstablishmentLookup, load_catalog, parse_catalog,
};
pub use navigation::{History, Navigator};
pub use resolver::{RedirectResolver, ResolutionState};
pub use retry::{RetryConfig, retry_with_backoff};
pub use route::{CANONICAL_PATTERN, LEGACY_PATTERN, Route, RoutePattern, match_route};
pub use slug::{SlugStrategy, normalize};
pub use telemetry::{FallbackReason, Telemetry, TracingTelemetry};
pub use url::{
    EstablishmentRef, LEGACY_SEGMENT, LookupKey, build_url, canonical_path, legacy_path, parse_url,
};

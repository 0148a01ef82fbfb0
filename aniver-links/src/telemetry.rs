// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Observability hooks for the redirect resolver.
//!
//! Resolution outcomes are reported through an injected [`Telemetry`]
//! implementation instead of ambient global calls. [`TracingTelemetry`]
//! forwards them to `tracing`.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Error;

/// Why a resolution landed on the listing page instead of a canonical URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize,)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason
{
    /// The route carried no identifier.
    MissingIdentifier,
    /// The backend returned no row for the identifier.
    NotFound,
    /// The backend failed and retries were exhausted.
    LookupFailed,
    /// The row lacks estado, cidade or slug.
    IncompleteLocation,
}

impl FallbackReason
{
    /// Stable snake_case label for logs and metrics.
    pub fn as_str(self,) -> &'static str
    {
        match self {
            Self::MissingIdentifier => "missing_identifier",
            Self::NotFound => "not_found",
            Self::LookupFailed => "lookup_failed",
            Self::IncompleteLocation => "incomplete_location",
        }
    }
}

impl std::fmt::Display for FallbackReason
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_,>,) -> std::fmt::Result
    {
        f.write_str(self.as_str(),)
    }
}

/// Receiver of redirect resolution events.
///
/// Every method has an empty default so implementations only override what
/// they record.
pub trait Telemetry: Send + Sync
{
    /// A legacy identifier resolved to its canonical path.
    fn redirected(&self, _id: &str, _path: &str,) {}

    /// A resolution fell back to the listing page.
    fn fell_back(&self, _id: Option<&str,>, _reason: FallbackReason,) {}

    /// The backend lookup failed after all retries.
    fn lookup_failed(&self, _id: &str, _error: &Error,) {}

    /// A completed lookup was dropped because a newer request superseded it.
    fn discarded(&self, _id: &str,) {}
}

/// [`Telemetry`] implementation emitting `tracing` events.
#[derive(Debug, Clone, Copy, Default,)]
pub struct TracingTelemetry;

impl Telemetry for TracingTelemetry
{
    fn redirected(&self, id: &str, path: &str,)
    {
        info!(id, path, "redirecting legacy establishment link");
    }

    fn fell_back(&self, id: Option<&str,>, reason: FallbackReason,)
    {
        info!(id = id.unwrap_or_default(), reason = reason.as_str(), "falling back to listing page");
    }

    fn lookup_failed(&self, id: &str, error: &Error,)
    {
        warn!(id, error = %error, "establishment lookup failed");
    }

    fn discarded(&self, id: &str,)
    {
        debug!(id, "discarding stale establishment lookup");
    }
}

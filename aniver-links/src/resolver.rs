// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Redirect resolution for legacy `/estabelecimento/:id` links.
//!
//! A resolution starts in [`ResolutionState::Resolving`] and ends either in
//! [`ResolutionState::Redirected`] (replace-navigation to the canonical URL)
//! or in [`ResolutionState::Fallback`] (replace-navigation to the listing
//! page). Every failure mode lands on the fallback page; none is returned to
//! the caller.
//!
//! Each request takes a generation token. A newer identifier or a call to
//! [`RedirectResolver::cancel`] advances the generation, and a lookup that
//! completes under an outdated token is discarded without navigating. The
//! token is also checked before every lookup attempt, so a superseded
//! request stops retrying against the backend.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::{
    config::ResolverConfig,
    error::Error,
    lookup::EstablishmentLookup,
    navigation::Navigator,
    retry::retry_with_backoff,
    telemetry::{FallbackReason, Telemetry, TracingTelemetry},
};

/// Observable resolver state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResolutionState
{
    /// Lookup pending, or nothing requested yet.
    Resolving,
    /// Navigated to the canonical URL.
    Redirected
    {
        /// Canonical path that replaced the legacy URL.
        path: String,
    },
    /// Navigated to the listing page.
    Fallback
    {
        /// Listing page path.
        path:   String,
        /// Failure that caused the fallback.
        reason: FallbackReason,
    },
}

impl ResolutionState
{
    /// Navigation target of a terminal state.
    pub fn target(&self,) -> Option<&str,>
    {
        match self {
            Self::Resolving => None,
            Self::Redirected {
                path,
            }
            | Self::Fallback {
                path, ..
            } => Some(path.as_str(),),
        }
    }
}

#[derive(Debug,)]
struct Slot
{
    generation: u64,
    /// Identifier of the active request; empty when the route had none.
    identifier: Option<String,>,
    state:      ResolutionState,
}

/// Resolves legacy identifiers to canonical URLs and navigates there.
///
/// # Examples
///
/// ```
/// use aniver_links::{
///     Catalog, CatalogLookup, EstablishmentRef, History, RedirectResolver, ResolverConfig,
/// };
///
/// # async fn example() {
/// let catalog = Catalog {
///     establishments: vec![EstablishmentRef {
///         id:     "abc123".to_owned(),
///         estado: Some("SP".to_owned(),),
///         cidade: Some("São Paulo".to_owned(),),
///         slug:   Some("loja-x".to_owned(),),
///     }],
/// };
/// let history = History::new("/estabelecimento/abc123",);
/// let resolver =
///     RedirectResolver::new(CatalogLookup::new(catalog,), &history, ResolverConfig::default(),);
///
/// resolver.resolve(Some("abc123",),).await;
/// assert_eq!(history.current().as_deref(), Some("/sp/sao-paulo/loja-x"));
/// # }
/// ```
#[derive(Debug,)]
pub struct RedirectResolver<L, N, T = TracingTelemetry,>
{
    lookup:    L,
    navigator: N,
    telemetry: T,
    config:    ResolverConfig,
    slot:      Mutex<Slot,>,
}

impl<L, N,> RedirectResolver<L, N, TracingTelemetry,>
where
    L: EstablishmentLookup,
    N: Navigator,
{
    /// Creates a resolver reporting through [`TracingTelemetry`].
    pub fn new(lookup: L, navigator: N, config: ResolverConfig,) -> Self
    {
        Self::with_telemetry(lookup, navigator, TracingTelemetry, config,)
    }
}

impl<L, N, T,> RedirectResolver<L, N, T,>
where
    L: EstablishmentLookup,
    N: Navigator,
    T: Telemetry,
{
    /// Creates a resolver reporting through the given telemetry collaborator.
    pub fn with_telemetry(lookup: L, navigator: N, telemetry: T, config: ResolverConfig,) -> Self
    {
        Self {
            lookup,
            navigator,
            telemetry,
            config,
            slot: Mutex::new(Slot {
                generation: 0,
                identifier: None,
                state:      ResolutionState::Resolving,
            },),
        }
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self,) -> ResolutionState
    {
        self.slot().state.clone()
    }

    /// Resolves `id` and issues a replace-navigation.
    ///
    /// Runs once per distinct identifier: repeating the identifier of the
    /// active request neither looks it up again nor navigates again. Returns
    /// the resolver state after the call, which is still
    /// [`ResolutionState::Resolving`] when this request was superseded.
    pub async fn resolve(&self, id: Option<&str,>,) -> ResolutionState
    {
        let id = id.map(str::trim,).unwrap_or_default();
        let Some(generation,) = self.begin(id,) else {
            return self.state();
        };

        if id.is_empty() {
            return self.fall_back(generation, None, FallbackReason::MissingIdentifier,);
        }

        let lookup = retry_with_backoff(&self.config.retry, "establishment lookup", || async move {
            if !self.is_current(generation,) {
                return Err(Error::Superseded,);
            }
            self.lookup.find_location(id,).await
        },)
        .await;

        match lookup {
            Ok(Some(location,),) => match location.canonical_path() {
                Some(path,) => self.redirect(generation, id, path,),
                None => self.fall_back(generation, Some(id,), FallbackReason::IncompleteLocation,),
            },
            Ok(None,) => self.fall_back(generation, Some(id,), FallbackReason::NotFound,),
            Err(Error::Superseded,) => {
                self.telemetry.discarded(id,);
                self.state()
            }
            Err(error,) => {
                self.telemetry.lookup_failed(id, &error,);
                self.fall_back(generation, Some(id,), FallbackReason::LookupFailed,)
            }
        }
    }

    /// Invalidates any in-flight lookup, as when the view unmounts.
    ///
    /// The next [`resolve`](Self::resolve) call starts a fresh request even
    /// for the same identifier.
    pub fn cancel(&self,)
    {
        let mut slot = self.slot();
        slot.generation += 1;
        slot.identifier = None;
    }

    fn is_current(&self, generation: u64,) -> bool
    {
        self.slot().generation == generation
    }

    /// Registers a new request, or returns `None` when `id` is already the
    /// active one.
    fn begin(&self, id: &str,) -> Option<u64,>
    {
        let mut slot = self.slot();
        if slot.identifier.as_deref() == Some(id,) {
            return None;
        }
        slot.generation += 1;
        slot.identifier = Some(id.to_owned(),);
        slot.state = ResolutionState::Resolving;
        Some(slot.generation,)
    }

    fn redirect(&self, generation: u64, id: &str, path: String,) -> ResolutionState
    {
        let state = ResolutionState::Redirected {
            path: path.clone(),
        };
        if !self.settle(generation, &state,) {
            self.telemetry.discarded(id,);
            return self.state();
        }
        self.telemetry.redirected(id, &path,);
        self.navigator.replace(&path,);
        state
    }

    fn fall_back(
        &self,
        generation: u64,
        id: Option<&str,>,
        reason: FallbackReason,
    ) -> ResolutionState
    {
        let path = self.config.fallback_path.clone();
        let state = ResolutionState::Fallback {
            path: path.clone(),
            reason,
        };
        if !self.settle(generation, &state,) {
            self.telemetry.discarded(id.unwrap_or_default(),);
            return self.state();
        }
        self.telemetry.fell_back(id, reason,);
        self.navigator.replace(&path,);
        state
    }

    /// Stores `state` if `generation` is still current. The lock is released
    /// before navigating so a navigator may call back into the resolver.
    fn settle(&self, generation: u64, state: &ResolutionState,) -> bool
    {
        let mut slot = self.slot();
        if slot.generation != generation {
            return false;
        }
        slot.state = state.clone();
        true
    }

    fn slot(&self,) -> MutexGuard<'_, Slot,>
    {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner,)
    }
}

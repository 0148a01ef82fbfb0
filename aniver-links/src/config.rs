//! Configuration document for the redirect resolver.
//!
//! Every field is optional in YAML; omitted values fall back to the defaults
//! used by the web application (`/explorar` as the listing page and a single
//! retry for failed lookups).

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{self, Error},
    retry::RetryConfig,
};

/// Listing page used when a legacy link cannot be resolved.
pub const DEFAULT_FALLBACK_PATH: &str = "/explorar";

/// Resolver settings.
///
/// # Examples
///
/// ```
/// use aniver_links::ResolverConfig;
///
/// let yaml = r#"
/// fallback_path: /descobrir
/// retry:
///   max_attempts: 3
/// "#;
/// let config: ResolverConfig = serde_yaml::from_str(yaml,).expect("valid configuration",);
/// assert_eq!(config.fallback_path, "/descobrir");
/// assert_eq!(config.retry.max_attempts, 3);
/// assert_eq!(config.retry.initial_delay_ms, 200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize,)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig
{
    /// Path navigated to when resolution falls back.
    #[serde(alias = "fallback", alias = "fallback-path", alias = "fallbackPath")]
    pub fallback_path: String,

    /// Retry policy for failed lookups.
    pub retry: RetryConfig,
}

impl Default for ResolverConfig
{
    fn default() -> Self
    {
        Self {
            fallback_path: DEFAULT_FALLBACK_PATH.to_owned(),
            retry:         RetryConfig::default(),
        }
    }
}

impl ResolverConfig
{
    /// Checks invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the fallback path is not absolute,
    /// `max_attempts` is zero or `backoff_factor` is below `1.0`.
    pub fn validate(&self,) -> Result<(), Error,>
    {
        if !self.fallback_path.starts_with('/',) {
            return Err(Error::validation(format!(
                "fallback_path '{}' must start with '/'",
                self.fallback_path
            ),),);
        }
        if self.retry.max_attempts == 0 {
            return Err(Error::validation("retry.max_attempts must be at least 1",),);
        }
        if self.retry.backoff_factor.is_nan() || self.retry.backoff_factor < 1.0 {
            return Err(Error::validation("retry.backoff_factor must be at least 1.0",),);
        }
        Ok((),)
    }
}

/// Loads and validates resolver settings from a YAML file.
///
/// # Errors
///
/// Returns an [`Error`] when the file cannot be read, decoded or validated.
pub fn load_config(path: &Path,) -> Result<ResolverConfig, Error,>
{
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    parse_config(&contents,)
}

/// Parses and validates resolver settings from a YAML string.
///
/// An empty document yields the defaults.
///
/// # Errors
///
/// Propagates [`Error::Parse`] for malformed YAML and [`Error::Validation`]
/// for settings that violate invariants.
pub fn parse_config(contents: &str,) -> Result<ResolverConfig, Error,>
{
    let config: ResolverConfig = if contents.trim().is_empty() {
        ResolverConfig::default()
    } else {
        serde_yaml::from_str(contents,)?
    };
    config.validate()?;
    Ok(config,)
}

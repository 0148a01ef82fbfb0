#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the aniver-links crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

/// Unified error type returned by the catalog and configuration loaders, the
/// canonical index and lookup collaborators.
///
/// The redirect resolver never surfaces these values to its caller: lookup
/// failures are absorbed into a fallback navigation and only reported to the
/// telemetry collaborator.
#[derive(Debug, masterror::Error,)]
pub enum Error
{
    /// Wraps I/O errors that occur while reading catalog or config files.
    #[error("failed to read {path:?}: {source}")]
    Io
    {
        /// Location of the file being read.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse document: {source}")]
    Parse
    {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error,
    },
    /// Returned when a document or record violates invariants.
    #[error("invalid input: {message}")]
    Validation
    {
        /// Human readable message describing the validation problem.
        message: String,
    },
    /// Wraps serialization errors when writing JSON output.
    #[error("failed to serialize output: {source}")]
    Serialize
    {
        /// Underlying serialization error.
        source: serde_json::Error,
    },
    /// Failure reported by an establishment lookup backend.
    #[error("establishment lookup failed: {message}")]
    Lookup
    {
        /// Human readable message describing the backend failure.
        message: String,
    },
    /// A lookup attempt was abandoned because its request is no longer
    /// current.
    #[error("lookup superseded by a newer request")]
    Superseded,
}

impl Error
{
    /// Constructs a validation error from the provided displayable value.
    pub fn validation<M,>(message: M,) -> Self
    where
        M: Into<String,>,
    {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Constructs a lookup error from the provided displayable value.
    pub fn lookup<M,>(message: M,) -> Self
    where
        M: Into<String,>,
    {
        Self::Lookup {
            message: message.into(),
        }
    }

    /// Returns `true` for failures another attempt may get past.
    ///
    /// Only backend and I/O failures qualify; a superseded request or an
    /// invalid document fails the same way every time.
    pub fn is_retryable(&self,) -> bool
    {
        matches!(self, Self::Lookup { .. } | Self::Io { .. })
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self,) -> String
    {
        format!("{self}")
    }
}

impl From<serde_yaml::Error,> for Error
{
    fn from(source: serde_yaml::Error,) -> Self
    {
        Self::Parse {
            source,
        }
    }
}

impl From<serde_json::Error,> for Error
{
    fn from(source: serde_json::Error,) -> Self
    {
        Self::Serialize {
            source,
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
pub fn io_error(path: &Path, source: std::io::Error,) -> Error
{
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests
{
    use super::Error;

    #[test]
    fn validation_constructor_populates_message()
    {
        let error = Error::validation("something went wrong",);
        match error {
            Error::Validation {
                ref message,
            } => {
                assert_eq!(message, "something went wrong");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn lookup_constructor_formats_message()
    {
        let error = Error::lookup("connection reset",);
        assert_eq!(error.to_string(), "establishment lookup failed: connection reset");
    }

    #[test]
    fn only_backend_failures_are_retryable()
    {
        assert!(Error::lookup("timeout",).is_retryable());
        assert!(!Error::Superseded.is_retryable());
        assert!(!Error::validation("bad",).is_retryable());
    }

    #[test]
    fn to_display_string_matches_display()
    {
        let error = Error::validation("display me",);
        assert_eq!(error.to_string(), error.to_display_string());
    }

    #[test]
    fn io_error_helper_wraps_path_and_source()
    {
        let path = std::path::Path::new("/tmp/catalog.yaml",);
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing",);
        let error = super::io_error(path, io_error,);

        match error {
            Error::Io {
                path: ref stored_path,
                ref source,
            } => {
                assert_eq!(stored_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn serde_yaml_conversion_maps_to_parse_variant()
    {
        let error = serde_yaml::from_str::<usize,>("not-a-number",).unwrap_err();
        let mapped: Error = error.into();
        assert!(matches!(mapped, Error::Parse { .. }));
    }

    #[test]
    fn serde_json_conversion_maps_to_serialize_variant()
    {
        let invalid = serde_json::from_str::<serde_json::Value,>("not-json",).unwrap_err();
        let mapped: Error = invalid.into();
        assert!(matches!(mapped, Error::Serialize { .. }));
    }
}

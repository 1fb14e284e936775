//! Uniform result of a call that may substitute bundled data for a remote answer.

use serde::Serialize;
use std::fmt::Display;

/// A value that is either what the remote side produced, or a bundled
/// substitute together with the reason the substitute was used.
///
/// The reason exists for logging only and is never shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Outcome<T> {
    Fresh { value: T },
    Fallback { value: T, reason: String },
}

impl<T> Outcome<T> {
    pub fn fresh(value: T) -> Self {
        Self::Fresh { value }
    }

    /// Build a fallback outcome and log why it happened.
    pub fn fallback(value: T, reason: impl Display) -> Self {
        let reason = reason.to_string();
        tracing::warn!(%reason, "Substituting bundled data");
        Self::Fallback { value, reason }
    }

    #[must_use]
    pub fn value(&self) -> &T {
        match self {
            Self::Fresh { value } | Self::Fallback { value, .. } => value,
        }
    }

    #[must_use]
    pub fn into_value(self) -> T {
        match self {
            Self::Fresh { value } | Self::Fallback { value, .. } => value,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    #[must_use]
    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            Self::Fresh { .. } => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Fresh { value } => Outcome::Fresh { value: f(value) },
            Self::Fallback { value, reason } => Outcome::Fallback {
                value: f(value),
                reason,
            },
        }
    }
}

/// Resolve a fallible remote call into an [`Outcome`], using `fallback` on any error.
pub fn or_fallback<T, E: Display>(
    result: std::result::Result<T, E>,
    fallback: impl FnOnce() -> T,
) -> Outcome<T> {
    match result {
        Ok(value) => Outcome::fresh(value),
        Err(e) => Outcome::fallback(fallback(), e),
    }
}

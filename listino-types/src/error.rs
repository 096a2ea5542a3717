use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the listino workspace.
///
/// Per-row problems (unmapped identifiers, malformed prices) never surface as
/// errors; they are absorbed by the reconciler. What remains are catalog and
/// transport failures, provider-tagged failures, and an aggregate for
/// multi-provider runs.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ListinoError {
    /// The canonical catalog could not be read or parsed.
    #[error("catalog unavailable at {path}: {reason}")]
    CatalogUnavailable {
        /// Location of the catalog that failed to load.
        path: String,
        /// Human-readable cause.
        reason: String,
    },

    /// The price feed could not be retrieved (connect, timeout, body read).
    #[error("transport failure for {url}: {msg}")]
    Transport {
        /// Endpoint that was being fetched.
        url: String,
        /// Human-readable cause.
        msg: String,
    },

    /// The price feed answered with a non-success HTTP status.
    #[error("http status {status} from {url}")]
    Http {
        /// Endpoint that was being fetched.
        url: String,
        /// Status code returned by the server.
        status: u16,
    },

    /// Issues with the returned or expected data (undecodable payload, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual provider returned an error.
    #[error("{provider} failed: {msg}")]
    Provider {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// An individual provider exceeded the configured timeout.
    #[error("provider timed out: {provider}")]
    ProviderTimeout {
        /// Provider name that timed out.
        provider: String,
    },

    /// The overall daily run exceeded the configured deadline.
    #[error("request timed out")]
    RequestTimeout,

    /// Every registered provider failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<ListinoError>),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl ListinoError {
    /// Helper: build a `CatalogUnavailable` error.
    pub fn catalog_unavailable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CatalogUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Helper: build a `Transport` error.
    pub fn transport(url: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Provider` error with the provider name and message.
    pub fn provider(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(provider: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            provider: provider.into(),
        }
    }

    /// Returns true if retrying the same request may succeed.
    ///
    /// Connection-level failures, `429 Too Many Requests`, and any `5xx`
    /// status are transient. Everything else is returned to the caller as-is.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Flatten nested `AllProvidersFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}

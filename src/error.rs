//! Error taxonomy for the client and the batch retry policy built on it.

use thiserror::Error;

/// Errors surfaced by single-account classification. Batch orchestration is
/// the only place these are inspected for retry decisions; `check_account`
/// propagates them unmodified.
#[derive(Debug, Error)]
pub enum Error {
    /// The social API throttled one of the collector's calls. Carries the
    /// remote method name so callers can report which operation was hit.
    #[error("rate limit exceeded for social API method '{operation}'")]
    RateLimited { operation: &'static str },

    /// The account has no posts inside the configured window.
    #[error("user '{handle}' has no posts in timeline")]
    NoTimeline { handle: String },

    /// Any other social-API fault: malformed request, auth failure, account
    /// not found or suspended.
    #[error("account fetch failed: {0}")]
    AccountFetch(String),

    /// The scoring service answered with a non-2xx status.
    #[error("scoring service returned {status}: {body}")]
    Service { status: u16, body: String },

    /// Connection, timeout, or transport failure talking to the scoring
    /// service. Retryable with backoff in batch mode.
    #[error("network error: {0}")]
    Transient(#[source] reqwest::Error),

    /// Anything uncategorized. Retried like a transient fault; on retry
    /// exhaustion it is a hard failure unless the caller supplied a handler.
    #[error("unexpected error: {0}")]
    Unexpected(#[source] anyhow::Error),
}

impl Error {
    /// Stable label used when a batch yields a per-account error string.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::RateLimited { .. } => "RateLimitError",
            Error::NoTimeline { .. } => "NoTimelineError",
            Error::AccountFetch(_) => "AccountFetchError",
            Error::Service { .. } => "ServiceHttpError",
            Error::Transient(_) => "TransientNetworkError",
            Error::Unexpected(_) => "UnexpectedError",
        }
    }

    /// Permanent faults are account-specific: the batch reports them and
    /// moves on without retrying. Everything else goes through backoff.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            Error::RateLimited { .. }
                | Error::NoTimeline { .. }
                | Error::AccountFetch(_)
                | Error::Service { .. }
        )
    }
}

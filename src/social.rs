//! Interface consumed from the social network API. Authentication,
//! pagination, and wire parsing live in the implementation behind this
//! trait; the crate only depends on the three calls below.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Post, UserProfile};

/// Account identifier accepted everywhere a user is named: numeric id or
/// screen name (with or without a leading `@`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserId {
    Id(u64),
    ScreenName(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Id(id) => write!(f, "{id}"),
            UserId::ScreenName(name) => f.write_str(name),
        }
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        UserId::Id(id)
    }
}

impl From<&str> for UserId {
    fn from(name: &str) -> Self {
        UserId::ScreenName(name.to_string())
    }
}

impl From<String> for UserId {
    fn from(name: String) -> Self {
        UserId::ScreenName(name)
    }
}

/// Faults a social client can surface. Rate limiting must be
/// distinguishable; everything else is one opaque bucket.
#[derive(Debug, Error)]
pub enum SocialError {
    #[error("rate limit exceeded")]
    RateLimited,

    /// Malformed request, auth failure, account not found, suspended, etc.
    #[error("{0}")]
    Api(String),
}

/// The three operations the collector needs from the social network.
///
/// Implementations configured with `wait_on_ratelimit` should sleep through
/// rate-limit windows rather than return `SocialError::RateLimited`.
#[async_trait]
pub trait SocialApi: Send + Sync {
    /// Most recent posts by `user`, reposts included, at most `count`.
    async fn user_timeline(&self, user: &UserId, count: usize) -> Result<Vec<Post>, SocialError>;

    /// Profile lookup by identifier.
    async fn get_user(&self, user: &UserId) -> Result<UserProfile, SocialError>;

    /// Recent posts matching `query`, at most `count`.
    async fn search_recent(&self, query: &str, count: usize) -> Result<Vec<Post>, SocialError>;
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Serde support for Twitter's legacy timestamp format
/// (`Thu May 05 17:04:41 +0000 2016`).
pub mod twitter_date {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_str(&raw, FORMAT)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// The interval used to scope which posts are relevant to a scoring request.
/// Bounds are fixed at construction; both ends are strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Strict on both ends: a post created exactly at a boundary is excluded.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant > self.start && instant < self.end
    }
}

/// A single post as returned by the social API. Fields the scoring service
/// cares about beyond the named ones ride along in `extra` untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id_str: String,
    #[serde(with = "twitter_date")]
    pub created_at: DateTime<Utc>,
    pub text: String,
    pub user: UserProfile,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full profile snapshot embedded in posts or fetched directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id_str: String,
    pub screen_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Minimal identity projection used when the caller does not want the full
/// profile in the payload. Serializes to exactly these two fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id_str: String,
    pub screen_name: String,
}

impl From<&UserProfile> for AccountSummary {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id_str: profile.id_str.clone(),
            screen_name: profile.screen_name.clone(),
        }
    }
}

/// The `user` field of a payload: full profile or collapsed summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadUser {
    Full(UserProfile),
    Summary(AccountSummary),
}

impl PayloadUser {
    pub fn screen_name(&self) -> &str {
        match self {
            PayloadUser::Full(profile) => &profile.screen_name,
            PayloadUser::Summary(summary) => &summary.screen_name,
        }
    }
}

/// Request body for the scoring service. Built fresh per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationPayload {
    pub mentions: Vec<Post>,
    pub timeline: Vec<Post>,
    pub user: PayloadUser,
}

impl ClassificationPayload {
    pub fn screen_name(&self) -> &str {
        self.user.screen_name()
    }
}

/// Opaque scoring-service response (bot-likelihood scores per model),
/// passed through to the caller verbatim.
pub type ClassificationResult = Map<String, Value>;

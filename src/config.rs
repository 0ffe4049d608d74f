use crate::model::TimeWindow;

pub const DEFAULT_API_URL: &str = "https://osome-botometer.p.mashape.com";
pub const DEFAULT_API_VERSION: u32 = 2;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Which authentication flow a concrete social client should use, derived
/// from which credentials are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Consumer key/secret only.
    AppOnly,
    /// Consumer key/secret plus an access token pair.
    UserContext,
}

/// Every option the client recognizes, fixed for the lifetime of a
/// `Botometer` instance. The `with_*` methods return a modified copy, so a
/// new instance can be derived from an existing configuration without
/// mutating it.
#[derive(Debug, Clone)]
pub struct BotometerConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: Option<String>,
    pub access_token_secret: Option<String>,
    /// API-gateway key sent as `X-Mashape-Key` when present.
    pub mashape_key: Option<String>,
    pub window: TimeWindow,
    pub base_url: String,
    pub api_version: u32,
    /// When true, a concrete social client should block out rate-limit
    /// windows instead of surfacing `SocialError::RateLimited`.
    pub wait_on_ratelimit: bool,
    pub max_retries: u32,
}

impl BotometerConfig {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        window: TimeWindow,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: None,
            access_token_secret: None,
            mashape_key: None,
            window,
            base_url: DEFAULT_API_URL.to_string(),
            api_version: DEFAULT_API_VERSION,
            wait_on_ratelimit: false,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn auth_mode(&self) -> AuthMode {
        if self.access_token.is_some() && self.access_token_secret.is_some() {
            AuthMode::UserContext
        } else {
            AuthMode::AppOnly
        }
    }

    pub fn with_access_token(
        mut self,
        token: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        self.access_token = Some(token.into());
        self.access_token_secret = Some(secret.into());
        self
    }

    pub fn with_mashape_key(mut self, key: impl Into<String>) -> Self {
        self.mashape_key = Some(key.into());
        self
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_version(mut self, version: u32) -> Self {
        self.api_version = version;
        self
    }

    pub fn with_wait_on_ratelimit(mut self, wait: bool) -> Self {
        self.wait_on_ratelimit = wait;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Configuration for the social client backing a batch run: identical to
    /// this one, but waiting out rate limits so throttling stalls the batch
    /// instead of failing accounts.
    pub fn for_batch(&self) -> Self {
        self.clone().with_wait_on_ratelimit(true)
    }
}

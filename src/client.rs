use tracing::debug;

use crate::batch::{BatchOptions, BatchRun};
use crate::collector::Collector;
use crate::config::BotometerConfig;
use crate::error::Error;
use crate::model::ClassificationResult;
use crate::scoring::{HttpScoringClient, ScoringService};
use crate::social::{SocialApi, UserId};

/// Client facade tying the collector to the scoring service.
///
/// Generic over both collaborators: `S` is the social-network client the
/// caller provides, `C` defaults to the HTTP scoring client built from the
/// configuration.
pub struct Botometer<S, C = HttpScoringClient> {
    social: S,
    pub(crate) scoring: C,
    config: BotometerConfig,
}

impl<S: SocialApi> Botometer<S> {
    pub fn new(social: S, config: BotometerConfig) -> Self {
        let scoring = HttpScoringClient::new(&config);
        Self {
            social,
            scoring,
            config,
        }
    }
}

impl<S: SocialApi, C: ScoringService> Botometer<S, C> {
    /// Construct with an explicit scoring backend.
    pub fn with_scoring(social: S, scoring: C, config: BotometerConfig) -> Self {
        Self {
            social,
            scoring,
            config,
        }
    }

    pub fn config(&self) -> &BotometerConfig {
        &self.config
    }

    /// Classify a single account.
    ///
    /// Collects the in-window timeline and mentions, then submits the
    /// payload for scoring. An account with zero in-window posts cannot be
    /// scored and fails with [`Error::NoTimeline`]. All faults propagate
    /// unmodified; retry policy is batch-mode business.
    pub async fn check_account(
        &self,
        user: impl Into<UserId>,
        full_profile: bool,
    ) -> Result<ClassificationResult, Error> {
        self.check_resolved(&user.into(), full_profile).await
    }

    pub(crate) async fn check_resolved(
        &self,
        user: &UserId,
        full_profile: bool,
    ) -> Result<ClassificationResult, Error> {
        let collector = Collector::new(&self.social, self.config.window);
        let payload = collector.collect(user, full_profile).await?;

        if payload.timeline.is_empty() {
            return Err(Error::NoTimeline {
                handle: payload.screen_name().to_string(),
            });
        }

        debug!(user = %user, "scoring account");
        self.scoring.check_account(&payload).await
    }

    /// Classify a sequence of accounts, one at a time, tolerating
    /// per-account failures. See [`BatchRun`] for the consumption model.
    pub fn check_accounts<I>(&self, accounts: I, options: BatchOptions) -> BatchRun<'_, S, C>
    where
        I: IntoIterator,
        I::Item: Into<UserId>,
    {
        BatchRun::new(self, accounts, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{post, score, ts, window, MockScoring, MockSocial};
    use pretty_assertions::assert_eq;

    fn config() -> BotometerConfig {
        BotometerConfig::new("ck", "cs", window())
    }

    #[tokio::test]
    async fn test_check_account_returns_scores_verbatim() {
        let social = MockSocial::new()
            .timeline(vec![post("1", "target", ts(2016, 5, 10))])
            .search(vec![]);
        let scoring = MockScoring::new().respond(Ok(score("target")));
        let client = Botometer::with_scoring(social, scoring, config());

        let result = client.check_account("target", false).await.unwrap();
        assert_eq!(result, score("target"));
    }

    #[tokio::test]
    async fn test_empty_timeline_is_rejected_before_scoring() {
        // Mentions alone are not enough to score an account.
        let social = MockSocial::new()
            .timeline(vec![])
            .profile("quiet_user")
            .search(vec![post("10", "fan", ts(2016, 5, 12))]);
        let scoring = MockScoring::new();
        let client = Botometer::with_scoring(social, scoring, config());

        let err = client.check_account("quiet_user", false).await.unwrap_err();
        match err {
            Error::NoTimeline { handle } => assert_eq!(handle, "quiet_user"),
            other => panic!("expected NoTimeline, got {other:?}"),
        }
        assert_eq!(client.scoring.calls(), 0);
    }

    #[tokio::test]
    async fn test_scoring_faults_propagate_unmodified() {
        let social = MockSocial::new()
            .timeline(vec![post("1", "target", ts(2016, 5, 10))])
            .search(vec![]);
        let scoring = MockScoring::new().respond(Err(Error::Service {
            status: 503,
            body: "overloaded".into(),
        }));
        let client = Botometer::with_scoring(social, scoring, config());

        let err = client.check_account("target", false).await.unwrap_err();
        match err {
            Error::Service { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("expected Service, got {other:?}"),
        }
    }
}

//! Account data collection: one account in, one scoring payload out.

use tracing::debug;

use crate::error::Error;
use crate::model::{
    AccountSummary, ClassificationPayload, PayloadUser, Post, TimeWindow, UserProfile,
};
use crate::social::{SocialApi, SocialError, UserId};

/// Page sizes for the two collection calls. The window filter runs over a
/// single page; older activity is out of scope for a scoring request.
pub const TIMELINE_PAGE: usize = 200;
pub const MENTION_PAGE: usize = 100;

pub struct Collector<'a, S> {
    social: &'a S,
    window: TimeWindow,
}

impl<'a, S: SocialApi> Collector<'a, S> {
    pub fn new(social: &'a S, window: TimeWindow) -> Self {
        Self { social, window }
    }

    /// Assemble the `{mentions, timeline, user}` payload for one account.
    ///
    /// The timeline may come back empty; rejecting unscorable accounts is
    /// the classifier's decision, not the collector's.
    pub async fn collect(
        &self,
        user: &UserId,
        full_profile: bool,
    ) -> Result<ClassificationPayload, Error> {
        let page = self
            .social
            .user_timeline(user, TIMELINE_PAGE)
            .await
            .map_err(|e| rate_limit_at(e, "statuses/user_timeline"))?;
        let timeline = self.in_window(page);

        // Profile data rides along on every post, so the first in-window
        // post is the freshest snapshot. Only an empty timeline forces a
        // separate lookup.
        let profile: UserProfile = match timeline.first() {
            Some(post) => post.user.clone(),
            None => self
                .social
                .get_user(user)
                .await
                .map_err(|e| rate_limit_at(e, "users/show"))?,
        };

        let handle = format!("@{}", profile.screen_name);
        let found = self
            .social
            .search_recent(&handle, MENTION_PAGE)
            .await
            .map_err(|e| rate_limit_at(e, "search/tweets"))?;
        let mentions = self.in_window(found);

        debug!(
            user = %user,
            handle = %handle,
            timeline = timeline.len(),
            mentions = mentions.len(),
            "collected account data"
        );

        let user = if full_profile {
            PayloadUser::Full(profile)
        } else {
            PayloadUser::Summary(AccountSummary::from(&profile))
        };

        Ok(ClassificationPayload {
            mentions,
            timeline,
            user,
        })
    }

    fn in_window(&self, posts: Vec<Post>) -> Vec<Post> {
        posts
            .into_iter()
            .filter(|post| self.window.contains(post.created_at))
            .collect()
    }
}

fn rate_limit_at(err: SocialError, operation: &'static str) -> Error {
    match err {
        SocialError::RateLimited => Error::RateLimited { operation },
        SocialError::Api(message) => Error::AccountFetch(message),
    }
}

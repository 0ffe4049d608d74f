//! Batch classification: a pull-based run over many accounts where one bad
//! account never aborts the rest.

use std::collections::VecDeque;
use std::time::Duration;

use futures::stream::{self, Stream};
use serde::Serialize;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::client::Botometer;
use crate::error::Error;
use crate::model::ClassificationResult;
use crate::scoring::ScoringService;
use crate::social::{SocialApi, UserId};

/// Called when an account exhausts its retry budget on a retryable fault.
/// Supplying one turns batch-terminating faults into skipped accounts.
pub type UnrecoverableHandler = Box<dyn FnMut(&UserId, &Error) + Send>;

/// Per-run knobs for [`Botometer::check_accounts`].
#[derive(Default)]
pub struct BatchOptions {
    pub full_profile: bool,
    /// Overrides the configured retry budget when set.
    pub max_retries: Option<u32>,
    pub on_unrecoverable: Option<UnrecoverableHandler>,
}

/// Terminal outcome for one account.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AccountOutcome {
    Scored(ClassificationResult),
    Failed { error: String },
}

#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub account: UserId,
    pub outcome: AccountOutcome,
}

/// Single-pass lazy run over a sequence of accounts.
///
/// Each `next` call drives exactly one account to a terminal state,
/// including any backoff sleeps, before returning; nothing runs for
/// accounts the caller never pulls. `Err` means a retryable fault exhausted
/// its budget with no handler installed; the run is finished after that.
/// Runs are not restartable once exhausted.
pub struct BatchRun<'a, S, C> {
    client: &'a Botometer<S, C>,
    accounts: VecDeque<UserId>,
    full_profile: bool,
    max_retries: u32,
    on_unrecoverable: Option<UnrecoverableHandler>,
    done: bool,
}

impl<'a, S: SocialApi, C: ScoringService> BatchRun<'a, S, C> {
    pub(crate) fn new<I>(client: &'a Botometer<S, C>, accounts: I, options: BatchOptions) -> Self
    where
        I: IntoIterator,
        I::Item: Into<UserId>,
    {
        if !client.config().wait_on_ratelimit {
            debug!("batch run without wait_on_ratelimit; throttled accounts fail fast");
        }
        Self {
            client,
            accounts: accounts.into_iter().map(Into::into).collect(),
            full_profile: options.full_profile,
            max_retries: options.max_retries.unwrap_or(client.config().max_retries),
            on_unrecoverable: options.on_unrecoverable,
            done: false,
        }
    }

    /// Process accounts until one reaches a terminal state and yield it.
    /// `Ok(None)` once every account has been handled.
    pub async fn next(&mut self) -> Result<Option<BatchOutcome>, Error> {
        if self.done {
            return Ok(None);
        }

        while let Some(account) = self.accounts.pop_front() {
            let mut attempt: u32 = 0;
            loop {
                match self
                    .client
                    .check_resolved(&account, self.full_profile)
                    .await
                {
                    Ok(result) => {
                        return Ok(Some(BatchOutcome {
                            account,
                            outcome: AccountOutcome::Scored(result),
                        }));
                    }
                    Err(e) if e.is_permanent() => {
                        warn!(account = %account, error = %e, "account failed permanently");
                        let error = format!("{}: {}", e.kind(), e);
                        return Ok(Some(BatchOutcome {
                            account,
                            outcome: AccountOutcome::Failed { error },
                        }));
                    }
                    Err(e) if attempt >= self.max_retries => {
                        warn!(
                            account = %account,
                            attempts = attempt + 1,
                            error = %e,
                            "retry budget exhausted"
                        );
                        match self.on_unrecoverable.as_mut() {
                            Some(handler) => {
                                handler(&account, &e);
                                break;
                            }
                            None => {
                                self.done = true;
                                return Err(e);
                            }
                        }
                    }
                    Err(e) => {
                        let delay = Duration::from_secs(1u64 << attempt);
                        debug!(
                            account = %account,
                            attempt = attempt + 1,
                            delay_secs = delay.as_secs(),
                            error = %e,
                            "retryable fault, backing off"
                        );
                        sleep(delay).await;
                        attempt += 1;
                    }
                }
            }
        }

        self.done = true;
        Ok(None)
    }

    /// Adapt the run into a [`Stream`]. The stream ends after the first
    /// `Err` item, mirroring how the run itself terminates.
    pub fn into_stream(self) -> impl Stream<Item = Result<BatchOutcome, Error>> + 'a
    where
        S: 'a,
        C: 'a,
    {
        stream::unfold(self, |mut run| async move {
            match run.next().await {
                Ok(Some(outcome)) => Some((Ok(outcome), run)),
                Ok(None) => None,
                Err(e) => Some((Err(e), run)),
            }
        })
    }
}

//! Async client for a Botometer-style bot-detection service.
//!
//! The crate collects a bounded, time-windowed slice of an account's posts
//! and mentions from a social network, packages them into a scoring payload,
//! and submits it to the remote classification service:
//!
//! collection (`SocialApi`) → payload assembly (`Collector`) → scoring
//! (`ScoringService`) → result, with a batch layer (`BatchRun`) adding
//! per-account retry/backoff and partial-failure reporting on top.
//!
//! The social-network client itself (auth handshake, pagination, wire
//! parsing) is the caller's: implement [`SocialApi`] over whichever client
//! you use and hand it to [`Botometer`].

pub mod batch;
pub mod client;
pub mod collector;
pub mod config;
pub mod error;
pub mod model;
pub mod scoring;
pub mod social;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{AccountOutcome, BatchOptions, BatchOutcome, BatchRun, UnrecoverableHandler};
pub use client::Botometer;
pub use collector::Collector;
pub use config::{AuthMode, BotometerConfig, DEFAULT_API_URL, DEFAULT_API_VERSION};
pub use error::Error;
pub use model::{
    AccountSummary, ClassificationPayload, ClassificationResult, PayloadUser, Post, TimeWindow,
    UserProfile,
};
pub use scoring::{HttpScoringClient, ScoringService};
pub use social::{SocialApi, SocialError, UserId};

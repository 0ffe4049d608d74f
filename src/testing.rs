//! Mock collaborators shared by the unit tests.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::model::{ClassificationPayload, ClassificationResult, Post, TimeWindow, UserProfile};
use crate::scoring::ScoringService;
use crate::social::{SocialApi, SocialError, UserId};

pub fn ts(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// The window used throughout the tests: May 5 to May 20, 2016.
pub fn window() -> TimeWindow {
    TimeWindow::new(
        Utc.with_ymd_and_hms(2016, 5, 5, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2016, 5, 20, 0, 0, 0).unwrap(),
    )
}

pub fn profile(screen_name: &str) -> UserProfile {
    UserProfile {
        id_str: format!("id-{screen_name}"),
        screen_name: screen_name.to_string(),
        extra: Map::new(),
    }
}

pub fn post(id: &str, screen_name: &str, created_at: DateTime<Utc>) -> Post {
    Post {
        id_str: id.to_string(),
        created_at,
        text: format!("post {id}"),
        user: profile(screen_name),
        extra: Map::new(),
    }
}

pub fn score(label: &str) -> ClassificationResult {
    let mut result = Map::new();
    result.insert("scored".to_string(), Value::String(label.to_string()));
    result
}

#[derive(Default)]
pub struct MockSocial {
    default_timeline: Vec<Post>,
    per_user_timeline: HashMap<String, Vec<Post>>,
    search_results: Vec<Post>,
    profile: Option<UserProfile>,
    timeline_rl: bool,
    search_rl: bool,
    get_user_calls: AtomicUsize,
    last_query: Mutex<Option<String>>,
}

impl MockSocial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeline(mut self, posts: Vec<Post>) -> Self {
        self.default_timeline = posts;
        self
    }

    pub fn timeline_for(mut self, user: &str, posts: Vec<Post>) -> Self {
        self.per_user_timeline.insert(user.to_string(), posts);
        self
    }

    pub fn search(mut self, posts: Vec<Post>) -> Self {
        self.search_results = posts;
        self
    }

    pub fn profile(mut self, screen_name: &str) -> Self {
        self.profile = Some(profile(screen_name));
        self
    }

    pub fn timeline_rate_limited(mut self) -> Self {
        self.timeline_rl = true;
        self
    }

    pub fn search_rate_limited(mut self) -> Self {
        self.search_rl = true;
        self
    }

    pub fn get_user_calls(&self) -> usize {
        self.get_user_calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl SocialApi for MockSocial {
    async fn user_timeline(&self, user: &UserId, _count: usize) -> Result<Vec<Post>, SocialError> {
        if self.timeline_rl {
            return Err(SocialError::RateLimited);
        }
        Ok(self
            .per_user_timeline
            .get(&user.to_string())
            .cloned()
            .unwrap_or_else(|| self.default_timeline.clone()))
    }

    async fn get_user(&self, user: &UserId) -> Result<UserProfile, SocialError> {
        self.get_user_calls.fetch_add(1, Ordering::SeqCst);
        match &self.profile {
            Some(profile) => Ok(profile.clone()),
            None => Ok(profile(&user.to_string())),
        }
    }

    async fn search_recent(&self, query: &str, _count: usize) -> Result<Vec<Post>, SocialError> {
        *self.last_query.lock().unwrap() = Some(query.to_string());
        if self.search_rl {
            return Err(SocialError::RateLimited);
        }
        Ok(self.search_results.clone())
    }
}

/// Scripted scoring service: pops one response per call, records the
/// payloads it saw. An exhausted script answers with a generic success.
#[derive(Default)]
pub struct MockScoring {
    script: Mutex<VecDeque<Result<ClassificationResult, Error>>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl MockScoring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: Result<ClassificationResult, Error>) -> Self {
        self.script.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Screen names of the payloads submitted, in order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScoringService for MockScoring {
    async fn check_account(
        &self,
        payload: &ClassificationPayload,
    ) -> Result<ClassificationResult, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push(payload.screen_name().to_string());
        match self.script.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(score("default")),
        }
    }
}

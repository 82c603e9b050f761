//! In-memory transport and reloader for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use board_protocol::{Timestamp, Url};
use tokio::time::Instant;

use crate::errors::ClientError;
use crate::reload::{ReloadNotice, Reloader};
use crate::transport::Transport;

/// Plays back scripted poll results and records every request.
///
/// Once the script runs out, `fallback` is returned for every further poll.
pub(crate) struct ScriptedTransport {
    polls: Mutex<VecDeque<Result<Timestamp, ClientError>>>,
    fallback: Option<Timestamp>,
    post_status: Option<u16>,
    pub(crate) poll_log: Mutex<Vec<(Url, Instant)>>,
    pub(crate) post_log: Mutex<Vec<Url>>,
}

impl ScriptedTransport {
    pub(crate) fn new(polls: Vec<Result<Timestamp, ClientError>>) -> Self {
        Self {
            polls: Mutex::new(polls.into()),
            fallback: None,
            post_status: None,
            poll_log: Mutex::new(Vec::new()),
            post_log: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn fresh(ts: i64) -> Result<Timestamp, ClientError> {
        Ok(Timestamp::from_secs(ts))
    }

    pub(crate) fn outage() -> Result<Timestamp, ClientError> {
        Err(ClientError::Transport {
            url: "http://localhost/au".to_string(),
            message: "connection refused".to_string(),
        })
    }

    pub(crate) fn with_fallback(mut self, ts: i64) -> Self {
        self.fallback = Some(Timestamp::from_secs(ts));
        self
    }

    /// Make every POST fail with this HTTP status.
    pub(crate) fn failing_posts(mut self, status: u16) -> Self {
        self.post_status = Some(status);
        self
    }

    pub(crate) fn poll_instants(&self) -> Vec<Instant> {
        self.poll_log
            .lock()
            .unwrap()
            .iter()
            .map(|(_, at)| *at)
            .collect()
    }

    pub(crate) fn posted_paths(&self) -> Vec<String> {
        self.post_log
            .lock()
            .unwrap()
            .iter()
            .map(|url| url.path().to_string())
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn fetch_timestamp(&self, url: &Url) -> Result<Timestamp, ClientError> {
        self.poll_log
            .lock()
            .unwrap()
            .push((url.clone(), Instant::now()));
        let next = self.polls.lock().unwrap().pop_front();
        match (next, self.fallback) {
            (Some(result), _) => result,
            (None, Some(ts)) => Ok(ts),
            (None, None) => Err(ClientError::MalformedResponse {
                url: url.to_string(),
                message: "script exhausted".to_string(),
            }),
        }
    }

    async fn post_action(&self, url: &Url) -> Result<serde_json::Value, ClientError> {
        self.post_log.lock().unwrap().push(url.clone());
        match self.post_status {
            Some(status) => Err(ClientError::Status {
                url: url.to_string(),
                status,
            }),
            None => Ok(serde_json::json!({ "starred": true })),
        }
    }
}

#[derive(Default)]
pub(crate) struct RecordingReloader {
    pub(crate) notices: Mutex<Vec<ReloadNotice>>,
}

impl RecordingReloader {
    pub(crate) fn count(&self) -> usize {
        self.notices.lock().unwrap().len()
    }
}

impl Reloader for RecordingReloader {
    fn reload(&self, notice: &ReloadNotice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

pub(crate) fn base_url() -> Url {
    Url::parse("http://localhost:5000").unwrap()
}

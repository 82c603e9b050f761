use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::ProtocolError;
use crate::types::Timestamp;

/// Path prefix the server mounts auto-update endpoints under.
///
/// The poll endpoint for a page is this prefix followed by the page's full
/// path, query string included: `/messList?x=1&au=1` polls
/// `/au/messList?x=1&au=1`.
pub const AUTO_UPDATE_PREFIX: &str = "/au";

/// Default path segment for the star action. The subject id is appended.
pub const DEFAULT_STAR_PREFIX: &str = "/x/star/";

/// Body of a successful poll response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerTimestampResponse {
    pub ts: Timestamp,
}

/// Where to poll and what the page already knows.
///
/// Both fields are fixed at construction. `known_timestamp` is the
/// comparison baseline for every cycle, never the last observed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollTarget {
    endpoint_url: Url,
    known_timestamp: Timestamp,
}

impl PollTarget {
    pub fn new(endpoint_url: Url, known_timestamp: Timestamp) -> Self {
        Self {
            endpoint_url,
            known_timestamp,
        }
    }

    /// Build the target for a rendered page.
    ///
    /// `page_path` is the page's path plus query, as the server saw it.
    pub fn for_page(
        base_url: &Url,
        page_path: &str,
        known_timestamp: Timestamp,
    ) -> Result<Self, ProtocolError> {
        let path = if page_path.starts_with('/') {
            format!("{AUTO_UPDATE_PREFIX}{page_path}")
        } else {
            format!("{AUTO_UPDATE_PREFIX}/{page_path}")
        };
        let endpoint_url = join(base_url, &path)?;
        Ok(Self::new(endpoint_url, known_timestamp))
    }

    pub fn endpoint_url(&self) -> &Url {
        &self.endpoint_url
    }

    pub fn known_timestamp(&self) -> Timestamp {
        self.known_timestamp
    }

    /// True when `observed` is strictly newer than the baseline.
    pub fn is_stale(&self, observed: Timestamp) -> bool {
        observed > self.known_timestamp
    }
}

/// A single action submission. Built fresh per click, never tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    subject_id: String,
    endpoint_url: Url,
}

impl ActionRequest {
    /// Derive the star request for `subject_id`.
    ///
    /// The id becomes exactly one path segment after `prefix`, percent-encoded,
    /// so `"a/b"` cannot address a different route. `"."` and `".."` are
    /// rejected since URL normalization would resolve them away.
    pub fn star(base_url: &Url, prefix: &str, subject_id: &str) -> Result<Self, ProtocolError> {
        match subject_id {
            "" => return Err(ProtocolError::EmptySubject),
            "." | ".." => {
                return Err(ProtocolError::DotSegmentSubject {
                    subject: subject_id.to_string(),
                });
            }
            _ => {}
        }

        let mut endpoint_url = join(base_url, prefix)?;
        endpoint_url
            .path_segments_mut()
            .map_err(|()| ProtocolError::InvalidUrl {
                url: base_url.to_string(),
                message: "url cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .push(subject_id);

        Ok(Self {
            subject_id: subject_id.to_string(),
            endpoint_url,
        })
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn endpoint_url(&self) -> &Url {
        &self.endpoint_url
    }
}

fn join(base_url: &Url, path: &str) -> Result<Url, ProtocolError> {
    base_url.join(path).map_err(|e| ProtocolError::InvalidUrl {
        url: format!("{base_url}{path}"),
        message: e.to_string(),
    })
}

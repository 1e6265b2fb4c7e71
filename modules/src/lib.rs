//! # Holehe Modules
//!
//! The built-in per-service checks. Each one maps a single HTTP exchange to a
//! [`ResultRecord`]. The mapping lives in a pure `interpret` function so the
//! decision logic can be tested without touching the network.

use std::sync::Arc;

use holehe_common::capability::Capability;
use holehe_common::client::CheckClient;
use holehe_common::record::ResultRecord;
use reqwest::header::USER_AGENT;
use reqwest::{RequestBuilder, StatusCode};
use tracing::debug;

mod duolingo;
mod firefox;
mod gravatar;

pub use duolingo::Duolingo;
pub use firefox::Firefox;
pub use gravatar::Gravatar;

/// Every built-in capability, ready for registration.
pub fn all() -> Vec<Arc<dyn Capability>> {
    vec![Arc::new(Duolingo), Arc::new(Firefox), Arc::new(Gravatar)]
}

/// Status and body of a completed exchange.
pub(crate) struct Reply {
    pub status: StatusCode,
    pub body: String,
}

/// Sends `request` with a browser User-Agent.
///
/// Transport failures, including the per-request timeout, come back as `None`.
/// Callers report them as a rate limit.
pub(crate) async fn send(client: &CheckClient, request: RequestBuilder) -> Option<Reply> {
    let response = match request.header(USER_AGENT, client.user_agent()).send().await {
        Ok(response) => response,
        Err(e) => {
            debug!("request failed: {e}");
            return None;
        }
    };
    let status: StatusCode = response.status();
    match response.text().await {
        Ok(body) => Some(Reply { status, body }),
        Err(e) => {
            debug!("failed to read body: {e}");
            None
        }
    }
}

/// Shorthand for the common "no answer" outcome.
pub(crate) fn unanswered(record: ResultRecord) -> ResultRecord {
    record.rate_limited()
}

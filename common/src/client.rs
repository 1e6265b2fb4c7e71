//! # Shared HTTP Client
//!
//! One pooled [`reqwest::Client`] serves every check of a run. Capabilities
//! borrow it and never build their own, so keep-alive connections are reused
//! across the whole fan-out.

use std::time::Duration;

use tracing::debug;

use crate::error::Result;

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
];

#[derive(Debug)]
pub struct CheckClient {
    http: reqwest::Client,
}

impl CheckClient {
    /// Builds the client. `timeout` bounds each request individually.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http: reqwest::Client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;
        debug!("http client ready, per-request timeout {:?}", timeout);
        Ok(Self { http })
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// A browser User-Agent picked at random for each call.
    pub fn user_agent(&self) -> &'static str {
        USER_AGENTS[rand::random_range(0..USER_AGENTS.len())]
    }

    /// Releases the connection pool. Consuming `self` makes a second close impossible.
    pub fn close(self) {
        debug!("closing http client");
        drop(self.http);
    }
}

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use holehe_common::capability::{Capability, Method};
use holehe_common::client::CheckClient;
use holehe_common::record::ResultRecord;

/// What a stub reports once its delay has elapsed.
#[derive(Clone, Copy)]
pub enum Verdict {
    Exists,
    RateLimited,
    Absent,
    Fails,
}

pub struct Stub {
    pub name: &'static str,
    pub verdict: Verdict,
    pub delay: Duration,
    pub method: Method,
    pub finished: Option<Arc<AtomicUsize>>,
}

impl Stub {
    pub fn new(name: &'static str, verdict: Verdict) -> Self {
        Self {
            name,
            verdict,
            delay: Duration::ZERO,
            method: Method::Other,
            finished: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn counting(mut self, finished: Arc<AtomicUsize>) -> Self {
        self.finished = Some(finished);
        self
    }

    pub fn arc(self) -> Arc<dyn Capability> {
        Arc::new(self)
    }
}

#[async_trait]
impl Capability for Stub {
    fn name(&self) -> &'static str {
        self.name
    }

    fn domain(&self) -> &'static str {
        "stub.test"
    }

    fn method(&self) -> Method {
        self.method
    }

    async fn run(&self, email: &str, _client: &CheckClient) -> anyhow::Result<ResultRecord> {
        tokio::time::sleep(self.delay).await;
        if let Some(finished) = &self.finished {
            finished.fetch_add(1, Ordering::SeqCst);
        }

        let record: ResultRecord = self.record();
        match self.verdict {
            Verdict::Exists => Ok(record.with_exists(true).with_other("Email", email)),
            Verdict::RateLimited => Ok(record.rate_limited()),
            Verdict::Absent => Ok(record),
            Verdict::Fails => anyhow::bail!("{} returned garbage", self.name),
        }
    }
}

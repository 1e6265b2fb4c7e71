//! The **fan-out** stage of a run.
//!
//! One tokio task is spawned per selected capability inside a [`JoinSet`],
//! which acts as the structured scope: [`Dispatcher::run`] only returns once
//! every task has finished, faulted or been aborted.
//!
//! Tasks hand their [`ResultRecord`] back through the join handle. The
//! dispatcher is the only place records are collected, so nothing is shared
//! mutably between tasks and the same code is sound on a multi-threaded runtime.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use holehe_common::capability::Capability;
use holehe_common::client::CheckClient;
use holehe_common::config::{Config, FaultPolicy};
use holehe_common::record::ResultRecord;
use holehe_common::{Error, Result};
use tokio::task::{Id, JoinError, JoinSet};
use tracing::{Instrument, debug, debug_span, error, warn};

/// Name and domain of a spawned check, kept to build a stand-in record if it faults.
type Identity = (&'static str, &'static str);

pub struct Dispatcher {
    client: Arc<CheckClient>,
    policy: FaultPolicy,
    on_checked: Option<Box<dyn Fn(usize) + Send + Sync>>,
}

impl Dispatcher {
    /// Builds the shared client. It lives until [`Dispatcher::run`] returns.
    pub fn new(cfg: &Config) -> Result<Self> {
        let client: CheckClient = CheckClient::new(cfg.timeout)?;
        Ok(Self {
            client: Arc::new(client),
            policy: cfg.fault_policy,
            on_checked: None,
        })
    }

    /// Called with the number of finished checks after each one completes.
    pub fn with_progress<F>(mut self, on_checked: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_checked = Some(Box::new(on_checked));
        self
    }

    /// Runs every capability concurrently against `email`.
    ///
    /// Records come back in completion order. Under [`FaultPolicy::AbortAll`]
    /// the first fault aborts the remaining checks and is returned as
    /// [`Error::CapabilityFault`]. Under [`FaultPolicy::IsolateAndContinue`]
    /// each fault becomes an error-flagged record and exactly one record is
    /// returned per capability.
    pub async fn run(
        self,
        email: &str,
        capabilities: Vec<Arc<dyn Capability>>,
    ) -> Result<Vec<ResultRecord>> {
        let (outcome, _closed) = self.run_and_release(email, capabilities).await;
        outcome
    }

    /// Same as [`Dispatcher::run`], also telling whether the client was closed.
    async fn run_and_release(
        self,
        email: &str,
        capabilities: Vec<Arc<dyn Capability>>,
    ) -> (Result<Vec<ResultRecord>>, bool) {
        let Self {
            client,
            policy,
            on_checked,
        } = self;

        let email: Arc<str> = Arc::from(email);
        let mut tasks: JoinSet<anyhow::Result<ResultRecord>> = JoinSet::new();
        let mut identities: HashMap<Id, Identity> = HashMap::with_capacity(capabilities.len());

        for capability in capabilities {
            let identity: Identity = (capability.name(), capability.domain());
            let email: Arc<str> = Arc::clone(&email);
            let client: Arc<CheckClient> = Arc::clone(&client);
            let span = debug_span!("check", capability = identity.0, method = %capability.method());

            let handle = tasks.spawn(
                async move { capability.run(&email, &client).await }.instrument(span),
            );
            identities.insert(handle.id(), identity);
        }

        debug!("dispatched {} checks", identities.len());
        let mut records: Vec<ResultRecord> = Vec::with_capacity(identities.len());

        let outcome: Result<()> = loop {
            let Some(joined) = tasks.join_next_with_id().await else {
                break Ok(());
            };

            let (id, result): (Id, std::result::Result<ResultRecord, String>) = match joined {
                Ok((id, result)) => (id, result.map_err(|e| format!("{e:#}"))),
                Err(join_err) => (join_err.id(), Err(describe_join_error(join_err))),
            };
            let (name, domain): Identity = identities.get(&id).copied().unwrap_or(("unknown", ""));

            match result {
                Ok(record) => {
                    debug!("{name} done");
                    records.push(record);
                }
                Err(reason) => match policy {
                    FaultPolicy::AbortAll => {
                        error!("{name} faulted, aborting remaining checks: {reason}");
                        tasks.abort_all();
                        while tasks.join_next().await.is_some() {}
                        break Err(Error::CapabilityFault {
                            name: name.to_string(),
                            reason,
                        });
                    }
                    FaultPolicy::IsolateAndContinue => {
                        warn!("{name} faulted: {reason}");
                        records.push(ResultRecord::faulted(name, domain));
                    }
                },
            }

            if let Some(on_checked) = &on_checked {
                on_checked(records.len());
            }
        };

        let closed: bool = release(client);
        (outcome.map(|()| records), closed)
    }
}

/// Closes the client once every task has dropped its handle.
///
/// Returns `false` when some handle outlived the run and the client stayed open.
fn release(client: Arc<CheckClient>) -> bool {
    match Arc::try_unwrap(client) {
        Ok(client) => {
            client.close();
            true
        }
        Err(shared) => {
            warn!(
                "http client still referenced by {} handles at shutdown",
                Arc::strong_count(&shared) - 1
            );
            false
        }
    }
}

fn describe_join_error(err: JoinError) -> String {
    if err.is_cancelled() {
        return String::from("task was cancelled");
    }
    match err.try_into_panic() {
        Ok(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
        Err(err) => err.to_string(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "non-string panic payload"
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

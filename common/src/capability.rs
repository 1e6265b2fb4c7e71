//! The **contract** every per-service check implements.
//!
//! The dispatcher depends only on this trait. Concrete checks live in the
//! `holehe-modules` crate, or in tests as stubs.

use std::fmt;

use async_trait::async_trait;

use crate::client::CheckClient;
use crate::record::ResultRecord;

/// How a capability learns whether an account exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Register,
    Login,
    /// Triggers a password-recovery flow. May alert the account owner.
    PasswordRecovery,
    Other,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &str = match self {
            Method::Register => "register",
            Method::Login => "login",
            Method::PasswordRecovery => "password recovery",
            Method::Other => "other",
        };
        f.write_str(s)
    }
}

#[async_trait]
pub trait Capability: Send + Sync {
    /// Unique identifier, also the sort key of the final output.
    fn name(&self) -> &'static str;

    fn domain(&self) -> &'static str;

    fn method(&self) -> Method;

    /// Checks `email` against the service and returns exactly one record.
    ///
    /// Network errors, timeouts and unexpected responses should be folded into
    /// the record (usually as a rate limit). An `Err` is a fault and is handled
    /// by the dispatcher's fault policy.
    async fn run(&self, email: &str, client: &CheckClient) -> anyhow::Result<ResultRecord>;

    /// A blank record pre-filled with this capability's identity.
    fn record(&self) -> ResultRecord {
        ResultRecord::new(self.name(), self.domain())
    }
}

//! # Result Record
//!
//! The verdict one capability produces for the target email.
//!
//! Field names on the wire follow the established output format
//! (`rateLimit`, `emailRecovery`), so records serialize with explicit renames.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Free-form details some services leak besides existence, e.g. a display name.
pub type Others = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub name: String,
    pub domain: String,
    /// `false` means either "no account" or "could not tell".
    pub exists: bool,
    #[serde(rename = "rateLimit")]
    pub rate_limit: bool,
    #[serde(rename = "emailRecovery")]
    pub email_recovery: Option<String>,
    pub others: Option<Others>,
    /// Set only on records synthesized for a capability that faulted.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

impl ResultRecord {
    /// A record with every signal negative.
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            exists: false,
            rate_limit: false,
            email_recovery: None,
            others: None,
            error: false,
        }
    }

    /// The record that stands in for a capability which returned an error or panicked.
    pub fn faulted(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            error: true,
            ..Self::new(name, domain)
        }
    }

    pub fn with_exists(mut self, exists: bool) -> Self {
        self.exists = exists;
        self
    }

    pub fn rate_limited(mut self) -> Self {
        self.rate_limit = true;
        self
    }

    pub fn with_email_recovery(mut self, recovery: impl Into<String>) -> Self {
        self.email_recovery = Some(recovery.into());
        self
    }

    pub fn with_other(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.others
            .get_or_insert_with(Others::new)
            .insert(key.into(), value.into());
        self
    }
}

use std::time::Duration;

/// Per-request timeout used when none is given on the command line.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// What the dispatcher does when a capability returns an error or panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultPolicy {
    /// Cancel every sibling check and fail the whole run.
    AbortAll,
    /// Record an error-flagged result for the faulted check and let the others finish.
    #[default]
    IsolateAndContinue,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Timeout applied to every outbound request, not to the run as a whole.
    pub timeout: Duration,
    /// Skips capabilities that probe a password-recovery flow.
    ///
    /// Those flows may notify the account owner.
    pub no_password_recovery: bool,
    pub fault_policy: FaultPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            no_password_recovery: false,
            fault_policy: FaultPolicy::default(),
        }
    }
}

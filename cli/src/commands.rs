pub mod check;

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use holehe_common::config::{Config, DEFAULT_TIMEOUT_SECS, FaultPolicy};

/// Single-dash spelling kept for compatibility with older scripts.
const LEGACY_NO_RECOVERY: &str = "-NP";

#[derive(Parser, Debug)]
#[command(name = "holehe")]
#[command(about = "Check whether an email is attached to an account on online services.")]
#[command(version)]
pub struct CommandLine {
    /// Target email (only the first one is used)
    #[arg(value_name = "EMAIL", required = true, num_args = 1..)]
    pub email: Vec<String>,

    /// Write the JSON result to PATH and print its absolute location
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Timeout in seconds for each request
    #[arg(
        short = 'T',
        long,
        value_name = "SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Do not run checks that trigger password recovery (also -NP)
    #[arg(short = 'N', long)]
    pub no_password_recovery: bool,

    /// Abort the whole run when a single check breaks
    #[arg(long)]
    pub fail_fast: bool,

    /// Show more logs on stderr (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn email(&self) -> &str {
        self.email.first().map(String::as_str).unwrap_or_default()
    }

    pub fn config(&self) -> Config {
        Config {
            timeout: Duration::from_secs(self.timeout),
            no_password_recovery: self.no_password_recovery,
            fault_policy: if self.fail_fast {
                FaultPolicy::AbortAll
            } else {
                FaultPolicy::IsolateAndContinue
            },
        }
    }
}

/// Rewrites `-NP` to its long form, which clap cannot express as a short flag.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            if arg == LEGACY_NO_RECOVERY {
                OsString::from("--no-password-recovery")
            } else {
                arg
            }
        })
        .collect()
}

//! # Holehe Common
//!
//! Types shared by every crate in the workspace: the [`capability::Capability`]
//! contract, the [`record::ResultRecord`] it produces, the shared
//! [`client::CheckClient`], run [`config::Config`] and the workspace [`error::Error`].

pub mod capability;
pub mod client;
pub mod config;
pub mod email;
pub mod error;
pub mod record;

pub use error::{Error, Result};

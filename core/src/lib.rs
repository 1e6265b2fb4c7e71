//! # Holehe Core
//!
//! The coordination layer: pick capabilities from the [`registry`], fan them
//! out with the [`dispatcher`], fold the records with [`aggregate`] and write
//! them through [`output`].

pub mod aggregate;
pub mod dispatcher;
pub mod output;
pub mod registry;

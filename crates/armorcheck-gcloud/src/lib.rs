//! Describe adapters: read live (or recorded) security policy state.
//!
//! This crate is allowed to do IO and spawn `gcloud`. It never mutates
//! infrastructure; every command it runs is a `describe`.

#![forbid(unsafe_code)]

mod fixtures;
mod gcloud;
mod outputs;

pub use fixtures::FixtureDescriber;
pub use gcloud::{GCLOUD_ENV, GcloudDescriber};
pub use outputs::Outputs;

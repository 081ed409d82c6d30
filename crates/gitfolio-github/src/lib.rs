//! GitHub REST API client and the data model shared across the pipeline.

pub mod client;
pub mod types;

pub use client::{GithubClient, GithubError};
pub use types::{Profile, ProfilePayload, Repository, Skill};

//! The agent boundary: a text-in, text-out interface over a provider that
//! may invoke tools before answering.

pub mod agent;
pub mod executor;

pub use agent::{Agent, AgentError};
pub use executor::{AgentExecutor, SYSTEM_PROMPT};

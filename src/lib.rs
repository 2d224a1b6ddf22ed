//! llmctl Library
//!
//! Model description reports and log tail/follow for local LLM runtimes.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use domain::error::{LlmCtlError, LlmCtlResult};
pub use domain::config::LlmCtlConfig;
pub use domain::model::{Capability, MetadataValue, ModelDescription, ModelDetails, Tensor};
pub use crate::core::report::render;
pub use crate::core::logs::{cancel_pair, follow, follow_with_interval, tail, CancelHandle, CancelToken};

//! Course discovery engine: personalized recommendation scoring and
//! relevance-ranked catalog search.
//!
//! Both entry points are pure functions of their inputs: the caller
//! supplies the subject's profile, behavior snapshots, session context,
//! and the candidate catalog on every invocation, and the engine holds no
//! mutable state between calls. Storage, transport, and the HTTP surface
//! live in their own services.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use services::{RecommendationEngine, SearchEngine, SearchRequest};

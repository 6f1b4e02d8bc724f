//! Quorum Core Library
//!
//! Models, the session state machine, configuration, and the local
//! identity cache for the Quorum estimation tool.

pub mod config;
pub mod error;
pub mod invariants;
pub mod models;
pub mod session;
pub mod storage;

pub use config::{AppConfig, TriangleConfig, UiConfig};
pub use error::{Error, Result};
pub use models::*;
pub use session::{Outcome, Page, SessionStore};
pub use storage::{Database, IdentityStore};

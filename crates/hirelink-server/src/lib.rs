//! Hirelink Server — HTTP layer over the auth, workflow, and
//! notification services.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use routes::build_router;
pub use state::AppState;

//! Hirelink Notify — best-effort SMS delivery through an external
//! gateway.
//!
//! The dispatcher implements the workflow's [`Notifier`] port. Nothing
//! here ever raises past the dispatch boundary: missing configuration,
//! transport faults, timeouts, and non-success gateway replies all
//! reduce to [`DispatchOutcome::Failed`].
//!
//! [`Notifier`]: hirelink_lifecycle::Notifier
//! [`DispatchOutcome::Failed`]: hirelink_lifecycle::DispatchOutcome

pub mod config;
pub mod dispatcher;
pub mod template;

pub use config::GatewayConfig;
pub use dispatcher::SmsDispatcher;

//! Lifecycle events and the outbound-notification port.

use hirelink_core::models::application::{ApplicationStatus, DocumentKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Emitted exactly once per successful status transition; consumed by
/// the notification dispatcher. Ephemeral — never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub application_id: Uuid,
    pub job_title: String,
    pub new_status: ApplicationStatus,
    /// Present for `not_proceeding` transitions.
    pub reason: Option<String>,
    /// Present for `additional_docs_required` transitions.
    pub required_documents: Vec<DocumentKind>,
    pub recipient_phone: String,
}

/// Outcome of a dispatch attempt. Informational only — it is logged
/// and never fed back into the transition's success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    Delivered,
    Failed,
}

/// Outbound-notification port. Implementations must never panic or
/// error past this boundary: every failure mode reduces to
/// [`DispatchOutcome::Failed`].
pub trait Notifier: Send + Sync {
    fn notify(&self, event: LifecycleEvent) -> impl Future<Output = DispatchOutcome> + Send;
}

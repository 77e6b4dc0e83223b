//! Workflow error types.

use hirelink_core::error::HirelinkError;
use hirelink_core::models::application::ApplicationStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },

    #[error("a rejection reason is required for not_proceeding")]
    MissingRejectionReason,

    #[error("a document request must name at least one document kind")]
    EmptyDocumentRequest,

    #[error("a document submission must contain at least one document")]
    EmptySubmission,

    #[error("the job is not open for applications")]
    JobNotOpen,

    #[error("only the job's owning employer or an admin may act on this application")]
    NotJobOwner,

    #[error("only the applicant may submit documents for this application")]
    NotApplicant,

    #[error("role {actual} may not perform this action (requires {required})")]
    WrongRole { required: String, actual: String },
}

impl From<LifecycleError> for HirelinkError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::InvalidTransition { from, to } => HirelinkError::InvalidTransition {
                from: from.to_string(),
                to: to.to_string(),
            },
            LifecycleError::MissingRejectionReason
            | LifecycleError::EmptyDocumentRequest
            | LifecycleError::EmptySubmission
            | LifecycleError::JobNotOpen => HirelinkError::Validation {
                message: err.to_string(),
            },
            LifecycleError::NotJobOwner => HirelinkError::InsufficientPermissions {
                required: "owning employer or admin".into(),
                actual: "employer".into(),
            },
            LifecycleError::NotApplicant => HirelinkError::InsufficientPermissions {
                required: "owning job_seeker".into(),
                actual: "job_seeker".into(),
            },
            LifecycleError::WrongRole { required, actual } => {
                HirelinkError::InsufficientPermissions { required, actual }
            }
        }
    }
}

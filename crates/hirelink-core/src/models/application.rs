//! Job application domain model and the review-status state machine.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review status of an application.
///
/// Older deployments stored the initial status as `pending`; it is
/// accepted everywhere `applied` is and normalised on read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[serde(alias = "pending")]
    Applied,
    Reviewed,
    AdditionalDocsRequired,
    InterviewScheduled,
    InterviewCompleted,
    Hired,
    NotProceeding,
}

impl ApplicationStatus {
    /// Every status value, in review order.
    pub const ALL: [Self; 7] = [
        Self::Applied,
        Self::Reviewed,
        Self::AdditionalDocsRequired,
        Self::InterviewScheduled,
        Self::InterviewCompleted,
        Self::Hired,
        Self::NotProceeding,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Reviewed => "reviewed",
            Self::AdditionalDocsRequired => "additional_docs_required",
            Self::InterviewScheduled => "interview_scheduled",
            Self::InterviewCompleted => "interview_completed",
            Self::Hired => "hired",
            Self::NotProceeding => "not_proceeding",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "applied" | "pending" => Some(Self::Applied),
            "reviewed" => Some(Self::Reviewed),
            "additional_docs_required" => Some(Self::AdditionalDocsRequired),
            "interview_scheduled" => Some(Self::InterviewScheduled),
            "interview_completed" => Some(Self::InterviewCompleted),
            "hired" => Some(Self::Hired),
            "not_proceeding" => Some(Self::NotProceeding),
            _ => None,
        }
    }

    /// Status values a stored row may carry for this status.
    /// `applied` rows written by older deployments read back as `pending`.
    pub const fn storage_aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Applied => &["applied", "pending"],
            Self::Reviewed => &["reviewed"],
            Self::AdditionalDocsRequired => &["additional_docs_required"],
            Self::InterviewScheduled => &["interview_scheduled"],
            Self::InterviewCompleted => &["interview_completed"],
            Self::Hired => &["hired"],
            Self::NotProceeding => &["not_proceeding"],
        }
    }

    /// Statuses reachable from this one.
    pub const fn allowed_targets(&self) -> &'static [Self] {
        match self {
            Self::Applied => &[
                Self::Reviewed,
                Self::AdditionalDocsRequired,
                Self::InterviewScheduled,
                Self::NotProceeding,
            ],
            Self::Reviewed => &[
                Self::AdditionalDocsRequired,
                Self::InterviewScheduled,
                Self::NotProceeding,
            ],
            Self::AdditionalDocsRequired => &[Self::InterviewScheduled, Self::NotProceeding],
            Self::InterviewScheduled => &[Self::InterviewCompleted, Self::NotProceeding],
            Self::InterviewCompleted => &[Self::Hired, Self::NotProceeding],
            Self::Hired | Self::NotProceeding => &[],
        }
    }

    pub fn can_transition_to(&self, target: Self) -> bool {
        self.allowed_targets().contains(&target)
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Hired | Self::NotProceeding)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of supporting documents an employer can request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
    Identification,
    Certification,
    ReferenceLetter,
    Transcript,
}

impl DocumentKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Resume => "resume",
            Self::CoverLetter => "cover_letter",
            Self::Identification => "identification",
            Self::Certification => "certification",
            Self::ReferenceLetter => "reference_letter",
            Self::Transcript => "transcript",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "resume" => Some(Self::Resume),
            "cover_letter" => Some(Self::CoverLetter),
            "identification" => Some(Self::Identification),
            "certification" => Some(Self::Certification),
            "reference_letter" => Some(Self::ReferenceLetter),
            "transcript" => Some(Self::Transcript),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub status: ApplicationStatus,
    /// Documents the employer has asked for, empty until a
    /// document-request transition attaches a set.
    pub required_documents: Vec<DocumentKind>,
    /// Documents the applicant has provided: kind -> storage key.
    pub submitted_documents: BTreeMap<DocumentKind, String>,
    /// Rejection reason recorded on the `not_proceeding` transition.
    pub decision_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApplication {
    pub job_id: Uuid,
    pub applicant_id: Uuid,
}

/// A validated status change, applied atomically against an expected
/// current status.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub to: ApplicationStatus,
    /// Required for `not_proceeding`, ignored otherwise.
    pub reason: Option<String>,
    /// Attached on the `additional_docs_required` transition.
    pub required_documents: Option<Vec<DocumentKind>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_have_no_targets() {
        assert!(ApplicationStatus::Hired.allowed_targets().is_empty());
        assert!(ApplicationStatus::NotProceeding.allowed_targets().is_empty());
        assert!(ApplicationStatus::Hired.is_terminal());
        assert!(ApplicationStatus::NotProceeding.is_terminal());
    }

    #[test]
    fn not_proceeding_reachable_from_every_non_terminal_state() {
        for status in ApplicationStatus::ALL {
            if !status.is_terminal() {
                assert!(
                    status.can_transition_to(ApplicationStatus::NotProceeding),
                    "{status} should allow not_proceeding"
                );
            }
        }
    }

    #[test]
    fn hiring_requires_completed_interview() {
        for status in ApplicationStatus::ALL {
            let allowed = status.can_transition_to(ApplicationStatus::Hired);
            assert_eq!(allowed, status == ApplicationStatus::InterviewCompleted);
        }
    }

    #[test]
    fn pending_is_a_legacy_alias_for_applied() {
        assert_eq!(
            ApplicationStatus::parse("pending"),
            Some(ApplicationStatus::Applied)
        );
        let parsed: ApplicationStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, ApplicationStatus::Applied);
        // Normalised on write.
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Applied).unwrap(),
            "\"applied\""
        );
    }

    #[test]
    fn transition_table_matches_review_flow() {
        use ApplicationStatus::*;
        assert_eq!(
            Applied.allowed_targets(),
            &[Reviewed, AdditionalDocsRequired, InterviewScheduled, NotProceeding]
        );
        assert!(!Reviewed.can_transition_to(Hired));
        assert!(!Applied.can_transition_to(InterviewCompleted));
        assert!(InterviewScheduled.can_transition_to(InterviewCompleted));
        assert!(!AdditionalDocsRequired.can_transition_to(Reviewed));
    }
}

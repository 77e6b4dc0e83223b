//! Transition-kind-specific message text.

use hirelink_core::models::application::ApplicationStatus;
use hirelink_lifecycle::LifecycleEvent;

/// Render the SMS body for a lifecycle event.
pub fn render_message(event: &LifecycleEvent) -> String {
    let job = &event.job_title;
    match event.new_status {
        ApplicationStatus::Applied => {
            format!("Your application for \"{job}\" has been received.")
        }
        ApplicationStatus::Reviewed => {
            format!("Your application for \"{job}\" has been reviewed.")
        }
        ApplicationStatus::AdditionalDocsRequired => {
            let kinds = event
                .required_documents
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            if kinds.is_empty() {
                format!("Further documents are required for your application for \"{job}\".")
            } else {
                format!(
                    "Further documents are required for your application for \"{job}\": {kinds}."
                )
            }
        }
        ApplicationStatus::InterviewScheduled => {
            format!("An interview has been scheduled for your application for \"{job}\".")
        }
        ApplicationStatus::InterviewCompleted => {
            format!(
                "Thank you for interviewing for \"{job}\". We will be in touch with next steps."
            )
        }
        ApplicationStatus::Hired => {
            format!("Congratulations! You have been hired for \"{job}\".")
        }
        ApplicationStatus::NotProceeding => match event.reason.as_deref() {
            Some(reason) => format!(
                "Your application for \"{job}\" will not be proceeding. Reason: {reason}"
            ),
            None => format!("Your application for \"{job}\" will not be proceeding."),
        },
    }
}

#[cfg(test)]
mod tests {
    use hirelink_core::models::application::DocumentKind;
    use uuid::Uuid;

    use super::*;

    fn event(status: ApplicationStatus) -> LifecycleEvent {
        LifecycleEvent {
            application_id: Uuid::new_v4(),
            job_title: "Backend Engineer".into(),
            new_status: status,
            reason: None,
            required_documents: Vec::new(),
            recipient_phone: "+15550001111".into(),
        }
    }

    #[test]
    fn every_status_renders_a_message_naming_the_job() {
        for status in ApplicationStatus::ALL {
            let message = render_message(&event(status));
            assert!(message.contains("Backend Engineer"), "{status}: {message}");
        }
    }

    #[test]
    fn rejection_reason_is_included() {
        let mut e = event(ApplicationStatus::NotProceeding);
        e.reason = Some("Position filled internally".into());
        let message = render_message(&e);
        assert!(message.contains("Position filled internally"));
    }

    #[test]
    fn requested_document_kinds_are_listed() {
        let mut e = event(ApplicationStatus::AdditionalDocsRequired);
        e.required_documents = vec![DocumentKind::Identification, DocumentKind::Transcript];
        let message = render_message(&e);
        assert!(message.contains("identification, transcript"));
    }
}

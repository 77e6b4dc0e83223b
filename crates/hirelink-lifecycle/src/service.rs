//! Application workflow service — guarded transitions and post-commit
//! notification dispatch.

use std::collections::BTreeMap;
use std::sync::Arc;

use hirelink_core::error::HirelinkResult;
use hirelink_core::models::application::{
    Application, ApplicationStatus, CreateApplication, DocumentKind, StatusChange,
};
use hirelink_core::models::job::{Job, JobStatus};
use hirelink_core::models::user::{Role, User};
use hirelink_core::repository::{
    ApplicationRepository, JobRepository, PaginatedResult, Pagination, UserRepository,
};
use tracing::{info, warn};

use crate::error::LifecycleError;
use crate::event::{DispatchOutcome, LifecycleEvent, Notifier};

/// The application review workflow.
///
/// Callers resolve the acting user through the access guard first;
/// this service re-checks role and ownership before every mutation.
pub struct LifecycleService<A, J, U, N> {
    applications: A,
    jobs: J,
    users: U,
    notifier: Arc<N>,
}

impl<A, J, U, N> Clone for LifecycleService<A, J, U, N>
where
    A: Clone,
    J: Clone,
    U: Clone,
{
    fn clone(&self) -> Self {
        Self {
            applications: self.applications.clone(),
            jobs: self.jobs.clone(),
            users: self.users.clone(),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<A, J, U, N> LifecycleService<A, J, U, N>
where
    A: ApplicationRepository,
    J: JobRepository,
    U: UserRepository,
    N: Notifier + 'static,
{
    pub fn new(applications: A, jobs: J, users: U, notifier: Arc<N>) -> Self {
        Self {
            applications,
            jobs,
            users,
            notifier,
        }
    }

    /// A job seeker applies to an open job. The application starts at
    /// `applied`; a second application to the same job is rejected by
    /// the store's uniqueness constraint.
    pub async fn apply(&self, actor: &User, job_id: uuid::Uuid) -> HirelinkResult<Application> {
        if actor.role != Role::JobSeeker {
            return Err(LifecycleError::WrongRole {
                required: Role::JobSeeker.as_str().into(),
                actual: actor.role.as_str().into(),
            }
            .into());
        }

        let job = self.jobs.get_by_id(job_id).await?;
        if job.status != JobStatus::Open {
            return Err(LifecycleError::JobNotOpen.into());
        }

        let application = self
            .applications
            .create(CreateApplication {
                job_id,
                applicant_id: actor.id,
            })
            .await?;

        info!(application_id = %application.id, job_id = %job_id, "application submitted");
        Ok(application)
    }

    /// Move an application to `target`. Only the job's owning employer
    /// or an admin may do so, and only along an edge the state machine
    /// permits. `reason` is mandatory for `not_proceeding`.
    pub async fn transition(
        &self,
        actor: &User,
        application_id: uuid::Uuid,
        target: ApplicationStatus,
        reason: Option<String>,
    ) -> HirelinkResult<Application> {
        self.commit_transition(actor, application_id, target, reason, None)
            .await
    }

    /// Ask the applicant for further documents: transitions to
    /// `additional_docs_required` and attaches the required set.
    pub async fn request_documents(
        &self,
        actor: &User,
        application_id: uuid::Uuid,
        kinds: Vec<DocumentKind>,
    ) -> HirelinkResult<Application> {
        if kinds.is_empty() {
            return Err(LifecycleError::EmptyDocumentRequest.into());
        }
        self.commit_transition(
            actor,
            application_id,
            ApplicationStatus::AdditionalDocsRequired,
            None,
            Some(kinds),
        )
        .await
    }

    /// Record documents supplied by the applicant. This never advances
    /// the status — a reviewer follows up with a manual transition.
    pub async fn submit_documents(
        &self,
        actor: &User,
        application_id: uuid::Uuid,
        submissions: BTreeMap<DocumentKind, String>,
    ) -> HirelinkResult<Application> {
        if submissions.is_empty() {
            return Err(LifecycleError::EmptySubmission.into());
        }

        let application = self.applications.get_by_id(application_id).await?;
        if application.applicant_id != actor.id {
            return Err(LifecycleError::NotApplicant.into());
        }

        let updated = self
            .applications
            .record_documents(application_id, submissions)
            .await?;
        info!(application_id = %application_id, "documents recorded");
        Ok(updated)
    }

    /// Fetch an application for one of the involved parties: the
    /// applicant, the job's owning employer, or an admin.
    pub async fn get_for(
        &self,
        actor: &User,
        application_id: uuid::Uuid,
    ) -> HirelinkResult<Application> {
        let application = self.applications.get_by_id(application_id).await?;
        if application.applicant_id == actor.id || actor.role == Role::Admin {
            return Ok(application);
        }
        let job = self.jobs.get_by_id(application.job_id).await?;
        if actor.role == Role::Employer && job.employer_id == actor.id {
            Ok(application)
        } else {
            Err(LifecycleError::NotJobOwner.into())
        }
    }

    /// List a job's applications for its owning employer or an admin.
    pub async fn list_for_job(
        &self,
        actor: &User,
        job_id: uuid::Uuid,
        pagination: Pagination,
    ) -> HirelinkResult<PaginatedResult<Application>> {
        let job = self.jobs.get_by_id(job_id).await?;
        self.authorize_reviewer(actor, &job)?;
        self.applications.list_by_job(job_id, pagination).await
    }

    fn authorize_reviewer(&self, actor: &User, job: &Job) -> Result<(), LifecycleError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Employer if job.employer_id == actor.id => Ok(()),
            Role::Employer => Err(LifecycleError::NotJobOwner),
            Role::JobSeeker => Err(LifecycleError::WrongRole {
                required: "employer|admin".into(),
                actual: actor.role.as_str().into(),
            }),
        }
    }

    async fn commit_transition(
        &self,
        actor: &User,
        application_id: uuid::Uuid,
        target: ApplicationStatus,
        reason: Option<String>,
        required_documents: Option<Vec<DocumentKind>>,
    ) -> HirelinkResult<Application> {
        let application = self.applications.get_by_id(application_id).await?;
        let job = self.jobs.get_by_id(application.job_id).await?;
        self.authorize_reviewer(actor, &job)?;

        let reason = match target {
            ApplicationStatus::NotProceeding => {
                let reason = reason
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .ok_or(LifecycleError::MissingRejectionReason)?;
                Some(reason)
            }
            _ => None,
        };

        let current = application.status;
        if !current.can_transition_to(target) {
            return Err(LifecycleError::InvalidTransition {
                from: current,
                to: target,
            }
            .into());
        }

        let change = StatusChange {
            to: target,
            reason: reason.clone(),
            required_documents,
        };
        let updated = match self
            .applications
            .update_status(application_id, current, change)
            .await?
        {
            Some(app) => app,
            None => {
                // Lost a concurrent race: re-read the authoritative
                // status and report the transition that actually failed.
                let fresh = self.applications.get_by_id(application_id).await?;
                return Err(LifecycleError::InvalidTransition {
                    from: fresh.status,
                    to: target,
                }
                .into());
            }
        };

        info!(
            application_id = %application_id,
            from = %current,
            to = %target,
            actor = %actor.id,
            "application status updated"
        );

        self.dispatch_notification(&updated, &job, reason).await;
        Ok(updated)
    }

    /// Hand the lifecycle event to the notifier on a detached task,
    /// strictly after the transition is committed. The task outlives
    /// the request and its outcome is only ever logged — delivery
    /// failure never reverts or fails the transition.
    async fn dispatch_notification(&self, application: &Application, job: &Job, reason: Option<String>) {
        let applicant = match self.users.get_by_id(application.applicant_id).await {
            Ok(user) => user,
            Err(e) => {
                warn!(
                    application_id = %application.id,
                    error = %e,
                    "skipping notification: applicant lookup failed"
                );
                return;
            }
        };

        let event = LifecycleEvent {
            application_id: application.id,
            job_title: job.title.clone(),
            new_status: application.status,
            reason,
            required_documents: application.required_documents.clone(),
            recipient_phone: applicant.phone,
        };

        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            let application_id = event.application_id;
            let status = event.new_status;
            match notifier.notify(event).await {
                DispatchOutcome::Delivered => {
                    info!(application_id = %application_id, status = %status, "notification delivered");
                }
                DispatchOutcome::Failed => {
                    warn!(application_id = %application_id, status = %status, "notification dispatch failed");
                }
            }
        });
    }
}

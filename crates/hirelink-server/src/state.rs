//! Shared application state, constructed once at process start and
//! cloned into handlers — no lazy global instances.

use std::sync::Arc;

use hirelink_auth::{AccessGuard, AuthConfig, AuthService, SessionService};
use hirelink_db::repository::{
    SurrealApplicationRepository, SurrealJobRepository, SurrealSessionRepository,
    SurrealUserRepository,
};
use hirelink_lifecycle::LifecycleService;
use hirelink_notify::SmsDispatcher;
use surrealdb::{Connection, Surreal};

pub type Auth<C> = AuthService<SurrealUserRepository<C>, SurrealSessionRepository<C>>;
pub type Guard<C> = AccessGuard<SurrealUserRepository<C>, SurrealSessionRepository<C>>;
pub type Lifecycle<C> = LifecycleService<
    SurrealApplicationRepository<C>,
    SurrealJobRepository<C>,
    SurrealUserRepository<C>,
    SmsDispatcher,
>;

pub struct AppState<C: Connection> {
    pub auth: Auth<C>,
    pub guard: Guard<C>,
    pub lifecycle: Lifecycle<C>,
    pub jobs: SurrealJobRepository<C>,
    pub sessions: SurrealSessionRepository<C>,
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
            guard: self.guard.clone(),
            lifecycle: self.lifecycle.clone(),
            jobs: self.jobs.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

impl<C: Connection> AppState<C> {
    /// Wire repositories and services over a connected database handle.
    pub fn new(db: Surreal<C>, auth_config: AuthConfig, dispatcher: SmsDispatcher) -> Self {
        let users = SurrealUserRepository::new(db.clone());
        let sessions = SurrealSessionRepository::new(db.clone());
        let jobs = SurrealJobRepository::new(db.clone());
        let applications = SurrealApplicationRepository::new(db);

        let session_service =
            SessionService::new(users.clone(), sessions.clone(), auth_config);
        let auth = AuthService::new(users.clone(), session_service.clone());
        let guard = AccessGuard::new(session_service);
        let lifecycle =
            LifecycleService::new(applications, jobs.clone(), users, Arc::new(dispatcher));

        Self {
            auth,
            guard,
            lifecycle,
            jobs,
            sessions,
        }
    }
}

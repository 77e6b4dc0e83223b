//! SurrealDB repository implementations.

mod application;
mod job;
mod session;
mod user;

pub use application::SurrealApplicationRepository;
pub use job::SurrealJobRepository;
pub use session::SurrealSessionRepository;
pub use user::SurrealUserRepository;

//! cronvoy-engine: the schedule reconciliation engine.
//!
//! Translates a user-supplied schedule request into remote primitives (an
//! executable job plus a cron trigger), creates them with rollback on
//! partial failure, and projects remote jobs back into schedule listings.
//! The remote service is the source of truth; nothing is persisted here.

mod error;
mod policy;
mod resolver;
mod scheduler;
mod translate;

pub use error::SchedulerError;
pub use policy::MAX_SCHEDULE_NAME_LENGTH;
pub use scheduler::Scheduler;

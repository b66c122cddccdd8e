//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod exception_repo;
pub mod recurring_schedule_repo;

pub use exception_repo::ExceptionRepo;
pub use recurring_schedule_repo::RecurringScheduleRepo;

//! Repository Module
//!
//! Free functions over `SqlitePool`, one file per table group. They return
//! raw `sqlx::Error`; services decide what a missing row means.

pub mod analytics;
pub mod branch;
pub mod dashboard;
pub mod login_attempt;
pub mod loyalty;
pub mod menu;
pub mod order;
pub mod restaurant;
pub mod setting;
pub mod user;

pub type RepoResult<T> = Result<T, sqlx::Error>;

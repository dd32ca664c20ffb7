//! Domain models for the task board.
//!
//! - [`Stage`]: one of the four fixed pipeline stages, totally ordered.
//! - [`Task`]: a unit of work whose [`TaskId`] is derived once, at creation,
//!   from its stage and title.
//! - [`TaskUpdate`]: a partial edit with one optional value per mutable field.
//! - [`TaskRecord`]: the plain form of a task as it is persisted and handed to
//!   collaborators. Its stage is an unchecked string.

mod stage;
mod task;

pub use stage::*;
pub use task::*;

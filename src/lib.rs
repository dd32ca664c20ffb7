//! A single-user task board.
//!
//! Tasks move through four fixed stages (planning, development, qa,
//! deployment). The [`board::BoardSession`] owns the board, persists a full
//! snapshot to a [`db::KeyValueStore`] after every change and notifies its
//! observers, such as the text renderer in [`render`].

pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod render;

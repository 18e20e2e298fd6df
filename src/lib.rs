//! Drill trainer for Japanese verb conjugation.
//!
//! The [`engine`] conjugates verbs and samples what to ask next from the
//! practice history; [`session`] runs the quiz loop on top of it and
//! [`store`] keeps the history between runs.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod session;
pub mod store;

pub use self::error::DrillError;

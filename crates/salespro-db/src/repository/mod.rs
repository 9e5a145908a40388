//! # Repository Module
//!
//! One repository per entity. Each wraps the SQLite pool and publishes a
//! change signal after every successful mutation.

pub mod catalog;
pub mod expense;
pub mod inventory;
pub mod sale;

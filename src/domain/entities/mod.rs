//! Core domain entities.
//!
//! Entities are plain data structures. The only entity is [`Entry`], a short
//! name bound to a destination URL together with its redirect counter.

pub mod entry;

pub use entry::Entry;

//! Storage implementations of the domain repository traits.
//!
//! # Repositories
//!
//! - [`JsonEntryRepository`] - Entry collection kept in a single JSON file,
//!   replaced atomically on every mutation

pub mod json_entry_repository;

pub use json_entry_repository::JsonEntryRepository;

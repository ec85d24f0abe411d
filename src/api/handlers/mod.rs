//! HTTP request handlers for API endpoints.

pub mod entries;
pub mod health;
pub mod redirect;
pub mod shorten;

pub use entries::{entries_list_handler, entry_handler};
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;

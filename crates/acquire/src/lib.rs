//! `copycheck-acquire` — acquisition collaborators for content checks.
//!
//! Everything here touches the outside world: the live page, the reference
//! document on disk, and the external labeling service. The engine crate
//! stays pure; this crate feeds it.

pub mod document;
pub mod error;
pub mod html;
pub mod labeler;
pub mod page;

pub use document::read_reference_document;
pub use error::AcquireError;
pub use html::visible_text;
pub use labeler::{HttpLabeler, LabelText};
pub use page::PageClient;

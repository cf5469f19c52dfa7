//! Job search workflow: the session controller, page-window math, and the
//! session-scoped result cache.

pub mod cache;
pub mod pager;
pub mod session;

pub use session::{ResumeRef, SearchSession};

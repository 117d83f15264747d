//! Unify report builder adapter
//!
//! - [`session`] - login / saveReport state machine
//! - [`cookies`] - session cookie jar
//! - [`saved`] - save response document

pub mod cookies;
pub mod saved;
pub mod session;

pub use cookies::SessionCookies;
pub use saved::SavedReport;
pub use session::{SessionState, UnifySession};

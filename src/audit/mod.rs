//! Audit logging
//!
//! Every add, edit and removal is appended to a JSON-lines file next to the
//! data directory, with the record as stored before and after the change.

mod entry;
mod logger;

pub use entry::{Action, AuditEntry};
pub use logger::AuditLog;

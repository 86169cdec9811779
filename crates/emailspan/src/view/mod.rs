//! View components for the application.

mod creation;
mod header;
mod inboxes;
mod report;

pub use creation::view_creation;
pub use header::view_header;
pub use inboxes::view_inboxes;
pub use report::view_report;

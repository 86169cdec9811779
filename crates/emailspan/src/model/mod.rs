//! Screen state models.

mod creation;
mod inboxes;
mod settings;

pub use creation::{CreationState, INVALID_EMAIL};
pub use inboxes::{COPY_FEEDBACK, InboxesState};
pub use settings::AppSettings;

/// State for the report screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportState {
    /// Whether the share link was copied.
    pub link_copied: bool,
}

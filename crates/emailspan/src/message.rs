//! Message types for application events.
//!
//! In the Elm architecture, Messages are events that trigger state changes.

use emailspan_core::{SpamTest, SpamTestPatch};

use crate::model::AppSettings;

/// Application messages (events).
#[derive(Debug, Clone)]
pub enum Message {
    /// Create-test form messages.
    Creation(CreationMessage),
    /// Send and check screen messages.
    Inboxes(InboxesMessage),
    /// Report screen messages.
    Report(ReportMessage),

    // Settings
    /// Switch between light and dark theme.
    ToggleTheme,
    /// Settings loaded.
    SettingsLoaded(Result<AppSettings, String>),
    /// Settings saved.
    SettingsSaved(Result<(), String>),

    /// Startup health check finished.
    ConnectionChecked(bool),
}

/// Create-test form messages.
#[derive(Debug, Clone)]
pub enum CreationMessage {
    /// Email field changed.
    EmailChanged(String),
    /// Generate a test code.
    Submit,
    /// Identify and create finished. The error is already banner text.
    Created(Result<SpamTest, String>),
}

/// Send and check screen messages.
#[derive(Debug, Clone)]
pub enum InboxesMessage {
    /// Copy the test code to the clipboard.
    CopyCode,
    /// Copy confirmation timer elapsed.
    CopyFeedbackExpired(u64),
    /// Recipient field changed.
    RecipientChanged(String),
    /// Send the probe email.
    SendEmail,
    /// Probe send finished.
    EmailSent(Result<(), String>),
    /// Manual results check.
    CheckResults,
    /// Background results check.
    AutoCheckTick,
    /// Results check finished.
    Checked(Result<Option<SpamTestPatch>, String>),
}

/// Report screen messages.
#[derive(Debug, Clone, Copy)]
pub enum ReportMessage {
    /// Copy the hosted report link.
    ShareReport,
    /// Export the report as PDF.
    ExportPdf,
}

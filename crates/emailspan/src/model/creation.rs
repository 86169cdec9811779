//! Create-test form state.

/// Shown when the typed address fails the local check.
pub const INVALID_EMAIL: &str = "Please enter a valid email address";

/// State for the create-test form.
#[derive(Debug, Clone, Default)]
pub struct CreationState {
    /// Email address as typed.
    pub email: String,
    /// Whether identify/create is in flight.
    pub is_submitting: bool,
    /// Banner text of the last failure.
    pub error: Option<String>,
}

impl CreationState {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Address that will be submitted.
    #[must_use]
    pub fn submitted_email(&self) -> &str {
        self.email.trim()
    }
}

//! Deliverability test workflow.
//!
//! Three phases, forward only:
//!
//! ```text
//! Create --test_created--> Inboxes --test_processed--> Report
//! ```
//!
//! The workflow owns the current [`SpamTest`]. It is replaced wholesale on
//! every transition and never edited in place.

use std::fmt;
use std::time::Duration;

use tracing::info;

use crate::error::{Error, Result};
use crate::model::{SpamTest, SpamTestPatch};

/// Period of the background results check while a test is pending.
pub const AUTO_CHECK_INTERVAL: Duration = Duration::from_secs(30);

/// Screen the workflow is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Phase {
    /// Collecting the user's email and creating a test.
    #[default]
    Create,
    /// Sending the probe and waiting for results.
    Inboxes,
    /// Showing the deliverability report.
    Report,
}

impl Phase {
    /// All phases in order.
    pub const ALL: [Self; 3] = [Self::Create, Self::Inboxes, Self::Report];

    /// Position of the phase, starting at zero.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Create => 0,
            Self::Inboxes => 1,
            Self::Report => 2,
        }
    }

    /// Progress stepper label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Create => "1. Create Test",
            Self::Inboxes => "2. Send Email",
            Self::Report => "3. View Report",
        }
    }

    /// How this phase's step should be drawn while `current` is active.
    #[must_use]
    pub const fn step_state(self, current: Self) -> StepState {
        if self.index() == current.index() {
            StepState::Active
        } else if self.index() < current.index() {
            StepState::Completed
        } else {
            StepState::Upcoming
        }
    }

    /// Every phase with its step state while `current` is active.
    #[must_use]
    pub fn steps(current: Self) -> [(Self, StepState); 3] {
        Self::ALL.map(|phase| (phase, phase.step_state(current)))
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Inboxes => "inboxes",
            Self::Report => "report",
        };
        f.write_str(name)
    }
}

/// Rendering state of one progress step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    /// The current phase.
    Active,
    /// A phase already left behind.
    Completed,
    /// A phase not reached yet.
    Upcoming,
}

/// Session state shared by the three screens.
#[derive(Debug, Clone, Default)]
pub struct Workflow {
    phase: Phase,
    current_test: Option<SpamTest>,
    user_email: String,
}

impl Workflow {
    /// Creates a workflow on the create phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Most recent test, once one was created.
    #[must_use]
    pub const fn current_test(&self) -> Option<&SpamTest> {
        self.current_test.as_ref()
    }

    /// Email the user identified with.
    #[must_use]
    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    /// Moves from `Create` to `Inboxes` with the newly created test.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] outside the create phase.
    pub fn test_created(&mut self, test: SpamTest, user_email: impl Into<String>) -> Result<()> {
        self.expect_phase(Phase::Create, "record a created test")?;
        info!("Test {} created, waiting for probe", test.test_code);
        self.current_test = Some(test);
        self.user_email = user_email.into();
        self.phase = Phase::Inboxes;
        Ok(())
    }

    /// Moves from `Inboxes` to `Report` with the given test state.
    ///
    /// The test does not have to be completed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] outside the inboxes phase.
    pub fn test_processed(&mut self, test: SpamTest) -> Result<()> {
        self.expect_phase(Phase::Inboxes, "show a report")?;
        info!("Test {} processed ({:?})", test.test_code, test.status);
        self.current_test = Some(test);
        self.phase = Phase::Report;
        Ok(())
    }

    /// Applies a results check: overlays `update` on the current test, or
    /// keeps it as is when the backend sent nothing, then shows the report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] outside the inboxes phase.
    pub fn check_completed(&mut self, update: Option<&SpamTestPatch>) -> Result<()> {
        self.expect_phase(Phase::Inboxes, "apply a results check")?;
        let Some(current) = self.current_test.as_ref() else {
            return Err(Error::InvalidTransition {
                from: self.phase,
                action: "apply a results check without a test",
            });
        };
        let next = update.map_or_else(|| current.clone(), |patch| current.merged(patch));
        self.test_processed(next)
    }

    /// Returns true while the background results check should run.
    #[must_use]
    pub fn should_auto_check(&self) -> bool {
        self.phase == Phase::Inboxes && self.current_test.as_ref().is_some_and(SpamTest::is_pending)
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                from: self.phase,
                action,
            })
        }
    }
}

//! `EmailSpan` - Email deliverability tester
//!
//! A three-step wizard: create a test, send the probe email, read where it
//! landed across the major inbox providers.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod message;
mod model;
mod style;
mod view;

use chrono::Local;
use iced::widget::{column, container, scrollable};
use iced::{Element, Length, Subscription, Task};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use emailspan_core::{
    AUTO_CHECK_INTERVAL, ApiClient, ApiConfig, Error, GENERIC_CREATE_FAILURE, Phase, ProbeEmail,
    SendEmailRequest, SpamTest, SpamTestPatch, Workflow, creation_error_message, is_valid_email,
    resolve_recipient, share_url,
};
use emailspan_core::config::REPORT_ORIGIN_ENV;

use message::{CreationMessage, InboxesMessage, Message, ReportMessage};
use model::{
    AppSettings, COPY_FEEDBACK, CreationState, INVALID_EMAIL, InboxesState, ReportState,
};
use style::widgets;

fn main() -> iced::Result {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emailspan=debug,emailspan_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting EmailSpan");

    iced::application(EmailSpan::new, EmailSpan::update, EmailSpan::view)
        .title("EmailSpan")
        .subscription(EmailSpan::subscription)
        .run()
}

/// Main application state.
struct EmailSpan {
    /// Phase and current test.
    workflow: Workflow,
    /// Create screen state.
    creation: CreationState,
    /// Send and check screen state.
    inboxes: InboxesState,
    /// Report screen state.
    report: ReportState,
    /// Backend client, absent if it could not be built.
    api: Option<ApiClient>,
    /// Origin used for shared report links.
    report_origin: String,
    /// Persisted settings.
    settings: AppSettings,
    /// Result of the startup health check, once it ran.
    backend_online: Option<bool>,
}

impl EmailSpan {
    /// Create new application instance.
    fn new() -> (Self, Task<Message>) {
        let app = Self::with_settings(AppSettings::default());
        app.apply_theme();
        (app, Task::perform(load_settings(), Message::SettingsLoaded))
    }

    /// Builds the app around `settings` without touching disk or network.
    fn with_settings(settings: AppSettings) -> Self {
        let mut app = Self {
            workflow: Workflow::new(),
            creation: CreationState::new(),
            inboxes: InboxesState::new(),
            report: ReportState::default(),
            api: None,
            report_origin: String::new(),
            settings,
            backend_online: None,
        };
        app.configure_backend();
        app
    }

    /// Applies the current theme mode to the global palette.
    fn apply_theme(&self) {
        widgets::palette::set_theme(self.settings.theme_mode);
    }

    /// Rebuilds the backend client from settings and environment.
    fn configure_backend(&mut self) {
        let config = self.settings.api_config().unwrap_or_else(|e| {
            warn!("Ignoring invalid backend settings: {}", e);
            ApiConfig::default()
        });
        info!("Using backend {}", config.base_url);
        if config.report_origin_is_derived() {
            warn!(
                "No report origin configured, shared links point at {}; set {}",
                config.report_origin, REPORT_ORIGIN_ENV
            );
        }

        self.report_origin.clone_from(&config.report_origin);
        self.api = ApiClient::new(&config)
            .inspect_err(|e| error!("Failed to build API client: {}", e))
            .ok();
    }

    /// Update state based on message.
    #[allow(clippy::needless_pass_by_value)]
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Creation(msg) => return self.handle_creation(msg),
            Message::Inboxes(msg) => return self.handle_inboxes(msg),
            Message::Report(msg) => return self.handle_report(msg),
            Message::ToggleTheme => {
                self.settings.theme_mode = self.settings.theme_mode.toggled();
                self.apply_theme();
                info!("Theme changed to {:?}", self.settings.theme_mode);
                return Task::perform(save_settings(self.settings.clone()), Message::SettingsSaved);
            }
            Message::SettingsLoaded(result) => {
                match result {
                    Ok(settings) => {
                        info!("Settings loaded: theme={:?}", settings.theme_mode);
                        self.settings = settings;
                        self.apply_theme();
                        self.configure_backend();
                    }
                    Err(e) => warn!("Failed to load settings: {}", e),
                }
                return self.check_connection();
            }
            Message::SettingsSaved(result) => {
                if let Err(e) = result {
                    error!("Failed to save settings: {}", e);
                }
            }
            Message::ConnectionChecked(online) => {
                if !online {
                    warn!("Backend is not reachable, showing offline indicator");
                }
                self.backend_online = Some(online);
            }
        }
        Task::none()
    }

    /// Handle create-test form messages.
    fn handle_creation(&mut self, msg: CreationMessage) -> Task<Message> {
        match msg {
            CreationMessage::EmailChanged(email) => {
                self.creation.email = email;
            }
            CreationMessage::Submit => {
                if self.creation.is_submitting {
                    return Task::none();
                }
                self.creation.error = None;

                let email = self.creation.submitted_email().to_string();
                if !is_valid_email(&email) {
                    self.creation.error = Some(INVALID_EMAIL.to_string());
                    return Task::none();
                }
                let Some(api) = self.api.clone() else {
                    error!("No API client configured, cannot create test");
                    self.creation.error = Some(GENERIC_CREATE_FAILURE.to_string());
                    return Task::none();
                };

                self.creation.is_submitting = true;
                return Task::perform(start_test(api, email), |result| {
                    Message::Creation(CreationMessage::Created(result))
                });
            }
            CreationMessage::Created(result) => {
                self.creation.is_submitting = false;
                match result {
                    Ok(test) => {
                        let email = self.creation.submitted_email().to_string();
                        match self.workflow.test_created(test, email) {
                            Ok(()) => self.inboxes = InboxesState::new(),
                            Err(e) => error!("Dropping created test: {}", e),
                        }
                    }
                    Err(message) => self.creation.error = Some(message),
                }
            }
        }
        Task::none()
    }

    /// Handle send and check screen messages.
    fn handle_inboxes(&mut self, msg: InboxesMessage) -> Task<Message> {
        match msg {
            InboxesMessage::CopyCode => {
                let Some(code) = self.current_code() else {
                    return Task::none();
                };
                let generation = self.inboxes.mark_copied();
                return Task::batch([
                    iced::clipboard::write(code),
                    Task::perform(async { tokio::time::sleep(COPY_FEEDBACK).await }, move |()| {
                        Message::Inboxes(InboxesMessage::CopyFeedbackExpired(generation))
                    }),
                ]);
            }
            InboxesMessage::CopyFeedbackExpired(generation) => {
                self.inboxes.expire_copied(generation);
            }
            InboxesMessage::RecipientChanged(recipient) => {
                self.inboxes.recipient = recipient;
            }
            InboxesMessage::SendEmail => return self.start_send(),
            InboxesMessage::EmailSent(result) => {
                self.inboxes.is_sending = false;
                match result {
                    Ok(()) => info!("Test email sent"),
                    Err(e) => error!("Failed to send test email: {}", e),
                }
            }
            InboxesMessage::CheckResults | InboxesMessage::AutoCheckTick => {
                return self.start_check();
            }
            InboxesMessage::Checked(result) => {
                self.inboxes.is_checking = false;
                self.inboxes.last_checked = Some(Local::now());
                match result {
                    Ok(update) => match self.workflow.check_completed(update.as_ref()) {
                        Ok(()) => self.report = ReportState::default(),
                        Err(e) => warn!("Ignoring late results check: {}", e),
                    },
                    Err(e) => error!("Failed to check results: {}", e),
                }
            }
        }
        Task::none()
    }

    /// Handle report screen messages.
    fn handle_report(&mut self, msg: ReportMessage) -> Task<Message> {
        let Some(code) = self.current_code() else {
            return Task::none();
        };
        match msg {
            ReportMessage::ShareReport => {
                let url = share_url(&self.report_origin, &code);
                info!("Copied report link {}", url);
                self.report.link_copied = true;
                iced::clipboard::write(url)
            }
            ReportMessage::ExportPdf => {
                info!("Export PDF requested for test {}", code);
                Task::none()
            }
        }
    }

    /// Sends the probe to the typed recipient or the identify address.
    fn start_send(&mut self) -> Task<Message> {
        if self.inboxes.is_sending {
            return Task::none();
        }
        let Some(code) = self.current_code() else {
            error!("No test code to send");
            return Task::none();
        };
        let Some(recipient) = resolve_recipient(&self.inboxes.recipient, self.workflow.user_email())
        else {
            error!("Not sending test email: {}", Error::MissingRecipient);
            return Task::none();
        };
        let Some(api) = self.api.clone() else {
            error!("No API client configured, cannot send test email");
            return Task::none();
        };

        self.inboxes.is_sending = true;
        let request = SendEmailRequest::from(ProbeEmail::compose(&code, &recipient));
        Task::perform(send_test_email(api, request), |result| {
            Message::Inboxes(InboxesMessage::EmailSent(result))
        })
    }

    /// Starts a results check unless one is already running.
    fn start_check(&mut self) -> Task<Message> {
        if self.inboxes.is_checking || self.workflow.phase() != Phase::Inboxes {
            return Task::none();
        }
        let (Some(code), Some(api)) = (self.current_code(), self.api.clone()) else {
            return Task::none();
        };

        self.inboxes.is_checking = true;
        Task::perform(process_test(api, code), |result| {
            Message::Inboxes(InboxesMessage::Checked(result))
        })
    }

    fn check_connection(&self) -> Task<Message> {
        match self.api.clone() {
            Some(api) => Task::perform(
                async move { api.check_connection().await },
                Message::ConnectionChecked,
            ),
            None => Task::done(Message::ConnectionChecked(false)),
        }
    }

    fn current_code(&self) -> Option<String> {
        self.workflow
            .current_test()
            .map(|test| test.test_code.clone())
            .filter(|code| !code.is_empty())
    }

    /// Render current state as UI.
    fn view(&self) -> Element<'_, Message> {
        let header = view::view_header(
            self.workflow.phase(),
            self.backend_online == Some(false),
            self.settings.theme_mode,
        );

        let screen = match (self.workflow.phase(), self.workflow.current_test()) {
            (Phase::Inboxes, Some(test)) => view::view_inboxes(
                Some(test.test_code.as_str()).filter(|code| !code.is_empty()),
                self.workflow.user_email(),
                &self.inboxes,
            ),
            (Phase::Report, Some(test)) => view::view_report(test, self.report),
            _ => view::view_creation(&self.creation),
        };

        let panel = container(screen)
            .padding(32)
            .max_width(820)
            .style(widgets::panel_style);

        let body = scrollable(container(panel).padding(24).center_x(Length::Fill))
            .height(Length::Fill)
            .style(widgets::scrollable_style);

        container(column![header, body])
            .width(Length::Fill)
            .height(Length::Fill)
            .style(widgets::background_style)
            .into()
    }

    /// Background results check, only while the test is pending.
    fn subscription(&self) -> Subscription<Message> {
        if self.workflow.should_auto_check() {
            iced::time::every(AUTO_CHECK_INTERVAL)
                .map(|_| Message::Inboxes(InboxesMessage::AutoCheckTick))
        } else {
            Subscription::none()
        }
    }
}

// Async helper functions

/// Identify the user, then create their test.
async fn start_test(api: ApiClient, email: String) -> Result<SpamTest, String> {
    api.start_test(&email).await.map_err(|e| {
        error!("Failed to create test for {}: {}", email, e);
        creation_error_message(&e)
    })
}

/// Dispatch the probe email.
async fn send_test_email(api: ApiClient, request: SendEmailRequest) -> Result<(), String> {
    api.send_test_email(&request).await.map_err(|e| e.to_string())
}

/// Ask the backend to evaluate the test.
async fn process_test(api: ApiClient, code: String) -> Result<Option<SpamTestPatch>, String> {
    api.process_test(&code).await.map_err(|e| e.to_string())
}

fn settings_dir() -> std::path::PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("emailspan")
}

/// Load application settings from file.
async fn load_settings() -> Result<AppSettings, String> {
    let settings_path = settings_dir().join("settings.json");

    if !settings_path.exists() {
        return Ok(AppSettings::default());
    }

    let contents = tokio::fs::read_to_string(&settings_path)
        .await
        .map_err(|e| e.to_string())?;

    serde_json::from_str(&contents).map_err(|e| e.to_string())
}

/// Save application settings to file.
async fn save_settings(settings: AppSettings) -> Result<(), String> {
    let config_dir = settings_dir();

    tokio::fs::create_dir_all(&config_dir)
        .await
        .map_err(|e| e.to_string())?;

    let settings_path = config_dir.join("settings.json");
    let contents = serde_json::to_string_pretty(&settings).map_err(|e| e.to_string())?;

    tokio::fs::write(&settings_path, contents)
        .await
        .map_err(|e| e.to_string())?;

    info!("Settings saved to {:?}", settings_path);
    Ok(())
}

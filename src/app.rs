//! Application state management for CityScope.
//!
//! This module contains the core `App` struct: session and gateway wiring,
//! per-screen UI state, and the background refresh channel. All session
//! mutations happen here, on the event-loop task; background fetches only
//! send messages.

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::auth::{SessionStatus, SessionStore, TokenStore};
use crate::config::Config;
use crate::models::{
    Category, Contribution, ForumTopic, GeneratedRoute, NewAccount, NewContribution, NewTopic,
    ProfileUpdate, RouteRequest, StartLocation, User, ROUTE_THEMES,
};
use crate::ui::guard::{self, Gate};
use crate::utils::contains_ignore_case;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// 32 leaves headroom over the handful of refresh fetches in flight at once.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for email input. Covers real-world addresses.
const MAX_EMAIL_LENGTH: usize = 80;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for single-line text fields (titles, names, locations)
const MAX_FIELD_LENGTH: usize = 120;

/// Maximum length for multi-line text fields (descriptions, messages, bios)
const MAX_TEXT_LENGTH: usize = 2000;

/// Number of items to scroll on page up/down
pub const PAGE_SCROLL_SIZE: usize = 10;

// ============================================================================
// UI State Types
// ============================================================================

/// Top-level screens. `Auth` is the login surface the guard redirects to;
/// the other four mirror the platform's navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Map,
    Agora,
    Echappees,
    Profile,
    Auth,
}

impl Screen {
    /// Next main tab (wrapping; Auth is not part of the cycle)
    pub fn next(&self) -> Self {
        match self {
            Screen::Map => Screen::Agora,
            Screen::Agora => Screen::Echappees,
            Screen::Echappees => Screen::Profile,
            Screen::Profile => Screen::Map,
            Screen::Auth => Screen::Auth,
        }
    }

    /// Previous main tab (wrapping)
    pub fn prev(&self) -> Self {
        match self {
            Screen::Map => Screen::Profile,
            Screen::Agora => Screen::Map,
            Screen::Echappees => Screen::Agora,
            Screen::Profile => Screen::Echappees,
            Screen::Auth => Screen::Auth,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    ComposingContribution,
    ComposingTopic,
    EditingProfile,
    ConfirmingQuit,
    Quitting,
}

/// Auth screen mode, login or register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

/// Auth form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFocus {
    Name,
    Email,
    Password,
    Button,
}

/// Login/register form on the auth screen
#[derive(Debug, Default)]
pub struct AuthForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

/// New-contribution form fields
#[derive(Debug, Default)]
pub struct ContributionForm {
    pub title: String,
    pub description: String,
    pub category: Option<Category>,
    pub on_description: bool,
}

impl ContributionForm {
    pub fn category(&self) -> Category {
        self.category.unwrap_or(Category::General)
    }
}

/// New-topic form fields for the Agora
#[derive(Debug, Default)]
pub struct TopicForm {
    pub title: String,
    pub description: String,
    pub on_description: bool,
}

/// Profile edit form focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Location,
    Bio,
}

/// Profile edit form fields
#[derive(Debug, Default)]
pub struct ProfileForm {
    pub name: String,
    pub location: String,
    pub bio: String,
}

/// Agora sub-view: topic list or a single thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgoraView {
    Topics,
    Thread,
}

/// Contribution category layer toggles, mirroring the map layer controls
#[derive(Debug, Clone, Copy)]
pub struct Layers {
    pub all: bool,
    enabled: [bool; 4],
}

impl Default for Layers {
    fn default() -> Self {
        Self {
            all: true,
            enabled: [true; 4],
        }
    }
}

impl Layers {
    fn index(category: Category) -> usize {
        match category {
            Category::General => 0,
            Category::Infrastructure => 1,
            Category::Culture => 2,
            Category::Environment => 3,
        }
    }

    pub fn is_visible(&self, category: Category) -> bool {
        self.all || self.enabled[Self::index(category)]
    }

    /// Toggle one layer; touching an individual layer drops the "all" state
    pub fn toggle(&mut self, category: Category) {
        if self.all {
            self.all = false;
            self.enabled = [false; 4];
            self.enabled[Self::index(category)] = true;
        } else {
            let i = Self::index(category);
            self.enabled[i] = !self.enabled[i];
        }
    }

    pub fn toggle_all(&mut self) {
        self.all = !self.all;
        self.enabled = [self.all; 4];
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Messages from background refresh tasks back to the event loop
enum Msg {
    /// Shared map contributions
    Contributions(Vec<Contribution>),
    /// The current user's own contributions (profile screen)
    OwnContributions(Vec<Contribution>),
    /// Agora topic list
    Topics(Vec<ForumTopic>),
    /// A single topic with its full message thread
    Thread(ForumTopic),
    /// A background call was answered with 401; the gateway already cleared
    /// the token slot, the app must finish the forced logout
    SessionExpired,
    /// A background fetch failed for some other reason
    Error(String),
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    pub session: SessionStore,
    pub api: ApiClient,

    // UI state
    pub state: AppState,
    pub screen: Screen,
    pub search_query: String,
    pub layers: Layers,
    pub status_message: Option<String>,

    // Auth screen
    pub auth_mode: AuthMode,
    pub auth_focus: AuthFocus,
    pub auth_form: AuthForm,

    // Map screen
    pub contributions: Vec<Contribution>,
    pub contribution_selection: usize,
    pub contribution_form: ContributionForm,

    // Agora screen
    pub topics: Vec<ForumTopic>,
    pub topic_selection: usize,
    pub agora_view: AgoraView,
    pub open_topic: Option<ForumTopic>,
    pub message_input: String,
    pub topic_form: TopicForm,

    // Échappées screen
    pub theme_selection: usize,
    pub generated_route: Option<GeneratedRoute>,

    // Profile screen
    pub own_contributions: Vec<Contribution>,
    pub profile_form: ProfileForm,
    pub profile_field: ProfileField,

    // Background task channel
    msg_rx: mpsc::Receiver<Msg>,
    msg_tx: mpsc::Sender<Msg>,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let cache_dir = Config::cache_dir()?;
        let tokens = TokenStore::open(cache_dir)?;
        let api = ApiClient::new(config.api_url(), tokens.clone())?;
        let session = SessionStore::new(tokens);

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        // Prefill the login form from env vars or the last session
        let email = std::env::var("CITYSCOPE_EMAIL")
            .ok()
            .or_else(|| config.last_email.clone())
            .unwrap_or_default();
        let password = std::env::var("CITYSCOPE_PASSWORD").unwrap_or_default();

        Ok(Self {
            config,
            session,
            api,

            state: AppState::Normal,
            screen: Screen::Map,
            search_query: String::new(),
            layers: Layers::default(),
            status_message: None,

            auth_mode: AuthMode::Login,
            auth_focus: if email.is_empty() {
                AuthFocus::Email
            } else {
                AuthFocus::Password
            },
            auth_form: AuthForm {
                email,
                password,
                ..Default::default()
            },

            contributions: Vec::new(),
            contribution_selection: 0,
            contribution_form: ContributionForm::default(),

            topics: Vec::new(),
            topic_selection: 0,
            agora_view: AgoraView::Topics,
            open_topic: None,
            message_input: String::new(),
            topic_form: TopicForm::default(),

            theme_selection: 0,
            generated_route: None,

            own_contributions: Vec::new(),
            profile_form: ProfileForm::default(),
            profile_field: ProfileField::Name,

            msg_rx: rx,
            msg_tx: tx,
        })
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Resolve any persisted token before the first frame renders protected
    /// content, then kick off the initial data refresh.
    pub async fn initialize(&mut self) {
        self.session.initialize(&self.api).await;
        self.enforce_guard();
        self.refresh_all_background();
    }

    /// Attempt login with the form credentials.
    /// On failure the session is untouched and the form shows the error.
    pub async fn attempt_login(&mut self) {
        let email = self.auth_form.email.trim().to_string();
        let password = self.auth_form.password.clone();

        if email.is_empty() || password.is_empty() {
            self.auth_form.error = Some("Email and password required".to_string());
            return;
        }

        self.auth_form.error = None;

        match self.session.login(&self.api, &email, &password).await {
            Ok(user) => {
                self.config.last_email = Some(email);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
                self.finish_sign_in(&user);
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                self.auth_form.error = Some(Self::auth_error_message(&e));
            }
        }
    }

    /// Attempt registration; success behaves like login
    pub async fn attempt_register(&mut self) {
        let name = self.auth_form.name.trim().to_string();
        let email = self.auth_form.email.trim().to_string();
        let password = self.auth_form.password.clone();

        if name.is_empty() || email.is_empty() || password.is_empty() {
            self.auth_form.error = Some("Name, email and password required".to_string());
            return;
        }

        self.auth_form.error = None;

        let account = NewAccount {
            name,
            email: email.clone(),
            password,
        };

        match self.session.register(&self.api, account).await {
            Ok(user) => {
                self.config.last_email = Some(email);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
                self.finish_sign_in(&user);
            }
            Err(e) => {
                error!(error = %e, "Registration failed");
                self.auth_form.error = Some(Self::auth_error_message(&e));
            }
        }
    }

    /// Request a password-reset email for the address in the form
    pub async fn request_password_reset(&mut self) {
        let email = self.auth_form.email.trim().to_string();
        if email.is_empty() {
            self.auth_form.error = Some("Enter your email first".to_string());
            return;
        }

        match self.api.forgot_password(&email).await {
            Ok(response) => {
                self.status_message = Some(
                    response
                        .message
                        .unwrap_or_else(|| "Password reset email sent".to_string()),
                );
            }
            Err(e) => {
                self.auth_form.error = Some(Self::auth_error_message(&e));
            }
        }
    }

    fn finish_sign_in(&mut self, user: &User) {
        self.auth_form.password.clear();
        self.profile_form_from(user);
        self.screen = Screen::Map;
        self.status_message = Some(format!("Welcome, {}", user.name));
        self.refresh_all_background();
    }

    /// User-facing message for auth screen failures
    fn auth_error_message(error: &ApiError) -> String {
        match error {
            ApiError::Unauthorized(msg) if !msg.is_empty() && msg != "no response body" => {
                msg.clone()
            }
            ApiError::Unauthorized(_) => "Invalid email or password".to_string(),
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Network(_) => {
                "Unable to connect to server. Check your internet connection.".to_string()
            }
            other => format!("Sign in failed: {}", other),
        }
    }

    /// Log out: immediate, no network call awaited
    pub fn logout(&mut self) {
        self.session.logout();
        self.discard_private_state();
        self.status_message = Some("Logged out".to_string());
    }

    /// Forced logout after any call came back 401. The gateway has already
    /// cleared the token slot; repeating that inside `expire` is harmless.
    fn handle_session_expired(&mut self) {
        self.session.expire();
        self.discard_private_state();
        self.status_message = Some("Session expired. Please log in again.".to_string());
    }

    /// Drop everything tied to the old session, unsaved form input included,
    /// and land on the auth screen. The auth screen is public and issues no
    /// authorized calls, so the redirect cannot loop.
    fn discard_private_state(&mut self) {
        self.own_contributions.clear();
        self.topics.clear();
        self.open_topic = None;
        self.agora_view = AgoraView::Topics;
        self.message_input.clear();
        self.contribution_form = ContributionForm::default();
        self.topic_form = TopicForm::default();
        self.generated_route = None;
        self.state = AppState::Normal;
        self.screen = Screen::Auth;
    }

    /// React to an error from an inline (awaited) authorized call.
    /// 401 forces the logout transition; everything else becomes a status
    /// message and the screen state is left alone.
    fn handle_api_error(&mut self, context: &str, error: ApiError) {
        if error.is_auth_expired() {
            self.handle_session_expired();
        } else {
            error!(error = %error, "{} failed", context);
            self.status_message = Some(format!("{} failed: {}", context, error));
        }
    }

    // =========================================================================
    // Screen guard
    // =========================================================================

    /// Enforce the guard: a protected screen with a settled, unauthenticated
    /// session redirects to the auth surface. Called whenever session state
    /// or the current screen changes. `Resolving` is left to the renderer,
    /// which shows the loading placeholder.
    pub fn enforce_guard(&mut self) {
        if guard::gate(self.screen, self.session.status()) == Gate::Login {
            debug!(screen = ?self.screen, "Guard redirect to auth");
            self.screen = Screen::Auth;
        }
    }

    /// Switch to a screen, letting the guard veto protected destinations
    pub fn navigate(&mut self, screen: Screen) {
        self.screen = screen;
        self.enforce_guard();
        if self.screen == screen {
            self.on_screen_entered();
        }
    }

    fn on_screen_entered(&mut self) {
        match self.screen {
            Screen::Agora => {
                self.agora_view = AgoraView::Topics;
                self.refresh_topics();
            }
            Screen::Profile => {
                if let Some(user) = self.session.user() {
                    let user = user.clone();
                    self.profile_form_from(&user);
                }
                self.refresh_own_contributions();
            }
            Screen::Map => self.refresh_contributions(),
            _ => {}
        }
    }

    // =========================================================================
    // Background refresh
    // =========================================================================

    /// Helper to send messages, logging any channel errors
    async fn send_msg(tx: &mpsc::Sender<Msg>, msg: Msg) {
        if let Err(e) = tx.send(msg).await {
            error!(error = %e, "Failed to send refresh result - channel closed");
        }
    }

    /// Translate a background fetch result into channel messages
    async fn send_fetch_result<T>(
        tx: &mpsc::Sender<Msg>,
        name: &str,
        result: Result<T, ApiError>,
        wrapper: fn(T) -> Msg,
    ) {
        match result {
            Ok(data) => {
                debug!("{} fetched", name);
                Self::send_msg(tx, wrapper(data)).await;
            }
            Err(e) if e.is_auth_expired() => {
                warn!("{} fetch hit an expired session", name);
                Self::send_msg(tx, Msg::SessionExpired).await;
            }
            Err(e) => {
                error!(error = %e, "{} fetch failed", name);
                Self::send_msg(tx, Msg::Error(format!("{}: {}", name, e))).await;
            }
        }
    }

    /// Refresh everything the current session can see, concurrently, in one
    /// background task
    pub fn refresh_all_background(&self) {
        let api = self.api.clone();
        let tx = self.msg_tx.clone();
        let authenticated = self.session.is_authenticated();
        tokio::spawn(async move {
            if authenticated {
                let (contributions, topics, own) = futures::future::join3(
                    api.fetch_contributions(),
                    api.fetch_topics(),
                    api.fetch_own_contributions(),
                )
                .await;
                Self::send_fetch_result(&tx, "Contributions", contributions, Msg::Contributions)
                    .await;
                Self::send_fetch_result(&tx, "Topics", topics, Msg::Topics).await;
                Self::send_fetch_result(&tx, "Your contributions", own, Msg::OwnContributions)
                    .await;
            } else {
                let result = api.fetch_contributions().await;
                Self::send_fetch_result(&tx, "Contributions", result, Msg::Contributions).await;
            }
        });
    }

    /// Refresh the shared contribution map in the background
    pub fn refresh_contributions(&self) {
        let api = self.api.clone();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_contributions().await;
            Self::send_fetch_result(&tx, "Contributions", result, Msg::Contributions).await;
        });
    }

    /// Refresh the Agora topic list in the background
    pub fn refresh_topics(&self) {
        let api = self.api.clone();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_topics().await;
            Self::send_fetch_result(&tx, "Topics", result, Msg::Topics).await;
        });
    }

    /// Refresh the current user's contributions in the background
    pub fn refresh_own_contributions(&self) {
        let api = self.api.clone();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_own_contributions().await;
            Self::send_fetch_result(&tx, "Your contributions", result, Msg::OwnContributions).await;
        });
    }

    /// Load the full thread for a topic in the background
    pub fn open_thread(&mut self, index: usize) {
        let Some(topic) = self.sorted_topics().get(index).map(|&t| t.clone()) else {
            return;
        };

        // Show what we have immediately; the full thread replaces it
        self.open_topic = Some(topic.clone());
        self.agora_view = AgoraView::Thread;
        self.message_input.clear();

        let api = self.api.clone();
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_topic(&topic.id).await;
            Self::send_fetch_result(&tx, "Thread", result, Msg::Thread).await;
        });
    }

    /// Drain and process completed background tasks
    pub fn check_background_tasks(&mut self) {
        let mut messages = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            messages.push(msg);
        }
        for msg in messages {
            self.process_msg(msg);
        }
    }

    fn process_msg(&mut self, msg: Msg) {
        match msg {
            Msg::Contributions(data) => {
                info!(count = data.len(), "Contributions refreshed");
                self.contributions = data;
                self.contribution_selection = self
                    .contribution_selection
                    .min(self.filtered_contributions().len().saturating_sub(1));
            }
            Msg::OwnContributions(data) => {
                self.own_contributions = data;
            }
            Msg::Topics(data) => {
                info!(count = data.len(), "Topics refreshed");
                self.topics = data;
                self.topic_selection = self.topic_selection.min(self.topics.len().saturating_sub(1));
            }
            Msg::Thread(topic) => {
                // Ignore a late thread for a topic we've navigated away from
                if self
                    .open_topic
                    .as_ref()
                    .is_some_and(|open| open.id == topic.id)
                {
                    self.open_topic = Some(topic);
                }
            }
            Msg::SessionExpired => {
                self.handle_session_expired();
            }
            Msg::Error(msg) => {
                error!(error = %msg, "Background task error");
                self.status_message = Some(msg);
            }
        }
    }

    // =========================================================================
    // Contributions
    // =========================================================================

    /// Contributions matching the active search query and layer toggles
    pub fn filtered_contributions(&self) -> Vec<&Contribution> {
        self.contributions
            .iter()
            .filter(|c| self.layers.is_visible(c.category))
            .filter(|c| {
                self.search_query.is_empty()
                    || contains_ignore_case(&c.title, &self.search_query)
                    || contains_ignore_case(&c.description, &self.search_query)
            })
            .collect()
    }

    /// Submit the new-contribution form at the configured home position
    pub async fn submit_contribution(&mut self) {
        let title = self.contribution_form.title.trim().to_string();
        let description = self.contribution_form.description.trim().to_string();

        if title.is_empty() || description.is_empty() {
            self.status_message = Some("Please fill in all fields".to_string());
            return;
        }

        let (latitude, longitude) = self.config.home_position();
        let contribution = NewContribution {
            title,
            description,
            category: self.contribution_form.category(),
            latitude,
            longitude,
        };

        match self.api.create_contribution(&contribution).await {
            Ok(created) => {
                info!(id = %created.id, "Contribution created");
                self.contributions.push(created);
                self.contribution_form = ContributionForm::default();
                self.state = AppState::Normal;
                self.status_message = Some("Contribution added".to_string());
            }
            Err(e) => self.handle_api_error("Contribution", e),
        }
    }

    // =========================================================================
    // Agora
    // =========================================================================

    /// Topics sorted newest first
    pub fn sorted_topics(&self) -> Vec<&ForumTopic> {
        let mut topics: Vec<&ForumTopic> = self.topics.iter().collect();
        topics.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        topics
    }

    /// Post the composed message to the open thread
    pub async fn submit_message(&mut self) {
        let content = self.message_input.trim().to_string();
        if content.is_empty() {
            return;
        }

        let Some(topic_id) = self.open_topic.as_ref().map(|t| t.id.clone()) else {
            return;
        };

        match self.api.post_message(&topic_id, &content).await {
            Ok(message) => {
                if let Some(ref mut topic) = self.open_topic {
                    topic.messages.push(message);
                }
                self.message_input.clear();
            }
            Err(e) => self.handle_api_error("Message", e),
        }
    }

    /// Submit the new-topic form
    pub async fn submit_topic(&mut self) {
        let title = self.topic_form.title.trim().to_string();
        let description = self.topic_form.description.trim().to_string();

        if title.is_empty() || description.is_empty() {
            self.status_message = Some("Please fill in all fields".to_string());
            return;
        }

        let topic = NewTopic {
            title,
            description,
            category: None,
        };

        match self.api.create_topic(&topic).await {
            Ok(created) => {
                info!(id = %created.id, "Topic created");
                self.topics.push(created);
                self.topic_form = TopicForm::default();
                self.state = AppState::Normal;
                self.status_message = Some("Topic created".to_string());
            }
            Err(e) => self.handle_api_error("Topic", e),
        }
    }

    // =========================================================================
    // Échappées
    // =========================================================================

    /// Generate a route for the selected theme from the home position
    pub async fn generate_route(&mut self) {
        let theme = ROUTE_THEMES[self.theme_selection % ROUTE_THEMES.len()];
        let (lat, lng) = self.config.home_position();

        self.status_message = Some(format!("Generating {} route...", theme.name));
        let request = RouteRequest {
            theme: theme.id,
            start_location: StartLocation { lat, lng },
        };

        match self.api.generate_route(&request).await {
            Ok(route) => {
                info!(theme = theme.id, points = route.points.len(), "Route generated");
                self.generated_route = Some(route);
                self.status_message = Some("Route generated".to_string());
            }
            Err(e) => self.handle_api_error("Route generation", e),
        }
    }

    // =========================================================================
    // Profile
    // =========================================================================

    fn profile_form_from(&mut self, user: &User) {
        self.profile_form = ProfileForm {
            name: user.name.clone(),
            location: user.location.clone().unwrap_or_default(),
            bio: user.bio.clone().unwrap_or_default(),
        };
        self.profile_field = ProfileField::Name;
    }

    /// Submit the profile edit form. On failure the displayed profile is
    /// untouched - the session store only replaces the user on success.
    pub async fn submit_profile_update(&mut self) {
        let update = ProfileUpdate {
            name: Some(self.profile_form.name.trim().to_string()),
            location: Some(self.profile_form.location.trim().to_string()),
            bio: Some(self.profile_form.bio.trim().to_string()),
            interests: None,
        };

        match self.session.update_profile(&self.api, &update).await {
            Ok(user) => {
                self.profile_form_from(&user);
                self.state = AppState::Normal;
                self.status_message = Some("Profile updated".to_string());
            }
            Err(e) => self.handle_api_error("Profile update", e),
        }
    }

    // =========================================================================
    // Input helpers
    // =========================================================================

    pub fn can_add_email_char(&self) -> bool {
        self.auth_form.email.len() < MAX_EMAIL_LENGTH
    }

    pub fn can_add_password_char(&self) -> bool {
        self.auth_form.password.len() < MAX_PASSWORD_LENGTH
    }

    pub fn can_add_field_char(s: &str) -> bool {
        s.len() < MAX_FIELD_LENGTH
    }

    pub fn can_add_text_char(s: &str) -> bool {
        s.len() < MAX_TEXT_LENGTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_default_shows_everything() {
        let layers = Layers::default();
        for category in Category::ALL {
            assert!(layers.is_visible(category));
        }
    }

    #[test]
    fn test_toggling_a_layer_drops_all() {
        let mut layers = Layers::default();
        layers.toggle(Category::Culture);
        assert!(!layers.all);
        assert!(layers.is_visible(Category::Culture));
        assert!(!layers.is_visible(Category::General));
        assert!(!layers.is_visible(Category::Environment));
    }

    #[test]
    fn test_toggle_all_restores_everything() {
        let mut layers = Layers::default();
        layers.toggle(Category::Culture);
        layers.toggle_all();
        for category in Category::ALL {
            assert!(layers.is_visible(category));
        }
    }

    #[test]
    fn test_screen_cycle_skips_auth() {
        let mut screen = Screen::Map;
        for _ in 0..4 {
            screen = screen.next();
            assert_ne!(screen, Screen::Auth);
        }
        assert_eq!(screen, Screen::Map);
        assert_eq!(Screen::Map.prev(), Screen::Profile);
    }
}

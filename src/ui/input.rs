//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{
    AgoraView, App, AppState, AuthFocus, AuthMode, ProfileField, Screen, PAGE_SCROLL_SIZE,
};
use crate::models::{Category, ROUTE_THEMES};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle form overlays
    if matches!(app.state, AppState::ComposingContribution) {
        return handle_contribution_form(app, key).await;
    }

    if matches!(app.state, AppState::ComposingTopic) {
        return handle_topic_form(app, key).await;
    }

    if matches!(app.state, AppState::EditingProfile) {
        return handle_profile_form(app, key).await;
    }

    // Handle search mode
    if matches!(app.state, AppState::Searching) {
        return handle_search_input(app, key);
    }

    // The auth screen owns the keyboard while visible
    if app.screen == Screen::Auth {
        return handle_auth_input(app, key).await;
    }

    // An open Agora thread owns the keyboard for message composition
    if app.screen == Screen::Agora && app.agora_view == AgoraView::Thread {
        return handle_thread_input(app, key).await;
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Char('1') => app.navigate(Screen::Map),
        KeyCode::Char('2') => app.navigate(Screen::Agora),
        KeyCode::Char('3') => app.navigate(Screen::Echappees),
        KeyCode::Char('4') => app.navigate(Screen::Profile),
        KeyCode::Tab => {
            let next = app.screen.next();
            app.navigate(next);
        }
        KeyCode::BackTab => {
            let prev = app.screen.prev();
            app.navigate(prev);
        }
        KeyCode::Char('u') => {
            app.refresh_all_background();
            app.status_message = Some("Refreshing...".to_string());
        }
        KeyCode::Char('x') => {
            if app.session.is_authenticated() {
                app.logout();
            }
        }
        _ => return handle_screen_input(app, key).await,
    }

    Ok(false)
}

/// Screen-specific keys once the global ones didn't match
async fn handle_screen_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.screen {
        Screen::Map => handle_map_input(app, key).await,
        Screen::Agora => handle_agora_input(app, key),
        Screen::Echappees => handle_echappees_input(app, key).await,
        Screen::Profile => handle_profile_screen_input(app, key),
        // Reaching here with Screen::Auth would mean the auth handler above
        // was bypassed; ignore rather than act on stray keys
        Screen::Auth => Ok(false),
    }
}

async fn handle_map_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    let count = app.filtered_contributions().len();
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            if count > 0 {
                app.contribution_selection = (app.contribution_selection + 1).min(count - 1);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.contribution_selection = app.contribution_selection.saturating_sub(1);
        }
        KeyCode::PageDown => {
            if count > 0 {
                app.contribution_selection =
                    (app.contribution_selection + PAGE_SCROLL_SIZE).min(count - 1);
            }
        }
        KeyCode::PageUp => {
            app.contribution_selection =
                app.contribution_selection.saturating_sub(PAGE_SCROLL_SIZE);
        }
        KeyCode::Char('/') => {
            app.state = AppState::Searching;
        }
        KeyCode::Char('l') => {
            // Cycle which layer the selected contribution's category toggles
            let category = app
                .filtered_contributions()
                .get(app.contribution_selection)
                .map(|c| c.category)
                .unwrap_or(Category::General);
            app.layers.toggle(category);
            app.contribution_selection = 0;
        }
        KeyCode::Char('L') => {
            app.layers.toggle_all();
            app.contribution_selection = 0;
        }
        KeyCode::Char('a') => {
            // Adding a contribution requires an account
            if app.session.is_authenticated() {
                app.state = AppState::ComposingContribution;
            } else {
                app.status_message = Some("Please log in to add a contribution".to_string());
                app.navigate(Screen::Auth);
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_agora_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    let count = app.topics.len();
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            if count > 0 {
                app.topic_selection = (app.topic_selection + 1).min(count - 1);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.topic_selection = app.topic_selection.saturating_sub(1);
        }
        KeyCode::Enter => {
            app.open_thread(app.topic_selection);
        }
        KeyCode::Char('n') => {
            app.state = AppState::ComposingTopic;
        }
        _ => {}
    }
    Ok(false)
}

async fn handle_thread_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.agora_view = AgoraView::Topics;
            app.open_topic = None;
            app.message_input.clear();
        }
        KeyCode::Enter => {
            app.submit_message().await;
        }
        KeyCode::Backspace => {
            app.message_input.pop();
        }
        KeyCode::Char(c) => {
            if App::can_add_text_char(&app.message_input) {
                app.message_input.push(c);
            }
        }
        _ => {}
    }
    Ok(false)
}

async fn handle_echappees_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            app.theme_selection = (app.theme_selection + 1) % ROUTE_THEMES.len();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.theme_selection = app
                .theme_selection
                .checked_sub(1)
                .unwrap_or(ROUTE_THEMES.len() - 1);
        }
        KeyCode::Enter => {
            app.generate_route().await;
        }
        _ => {}
    }
    Ok(false)
}

fn handle_profile_screen_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Char('e') {
        app.state = AppState::EditingProfile;
    }
    Ok(false)
}

// =========================================================================
// Forms
// =========================================================================

async fn handle_auth_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Ctrl shortcuts first: mode toggle and password reset
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('r') => {
                app.auth_mode = match app.auth_mode {
                    AuthMode::Login => AuthMode::Register,
                    AuthMode::Register => AuthMode::Login,
                };
                app.auth_focus = if app.auth_mode == AuthMode::Register {
                    AuthFocus::Name
                } else {
                    AuthFocus::Email
                };
                app.auth_form.error = None;
            }
            KeyCode::Char('f') => {
                if app.auth_mode == AuthMode::Login {
                    app.request_password_reset().await;
                }
            }
            _ => {}
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Esc => {
            // Authenticated users got here by hand; anonymous ones have
            // nowhere further back to go
            if app.session.is_authenticated() {
                app.navigate(Screen::Map);
            } else {
                return Ok(true);
            }
        }
        KeyCode::Tab | KeyCode::Down => {
            app.auth_focus = next_auth_focus(app.auth_mode, app.auth_focus);
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.auth_focus = prev_auth_focus(app.auth_mode, app.auth_focus);
        }
        KeyCode::Enter => match app.auth_focus {
            AuthFocus::Name => app.auth_focus = AuthFocus::Email,
            AuthFocus::Email => app.auth_focus = AuthFocus::Password,
            AuthFocus::Password | AuthFocus::Button => {
                match app.auth_mode {
                    AuthMode::Login => app.attempt_login().await,
                    AuthMode::Register => app.attempt_register().await,
                }
            }
        },
        KeyCode::Backspace => match app.auth_focus {
            AuthFocus::Name => {
                app.auth_form.name.pop();
            }
            AuthFocus::Email => {
                app.auth_form.email.pop();
            }
            AuthFocus::Password => {
                app.auth_form.password.pop();
            }
            AuthFocus::Button => {}
        },
        KeyCode::Char(c) => match app.auth_focus {
            AuthFocus::Name => {
                if App::can_add_field_char(&app.auth_form.name) {
                    app.auth_form.name.push(c);
                }
            }
            AuthFocus::Email => {
                if app.can_add_email_char() {
                    app.auth_form.email.push(c);
                }
            }
            AuthFocus::Password => {
                if app.can_add_password_char() {
                    app.auth_form.password.push(c);
                }
            }
            AuthFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}

fn next_auth_focus(mode: AuthMode, focus: AuthFocus) -> AuthFocus {
    match (mode, focus) {
        (AuthMode::Register, AuthFocus::Name) => AuthFocus::Email,
        (_, AuthFocus::Email) => AuthFocus::Password,
        (_, AuthFocus::Password) => AuthFocus::Button,
        (AuthMode::Register, AuthFocus::Button) => AuthFocus::Name,
        (AuthMode::Login, _) => AuthFocus::Email,
    }
}

fn prev_auth_focus(mode: AuthMode, focus: AuthFocus) -> AuthFocus {
    match (mode, focus) {
        (AuthMode::Register, AuthFocus::Email) => AuthFocus::Name,
        (_, AuthFocus::Password) => AuthFocus::Email,
        (_, AuthFocus::Button) => AuthFocus::Password,
        (AuthMode::Register, AuthFocus::Name) => AuthFocus::Button,
        (AuthMode::Login, _) => AuthFocus::Button,
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.search_query.clear();
            app.contribution_selection = 0;
            app.state = AppState::Normal;
        }
        KeyCode::Enter => {
            app.state = AppState::Normal;
        }
        KeyCode::Backspace => {
            app.search_query.pop();
            app.contribution_selection = 0;
        }
        KeyCode::Char(c) => {
            app.search_query.push(c);
            app.contribution_selection = 0;
        }
        _ => {}
    }
    Ok(false)
}

async fn handle_contribution_form(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.contribution_form = Default::default();
            app.state = AppState::Normal;
        }
        KeyCode::Tab => {
            app.contribution_form.on_description = !app.contribution_form.on_description;
        }
        KeyCode::Right | KeyCode::Left => {
            let current = app.contribution_form.category();
            app.contribution_form.category = Some(current.next());
        }
        KeyCode::Enter => {
            app.submit_contribution().await;
        }
        KeyCode::Backspace => {
            if app.contribution_form.on_description {
                app.contribution_form.description.pop();
            } else {
                app.contribution_form.title.pop();
            }
        }
        KeyCode::Char(c) => {
            if app.contribution_form.on_description {
                if App::can_add_text_char(&app.contribution_form.description) {
                    app.contribution_form.description.push(c);
                }
            } else if App::can_add_field_char(&app.contribution_form.title) {
                app.contribution_form.title.push(c);
            }
        }
        _ => {}
    }
    Ok(false)
}

async fn handle_topic_form(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.topic_form = Default::default();
            app.state = AppState::Normal;
        }
        KeyCode::Tab => {
            app.topic_form.on_description = !app.topic_form.on_description;
        }
        KeyCode::Enter => {
            app.submit_topic().await;
        }
        KeyCode::Backspace => {
            if app.topic_form.on_description {
                app.topic_form.description.pop();
            } else {
                app.topic_form.title.pop();
            }
        }
        KeyCode::Char(c) => {
            if app.topic_form.on_description {
                if App::can_add_text_char(&app.topic_form.description) {
                    app.topic_form.description.push(c);
                }
            } else if App::can_add_field_char(&app.topic_form.title) {
                app.topic_form.title.push(c);
            }
        }
        _ => {}
    }
    Ok(false)
}

async fn handle_profile_form(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.profile_field = match app.profile_field {
                ProfileField::Name => ProfileField::Location,
                ProfileField::Location => ProfileField::Bio,
                ProfileField::Bio => ProfileField::Name,
            };
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.profile_field = match app.profile_field {
                ProfileField::Name => ProfileField::Bio,
                ProfileField::Location => ProfileField::Name,
                ProfileField::Bio => ProfileField::Location,
            };
        }
        KeyCode::Enter => {
            app.submit_profile_update().await;
        }
        KeyCode::Backspace => {
            match app.profile_field {
                ProfileField::Name => app.profile_form.name.pop(),
                ProfileField::Location => app.profile_form.location.pop(),
                ProfileField::Bio => app.profile_form.bio.pop(),
            };
        }
        KeyCode::Char(c) => match app.profile_field {
            ProfileField::Name => {
                if App::can_add_field_char(&app.profile_form.name) {
                    app.profile_form.name.push(c);
                }
            }
            ProfileField::Location => {
                if App::can_add_field_char(&app.profile_form.location) {
                    app.profile_form.location.push(c);
                }
            }
            ProfileField::Bio => {
                if App::can_add_text_char(&app.profile_form.bio) {
                    app.profile_form.bio.push(c);
                }
            }
        },
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_focus_cycle_login() {
        // Login mode has no name field
        assert_eq!(
            next_auth_focus(AuthMode::Login, AuthFocus::Email),
            AuthFocus::Password
        );
        assert_eq!(
            next_auth_focus(AuthMode::Login, AuthFocus::Password),
            AuthFocus::Button
        );
        assert_eq!(
            next_auth_focus(AuthMode::Login, AuthFocus::Button),
            AuthFocus::Email
        );
        assert_eq!(
            prev_auth_focus(AuthMode::Login, AuthFocus::Email),
            AuthFocus::Button
        );
    }

    #[test]
    fn test_auth_focus_cycle_register() {
        assert_eq!(
            next_auth_focus(AuthMode::Register, AuthFocus::Name),
            AuthFocus::Email
        );
        assert_eq!(
            next_auth_focus(AuthMode::Register, AuthFocus::Button),
            AuthFocus::Name
        );
        assert_eq!(
            prev_auth_focus(AuthMode::Register, AuthFocus::Email),
            AuthFocus::Name
        );
        assert_eq!(
            prev_auth_focus(AuthMode::Register, AuthFocus::Name),
            AuthFocus::Button
        );
    }
}

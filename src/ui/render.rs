use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, Screen};

use super::guard::{self, Gate};
use super::screens::{agora, auth, contributions, echappees, profile};
use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::ComposingContribution) {
        render_contribution_overlay(frame, app);
    }

    if matches!(app.state, AppState::ComposingTopic) {
        render_topic_overlay(frame, app);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  CityScope";
    let user_hint = match app.session.user() {
        Some(user) => format!("{} | [?] Help", user.name),
        None => "[?] Help".to_string(),
    };

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.len() + user_hint.len() + 4),
        )),
        Span::styled(user_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tabs = [
        ("[1] Map", Screen::Map),
        ("[2] Agora", Screen::Agora),
        ("[3] Échappées", Screen::Echappees),
        ("[4] Profile", Screen::Profile),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (label, screen)) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        spans.push(Span::styled(
            *label,
            styles::tab_style(app.screen == *screen),
        ));
    }

    let line = Line::from(spans);
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    // Protected screens render only for an authenticated session; while the
    // session is still resolving they show a placeholder. The unauthenticated
    // case lands on the auth screen (the app loop enforces the redirect; the
    // match below covers the same frame it happens in).
    match guard::gate(app.screen, app.session.status()) {
        Gate::Loading => {
            render_loading(frame, area);
            return;
        }
        Gate::Login => {
            auth::render(frame, app, area);
            return;
        }
        Gate::Render => {}
    }

    match app.screen {
        Screen::Map => contributions::render(frame, app, area),
        Screen::Agora => agora::render(frame, app, area),
        Screen::Echappees => echappees::render(frame, app, area),
        Screen::Profile => profile::render(frame, app, area),
        Screen::Auth => auth::render(frame, app, area),
    }
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let box_area = centered_rect_fixed(30, 3, area);
    let paragraph = Paragraph::new(Line::from(Span::styled(
        " Checking session... ",
        styles::muted_style(),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(styles::muted_style()),
    );
    frame.render_widget(paragraph, box_area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = if app.session.is_authenticated() {
        "[u]pdate | [q]uit"
    } else {
        "[q]uit"
    };

    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else if matches!(app.state, AppState::Searching) {
        format!(" /{}_ ", app.search_query)
    } else {
        String::from(" ")
    };

    let right_text = format!(" {} ", shortcuts);
    let padding = (area.width as usize)
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right_text, styles::muted_style()),
    ]);

    frame.render_widget(
        Paragraph::new(status_line).style(styles::status_bar_style()),
        area,
    );
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 20, frame.area());
    frame.render_widget(Clear, area);

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", k), styles::help_key_style()),
            Span::styled(desc, styles::help_desc_style()),
        ])
    };

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled(
            format!("  CityScope v{}", version),
            styles::title_style(),
        )),
        Line::from(""),
        key("1-4", "Switch screen"),
        key("Tab / S-Tab", "Next / previous screen"),
        key("j/k, arrows", "Move selection"),
        key("Enter", "Open / submit"),
        key("/", "Search contributions"),
        key("l / L", "Toggle layer / all layers"),
        key("a", "Add contribution (map)"),
        key("n", "New topic (agora)"),
        key("e", "Edit profile"),
        key("x", "Log out"),
        key("u", "Refresh data"),
        key("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  [Esc] close help",
            styles::muted_style(),
        )),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .title_style(styles::title_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );

    frame.render_widget(paragraph, area);
}

fn render_contribution_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(60, 12, frame.area());
    frame.render_widget(Clear, area);

    let form = &app.contribution_form;
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Title       ", styles::muted_style()),
            Span::styled(
                format!(" {} ", form.title),
                styles::input_style(!form.on_description),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Description ", styles::muted_style()),
            Span::styled(
                format!(" {} ", form.description),
                styles::input_style(form.on_description),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Category    ", styles::muted_style()),
            Span::styled(format!(" {} ", form.category()), styles::highlight_style()),
            Span::styled("  [→] cycle", styles::muted_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  [Tab] field  [Enter] submit  [Esc] cancel",
            styles::muted_style(),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Add contribution (at home position) ")
            .title_style(styles::title_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );

    frame.render_widget(paragraph, area);
}

fn render_topic_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(60, 10, frame.area());
    frame.render_widget(Clear, area);

    let form = &app.topic_form;
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Title       ", styles::muted_style()),
            Span::styled(
                format!(" {} ", form.title),
                styles::input_style(!form.on_description),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Description ", styles::muted_style()),
            Span::styled(
                format!(" {} ", form.description),
                styles::input_style(form.on_description),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  [Tab] field  [Enter] create  [Esc] cancel",
            styles::muted_style(),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" New topic ")
            .title_style(styles::title_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );

    frame.render_widget(paragraph, area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(36, 5, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Quit CityScope? [y/n]",
            styles::help_desc_style(),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Confirm ")
            .title_style(styles::title_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );

    frame.render_widget(paragraph, area);
}

/// Fixed-size rectangle centered in `area`, clamped to fit
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

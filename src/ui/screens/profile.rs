use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState, ProfileField};
use crate::models::INTEREST_CATALOG;
use crate::ui::styles;
use crate::utils::truncate;

/// Render the Profile screen - identity panel and own contributions
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    if app.state == AppState::EditingProfile {
        render_edit_form(frame, app, chunks[0]);
    } else {
        render_identity(frame, app, chunks[0]);
    }
    render_own_contributions(frame, app, chunks[1]);
}

fn render_identity(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.session.user() {
        Some(user) => {
            let interests = if user.interests.is_empty() {
                "None selected".to_string()
            } else {
                user.interests
                    .iter()
                    .map(|id| {
                        INTEREST_CATALOG
                            .iter()
                            .find(|(key, _)| key == id)
                            .map(|(_, label)| *label)
                            .unwrap_or(id.as_str())
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            };

            vec![
                Line::from(Span::styled(user.name.clone(), styles::title_style())),
                Line::from(vec![
                    Span::styled("Email: ", styles::muted_style()),
                    Span::raw(user.email.clone()),
                ]),
                Line::from(vec![
                    Span::styled("Location: ", styles::muted_style()),
                    Span::raw(user.display_location().to_string()),
                ]),
                Line::from(""),
                Line::from(Span::raw(user.display_bio().to_string())),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Interests: ", styles::muted_style()),
                    Span::raw(interests),
                ]),
            ]
        }
        None => vec![Line::from(Span::styled(
            "Not signed in",
            styles::muted_style(),
        ))],
    };

    let paragraph = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Profile - [e]dit [x] logout ")
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );

    frame.render_widget(paragraph, area);
}

fn render_edit_form(frame: &mut Frame, app: &App, area: Rect) {
    let field_line = |label: &str, value: &str, focused: bool| {
        Line::from(vec![
            Span::styled(format!("{:<10}", label), styles::muted_style()),
            Span::styled(
                format!(" {} ", value),
                styles::input_style(focused),
            ),
        ])
    };

    let content = vec![
        Line::from(Span::styled("Edit profile", styles::title_style())),
        Line::from(""),
        field_line(
            "Name",
            &app.profile_form.name,
            app.profile_field == ProfileField::Name,
        ),
        Line::from(""),
        field_line(
            "Location",
            &app.profile_form.location,
            app.profile_field == ProfileField::Location,
        ),
        Line::from(""),
        field_line(
            "Bio",
            &app.profile_form.bio,
            app.profile_field == ProfileField::Bio,
        ),
        Line::from(""),
        Line::from(Span::styled(
            "[Tab] next field  [Enter] save  [Esc] cancel",
            styles::muted_style(),
        )),
    ];

    let paragraph = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Edit profile ")
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );

    frame.render_widget(paragraph, area);
}

fn render_own_contributions(frame: &mut Frame, app: &App, area: Rect) {
    let content: Vec<Line> = if app.own_contributions.is_empty() {
        vec![Line::from(Span::styled(
            "No contributions yet - add one from the map screen",
            styles::muted_style(),
        ))]
    } else {
        app.own_contributions
            .iter()
            .flat_map(|c| {
                vec![
                    Line::from(vec![
                        Span::styled(truncate(&c.title, 50), styles::list_item_style()),
                        Span::styled(format!("  [{}]", c.category), styles::muted_style()),
                    ]),
                    Line::from(Span::styled(
                        format!("  {}", truncate(&c.description, 70)),
                        styles::muted_style(),
                    )),
                ]
            })
            .collect()
    };

    let paragraph = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(format!(
                " Your contributions ({}) ",
                app.own_contributions.len()
            ))
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );

    frame.render_widget(paragraph, area);
}

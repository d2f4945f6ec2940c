use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AuthFocus, AuthMode};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

/// Render the auth screen - login/register form in a centered box
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let box_height = if app.auth_mode == AuthMode::Register { 16 } else { 14 };
    let form_area = centered_rect_fixed(56, box_height, area);

    frame.render_widget(Clear, form_area);

    let field_line = |label: &str, value: String, focused: bool| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", label), styles::muted_style()),
            Span::styled(format!(" {} ", value), styles::input_style(focused)),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "  CityScope - Rabat Urban Platform",
            styles::title_style(),
        )),
        Line::from(""),
    ];

    if app.auth_mode == AuthMode::Register {
        lines.push(field_line(
            "Name",
            app.auth_form.name.clone(),
            app.auth_focus == AuthFocus::Name,
        ));
        lines.push(Line::from(""));
    }

    lines.push(field_line(
        "Email",
        app.auth_form.email.clone(),
        app.auth_focus == AuthFocus::Email,
    ));
    lines.push(Line::from(""));
    lines.push(field_line(
        "Password",
        "*".repeat(app.auth_form.password.len()),
        app.auth_focus == AuthFocus::Password,
    ));
    lines.push(Line::from(""));

    let button_label = match app.auth_mode {
        AuthMode::Login => "[ Sign in ]",
        AuthMode::Register => "[ Create account ]",
    };
    lines.push(Line::from(Span::styled(
        format!("  {}", button_label),
        if app.auth_focus == AuthFocus::Button {
            styles::selected_style()
        } else {
            styles::list_item_style()
        },
    )));
    lines.push(Line::from(""));

    if let Some(ref error) = app.auth_form.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            styles::error_style(),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    let toggle_hint = match app.auth_mode {
        AuthMode::Login => "  [Ctrl+R] register instead  [Ctrl+F] forgot password",
        AuthMode::Register => "  [Ctrl+R] sign in instead",
    };
    lines.push(Line::from(Span::styled(toggle_hint, styles::muted_style())));

    let title = match app.auth_mode {
        AuthMode::Login => " Sign in ",
        AuthMode::Register => " Create account ",
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .title_style(styles::title_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );

    frame.render_widget(paragraph, form_area);
}

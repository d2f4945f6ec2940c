use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::models::ROUTE_THEMES;
use crate::ui::styles;

/// Render the Échappées screen - theme picker and generated route details
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_themes(frame, app, chunks[0]);
    render_route(frame, app, chunks[1]);
}

fn render_themes(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = ROUTE_THEMES
        .iter()
        .map(|theme| {
            ListItem::new(vec![
                Line::from(Span::styled(theme.name, styles::list_item_style())),
                Line::from(Span::styled(theme.description, styles::muted_style())),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Route themes - [Enter] generate ")
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .highlight_style(styles::selected_style());

    let mut state = ListState::default();
    state.select(Some(app.theme_selection % ROUTE_THEMES.len()));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_route(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.generated_route.as_ref() {
        Some(route) => {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("Distance: ", styles::muted_style()),
                    Span::raw(format!("{:.1} km", route.distance)),
                    Span::styled("   Time: ", styles::muted_style()),
                    Span::raw(route.estimated_time.clone()),
                ]),
                Line::from(""),
            ];
            for (i, point) in route.points.iter().enumerate() {
                lines.push(Line::from(vec![
                    Span::styled(format!("{:>2}. ", i + 1), styles::highlight_style()),
                    Span::styled(point.name.clone(), styles::list_item_style()),
                ]));
                if !point.description.is_empty() {
                    lines.push(Line::from(Span::styled(
                        format!("    {}", point.description),
                        styles::muted_style(),
                    )));
                }
            }
            lines
        }
        None => vec![
            Line::from(Span::styled(
                "Choose a theme and press Enter.",
                styles::muted_style(),
            )),
            Line::from(Span::styled(
                "A personalized walking route through Rabat will appear here.",
                styles::muted_style(),
            )),
        ],
    };

    let paragraph = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Route details ")
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );

    frame.render_widget(paragraph, area);
}

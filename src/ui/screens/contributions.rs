use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::App;
use crate::models::Category;
use crate::ui::styles;
use crate::utils::{format_timestamp, truncate};

/// Render the Map screen - contribution table with a detail panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_table(frame, app, chunks[0]);
    render_detail(frame, app, chunks[1]);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let contributions = app.filtered_contributions();

    let header = Row::new([
        Cell::from("Title"),
        Cell::from("Category"),
        Cell::from("By"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = contributions
        .iter()
        .map(|c| {
            Row::new(vec![
                Cell::from(truncate(&c.title, 40)),
                Cell::from(c.category.label()),
                Cell::from(c.author_name().to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(50),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ];

    let layer_help = layer_summary(app);
    let title = if app.search_query.is_empty() {
        format!(" Contributions ({}) - {} ", contributions.len(), layer_help)
    } else {
        format!(
            " Contributions ({}) - search: {} ",
            contributions.len(),
            app.search_query
        )
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !contributions.is_empty() {
        state.select(Some(app.contribution_selection.min(contributions.len() - 1)));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn layer_summary(app: &App) -> String {
    if app.layers.all {
        "layers: all".to_string()
    } else {
        let on: Vec<&str> = Category::ALL
            .iter()
            .filter(|c| app.layers.is_visible(**c))
            .map(|c| c.label())
            .collect();
        if on.is_empty() {
            "layers: none".to_string()
        } else {
            format!("layers: {}", on.join(", "))
        }
    }
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let contributions = app.filtered_contributions();
    let selected = contributions.get(app.contribution_selection);

    let content = match selected {
        Some(c) => {
            vec![
                Line::from(Span::styled(c.title.clone(), styles::title_style())),
                Line::from(vec![
                    Span::styled("Category: ", styles::muted_style()),
                    Span::raw(c.category.label()),
                ]),
                Line::from(vec![
                    Span::styled("Position: ", styles::muted_style()),
                    Span::raw(format!(
                        "{:.4}, {:.4}",
                        c.location.latitude(),
                        c.location.longitude()
                    )),
                ]),
                Line::from(vec![
                    Span::styled("By: ", styles::muted_style()),
                    Span::raw(c.author_name().to_string()),
                    Span::styled("  Added: ", styles::muted_style()),
                    Span::raw(format_timestamp(&c.created_at)),
                ]),
                Line::from(""),
                Line::from(Span::raw(c.description.clone())),
            ]
        }
        None => vec![Line::from(Span::styled(
            "No contributions match the current filters",
            styles::muted_style(),
        ))],
    };

    let paragraph = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Detail - [a]dd [/]search [l]ayer [L]all ")
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );

    frame.render_widget(paragraph, area);
}

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::{AgoraView, App};
use crate::ui::styles;
use crate::utils::format_timestamp;

/// Render the Agora screen - topic list or an open thread
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match app.agora_view {
        AgoraView::Topics => render_topics(frame, app, area),
        AgoraView::Thread => render_thread(frame, app, area),
    }
}

fn render_topics(frame: &mut Frame, app: &App, area: Rect) {
    let topics = app.sorted_topics();

    let header = Row::new([
        Cell::from("Topic"),
        Cell::from("Comments"),
        Cell::from("Started"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = topics
        .iter()
        .map(|t| {
            Row::new(vec![
                Cell::from(t.title.clone()),
                Cell::from(format!("{:>4}", t.message_count())),
                Cell::from(format_timestamp(&t.created_at)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(60),
        Constraint::Length(10),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    " Agora ({}) - [Enter] open, [n]ew topic ",
                    topics.len()
                ))
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !topics.is_empty() {
        state.select(Some(app.topic_selection.min(topics.len() - 1)));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_thread(frame: &mut Frame, app: &App, area: Rect) {
    let Some(topic) = app.open_topic.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let own_id = app.session.user().map(|u| u.id.as_str());

    let mut lines = vec![
        Line::from(Span::styled(topic.title.clone(), styles::title_style())),
        Line::from(Span::raw(topic.description.clone())),
        Line::from(""),
    ];

    for message in &topic.messages {
        let mine = own_id == Some(message.author.id.as_str());
        let author_style = if mine {
            styles::highlight_style()
        } else {
            styles::success_style()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", message.author.name), author_style),
            Span::styled(
                format_timestamp(&message.created_at),
                styles::muted_style(),
            ),
        ]));
        lines.push(Line::from(Span::raw(format!("  {}", message.content))));
    }

    // Keep the tail of the thread in view
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(visible) as u16;

    let thread = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title(format!(" {} - [Esc] back ", topic.title))
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(false)),
        );
    frame.render_widget(thread, chunks[0]);

    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.message_input.clone()),
        Span::styled("_", styles::muted_style()),
    ]))
    .block(
        Block::default()
            .title(" Message - [Enter] send ")
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );
    frame.render_widget(input, chunks[1]);
}

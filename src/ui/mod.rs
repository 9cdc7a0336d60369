pub mod layout;
mod todo_list;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    todo_list::render_search(frame, app, chunks[1]);
    todo_list::render(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.list.search_term().is_empty() {
        format!("todo-scroll - {}", app.source_name())
    } else {
        format!(
            "todo-scroll - {} - \"{}\"",
            app.source_name(),
            app.list.search_term()
        )
    };

    let header = Paragraph::new(Line::from(vec![Span::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )]))
    .style(Style::default().bg(Color::DarkGray));

    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if app.search_pending() {
        Line::from(vec![Span::styled(
            "Searching...",
            Style::default().fg(Color::Yellow),
        )])
    } else if app.list.loading() {
        Line::from(vec![Span::styled(
            format!("Loading page {}...", app.list.page_number()),
            Style::default().fg(Color::Yellow),
        )])
    } else {
        let help = if app.search_mode {
            "type to search | Ctrl+w: clear | Enter/Esc: done"
        } else {
            "j/k/g/G: nav | Ctrl+d/u: page | /: search | r: refresh | q: quit"
        };
        Line::from(vec![Span::styled(help, Style::default().fg(Color::Gray))])
    };

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}

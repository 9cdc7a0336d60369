use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::layout::ITEM_HEIGHT;
use super::spinner;
use crate::app::App;
use crate::types::Item;

const PLACEHOLDER: &str = "Search todos...";

pub fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let border = if app.search_mode {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" Search ");

    let content = if app.search_input.is_empty() && !app.search_mode {
        Line::from(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(app.search_input.as_str())
    };

    frame.render_widget(Paragraph::new(content).block(block), area);

    if app.search_mode {
        let typed = app.search_input.chars().count() as u16;
        let x = (area.x + 1 + typed).min(area.right().saturating_sub(2));
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let items = app.list.items();

    let mut title = vec![Span::raw(format!(" Todos ({}) ", items.len()))];
    if app.list.refreshing() {
        title.push(Span::styled(
            format!("{} Refreshing ", spinner(app.spinner_frame)),
            Style::default().fg(Color::Yellow),
        ));
    }
    let block = Block::default().borders(Borders::ALL).title(Line::from(title));

    if items.is_empty() && !app.list.loading() && !app.list.has_more() {
        let empty = Paragraph::new("No todos found")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(2) as usize;

    let mut rows: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| item_row(item, i == app.selected, width))
        .collect();

    if app.list.has_more() {
        rows.push(ListItem::new(Line::from(Span::styled(
            format!("{} Loading more...", spinner(app.spinner_frame)),
            Style::default().fg(Color::DarkGray),
        ))));
    }

    let list = List::new(rows)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn item_row(item: &Item, selected: bool, width: usize) -> ListItem<'static> {
    let style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut lines = vec![Line::from(Span::styled(truncate(&item.label(), width), style))];
    // Pad every row to the fixed height so the layout math holds.
    while lines.len() < ITEM_HEIGHT as usize {
        lines.push(Line::from(Span::styled(
            "─".repeat(width),
            Style::default().fg(Color::DarkGray),
        )));
    }

    ListItem::new(Text::from(lines))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::testing::{items, pump, FakeSource};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| crate::ui::render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect::<Vec<_>>()
            .chunks(width as usize)
            .map(|row| row.concat())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn truncate_handles_multibyte() {
        assert_eq!(truncate("äöüäöüäöü", 6), "äöü...");
    }

    #[test]
    fn rows_have_fixed_height() {
        let item = &items(1..=1)[0];
        assert_eq!(item_row(item, false, 20).height(), ITEM_HEIGHT as usize);
    }

    #[tokio::test(start_paused = true)]
    async fn renders_rows_and_footer_while_more_pages() {
        let source = Arc::new(FakeSource::new().with_page(1, items(1..=20)));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(source, Config::default(), tx, 24);
        pump(&mut app, &mut rx, Duration::from_secs(2)).await;

        let text = screen(&app, 60, 24);
        assert!(text.contains("1. todo 1"));
        assert!(text.contains("Todos (20)"));
        assert!(text.contains("Search todos..."));
        // Footer sits below the visible window of a 20-item list.
        assert!(!text.contains("Loading more"));
    }

    #[tokio::test(start_paused = true)]
    async fn footer_visible_for_short_list_then_hidden_when_exhausted() {
        let source = Arc::new(FakeSource::new().with_page(1, items(1..=3)));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(source, Config::default(), tx, 24);

        pump(&mut app, &mut rx, Duration::from_millis(1100)).await;
        assert!(app.list.has_more());
        assert!(screen(&app, 60, 24).contains("Loading more..."));

        // Short content counts as end reached, so page 2 (empty) follows.
        pump(&mut app, &mut rx, Duration::from_secs(3)).await;
        assert!(!app.list.has_more());
        let text = screen(&app, 60, 24);
        assert!(text.contains("3. todo 3"));
        assert!(!text.contains("Loading more..."));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_result_shows_placeholder() {
        let source = Arc::new(FakeSource::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(source, Config::default(), tx, 24);
        pump(&mut app, &mut rx, Duration::from_secs(2)).await;

        assert!(screen(&app, 60, 24).contains("No todos found"));
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_shows_spinner_in_title() {
        let source = Arc::new(FakeSource::new().with_page(1, items(1..=20)));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(source, Config::default(), tx, 24);
        pump(&mut app, &mut rx, Duration::from_secs(2)).await;

        app.update(crate::action::Action::Refresh);
        let text = screen(&app, 60, 24);
        assert!(text.contains("Refreshing"));
        assert!(text.contains("Loading page 1..."));
    }
}

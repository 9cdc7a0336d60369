use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::action::Action;
use crate::config::Config;
use crate::controller::{FetchRequest, ListController};
use crate::debounce::Debouncer;
use crate::event::Event;
use crate::fetch;
use crate::source::ItemSource;
use crate::ui::layout;

pub struct App {
    pub list: ListController,
    pub selected: usize,
    pub search_input: String,
    pub search_mode: bool,
    pub viewport_rows: u16,
    pub spinner_frame: usize,
    pub should_quit: bool,
    source: Arc<dyn ItemSource>,
    config: Config,
    action_tx: mpsc::UnboundedSender<Action>,
    next_page: Debouncer<Action>,
    search: Debouncer<Action>,
}

impl App {
    /// Build the app and start the initial fetch. Must be called inside a
    /// tokio runtime.
    pub fn new(
        source: Arc<dyn ItemSource>,
        config: Config,
        action_tx: mpsc::UnboundedSender<Action>,
        terminal_height: u16,
    ) -> Self {
        let (list, request) = ListController::mount();
        let next_page = Debouncer::new(config.timing.next_page_debounce(), action_tx.clone());
        let search = Debouncer::new(config.timing.search_debounce(), action_tx.clone());

        let app = Self {
            list,
            selected: 0,
            search_input: String::new(),
            search_mode: false,
            viewport_rows: layout::list_viewport_rows(terminal_height),
            spinner_frame: 0,
            should_quit: false,
            source,
            config,
            action_tx,
            next_page,
            search,
        };
        app.spawn_fetch(request);
        app
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn search_pending(&self) -> bool {
        self.search.is_pending()
    }

    fn selected_key(&self) -> Option<String> {
        self.list.items().get(self.selected).map(|item| item.key())
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Tick => Action::Tick,
            Event::Resize(w, h) => Action::Resize(w, h),
            Event::Render => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if self.search_mode {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc => Action::ExitSearchMode,
                KeyCode::Backspace => Action::SearchBackspace,
                KeyCode::Char('w') if ctrl => Action::ClearSearch,
                KeyCode::Char(c) if !ctrl => Action::SearchInput(c),
                KeyCode::Down => Action::ScrollDown,
                KeyCode::Up => Action::ScrollUp,
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('d') if ctrl => Action::PageDown,
            KeyCode::Char('u') if ctrl => Action::PageUp,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::Char('g') | KeyCode::Home => Action::GoToTop,
            KeyCode::Char('G') | KeyCode::End => Action::GoToBottom,
            KeyCode::Char('/') => Action::EnterSearchMode,
            KeyCode::Char('r') => Action::Refresh,
            _ => Action::None,
        }
    }

    pub fn update(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.next_page.cancel();
                self.search.cancel();
                self.list.teardown();
                self.should_quit = true;
            }
            Action::ScrollUp => {
                self.selected = self.selected.saturating_sub(1);
            }
            Action::ScrollDown => {
                self.select(self.selected + 1);
            }
            Action::PageUp => {
                self.selected = self.selected.saturating_sub(self.half_page());
            }
            Action::PageDown => {
                self.select(self.selected + self.half_page());
            }
            Action::GoToTop => {
                self.selected = 0;
            }
            Action::GoToBottom => {
                self.select(usize::MAX);
            }
            Action::Tick => {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
            }
            Action::Resize(_, height) => {
                self.viewport_rows = layout::list_viewport_rows(height);
                self.check_end_reached();
            }

            Action::EnterSearchMode => {
                self.search_mode = true;
            }
            Action::ExitSearchMode => {
                self.search_mode = false;
            }
            Action::SearchInput(c) => {
                self.search_input.push(c);
                self.search.schedule(Action::SearchDue(self.search_input.clone()));
            }
            Action::SearchBackspace => {
                if self.search_input.pop().is_some() {
                    self.search.schedule(Action::SearchDue(self.search_input.clone()));
                }
            }
            Action::ClearSearch => {
                if !self.search_input.is_empty() {
                    self.search_input.clear();
                    self.search.schedule(Action::SearchDue(String::new()));
                }
            }
            Action::SearchDue(term) => {
                if let Some(request) = self.list.on_search(&term) {
                    self.selected = 0;
                    self.spawn_fetch(request);
                }
            }

            Action::EndReached => {
                self.next_page.schedule(Action::NextPageDue);
            }
            Action::NextPageDue => {
                if let Some(request) = self.list.on_scroll_end() {
                    self.spawn_fetch(request);
                }
            }
            Action::Refresh => {
                self.next_page.cancel();
                if let Some(request) = self.list.on_refresh() {
                    self.spawn_fetch(request);
                }
            }
            Action::FetchSettled { request, result } => {
                let previous = self.selected_key();
                let succeeded = result.is_ok();
                if self.list.on_fetch_settled(&request, result) {
                    if request.page == 1 {
                        self.selected = previous
                            .and_then(|key| self.list.items().iter().position(|i| i.key() == key))
                            .unwrap_or(0);
                    }
                    self.clamp_selection();
                    // A failed page leaves the content unchanged; only a
                    // new scroll may ask for more.
                    if succeeded {
                        self.check_end_reached();
                    }
                }
            }

            Action::None => {}
        }
    }

    fn half_page(&self) -> usize {
        (self.viewport_rows / layout::ITEM_HEIGHT / 2).max(1) as usize
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        self.clamp_selection();
        self.check_end_reached();
    }

    fn clamp_selection(&mut self) {
        let len = self.list.items().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn check_end_reached(&mut self) {
        let near_end = layout::is_near_end(
            self.selected,
            self.list.items().len(),
            self.viewport_rows,
            self.config.list.end_reached_threshold,
        );
        if near_end {
            self.update(Action::EndReached);
        }
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        let tx = self.action_tx.clone();
        let source = Arc::clone(&self.source);
        let query = request.query(self.config.source.page_size);
        let min_loading = self.config.timing.min_loading();
        tokio::spawn(async move {
            let result = fetch::fetch_page(source.as_ref(), &query, min_loading).await;
            tx.send(Action::FetchSettled { request, result }).ok();
        });
    }
}

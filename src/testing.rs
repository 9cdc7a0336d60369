//! In-memory item source shared by unit tests.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::{timeout_at, Instant};

use crate::action::Action;
use crate::app::App;
use crate::error::{Result, ScrollError};
use crate::source::ItemSource;
use crate::types::{Item, PageQuery};

pub fn items(ids: RangeInclusive<u64>) -> Vec<Item> {
    ids.map(|id| Item {
        id,
        title: format!("todo {}", id),
        completed: id % 2 == 0,
    })
    .collect()
}

/// Apply every action that arrives on `rx` within `window`.
pub async fn pump(app: &mut App, rx: &mut mpsc::UnboundedReceiver<Action>, window: Duration) {
    let deadline = Instant::now() + window;
    while let Ok(Some(action)) = timeout_at(deadline, rx.recv()).await {
        app.update(action);
    }
}

/// Serves canned pages keyed by page number. Pages not configured are empty.
#[derive(Debug, Default)]
pub struct FakeSource {
    pages: HashMap<u32, Vec<Item>>,
    latency: Duration,
    fail_from: Option<u32>,
    calls: Mutex<Vec<(u32, String)>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32, items: Vec<Item>) -> Self {
        self.pages.insert(page, items);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn failing(self) -> Self {
        self.failing_from(1)
    }

    /// Fail every request for `page` and later pages.
    pub fn failing_from(mut self, page: u32) -> Self {
        self.fail_from = Some(page);
        self
    }

    /// Every `(page, search)` requested so far, in order.
    pub fn calls(&self) -> Vec<(u32, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ItemSource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    async fn list_items(&self, query: &PageQuery) -> Result<Vec<Item>> {
        self.calls
            .lock()
            .unwrap()
            .push((query.page, query.search.clone()));
        tokio::time::sleep(self.latency).await;
        if self.fail_from.is_some_and(|from| query.page >= from) {
            return Err(ScrollError::Fetch("503 Service Unavailable: down".into()));
        }
        Ok(self.pages.get(&query.page).cloned().unwrap_or_default())
    }
}

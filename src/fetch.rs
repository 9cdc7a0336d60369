use std::future::Future;
use std::time::Duration;

use crate::error::Result;
use crate::source::ItemSource;
use crate::types::{Item, PageQuery};

/// Run `fut` alongside a timer and resolve only when both are done, so the
/// result is never observed before `min` has elapsed.
pub async fn with_min_duration<F: Future>(fut: F, min: Duration) -> F::Output {
    let (output, ()) = tokio::join!(fut, tokio::time::sleep(min));
    output
}

/// Fetch one page, gated by the minimum loading time.
pub async fn fetch_page(
    source: &dyn ItemSource,
    query: &PageQuery,
    min_loading: Duration,
) -> Result<Vec<Item>> {
    with_min_duration(source.list_items(query), min_loading).await
}

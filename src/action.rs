use crate::controller::FetchRequest;
use crate::error::ScrollError;
use crate::types::Item;

#[derive(Debug)]
pub enum Action {
    Quit,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    Tick,
    Resize(u16, u16),

    // Search box
    EnterSearchMode,
    ExitSearchMode,
    SearchInput(char),
    SearchBackspace,
    ClearSearch,
    /// Search debounce window elapsed with this text.
    SearchDue(String),

    // Pagination
    /// The visible window came near the end of the list.
    EndReached,
    /// Load-more debounce window elapsed.
    NextPageDue,
    Refresh,
    FetchSettled {
        request: FetchRequest,
        result: Result<Vec<Item>, ScrollError>,
    },

    None,
}

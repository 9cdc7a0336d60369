//! Fixed-height row geometry for the todo list.
//!
//! Every item occupies [`ITEM_HEIGHT`] terminal rows (label plus separator),
//! so positions can be computed without measuring rendered rows.

/// Rows taken by one item.
pub const ITEM_HEIGHT: u16 = 2;

/// Rows outside the list viewport: header, search box, status bar and the
/// list's own borders.
const CHROME_ROWS: u16 = 1 + 3 + 1 + 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemLayout {
    pub length: u16,
    pub offset: usize,
}

pub fn item_layout(index: usize) -> ItemLayout {
    ItemLayout {
        length: ITEM_HEIGHT,
        offset: ITEM_HEIGHT as usize * index,
    }
}

/// Rows available to list items for a terminal of `terminal_height` rows.
pub fn list_viewport_rows(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(CHROME_ROWS)
}

/// Whether the visible window is within `threshold` viewport lengths of the
/// end of `count` items, with the selection at `selected` kept in view.
/// Content shorter than the viewport always counts as near the end.
pub fn is_near_end(selected: usize, count: usize, viewport_rows: u16, threshold: f32) -> bool {
    if count == 0 || viewport_rows == 0 {
        return false;
    }
    let viewport = viewport_rows as usize;
    let content = item_layout(count).offset;
    let selected = item_layout(selected.min(count - 1));
    let visible_bottom = viewport.max(selected.offset + selected.length as usize);
    let remaining = content.saturating_sub(visible_bottom);
    remaining as f32 <= threshold * viewport as f32
}

//! Per-export layout state.

/// Mutable layout state for one export. One instance per export call,
/// never shared, destroyed once bytes are produced; concurrent exports
/// therefore cannot corrupt each other's page state.
#[derive(Debug)]
pub struct DocumentCursor {
    /// Vertical offset from the top of the current page, in points.
    pub y: f32,
    /// Zero-based index of the current page.
    pub page_index: usize,
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
}

impl DocumentCursor {
    pub fn new(page_width: f32, page_height: f32, margin: f32) -> Self {
        Self {
            y: margin,
            page_index: 0,
            page_width,
            page_height,
            margin,
        }
    }

    /// The lowest `y` any content may occupy.
    pub fn limit(&self) -> f32 {
        self.page_height - self.margin
    }

    /// True when drawing `height` more points would cross the bottom
    /// margin.
    pub fn would_overflow(&self, height: f32) -> bool {
        self.y + height > self.limit()
    }

    /// Remaining horizontal room from `x` to the right margin.
    pub fn width_from(&self, x: f32) -> f32 {
        (self.page_width - self.margin - x).max(0.0)
    }

    /// Moves onto a fresh page, resetting `y` to the top margin.
    pub fn start_new_page(&mut self) {
        self.page_index += 1;
        self.y = self.margin;
    }
}

/// Page-flow controller states. `Drawing` transitions to
/// `PageBreakPending` on a failed height check; the footer stamp, page
/// allocation, and cursor reset move through `NewPageStarted` and
/// immediately back to `Drawing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFlow {
    Drawing,
    PageBreakPending,
    NewPageStarted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_triggers_exactly_at_the_bottom_margin() {
        let mut cursor = DocumentCursor::new(595.0, 842.0, 40.0);
        cursor.y = cursor.limit() - 14.0;
        assert!(!cursor.would_overflow(14.0));
        assert!(cursor.would_overflow(14.1));
    }

    #[test]
    fn new_page_resets_the_vertical_offset() {
        let mut cursor = DocumentCursor::new(595.0, 842.0, 40.0);
        cursor.y = 700.0;
        cursor.start_new_page();
        assert_eq!(cursor.page_index, 1);
        assert_eq!(cursor.y, 40.0);
    }

    #[test]
    fn width_from_never_goes_negative() {
        let cursor = DocumentCursor::new(595.0, 842.0, 40.0);
        assert_eq!(cursor.width_from(600.0), 0.0);
    }
}

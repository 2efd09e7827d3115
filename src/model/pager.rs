//! Multi-page navigation state.

/// Page navigation requested by a button or key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Prev,
    Next,
}

impl NavAction {
    /// Map a `KeyboardEvent.key` value. Arrow keys are ignored while the
    /// operator is typing in a text field.
    pub fn from_key(key: &str, in_text_input: bool) -> Option<Self> {
        if in_text_input {
            return None;
        }
        match key {
            "ArrowLeft" => Some(Self::Prev),
            "ArrowRight" => Some(Self::Next),
            _ => None,
        }
    }
}

/// Current visible page within the page count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    current: u32,
    pages: u32,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    pub fn new() -> Self {
        Self {
            current: 0,
            pages: 1,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    fn last(&self) -> u32 {
        self.pages.saturating_sub(1)
    }

    /// Adopt a new page count and pull the current page back into range.
    pub fn set_pages(&mut self, pages: u32) {
        self.pages = pages;
        self.current = self.current.min(self.last());
    }

    /// Jump to `requested`, clamped into `[0, pages - 1]`. Returns the page
    /// actually selected.
    pub fn go_to(&mut self, requested: i64) -> u32 {
        let last = i64::from(self.last());
        self.current = u32::try_from(requested.clamp(0, last)).unwrap_or(0);
        self.current
    }

    /// Step one page; returns whether the page changed.
    pub fn step(&mut self, action: NavAction) -> bool {
        let before = self.current;
        let delta = match action {
            NavAction::Prev => -1,
            NavAction::Next => 1,
        };
        self.go_to(i64::from(before) + delta);
        self.current != before
    }

    pub fn has_prev(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.current < self.last()
    }

    /// Navigation chrome is hidden for single-page sheets.
    pub fn nav_visible(&self) -> bool {
        self.pages > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_ignored_in_inputs() {
        assert_eq!(NavAction::from_key("ArrowLeft", false), Some(NavAction::Prev));
        assert_eq!(NavAction::from_key("ArrowRight", false), Some(NavAction::Next));
        assert_eq!(NavAction::from_key("ArrowRight", true), None);
        assert_eq!(NavAction::from_key("Enter", false), None);
    }

    #[test]
    fn test_zero_pages_pins_to_first() {
        let mut pager = Pager::new();
        pager.set_pages(0);
        assert_eq!(pager.go_to(3), 0);
        assert!(!pager.nav_visible());
        assert!(!pager.step(NavAction::Next));
    }

    #[test]
    fn test_shrinking_page_count_clamps_current() {
        let mut pager = Pager::new();
        pager.set_pages(5);
        pager.go_to(4);
        pager.set_pages(2);
        assert_eq!(pager.current(), 1);
    }
}

use ratatui::widgets::ScrollbarState;

const PAGE: usize = 10;

/// Vertical scroll position of a long dialog and its scrollbar.
#[derive(Debug, Default, Clone)]
pub struct ScrollState {
    pub offset: usize,
    pub scrollbar: ScrollbarState,
}

impl ScrollState {
    pub fn reset(&mut self) {
        self.offset = 0;
        self.scrollbar = ScrollbarState::new(0);
    }

    pub fn scroll_up(&mut self) {
        self.set(self.offset.saturating_sub(1));
    }

    pub fn scroll_down(&mut self) {
        self.set(self.offset.saturating_add(1));
    }

    pub fn page_up(&mut self) {
        self.set(self.offset.saturating_sub(PAGE));
    }

    pub fn page_down(&mut self) {
        self.set(self.offset.saturating_add(PAGE));
    }

    pub fn scroll_to_top(&mut self) {
        self.set(0);
    }

    /// Clamped to the real content length on the next render
    pub fn scroll_to_bottom(&mut self) {
        self.set(usize::MAX);
    }

    /// Keep the offset inside the content once its size is known
    pub fn clamp(&mut self, content_lines: usize, viewport_lines: usize) -> usize {
        let max_offset = content_lines.saturating_sub(viewport_lines);
        self.offset = self.offset.min(max_offset);
        self.scrollbar = self
            .scrollbar
            .content_length(max_offset + 1)
            .viewport_content_length(viewport_lines)
            .position(self.offset);
        self.offset
    }

    fn set(&mut self, offset: usize) {
        self.offset = offset;
        self.scrollbar = self.scrollbar.position(offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_is_clamped_to_content() {
        let mut scroll = ScrollState::default();
        scroll.scroll_to_bottom();
        assert_eq!(scroll.clamp(30, 10), 20);

        scroll.page_up();
        assert_eq!(scroll.offset, 10);
    }

    #[test]
    fn short_content_never_scrolls() {
        let mut scroll = ScrollState::default();
        scroll.page_down();
        assert_eq!(scroll.clamp(5, 10), 0);
    }
}

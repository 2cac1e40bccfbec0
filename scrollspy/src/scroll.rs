use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEventKind, MouseEventKind};

/// Vertical scroll direction, derived from successive offset samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    Up,
    #[default]
    Down,
}

/// Vertical scroll position of a document inside a fixed viewport.
/// Like the tracker, this is user-managed state that persists across frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollState {
    offset_y: u16,
    viewport_height: u16,
    content_height: u16,
}

impl ScrollState {
    pub fn new(viewport_height: u16, content_height: u16) -> Self {
        Self {
            offset_y: 0,
            viewport_height,
            content_height,
        }
    }

    pub fn offset_y(&self) -> u16 {
        self.offset_y
    }

    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Set the offset, clamped to the valid range.
    pub fn set(&mut self, y: u16) {
        self.offset_y = y.min(self.max_offset());
    }

    /// Scroll by a delta amount.
    /// Returns true if the offset changed.
    pub fn scroll_by(&mut self, dy: i32) -> bool {
        let new_y = (self.offset_y as i32 + dy).clamp(0, self.max_offset() as i32) as u16;
        if new_y != self.offset_y {
            self.offset_y = new_y;
            true
        } else {
            false
        }
    }

    /// Update the extents after a layout or resize pass and re-clamp.
    pub fn resize(&mut self, viewport_height: u16, content_height: u16) {
        self.viewport_height = viewport_height;
        self.content_height = content_height;
        self.offset_y = self.offset_y.min(self.max_offset());
    }

    /// Process raw crossterm events and update the offset.
    /// Returns true if any event changed the scroll position.
    pub fn process_events(&mut self, raw: &[CrosstermEvent]) -> bool {
        let mut changed = false;

        for event in raw {
            match event {
                CrosstermEvent::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => changed |= self.scroll_by(-1),
                    MouseEventKind::ScrollDown => changed |= self.scroll_by(1),
                    _ => {}
                },

                CrosstermEvent::Key(key) => {
                    // Only key presses (not release/repeat on some terminals)
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    let page = self.viewport_height.max(1) as i32;
                    changed |= match key.code {
                        KeyCode::Up => self.scroll_by(-1),
                        KeyCode::Down => self.scroll_by(1),
                        KeyCode::PageUp => self.scroll_by(-page),
                        KeyCode::PageDown => self.scroll_by(page),
                        KeyCode::Home => self.scroll_by(-(self.offset_y as i32)),
                        KeyCode::End => self.scroll_by(self.max_offset() as i32),
                        _ => false,
                    };
                }

                _ => {}
            }
        }

        changed
    }
}

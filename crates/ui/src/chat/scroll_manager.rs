use gpui::{Pixels, ScrollHandle, px};

/// Distance from the tail that still counts as "at the bottom".
const TAIL_SNAP_DISTANCE: Pixels = px(24.);
/// Movement below this is layout jitter, not a user scroll.
const JITTER: Pixels = px(1.);

/// Tracks whether the list should stay pinned to its tail.
///
/// Growing content never unpins; only an upward scroll with an unchanged
/// content height does. Scrolling back near the tail pins again.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TailFollow {
    pinned: bool,
    last_offset: Pixels,
    last_max_offset: Pixels,
}

impl TailFollow {
    fn new() -> Self {
        Self {
            pinned: true,
            last_offset: Pixels::ZERO,
            last_max_offset: Pixels::ZERO,
        }
    }

    /// Feeds the handle's current offsets. GPUI scroll offsets are negative
    /// going down, so the tail sits at `offset == -max_offset`.
    fn observe(&mut self, offset: Pixels, max_offset: Pixels) -> bool {
        let content_changed = (max_offset - self.last_max_offset).abs() > JITTER;
        let moved = offset - self.last_offset;
        let near_tail =
            max_offset <= Pixels::ZERO || (offset + max_offset).abs() <= TAIL_SNAP_DISTANCE;

        if !content_changed {
            if self.pinned && moved > JITTER && !near_tail {
                self.pinned = false;
            } else if !self.pinned && near_tail {
                self.pinned = true;
            }
        }

        self.last_offset = offset;
        self.last_max_offset = max_offset;
        self.pinned
    }
}

/// Keeps the message list pinned to its tail unless the user scrolls away.
pub struct ScrollManager {
    scroll_handle: ScrollHandle,
    follow: TailFollow,
}

impl ScrollManager {
    pub fn new() -> Self {
        Self {
            scroll_handle: ScrollHandle::new(),
            follow: TailFollow::new(),
        }
    }

    pub fn handle(&self) -> &ScrollHandle {
        &self.scroll_handle
    }

    /// Re-reads the user's scroll position and, while pinned, asks for the
    /// tail. The scroll is resolved at layout time, after new rows are
    /// measured.
    pub fn before_render(&mut self) {
        let offset = self.scroll_handle.offset().y;
        let max_offset = self.scroll_handle.max_offset().height;

        if self.follow.observe(offset, max_offset) {
            self.scroll_handle.scroll_to_bottom();
        }
    }
}

impl Default for ScrollManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_left_behind_the_tail_keeps_following() {
        let mut follow = TailFollow::new();
        assert!(follow.observe(px(0.), px(100.)));
        assert!(follow.observe(px(-100.), px(100.)));

        // A new bubble was measured after the last scroll: one bubble short.
        assert!(follow.observe(px(-100.), px(160.)));
        // Next frame, nothing moved and nothing grew.
        assert!(follow.observe(px(-100.), px(160.)));
    }

    #[test]
    fn scrolling_up_unpins_and_returning_pins_again() {
        let mut follow = TailFollow::new();
        follow.observe(px(-300.), px(300.));

        assert!(!follow.observe(px(-120.), px(300.)));
        assert!(!follow.observe(px(-120.), px(360.)));
        assert!(follow.observe(px(-350.), px(360.)));
    }

    #[test]
    fn short_content_is_always_at_the_tail() {
        let mut follow = TailFollow::new();
        assert!(follow.observe(px(0.), px(0.)));
        assert!(follow.observe(px(0.), px(0.)));
    }
}

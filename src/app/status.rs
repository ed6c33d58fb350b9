//! Four-slot status frame for the 128×64 display.
//!
//! | Slot | Content          | Position (x, y) |
//! |------|------------------|-----------------|
//! | 0    | tier line        | (0, 0)          |
//! | 1    | secondary message| (0, 10)         |
//! | 2    | moisture readout | (0, 20)         |
//! | 3    | pump state       | (20, 40)        |
//!
//! Slot order is fixed so an operator always finds the same information in
//! the same place.  Empty slots are not drawn.

use heapless::String;

/// Characters per line at text size 1 on a 128-px-wide panel.
pub const LINE_CAPACITY: usize = 21;

/// Number of slots on the display.
pub const SLOT_COUNT: usize = 4;

/// Pixel origin of each slot.
pub const SLOT_POSITIONS: [(u8, u8); SLOT_COUNT] = [(0, 0), (0, 10), (0, 20), (20, 40)];

pub type StatusLine = String<LINE_CAPACITY>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFrame {
    lines: [StatusLine; SLOT_COUNT],
}

impl StatusFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set slot `slot` to `text`, truncated to the line width.
    /// Out-of-range slots are ignored.
    pub fn set(&mut self, slot: usize, text: &str) {
        let Some(line) = self.lines.get_mut(slot) else {
            return;
        };
        line.clear();
        for ch in text.chars() {
            if line.push(ch).is_err() {
                break;
            }
        }
    }

    pub fn line(&self, slot: usize) -> &str {
        self.lines.get(slot).map_or("", StatusLine::as_str)
    }

    /// Non-empty slots with their pixel position, in slot order.
    pub fn visible(&self) -> impl Iterator<Item = ((u8, u8), &str)> + '_ {
        self.lines
            .iter()
            .zip(SLOT_POSITIONS)
            .filter(|(line, _)| !line.is_empty())
            .map(|(line, pos)| (pos, line.as_str()))
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.as_str().is_empty())
    }
}

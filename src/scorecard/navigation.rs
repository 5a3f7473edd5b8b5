/// Position within the holes of a round.
///
/// Moves are clamped at both ends; there is no wrap-around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoleNavigator {
    index: usize,
    hole_count: usize,
}

impl HoleNavigator {
    pub fn new(hole_count: usize) -> Self {
        Self {
            index: 0,
            hole_count,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn hole_count(&self) -> usize {
        self.hole_count
    }

    pub fn has_holes(&self) -> bool {
        self.hole_count > 0
    }

    /// Number the next started hole gets while the round has none
    pub fn next_hole_number(&self) -> usize {
        self.index + 1
    }

    pub fn can_go_previous(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.index + 1 < self.hole_count
    }

    /// Step back one hole; returns whether the index moved
    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Step forward one hole; returns whether the index moved
    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Follow a re-fetch of the hole list, keeping the index in range
    pub fn set_hole_count(&mut self, hole_count: usize) {
        self.hole_count = hole_count;
        if hole_count > 0 && self.index >= hole_count {
            self.index = hole_count - 1;
        }
    }
}

/// Caret or selection inside the expression, in characters.
///
/// `start == end` when nothing is selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Caret {
    pub start: usize,
    pub end: usize,
}

impl Caret {
    /// Create a caret, swapping the bounds if they are reversed.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// A collapsed caret at `offset`.
    pub fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Move both bounds forward by `by`, staying within `limit`.
    pub(crate) fn advanced(self, by: usize, limit: usize) -> Self {
        Self {
            start: (self.start + by).min(limit),
            end: (self.end + by).min(limit),
        }
    }

    /// Pull both bounds back inside `limit`.
    pub(crate) fn clamped(self, limit: usize) -> Self {
        Self {
            start: self.start.min(limit),
            end: self.end.min(limit),
        }
    }
}

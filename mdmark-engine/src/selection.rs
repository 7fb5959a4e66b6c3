//! Text selections over the rendered view and the toolbar that follows them

/// A range of characters in the rendered view's text content.
///
/// Offsets count Unicode scalar values, not bytes, so selections stay valid for
/// any script. `start <= end` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextSelection {
    start: usize,
    end: usize,
}

impl TextSelection {
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn start(self) -> usize {
        self.start
    }

    pub fn end(self) -> usize {
        self.end
    }

    pub fn is_collapsed(self) -> bool {
        self.start == self.end
    }

    pub fn len(self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.is_collapsed()
    }
}

/// Bounding rectangle of a selection, in whatever units the host lays out in
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Floating color toolbar shown above a non-empty selection
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ToolbarState {
    pub visible: bool,
    pub top: f64,
    pub left: f64,
}

impl ToolbarState {
    /// Center the toolbar horizontally just above the selection bounds.
    pub fn above(bounds: Rect) -> Self {
        Self {
            visible: true,
            top: bounds.top - 10.0,
            left: bounds.left + bounds.width / 2.0,
        }
    }

    pub fn hidden() -> Self {
        Self::default()
    }
}

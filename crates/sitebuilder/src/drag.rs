//! Drag-and-drop adapter.
//!
//! The presentation layer turns pointer events into hover notifications over
//! section slots. [`DragState`] turns those into the `(drag, hover)` index
//! pairs `reorder_section` expects, tracking where the dragged section ends
//! up after each reorder so a single drag can pass over several slots.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    index: usize,
}

impl DragState {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Current list position of the dragged section.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the reorder to apply when hovering over `hover_index`, or
    /// `None` when the section is over its own slot.
    pub fn hover(&mut self, hover_index: usize) -> Option<(usize, usize)> {
        if hover_index == self.index {
            return None;
        }
        let drag_index = self.index;
        self.index = hover_index;
        Some((drag_index, hover_index))
    }
}

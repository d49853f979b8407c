//! Pointer hover tracking over treemap tiles.

use crate::tooltip::Tooltip;
use crate::treemap::Treemap;
use teselar_core::Event;
use tracing::trace;

/// Tracks which tile the pointer is over and keeps the tooltip in sync.
///
/// Moving within one tile refreshes the tooltip position; moving straight
/// from one tile onto another swaps the content without an intermediate
/// hidden frame.
#[derive(Debug, Clone, Default)]
pub struct HoverState {
    current: Option<usize>,
    tooltip: Tooltip,
}

impl HoverState {
    /// Create an idle hover state with a hidden tooltip.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a pointer event, hit-testing against the treemap's tiles.
    pub fn handle(&mut self, event: &Event, treemap: &Treemap) {
        match event {
            Event::MouseMove { position } => match treemap.tile_index_at(position) {
                Some(index) => {
                    let tile = &treemap.tiles()[index];
                    if self.current != Some(index) {
                        trace!(tile = %tile.node_id, "hover enter");
                    }
                    self.current = Some(index);
                    self.tooltip.show_at(
                        vec![
                            format!("Name: {}", tile.name),
                            format!("Category: {}", tile.category),
                            format!("Value: {}", tile.value),
                        ],
                        *position,
                        tile.value,
                    );
                }
                None => self.clear(),
            },
            Event::MouseLeave => self.clear(),
            Event::MouseEnter => {}
        }
    }

    /// Index of the hovered tile, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.current
    }

    /// The tooltip driven by this state.
    #[must_use]
    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Drop any hover and hide the tooltip.
    pub fn reset(&mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        if self.current.is_some() {
            trace!("hover leave");
        }
        self.current = None;
        self.tooltip.hide();
    }
}

//! Widgets rendering a laid-out hierarchy: the treemap tiles, the category
//! legend, and the hover tooltip with its interaction state.

mod hover;
mod legend;
mod tooltip;
mod treemap;

pub use hover::HoverState;
pub use legend::{Legend, LegendEntry};
pub use tooltip::Tooltip;
pub use treemap::{split_label, Tile, Treemap};

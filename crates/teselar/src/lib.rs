//! Squarified treemap diagrams.
//!
//! The pipeline mirrors the data flow: a JSON dataset is parsed into a
//! [`Hierarchy`], the squarified [`TreemapLayout`] writes rectangle bounds,
//! a [`CategoryPalette`] assigns colors by first-seen category, and the
//! [`Treemap`], [`Legend`] and [`Tooltip`] widgets paint the scene as
//! backend-neutral [`DrawCommand`]s. [`Diagram`] ties the pieces together:
//!
//! ```
//! use teselar::{Dataset, Diagram};
//!
//! let json = r#"{
//!     "name": "root",
//!     "children": [
//!         {"name": "WiiSports", "category": "Wii", "value": 82.9},
//!         {"name": "SuperMarioBros", "category": "NES", "value": 40.24}
//!     ]
//! }"#;
//!
//! let diagram = Diagram::load(Dataset::VideoGames, json).unwrap();
//! assert_eq!(diagram.treemap().tiles().len(), 2);
//! assert!(!diagram.scene().is_empty());
//! ```

mod dataset;
mod diagram;

pub use dataset::Dataset;
pub use diagram::{Diagram, DiagramError};

pub use teselar_core::{
    Canvas, CategoryPalette, Color, Constraints, DrawCommand, Event, Point, Rect, Size, Widget,
};
pub use teselar_layout::{Hierarchy, HierarchyError, Node, NodeId, RawNode, TreemapLayout};
pub use teselar_widgets::{split_label, HoverState, Legend, LegendEntry, Tile, Tooltip, Treemap};

//! Diagram assembly: JSON document in, paintable scene out.

use crate::dataset::Dataset;
use teselar_core::{DrawCommand, Event, RecordingCanvas, Widget};
use teselar_layout::{Hierarchy, HierarchyError, TreemapLayout};
use teselar_widgets::{HoverState, Legend, Treemap};
use thiserror::Error;
use tracing::{error, info};

/// Errors raised while loading a diagram.
#[derive(Debug, Error)]
pub enum DiagramError {
    /// The dataset document could not be parsed or built into a hierarchy.
    #[error("failed to load dataset: {0}")]
    Hierarchy(#[from] HierarchyError),
}

/// A fully assembled treemap diagram for one dataset.
///
/// Loading runs the whole pipeline eagerly: parse, build, layout, color
/// assignment, widget construction. A failed load produces no partial
/// scene; the previous diagram (if any) stays untouched at the caller.
#[derive(Debug)]
pub struct Diagram {
    dataset: Dataset,
    treemap: Treemap,
    legend: Legend,
    hover: HoverState,
}

impl Diagram {
    /// Load a diagram from a dataset's JSON document.
    pub fn load(dataset: Dataset, json: &str) -> Result<Self, DiagramError> {
        let mut hierarchy = Hierarchy::from_json(json).map_err(|err| {
            error!(dataset = dataset.title(), %err, "dataset load failed");
            DiagramError::from(err)
        })?;

        TreemapLayout::default().compute(&mut hierarchy);

        let mut palette = teselar_core::CategoryPalette::new();
        let treemap = Treemap::from_hierarchy(&hierarchy, &mut palette).test_id("tree-map");
        let legend = Legend::from_palette(&palette).test_id("legend");

        info!(
            dataset = dataset.title(),
            tiles = treemap.tiles().len(),
            categories = palette.len(),
            "diagram loaded"
        );

        Ok(Self {
            dataset,
            treemap,
            legend,
            hover: HoverState::new(),
        })
    }

    /// The dataset this diagram renders.
    #[must_use]
    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    /// Diagram title, from the dataset descriptor.
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.dataset.title()
    }

    /// Diagram description, from the dataset descriptor.
    #[must_use]
    pub fn description(&self) -> &'static str {
        self.dataset.description()
    }

    /// The treemap widget.
    #[must_use]
    pub fn treemap(&self) -> &Treemap {
        &self.treemap
    }

    /// The legend widget.
    #[must_use]
    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// The hover controller, including its tooltip.
    #[must_use]
    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    /// Mutable hover access, for host-driven resets.
    pub fn hover_mut(&mut self) -> &mut HoverState {
        &mut self.hover
    }

    /// Feed a pointer event into the diagram.
    pub fn handle_event(&mut self, event: &Event) {
        self.hover.handle(event, &self.treemap);
    }

    /// Paint the full scene (tiles, legend, tooltip) into draw commands.
    #[must_use]
    pub fn scene(&self) -> Vec<DrawCommand> {
        let mut canvas = RecordingCanvas::new();
        self.treemap.paint(&mut canvas);
        self.legend.paint(&mut canvas);
        self.hover.tooltip().paint(&mut canvas);
        canvas.take_commands()
    }
}

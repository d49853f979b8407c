//! Category legend: a grid of color swatches with category labels.

use serde::{Deserialize, Serialize};
use teselar_core::{
    widget::{LayoutResult, TextStyle},
    Canvas, CategoryPalette, Color, Constraints, Event, Point, Rect, Size, TypeId, Widget,
};

/// Legend panel width; fixes the column count together with [`H_SPACING`].
const LEGEND_WIDTH: f32 = 600.0;
/// Horizontal distance between swatch columns.
const H_SPACING: f32 = 200.0;
/// Vertical gap between swatch rows.
const V_SPACING: f32 = 10.0;
/// Side length of a color swatch.
const RECT_SIZE: f32 = 15.0;
/// Grid origin within the legend panel.
const GRID_ORIGIN: Point = Point { x: 60.0, y: 10.0 };
/// Label offset from the swatch's right edge.
const TEXT_X_OFFSET: f32 = 5.0;
/// Label baseline offset from the swatch's bottom edge.
const TEXT_Y_OFFSET: f32 = -2.0;

/// One legend row item: a category name, its swatch color, and the
/// swatch's resolved grid position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    /// Category name, drawn next to the swatch.
    pub category: String,
    /// Swatch fill, identical to the category's tile fill.
    pub color: Color,
    /// Swatch bounds within the legend.
    pub swatch: Rect,
}

/// Legend widget laying entries out in fixed-width columns.
///
/// Entries keep the palette's first-seen category order, so the legend
/// reads in the same order colors appear across the treemap.
#[derive(Debug, Clone)]
pub struct Legend {
    entries: Vec<LegendEntry>,
    size: Size,
    bounds: Rect,
    test_id_value: Option<String>,
}

impl Legend {
    /// Build a legend from every category the palette has assigned.
    #[must_use]
    pub fn from_palette(palette: &CategoryPalette) -> Self {
        let columns = ((LEGEND_WIDTH / H_SPACING).floor() as usize).max(1);

        let mut entries = Vec::with_capacity(palette.len());
        for (i, category) in palette.categories().iter().enumerate() {
            let column = i % columns;
            let row = i / columns;
            let swatch = Rect::new(
                GRID_ORIGIN.x + column as f32 * H_SPACING,
                GRID_ORIGIN.y + row as f32 * (RECT_SIZE + V_SPACING),
                RECT_SIZE,
                RECT_SIZE,
            );
            entries.push(LegendEntry {
                category: category.clone(),
                color: palette
                    .get(category)
                    .unwrap_or(Color::TRANSPARENT),
                swatch,
            });
        }

        let rows = entries.len().div_ceil(columns);
        let size = Size::new(
            LEGEND_WIDTH,
            GRID_ORIGIN.y + rows as f32 * (RECT_SIZE + V_SPACING),
        );
        Self {
            entries,
            size,
            bounds: Rect::default(),
            test_id_value: None,
        }
    }

    /// Set test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Entries in palette first-seen order.
    #[must_use]
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    /// Look up the entry for a category.
    #[must_use]
    pub fn entry_for(&self, category: &str) -> Option<&LegendEntry> {
        self.entries.iter().find(|e| e.category == category)
    }
}

impl Widget for Legend {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.size)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult { size: self.size }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let text_style = TextStyle::default();
        for entry in &self.entries {
            canvas.fill_rect(entry.swatch, entry.color);
            let baseline = Point::new(
                entry.swatch.right() + TEXT_X_OFFSET,
                entry.swatch.bottom() + TEXT_Y_OFFSET,
            );
            canvas.draw_text(&entry.category, baseline, &text_style);
        }
    }

    fn event(&mut self, _event: &Event) {}

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

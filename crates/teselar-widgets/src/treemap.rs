//! Treemap widget: one colored tile per leaf of a laid-out hierarchy.

use serde::{Deserialize, Serialize};
use teselar_core::{
    widget::{LayoutResult, TextStyle},
    Canvas, CategoryPalette, Color, Constraints, Event, Point, Rect, Size, TypeId, Widget,
};
use teselar_layout::Hierarchy;

/// Horizontal inset of the first label character within a tile.
const LABEL_INSET_X: f32 = 4.0;
/// Baseline of the first label line within a tile.
const LABEL_FIRST_BASELINE: f32 = 13.0;
/// Vertical advance per label line.
const LABEL_LINE_HEIGHT: f32 = 10.0;
/// Label font size.
const LABEL_TEXT_SIZE: f32 = 10.0;

/// One rendered leaf rectangle with its inspectable source attributes.
///
/// `node_id`, `name`, `category` and `value` mirror the source node so
/// external tooling can query rendered state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Stable identifier equal to the source node's dotted id.
    pub node_id: String,
    /// Source node name.
    pub name: String,
    /// Source node category.
    pub category: String,
    /// Source node value.
    pub value: f64,
    /// Layout bounds in canvas coordinates.
    pub bounds: Rect,
    /// Fill color assigned by category.
    pub fill: Color,
    /// Label fragments, one per stacked text line.
    pub label_lines: Vec<String>,
}

/// Split a name into label fragments before each capitalized word-start:
/// every uppercase letter that is followed by a non-uppercase character
/// opens a new fragment.
#[must_use]
pub fn split_label(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }
    let mut fragments = Vec::new();
    let mut start = 0;
    for i in 1..chars.len() {
        if chars[i].is_ascii_uppercase()
            && chars.get(i + 1).is_some_and(|c| !c.is_ascii_uppercase())
        {
            fragments.push(chars[start..i].iter().collect());
            start = i;
        }
    }
    fragments.push(chars[start..].iter().collect());
    fragments
}

/// The treemap itself: a flat list of tiles in depth-first leaf order.
///
/// Built from a hierarchy whose bounds are already computed; building is
/// also the moment categories meet the palette, which fixes the
/// first-seen color order.
#[derive(Debug, Clone)]
pub struct Treemap {
    tiles: Vec<Tile>,
    size: Size,
    bounds: Rect,
    test_id_value: Option<String>,
}

impl Treemap {
    /// Build tiles from a laid-out hierarchy, assigning category colors in
    /// depth-first leaf order.
    #[must_use]
    pub fn from_hierarchy(hierarchy: &Hierarchy, palette: &mut CategoryPalette) -> Self {
        let mut tiles = Vec::new();
        let mut size = Size::ZERO;
        for &leaf in &hierarchy.leaves() {
            let node = hierarchy.node(leaf);
            let bounds = node.bounds.unwrap_or_default();
            let category = node.category.clone().unwrap_or_default();
            let fill = palette.color_for(&category);
            size = Size::new(
                size.width.max(bounds.right()),
                size.height.max(bounds.bottom()),
            );
            tiles.push(Tile {
                node_id: node.id.clone(),
                name: node.name.clone(),
                category,
                value: node.value,
                bounds,
                fill,
                label_lines: split_label(&node.name),
            });
        }
        Self {
            tiles,
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

    /// All tiles in depth-first leaf order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Find the index of the tile under a point, if any.
    #[must_use]
    pub fn tile_index_at(&self, point: &Point) -> Option<usize> {
        self.tiles
            .iter()
            .position(|tile| tile.bounds.contains_point(point))
    }

    /// Find the tile under a point, if any.
    #[must_use]
    pub fn tile_at(&self, point: &Point) -> Option<&Tile> {
        self.tile_index_at(point).map(|i| &self.tiles[i])
    }

    /// Look up a tile by its stable node id.
    #[must_use]
    pub fn tile_by_id(&self, node_id: &str) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.node_id == node_id)
    }
}

impl Widget for Treemap {
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
        let text_style = TextStyle {
            size: LABEL_TEXT_SIZE,
            color: Color::BLACK,
        };
        for tile in &self.tiles {
            canvas.fill_rect(tile.bounds, tile.fill);

            // Labels overflow is clipped by the tile, never wrapped.
            canvas.push_clip(tile.bounds);
            for (i, line) in tile.label_lines.iter().enumerate() {
                let baseline = Point::new(
                    tile.bounds.x + LABEL_INSET_X,
                    tile.bounds.y + LABEL_FIRST_BASELINE + i as f32 * LABEL_LINE_HEIGHT,
                );
                canvas.draw_text(line, baseline, &text_style);
            }
            canvas.pop_clip();
        }
    }

    fn event(&mut self, _event: &Event) {
        // Hover is tracked by `HoverState`, which owns the tooltip; the
        // treemap itself only exposes hit-testing.
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

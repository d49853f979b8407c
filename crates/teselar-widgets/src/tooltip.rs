//! Hover tooltip following the pointer.

use serde::{Deserialize, Serialize};
use teselar_core::{
    widget::{LayoutResult, TextStyle},
    Canvas, Color, Constraints, Event, Point, Rect, Size, TypeId, Widget,
};

/// Horizontal pointer offset of the tooltip's top-left corner.
const OFFSET_X: f32 = 10.0;
/// Vertical pointer offset; negative so the tooltip floats above the cursor.
const OFFSET_Y: f32 = -28.0;
/// Opacity while visible.
const VISIBLE_OPACITY: f32 = 0.9;
/// Opacity while hidden.
const HIDDEN_OPACITY: f32 = 0.0;
/// Vertical advance between tooltip lines.
const LINE_HEIGHT: f32 = 14.0;
/// Baseline of the first tooltip line below the anchor.
const FIRST_BASELINE: f32 = 12.0;
/// Tooltip background.
const BACKGROUND: Color = Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};
/// Horizontal padding around tooltip text.
const PADDING_X: f32 = 6.0;
/// Rough advance per character for sizing the background.
const CHAR_WIDTH: f32 = 6.0;

/// Tooltip widget: a short stack of text lines anchored near the pointer.
///
/// The tooltip is always part of the scene; visibility is expressed as
/// opacity so showing and hiding never restructures the widget tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    lines: Vec<String>,
    position: Point,
    opacity: f32,
    /// Value of the hovered tile, exposed for external inspection.
    data_value: Option<f64>,
    #[serde(skip)]
    bounds: Rect,
    test_id_value: Option<String>,
}

impl Tooltip {
    /// Create a hidden tooltip.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            position: Point::ORIGIN,
            opacity: HIDDEN_OPACITY,
            data_value: None,
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

    /// Show the tooltip near a pointer position, replacing any previous
    /// content without an intermediate hide.
    pub fn show_at(&mut self, lines: Vec<String>, pointer: Point, data_value: f64) {
        self.lines = lines;
        self.position = pointer.offset(OFFSET_X, OFFSET_Y);
        self.opacity = VISIBLE_OPACITY;
        self.data_value = Some(data_value);
    }

    /// Hide the tooltip, clearing its inspectable value.
    pub fn hide(&mut self) {
        self.opacity = HIDDEN_OPACITY;
        self.data_value = None;
    }

    /// Check whether the tooltip is currently shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Current text lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Top-left anchor in canvas coordinates.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Value of the hovered tile while visible.
    #[must_use]
    pub fn data_value(&self) -> Option<f64> {
        self.data_value
    }

    fn content_size(&self) -> Size {
        let widest = self.lines.iter().map(String::len).max().unwrap_or(0);
        Size::new(
            widest as f32 * CHAR_WIDTH + 2.0 * PADDING_X,
            self.lines.len() as f32 * LINE_HEIGHT + 4.0,
        )
    }
}

impl Default for Tooltip {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Tooltip {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.content_size())
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: self.content_size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if !self.is_visible() {
            return;
        }
        let size = self.content_size();
        let text_style = TextStyle {
            size: 12.0,
            color: Color::WHITE,
        };

        canvas.push_opacity(self.opacity);
        canvas.fill_rect(
            Rect::new(self.position.x, self.position.y, size.width, size.height),
            BACKGROUND,
        );
        for (i, line) in self.lines.iter().enumerate() {
            let baseline = Point::new(
                self.position.x + PADDING_X,
                self.position.y + FIRST_BASELINE + i as f32 * LINE_HEIGHT,
            );
            canvas.draw_text(line, baseline, &text_style);
        }
        canvas.pop_opacity();
    }

    fn event(&mut self, event: &Event) {
        if matches!(event, Event::MouseLeave) {
            self.hide();
        }
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

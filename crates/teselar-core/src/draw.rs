//! Draw commands.
//!
//! All rendering reduces to these primitives; backends replay them.

use crate::widget::TextStyle;
use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Box style for rectangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
    /// Stroke style (None = no stroke)
    pub stroke: Option<StrokeStyle>,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
            stroke: None,
        }
    }
}

impl BoxStyle {
    /// Create a box with only fill color.
    #[must_use]
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Create a box with only stroke.
    #[must_use]
    pub fn stroke(style: StrokeStyle) -> Self {
        Self {
            fill: None,
            stroke: Some(style),
        }
    }
}

/// Drawing primitive - all rendering reduces to these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Box style
        style: BoxStyle,
    },

    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Baseline position
        position: Point,
        /// Text style
        style: TextStyle,
    },

    /// Clip to bounds
    Clip {
        /// Clip bounds
        bounds: Rect,
        /// Child command
        child: Box<DrawCommand>,
    },

    /// Apply opacity
    Opacity {
        /// Alpha value (0.0 - 1.0)
        alpha: f32,
        /// Child command
        child: Box<DrawCommand>,
    },
}

impl DrawCommand {
    /// Create a filled rectangle.
    #[must_use]
    pub fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            style: BoxStyle::fill(color),
        }
    }

    /// Create a stroked rectangle.
    #[must_use]
    pub fn stroked_rect(bounds: Rect, stroke: StrokeStyle) -> Self {
        Self::Rect {
            bounds,
            style: BoxStyle::stroke(stroke),
        }
    }

    /// Wrap with clip bounds.
    #[must_use]
    pub fn with_clip(self, bounds: Rect) -> Self {
        Self::Clip {
            bounds,
            child: Box::new(self),
        }
    }

    /// Wrap with opacity.
    #[must_use]
    pub fn with_opacity(self, alpha: f32) -> Self {
        Self::Opacity {
            alpha,
            child: Box::new(self),
        }
    }
}

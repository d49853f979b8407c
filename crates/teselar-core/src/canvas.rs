//! Canvas implementations for rendering.

use crate::draw::{DrawCommand, StrokeStyle};
use crate::widget::{Canvas, TextStyle};
use crate::{Color, Point, Rect};

/// A [`Canvas`] implementation that records draw operations as
/// [`DrawCommand`]s.
///
/// This is useful for:
/// - Testing (verify what was painted)
/// - Serialization (hand commands to an embedding renderer)
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    clip_stack: Vec<Rect>,
    opacity_stack: Vec<f32>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, clearing the canvas.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Clear all recorded commands and stacks.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
        self.opacity_stack.clear();
    }

    /// Get the current clip bounds (None if no clips pushed).
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    fn push(&mut self, command: DrawCommand) {
        let mut command = command;
        if let Some(clip) = self.clip_stack.last() {
            command = command.with_clip(*clip);
        }
        if let Some(alpha) = self.opacity_stack.last() {
            command = command.with_opacity(*alpha);
        }
        self.commands.push(command);
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCommand::filled_rect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.push(DrawCommand::stroked_rect(
            rect,
            StrokeStyle { color, width },
        ));
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.push(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        // Nested clips shrink to the intersection.
        let clip = match self.clip_stack.last() {
            Some(outer) => outer.intersection(&rect).unwrap_or(Rect::default()),
            None => rect,
        };
        self.clip_stack.push(clip);
    }

    fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }

    fn push_opacity(&mut self, alpha: f32) {
        self.opacity_stack.push(alpha.clamp(0.0, 1.0));
    }

    fn pop_opacity(&mut self) {
        self.opacity_stack.pop();
    }
}

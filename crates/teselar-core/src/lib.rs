//! Core types and traits for the teselar treemap toolkit.
//!
//! This crate provides the foundational pieces shared by the layout engine
//! and the widgets:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with hex parsing and interpolation
//! - Draw commands: [`DrawCommand`] and friends
//! - Layout constraints: [`Constraints`]
//! - Pointer events: [`Event`]
//! - The [`Widget`] and [`Canvas`] traits plus a [`RecordingCanvas`]
//! - The ordinal [`CategoryPalette`] used to color categories

mod canvas;
mod color;
mod constraints;
mod draw;
mod event;
mod geometry;
mod palette;
pub mod widget;

pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::{BoxStyle, DrawCommand, StrokeStyle};
pub use event::Event;
pub use geometry::{Point, Rect, Size};
pub use palette::{CategoryPalette, ORDINAL_COLORS};
pub use widget::{Canvas, LayoutResult, TextStyle, TypeId, Widget};

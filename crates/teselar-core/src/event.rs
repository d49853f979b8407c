//! Pointer events dispatched to widgets.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer moved to position
    MouseMove {
        /// New position in canvas coordinates
        position: Point,
    },
    /// Pointer entered the widget bounds
    MouseEnter,
    /// Pointer left the widget bounds
    MouseLeave,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_mouse_move_carries_position() {
        let e = Event::MouseMove {
            position: Point::new(12.0, 34.0),
        };
        match e {
            Event::MouseMove { position } => {
                assert_eq!(position.x, 12.0);
                assert_eq!(position.y, 34.0);
            }
            _ => panic!("Expected MouseMove"),
        }
    }

    #[test]
    fn test_event_equality() {
        assert_eq!(Event::MouseLeave, Event::MouseLeave);
        assert_ne!(Event::MouseEnter, Event::MouseLeave);
    }
}

//! Ordinal category palette.
//!
//! Categories are assigned colors by first-seen order from a fixed list of
//! 20 base colors, each softened by blending 20% toward white. Once the
//! distinct-category count exceeds the palette, colors cycle.

use crate::color::Color;
use std::collections::HashMap;
use tracing::warn;

/// The fixed ordinal palette (d3 `schemeCategory20` ordering).
pub const ORDINAL_COLORS: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

/// Fraction blended toward white to soften saturation.
const FADE: f32 = 0.2;

/// Memoized category-to-color assignment.
///
/// The first time a category is seen it receives
/// `palette[seen_count % palette_len]`; repeats reuse the stored color.
/// Assignment order is whatever order the caller asks in, which for a
/// treemap is the depth-first leaf order of the sorted hierarchy.
#[derive(Debug, Clone)]
pub struct CategoryPalette {
    colors: Vec<Color>,
    order: Vec<String>,
    assigned: HashMap<String, usize>,
}

impl CategoryPalette {
    /// Create a palette from the built-in ordinal colors.
    #[must_use]
    pub fn new() -> Self {
        let colors = ORDINAL_COLORS
            .iter()
            .map(|hex| {
                Color::from_hex(hex)
                    .expect("built-in palette entries are valid hex")
                    .faded(FADE)
            })
            .collect();
        Self {
            colors,
            order: Vec::new(),
            assigned: HashMap::new(),
        }
    }

    /// Number of base colors before cycling.
    #[must_use]
    pub fn palette_len(&self) -> usize {
        self.colors.len()
    }

    /// Get the color for a category, assigning one on first sight.
    pub fn color_for(&mut self, category: &str) -> Color {
        if let Some(&index) = self.assigned.get(category) {
            return self.colors[index % self.colors.len()];
        }
        let index = self.order.len();
        if index == self.colors.len() {
            warn!(
                categories = index + 1,
                palette = self.colors.len(),
                "distinct categories exceed palette size; colors will cycle"
            );
        }
        self.assigned.insert(category.to_string(), index);
        self.order.push(category.to_string());
        self.colors[index % self.colors.len()]
    }

    /// Look up an already-assigned color without assigning.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<Color> {
        self.assigned
            .get(category)
            .map(|&index| self.colors[index % self.colors.len()])
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.order
    }

    /// Number of distinct categories seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check whether no categories have been assigned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for CategoryPalette {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_has_twenty_colors() {
        assert_eq!(CategoryPalette::new().palette_len(), 20);
    }

    #[test]
    fn test_color_for_is_stable() {
        let mut palette = CategoryPalette::new();
        let first = palette.color_for("Action");
        let _ = palette.color_for("Drama");
        assert_eq!(palette.color_for("Action"), first);
    }

    #[test]
    fn test_nth_distinct_category_maps_to_nth_color() {
        let mut palette = CategoryPalette::new();
        for i in 0..20 {
            let color = palette.color_for(&format!("cat{i}"));
            let expected = Color::from_hex(ORDINAL_COLORS[i]).unwrap().faded(0.2);
            assert_eq!(color, expected, "category index {i}");
        }
    }

    #[test]
    fn test_colors_cycle_past_palette_size() {
        let mut palette = CategoryPalette::new();
        for i in 0..20 {
            let _ = palette.color_for(&format!("cat{i}"));
        }
        let wrapped = palette.color_for("cat20");
        assert_eq!(wrapped, Color::from_hex(ORDINAL_COLORS[0]).unwrap().faded(0.2));
        assert_eq!(palette.len(), 21);
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let mut palette = CategoryPalette::new();
        let _ = palette.color_for("Wii");
        let _ = palette.color_for("DS");
        let _ = palette.color_for("Wii");
        let _ = palette.color_for("X360");
        assert_eq!(palette.categories(), ["Wii", "DS", "X360"]);
    }

    #[test]
    fn test_get_does_not_assign() {
        let mut palette = CategoryPalette::new();
        assert!(palette.get("PS2").is_none());
        let assigned = palette.color_for("PS2");
        assert_eq!(palette.get("PS2"), Some(assigned));
    }

    #[test]
    fn test_colors_are_faded() {
        let mut palette = CategoryPalette::new();
        let color = palette.color_for("anything");
        let base = Color::from_hex(ORDINAL_COLORS[0]).unwrap();
        assert!(color.r > base.r);
    }
}

//! Squarified treemap layout (Bruls, Huizing & van Wijk).
//!
//! Each internal node's region is subdivided among its children in
//! proportion to `aggregate / parent aggregate`. Children are grouped into
//! rows laid along the region's current shorter side; an item joins the
//! open row while it does not worsen the row's worst aspect ratio.
//! Layout is pure f64 arithmetic over a fixed child order, so repeated
//! runs are bit-for-bit identical.

use crate::hierarchy::{Hierarchy, NodeId};
use serde::{Deserialize, Serialize};
use teselar_core::{Rect, Size};
use tracing::{debug, warn};

/// Default canvas width.
pub const DEFAULT_WIDTH: f32 = 950.0;
/// Default canvas height.
pub const DEFAULT_HEIGHT: f32 = 550.0;
/// Default inner padding between sibling tiles.
pub const DEFAULT_PADDING: f32 = 1.0;

/// Treemap layout configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreemapLayout {
    /// Canvas size the root region fills.
    pub size: Size,
    /// Inner padding between sibling tiles, applied after proportional
    /// positioning; it never affects the proportional split itself.
    pub padding: f32,
}

impl Default for TreemapLayout {
    fn default() -> Self {
        Self {
            size: Size::new(DEFAULT_WIDTH, DEFAULT_HEIGHT),
            padding: DEFAULT_PADDING,
        }
    }
}

/// Working rectangle in f64 to keep the layout deterministic and free of
/// f32 accumulation error until bounds are finally stored.
#[derive(Debug, Clone, Copy)]
struct Region {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Region {
    fn to_rect(self) -> Rect {
        Rect::new(self.x as f32, self.y as f32, self.w as f32, self.h as f32)
    }
}

impl TreemapLayout {
    /// Create a layout over the given canvas.
    #[must_use]
    pub fn new(width: f32, height: f32, padding: f32) -> Self {
        Self {
            size: Size::new(width, height),
            padding: padding.max(0.0),
        }
    }

    /// Compute bounds for every node in the hierarchy.
    ///
    /// Internal-node bounds drive the recursion; leaf bounds are the
    /// externally consumed output.
    pub fn compute(&self, hierarchy: &mut Hierarchy) {
        let root = hierarchy.root();
        let region = Region {
            x: 0.0,
            y: 0.0,
            w: f64::from(self.size.width),
            h: f64::from(self.size.height),
        };
        hierarchy.node_mut(root).bounds = Some(region.to_rect());
        self.layout_node(hierarchy, root, region);
        debug!(
            width = self.size.width,
            height = self.size.height,
            padding = self.padding,
            "treemap layout computed"
        );
    }

    fn layout_node(&self, hierarchy: &mut Hierarchy, id: NodeId, region: Region) {
        let children = hierarchy.node(id).children.clone();
        if children.is_empty() {
            return;
        }

        let parent_aggregate = hierarchy.node(id).aggregate;
        let region_area = region.w * region.h;

        // Partition zero-aggregate children out: they get zero-area rects
        // and cannot participate in row building.
        let mut placements = Vec::with_capacity(children.len());
        let mut positive = Vec::with_capacity(children.len());
        for &child in &children {
            let aggregate = hierarchy.node(child).aggregate;
            let area = if parent_aggregate > 0.0 {
                region_area * (aggregate / parent_aggregate)
            } else {
                0.0
            };
            if area > 0.0 && area.is_finite() {
                positive.push((child, area));
            } else {
                placements.push((
                    child,
                    Region {
                        x: region.x,
                        y: region.y,
                        w: 0.0,
                        h: 0.0,
                    },
                ));
            }
        }

        let placed = squarify(
            &positive.iter().map(|&(_, area)| area).collect::<Vec<_>>(),
            region,
        );
        for (&(child, _), rect) in positive.iter().zip(placed) {
            placements.push((child, rect));
        }

        for (child, placed) in placements {
            let padded = pad_within(placed, region, f64::from(self.padding) / 2.0);
            hierarchy.node_mut(child).bounds = Some(padded.to_rect());
            self.layout_node(hierarchy, child, padded);
        }
    }
}

/// Inset a child rectangle by `half` on every side that is not flush with
/// its parent region, producing uniform gaps of a full padding unit between
/// siblings and none at the region boundary. Collapses to the midpoint
/// rather than inverting.
fn pad_within(rect: Region, region: Region, half: f64) -> Region {
    const EPS: f64 = 1e-9;

    let mut x0 = rect.x;
    let mut y0 = rect.y;
    let mut x1 = rect.x + rect.w;
    let mut y1 = rect.y + rect.h;

    if x0 > region.x + EPS {
        x0 += half;
    }
    if y0 > region.y + EPS {
        y0 += half;
    }
    if x1 < region.x + region.w - EPS {
        x1 -= half;
    }
    if y1 < region.y + region.h - EPS {
        y1 -= half;
    }

    if x1 < x0 {
        let mid = (x0 + x1) / 2.0;
        x0 = mid;
        x1 = mid;
    }
    if y1 < y0 {
        let mid = (y0 + y1) / 2.0;
        y0 = mid;
        y1 = mid;
    }

    Region {
        x: x0,
        y: y0,
        w: x1 - x0,
        h: y1 - y0,
    }
}

/// Squarified row building: keep adding items to the current row while the
/// worst aspect ratio does not worsen, then commit the row along the
/// shorter side of what remains.
fn squarify(areas: &[f64], region: Region) -> Vec<Region> {
    let mut out = Vec::with_capacity(areas.len());
    let mut x = region.x;
    let mut y = region.y;
    let mut w = region.w;
    let mut h = region.h;

    let mut idx = 0;
    let mut row_start = 0;
    let mut row_sum = 0.0;
    let mut row_min = f64::INFINITY;
    let mut row_max = 0.0_f64;

    while idx < areas.len() {
        if w <= 1e-9 || h <= 1e-9 {
            // Region exhausted: everything still pending, including any
            // open row, becomes zero-area at the cursor, preserving the
            // one-output-per-input ordering.
            warn!(
                pending = areas.len() - row_start,
                "region exhausted before all items were placed"
            );
            for _ in row_start..areas.len() {
                out.push(Region { x, y, w: 0.0, h: 0.0 });
            }
            row_start = areas.len();
            row_sum = 0.0;
            break;
        }

        let area = areas[idx];
        let side = w.min(h);
        let current = if row_sum > 0.0 {
            worst_ratio(row_min, row_max, row_sum, side)
        } else {
            f64::INFINITY
        };
        let next = worst_ratio(row_min.min(area), row_max.max(area), row_sum + area, side);

        if row_sum <= 0.0 || next <= current {
            row_sum += area;
            row_min = row_min.min(area);
            row_max = row_max.max(area);
            idx += 1;
            continue;
        }

        layout_row(
            &areas[row_start..idx],
            row_sum,
            &mut x,
            &mut y,
            &mut w,
            &mut h,
            &mut out,
        );
        row_start = idx;
        row_sum = 0.0;
        row_min = f64::INFINITY;
        row_max = 0.0;
    }

    if row_sum > 0.0 && row_start < idx {
        layout_row(
            &areas[row_start..idx],
            row_sum,
            &mut x,
            &mut y,
            &mut w,
            &mut h,
            &mut out,
        );
    }

    out
}

/// Commit one row along the shorter side of the remaining rectangle.
#[allow(clippy::too_many_arguments)]
fn layout_row(
    row: &[f64],
    row_sum: f64,
    x: &mut f64,
    y: &mut f64,
    w: &mut f64,
    h: &mut f64,
    out: &mut Vec<Region>,
) {
    if row.is_empty() || row_sum <= 0.0 {
        return;
    }

    // Paper's width(): the shortest side of the remaining rectangle.
    // If width is shortest, the row is a horizontal strip; otherwise
    // vertical.
    let horizontal = *w <= *h;
    let short = if horizontal { *w } else { *h };
    let thickness = row_sum / short;

    let mut offset = 0.0;
    for (i, &area) in row.iter().enumerate() {
        let mut length = area / thickness;
        // Absorb floating-point error into the final rect in the strip.
        if i == row.len() - 1 {
            length = (short - offset).max(0.0);
        }
        let rect = if horizontal {
            Region {
                x: *x + offset,
                y: *y,
                w: length,
                h: thickness,
            }
        } else {
            Region {
                x: *x,
                y: *y + offset,
                w: thickness,
                h: length,
            }
        };
        out.push(rect);
        offset += length;
    }

    if horizontal {
        *y += thickness;
        *h = (*h - thickness).max(0.0);
    } else {
        *x += thickness;
        *w = (*w - thickness).max(0.0);
    }
}

/// Worst aspect ratio of a row with the given area statistics committed
/// against a side of the given length.
fn worst_ratio(min_area: f64, max_area: f64, sum: f64, side: f64) -> f64 {
    if sum <= 0.0 || side <= 0.0 || min_area <= 0.0 || max_area <= 0.0 {
        return f64::MAX;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    ((side_sq * max_area) / sum_sq).max(sum_sq / (side_sq * min_area))
}

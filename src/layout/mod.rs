pub(crate) mod types;
pub use types::*;

use log::debug;

use crate::config::LayoutConfig;
use crate::diagram::{LineSegment, Orientation, PlatDiagram};
use crate::error::CollaboratorError;
use crate::theme::Theme;

/// Abstract plat coordinates to pixels. Every value is truncated toward zero.
#[derive(Debug, Clone, Copy)]
struct PixelGrid {
    increment: i64,
    pad: i64,
}

impl PixelGrid {
    fn new(config: &LayoutConfig) -> Self {
        Self {
            increment: config.increment,
            pad: config.pad,
        }
    }

    fn scaled(&self, value: f64) -> i64 {
        (self.increment as f64 * value) as i64
    }

    /// Left edge of the plat; the first `increment` is margin for handle dots.
    fn origin_x(&self) -> i64 {
        self.increment + self.pad
    }

    fn x(&self, x: f64) -> i64 {
        self.origin_x() + self.scaled(x)
    }

    fn y(&self, y: f64) -> i64 {
        self.pad + self.scaled(y)
    }

    fn point(&self, (x, y): (f64, f64)) -> [i64; 2] {
        [self.x(x), self.y(y)]
    }
}

pub fn compute_geometry(
    diagram: &PlatDiagram,
    theme: &Theme,
    config: &LayoutConfig,
) -> Result<RenderGeometry, CollaboratorError> {
    let grid = PixelGrid::new(config);
    let increment = config.increment;
    let pad = config.pad;
    let n_strands = diagram.n_strands;
    let n_segments = diagram.max_x_right;

    let knots = diagram
        .knots
        .iter()
        .enumerate()
        .map(|(label, knot)| {
            let mut attributes = knot.attributes.clone();
            // Drawn values replace whatever the library reported.
            attributes.remove("label");
            attributes.remove("rgb");
            KnotView {
                label,
                rgb: theme.knot_color(label),
                attributes,
            }
        })
        .collect::<Vec<_>>();

    let lines = diagram
        .line_segments
        .iter()
        .map(|segment| layout_line(segment, &grid, theme))
        .collect::<Result<Vec<_>, _>>()?;

    let half = increment as f64 / 2.0;
    let x_labels = (0..n_segments)
        .map(|col| ColumnLabel {
            label: col,
            x: ((increment + increment * col as i64) as f64 + half) as i64,
        })
        .collect();
    let y_labels = (0..n_strands.saturating_sub(1))
        .map(|row| RowLabel {
            label: row,
            y: ((pad + increment * row as i64) as f64 + half) as i64,
        })
        .collect();

    let handle_dots = layout_handle_dots(&diagram.num_strands_per_handle, &grid, n_segments);

    let height = increment * n_strands as i64 + pad;
    let width = increment * n_segments as i64 + pad + increment + config.handle_margin;

    debug!(
        width,
        height,
        lines = lines.len(),
        handle_dots = handle_dots.len();
        "Computed plat geometry"
    );

    Ok(RenderGeometry {
        knot_labels: (0..knots.len()).collect(),
        knots,
        link_is_connected: diagram.link_is_connected,
        linking_matrix: diagram.linking_matrix.clone(),
        pad,
        increment,
        height,
        width,
        lines,
        x_labels,
        y_labels,
        handle_dots,
    })
}

fn layout_line(
    segment: &LineSegment,
    grid: &PixelGrid,
    theme: &Theme,
) -> Result<LineLayout, CollaboratorError> {
    let label = if segment.has_chord_label() {
        let orientation = Orientation::from_token(&segment.orientation).ok_or_else(|| {
            CollaboratorError::UnsupportedOrientation(segment.orientation.clone())
        })?;
        let marker = match orientation {
            Orientation::Left => theme.left_marker.clone(),
            Orientation::Right => theme.right_marker.clone(),
        };
        let (x0, y0) = segment.start;
        let (x1, y1) = segment.end;
        Some(ChordMarker {
            x: grid.origin_x() + (grid.increment as f64 * (x0 + x1) / 2.0) as i64,
            y: grid.pad + (grid.increment as f64 * (y0 + y1) / 2.0) as i64,
            marker,
        })
    } else {
        None
    };

    Ok(LineLayout {
        start_xy: grid.point(segment.start),
        end_xy: grid.point(segment.end),
        rgb: theme.knot_color(segment.knot_label),
        label,
        one_handle: segment.one_handle,
        handle_index: segment.handle_index,
    })
}

/// Paired dots on both sides of the plat for every strand entering a handle.
/// Handles occupy consecutive strands from the top, in the order given.
fn layout_handle_dots(
    strands_per_handle: &[usize],
    grid: &PixelGrid,
    n_segments: usize,
) -> Vec<HandleDot> {
    let left_x = grid.origin_x();
    let right_x = grid.origin_x() + grid.increment * n_segments as i64;
    let mut dots = Vec::with_capacity(2 * strands_per_handle.iter().sum::<usize>());
    let mut cursor = 0usize;
    for (idx, &n) in strands_per_handle.iter().enumerate() {
        for j in 0..n {
            let y = grid.pad + grid.increment * (cursor + j) as i64;
            for (x, side) in [(left_x, HandleSide::Left), (right_x, HandleSide::Right)] {
                dots.push(HandleDot {
                    x,
                    y,
                    handle_index: idx + 1,
                    side,
                });
            }
        }
        cursor += n;
    }
    dots
}

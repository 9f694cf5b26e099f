use std::collections::BTreeMap;

use serde::Serialize;

use crate::theme::Rgb;

/// A knot as drawn: its display label, colour and the library's own fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnotView {
    pub label: usize,
    pub rgb: Rgb,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordMarker {
    pub x: i64,
    pub y: i64,
    pub marker: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineLayout {
    pub start_xy: [i64; 2],
    pub end_xy: [i64; 2],
    pub rgb: Rgb,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<ChordMarker>,
    pub one_handle: bool,
    pub handle_index: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandleDot {
    pub x: i64,
    pub y: i64,
    /// 1-based.
    pub handle_index: usize,
    pub side: HandleSide,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnLabel {
    pub label: usize,
    pub x: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowLabel {
    pub label: usize,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderGeometry {
    pub knots: Vec<KnotView>,
    pub knot_labels: Vec<usize>,
    pub link_is_connected: bool,
    pub linking_matrix: Vec<Vec<i64>>,
    pub pad: i64,
    pub increment: i64,
    pub height: i64,
    pub width: i64,
    pub lines: Vec<LineLayout>,
    pub x_labels: Vec<ColumnLabel>,
    pub y_labels: Vec<RowLabel>,
    pub handle_dots: Vec<HandleDot>,
}

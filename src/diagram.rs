//! Data exchanged with the external diagram/algebra library.
//!
//! The library owns the topology: it resolves crossings, counts disks and
//! enumerates augmentations. This crate only reads what it produces, so
//! everything here is plain data plus the [`LinkLibrary`] seam.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CollaboratorError;

/// Fully resolved constructor arguments for a plat diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub n_strands: usize,
    pub front_crossings: Vec<i64>,
    pub n_copy: usize,
    pub mirror: bool,
    pub orientation_flips: Option<Vec<bool>>,
    pub lazy_disks: bool,
    pub lazy_lch: bool,
    pub lazy_rsft: bool,
    /// Passed through untouched; its meaning belongs to the library.
    pub aug_fill_na: Option<i64>,
    pub spec_poly: bool,
    pub num_one_handle: usize,
    pub num_strands_per_handle: Vec<usize>,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            n_strands: 2,
            front_crossings: Vec::new(),
            n_copy: 1,
            mirror: false,
            orientation_flips: None,
            lazy_disks: false,
            lazy_lch: true,
            lazy_rsft: true,
            aug_fill_na: None,
            spec_poly: false,
            num_one_handle: 0,
            num_strands_per_handle: Vec::new(),
        }
    }
}

/// Options for computing LCH after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LchOptions {
    pub lazy_augs: bool,
    pub lazy_bilin: bool,
    pub coeff_mod: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Left,
    Right,
}

impl Orientation {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "l" | "left" => Some(Self::Left),
            "r" | "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// A knot record as reported by the library. Its fields are opaque here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Knot {
    #[serde(flatten)]
    pub attributes: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub knot_label: usize,
    /// Raw orientation token, validated during layout.
    pub orientation: String,
    #[serde(default)]
    pub chord_label: Option<String>,
    #[serde(default)]
    pub one_handle: bool,
    #[serde(default)]
    pub handle_index: Option<usize>,
}

impl LineSegment {
    pub fn has_chord_label(&self) -> bool {
        self.chord_label
            .as_deref()
            .map(|label| !label.is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chord {
    pub label: String,
    pub bottom_knot: usize,
    pub top_knot: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dga {
    pub grading_mod: u32,
    pub coeff_mod: u32,
    pub symbols: Vec<String>,
    pub gradings: BTreeMap<String, i64>,
    pub differentials: BTreeMap<String, String>,
    /// `None` when augmentations were not computed.
    pub augmentations: Option<Vec<BTreeMap<String, i64>>>,
    pub lin_poly_list: serde_json::Value,
    pub bilin_poly_list: serde_json::Value,
    pub bilin_polys: serde_json::Value,
    pub bilin_polys_dual: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatDiagram {
    pub n_strands: usize,
    pub max_x_right: usize,
    pub front_crossings: Vec<i64>,
    pub knots: Vec<Knot>,
    pub line_segments: Vec<LineSegment>,
    #[serde(default)]
    pub chords: Vec<Chord>,
    #[serde(default)]
    pub linking_matrix: Vec<Vec<i64>>,
    #[serde(default = "connected_by_default")]
    pub link_is_connected: bool,
    #[serde(default)]
    pub num_strands_per_handle: Vec<usize>,
    #[serde(default)]
    pub lch: Option<Dga>,
    #[serde(default)]
    pub rsft: Option<Dga>,
}

fn connected_by_default() -> bool {
    true
}

/// The external diagram/algebra library.
///
/// Implementations may block for a long time while enumerating invariants;
/// callers get no cancellation.
pub trait LinkLibrary {
    fn build(&self, config: &DiagramConfig) -> Result<PlatDiagram, CollaboratorError>;

    /// Compute LCH on an already constructed diagram.
    fn set_lch(
        &self,
        diagram: &mut PlatDiagram,
        config: &DiagramConfig,
        options: LchOptions,
    ) -> Result<(), CollaboratorError>;
}

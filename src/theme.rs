use serde::{Deserialize, Serialize};

/// An RGB triple, serialized as `[r, g, b]` for the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

const CLASSIC_KNOT_COLORS: [Rgb; 6] = [
    Rgb(255, 0, 0),
    Rgb(128, 0, 128),
    Rgb(0, 0, 255),
    Rgb(0, 128, 128),
    Rgb(0, 255, 0),
    Rgb(128, 128, 0),
];

const MUTED_KNOT_COLORS: [Rgb; 6] = [
    Rgb(214, 39, 40),
    Rgb(148, 103, 189),
    Rgb(31, 119, 180),
    Rgb(23, 190, 207),
    Rgb(44, 160, 44),
    Rgb(188, 189, 34),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub knot_colors: [Rgb; 6],
    pub left_marker: String,
    pub right_marker: String,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            knot_colors: CLASSIC_KNOT_COLORS,
            left_marker: "\u{23EA}".to_string(),
            right_marker: "\u{23E9}".to_string(),
        }
    }

    pub fn muted() -> Self {
        Self {
            knot_colors: MUTED_KNOT_COLORS,
            ..Self::classic()
        }
    }

    /// Colour for a knot label; the palette cycles.
    pub fn knot_color(&self, label: usize) -> Rgb {
        self.knot_colors[label % self.knot_colors.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

//! The top-level render context handed to the template renderer.

use log::debug;
use serde::Serialize;

use crate::algebra::{DgaContext, dga_context};
use crate::config::Config;
use crate::diagram::PlatDiagram;
use crate::error::CollaboratorError;
use crate::layout::{RenderGeometry, compute_geometry};

pub const LCH_NAME: &str = "LCH";
pub const RSFT_NAME: &str = "RSFT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordContext {
    pub string: String,
    pub from_knot: usize,
    pub to_knot: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderContext {
    pub front_crossings: String,
    pub svg_context: RenderGeometry,
    pub chords: Vec<ChordContext>,
    pub dgas: Vec<DgaContext>,
}

pub fn render_context(
    diagram: &PlatDiagram,
    config: &Config,
    skip_augs: bool,
) -> Result<RenderContext, CollaboratorError> {
    let front_crossings = diagram
        .front_crossings
        .iter()
        .map(|crossing| crossing.to_string())
        .collect::<Vec<_>>()
        .join(",");

    let chords = diagram
        .chords
        .iter()
        .map(|chord| ChordContext {
            string: chord.label.clone(),
            from_knot: chord.bottom_knot,
            to_knot: chord.top_knot,
        })
        .collect();

    let mut dgas = Vec::new();
    for (dga, name) in [(&diagram.lch, LCH_NAME), (&diagram.rsft, RSFT_NAME)] {
        if let Some(dga) = dga {
            dgas.push(dga_context(dga, name, skip_augs)?);
        }
    }

    let svg_context = compute_geometry(diagram, &config.theme, &config.layout)?;
    debug!(dgas = dgas.len(), skip_augs; "Assembled render context");

    Ok(RenderContext {
        front_crossings,
        svg_context,
        chords,
        dgas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{Chord, Dga, Knot};

    fn two_component_link() -> PlatDiagram {
        PlatDiagram {
            n_strands: 4,
            max_x_right: 4,
            front_crossings: vec![1, 1],
            knots: vec![Knot::default(), Knot::default()],
            line_segments: Vec::new(),
            chords: vec![Chord {
                label: "a_0".to_string(),
                bottom_knot: 1,
                top_knot: 0,
            }],
            linking_matrix: vec![vec![0, 1], vec![1, 0]],
            link_is_connected: false,
            num_strands_per_handle: Vec::new(),
            lch: None,
            rsft: None,
        }
    }

    fn tiny_dga(coeff_mod: u32) -> Dga {
        Dga {
            coeff_mod,
            symbols: vec!["x".to_string()],
            gradings: [("x".to_string(), 0)].into_iter().collect(),
            differentials: [("x".to_string(), "0".to_string())].into_iter().collect(),
            ..Dga::default()
        }
    }

    #[test]
    fn composes_crossings_chords_and_geometry() {
        let context = render_context(&two_component_link(), &Config::default(), false).unwrap();
        assert_eq!(context.front_crossings, "1,1");
        assert_eq!(
            context.chords,
            vec![ChordContext {
                string: "a_0".to_string(),
                from_knot: 1,
                to_knot: 0
            }]
        );
        assert_eq!(context.svg_context.height, 210);
        assert!(!context.svg_context.link_is_connected);
        assert!(context.dgas.is_empty());
    }

    #[test]
    fn empty_crossing_list_is_an_empty_string() {
        let mut plat = two_component_link();
        plat.front_crossings.clear();
        let context = render_context(&plat, &Config::default(), false).unwrap();
        assert_eq!(context.front_crossings, "");
    }

    #[test]
    fn lch_precedes_rsft() {
        let mut plat = two_component_link();
        plat.rsft = Some(tiny_dga(2));
        plat.lch = Some(tiny_dga(0));
        let context = render_context(&plat, &Config::default(), false).unwrap();
        let names: Vec<&str> = context.dgas.iter().map(|dga| dga.name.as_str()).collect();
        assert_eq!(names, vec![LCH_NAME, RSFT_NAME]);
    }

    #[test]
    fn only_present_invariants_are_listed() {
        let mut plat = two_component_link();
        plat.rsft = Some(tiny_dga(2));
        let context = render_context(&plat, &Config::default(), true).unwrap();
        assert_eq!(context.dgas.len(), 1);
        assert_eq!(context.dgas[0].name, RSFT_NAME);
        assert!(context.dgas[0].augmentations.is_none());
    }
}

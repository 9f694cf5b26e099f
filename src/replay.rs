//! A [`LinkLibrary`] that replays diagrams precomputed by the real library.
//!
//! The dump is the library's full output for one link, with both invariants
//! computed, plus the construction flags that produced it. Replaying honours
//! the laziness flags of the request, and refuses any request that describes
//! a different link than the one dumped.

use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::diagram::{DiagramConfig, LchOptions, LinkLibrary, PlatDiagram};
use crate::error::CollaboratorError;

/// On-disk form of a replayed diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramDump {
    #[serde(flatten)]
    pub diagram: PlatDiagram,
    #[serde(default)]
    pub mirror: bool,
    #[serde(default)]
    pub orientation_flips: Option<Vec<bool>>,
}

#[derive(Debug, Clone)]
pub struct ReplayLibrary {
    dump: DiagramDump,
}

impl ReplayLibrary {
    pub fn new(dump: DiagramDump) -> Self {
        Self { dump }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json).map(Self::new)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let library = Self::from_json(&contents)?;
        info!(path:? = path, n_strands = library.dump.diagram.n_strands; "Loaded diagram dump");
        Ok(library)
    }

    pub fn dump(&self) -> &PlatDiagram {
        &self.dump.diagram
    }

    fn check_matches(&self, config: &DiagramConfig) -> Result<(), CollaboratorError> {
        let dumped = &self.dump.diagram;
        // An n-copy has n_copy strands for every strand of the original front.
        let expected = config.n_strands.checked_mul(config.n_copy).ok_or_else(|| {
            CollaboratorError::Construction(format!(
                "{} copies of {} strands is out of range",
                config.n_copy, config.n_strands
            ))
        })?;
        if expected != dumped.n_strands {
            return Err(mismatch("strands", dumped.n_strands, expected));
        }
        if config.num_strands_per_handle != dumped.num_strands_per_handle {
            return Err(mismatch(
                "handles",
                &dumped.num_strands_per_handle,
                &config.num_strands_per_handle,
            ));
        }
        // The dump lists the crossings of the copied front, so only a
        // single copy can be compared word for word.
        if config.n_copy == 1 && config.front_crossings != dumped.front_crossings {
            return Err(mismatch(
                "crossings",
                &dumped.front_crossings,
                &config.front_crossings,
            ));
        }
        if config.mirror != self.dump.mirror {
            return Err(mismatch("mirror", self.dump.mirror, config.mirror));
        }
        if config.orientation_flips != self.dump.orientation_flips {
            return Err(mismatch(
                "orientation_flips",
                &self.dump.orientation_flips,
                &config.orientation_flips,
            ));
        }
        Ok(())
    }
}

fn mismatch(what: &str, dumped: impl std::fmt::Debug, requested: impl std::fmt::Debug) -> CollaboratorError {
    CollaboratorError::Construction(format!(
        "dump has {what} {dumped:?}, configuration asks for {requested:?}"
    ))
}

impl LinkLibrary for ReplayLibrary {
    fn build(&self, config: &DiagramConfig) -> Result<PlatDiagram, CollaboratorError> {
        self.check_matches(config)?;

        let mut diagram = self.dump.diagram.clone();
        if config.lazy_lch {
            diagram.lch = None;
        }
        if config.lazy_rsft {
            diagram.rsft = None;
        }
        debug!(
            lch = diagram.lch.is_some(),
            rsft = diagram.rsft.is_some();
            "Replayed diagram"
        );
        Ok(diagram)
    }

    fn set_lch(
        &self,
        diagram: &mut PlatDiagram,
        _config: &DiagramConfig,
        options: LchOptions,
    ) -> Result<(), CollaboratorError> {
        let mut lch = self
            .dump
            .diagram
            .lch
            .clone()
            .ok_or_else(|| CollaboratorError::Construction("dump has no LCH".to_string()))?;
        lch.coeff_mod = options.coeff_mod;
        if options.lazy_augs {
            lch.augmentations = None;
        }
        if options.lazy_bilin {
            lch.bilin_poly_list = serde_json::Value::Null;
            lch.bilin_polys = serde_json::Value::Null;
            lch.bilin_polys_dual = serde_json::Value::Null;
        }
        diagram.lch = Some(lch);
        Ok(())
    }
}

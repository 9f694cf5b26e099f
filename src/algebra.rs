//! Flattening of DGA invariants into template records.

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::diagram::Dga;
use crate::error::CollaboratorError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorRecord {
    pub symbol: String,
    pub name: String,
    pub grading: i64,
    #[serde(rename = "del")]
    pub differential: String,
}

/// Augmentation and bilinearization data. Absent in signs-only mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AugmentationContext {
    pub lin_poly_list: serde_json::Value,
    pub bilin_poly_list: serde_json::Value,
    pub n_augs: usize,
    pub has_augs: bool,
    pub deg_0_gens: Vec<GeneratorRecord>,
    /// Per augmentation: degree-0 generator name to coefficient.
    pub augs: Vec<BTreeMap<String, i64>>,
    pub bilin_polys: serde_json::Value,
    pub bilin_polys_dual: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DgaContext {
    pub name: String,
    pub grading_mod: u32,
    pub coeff_mod: u32,
    pub generators: Vec<GeneratorRecord>,
    pub skip_augs: bool,
    #[serde(flatten)]
    pub augmentations: Option<AugmentationContext>,
}

pub fn dga_context(dga: &Dga, name: &str, skip_augs: bool) -> Result<DgaContext, CollaboratorError> {
    let mut generators = dga
        .symbols
        .iter()
        .map(|symbol| generator_record(dga, name, symbol))
        .collect::<Result<Vec<_>, _>>()?;
    generators.sort_by(|a, b| a.name.cmp(&b.name));

    let augmentations = if skip_augs {
        None
    } else {
        Some(augmentation_context(dga, name, &generators)?)
    };

    debug!(
        dga = name,
        generators = generators.len(),
        n_augs = augmentations.as_ref().map(|augs| augs.n_augs).unwrap_or(0);
        "Built DGA context"
    );

    Ok(DgaContext {
        name: name.to_string(),
        grading_mod: dga.grading_mod,
        coeff_mod: dga.coeff_mod,
        generators,
        skip_augs,
        augmentations,
    })
}

fn generator_record(dga: &Dga, name: &str, symbol: &str) -> Result<GeneratorRecord, CollaboratorError> {
    let grading = *dga
        .gradings
        .get(symbol)
        .ok_or_else(|| CollaboratorError::MissingGrading {
            dga: name.to_string(),
            symbol: symbol.to_string(),
        })?;
    let differential = dga
        .differentials
        .get(symbol)
        .cloned()
        .ok_or_else(|| CollaboratorError::MissingDifferential {
            dga: name.to_string(),
            symbol: symbol.to_string(),
        })?;
    Ok(GeneratorRecord {
        symbol: symbol.to_string(),
        name: symbol.to_string(),
        grading,
        differential,
    })
}

fn augmentation_context(
    dga: &Dga,
    name: &str,
    generators: &[GeneratorRecord],
) -> Result<AugmentationContext, CollaboratorError> {
    let (deg_0_gens, augs) = match &dga.augmentations {
        Some(augmentations) => {
            let deg_0_gens: Vec<GeneratorRecord> = generators
                .iter()
                .filter(|generator| generator.grading == 0)
                .cloned()
                .collect();
            let augs = augmentations
                .iter()
                .enumerate()
                .map(|(index, aug)| {
                    deg_0_gens
                        .iter()
                        .map(|generator| {
                            aug.get(&generator.symbol)
                                .map(|&value| (generator.name.clone(), value))
                                .ok_or_else(|| CollaboratorError::MissingAugmentationValue {
                                    dga: name.to_string(),
                                    index,
                                    symbol: generator.symbol.clone(),
                                })
                        })
                        .collect::<Result<BTreeMap<_, _>, _>>()
                })
                .collect::<Result<Vec<_>, _>>()?;
            (deg_0_gens, augs)
        }
        None => (Vec::new(), Vec::new()),
    };

    Ok(AugmentationContext {
        lin_poly_list: dga.lin_poly_list.clone(),
        bilin_poly_list: dga.bilin_poly_list.clone(),
        n_augs: augs.len(),
        has_augs: !augs.is_empty(),
        deg_0_gens,
        augs,
        bilin_polys: dga.bilin_polys.clone(),
        bilin_polys_dual: dga.bilin_polys_dual.clone(),
    })
}

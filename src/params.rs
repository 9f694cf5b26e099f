//! Request parameters to a validated [`DiagramConfig`].
//!
//! Parameters arrive as a flat string map. Resolution is a single
//! parse-and-validate step: either every value is well formed and the plat
//! closes up, or the request fails with a typed error before the diagram
//! library is ever called.

use std::collections::BTreeMap;
use std::str::FromStr;

use log::{info, trace};
use serde::Serialize;

use crate::diagram::{DiagramConfig, LchOptions};
use crate::error::{ConfigurationError, Error, ParseError};
use crate::presets::PresetTable;

/// Flat request parameters. The first occurrence of a key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a URL query string such as `n_strands=4&crossings=0%2C1`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// How the resolved diagram is to be computed and presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Standard,
    /// Signed LCH differentials only, over integer coefficients and without
    /// augmentations.
    LchSigns,
}

impl RenderMode {
    pub fn skip_augs(self) -> bool {
        matches!(self, Self::LchSigns)
    }

    /// LCH computation to run once the diagram exists, if any.
    pub fn lch_options(self) -> Option<LchOptions> {
        match self {
            Self::Standard => None,
            Self::LchSigns => Some(LchOptions {
                lazy_augs: true,
                lazy_bilin: true,
                coeff_mod: 0,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRequest {
    pub config: DiagramConfig,
    pub mode: RenderMode,
    /// Key of the preset used when the request named no diagram.
    pub preset: Option<String>,
}

/// Resolve a request, falling back to `default_preset` when no diagram is
/// described (no parameters, or no `n_strands`).
pub fn resolve(
    params: Option<&QueryParams>,
    presets: &PresetTable,
    default_preset: &str,
) -> Result<ResolvedRequest, Error> {
    let Some(params) = params.filter(|params| params.get("n_strands").is_some()) else {
        info!(preset = default_preset; "No diagram requested, using default preset");
        let config = presets.resolve(default_preset)?;
        validate(&config)?;
        trace!(config:?; "Preset configuration");
        return Ok(ResolvedRequest {
            config,
            mode: RenderMode::Standard,
            preset: Some(default_preset.to_string()),
        });
    };

    let resolved = resolve_params(params)?;
    info!(
        n_strands = resolved.config.n_strands,
        crossings = resolved.config.front_crossings.len(),
        mode:? = resolved.mode;
        "Resolved diagram request"
    );
    trace!(config:? = resolved.config; "Resolved configuration");
    Ok(resolved)
}

fn resolve_params(params: &QueryParams) -> Result<ResolvedRequest, Error> {
    let n_strands: i64 = parse_int("n_strands", params.get("n_strands").unwrap_or_default())?;
    let front_crossings = optional_list(params, "crossings")?;
    let num_one_handle: i64 = optional_int(params, "num_one_handle")?.unwrap_or(0);
    let handles = optional_list(params, "num_strands_per_handle")?;

    check_plat_closure(n_strands, num_one_handle, &handles)?;

    let mirror = params.get("mirror").is_some_and(parse_flag);
    let orientation_flips = params
        .get("orientation_flips")
        .map(|raw| raw.split(',').map(parse_flag).collect());
    let n_copy: i64 = optional_int(params, "n_copy")?.unwrap_or(1);
    if n_copy < 1 {
        return Err(ConfigurationError::NoCopies.into());
    }

    let mode = if params.get("lch_signs").is_some_and(parse_flag) {
        RenderMode::LchSigns
    } else {
        RenderMode::Standard
    };
    let laziness = match mode {
        RenderMode::LchSigns => Laziness::signs_only(),
        RenderMode::Standard => Laziness::from_params(params)?,
    };

    // Range checks above make these conversions lossless.
    let config = DiagramConfig {
        n_strands: n_strands as usize,
        front_crossings,
        n_copy: n_copy as usize,
        mirror,
        orientation_flips,
        lazy_disks: laziness.lazy_disks,
        lazy_lch: laziness.lazy_lch,
        lazy_rsft: laziness.lazy_rsft,
        aug_fill_na: laziness.aug_fill_na,
        spec_poly: laziness.spec_poly,
        num_one_handle: num_one_handle as usize,
        num_strands_per_handle: handles.iter().map(|&n| n as usize).collect(),
    };

    Ok(ResolvedRequest {
        config,
        mode,
        preset: None,
    })
}

/// Which invariants the library computes eagerly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Laziness {
    lazy_disks: bool,
    lazy_lch: bool,
    lazy_rsft: bool,
    aug_fill_na: Option<i64>,
    spec_poly: bool,
}

impl Laziness {
    fn signs_only() -> Self {
        Self {
            lazy_disks: false,
            lazy_lch: true,
            lazy_rsft: true,
            aug_fill_na: None,
            spec_poly: false,
        }
    }

    fn from_params(params: &QueryParams) -> Result<Self, ParseError> {
        let auto_dgas: Vec<String> = params
            .get("auto_dgas")
            .map(|raw| {
                raw.to_lowercase()
                    .split(',')
                    .map(|name| name.trim().to_string())
                    .collect()
            })
            .unwrap_or_default();
        let eager = |name: &str| auto_dgas.iter().any(|dga| dga == name);

        Ok(Self {
            lazy_disks: params.get("lazy_disks").is_some_and(parse_flag),
            lazy_lch: !eager("lch"),
            lazy_rsft: !eager("rsft"),
            aug_fill_na: optional_int(params, "aug_fill_na")?,
            spec_poly: params.get("spec_poly").is_some_and(parse_flag),
        })
    }
}

/// Check that a configuration describes a plat that can be closed up.
pub fn validate(config: &DiagramConfig) -> Result<(), ConfigurationError> {
    let handles: Vec<i64> = config
        .num_strands_per_handle
        .iter()
        .map(|&n| saturating_i64(n))
        .collect();
    check_plat_closure(
        saturating_i64(config.n_strands),
        saturating_i64(config.num_one_handle),
        &handles,
    )?;
    if config.n_copy < 1 {
        return Err(ConfigurationError::NoCopies);
    }
    Ok(())
}

fn check_plat_closure(
    n_strands: i64,
    num_one_handle: i64,
    handles: &[i64],
) -> Result<(), ConfigurationError> {
    if num_one_handle != handles.len() as i64 {
        return Err(ConfigurationError::HandleCountMismatch {
            expected: num_one_handle,
            actual: handles.len(),
        });
    }
    // Exact for any number of i64 entries a request can carry.
    let sum: i128 = handles.iter().map(|&n| i128::from(n)).sum();
    if sum > i128::from(n_strands) {
        return Err(ConfigurationError::HandleStrandsExceedTotal {
            sum: i64::try_from(sum).unwrap_or(i64::MAX),
            n_strands,
        });
    }
    if let Some(&bad) = handles.iter().find(|&&n| n <= 0) {
        return Err(ConfigurationError::NonPositiveHandle(bad));
    }
    // Every entry is positive and the total is at most n_strands.
    let sum = sum as i64;
    let remainder = n_strands - sum;
    if remainder % 2 != 0 {
        return Err(ConfigurationError::OddRemainder(remainder));
    }
    if n_strands < 1 {
        return Err(ConfigurationError::NoStrands);
    }
    Ok(())
}

fn saturating_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn parse_flag(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

fn parse_int<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ParseError> {
    raw.trim().parse().map_err(|_| ParseError::NotAnInteger {
        key,
        value: raw.to_string(),
    })
}

fn optional_int<T: FromStr>(params: &QueryParams, key: &'static str) -> Result<Option<T>, ParseError> {
    params.get(key).map(|raw| parse_int(key, raw)).transpose()
}

/// Comma separated integers; an empty value is an empty list.
fn optional_list(params: &QueryParams, key: &'static str) -> Result<Vec<i64>, ParseError> {
    match params.get(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.split(',').map(|item| parse_int(key, item)).collect()
        }
        _ => Ok(Vec::new()),
    }
}

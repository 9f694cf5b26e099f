//! Render contexts for Legendrian link plat diagrams.
//!
//! A request's parameters are resolved into a [`DiagramConfig`], handed to a
//! [`LinkLibrary`] that computes the diagram and its DGA invariants, and the
//! result is laid out and flattened into a [`RenderContext`] ready for a
//! template.

pub mod algebra;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod context;
pub mod diagram;
pub mod dump;
pub mod error;
pub mod layout;
pub mod params;
pub mod presets;
pub mod replay;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use context::{RenderContext, render_context};
pub use diagram::{DiagramConfig, Dga, LchOptions, LinkLibrary, PlatDiagram};
pub use error::{CollaboratorError, ConfigurationError, Error, ParseError};
pub use layout::{RenderGeometry, compute_geometry};
pub use params::{QueryParams, RenderMode, ResolvedRequest};
pub use presets::PresetTable;
pub use replay::{DiagramDump, ReplayLibrary};
pub use theme::Theme;

use log::info;

/// Runs the request pipeline against one diagram library.
///
/// Holds no per-request state, so a single viewer can serve concurrent
/// requests.
///
/// # Examples
///
/// ```rust,no_run
/// use plat_viewer::{Config, PlatViewer, PresetTable, QueryParams, ReplayLibrary};
///
/// let library = ReplayLibrary::load("trefoil.json".as_ref()).unwrap();
/// let viewer = PlatViewer::new(Config::default(), PresetTable::bundled().unwrap(), library);
/// let params = QueryParams::parse("n_strands=4&crossings=1,1,1&auto_dgas=lch");
/// let context = viewer.render(Some(&params)).unwrap();
/// println!("{}", serde_json::to_string_pretty(&context).unwrap());
/// ```
pub struct PlatViewer<L> {
    config: Config,
    presets: PresetTable,
    library: L,
}

impl<L: LinkLibrary> PlatViewer<L> {
    pub fn new(config: Config, presets: PresetTable, library: L) -> Self {
        Self {
            config,
            presets,
            library,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn presets(&self) -> &PresetTable {
        &self.presets
    }

    pub fn library(&self) -> &L {
        &self.library
    }

    /// Parse and validate request parameters without building anything.
    pub fn resolve(&self, params: Option<&QueryParams>) -> Result<ResolvedRequest, Error> {
        params::resolve(params, &self.presets, &self.config.default_preset)
    }

    pub fn render(&self, params: Option<&QueryParams>) -> Result<RenderContext, Error> {
        let request = self.resolve(params)?;
        self.render_resolved(&request)
    }

    pub fn render_resolved(&self, request: &ResolvedRequest) -> Result<RenderContext, Error> {
        info!(mode:? = request.mode; "Building plat diagram");
        let mut diagram = self.library.build(&request.config)?;

        if let Some(options) = request.mode.lch_options() {
            info!(coeff_mod = options.coeff_mod; "Computing signed LCH");
            self.library
                .set_lch(&mut diagram, &request.config, options)?;
        }

        let context = render_context(&diagram, &self.config, request.mode.skip_augs())?;
        info!(
            width = context.svg_context.width,
            height = context.svg_context.height,
            dgas = context.dgas.len();
            "Render context ready"
        );
        Ok(context)
    }
}

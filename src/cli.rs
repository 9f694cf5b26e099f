use crate::config::load_config;
use crate::dump::write_json;
use crate::params::QueryParams;
use crate::presets::PresetTable;
use crate::replay::ReplayLibrary;
use crate::PlatViewer;
use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "plat-viewer",
    version,
    about = "Render contexts for Legendrian plat diagrams"
)]
pub struct Args {
    /// Request parameters as a URL query string, e.g. "n_strands=4&crossings=1,1,1"
    #[arg(short = 'q', long = "query")]
    pub query: Option<String>,

    /// Show a bundled preset instead of the configured default
    #[arg(short = 'p', long = "preset", conflicts_with = "query")]
    pub preset: Option<String>,

    /// Precomputed diagram dump (JSON) produced by the link library
    #[arg(short = 'd', long = "diagram")]
    pub diagram: Option<PathBuf>,

    /// Config JSON file (layout, palette, default preset)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Output file. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Print the resolved diagram configuration and stop
    #[arg(long = "resolve-only")]
    pub resolve_only: bool,

    /// List bundled presets and exit
    #[arg(long = "list-presets")]
    pub list_presets: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

pub fn run(args: &Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    let presets = PresetTable::bundled()?;

    if args.list_presets {
        for key in presets.keys() {
            println!("{key}\t{}", presets.comment(key).unwrap_or_default());
        }
        return Ok(());
    }

    if let Some(preset) = &args.preset {
        config.default_preset = preset.clone();
    }
    let params = args.query.as_deref().map(QueryParams::parse);
    debug!(params:?; "Request parameters");

    if args.resolve_only {
        let resolved = crate::params::resolve(params.as_ref(), &presets, &config.default_preset)?;
        return write_json(&resolved, args.output.as_deref());
    }

    let diagram = args.diagram.as_deref().ok_or_else(|| {
        anyhow::anyhow!("A diagram dump (--diagram) is required to build a render context")
    })?;
    let library = ReplayLibrary::load(diagram)?;
    let viewer = PlatViewer::new(config, presets, library);
    let context = viewer.render(params.as_ref())?;
    write_json(&context, args.output.as_deref())?;

    info!(output:? = args.output; "Render context written");
    Ok(())
}

use crate::presets::DEFAULT_PRESET_KEY;
use crate::theme::{Rgb, Theme};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Pixels per abstract unit, both axes.
    pub increment: i64,
    pub pad: i64,
    /// Extra width reserved for the right-hand handle dots.
    pub handle_margin: i64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            increment: 50,
            pad: 10,
            handle_margin: 20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    /// Preset shown when a request carries no parameters.
    pub default_preset: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
            default_preset: DEFAULT_PRESET_KEY.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    increment: Option<i64>,
    pad: Option<i64>,
    handle_margin: Option<i64>,
    knot_colors: Option<[Rgb; 6]>,
    left_marker: Option<String>,
    right_marker: Option<String>,
    default_preset: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    apply_config_file(Config::default(), parsed)
}

fn apply_config_file(mut config: Config, parsed: ConfigFile) -> anyhow::Result<Config> {
    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = match theme_name {
            "classic" | "default" => Theme::classic(),
            "muted" => Theme::muted(),
            other => return Err(anyhow::anyhow!("Unknown theme '{}'", other)),
        };
    }

    if let Some(v) = parsed.increment {
        if v <= 0 {
            return Err(anyhow::anyhow!("increment must be positive, got {}", v));
        }
        config.layout.increment = v;
    }
    if let Some(v) = parsed.pad {
        config.layout.pad = v;
    }
    if let Some(v) = parsed.handle_margin {
        config.layout.handle_margin = v;
    }
    if let Some(v) = parsed.knot_colors {
        config.theme.knot_colors = v;
    }
    if let Some(v) = parsed.left_marker {
        config.theme.left_marker = v;
    }
    if let Some(v) = parsed.right_marker {
        config.theme.right_marker = v;
    }
    if let Some(v) = parsed.default_preset {
        config.default_preset = v;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> anyhow::Result<Config> {
        let parsed: ConfigFile = serde_json::from_str(json)?;
        apply_config_file(Config::default(), parsed)
    }

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.layout.increment, 50);
        assert_eq!(config.layout.pad, 10);
        assert_eq!(config.layout.handle_margin, 20);
        assert_eq!(config.default_preset, DEFAULT_PRESET_KEY);
    }

    #[test]
    fn overrides_layout_and_theme() {
        let config = parse(
            r#"{"theme": "muted", "increment": 40, "pad": 4, "leftMarker": "<", "defaultPreset": "trefoil"}"#,
        )
        .unwrap();
        assert_eq!(config.layout.increment, 40);
        assert_eq!(config.layout.pad, 4);
        assert_eq!(config.theme.knot_colors, Theme::muted().knot_colors);
        assert_eq!(config.theme.left_marker, "<");
        assert_eq!(config.theme.right_marker, Theme::classic().right_marker);
        assert_eq!(config.default_preset, "trefoil");
    }

    #[test]
    fn rejects_unknown_theme_and_bad_increment() {
        assert!(parse(r#"{"theme": "neon"}"#).is_err());
        assert!(parse(r#"{"increment": 0}"#).is_err());
    }

    #[test]
    fn reads_config_from_disk() {
        let path = std::env::temp_dir().join(format!("plat-viewer-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"handleMargin": 30}"#).unwrap();
        let config = load_config(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.layout.handle_margin, 30);
    }
}

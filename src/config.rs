use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::{BeadviewError, Result};
use crate::tui::widgets::issue_row::Tier;
use crate::tui::ViewMode;

/// RGB color values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation towards `other`, `t` clamped to [0, 1]
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }
}

/// Theme color palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    /// Body text
    pub text: Rgb,
    /// Secondary text: IDs, ages, hints
    pub muted: Rgb,
    /// Emphasis: headers, selected titles
    pub primary: Rgb,
    /// Selected row background
    pub highlight: Rgb,
    /// Section headers and feature issues
    pub accent: Rgb,
    pub open: Rgb,
    pub in_progress: Rgb,
    pub blocked: Rgb,
    pub closed: Rgb,
    /// Impact gradient stops
    pub heat_low: Rgb,
    pub heat_mid: Rgb,
    pub heat_high: Rgb,
}

impl Default for ThemeColors {
    fn default() -> Self {
        // Default theme - readable on most terminals
        Self {
            text: Rgb::new(220, 220, 230),
            muted: Rgb::new(140, 140, 140),
            primary: Rgb::new(147, 197, 253),
            highlight: Rgb::new(50, 50, 70),
            accent: Rgb::new(216, 180, 254),
            open: Rgb::new(147, 197, 253),
            in_progress: Rgb::new(253, 224, 71),
            blocked: Rgb::new(252, 129, 129),
            closed: Rgb::new(134, 239, 172),
            heat_low: Rgb::new(74, 222, 128),
            heat_mid: Rgb::new(250, 204, 21),
            heat_high: Rgb::new(239, 68, 68),
        }
    }
}

impl ThemeColors {
    /// Catppuccin Mocha theme
    pub fn catppuccin_mocha() -> Self {
        Self {
            text: Rgb::new(205, 214, 244),        // Text
            muted: Rgb::new(166, 173, 200),       // Subtext0
            primary: Rgb::new(137, 180, 250),     // Blue
            highlight: Rgb::new(69, 71, 90),      // Surface1
            accent: Rgb::new(203, 166, 247),      // Mauve
            open: Rgb::new(137, 180, 250),        // Blue
            in_progress: Rgb::new(249, 226, 175), // Yellow
            blocked: Rgb::new(243, 139, 168),     // Red
            closed: Rgb::new(166, 227, 161),      // Green
            heat_low: Rgb::new(166, 227, 161),    // Green
            heat_mid: Rgb::new(250, 179, 135),    // Peach
            heat_high: Rgb::new(243, 139, 168),   // Red
        }
    }

    /// Catppuccin Latte theme (light theme)
    pub fn catppuccin_latte() -> Self {
        Self {
            text: Rgb::new(76, 79, 105),         // Text
            muted: Rgb::new(108, 111, 133),      // Subtext0
            primary: Rgb::new(30, 102, 245),     // Blue
            highlight: Rgb::new(204, 208, 218),  // Surface0
            accent: Rgb::new(136, 57, 239),      // Mauve
            open: Rgb::new(30, 102, 245),        // Blue
            in_progress: Rgb::new(223, 142, 29), // Yellow
            blocked: Rgb::new(210, 15, 57),      // Red
            closed: Rgb::new(64, 160, 43),       // Green
            heat_low: Rgb::new(64, 160, 43),     // Green
            heat_mid: Rgb::new(254, 100, 11),    // Peach
            heat_high: Rgb::new(210, 15, 57),    // Red
        }
    }

    /// High contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            text: Rgb::new(255, 255, 255),
            muted: Rgb::new(200, 200, 200),
            primary: Rgb::new(0, 255, 255),
            highlight: Rgb::new(0, 0, 160),
            accent: Rgb::new(255, 0, 255),
            open: Rgb::new(0, 255, 255),
            in_progress: Rgb::new(255, 255, 0),
            blocked: Rgb::new(255, 0, 0),
            closed: Rgb::new(0, 255, 0),
            heat_low: Rgb::new(0, 255, 0),
            heat_mid: Rgb::new(255, 255, 0),
            heat_high: Rgb::new(255, 0, 0),
        }
    }

    /// Get theme by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace(['-', '_', ' '], "") {
            s if s == "default" => Some(Self::default()),
            s if s == "catppuccinmocha" => Some(Self::catppuccin_mocha()),
            s if s == "catppuccinlatte" => Some(Self::catppuccin_latte()),
            s if s == "highcontrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }
}

/// Theme configuration - either a preset name or custom colors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeConfig {
    /// Preset theme name
    Preset(String),
    /// Custom color configuration
    Custom(ThemeColors),
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig::Preset("default".to_string())
    }
}

impl ThemeConfig {
    /// Resolve to actual theme colors
    pub fn resolve(&self) -> ThemeColors {
        match self {
            ThemeConfig::Preset(name) => ThemeColors::from_name(name).unwrap_or_default(),
            ThemeConfig::Custom(colors) => colors.clone(),
        }
    }
}

/// Configuration settings for beadview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Plain ASCII glyphs for terminals without emoji fonts
    #[serde(default)]
    pub ascii_icons: bool,

    #[serde(default)]
    pub default_view: ViewMode,

    /// Pin the list tier instead of deriving it from the terminal width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeConfig::default(),
            ascii_icons: false,
            default_view: ViewMode::default(),
            tier: None,
            log_file: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Get the config file path (~/.beadview.json)
    fn config_file_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".beadview.json"))
            .ok_or_else(|| BeadviewError::Config("could not find home directory".to_string()))
    }

    /// Ensure the config file exists, creating it with defaults if not
    fn ensure_config_file() -> Result<PathBuf> {
        let config_path = Self::config_file_path()?;
        if !config_path.exists() {
            let default_config = Config::default();
            let data = serde_json::to_string_pretty(&default_config)?;
            fs::write(&config_path, data)?;
        }
        Ok(config_path)
    }

    /// Expand a leading ~ to the home directory
    pub fn expand_home(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix('~') {
            if let Some(home) = dirs::home_dir() {
                let rest = rest.trim_start_matches('/');
                return if rest.is_empty() {
                    home
                } else {
                    home.join(rest)
                };
            }
        }
        PathBuf::from(path)
    }

    /// Load configuration from file, merging with defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::ensure_config_file()?;
        let content = fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults with a warning on failure.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Warning: failed to load config: {err}, using defaults");
                Self::default()
            }
        }
    }

    /// Resolved log file path, if logging to a file is configured
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.as_deref().map(Self::expand_home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_serde_round_trip() {
        for (variant, expected_json) in [
            (ViewMode::List, "\"list\""),
            (ViewMode::Graph, "\"graph\""),
        ] {
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(json, expected_json);
            let deserialized: ViewMode = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, variant);
        }
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.default_view, ViewMode::List);
        assert!(!config.ascii_icons);
        assert!(config.tier.is_none());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.theme.resolve(), ThemeColors::default());
    }

    #[test]
    fn test_preset_names_are_normalised() {
        assert_eq!(
            ThemeColors::from_name("Catppuccin Mocha"),
            Some(ThemeColors::catppuccin_mocha())
        );
        assert_eq!(
            ThemeColors::from_name("high_contrast"),
            Some(ThemeColors::high_contrast())
        );
        assert!(ThemeColors::from_name("solarized").is_none());
    }

    #[test]
    fn test_unknown_preset_falls_back_to_default() {
        let config: Config = serde_json::from_str(r#"{"theme": "neon"}"#).unwrap();
        assert_eq!(config.theme.resolve(), ThemeColors::default());
    }

    #[test]
    fn test_tier_can_be_pinned() {
        let config: Config = serde_json::from_str(r#"{"tier": "wide"}"#).unwrap();
        assert_eq!(config.tier, Some(Tier::Wide));
    }

    #[test]
    fn test_rgb_lerp_hits_endpoints_and_midpoint() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(100, 50, 25));
        assert_eq!(a.lerp(b, 7.0), b);
    }
}

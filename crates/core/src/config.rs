//! Application settings
//!
//! Optional TOML settings file (`quorum.toml` in the platform config
//! directory). Every field has a default, so an absent file or an empty
//! document both yield a usable configuration.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::TriangleCorners;
use crate::session::Page;

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub triangle: TriangleConfig,
}

/// Navigation defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Whether the sidebar starts open
    #[serde(default = "default_sidebar_open")]
    pub sidebar_open: bool,
    /// Page shown after entering a room
    #[serde(default)]
    pub default_page: Page,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            sidebar_open: default_sidebar_open(),
            default_page: Page::default(),
        }
    }
}

fn default_sidebar_open() -> bool {
    true
}

/// Corner labels for the triangle board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleConfig {
    #[serde(default = "default_top_label")]
    pub top: String,
    #[serde(default = "default_bottom_left_label")]
    pub bottom_left: String,
    #[serde(default = "default_bottom_right_label")]
    pub bottom_right: String,
}

impl Default for TriangleConfig {
    fn default() -> Self {
        Self {
            top: default_top_label(),
            bottom_left: default_bottom_left_label(),
            bottom_right: default_bottom_right_label(),
        }
    }
}

fn default_top_label() -> String {
    TriangleCorners::DEFAULT_LABELS[0].to_string()
}

fn default_bottom_left_label() -> String {
    TriangleCorners::DEFAULT_LABELS[1].to_string()
}

fn default_bottom_right_label() -> String {
    TriangleCorners::DEFAULT_LABELS[2].to_string()
}

impl TriangleConfig {
    /// Build a fresh board with the configured labels
    pub fn corners(&self) -> TriangleCorners {
        TriangleCorners::new(
            self.top.clone(),
            self.bottom_left.clone(),
            self.bottom_right.clone(),
        )
    }
}

impl AppConfig {
    /// Parse settings from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a path; an absent file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Default settings file location
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "quorum", "quorum").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;

        Ok(dirs.config_dir().join("quorum.toml"))
    }

    /// Load settings from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.ui.sidebar_open);
        assert_eq!(config.ui.default_page, Page::Poker);
        assert_eq!(config.triangle.top, "Fast");
    }

    #[test]
    fn test_partial_toml_overrides_named_fields_only() {
        let toml = r#"
[ui]
default_page = "triangle"

[triangle]
bottom_right = "Scope"
"#;
        let config = AppConfig::from_toml(toml).unwrap();
        assert_eq!(config.ui.default_page, Page::Triangle);
        assert!(config.ui.sidebar_open);
        assert_eq!(config.triangle.top, "Fast");
        assert_eq!(config.triangle.bottom_right, "Scope");
    }

    #[test]
    fn test_full_toml() {
        let toml = r#"
[ui]
sidebar_open = false
default_page = "poker"

[triangle]
top = "Speed"
bottom_left = "Polish"
bottom_right = "Budget"
"#;
        let config = AppConfig::from_toml(toml).unwrap();
        assert!(!config.ui.sidebar_open);

        let corners = config.triangle.corners();
        assert_eq!(corners.top.label, "Speed");
        assert_eq!(corners.bottom_left.label, "Polish");
        assert_eq!(corners.bottom_right.label, "Budget");
        assert_eq!(corners.selected_count(), 0);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let result = AppConfig::from_toml("[ui\nsidebar_open = maybe");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_missing_file_yields_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/quorum.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}

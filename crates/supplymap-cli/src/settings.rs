use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use supplymap_core::ViewKind;
use supplymap_graph::{ViewProfile, ZoomBounds};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_view: ViewKind,
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub zoom_step: f64,
    pub node_dim_opacity: f64,
    pub edge_dim_opacity: f64,
    /// Let zoom move products-map bubbles the way it moves partners.
    pub products_zoom_coordinates: bool,
    /// Print scenes as JSON unless `--json` says otherwise.
    pub json_output: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let zoom = ZoomBounds::default();
        let profile = ViewProfile::partnership();
        Self {
            default_view: ViewKind::default(),
            zoom_min: zoom.min,
            zoom_max: zoom.max,
            zoom_step: zoom.step,
            node_dim_opacity: profile.node_dim_opacity,
            edge_dim_opacity: profile.edge_dim_opacity,
            products_zoom_coordinates: false,
            json_output: false,
        }
    }
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("supplymap").join("settings.json"))
    }

    /// Load from the user config dir. Missing or unreadable files fall back
    /// to defaults.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::info!("No config directory, using default settings");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        tracing::info!("Loading settings from {:?}", path);
        if !path.exists() {
            tracing::info!("Settings file not found, using defaults");
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    tracing::debug!("Settings loaded: {:?}", settings);
                    settings
                }
                Err(e) => {
                    tracing::error!("Failed to parse settings: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::error!("Failed to read settings file: {}", e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
    }

    /// Zoom bounds, or the defaults when the configured range is unusable.
    pub fn zoom_bounds(&self) -> ZoomBounds {
        let usable = self.zoom_min > 0.0 && self.zoom_min <= self.zoom_max && self.zoom_step > 0.0;
        if !usable {
            tracing::warn!(
                "Ignoring zoom range {}..{} step {}",
                self.zoom_min,
                self.zoom_max,
                self.zoom_step
            );
            return ZoomBounds::default();
        }
        ZoomBounds {
            min: self.zoom_min,
            max: self.zoom_max,
            step: self.zoom_step,
        }
    }

    pub fn profile(&self, view: ViewKind) -> ViewProfile {
        let mut profile = ViewProfile::for_view(view);
        profile.node_dim_opacity = self.node_dim_opacity.clamp(0.0, 1.0);
        profile.edge_dim_opacity = self.edge_dim_opacity.clamp(0.0, 1.0);
        if view == ViewKind::Products {
            profile.zoom_coordinates = self.products_zoom_coordinates;
        }
        profile
    }
}

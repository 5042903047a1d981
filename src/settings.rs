//! Model parameters chosen before a run starts
//!
//! Mirrors the sliders and checkboxes of the browser page. Persisted in
//! LocalStorage on the web and loaded from a JSON file natively.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Why a set of parameters was rejected by [`Settings::validate`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("orbit radius {0} is outside the slider range")]
    RadiusOutOfRange(f64),
    #[error("period of {0} ticks is outside the slider range")]
    PeriodOutOfRange(u32),
    #[error("padding {padding} must be positive and smaller than the space size {space_size}")]
    InvalidPadding { padding: f64, space_size: f64 },
    #[error("orbit of radius {radius} does not fit inside the drawable area")]
    OrbitDoesNotFit { radius: f64 },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
}

/// Construction-time model parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Side length of the square space (units)
    pub space_size: f64,
    /// Margin holding the projection baselines (units)
    pub padding: f64,
    /// Orbit radius (units)
    pub circle_radius: f64,
    /// Ticks per full revolution
    pub period: u32,

    // === Overlays ===
    /// Draw the velocity arrow
    pub velocity_vector: bool,
    /// Project the point onto the x axis (and chart the x coordinate)
    pub projection_x: bool,
    /// Project the point onto the y axis (and chart the y coordinate)
    pub projection_y: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            space_size: SPACE_SIZE,
            padding: PADDING,
            circle_radius: MAX_RADIUS,
            period: MIN_PERIOD,

            // Overlays are opt-in
            velocity_vector: false,
            projection_x: false,
            projection_y: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> String {
        // Plain struct of numbers and bools, serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Angular velocity in radians per tick
    pub fn omega(&self) -> f64 {
        std::f64::consts::TAU / self.period as f64
    }

    /// Center of the orbit, offset so the baselines fit in the padding
    pub fn orbit_center(&self) -> glam::DVec2 {
        glam::DVec2::new(
            (self.space_size - self.padding) / 2.0,
            (self.space_size + self.padding) / 2.0,
        )
    }

    /// True if any per-axis projection overlay is on
    pub fn any_projection(&self) -> bool {
        self.projection_x || self.projection_y
    }

    /// Check the parameters against the slider ranges and the space geometry
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(MIN_RADIUS..=MAX_RADIUS).contains(&self.circle_radius) {
            return Err(SettingsError::RadiusOutOfRange(self.circle_radius));
        }
        if !(MIN_PERIOD..=MAX_PERIOD).contains(&self.period) {
            return Err(SettingsError::PeriodOutOfRange(self.period));
        }
        if !(self.padding > 0.0 && self.padding < self.space_size) {
            return Err(SettingsError::InvalidPadding {
                padding: self.padding,
                space_size: self.space_size,
            });
        }
        // The orbit lives in the (space - padding) square left of and above the baselines
        if 2.0 * self.circle_radius > self.space_size - self.padding {
            return Err(SettingsError::OrbitDoesNotFit {
                radius: self.circle_radius,
            });
        }
        Ok(())
    }

    /// Snap radius and period into the slider ranges (radius to the slider step)
    pub fn clamp_to_ui(&mut self) {
        let steps = (self.circle_radius / RADIUS_STEP).round();
        self.circle_radius = (steps * RADIUS_STEP).clamp(MIN_RADIUS, MAX_RADIUS);
        self.period = self.period.clamp(MIN_PERIOD, MAX_PERIOD);
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "circular_motion_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.to_json());
            log::info!("Settings saved");
        }
    }

    /// Load settings from a JSON file, or defaults when no path is given
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: Option<&std::path::Path>) -> Result<Self, SettingsError> {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Ok(Self::default());
        };
        let file = std::fs::File::open(path)?;
        let settings: Settings = serde_json::from_reader(std::io::BufReader::new(file))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!(!settings.any_projection());
        assert!((settings.omega() - std::f64::consts::TAU / 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_orbit_center() {
        let center = Settings::default().orbit_center();
        assert!((center.x - 1.25).abs() < 1e-12);
        assert!((center.y - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"period": 400, "projection_x": true}"#).unwrap();
        assert_eq!(settings.period, 400);
        assert!(settings.projection_x);
        assert!(!settings.projection_y);
        assert_eq!(settings.circle_radius, MAX_RADIUS);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            velocity_vector: true,
            projection_y: true,
            ..Default::default()
        };
        assert_eq!(Settings::from_json(&settings.to_json()).unwrap(), settings);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Settings::from_json("{\"period\": -3}"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let settings = Settings {
            circle_radius: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::RadiusOutOfRange(_))
        ));

        let settings = Settings {
            period: 4,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::PeriodOutOfRange(4))
        ));

        let settings = Settings {
            padding: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidPadding { .. })
        ));

        let settings = Settings {
            space_size: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::OrbitDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_clamp_to_ui() {
        let mut settings = Settings {
            circle_radius: 0.456,
            period: 5000,
            ..Default::default()
        };
        settings.clamp_to_ui();
        assert!((settings.circle_radius - 0.46).abs() < 1e-9);
        assert_eq!(settings.period, MAX_PERIOD);

        settings.circle_radius = 0.01;
        settings.period = 1;
        settings.clamp_to_ui();
        assert_eq!(settings.circle_radius, MIN_RADIUS);
        assert_eq!(settings.period, MIN_PERIOD);
    }
}

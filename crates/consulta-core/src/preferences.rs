//! User preferences persistence for consulta
//!
//! Stores UI preferences (color scheme, modal policy) in
//! `<config_dir>/preferences.json`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Color scheme (dark / light)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Dark,
    Light,
}

/// Whether the two modal overlays may be open at the same time
///
/// `Independent` keeps the two visibility flags unrelated (a modal opens
/// over the other). `Exclusive` closes the other modal when one is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalPolicy {
    #[default]
    Independent,
    Exclusive,
}

/// Consulta-specific user preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Color scheme (dark / light)
    #[serde(default)]
    pub color_scheme: ColorScheme,

    /// Modal exclusivity policy
    #[serde(default)]
    pub modal_policy: ModalPolicy,
}

impl Preferences {
    /// Load preferences from `<config_dir>/preferences.json`.
    /// Returns defaults on any I/O or parse error (graceful degradation).
    pub fn load(config_dir: &Path) -> Self {
        let path = config_dir.join("preferences.json");
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Persist preferences to `<config_dir>/preferences.json`.
    pub fn save(&self, config_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(config_dir)
            .context("Failed to create config directory for preferences")?;
        let path = config_dir.join("preferences.json");
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize preferences")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write preferences to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.color_scheme, ColorScheme::Dark);
        assert_eq!(prefs.modal_policy, ModalPolicy::Independent);
    }

    #[test]
    fn test_load_missing_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load(dir.path());
        assert_eq!(prefs.modal_policy, ModalPolicy::Independent);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences {
            color_scheme: ColorScheme::Light,
            modal_policy: ModalPolicy::Exclusive,
        };
        prefs.save(dir.path()).unwrap();

        let loaded = Preferences::load(dir.path());
        assert_eq!(loaded.color_scheme, ColorScheme::Light);
        assert_eq!(loaded.modal_policy, ModalPolicy::Exclusive);
    }

    #[test]
    fn test_corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("preferences.json"), "{not json").unwrap();
        let prefs = Preferences::load(dir.path());
        assert_eq!(prefs.modal_policy, ModalPolicy::Independent);
    }
}

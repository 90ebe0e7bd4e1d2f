//! Settings Loading Module
//!
//! Loads [`ValidationSettings`] from TOML files with profile-specific
//! overlays and environment variable overrides.

use crate::constants::loading::{
    DEFAULT_SETTINGS_PATH, ENV_PREFIX, ENV_SEPARATOR, PROFILE_DIR,
};
use crate::settings::ValidationSettings;
use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

impl ValidationSettings {
    /// Load settings from files with environment overrides
    ///
    /// An explicit `base_path` must exist. Without one, the default path is
    /// read when present and defaults apply otherwise. A `profile` overlay is
    /// looked up in `profiles/<profile>.toml` next to the base file.
    pub fn load(base_path: Option<&Path>, profile: Option<&str>) -> Result<Self> {
        let explicit = base_path.is_some();
        let base = base_path.unwrap_or(Path::new(DEFAULT_SETTINGS_PATH));

        let mut builder = Config::builder().add_source(File::from(base).required(explicit));

        if let Some(profile) = profile {
            let profile_file = profile_path(base, profile);

            if profile_file.exists() {
                info!("Loading settings profile: {:?}", profile_file);
                builder = builder.add_source(File::from(profile_file));
            } else {
                warn!("Settings profile not found: {:?}", profile_file);
            }
        }

        // Override with environment variables (TRAVERSAL__ prefix)
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to build validation settings")?;

        let settings: Self = config
            .try_deserialize()
            .context("Failed to deserialize validation settings")?;

        debug!(
            "Loaded validation settings from {:?} (stop_on_first_error: {})",
            base, settings.stop_on_first_error
        );

        Ok(settings)
    }
}

fn profile_path(base: &Path, profile: &str) -> PathBuf {
    base.parent()
        .unwrap_or(Path::new("."))
        .join(PROFILE_DIR)
        .join(format!("{}.toml", profile))
}

/// Convenience function to load settings from the default location
pub fn load_settings(profile: Option<&str>) -> Result<ValidationSettings> {
    ValidationSettings::load(None, profile)
}

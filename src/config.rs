use anyhow::{Context, Result};
use library_audio::AudioSettings;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/library.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Seed for dust placement and background rustles.
    pub world_seed: u64,
    /// Directory the `assets/` tree is resolved against.
    pub assets_dir: PathBuf,
    /// Master volume (0.0 to 1.0).
    pub master_volume: f32,
    /// Whisper volume (0.0 to 1.0).
    pub voice_volume: f32,
    /// Sound effects volume (0.0 to 1.0).
    pub sfx_volume: f32,
    /// Ambient sounds volume (0.0 to 1.0).
    pub ambient_volume: f32,
    /// Whether audio is muted.
    pub audio_muted: bool,
    pub page_turn_min_secs: f32,
    pub page_turn_max_secs: f32,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            world_seed: 0x6c69_6272,
            assets_dir: PathBuf::from("."),
            master_volume: 1.0,
            voice_volume: 1.0,
            sfx_volume: 1.0,
            ambient_volume: 0.7,
            audio_muted: false,
            page_turn_min_secs: 15.0,
            page_turn_max_secs: 30.0,
        }
    }
}

impl LibraryConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<LibraryConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    LibraryConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Library config not found at {}. Using defaults",
                        path.display()
                    );
                }
                LibraryConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn audio_settings(&self) -> AudioSettings {
        let mut settings = AudioSettings::new();
        settings.set_master(self.master_volume);
        settings.set_voice(self.voice_volume);
        settings.set_sfx(self.sfx_volume);
        settings.set_ambient(self.ambient_volume);
        settings.muted = self.audio_muted;
        settings
    }
}

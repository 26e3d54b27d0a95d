//! Audio settings and volume controls.

use crate::sounds::SoundChannel;
use serde::{Deserialize, Serialize};

/// Audio volume settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Master volume (0.0 to 1.0)
    pub master: f32,
    /// Whisper volume (0.0 to 1.0)
    pub voice: f32,
    /// Sound effects volume (0.0 to 1.0)
    pub sfx: f32,
    /// Ambient sounds volume (0.0 to 1.0)
    pub ambient: f32,
    /// Whether audio is muted
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master: 1.0,
            voice: 1.0,
            sfx: 1.0,
            ambient: 0.7,
            muted: false,
        }
    }
}

impl AudioSettings {
    /// Create new audio settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective volume for a channel (master * channel, zero when muted).
    pub fn effective_volume(&self, channel: SoundChannel) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = match channel {
            SoundChannel::Voice => self.voice,
            SoundChannel::Sfx => self.sfx,
            SoundChannel::Ambient => self.ambient,
        };
        self.master * channel
    }

    /// Toggle mute state.
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Set master volume (clamped to 0.0-1.0, non-finite values ignored).
    pub fn set_master(&mut self, volume: f32) {
        self.master = clamp_volume(self.master, volume);
    }

    /// Set whisper volume (clamped to 0.0-1.0, non-finite values ignored).
    pub fn set_voice(&mut self, volume: f32) {
        self.voice = clamp_volume(self.voice, volume);
    }

    /// Set SFX volume (clamped to 0.0-1.0, non-finite values ignored).
    pub fn set_sfx(&mut self, volume: f32) {
        self.sfx = clamp_volume(self.sfx, volume);
    }

    /// Set ambient volume (clamped to 0.0-1.0, non-finite values ignored).
    pub fn set_ambient(&mut self, volume: f32) {
        self.ambient = clamp_volume(self.ambient, volume);
    }
}

fn clamp_volume(current: f32, volume: f32) -> f32 {
    if volume.is_finite() {
        volume.clamp(0.0, 1.0)
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AudioSettings::default();
        assert_eq!(settings.master, 1.0);
        assert_eq!(settings.ambient, 0.7);
        assert!(!settings.muted);
    }

    #[test]
    fn test_effective_volumes() {
        let settings = AudioSettings {
            master: 0.5,
            voice: 0.8,
            sfx: 0.6,
            ..Default::default()
        };

        assert!((settings.effective_volume(SoundChannel::Voice) - 0.4).abs() < 0.001);
        assert!((settings.effective_volume(SoundChannel::Sfx) - 0.3).abs() < 0.001);
        assert!((settings.effective_volume(SoundChannel::Ambient) - 0.35).abs() < 0.001);
    }

    #[test]
    fn test_mute() {
        let mut settings = AudioSettings::default();
        settings.toggle_mute();
        assert_eq!(settings.effective_volume(SoundChannel::Voice), 0.0);
        assert_eq!(settings.effective_volume(SoundChannel::Ambient), 0.0);

        settings.toggle_mute();
        assert!(settings.effective_volume(SoundChannel::Sfx) > 0.0);
    }

    #[test]
    fn test_volume_clamping() {
        let mut settings = AudioSettings::default();
        settings.set_master(1.5);
        assert_eq!(settings.master, 1.0);

        settings.set_voice(-0.5);
        assert_eq!(settings.voice, 0.0);
    }

    #[test]
    fn non_finite_volumes_keep_the_previous_value() {
        let mut settings = AudioSettings::default();
        settings.set_master(f32::NAN);
        settings.set_sfx(f32::INFINITY);
        settings.set_ambient(f32::NEG_INFINITY);
        assert_eq!(settings.master, 1.0);
        assert_eq!(settings.sfx, 1.0);
        assert_eq!(settings.ambient, 0.7);
        assert!(settings.effective_volume(SoundChannel::Sfx).is_finite());
    }
}

//! Audio for the echoing library.
//!
//! Plays the ambient bed, riddle whispers and one-shot cues. Uses rodio for
//! cross-platform output when the `rodio_backend` feature is enabled.
//!
//! # Architecture
//!
//! - [`AudioManager`] - Main interface for playing cues and the ambient loop
//! - [`SoundId`] - Identifier for every cue, with its placeholder asset path
//! - [`AudioSettings`] - Volume controls for master, voice, SFX and ambient
//! - [`PageTurnScheduler`] - Occasional page rustling in the background
//!
//! # Example
//!
//! ```ignore
//! let mut audio = AudioManager::new()?;
//! audio.load_assets(Path::new("."));
//! audio.start_ambient();
//! audio.play_at(SoundId::Whisper1, Vec3::new(0.0, 1.2, 0.0));
//! ```

mod ambient;
mod manager;
mod settings;
mod sounds;

pub use ambient::PageTurnScheduler;
pub use manager::{AudioManager, PlayedCue};
pub use settings::AudioSettings;
pub use sounds::{sound_manifest, SoundChannel, SoundId, SoundSpec};

//! Audio manager for cue playback and the ambient bed.

use crate::{AudioSettings, SoundChannel, SoundId};
use anyhow::Result;
use glam::Vec3;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Cues remembered for diagnostics.
const HISTORY_LIMIT: usize = 64;

#[cfg(feature = "rodio_backend")]
mod backend {
    use super::*;
    use anyhow::Context;
    use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    /// Audio data for a loaded sound.
    pub struct SoundData {
        /// Raw audio bytes
        pub data: Vec<u8>,
    }

    /// Backend state for rodio audio.
    pub struct BackendState {
        /// Output stream (must be kept alive)
        _stream: OutputStream,
        /// Stream handle for creating sinks
        stream_handle: OutputStreamHandle,
        /// Looping ambient sink
        ambient_sink: Option<Sink>,
        /// Active one-shot cues
        active_sounds: Arc<Mutex<Vec<Sink>>>,
    }

    impl BackendState {
        pub fn new() -> Result<Self> {
            let (stream, stream_handle) =
                OutputStream::try_default().context("Failed to create audio output stream")?;

            Ok(Self {
                _stream: stream,
                stream_handle,
                ambient_sink: None,
                active_sounds: Arc::new(Mutex::new(Vec::new())),
            })
        }

        pub fn play_sound(&self, data: &SoundData, volume: f32) -> Result<()> {
            let source = rodio::Decoder::new(Cursor::new(data.data.clone()))
                .context("Failed to decode audio")?;

            let sink = Sink::try_new(&self.stream_handle).context("Failed to create audio sink")?;
            sink.set_volume(volume);
            sink.append(source);

            if let Ok(mut active) = self.active_sounds.lock() {
                active.retain(|s| !s.empty());
                active.push(sink);
            }

            Ok(())
        }

        pub fn play_loop(&mut self, data: &SoundData, volume: f32) -> Result<()> {
            self.stop_loop();
            let source = rodio::Decoder::new(Cursor::new(data.data.clone()))
                .context("Failed to decode ambient loop")?
                .repeat_infinite();
            let sink = Sink::try_new(&self.stream_handle).context("Failed to create audio sink")?;
            sink.set_volume(volume);
            sink.append(source);
            self.ambient_sink = Some(sink);
            Ok(())
        }

        pub fn stop_loop(&mut self) {
            if let Some(sink) = self.ambient_sink.take() {
                sink.stop();
            }
        }

        pub fn set_loop_volume(&self, volume: f32) {
            if let Some(sink) = &self.ambient_sink {
                sink.set_volume(volume);
            }
        }

        pub fn update(&mut self) {
            if let Ok(mut active) = self.active_sounds.lock() {
                active.retain(|s| !s.empty());
            }
        }

        pub fn active_sound_count(&self) -> usize {
            self.active_sounds.lock().map(|a| a.len()).unwrap_or(0)
        }

        pub fn stop_all(&mut self) {
            self.stop_loop();
            if let Ok(mut active) = self.active_sounds.lock() {
                for sink in active.drain(..) {
                    sink.stop();
                }
            }
        }
    }
}

#[cfg(not(feature = "rodio_backend"))]
mod backend {
    use super::*;

    /// Audio data for a loaded sound (stub).
    #[allow(dead_code)]
    pub struct SoundData {
        /// Raw audio bytes (unused in stub mode)
        pub data: Vec<u8>,
    }

    /// Backend state stub when rodio is not available.
    pub struct BackendState;

    impl BackendState {
        pub fn new() -> Result<Self> {
            debug!("Audio backend: stub (no rodio)");
            Ok(Self)
        }

        pub fn play_sound(&self, _data: &SoundData, _volume: f32) -> Result<()> {
            Ok(())
        }

        pub fn play_loop(&mut self, _data: &SoundData, _volume: f32) -> Result<()> {
            Ok(())
        }

        pub fn stop_loop(&mut self) {}

        pub fn set_loop_volume(&self, _volume: f32) {}

        pub fn update(&mut self) {}

        pub fn active_sound_count(&self) -> usize {
            0
        }

        pub fn stop_all(&mut self) {}
    }
}

use backend::{BackendState, SoundData};
use std::sync::Arc;

/// A cue the manager was asked to play, with its final volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayedCue {
    /// Cue identifier.
    pub id: SoundId,
    /// Volume after distance falloff and settings.
    pub volume: f32,
}

/// Main audio manager for the library.
///
/// Handles one-shot cues, the looping ambient bed and positional whispers.
/// Uses rodio for cross-platform audio output when the `rodio_backend` feature is enabled.
pub struct AudioManager {
    /// Backend state
    backend: Option<BackendState>,
    /// Current audio settings
    settings: AudioSettings,
    /// Loaded sound cache
    sounds: HashMap<SoundId, Arc<SoundData>>,
    /// Whether the ambient bed was started
    ambient_playing: bool,
    /// Listener position for 3D audio
    listener_pos: Vec3,
    /// Most recent cues, oldest first
    history: VecDeque<PlayedCue>,
}

impl AudioManager {
    /// Create a new audio manager.
    ///
    /// Initializes the audio output device and prepares for playback.
    /// Falls back to a stub if audio initialization fails.
    pub fn new() -> Result<Self> {
        let backend = match BackendState::new() {
            Ok(b) => {
                debug!("Audio manager initialized");
                Some(b)
            }
            Err(e) => {
                tracing::warn!("Failed to initialize audio: {}. Using stub.", e);
                None
            }
        };

        Ok(Self {
            backend,
            ..Self::stub()
        })
    }

    /// Create a stub audio manager that doesn't actually play audio.
    ///
    /// Cues are still resolved and recorded in [`AudioManager::history`].
    pub fn stub() -> Self {
        Self {
            backend: None,
            settings: AudioSettings::default(),
            sounds: HashMap::new(),
            ambient_playing: false,
            listener_pos: Vec3::new(0.0, 1.6, 0.0),
            history: VecDeque::with_capacity(HISTORY_LIMIT),
        }
    }

    /// Check if audio playback is available.
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Get the current audio settings.
    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    /// Update audio settings.
    pub fn update_settings(&mut self, settings: AudioSettings) {
        self.settings = settings;
        if let Some(backend) = &self.backend {
            backend.set_loop_volume(self.ambient_volume());
        }
    }

    /// Set the listener position for 3D audio.
    pub fn set_listener_position(&mut self, pos: Vec3) {
        self.listener_pos = pos;
    }

    /// Load a sound into memory.
    pub fn load_sound(&mut self, id: SoundId, data: Vec<u8>) {
        self.sounds.insert(id, Arc::new(SoundData { data }));
        debug!("Loaded sound: {:?}", id);
    }

    /// Load every cue from `root`, returning how many were found.
    ///
    /// Missing files are expected until the author supplies them.
    pub fn load_assets(&mut self, root: &Path) -> usize {
        let mut loaded = 0;
        for id in SoundId::ALL {
            let path = root.join(id.file_path());
            match fs::read(&path) {
                Ok(data) => {
                    self.load_sound(id, data);
                    loaded += 1;
                }
                Err(err) => debug!(sound = ?id, path = %path.display(), %err, "sound asset missing"),
            }
        }
        if loaded < SoundId::ALL.len() {
            tracing::warn!(
                loaded,
                expected = SoundId::ALL.len(),
                root = %root.display(),
                "some sound assets are missing; those cues will be silent"
            );
        }
        loaded
    }

    /// Whether `id` has audio data loaded.
    pub fn is_loaded(&self, id: SoundId) -> bool {
        self.sounds.contains_key(&id)
    }

    /// Play a cue at the listener's position (non-positional).
    pub fn play(&mut self, id: SoundId) {
        self.play_at(id, self.listener_pos);
    }

    /// Play a cue at a specific world position.
    ///
    /// Volume is attenuated based on distance from the listener.
    pub fn play_at(&mut self, id: SoundId, position: Vec3) {
        let volume = self.calculate_volume(id, position) * self.settings.effective_volume(id.channel());
        if volume < 0.01 {
            return; // Too quiet to hear
        }
        self.remember(PlayedCue { id, volume });

        if let Some(sound_data) = self.sounds.get(&id) {
            if let Some(backend) = &self.backend {
                if let Err(e) = backend.play_sound(sound_data.as_ref(), volume) {
                    tracing::warn!("Failed to play sound {:?}: {}", id, e);
                }
            }
        } else {
            debug!("Sound not loaded: {:?}", id);
        }
    }

    /// Calculate distance-based volume before settings are applied.
    fn calculate_volume(&self, id: SoundId, position: Vec3) -> f32 {
        if !id.is_positional() {
            return id.default_volume();
        }

        let distance = position.distance(self.listener_pos);
        let max_dist = id.max_distance();
        if distance >= max_dist {
            return 0.0;
        }

        // Linear falloff
        let falloff = 1.0 - (distance / max_dist);
        id.default_volume() * falloff
    }

    fn ambient_volume(&self) -> f32 {
        SoundId::AmbientLibrary.default_volume() * self.settings.effective_volume(SoundChannel::Ambient)
    }

    /// Start the looping ambient bed. Restarting replaces the current loop.
    pub fn start_ambient(&mut self) {
        let volume = self.ambient_volume();
        if let (Some(backend), Some(data)) = (
            self.backend.as_mut(),
            self.sounds.get(&SoundId::AmbientLibrary),
        ) {
            if let Err(e) = backend.play_loop(data.as_ref(), volume) {
                tracing::warn!("Failed to start ambient loop: {}", e);
            }
        }
        self.ambient_playing = true;
        self.remember(PlayedCue {
            id: SoundId::AmbientLibrary,
            volume,
        });
    }

    /// Stop the ambient bed.
    pub fn stop_ambient(&mut self) {
        if let Some(backend) = &mut self.backend {
            backend.stop_loop();
        }
        self.ambient_playing = false;
    }

    /// Whether the ambient bed is running.
    pub fn is_ambient_playing(&self) -> bool {
        self.ambient_playing
    }

    /// Update audio state (call once per frame).
    ///
    /// Cleans up finished one-shot cues.
    pub fn update(&mut self) {
        if let Some(backend) = &mut self.backend {
            backend.update();
        }
    }

    /// Get the number of currently playing sounds.
    pub fn active_sound_count(&self) -> usize {
        self.backend
            .as_ref()
            .map(|b| b.active_sound_count())
            .unwrap_or(0)
    }

    /// Recent cues, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &PlayedCue> {
        self.history.iter()
    }

    /// Stop all sounds (including the ambient bed).
    pub fn stop_all(&mut self) {
        if let Some(backend) = &mut self.backend {
            backend.stop_all();
        }
        self.ambient_playing = false;
    }

    fn remember(&mut self, cue: PlayedCue) {
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(cue);
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::stub()
    }
}

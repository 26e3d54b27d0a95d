//! Sound cue definitions and the placeholder asset manifest.

use serde::{Deserialize, Serialize};

/// Mixer channel a cue plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundChannel {
    /// Ghostly voices.
    Voice,
    /// One-shot effects.
    Sfx,
    /// Background bed and incidental noises.
    Ambient,
}

/// Identifiers for every cue in the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundId {
    /// Looping hum of the hall
    AmbientLibrary,
    /// Whisper of the first riddle
    Whisper1,
    /// Whisper of the second riddle
    Whisper2,
    /// Whisper of the third riddle
    Whisper3,
    /// Occasional page rustle
    PageTurn,
    /// A hidden volume opens
    BookOpen,
    /// Every volume has been found
    Completion,
}

impl SoundId {
    /// Every cue, in manifest order.
    pub const ALL: [SoundId; 7] = [
        SoundId::AmbientLibrary,
        SoundId::Whisper1,
        SoundId::Whisper2,
        SoundId::Whisper3,
        SoundId::PageTurn,
        SoundId::BookOpen,
        SoundId::Completion,
    ];

    /// Whisper for the riddle at `riddle_index`.
    pub fn whisper(riddle_index: usize) -> Option<SoundId> {
        match riddle_index {
            0 => Some(SoundId::Whisper1),
            1 => Some(SoundId::Whisper2),
            2 => Some(SoundId::Whisper3),
            _ => None,
        }
    }

    /// Relative path of the asset the author supplies.
    pub fn file_path(&self) -> &'static str {
        match self {
            SoundId::AmbientLibrary => "assets/sounds/ambient_library.mp3",
            SoundId::Whisper1 => "assets/sounds/whisper_riddle1.mp3",
            SoundId::Whisper2 => "assets/sounds/whisper_riddle2.mp3",
            SoundId::Whisper3 => "assets/sounds/whisper_riddle3.mp3",
            SoundId::PageTurn => "assets/sounds/page_turn.mp3",
            SoundId::BookOpen => "assets/sounds/book_open.mp3",
            SoundId::Completion => "assets/sounds/completion.mp3",
        }
    }

    /// Get the default volume for this sound (0.0 to 1.0).
    pub fn default_volume(&self) -> f32 {
        match self {
            SoundId::AmbientLibrary => 0.3,
            SoundId::Whisper1 | SoundId::Whisper2 | SoundId::Whisper3 => 0.6,
            SoundId::PageTurn => 0.4,
            SoundId::BookOpen => 0.7,
            SoundId::Completion => 0.8,
        }
    }

    /// Channel this cue is mixed on.
    pub fn channel(&self) -> SoundChannel {
        match self {
            SoundId::Whisper1 | SoundId::Whisper2 | SoundId::Whisper3 => SoundChannel::Voice,
            SoundId::BookOpen | SoundId::Completion => SoundChannel::Sfx,
            SoundId::AmbientLibrary | SoundId::PageTurn => SoundChannel::Ambient,
        }
    }

    /// Whether the cue repeats until stopped.
    pub fn loops(&self) -> bool {
        matches!(self, SoundId::AmbientLibrary)
    }

    /// Whether this sound should use 3D positional audio.
    pub fn is_positional(&self) -> bool {
        matches!(
            self,
            SoundId::Whisper1 | SoundId::Whisper2 | SoundId::Whisper3 | SoundId::BookOpen
        )
    }

    /// Get the maximum audible distance for positional sounds.
    pub fn max_distance(&self) -> f32 {
        match self {
            // Whispers carry across the whole hall
            SoundId::Whisper1 | SoundId::Whisper2 | SoundId::Whisper3 => 20.0,
            _ => 16.0,
        }
    }

    /// What the author should produce for this cue.
    pub fn spec(&self) -> SoundSpec {
        let (description, duration, style, loudness) = match self {
            SoundId::AmbientLibrary => (
                "Looping background ambient sound for gothic library",
                "2-3 minutes (seamless loop)",
                "Low humming, distant echoes, subtle wind, very quiet",
                "Very low (background level)",
            ),
            SoundId::Whisper1 => (
                "Ghostly whisper for first riddle",
                "8-12 seconds",
                "Ethereal female voice, echoing, mysterious",
                "Medium",
            ),
            SoundId::Whisper2 => (
                "Ghostly whisper for second riddle",
                "8-12 seconds",
                "Ethereal female voice, echoing, mysterious",
                "Medium",
            ),
            SoundId::Whisper3 => (
                "Ghostly whisper for third riddle",
                "8-12 seconds",
                "Ethereal female voice, echoing, mysterious",
                "Medium",
            ),
            SoundId::PageTurn => (
                "Occasional ambient page turning sound",
                "1-2 seconds",
                "Paper rustling, page turning, subtle",
                "Low",
            ),
            SoundId::BookOpen => (
                "Sound when key book is opened",
                "2-3 seconds",
                "Mystical book opening, magical chime, ethereal",
                "Medium",
            ),
            SoundId::Completion => (
                "Final completion sound when all books found",
                "4-6 seconds",
                "Triumphant mystical chime, ethereal choir, magical",
                "Medium-High",
            ),
        };
        SoundSpec {
            id: *self,
            path: self.file_path(),
            description,
            duration,
            style,
            loudness,
            format: "MP3, 44.1kHz, 128kbps",
        }
    }
}

/// Authoring notes for one placeholder audio asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoundSpec {
    /// Cue identifier.
    pub id: SoundId,
    /// Expected asset path.
    pub path: &'static str,
    /// What the sound is for.
    pub description: &'static str,
    /// Target length.
    pub duration: &'static str,
    /// Character of the sound.
    pub style: &'static str,
    /// Relative loudness.
    pub loudness: &'static str,
    /// Encoding.
    pub format: &'static str,
}

/// Specs for every asset the author must supply.
pub fn sound_manifest() -> Vec<SoundSpec> {
    SoundId::ALL.iter().map(SoundId::spec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_id_properties() {
        assert!(SoundId::Whisper2.is_positional());
        assert!(!SoundId::Completion.is_positional());
        assert!(SoundId::AmbientLibrary.loops());
        assert!(!SoundId::PageTurn.loops());
        assert_eq!(SoundId::BookOpen.channel(), SoundChannel::Sfx);
    }

    #[test]
    fn whispers_follow_riddles() {
        assert_eq!(SoundId::whisper(0), Some(SoundId::Whisper1));
        assert_eq!(SoundId::whisper(2), Some(SoundId::Whisper3));
        assert_eq!(SoundId::whisper(3), None);
    }

    #[test]
    fn manifest_lists_every_cue_once() {
        let manifest = sound_manifest();
        assert_eq!(manifest.len(), SoundId::ALL.len());
        let json = serde_json::to_string(&manifest).unwrap();
        assert!(json.contains("assets/sounds/whisper_riddle3.mp3"));
        assert!(json.contains("\"id\":\"book_open\""));
    }
}

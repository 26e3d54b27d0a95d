//! One visitor's session: the scene, its frame loop and the presentation
//! collaborators that react to scene events.

use crate::command_script::{CommandError, SessionCommand};
use crate::config::LibraryConfig;
use bevy_ecs::entity::Entity;
use bevy_ecs::schedule::Schedules;
use bevy_ecs::world::World;
use library_audio::{AudioManager, PageTurnScheduler, SoundId};
use library_core::SimTick;
use library_ecs::{build_default_schedule, run_tick};
use library_puzzle::{lore, PuzzleController, PuzzleQuery, PuzzleSignal};
use library_scene::{
    build_library, find_by_label, register_systems, PointerEvents, Puzzle, SceneEvent,
    SceneEvents,
};
use library_ui::{Overlay, OverlayView};
use tracing::{debug, info};

const SCREEN_SIZE: egui::Vec2 = egui::Vec2::new(1280.0, 720.0);

/// What happened during one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Tick the frame simulated.
    pub tick: SimTick,
    /// Scene events, in emission order.
    pub events: Vec<SceneEvent>,
    /// A background page rustle played.
    pub page_turn: bool,
    /// Panels the overlay drew.
    pub view: OverlayView,
}

pub struct LibrarySession {
    world: World,
    schedules: Schedules,
    tick: SimTick,
    audio: AudioManager,
    overlay: Overlay,
    egui: egui::Context,
    page_turns: PageTurnScheduler,
}

impl LibrarySession {
    pub fn new(config: &LibraryConfig, mut audio: AudioManager) -> Self {
        let mut world = World::default();
        build_library(&mut world, config.world_seed);
        let mut schedules = build_default_schedule();
        register_systems(&mut schedules);

        audio.update_settings(config.audio_settings());
        if audio.is_available() {
            audio.load_assets(&config.assets_dir);
        }
        audio.start_ambient();

        info!(seed = config.world_seed, "library session started");
        info!("{}", lore::INTRO_LINE);

        Self {
            world,
            schedules,
            tick: SimTick::ZERO,
            audio,
            overlay: Overlay::new(),
            egui: egui::Context::default(),
            page_turns: PageTurnScheduler::new(
                config.world_seed,
                config.page_turn_min_secs,
                config.page_turn_max_secs,
                SimTick::ZERO,
            ),
        }
    }

    /// Tick the next frame will simulate.
    pub fn tick(&self) -> SimTick {
        self.tick
    }

    pub fn puzzle(&self) -> &PuzzleController<Entity> {
        &self.world.resource::<Puzzle>().0
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Queue a primary interaction on the object labeled `label`.
    pub fn touch(&mut self, label: &str) -> Result<Entity, CommandError> {
        let entity = find_by_label(&mut self.world, label)
            .ok_or_else(|| CommandError::UnknownLabel(label.to_string()))?;
        self.touch_entity(entity);
        Ok(entity)
    }

    /// Queue a primary interaction on `entity`.
    pub fn touch_entity(&mut self, entity: Entity) {
        self.world.resource_mut::<PointerEvents>().push(entity);
    }

    pub fn close_story(&mut self) {
        self.overlay.dismiss_story();
    }

    pub fn apply(&mut self, command: &SessionCommand) -> Result<(), CommandError> {
        match command {
            SessionCommand::Touch(label) => {
                self.touch(label)?;
            }
            SessionCommand::CloseStory => self.close_story(),
            SessionCommand::Status => {
                let puzzle = self.puzzle();
                let (found, total) = puzzle.progress();
                info!(
                    tick = self.tick.0,
                    riddle = puzzle.riddle_index(),
                    found,
                    total,
                    completed = puzzle.is_completed(),
                    "status"
                );
            }
        }
        Ok(())
    }

    /// Simulate one frame, route its events and draw the overlay.
    pub fn frame(&mut self) -> FrameReport {
        let tick = self.tick;
        run_tick(&mut self.world, &mut self.schedules, tick);

        let events: Vec<SceneEvent> = self.world.resource::<SceneEvents>().iter().copied().collect();
        for event in &events {
            self.route(event);
        }

        let page_turn = self.page_turns.update(tick);
        if page_turn {
            debug!(tick = tick.0, "page rustle");
            self.audio.play(SoundId::PageTurn);
        }
        self.audio.update();

        let view = self.draw_overlay();
        self.tick = tick.advance(1);

        FrameReport {
            tick,
            events,
            page_turn,
            view,
        }
    }

    fn route(&mut self, event: &SceneEvent) {
        match *event {
            SceneEvent::WhisperRequested {
                riddle_index,
                origin,
            } => {
                self.overlay.reveal_riddle();
                if let Some(whisper) = SoundId::whisper(riddle_index) {
                    self.audio.play_at(whisper, origin);
                }
            }
            SceneEvent::Puzzle { signal, origin } => match signal {
                PuzzleSignal::BookOpened(_) => self.audio.play_at(SoundId::BookOpen, origin),
                PuzzleSignal::RiddleAdvanced(riddle) => {
                    debug!(riddle, "next riddle awaits at the central book");
                }
                PuzzleSignal::PuzzleCompleted => self.audio.play(SoundId::Completion),
            },
        }
    }

    fn draw_overlay(&mut self) -> OverlayView {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, SCREEN_SIZE)),
            time: Some(self.tick.as_secs_f32() as f64),
            ..Default::default()
        };
        let puzzle = &self.world.resource::<Puzzle>().0;
        let overlay = &mut self.overlay;
        let mut view = None;
        let _ = self.egui.run(input, |ctx| {
            view = Some(overlay.show(ctx, puzzle));
        });
        view.unwrap_or_else(|| overlay.view(puzzle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use library_audio::PlayedCue;
    use library_puzzle::RIDDLES;

    fn session() -> LibrarySession {
        let config = LibraryConfig {
            assets_dir: std::env::temp_dir().join("echoing_library_no_assets"),
            ..LibraryConfig::default()
        };
        LibrarySession::new(&config, AudioManager::stub())
    }

    fn cues(session: &LibrarySession) -> Vec<SoundId> {
        session.audio().history().map(|cue: &PlayedCue| cue.id).collect()
    }

    #[test]
    fn fresh_session_shows_instructions_and_hums() {
        let mut session = session();
        let report = session.frame();
        assert!(report.events.is_empty());
        assert!(report.view.show_instruction);
        assert_eq!(report.view.progress, "Books Found: 0/3");
        assert_eq!(cues(&session), vec![SoundId::AmbientLibrary]);
        assert_eq!(session.tick(), SimTick(1));
    }

    #[test]
    fn touching_the_central_book_reveals_and_whispers() {
        let mut session = session();
        session.touch("central_book").unwrap();
        let report = session.frame();
        assert_eq!(report.view.riddle, Some(RIDDLES[0]));
        assert!(!report.view.show_instruction);
        assert_eq!(cues(&session).last(), Some(&SoundId::Whisper1));
    }

    #[test]
    fn silent_backend_skips_asset_loading() {
        let root = std::env::temp_dir().join(format!(
            "echoing_library_assets_{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let cue = root.join(SoundId::BookOpen.file_path());
        std::fs::create_dir_all(cue.parent().unwrap()).unwrap();
        std::fs::write(&cue, b"not really audio").unwrap();

        let config = LibraryConfig {
            assets_dir: root,
            ..LibraryConfig::default()
        };
        let session = LibrarySession::new(&config, AudioManager::stub());
        assert!(!session.audio().is_loaded(SoundId::BookOpen));
    }

    #[test]
    fn unknown_labels_are_rejected() {
        let mut session = session();
        assert_eq!(
            session.touch("lectern"),
            Err(CommandError::UnknownLabel("lectern".into()))
        );
    }

    #[test]
    fn full_hunt_plays_cues_and_opens_the_story() {
        let mut session = session();
        session.apply(&SessionCommand::Touch("central_book".into())).unwrap();
        session.frame();
        for label in ["key_book_1", "key_book_0", "key_book_2"] {
            session.apply(&SessionCommand::Touch(label.into())).unwrap();
            session.frame();
        }

        assert!(session.puzzle().is_completed());
        let played = cues(&session);
        assert_eq!(played.iter().filter(|id| **id == SoundId::BookOpen).count(), 3);
        assert_eq!(played.last(), Some(&SoundId::Completion));

        let report = session.frame();
        assert!(report.view.show_story);
        assert_eq!(report.view.riddle, None);

        session.apply(&SessionCommand::CloseStory).unwrap();
        let report = session.frame();
        assert!(!report.view.show_story);
        assert_eq!(report.view.riddle, Some(RIDDLES[2]));
    }

    #[test]
    fn page_rustles_follow_the_configured_window() {
        let config = LibraryConfig {
            page_turn_min_secs: 1.0,
            page_turn_max_secs: 1.0,
            ..LibraryConfig::default()
        };
        let mut session = LibrarySession::new(&config, AudioManager::stub());
        let rustles: Vec<SimTick> = (0..61)
            .map(|_| session.frame())
            .filter(|report| report.page_turn)
            .map(|report| report.tick)
            .collect();
        assert_eq!(rustles, vec![SimTick(20), SimTick(40), SimTick(60)]);
    }
}

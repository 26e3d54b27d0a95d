use crate::command_script::CommandScriptPlayer;
use crate::config::LibraryConfig;
use crate::session::LibrarySession;
use anyhow::{Context, Result};
use library_audio::AudioManager;
use library_core::{SimTick, MILLIS_PER_TICK};
use library_puzzle::PuzzleQuery;
use library_testkit::{EventRecord, JsonReportSink, JsonlSink};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub struct HeadlessConfig {
    pub library: LibraryConfig,
    pub command_script: Option<PathBuf>,
    pub event_log: Option<PathBuf>,
    pub summary: Option<PathBuf>,
    pub no_audio: bool,
    pub max_ticks: Option<u64>,
    pub exit_when_complete: bool,
    pub exit_when_script_finished: bool,
    /// Skip real-time pacing between frames.
    pub fast: bool,
}

/// Outcome of a headless run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub ticks: u64,
    pub books_found: usize,
    pub total_books: usize,
    pub completed: bool,
    pub story_dismissed: bool,
    pub scene_events: usize,
    pub page_turns: usize,
}

pub fn run(cfg: HeadlessConfig) -> Result<SessionSummary> {
    let mut script = cfg
        .command_script
        .as_deref()
        .map(|path| {
            CommandScriptPlayer::from_path(path)
                .with_context(|| format!("failed to load command script {}", path.display()))
        })
        .transpose()?;
    let mut event_log = cfg.event_log.as_deref().map(JsonlSink::create).transpose()?;

    let audio = if cfg.no_audio {
        AudioManager::stub()
    } else {
        AudioManager::new()?
    };
    let mut session = LibrarySession::new(&cfg.library, audio);
    tracing::info!(
        audio_backend = session.audio().is_available(),
        scripted = script.is_some(),
        "headless session ready"
    );

    let frame_budget = Duration::from_millis(MILLIS_PER_TICK);
    let mut scene_events = 0;
    let mut page_turns = 0;

    loop {
        let tick = session.tick();
        if cfg.max_ticks.is_some_and(|max| tick.0 >= max) {
            break;
        }
        let started = Instant::now();

        if let Some(script) = script.as_mut() {
            for command in script.drain_ready_commands(tick) {
                if let Err(err) = session.apply(&command) {
                    tracing::warn!(tick = tick.0, ?command, %err, "command failed");
                }
            }
        }

        let report = session.frame();
        scene_events += report.events.len();
        page_turns += usize::from(report.page_turn);
        if let Some(log) = event_log.as_mut() {
            for event in &report.events {
                log.write(&EventRecord {
                    tick: report.tick,
                    kind: "scene",
                    payload: event,
                })?;
            }
        }

        if cfg.exit_when_complete && session.puzzle().is_completed() {
            tracing::info!(tick = tick.0, "puzzle complete; exiting");
            break;
        }

        if cfg.exit_when_script_finished && script.as_ref().is_some_and(|s| s.is_finished()) {
            tracing::info!(tick = tick.0, "command script finished; exiting");
            break;
        }

        if !cfg.fast {
            if let Some(rest) = frame_budget.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    if let Some(log) = event_log.as_mut() {
        log.flush()?;
    }

    let (books_found, total_books) = session.puzzle().progress();
    let summary = SessionSummary {
        ticks: session.tick().0,
        books_found,
        total_books,
        completed: session.puzzle().is_completed(),
        story_dismissed: session.overlay().state().story_dismissed,
        scene_events,
        page_turns,
    };
    tracing::info!(?summary, elapsed_secs = SimTick(summary.ticks).as_secs_f32(), "session finished");

    if let Some(path) = cfg.summary.as_deref() {
        JsonReportSink::create(path)
            .with_context(|| format!("failed to create summary {}", path.display()))?
            .write(&summary)?;
    }

    Ok(summary)
}

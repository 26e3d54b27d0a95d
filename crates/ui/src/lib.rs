#![warn(missing_docs)]
//! Screen overlay using egui (riddle panel, progress counter, story modal).

use egui::{Align2, Color32, Context, Frame, Margin, RichText, Vec2};
use library_puzzle::lore::{INSTRUCTION_TEXT, STORY_TITLE};
use library_puzzle::PuzzleQuery;

const RIDDLE_COLOR: Color32 = Color32::from_rgb(204, 153, 255);
const BODY_COLOR: Color32 = Color32::from_rgb(230, 230, 230);
const BUTTON_COLOR: Color32 = Color32::from_rgb(153, 102, 204);

/// Presentation-only flags that the puzzle itself does not track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayState {
    /// The central book has been touched at least once.
    pub riddle_revealed: bool,
    /// The visitor closed the story modal.
    pub story_dismissed: bool,
}

impl OverlayState {
    /// Show the riddle panel from now on.
    pub fn reveal_riddle(&mut self) {
        self.riddle_revealed = true;
    }

    /// Hide the story modal for the rest of the session.
    pub fn dismiss_story(&mut self) {
        self.story_dismissed = true;
    }
}

/// What the overlay shows this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    /// Riddle text, when the riddle panel is visible.
    pub riddle: Option<&'static str>,
    /// Progress counter text (always visible).
    pub progress: String,
    /// Whether the instruction banner is visible.
    pub show_instruction: bool,
    /// Whether the story modal is visible.
    pub show_story: bool,
}

impl OverlayView {
    /// Decide panel visibility from the overlay flags and the puzzle state.
    pub fn build(state: &OverlayState, query: &impl PuzzleQuery) -> Self {
        let show_story = query.is_completed() && !state.story_dismissed;
        let riddle = (state.riddle_revealed && !show_story).then(|| query.active_riddle_text());
        let (found, total) = query.progress();

        Self {
            riddle,
            progress: format!("Books Found: {found}/{total}"),
            show_instruction: riddle.is_none() && !show_story,
            show_story,
        }
    }
}

/// Overlay renderer plus its presentation state.
#[derive(Debug, Default)]
pub struct Overlay {
    state: OverlayState,
}

impl Overlay {
    /// Create an overlay with nothing revealed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current presentation flags.
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    /// Mark the riddle panel as revealed.
    pub fn reveal_riddle(&mut self) {
        self.state.reveal_riddle();
    }

    /// Close the story modal.
    pub fn dismiss_story(&mut self) {
        if !self.state.story_dismissed {
            tracing::debug!("story modal dismissed");
        }
        self.state.dismiss_story();
    }

    /// Panels that would show for `query` right now.
    pub fn view(&self, query: &impl PuzzleQuery) -> OverlayView {
        OverlayView::build(&self.state, query)
    }

    /// Render the overlay. Returns the view that was drawn.
    pub fn show(&mut self, ctx: &Context, query: &impl PuzzleQuery) -> OverlayView {
        let view = self.view(query);
        let screen = ctx.screen_rect();

        if let Some(riddle) = view.riddle {
            panel("riddle", Align2::CENTER_TOP, Vec2::new(0.0, screen.height() * 0.1), 204)
                .fixed_size(Vec2::new(screen.width() * 0.8, 200.0))
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new(riddle).size(24.0).color(RIDDLE_COLOR));
                    });
                });
        }

        panel("progress", Align2::RIGHT_TOP, Vec2::new(-20.0, 20.0), 153)
            .fixed_size(Vec2::new(300.0, 60.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(&view.progress).size(18.0).color(Color32::WHITE));
                });
            });

        if view.show_instruction {
            panel("instruction", Align2::CENTER_TOP, Vec2::new(0.0, screen.height() * 0.7), 128)
                .fixed_size(Vec2::new(screen.width() * 0.6, 100.0))
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new(INSTRUCTION_TEXT).size(20.0).color(BODY_COLOR));
                    });
                });
        }

        if view.show_story {
            let mut close = false;
            panel("story", Align2::CENTER_CENTER, Vec2::ZERO, 230)
                .fixed_size(Vec2::new(screen.width() * 0.9, screen.height() * 0.8))
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new(STORY_TITLE).size(28.0).color(RIDDLE_COLOR));
                        ui.add_space(12.0);
                        ui.label(RichText::new(query.story_text()).size(16.0).color(BODY_COLOR));
                        ui.add_space(12.0);
                        let button = egui::Button::new(
                            RichText::new("Close").size(18.0).color(Color32::WHITE),
                        )
                        .fill(BUTTON_COLOR)
                        .min_size(Vec2::new(120.0, 40.0));
                        close = ui.add(button).clicked();
                    });
                });
            if close {
                self.dismiss_story();
            }
        }

        view
    }
}

/// Borderless translucent black window anchored on screen.
fn panel(id: &str, align: Align2, offset: Vec2, alpha: u8) -> egui::Window<'static> {
    egui::Window::new(id)
        .id(egui::Id::new(("library_overlay", id)))
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .anchor(align, offset)
        .frame(
            Frame::none()
                .fill(Color32::from_black_alpha(alpha))
                .inner_margin(Margin::same(12.0)),
        )
}

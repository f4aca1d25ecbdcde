//! Application state and screen flow
//!
//! Owns the session plus everything around it: the fixed-step clock, the
//! UI overlay, the audio notifier and the loaded sprites. Each display
//! frame the driving loop hands in one sampled `InputFrame`; the app runs
//! the menu keys, advances the simulation, then forwards the session's
//! events to audio and UI.

use crate::assets::Assets;
use crate::audio::AudioNotifier;
use crate::config::GameConfig;
use crate::game::renderer::{self, View};
use crate::game::{FrameClock, GameEvent, LevelCatalog, Phase, Screen, Session};
use crate::input::{Action, ActionSet, InputFrame};
use crate::ui::{Overlay, UiSink};

pub struct App {
    pub session: Session,
    pub overlay: Overlay,
    audio: Box<dyn AudioNotifier>,
    assets: Assets,
    clock: FrameClock,
    /// Edges seen on frames that ran no step, held for the next step
    pending: ActionSet,
    /// Hitbox and physics readout overlay
    pub debug_overlay: bool,
}

impl App {
    pub fn new(
        config: &GameConfig,
        catalog: LevelCatalog,
        assets: Assets,
        audio: Box<dyn AudioNotifier>,
        seed: u64,
    ) -> Self {
        let level_count = catalog.len();
        let muted = audio.is_muted();
        Self {
            session: Session::new(catalog, config.player.clone(), config.viewport, seed),
            overlay: Overlay::new(level_count, muted),
            audio,
            assets,
            clock: FrameClock::new(config.sim_hz, config.max_steps_per_frame),
            pending: ActionSet::empty(),
            debug_overlay: config.debug_overlay,
        }
    }

    /// Run one display frame: menu keys, simulation steps, event dispatch
    pub fn frame(&mut self, input: InputFrame, frame_seconds: f64) {
        let phase_before = self.session.phase;
        self.handle_global(&input);
        self.handle_flow(&input);

        // A key that just changed the screen must not also act in-game
        let sim_input = if self.session.phase != phase_before {
            self.clock.reset();
            self.pending = ActionSet::empty();
            input.held_only()
        } else {
            input
        };
        self.pending |= sim_input.pressed;

        let steps = self.clock.advance(frame_seconds);
        for _ in 0..steps {
            let step_input = InputFrame {
                held: sim_input.held,
                pressed: std::mem::take(&mut self.pending),
            };
            self.session.step(&step_input);
        }

        self.dispatch_events();
    }

    /// Keys that work on every screen
    fn handle_global(&mut self, input: &InputFrame) {
        if input.pressed(Action::Mute) {
            let muted = !self.audio.is_muted();
            self.audio.set_muted(muted);
            self.overlay.set_muted(muted);
            log::info!("Sound {}", if muted { "muted" } else { "unmuted" });
        }
        if input.pressed(Action::ToggleDebug) {
            self.debug_overlay = !self.debug_overlay;
        }
    }

    fn handle_flow(&mut self, input: &InputFrame) {
        match self.session.phase {
            Phase::Idle => {
                if self.overlay.screen() == Screen::Instructions {
                    if input.pressed(Action::Menu) || input.pressed(Action::Confirm) {
                        self.overlay.screen_changed(Screen::Start);
                    }
                } else if input.pressed(Action::Confirm) {
                    self.session.start();
                } else if input.pressed(Action::Instructions) {
                    self.overlay.screen_changed(Screen::Instructions);
                }
            }
            Phase::Running => {
                if input.pressed(Action::Menu) {
                    self.session.stop();
                } else if input.pressed(Action::Pause) {
                    self.session.toggle_pause();
                }
            }
            Phase::Paused => {
                if input.pressed(Action::Pause) {
                    self.session.toggle_pause();
                } else if input.pressed(Action::Restart) {
                    self.session.restart();
                } else if input.pressed(Action::Menu) {
                    self.session.stop();
                }
            }
            Phase::LevelComplete { .. } => {
                if input.pressed(Action::Confirm) {
                    self.session.next_level();
                }
            }
            Phase::GameOver | Phase::GameWon => {
                if input.pressed(Action::Restart) || input.pressed(Action::Confirm) {
                    self.session.restart();
                } else if input.pressed(Action::Menu) {
                    self.session.stop();
                }
            }
        }
    }

    /// Forward queued session events to the audio and UI sinks
    fn dispatch_events(&mut self) {
        for event in self.session.events.drain() {
            match event {
                GameEvent::Sound(cue) => self.audio.play(cue),
                GameEvent::HudChanged(hud) => self.overlay.hud_changed(hud),
                GameEvent::ScreenChanged(screen) => self.overlay.screen_changed(screen),
            }
        }
    }

    /// Draw the world, the debug readout and the overlay
    pub fn draw(&self, screen_w: f32, screen_h: f32, fps: i32) {
        let world = &self.session.world;
        let view = View::fit(&world.viewport, screen_w, screen_h)
            .with_camera(world.camera.x, renderer::shake_jitter(world.shake));

        renderer::draw_world(world, &self.assets, &view);
        if self.debug_overlay {
            renderer::draw_debug(world, &view, fps);
        }
        // HUD and modals stay still during shake
        let still = View::fit(&world.viewport, screen_w, screen_h);
        self.overlay.draw(&still);
        renderer::draw_letterbox(&still, screen_w, screen_h);
    }
}

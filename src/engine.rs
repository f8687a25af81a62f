//! Core loop state.
//!
//! The [`Engine`] owns the active [`GameState`], the [`Renderer`] and the
//! [`FrameBuffer`]. Simulation runs on a fixed timestep: [`Engine::advance`]
//! banks real frame time and spends it in whole ticks, so movement speed does
//! not depend on the frame rate.

use crate::camera::CameraInput;
use crate::color::Color;
use crate::config::{Scene, Settings};
use crate::game_state::{GameState, GameStateError, LoadedLevelState, SimpleCubeState};
use crate::render::{DepthMode, FrameBuffer, Renderer};

/// Frame times above this are clamped so a stall does not trigger a burst of
/// catch-up ticks.
const MAX_FRAME_TIME: f64 = 0.25;

pub struct Engine {
    state: Box<dyn GameState>,
    renderer: Renderer,
    framebuffer: FrameBuffer,
    background: Color,
    time_step: f64,
    accumulator: f64,
}

impl Engine {
    /// Builds the scene named in `settings` with a framebuffer sized from the
    /// window settings.
    pub fn new(settings: &Settings) -> Result<Self, GameStateError> {
        let (width, height) = settings.window.framebuffer_size();
        let framebuffer = FrameBuffer::new(width, height);
        let aspect_ratio = framebuffer.aspect_ratio();

        let state: Box<dyn GameState> = match settings.game.scene {
            Scene::SimpleCube => Box::new(SimpleCubeState::new(settings, aspect_ratio)?),
            Scene::LoadedLevel => Box::new(LoadedLevelState::new(settings, aspect_ratio)?),
        };
        log::info!(
            "engine started: {:?} scene, {width}x{height} framebuffer, {} depth",
            settings.game.scene,
            settings.render.depth_mode
        );

        Ok(Self::with_state(
            state,
            Renderer::new(settings.render.options()),
            framebuffer,
            settings.render.background_color(),
            settings.game.update_frequency,
        ))
    }

    pub fn with_state(
        state: Box<dyn GameState>,
        renderer: Renderer,
        framebuffer: FrameBuffer,
        background: Color,
        update_frequency: f64,
    ) -> Self {
        Self {
            state,
            renderer,
            framebuffer,
            background,
            time_step: 1.0 / update_frequency.max(1.0),
            accumulator: 0.0,
        }
    }

    /// Adds `frame_time` seconds and runs as many fixed updates as fit.
    ///
    /// Mouse motion is applied on the first tick only; held keys apply on
    /// every tick. Returns the number of ticks run.
    pub fn advance(&mut self, frame_time: f64, input: &CameraInput) -> usize {
        self.accumulator += frame_time.clamp(0.0, MAX_FRAME_TIME);

        let mut ticks = 0;
        let mut tick_input = *input;
        while self.accumulator >= self.time_step {
            self.state.update(self.time_step, &tick_input);
            tick_input.mouse_delta = (0, 0);
            self.accumulator -= self.time_step;
            ticks += 1;
        }
        ticks
    }

    /// Clears the framebuffer and draws the current state into it.
    pub fn render(&mut self) -> &FrameBuffer {
        self.framebuffer.clear(self.background);
        self.state.render(&mut self.renderer, &mut self.framebuffer);
        &self.framebuffer
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        let (width, height) = (width.max(1), height.max(1));
        self.framebuffer.resize(width, height);
        let aspect_ratio = self.framebuffer.aspect_ratio();
        self.state.camera_mut().set_aspect_ratio(aspect_ratio);
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn state(&self) -> &dyn GameState {
        self.state.as_ref()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    // =========================================================================
    // Toggles
    // =========================================================================

    pub fn toggle_wireframe(&mut self) {
        self.state.toggle_wireframe();
    }

    pub fn toggle_grid(&mut self) {
        self.state.toggle_grid();
    }

    pub fn toggle_depth_mode(&mut self) {
        let next = match self.renderer.depth_mode() {
            DepthMode::PainterSort => DepthMode::ZBuffer,
            DepthMode::ZBuffer => DepthMode::PainterSort,
        };
        self.renderer.set_depth_mode(next);
        log::info!("depth mode: {next}");
    }

    pub fn toggle_backface_culling(&mut self) {
        let enabled = !self.renderer.options().backface_culling;
        self.renderer.set_backface_culling(enabled);
        log::info!("backface culling: {enabled}");
    }

    pub fn toggle_frustum_culling(&mut self) {
        let enabled = !self.renderer.options().frustum_culling;
        self.renderer.set_frustum_culling(enabled);
        log::info!("frustum culling: {enabled}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cube_engine() -> Engine {
        let mut settings = Settings::default();
        settings.game.scene = Scene::SimpleCube;
        settings.game.update_frequency = 10.0;
        settings.window.width = 160;
        settings.window.height = 120;
        Engine::new(&settings).unwrap()
    }

    #[test]
    fn fixed_timestep_banks_leftover_time() {
        let mut engine = cube_engine();
        let input = CameraInput::default();

        assert_eq!(engine.advance(0.05, &input), 0);
        assert_eq!(engine.advance(0.06, &input), 1);
        assert_eq!(engine.advance(0.2, &input), 2);
        // Long stalls are clamped.
        assert_eq!(engine.advance(5.0, &input), 2);
    }

    #[test]
    fn mouse_motion_applies_once_per_frame() {
        let mut engine = cube_engine();
        let yaw_before = engine.state().camera().orientation().yaw;

        let input = CameraInput {
            mouse_delta: (10, 0),
            ..CameraInput::default()
        };
        assert_eq!(engine.advance(0.2, &input), 2);

        let yaw_after = engine.state().camera().orientation().yaw;
        assert_relative_eq!(yaw_before - yaw_after, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn render_and_resize() {
        let mut engine = cube_engine();
        assert_eq!(engine.framebuffer().width(), 80);

        let black = Color::BLACK.packed();
        assert!(engine.render().pixels().iter().any(|&p| p != black));

        engine.resize(200, 100);
        assert_eq!((engine.framebuffer().width(), engine.framebuffer().height()), (200, 100));
        assert_relative_eq!(engine.state().camera().aspect_ratio(), 2.0);
        assert!(engine.render().pixels().iter().any(|&p| p != black));
    }

    #[test]
    fn toggles_reach_renderer() {
        let mut engine = cube_engine();
        engine.toggle_depth_mode();
        assert_eq!(engine.renderer().depth_mode(), DepthMode::ZBuffer);
        engine.toggle_backface_culling();
        assert!(!engine.renderer().options().backface_culling);
    }
}

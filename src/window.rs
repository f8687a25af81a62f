//! SDL2 window, input polling and framebuffer presentation.
//!
//! Only compiled with the `window` feature.

use std::collections::HashSet;

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;

use crate::camera::CameraInput;
use crate::config::WindowSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    Shift,
    F1,
    F2,
    F3,
    F4,
    F5,
}

impl Key {
    fn from_keycode(keycode: Keycode) -> Option<Self> {
        Some(match keycode {
            Keycode::W => Key::W,
            Keycode::A => Key::A,
            Keycode::S => Key::S,
            Keycode::D => Key::D,
            Keycode::Up => Key::Up,
            Keycode::Down => Key::Down,
            Keycode::Left => Key::Left,
            Keycode::Right => Key::Right,
            Keycode::LShift | Keycode::RShift => Key::Shift,
            Keycode::F1 => Key::F1,
            Keycode::F2 => Key::F2,
            Keycode::F3 => Key::F3,
            Keycode::F4 => Key::F4,
            Keycode::F5 => Key::F5,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Quit,
    Resize(u32, u32),
    KeyPressed(Key),
}

/// Held keys and accumulated mouse motion since the last frame.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    mouse_delta: (i32, i32),
}

impl InputState {
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Camera input for this frame. Resets the mouse accumulator.
    pub fn take_camera_input(&mut self) -> CameraInput {
        let mouse_delta = std::mem::take(&mut self.mouse_delta);
        CameraInput {
            mouse_delta,
            forward: self.is_held(Key::W) || self.is_held(Key::Up),
            back: self.is_held(Key::S) || self.is_held(Key::Down),
            left: self.is_held(Key::A) || self.is_held(Key::Left),
            right: self.is_held(Key::D) || self.is_held(Key::Right),
            fast: self.is_held(Key::Shift),
        }
    }
}

pub struct Window {
    // Declared before `texture_creator` so it is dropped first.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    input: InputState,
    texture_width: u32,
    texture_height: u32,
}

impl Window {
    /// Opens a window sized from `settings` with a streaming texture of
    /// `texture_width` x `texture_height` that is stretched over it.
    pub fn new(
        title: &str,
        settings: &WindowSettings,
        texture_width: u32,
        texture_height: u32,
    ) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, settings.width, settings.height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let mut canvas_builder = window.into_canvas();
        if settings.vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(|e| e.to_string())?;

        sdl_context.mouse().set_relative_mouse_mode(settings.hide_mouse);

        let texture_creator = Box::new(canvas.texture_creator());
        let texture = Self::create_texture(&texture_creator, texture_width, texture_height)?;
        let event_pump = sdl_context.event_pump()?;

        Ok(Self {
            texture,
            texture_creator,
            canvas,
            event_pump,
            timer_subsystem,
            input: InputState::default(),
            texture_width,
            texture_height,
        })
    }

    fn create_texture(
        texture_creator: &sdl2::render::TextureCreator<sdl2::video::WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<sdl2::render::Texture<'static>, String> {
        // SAFETY: the creator is boxed, so its address is stable, and it is
        // owned by the same `Window` as the texture, which drops first.
        let creator: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator as *const _) };
        // Pixels are packed 0xAABBGGRR, which is ABGR8888 as a native u32.
        creator
            .create_texture_streaming(PixelFormatEnum::ABGR8888, width, height)
            .map_err(|e| e.to_string())
    }

    /// Drains pending events into the input state and returns the ones the
    /// caller acts on.
    pub fn poll_events(&mut self) -> Vec<WindowEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => events.push(WindowEvent::Quit),
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => events.push(WindowEvent::Resize(w.max(1) as u32, h.max(1) as u32)),
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => {
                    if let Some(key) = Key::from_keycode(keycode) {
                        self.input.held.insert(key);
                        events.push(WindowEvent::KeyPressed(key));
                    }
                }
                Event::KeyUp {
                    keycode: Some(keycode),
                    ..
                } => {
                    if let Some(key) = Key::from_keycode(keycode) {
                        self.input.held.remove(&key);
                    }
                }
                Event::MouseMotion { xrel, yrel, .. } => {
                    self.input.mouse_delta.0 += xrel;
                    self.input.mouse_delta.1 += yrel;
                }
                _ => {}
            }
        }

        events
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Uploads packed pixels and stretches them over the window.
    pub fn present(&mut self, pixels: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, pixels, (self.texture_width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&self.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    /// Recreates the streaming texture for a new framebuffer size.
    pub fn resize_texture(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.texture = Self::create_texture(&self.texture_creator, width, height)?;
        self.texture_width = width;
        self.texture_height = height;
        Ok(())
    }

    pub fn texture_size(&self) -> (u32, u32) {
        (self.texture_width, self.texture_height)
    }

    /// Seconds since SDL was initialised.
    pub fn seconds(&self) -> f64 {
        self.timer_subsystem.performance_counter() as f64
            / self.timer_subsystem.performance_frequency() as f64
    }
}

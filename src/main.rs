use std::path::Path;

use mazing::config::{Scene, Settings};
use mazing::engine::Engine;
use mazing::fps_counter::FpsCounter;
use mazing::window::{Key, Window, WindowEvent};

const SETTINGS_FILE: &str = "data/settings.ron";
const FPS_LOG_INTERVAL: f64 = 2.0;

fn load_settings() -> Settings {
    let path = std::env::args().nth(1).unwrap_or_else(|| SETTINGS_FILE.to_string());
    if !Path::new(&path).exists() {
        log::info!("{path} not found, using default settings");
        return Settings::default();
    }

    match Settings::load(&path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("{e}; using default settings");
            Settings::default()
        }
    }
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut settings = load_settings();
    let mut engine = match Engine::new(&settings) {
        Ok(engine) => engine,
        Err(e) if settings.game.scene == Scene::LoadedLevel => {
            log::warn!("{e}; falling back to the cube scene");
            settings.game.scene = Scene::SimpleCube;
            Engine::new(&settings).map_err(|e| e.to_string())?
        }
        Err(e) => return Err(e.to_string()),
    };

    let (fb_width, fb_height) = settings.window.framebuffer_size();
    let mut window = Window::new("Mazing", &settings.window, fb_width as u32, fb_height as u32)?;

    let mut fps_counter = FpsCounter::new(window.seconds());
    let mut last_fps_log = window.seconds();

    'running: loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Resize(w, h) => {
                    let scaled = |n: u32| ((f64::from(n) * settings.window.framebuffer_scale) as u32).max(1);
                    let (w, h) = (scaled(w), scaled(h));
                    engine.resize(w as usize, h as usize);
                    window.resize_texture(w, h)?;
                }
                WindowEvent::KeyPressed(Key::F1) => engine.toggle_wireframe(),
                WindowEvent::KeyPressed(Key::F2) => engine.toggle_grid(),
                WindowEvent::KeyPressed(Key::F3) => engine.toggle_depth_mode(),
                WindowEvent::KeyPressed(Key::F4) => engine.toggle_backface_culling(),
                WindowEvent::KeyPressed(Key::F5) => engine.toggle_frustum_culling(),
                WindowEvent::KeyPressed(_) => {}
            }
        }

        let now = window.seconds();
        let frame_time = fps_counter.tick(now);
        let input = window.input_mut().take_camera_input();
        engine.advance(frame_time, &input);

        let framebuffer = engine.render();
        window.present(framebuffer.as_bytes())?;

        if now - last_fps_log > FPS_LOG_INTERVAL {
            log::info!(
                "fps: {} ({:.2} ms)",
                fps_counter.fps(),
                fps_counter.average_frame_time() * 1000.0
            );
            last_fps_log = now;
        }
    }

    Ok(())
}

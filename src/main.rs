// What you SEE:
// • A black window. Move the mouse and it turns white, one random pixel for
//   every pixel-length the pointer travels. A big "WHITE" fades as you go.
// • Once every pixel is white the screen fades to a summary: how many pixels,
//   and how many seconds it cost you.
// • Left click on the summary to start over. ESC quits.

mod config;
mod draw;
mod error;
mod input;
mod reveal;
mod scene;
mod stopwatch;
mod types;

use clap::Parser;
use config::Config;
use draw::Drawer;
use error::Error;
use input::PointerState;
use reveal::RevealState;
use scene::SceneController;
use std::time::{Duration, Instant};
use types::{FrameBuffer, BLACK};

fn main() -> Result<(), Error> {
    let config = Config::parse();

    env_logger::Builder::from_env(env_logger::Env::default().filter_or(
        env_logger::DEFAULT_FILTER_ENV,
        if cfg!(debug_assertions) { "debug" } else { "warn" },
    ))
    .init();

    run(&config)
}

fn run(config: &Config) -> Result<(), Error> {
    /* --- Window setup ---
       Visual: window opens, black, at the requested size. */
    let mut drawer = Drawer::new(
        "WHITE",
        config.width as usize,
        config.height as usize,
        config.fullscreen,
        config.fps as usize,
    )?;
    let (w, h) = drawer.size();
    log::info!("window {w}x{h} (fullscreen: {}), target {} fps", config.fullscreen, config.fps);

    /* --- Reusable screen buffer ---
       Visual: this is the image you actually see each frame. */
    let mut screen = FrameBuffer::filled(w, h, BLACK);

    /* --- Game state ---
       Visual: painting scene on a fresh black canvas the size of the window. */
    let mut scenes = SceneController::new(RevealState::new(), w as u32, h as u32, config.fade());
    // minifb reports (0,0) until the window has been updated once, so show a
    // frame first and let the pointer pick up its position on the first poll.
    drawer.present(&screen)?;
    let mut pointer = PointerState::default();

    /* --- FPS ---
       Visual: nothing on screen; printed to the log once per second. */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut last_frame_time = Instant::now();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();
        let dt = now - last_frame_time; // drives the scene fades
        last_frame_time = now;

        /* 1) Inputs: where the pointer went since last frame, and any click. */
        pointer.advance(drawer.mouse_pos(), drawer.left_mouse_down());

        /* 2) Follow the window size; the canvas picks it up on the next restart. */
        let (w, h) = drawer.size();
        if (w, h) != (screen.width, screen.height) {
            screen.resize(w, h, BLACK);
        }
        scenes.set_display_size(w as u32, h as u32);

        /* 3) Game logic: reveal pixels / switch scenes. */
        scenes.update(&pointer, dt);

        /* 4) Draw the current scene (and fade) into the screen buffer. */
        scenes.draw(&mut screen);

        /* 5) Present to the window (this is when the on-screen image updates). */
        drawer.present(&screen)?;

        /* 6) FPS counter */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            log::debug!("FPS: {:.1}", frames_this_second as f32 / secs);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}

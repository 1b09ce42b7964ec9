// Two-scene loop: paint the canvas white, then look at how long it took.
//
//   Painting --(every pixel revealed)--> Result --(left click)--> Painting ...
//
// Every scene change is a white crossfade in two legs of `fade` each: the old scene
// washes out to white, the new scene is entered while the screen is solid white,
// then it emerges from white. No scene is updated while a fade runs.

use crate::draw::{blit, draw_text_centered, fill, overlay};
use crate::input::PointerState;
use crate::reveal::RevealState;
use crate::types::{FrameBuffer, BLACK, RESULT_BLUE, WHITE};
use std::time::Duration;

const FADE_COLOR: u32 = WHITE;

const WATERMARK: &str = "WHITE";
const WATERMARK_SCALE: i32 = 12;
const TITLE_SCALE: i32 = 8;
const TITLE_OFFSET_Y: i32 = -60;
const TIME_SCALE: i32 = 4;
const TIME_OFFSET_Y: i32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scene {
    Painting,
    Result,
}

#[derive(Clone, Copy, Debug)]
struct Transition {
    target: Scene,
    elapsed: Duration,
    entered: bool, // fade-out finished, target scene is current
}

pub struct SceneController {
    scene: Scene,
    state: RevealState,
    transition: Option<Transition>,
    fade: Duration,
    display: (u32, u32), // canvas size used by the next reset
}

impl SceneController {
    /// Start in the painting scene on a `width`×`height` canvas.
    pub fn new(state: RevealState, width: u32, height: u32, fade: Duration) -> Self {
        let mut controller = Self {
            scene: Scene::Painting,
            state,
            transition: None,
            fade,
            display: (width, height),
        };
        controller.enter(Scene::Painting);
        controller
    }

    /// Size the canvas will take the next time painting starts.
    pub fn set_display_size(&mut self, width: u32, height: u32) {
        self.display = (width, height);
    }

    /// One frame of game logic. `dt` is the time since the previous frame.
    pub fn update(&mut self, pointer: &PointerState, dt: Duration) {
        if let Some(mut t) = self.transition.take() {
            t.elapsed += dt;
            if !t.entered && t.elapsed >= self.fade {
                self.enter(t.target);
                t.entered = true;
            }
            if t.elapsed < self.fade * 2 {
                self.transition = Some(t);
            }
            return;
        }

        match self.scene {
            Scene::Painting => {
                self.state.update(pointer);
                if self.state.is_complete() {
                    self.change_scene(Scene::Result);
                }
            }
            Scene::Result => {
                if pointer.clicked {
                    self.change_scene(Scene::Painting);
                }
            }
        }
    }

    /// Render the current scene plus any fade overlay into `fb`.
    pub fn draw(&self, fb: &mut FrameBuffer) {
        match self.scene {
            Scene::Painting => self.draw_painting(fb),
            Scene::Result => self.draw_result(fb),
        }
        overlay(fb, FADE_COLOR, self.overlay_alpha());
    }

    fn draw_painting(&self, fb: &mut FrameBuffer) {
        fill(fb, BLACK);
        blit(fb, self.state.texture());
        let (cx, cy) = self.canvas_center();
        draw_text_centered(fb, cx, cy, WATERMARK, WATERMARK_SCALE, WHITE, self.watermark_opacity());
    }

    fn draw_result(&self, fb: &mut FrameBuffer) {
        fill(fb, WHITE);
        let (cx, cy) = self.canvas_center();
        let title = format!("{} PIXELS", self.state.pixel_count());
        draw_text_centered(fb, cx, cy + TITLE_OFFSET_Y, &title, TITLE_SCALE, RESULT_BLUE, 1.0);
        let time = format!("YOU HAVE LOST {} SECONDS", self.state.elapsed_secs());
        draw_text_centered(fb, cx, cy + TIME_OFFSET_Y, &time, TIME_SCALE, RESULT_BLUE, 1.0);
    }

    fn enter(&mut self, scene: Scene) {
        log::info!("entering {scene:?}");
        self.scene = scene;
        match scene {
            Scene::Painting => {
                let (w, h) = self.display;
                self.state.reset(w, h);
            }
            Scene::Result => {}
        }
    }

    /// Begin a crossfade to `target`; ignored while another fade is running.
    fn change_scene(&mut self, target: Scene) {
        if self.transition.is_some() {
            return;
        }
        log::debug!("fading {:?} -> {target:?}, {:?} each way", self.scene, self.fade);
        self.transition = Some(Transition { target, elapsed: Duration::ZERO, entered: false });
    }

    fn canvas_center(&self) -> (i32, i32) {
        let (w, h) = self.state.size();
        (w as i32 / 2, h as i32 / 2)
    }

    /// Opacity of the white fade overlay: 0 → 1 while fading out, 1 → 0 while fading in.
    pub fn overlay_alpha(&self) -> f32 {
        let Some(t) = self.transition else { return 0.0 };
        let leg = self.fade.as_secs_f32();
        if leg <= 0.0 {
            return 0.0;
        }
        let e = t.elapsed.as_secs_f32();
        if e < leg {
            e / leg
        } else {
            (1.0 - (e - leg) / leg).clamp(0.0, 1.0)
        }
    }

    /// The watermark is fully visible on a black canvas and gone once it is all white.
    /// Opacity follows progress over the whole canvas, not a fixed number of reveals,
    /// so on a full-window canvas it stays faintly visible until the last pixels.
    pub fn watermark_opacity(&self) -> f32 {
        let total = self.state.pixel_count();
        if total == 0 {
            return 0.0;
        }
        (1.0 - self.state.cursor() as f32 / total as f32).clamp(0.0, 1.0)
    }

    #[cfg(test)]
    pub fn scene(&self) -> Scene {
        self.scene
    }

    #[cfg(test)]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    #[cfg(test)]
    pub fn state(&self) -> &RevealState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const FRAME: Duration = Duration::from_millis(16);
    const FADE: Duration = Duration::from_secs(2);

    fn controller(w: u32, h: u32) -> SceneController {
        SceneController::new(RevealState::with_rng(StdRng::seed_from_u64(42)), w, h, FADE)
    }

    fn moved(dy: f32) -> PointerState {
        let mut p = PointerState::at((0.0, 0.0));
        p.advance(Some((0.0, dy)), false);
        p
    }

    fn still() -> PointerState {
        PointerState::at((3.0, 3.0))
    }

    fn click() -> PointerState {
        let mut p = still();
        p.advance(Some((3.0, 3.0)), true);
        p
    }

    /// Reveal everything and let the fade into the result scene finish.
    fn finish_painting(c: &mut SceneController) {
        c.update(&moved(c.state().pixel_count() as f32), FRAME);
        c.update(&still(), FADE * 2);
        assert_eq!(c.scene(), Scene::Result);
        assert!(!c.is_transitioning());
    }

    #[test]
    fn starts_painting_on_a_fresh_canvas() {
        let c = controller(10, 10);
        assert_eq!(c.scene(), Scene::Painting);
        assert!(!c.is_transitioning());
        assert_eq!(c.state().size(), (10, 10));
        assert_eq!(c.state().cursor(), 0);
    }

    #[test]
    fn pointer_travel_reveals_while_painting() {
        let mut c = controller(10, 10);
        c.update(&moved(5.0), FRAME);
        assert_eq!(c.state().cursor(), 5);
        assert_eq!(c.scene(), Scene::Painting);
        assert!(!c.is_transitioning());
    }

    #[test]
    fn completing_frame_pauses_timer_then_fades_to_result() {
        let mut c = controller(10, 10);
        c.update(&moved(100.0), FRAME);
        assert!(c.state().is_complete());
        assert!(c.state().is_timer_paused());
        assert_eq!(c.scene(), Scene::Painting, "the fade starts; the scene has not switched yet");
        assert!(c.is_transitioning());

        c.update(&still(), FADE - FRAME);
        assert_eq!(c.scene(), Scene::Painting, "still fading out");
        c.update(&still(), FRAME);
        assert_eq!(c.scene(), Scene::Result);
        assert!(c.is_transitioning());
        c.update(&still(), FADE - FRAME);
        assert!(c.is_transitioning(), "fade-in lasts the full fade length");
        c.update(&still(), FRAME);
        assert!(!c.is_transitioning());
    }

    #[test]
    fn click_on_result_restarts_with_a_new_order() {
        let mut c = controller(10, 10);
        let first = c.state().reveal_order().to_vec();
        finish_painting(&mut c);

        c.update(&click(), FRAME);
        assert_eq!(c.scene(), Scene::Result);
        c.update(&still(), FADE);
        assert_eq!(c.scene(), Scene::Painting);
        assert_eq!(c.state().cursor(), 0);
        assert!(!c.state().is_timer_paused());
        assert_ne!(c.state().reveal_order(), first.as_slice());

        let mut sorted = c.state().reveal_order().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<u32>>());
    }

    #[test]
    fn result_ignores_movement_and_held_button() {
        let mut c = controller(4, 4);
        finish_painting(&mut c);

        c.update(&moved(50.0), FRAME);
        let mut held = click();
        held.advance(Some((3.0, 3.0)), true);
        c.update(&held, FRAME);
        assert_eq!(c.scene(), Scene::Result);
        assert!(!c.is_transitioning());
    }

    #[test]
    fn first_pointer_reading_reveals_nothing() {
        let mut c = controller(40, 40);
        let mut p = PointerState::default();
        p.advance(Some((600.0, 450.0)), false);
        c.update(&p, FRAME);
        assert_eq!(c.state().cursor(), 0);
        p.advance(Some((600.0, 454.0)), false);
        c.update(&p, FRAME);
        assert_eq!(c.state().cursor(), 4);
    }

    #[test]
    fn painting_ignores_clicks() {
        let mut c = controller(4, 4);
        c.update(&click(), FRAME);
        assert_eq!(c.scene(), Scene::Painting);
        assert!(!c.is_transitioning());
    }

    #[test]
    fn input_during_fade_is_ignored() {
        let mut c = controller(4, 4);
        finish_painting(&mut c);
        c.update(&click(), FRAME);
        c.update(&still(), FADE);
        assert_eq!(c.scene(), Scene::Painting);
        assert!(c.is_transitioning());

        c.update(&moved(3.0), FRAME);
        assert_eq!(c.state().cursor(), 0, "no reveals until the fade-in ends");

        c.update(&still(), FADE);
        assert!(!c.is_transitioning());
        c.update(&moved(3.0), FRAME);
        assert_eq!(c.state().cursor(), 3);
    }

    #[test]
    fn restart_uses_the_latest_display_size() {
        let mut c = controller(4, 4);
        finish_painting(&mut c);
        c.set_display_size(6, 3);
        c.update(&click(), FRAME);
        c.update(&still(), FADE * 2);
        assert_eq!(c.state().size(), (6, 3));
    }

    #[test]
    fn overlay_ramps_up_then_down() {
        let mut c = controller(4, 4);
        assert_relative_eq!(c.overlay_alpha(), 0.0);
        c.update(&moved(16.0), FRAME);
        assert_relative_eq!(c.overlay_alpha(), 0.0);
        c.update(&still(), FADE / 2);
        assert_relative_eq!(c.overlay_alpha(), 0.5, epsilon = 1e-4);
        c.update(&still(), FADE / 2);
        assert_relative_eq!(c.overlay_alpha(), 1.0, epsilon = 1e-4);
        c.update(&still(), FADE / 2);
        assert_relative_eq!(c.overlay_alpha(), 0.5, epsilon = 1e-4);
        c.update(&still(), FADE / 2);
        assert_relative_eq!(c.overlay_alpha(), 0.0);
        assert!(!c.is_transitioning());
    }

    #[test]
    fn zero_length_fade_switches_on_next_frame() {
        let mut c = SceneController::new(
            RevealState::with_rng(StdRng::seed_from_u64(1)),
            3,
            3,
            Duration::ZERO,
        );
        c.update(&moved(9.0), FRAME);
        c.update(&still(), FRAME);
        assert_eq!(c.scene(), Scene::Result);
        assert!(!c.is_transitioning());
        assert_relative_eq!(c.overlay_alpha(), 0.0);
    }

    #[test]
    fn watermark_fades_with_progress() {
        let mut c = controller(10, 10);
        assert_relative_eq!(c.watermark_opacity(), 1.0);
        c.update(&moved(25.0), FRAME);
        assert_relative_eq!(c.watermark_opacity(), 0.75);
        c.update(&moved(75.0), FRAME);
        assert_relative_eq!(c.watermark_opacity(), 0.0);
    }

    #[test]
    fn watermark_survives_until_the_canvas_is_nearly_done() {
        let mut c = controller(400, 300);
        c.update(&moved(41_000.0), FRAME);
        assert!(c.watermark_opacity() > 0.6);
        c.update(&moved(60_000.0), FRAME);
        assert!(c.watermark_opacity() > 0.15);
        c.update(&moved(18_999.0), FRAME);
        assert_relative_eq!(c.watermark_opacity(), 1.0 / 120_000.0, epsilon = 1e-6);
    }

    #[test]
    fn painting_draws_canvas_and_watermark() {
        let c = controller(640, 480);
        let mut fb = FrameBuffer::filled(640, 480, RESULT_BLUE);
        c.draw(&mut fb);
        assert_eq!(fb.pixels[0], BLACK);
        // middle of the 'I' in "WHITE"
        assert_eq!(fb.pixels[240 * 640 + 320], WHITE);
    }

    #[test]
    fn result_draws_stats_on_white() {
        let mut c = controller(640, 480);
        finish_painting(&mut c);
        let mut fb = FrameBuffer::filled(640, 480, BLACK);
        c.draw(&mut fb);
        assert_eq!(fb.pixels[0], WHITE);
        assert!(fb.pixels.contains(&RESULT_BLUE));
    }

    #[test]
    fn fade_midpoint_is_solid_white() {
        let mut c = controller(8, 8);
        c.update(&moved(64.0), FRAME);
        c.update(&still(), FADE);
        let mut fb = FrameBuffer::filled(8, 8, BLACK);
        c.draw(&mut fb);
        assert!(fb.pixels.iter().all(|&px| px == WHITE));
    }
}

// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the canvas being revealed.
// 2) Whole-frame fills and see-through overlays (used by the scene fades).
// 3) A tiny 5x7 bitmap font, scaled up, for the watermark and the result screen.

use crate::error::Error;
use crate::types::{pack_rgb, unpack_rgb, FrameBuffer};
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window of the requested size.
    /// `fullscreen` opens it borderless and on top of everything else.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(
        title: &str,
        width: usize,
        height: usize,
        fullscreen: bool,
        fps: usize,
    ) -> Result<Self, Error> {
        let options = WindowOptions {
            borderless: fullscreen,
            topmost: fullscreen,
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(fps);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current mouse position in window pixel coordinates.
    /// Positions outside the window are passed through so fast strokes that
    /// leave the window still count their full length.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Pass)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Inner size of the window in pixels.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }
}

/* ---------- Software drawing: fills, blending, tiny bitmap font ---------- */

/// Mix `src` over `dst` with opacity `alpha` in [0,1].
#[inline]
pub fn blend(dst: u32, src: u32, alpha: f32) -> u32 {
    let a = alpha.clamp(0.0, 1.0);
    let (dr, dg, db) = unpack_rgb(dst);
    let (sr, sg, sb) = unpack_rgb(src);
    let mix = |d: u8, s: u8| (d as f32 + (s as f32 - d as f32) * a).round().clamp(0.0, 255.0) as u8;
    pack_rgb(mix(dr, sr), mix(dg, sg), mix(db, sb))
}

/// Paint the whole frame one color.
pub fn fill(fb: &mut FrameBuffer, color: u32) {
    fb.pixels.fill(color);
}

/// Copy `src` into `fb` starting at the top-left corner, clipped to both sizes.
/// Visual: the revealed canvas shows up as the scene's background.
pub fn blit(fb: &mut FrameBuffer, src: &FrameBuffer) {
    let w = fb.width.min(src.width);
    let h = fb.height.min(src.height);
    for y in 0..h {
        let dst_row = y * fb.width;
        let src_row = y * src.width;
        fb.pixels[dst_row..dst_row + w].copy_from_slice(&src.pixels[src_row..src_row + w]);
    }
}

/// Lay a translucent color over the whole frame.
/// Visual: the picture washes towards `color` (used for the scene fade).
pub fn overlay(fb: &mut FrameBuffer, color: u32, alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    if alpha >= 1.0 {
        fill(fb, color);
        return;
    }
    for px in &mut fb.pixels {
        *px = blend(*px, color, alpha);
    }
}

/// Blend a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn blend_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32, alpha: f32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = blend(fb.pixels[idx], color, alpha);
}

/* ---------- 5x7 bitmap font (uppercase subset used by the two scenes) ---------- */

const GLYPH_W: i32 = 5;
const GLYPH_H: i32 = 7;
const ADVANCE: i32 = GLYPH_W + 1; // 5 pixels glyph width + 1 pixel spacing

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
/// Lowercase letters share the uppercase shapes.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Letters for "WHITE", "PIXELS", "YOU HAVE LOST", "SECONDS"
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),

        // Punctuation: space, colon, dot
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),

        _ => None,
    }
}

/// Draw a single character at (x,y), each font pixel a `scale`×`scale` block.
fn draw_char(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, scale: i32, color: u32, alpha: f32) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..GLYPH_W {
            if (rowbits & (1 << (4 - rx))) == 0 {
                continue;
            }
            let px = x + rx * scale;
            let py = y + ry as i32 * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    blend_pixel(fb, px + dx, py + dy, color, alpha);
                }
            }
        }
    }
}

/// Width and height in pixels that `text` takes up at `scale`.
pub fn text_size(text: &str, scale: i32) -> (i32, i32) {
    let n = text.chars().count() as i32;
    let w = if n == 0 { 0 } else { (n * ADVANCE - 1) * scale };
    (w, GLYPH_H * scale)
}

/// Draw `text` with its top-left corner at (x,y).
pub fn draw_text(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, scale: i32, color: u32, alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    for ch in text.chars() {
        draw_char(fb, x, y, ch, scale, color, alpha);
        x += ADVANCE * scale;
    }
}

/// Draw `text` centered on (cx,cy).
/// Visual: big blocky letters in the middle of the window.
pub fn draw_text_centered(fb: &mut FrameBuffer, cx: i32, cy: i32, text: &str, scale: i32, color: u32, alpha: f32) {
    let (w, h) = text_size(text, scale);
    draw_text(fb, cx - w / 2, cy - h / 2, text, scale, color, alpha);
}

use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;

use vm8_core::{Drawable, SCREEN_HEIGHT, SCREEN_WIDTH};

use crate::color::PixelColor;

const TITLE: &str = "vm8";

/// SDL2 window rendering the framebuffer as scaled filled rectangles.
pub struct Window {
    canvas: Canvas<sdl2::video::Window>,
    scale: u32,
    background: Color,
    foreground: Color,
}

impl Window {
    pub fn new(
        sdl_context: &sdl2::Sdl,
        scale: u32,
        background: PixelColor,
        foreground: PixelColor,
    ) -> anyhow::Result<Window> {
        let video_subsystem = sdl_context.video().map_err(anyhow::Error::msg)?;

        let window = video_subsystem
            .window(
                TITLE,
                SCREEN_WIDTH as u32 * scale,
                SCREEN_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()?;

        let canvas = window.into_canvas().build()?;

        Ok(Window {
            canvas,
            scale,
            background: background.into(),
            foreground: foreground.into(),
        })
    }
}

impl Drawable for Window {
    fn clear(&mut self) {
        self.canvas.set_draw_color(self.background);
        self.canvas.clear();
    }

    fn draw_pixel(&mut self, x: usize, y: usize) {
        self.canvas.set_draw_color(self.foreground);

        let _ = self.canvas.fill_rect(Rect::new(
            x as i32 * self.scale as i32,
            y as i32 * self.scale as i32,
            self.scale,
            self.scale,
        ));
    }

    fn present(&mut self) {
        self.canvas.present();
    }
}

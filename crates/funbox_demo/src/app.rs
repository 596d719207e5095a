use funbox_common::{ButtonMask, Color, FrameBuffer, SimulationStep};

use crate::gradient::draw_gradient;
use crate::{CURSOR_SIZE, CURSOR_SPEED};

/// Native stand-in for a foreign tick: the gradient pattern with a cursor the
/// d-pad moves around. Holding Start and Select together quits.
#[derive(Debug, Default)]
pub struct DemoApp {
    cursor_x: f32,
    cursor_y: f32,
    last_ms: Option<u32>,
}

impl DemoApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> (u32, u32) {
        (self.cursor_x as u32, self.cursor_y as u32)
    }

    fn move_cursor(&mut self, buttons: ButtonMask, dt_ms: u32, width: u32, height: u32) {
        let step = CURSOR_SPEED * dt_ms as f32 / 1000.0;
        if buttons.contains(ButtonMask::LEFT) {
            self.cursor_x -= step;
        }
        if buttons.contains(ButtonMask::RIGHT) {
            self.cursor_x += step;
        }
        if buttons.contains(ButtonMask::UP) {
            self.cursor_y -= step;
        }
        if buttons.contains(ButtonMask::DOWN) {
            self.cursor_y += step;
        }
        let max_x = width.saturating_sub(CURSOR_SIZE) as f32;
        let max_y = height.saturating_sub(CURSOR_SIZE) as f32;
        self.cursor_x = self.cursor_x.clamp(0.0, max_x);
        self.cursor_y = self.cursor_y.clamp(0.0, max_y);
    }
}

impl SimulationStep for DemoApp {
    fn tick(&mut self, buttons: ButtonMask, frame: &mut FrameBuffer, elapsed_ms: u32) -> bool {
        if self.last_ms.is_none() {
            log::info!("demo tick started at {elapsed_ms} ms");
        }
        let dt = self
            .last_ms
            .map_or(0, |last| elapsed_ms.saturating_sub(last));
        self.last_ms = Some(elapsed_ms);

        self.move_cursor(buttons, dt, frame.width(), frame.height());
        draw_gradient(frame, elapsed_ms);

        let color = if buttons.contains(ButtonMask::A) {
            Color::YELLOW
        } else if buttons.contains(ButtonMask::B) {
            Color::MAGENTA
        } else {
            Color::WHITE
        };
        let (cx, cy) = self.cursor();
        for y in cy..cy + CURSOR_SIZE {
            for x in cx..cx + CURSOR_SIZE {
                frame.set(x, y, color);
            }
        }

        buttons.contains(ButtonMask::START | ButtonMask::SELECT)
    }
}

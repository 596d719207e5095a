use funbox_common::{Color, FrameBuffer};

/// Animated test pattern: a red/green ramp across the buffer, scrambled by the
/// clock so every frame differs.
pub fn gradient_pixel(x: u32, y: u32, width: u32, height: u32, elapsed_ms: u32) -> Color {
    let fr = x as f32 / width as f32;
    let fg = y as f32 / height as f32;
    let fb = (x + y) as f32 / ((width + height) as f32).sqrt();

    let r = (fr * 255.0) as u8 | elapsed_ms as u8;
    let g = ((fg * 255.0) as u8).wrapping_add(!elapsed_ms as u8);
    let b = match elapsed_ms {
        0 => 0,
        ms => ((fb * 255.0) as u32 % ms) as u8,
    };
    Color::new_rgb(r, g, b)
}

/// Overwrite every pixel of `frame` with the pattern.
pub fn draw_gradient(frame: &mut FrameBuffer, elapsed_ms: u32) {
    let (width, height) = (frame.width(), frame.height());
    for (y, row) in frame.rows_mut().enumerate() {
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = gradient_pixel(x as u32, y as u32, width, height, elapsed_ms).to_u32();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_elapsed_does_not_divide_by_zero() {
        let c = gradient_pixel(10, 10, 160, 90, 0);
        assert_eq!(c.b, 0);
        assert_eq!(c.a, 0xff);
    }

    #[test]
    fn origin_pixel_follows_clock() {
        // r = 0 | 0x12, g = 0 + !0x12
        let c = gradient_pixel(0, 0, 160, 90, 0x12);
        assert_eq!((c.r, c.g, c.b), (0x12, 0xed, 0));
    }

    #[test]
    fn pattern_changes_over_time() {
        let mut a = FrameBuffer::new(16, 9).unwrap();
        let mut b = FrameBuffer::new(16, 9).unwrap();
        draw_gradient(&mut a, 1000);
        draw_gradient(&mut b, 1017);
        assert_ne!(a.pixels(), b.pixels());
    }
}

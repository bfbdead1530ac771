// Anything the particle field can draw onto. The browser implementation lives
// in `renderer`; tests record the calls instead.

use crate::color::Color;
use crate::field::Viewport;

pub trait Surface {
    fn clear(&mut self, viewport: Viewport);

    // `glow` is a shadow blur radius in pixels, 0 for none
    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color, opacity: f64, glow: f64);

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, opacity: f64, width: f64);
}

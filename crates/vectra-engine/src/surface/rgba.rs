use image::{Rgba, RgbaImage};

use super::{PixelFormat, SimpleSurface, Surface};

impl SimpleSurface {
    /// Copies an RGBA image into a new surface of the given format.
    pub fn from_rgba_image(img: &RgbaImage, format: PixelFormat) -> Self {
        let (w, h) = img.dimensions();
        let mut surface = SimpleSurface::new(w, h, format);
        for (y, row) in (0..h).zip(img.rows()) {
            for (d, Rgba([r, g, b, a])) in surface.row_pixels_mut(y).iter_mut().zip(row) {
                *d = format.encode(u32::from_be_bytes([*a, *r, *g, *b]));
            }
        }
        surface
    }

    /// Copies the surface into an RGBA image. Formats without alpha export as opaque.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            let [a, r, g, b] = self.pixel(x, y).unwrap_or(0).to_be_bytes();
            Rgba([r, g, b, a])
        })
    }
}

/// Flat color fill: `0xRRGGBB` plus a straight alpha in [0, 1].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolidFill {
    pub rgb: u32,
    pub alpha: f32,
}

impl SolidFill {
    /// Creates a solid fill. Bits above the low 24 of `rgb` are ignored.
    #[inline]
    pub fn new(rgb: u32, alpha: f32) -> Self {
        Self { rgb: rgb & 0x00FF_FFFF, alpha }
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }

    /// Packs into `0xAARRGGBB` with alpha clamped to [0, 1].
    #[inline]
    pub fn argb(&self) -> u32 {
        pack_argb(self.rgb, self.alpha)
    }
}

/// Packs a 24-bit color and straight alpha into `0xAARRGGBB`.
///
/// NaN alpha packs as fully transparent.
#[inline]
pub fn pack_argb(rgb: u32, alpha: f32) -> u32 {
    let a = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
    let a = (a * 255.0).round() as u32;
    (a << 24) | (rgb & 0x00FF_FFFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_packs_alpha_into_high_byte() {
        assert_eq!(SolidFill::new(0xFF0000, 1.0).argb(), 0xFFFF_0000);
        assert_eq!(SolidFill::new(0x00FF00, 0.0).argb(), 0x0000_FF00);
        assert_eq!(SolidFill::new(0x0000FF, 0.5).argb(), 0x8000_00FF);
    }

    #[test]
    fn out_of_range_inputs_are_masked_and_clamped() {
        let fill = SolidFill::new(0x12_345678, 3.0);
        assert_eq!(fill.rgb, 0x345678);
        assert_eq!(fill.argb(), 0xFF34_5678);
        assert_eq!(pack_argb(0xFFFFFF, f32::NAN), 0x00FF_FFFF);
    }
}

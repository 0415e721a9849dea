/// Pixel layout: a 2-bit flag combination.
///
/// - bit 0 ([`HAS_ALPHA`](PixelFormat::HAS_ALPHA)): the fourth byte is alpha, otherwise padding
/// - bit 1 ([`BGR_ORDER`](PixelFormat::BGR_ORDER)): color bytes are stored blue first
///
/// Every format is 4 bytes per pixel. Byte order within a pixel:
///
/// | format | bytes            |
/// |--------|------------------|
/// | `Xrgb` | `R, G, B, X`     |
/// | `Argb` | `R, G, B, A`     |
/// | `Xbgr` | `B, G, R, X`     |
/// | `Abgr` | `B, G, R, A`     |
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum PixelFormat {
    Xrgb = 0x00,
    #[default]
    Argb = 0x01,
    Xbgr = 0x02,
    Abgr = 0x03,
}

impl PixelFormat {
    pub const HAS_ALPHA: u8 = 0x01;
    pub const BGR_ORDER: u8 = 0x02;

    #[inline]
    pub const fn from_flags(flags: u8) -> Self {
        match flags & (Self::HAS_ALPHA | Self::BGR_ORDER) {
            0x00 => PixelFormat::Xrgb,
            0x01 => PixelFormat::Argb,
            0x02 => PixelFormat::Xbgr,
            _ => PixelFormat::Abgr,
        }
    }

    #[inline]
    pub const fn flags(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn has_alpha(self) -> bool {
        self.flags() & Self::HAS_ALPHA != 0
    }

    #[inline]
    pub const fn is_bgr(self) -> bool {
        self.flags() & Self::BGR_ORDER != 0
    }

    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        4
    }

    /// Encodes `0xAARRGGBB` into this format's byte layout.
    ///
    /// Formats without alpha store `0xFF` in the padding byte.
    #[inline]
    pub const fn encode(self, argb: u32) -> [u8; 4] {
        let [a, r, g, b] = argb.to_be_bytes();
        let a = if self.has_alpha() { a } else { 0xFF };
        if self.is_bgr() { [b, g, r, a] } else { [r, g, b, a] }
    }

    /// Decodes one pixel to `0xAARRGGBB`; formats without alpha decode as opaque.
    #[inline]
    pub const fn decode(self, px: [u8; 4]) -> u32 {
        let (r, g, b) = if self.is_bgr() { (px[2], px[1], px[0]) } else { (px[0], px[1], px[2]) };
        let a = if self.has_alpha() { px[3] } else { 0xFF };
        u32::from_be_bytes([a, r, g, b])
    }

    /// Re-encodes a pixel of format `self` into format `to`.
    #[inline]
    pub const fn convert(self, px: [u8; 4], to: PixelFormat) -> [u8; 4] {
        to.encode(self.decode(px))
    }
}

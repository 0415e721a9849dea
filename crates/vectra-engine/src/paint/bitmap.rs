use std::fmt;
use std::rc::Rc;

use crate::coords::Matrix;
use crate::surface::SurfaceRef;

/// Fill that paints with the pixels of a [`Surface`](crate::surface::Surface).
///
/// The surface is shared, not copied: pixel changes made after the fill is
/// recorded are visible to the renderer. Equality is identity of the
/// referenced surface plus equality of the remaining fields.
#[derive(Clone)]
pub struct BitmapFill {
    pub surface: SurfaceRef,
    pub matrix: Matrix,
    pub repeat: bool,
    pub smooth: bool,
}

impl BitmapFill {
    /// Repeating, unsmoothed fill with an identity matrix.
    pub fn new(surface: SurfaceRef) -> Self {
        Self {
            surface,
            matrix: Matrix::identity(),
            repeat: true,
            smooth: false,
        }
    }

    pub fn with_matrix(mut self, matrix: Matrix) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    /// Returns true when both fills reference the same surface object.
    #[inline]
    pub fn same_surface(&self, other: &BitmapFill) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.surface), Rc::as_ptr(&other.surface))
    }
}

impl PartialEq for BitmapFill {
    fn eq(&self, other: &Self) -> bool {
        self.same_surface(other)
            && self.matrix == other.matrix
            && self.repeat == other.repeat
            && self.smooth == other.smooth
    }
}

impl fmt::Debug for BitmapFill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h, format) = match self.surface.try_borrow() {
            Ok(s) => (s.width(), s.height(), Some(s.format())),
            Err(_) => (0, 0, None),
        };
        f.debug_struct("BitmapFill")
            .field("surface", &format_args!("{w}x{h} {format:?}"))
            .field("matrix", &self.matrix)
            .field("repeat", &self.repeat)
            .field("smooth", &self.smooth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::surface::{PixelFormat, SimpleSurface};

    fn shared(w: u32, h: u32) -> SurfaceRef {
        Rc::new(RefCell::new(SimpleSurface::new(w, h, PixelFormat::Argb)))
    }

    #[test]
    fn equality_is_surface_identity() {
        let a = shared(4, 4);
        let b = shared(4, 4);
        assert_eq!(BitmapFill::new(a.clone()), BitmapFill::new(a.clone()));
        assert_ne!(BitmapFill::new(a.clone()), BitmapFill::new(b));
        assert_ne!(BitmapFill::new(a.clone()), BitmapFill::new(a).with_smooth(true));
    }

    #[test]
    fn fills_share_one_surface() {
        let s = shared(2, 2);
        let f1 = BitmapFill::new(s.clone());
        let f2 = BitmapFill::new(s.clone()).with_repeat(false);
        assert!(f1.same_surface(&f2));
        assert_eq!(Rc::strong_count(&s), 3);
        drop(f1);
        drop(f2);
        assert_eq!(Rc::strong_count(&s), 1);
    }
}

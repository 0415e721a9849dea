use std::any::Any;
use std::fmt;

/// Slot for one renderer-owned resource (an uploaded texture, a tessellation,
/// a GPU buffer) attached to a drawable object.
///
/// The owner fills the slot lazily on behalf of a renderer and empties it on
/// every mutation the renderer has not yet observed. Dropping the handle runs
/// the resource's own `Drop`, so renderers never free it through the owner.
///
/// `generation` increases on every invalidation, letting renderers that keep
/// resources elsewhere detect staleness without holding a handle here.
#[derive(Default)]
pub struct RenderCache {
    handle: Option<Box<dyn Any>>,
    generation: u64,
}

impl RenderCache {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_populated(&self) -> bool {
        self.handle.is_some()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the cached handle if it holds a `T`.
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.handle.as_ref()?.downcast_ref::<T>()
    }

    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.handle.as_mut()?.downcast_mut::<T>()
    }

    /// Replaces the cached handle.
    pub fn set<T: 'static>(&mut self, value: T) {
        self.handle = Some(Box::new(value));
    }

    /// Drops the cached handle. Returns true if one was present.
    pub fn invalidate(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        self.handle.take().is_some()
    }
}

impl fmt::Debug for RenderCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderCache")
            .field("populated", &self.handle.is_some())
            .field("generation", &self.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    struct Texture {
        id: u32,
        dropped: Rc<Cell<bool>>,
    }

    impl Drop for Texture {
        fn drop(&mut self) {
            self.dropped.set(true);
        }
    }

    #[test]
    fn typed_access_to_the_handle() {
        let mut cache = RenderCache::new();
        assert!(cache.get::<u32>().is_none());
        cache.set(7u32);
        if let Some(v) = cache.get_mut::<u32>() {
            *v += 1;
        }
        assert_eq!(cache.get::<u32>(), Some(&8));
        assert_eq!(cache.get::<String>(), None);
        assert!(cache.get_mut::<String>().is_none());
    }

    #[test]
    fn set_replaces_handle_of_another_type() {
        let dropped = Rc::new(Cell::new(false));
        let mut cache = RenderCache::new();
        cache.set(Texture { id: 1, dropped: dropped.clone() });
        cache.set(String::from("tex"));
        assert!(dropped.get());
        assert_eq!(cache.get::<String>().map(String::as_str), Some("tex"));
        assert!(cache.get::<Texture>().is_none());
        assert_eq!(cache.generation(), 0);
    }

    #[test]
    fn invalidate_drops_handle_and_bumps_generation() {
        let dropped = Rc::new(Cell::new(false));
        let mut cache = RenderCache::new();
        cache.set(Texture { id: 3, dropped: dropped.clone() });
        assert_eq!(cache.get::<Texture>().map(|t| t.id), Some(3));

        assert!(cache.invalidate());
        assert!(dropped.get());
        assert!(!cache.is_populated());
        assert_eq!(cache.generation(), 1);

        assert!(!cache.invalidate());
        assert_eq!(cache.generation(), 2);
    }
}

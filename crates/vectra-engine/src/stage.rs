//! Stage and window boundary.
//!
//! Platform backends implement [`Frame`] and [`Stage`]; the core only defines
//! the event vocabulary and the handler contract. [`HeadlessStage`] is an
//! off-screen stage drawing into a surface.

use std::ops::BitOr;

use crate::render::{RenderTarget, SurfaceTarget};
use crate::surface::SurfaceRef;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum EventType {
    #[default]
    Unknown,
    Close,
    Resize,
    MouseMove,
    MouseClick,
    Timer,
    Redraw,
    NextFrame,
}

/// Modifier keys held when an event was generated.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const SHIFT: u32 = 0x01;
    pub const CTRL: u32 = 0x02;
    pub const ALT: u32 = 0x04;
    pub const META: u32 = 0x08;

    /// Decodes a platform modifier mask; unknown bits are ignored.
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            shift: bits & Self::SHIFT != 0,
            ctrl: bits & Self::CTRL != 0,
            alt: bits & Self::ALT != 0,
            meta: bits & Self::META != 0,
        }
    }

    pub const fn bits(self) -> u32 {
        (self.shift as u32 * Self::SHIFT)
            | (self.ctrl as u32 * Self::CTRL)
            | (self.alt as u32 * Self::ALT)
            | (self.meta as u32 * Self::META)
    }
}

/// A window-system event. Handlers may rewrite it in place (e.g. set
/// `kind` to [`EventType::Unknown`] to mark it consumed).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Event {
    pub kind: EventType,
    /// Window-relative position in pixels.
    pub win_x: i32,
    pub win_y: i32,
    /// Event-specific payload (button index, timer id, ...).
    pub value: i32,
    pub mod_state: Modifiers,
}

impl Event {
    #[inline]
    pub fn new(kind: EventType) -> Self {
        Self { kind, ..Self::default() }
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.win_x = x;
        self.win_y = y;
        self
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }

    pub fn with_modifiers(mut self, mod_state: Modifiers) -> Self {
        self.mod_state = mod_state;
        self
    }
}

/// Event callback. The closure owns whatever context it needs.
pub type EventHandler = Box<dyn FnMut(&mut Event)>;

/// Window creation flags.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct WindowFlags(u32);

impl WindowFlags {
    pub const FULLSCREEN: WindowFlags = WindowFlags(0x0000_0001);
    pub const BORDERLESS: WindowFlags = WindowFlags(0x0000_0002);
    pub const RESIZABLE: WindowFlags = WindowFlags(0x0000_0004);
    pub const OPENGL: WindowFlags = WindowFlags(0x0000_0008);

    #[inline]
    pub const fn empty() -> Self {
        WindowFlags(0)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        WindowFlags(bits & 0x0F)
    }

    #[inline]
    pub const fn contains(self, other: WindowFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for WindowFlags {
    type Output = WindowFlags;

    #[inline]
    fn bitor(self, rhs: WindowFlags) -> WindowFlags {
        WindowFlags(self.0 | rhs.0)
    }
}

/// Parameters for creating a main frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameConfig {
    pub width: u32,
    pub height: u32,
    pub flags: WindowFlags,
    pub title: String,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            flags: WindowFlags::RESIZABLE,
            title: "vectra".to_owned(),
        }
    }
}

/// Top-level drawing area of a window.
pub trait Stage {
    /// Presents the frame drawn since the last flip.
    fn flip(&mut self);

    /// Last known mouse position in window pixels.
    fn mouse(&self) -> (i32, i32);

    /// Installs `handler`, replacing the previous one; `None` removes it.
    fn set_event_handler(&mut self, handler: Option<EventHandler>);

    fn render_target(&mut self) -> &mut dyn RenderTarget;
}

/// A platform window hosting one stage.
pub trait Frame {
    fn set_title(&mut self, title: &str);
    fn set_icon(&mut self, icon: SurfaceRef);
    fn stage(&mut self) -> &mut dyn Stage;
}

/// Off-screen stage. Events are injected with [`send`](HeadlessStage::send).
pub struct HeadlessStage {
    target: SurfaceTarget,
    handler: Option<EventHandler>,
    mouse: (i32, i32),
    frames: u64,
}

impl HeadlessStage {
    pub fn new(surface: SurfaceRef) -> Self {
        Self {
            target: SurfaceTarget::new(surface),
            handler: None,
            mouse: (0, 0),
            frames: 0,
        }
    }

    /// Delivers `event` to the handler. Mouse events update the tracked
    /// position first. Returns the event as the handler left it.
    pub fn send(&mut self, mut event: Event) -> Event {
        if matches!(event.kind, EventType::MouseMove | EventType::MouseClick) {
            self.mouse = (event.win_x, event.win_y);
        }
        match self.handler.as_mut() {
            Some(handler) => handler(&mut event),
            None => log::trace!("stage: dropped {:?} (no handler)", event.kind),
        }
        event
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn surface_target(&self) -> &SurfaceTarget {
        &self.target
    }
}

impl Stage for HeadlessStage {
    fn flip(&mut self) {
        self.frames += 1;
        log::trace!("stage: flip #{}", self.frames);
    }

    fn mouse(&self) -> (i32, i32) {
        self.mouse
    }

    fn set_event_handler(&mut self, handler: Option<EventHandler>) {
        self.handler = handler;
    }

    fn render_target(&mut self) -> &mut dyn RenderTarget {
        &mut self.target
    }
}

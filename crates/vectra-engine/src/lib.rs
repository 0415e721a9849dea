//! Vectra engine crate.
//!
//! Flash-style vector display lists ([`graphics`]) converted into
//! renderer-ready batches ([`render`]), plus the pixel surfaces ([`surface`])
//! that bitmap fills and render targets draw from.
//!
//! Everything here is single-threaded: shared surfaces are `Rc<RefCell<_>>`.

pub mod coords;
pub mod graphics;
pub mod logging;
pub mod paint;
pub mod path;
pub mod render;
pub mod stage;
pub mod surface;

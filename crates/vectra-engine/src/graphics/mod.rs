//! Display lists.
//!
//! [`Graphics`] records Flash drawing-API calls as [`GraphicsData`] items and
//! converts them into render batches grouped by the fill or stroke active
//! when each path was drawn.

mod convert;
mod data;
mod graphics;

pub use data::{GraphicsData, GraphicsDataType};
pub use graphics::Graphics;

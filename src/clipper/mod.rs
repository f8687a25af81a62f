//! Clipping of lines and triangles.
//!
//! Two stages run per frame:
//!
//! - [`view_space`]: near/far clipping on view-space z, before projection.
//!   Guarantees `w > 0` for the perspective divide.
//!
//! - [`screen_space`]: clipping against the four viewport edges, after the
//!   viewport mapping, so the rasterizer only sees on-screen coordinates.

pub mod screen_space;
pub mod view_space;

pub use screen_space::{ScreenLine, ScreenTriangle, ScreenVertex, Viewport};
pub use view_space::{DepthRange, ViewLine, ViewTriangle};

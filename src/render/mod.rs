//! Rendering pipeline.
//!
//! This module contains:
//! - [`FrameBuffer`]: owned color and depth buffers
//! - [`Rasterizer`] implementations for filling triangles
//! - [`Renderer`]: culling, clipping, sorting and rasterizing a [`World`]
//!
//! [`World`]: crate::world::World

pub mod framebuffer;
pub mod grid;
pub mod rasterizer;
pub mod renderer;

pub use framebuffer::FrameBuffer;
pub use grid::{CoordinateGrid, WorldLine};
pub use rasterizer::{
    DepthMode, DepthScanlineRasterizer, PixelVertex, Rasterizer, RasterizerDispatcher,
    ScanlineRasterizer,
};
pub use renderer::{RenderOptions, RenderStats, Renderer};

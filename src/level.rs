//! Block levels authored as 32-bit TGA images.
//!
//! Every pixel with a non-zero alpha becomes a unit block of that color.
//! Pixel `(x, y)` maps to the block whose centre sits at
//! `(x + 0.5, 0.5, -y - 0.5)`, so image rows extend away from the viewer
//! along -Z.

use std::path::Path;

use image::ImageFormat;
use thiserror::Error;

use crate::color::Color;
use crate::mesh::{CubeFaces, Mesh};

/// Size of the fixed TGA header.
const TGA_HEADER_LEN: usize = 18;

/// Uncompressed true-color image.
const TGA_TYPE_TRUE_COLOR: u8 = 2;

/// Image descriptor bits that mark a right-to-left and a top-to-bottom
/// pixel order.
const TGA_RIGHT_ORIGIN: u8 = 0x10;
const TGA_TOP_ORIGIN: u8 = 0x20;

const FLOOR_COLOR: (u8, u8, u8) = (80, 80, 80);

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid level image: {0}")]
    InvalidFormat(&'static str),

    #[error("failed to decode level image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Optional block colors indexed by `(x, y)`, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockGrid {
    width: usize,
    height: usize,
    cells: Vec<Option<Color>>,
}

impl BlockGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, block: Option<Color>) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = block;
        }
    }

    /// Occupied cells in row-major order.
    pub fn blocks(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            cell.map(|color| (i % self.width, i / self.width, color))
        })
    }

    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// Parses an uncompressed 32-bit TGA image into a block grid.
///
/// The header is checked before decoding: image type must be 2, both
/// dimensions at least 1 and the pixel depth 32 bits.
///
/// Blocks are placed in file order: the first stored pixel is `(0, 0)` and
/// `y` is the stored row index, whatever origin the descriptor declares.
pub fn blocks_from_tga(bytes: &[u8]) -> Result<BlockGrid, LevelError> {
    if bytes.len() < TGA_HEADER_LEN {
        return Err(LevelError::InvalidFormat("truncated header"));
    }
    if bytes[2] != TGA_TYPE_TRUE_COLOR {
        return Err(LevelError::InvalidFormat("image type is not uncompressed true-color"));
    }
    let width = u16::from_le_bytes([bytes[12], bytes[13]]) as usize;
    let height = u16::from_le_bytes([bytes[14], bytes[15]]) as usize;
    if width < 1 || height < 1 {
        return Err(LevelError::InvalidFormat("image has no pixels"));
    }
    if bytes[16] != 32 {
        return Err(LevelError::InvalidFormat("pixel depth is not 32 bits"));
    }

    let descriptor = bytes[17];

    // The decoder reorients pixels to a top-left origin; undo that.
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Tga)?.to_rgba8();

    let mut grid = BlockGrid::new(width, height);
    for (x, y, pixel) in image.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            continue;
        }
        let (x, y) = (x as usize, y as usize);
        let column = if descriptor & TGA_RIGHT_ORIGIN != 0 { width - 1 - x } else { x };
        let row = if descriptor & TGA_TOP_ORIGIN != 0 { y } else { height - 1 - y };
        grid.set(column, row, Some(Color::from_int(r, g, b, a)));
    }

    Ok(grid)
}

/// Reads and parses a level file.
pub fn load_blocks(path: impl AsRef<Path>) -> Result<BlockGrid, LevelError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let grid = blocks_from_tga(&bytes)?;
    log::debug!(
        "loaded level {} ({}x{}, {} blocks)",
        path.display(),
        grid.width(),
        grid.height(),
        grid.block_count()
    );
    Ok(grid)
}

fn place_block(mut mesh: Mesh, x: usize, y: usize) -> Mesh {
    mesh.transform
        .set_scale_uniform(0.5)
        .set_position_xyz(x as f64 + 0.5, 0.5, -(y as f64) - 0.5);
    mesh
}

/// One full cube per block.
pub fn generate_full_meshes(grid: &BlockGrid) -> Vec<Mesh> {
    grid.blocks()
        .map(|(x, y, color)| place_block(Mesh::cube(color), x, y))
        .collect()
}

/// One cube per block with faces against occupied neighbors left out, plus a
/// floor quad under the whole grid.
///
/// The top face is always kept; the bottom face is never generated since it
/// rests on the floor.
pub fn generate_partial_meshes(grid: &BlockGrid) -> Vec<Mesh> {
    let occupied = |x: usize, y: usize| grid.get(x, y).is_some();
    let (width, height) = (grid.width(), grid.height());

    let mut meshes: Vec<Mesh> = grid
        .blocks()
        .map(|(x, y, color)| {
            let mut faces = CubeFaces::TOP;
            if x == 0 || !occupied(x - 1, y) {
                faces.insert(CubeFaces::LEFT);
            }
            if x == width - 1 || !occupied(x + 1, y) {
                faces.insert(CubeFaces::RIGHT);
            }
            if y == 0 || !occupied(x, y - 1) {
                faces.insert(CubeFaces::FRONT);
            }
            if y == height - 1 || !occupied(x, y + 1) {
                faces.insert(CubeFaces::BACK);
            }
            place_block(Mesh::partial_cube(color, faces), x, y)
        })
        .collect();

    meshes.push(floor_mesh(width, height));
    meshes
}

fn floor_mesh(width: usize, height: usize) -> Mesh {
    let (r, g, b) = FLOOR_COLOR;
    Mesh::floor(width as f64, height as f64, Color::from_int(r, g, b, 255))
}

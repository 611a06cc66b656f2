use crate::TILE_SIZE;
use macroquad::prelude::Rect;

/// A tileset: one atlas image supplying a contiguous range of global tile
/// IDs starting at `first_gid`.
#[derive(Debug, Clone)]
pub struct TileSet {
    /// First global tile ID served by this atlas.
    pub first_gid: u32,
    /// Atlas width in pixels.
    pub width: u32,
    /// Atlas height in pixels.
    pub height: u32,
    /// Path of the atlas image, relative to the map file.
    pub source: String,
}

impl TileSet {
    /// Number of tile columns in the atlas.
    pub fn columns(&self) -> u32 {
        self.width / TILE_SIZE
    }

    /// Pixel coordinates of a GID's top-left corner within the atlas.
    pub fn source_origin(&self, gid: u32) -> (u32, u32) {
        let local = gid - self.first_gid;
        let columns = self.columns();
        (local % columns * TILE_SIZE, local / columns * TILE_SIZE)
    }

    /// Atlas source rectangle for a GID.
    pub fn source_rect(&self, gid: u32) -> Rect {
        let (x, y) = self.source_origin(gid);
        Rect::new(x as f32, y as f32, TILE_SIZE as f32, TILE_SIZE as f32)
    }
}

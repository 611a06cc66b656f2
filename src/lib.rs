#![warn(missing_docs)]

//! Pokemon-style overworld engine for Macroquad: Tiled XML map loading,
//! tile-grid collision, a step-scrolled camera and sprite-sheet animation.

mod camera;
mod document;
mod error;
mod grid;
mod layer;
mod loader {
    pub(crate) mod xml_loader;
}
mod map;
mod properties;
mod sprite {
    pub(crate) mod animated;
    pub(crate) mod animation;
    pub(crate) mod player;
}
mod tileset;

pub use camera::{Camera, CoordSpace, Direction, Units};
pub use document::MapDocument;
pub use error::{AtlasError, MapError};
pub use grid::{Tile, TileGrid};
pub use layer::Layer;
pub use map::{Map, COLLISION_LAYER};
pub use properties::Properties;
pub use sprite::animated::AnimatedSprite;
pub use sprite::animation::{parse_atlas_file, parse_atlas_str, FrameSequence};
pub use sprite::player::PlayerSprite;
pub use tileset::TileSet;

/// Edge length of a map tile in pixels, in both map and atlas coordinates.
pub const TILE_SIZE: u32 = 32;

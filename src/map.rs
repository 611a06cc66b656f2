use crate::camera::{Camera, CoordSpace, Direction, Units};
use crate::document::MapDocument;
use crate::error::MapError;
use crate::sprite::player::PlayerSprite;
use crate::TILE_SIZE;
use macroquad::prelude::*;
use std::path::Path;

/// Index of the layer whose nonzero cells block player movement.
pub const COLLISION_LAYER: usize = 1;

/// Pixels the camera pans per update tick while a move is in flight.
/// 16 ticks cross one tile; hosts wanting time-scaled movement call
/// update at their own cadence.
const PAN_STEP: i32 = 2;

/// A playable map: a parsed [`MapDocument`] plus the camera, tileset
/// textures and the grid-movement state machine.
#[derive(Debug)]
pub struct Map {
    document: MapDocument,
    /// The map's camera, seeded from the `SpawnPoint` property.
    pub camera: Camera,
    textures: Vec<Texture2D>,
}

impl Map {
    /// Loads a map file and every tileset texture it references.
    pub async fn load(path: &str) -> Result<Self, MapError> {
        let (document, base_dir) = MapDocument::load_from_file(path)?;
        let mut map = Self::from_document(document)?;
        map.load_textures(&base_dir).await?;
        Ok(map)
    }

    /// Builds a map around an already-parsed document, seeding the
    /// camera from the mandatory `SpawnPoint` property. No textures are
    /// loaded; rendering skips tilesets without one.
    pub fn from_document(document: MapDocument) -> Result<Self, MapError> {
        let raw = document
            .properties
            .get_str("SpawnPoint")
            .ok_or(MapError::MissingProperty("SpawnPoint"))?;
        let spawn = document
            .properties
            .get_point("SpawnPoint")
            .ok_or_else(|| MapError::InvalidSpawnPoint(raw.to_owned()))?;

        Ok(Self {
            document,
            camera: Camera::new(IVec2::new(spawn.0, spawn.1)),
            textures: Vec::new(),
        })
    }

    /// Loads one texture per tileset, resolving image paths against
    /// `base_dir` (the map file's directory).
    pub async fn load_textures(&mut self, base_dir: &Path) -> Result<(), MapError> {
        self.textures.clear();
        for ts in &self.document.tilesets {
            let img_path = base_dir.join(&ts.source);
            let Some(path_str) = img_path.to_str() else {
                return Err(MapError::Texture {
                    path: img_path,
                    message: "path is not valid UTF-8".to_owned(),
                });
            };
            let tex = load_texture(path_str).await.map_err(|e| MapError::Texture {
                path: img_path.clone(),
                message: e.to_string(),
            })?;
            tex.set_filter(FilterMode::Nearest);
            self.textures.push(tex);
        }
        Ok(())
    }

    /// The parsed document backing this map.
    pub fn document(&self) -> &MapDocument {
        &self.document
    }

    /// Advances the movement state machine one tick.
    ///
    /// A freshly-requested move is collision-checked once; a rejected
    /// request is dropped silently. An accepted move pans the camera two
    /// pixels per tick and ends when both world offsets sit on
    /// whole-tile boundaries again, so a move always finishes
    /// tile-aligned before the next one can start.
    pub fn update(&mut self, player: &mut PlayerSprite) {
        if player.beginning_to_move {
            player.beginning_to_move = false;
            if self.can_player_move(player.direction) {
                player.is_moving = true;
            } else {
                return;
            }
        }
        if player.is_moving {
            self.camera.pan(player.direction, PAN_STEP, Units::Pixel);
        }
        let world = self.camera.offset_from_origin(Units::Pixel, CoordSpace::World);
        let tile = TILE_SIZE as i32;
        if world.x.abs() % tile == 0 && world.y.abs() % tile == 0 {
            player.is_moving = false;
        }
    }

    /// Whether the neighboring cell in `direction` is open: inside the
    /// map and empty (GID 0) in the collision layer. Out-of-range
    /// destinations and maps without a collision layer are closed.
    pub fn can_player_move(&self, direction: Direction) -> bool {
        let pos = self.camera.offset_from_origin(Units::Tile, CoordSpace::World);
        let (x, y) = (pos.x.unsigned_abs(), pos.y.unsigned_abs());

        let Some(collision) = self.document.layers.get(COLLISION_LAYER) else {
            return false;
        };
        let target = match direction {
            Direction::Down => (Some(x), y.checked_add(1)),
            Direction::Up => (Some(x), y.checked_sub(1)),
            Direction::Left => (x.checked_sub(1), Some(y)),
            Direction::Right => (x.checked_add(1), Some(y)),
            Direction::Idle => (None, None),
        };
        match target {
            (Some(tx), Some(ty)) => collision
                .tiles
                .get(tx, ty)
                .map_or(false, |tile| tile.gid == 0),
            _ => false,
        }
    }

    /// Player position in world tile units, derived from the camera.
    pub fn player_tile(&self) -> IVec2 {
        let pos = self.camera.offset_from_origin(Units::Tile, CoordSpace::World);
        IVec2::new(pos.x.abs(), pos.y.abs())
    }

    /// Draws every layer bottom to top, walking cells row-major and
    /// skipping empty ones. Each tile lands at its grid position offset
    /// by the camera's world pan and the absolute screen anchor.
    pub fn draw(&self) {
        let world = self.camera.offset_from_origin(Units::Pixel, CoordSpace::World);
        let screen = self.camera.offset_from_origin(Units::Pixel, CoordSpace::Screen);
        let tile_px = TILE_SIZE as i32;

        for layer in &self.document.layers {
            for tile in layer.tiles.iter() {
                if tile.gid == 0 {
                    continue;
                }
                let Some(ts_index) = tile.tileset else {
                    continue;
                };
                let Some(texture) = self.textures.get(ts_index) else {
                    continue;
                };
                let ts = &self.document.tilesets[ts_index];

                let dest_x = tile.x as i32 * tile_px + world.x + screen.x.abs();
                let dest_y = tile.y as i32 * tile_px + world.y + screen.y.abs();
                draw_texture_ex(
                    texture,
                    dest_x as f32,
                    dest_y as f32,
                    WHITE,
                    DrawTextureParams {
                        source: Some(ts.source_rect(tile.gid)),
                        dest_size: Some(vec2(TILE_SIZE as f32, TILE_SIZE as f32)),
                        ..Default::default()
                    },
                );
            }
        }
    }
}

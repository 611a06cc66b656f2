use crate::TILE_SIZE;
use macroquad::prelude::IVec2;

/// Pixel distance from the viewport's top-left corner to the player's
/// fixed on-screen draw position. Negative because the origin recedes
/// from the view.
const SCREEN_ANCHOR: IVec2 = IVec2::new(-239, -177);

/// A facing or panning direction. `Idle` requests nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the top of the map.
    Up,
    /// Toward the bottom of the map.
    Down,
    /// Toward the left edge of the map.
    Left,
    /// Toward the right edge of the map.
    Right,
    /// No direction.
    Idle,
}

/// Distance unit for camera queries and panning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    /// Whole map tiles; one tile is [`TILE_SIZE`] pixels.
    Tile,
    /// Single pixels.
    Pixel,
}

/// Coordinate system for camera queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordSpace {
    /// (0, 0) is the top-left corner of the physical viewport.
    Screen,
    /// (0, 0) is the top-left corner tile of the map.
    World,
}

/// The player viewport, tracked as two offset vectors.
///
/// The screen offset is the fixed anchor from the viewport origin to the
/// player's draw position; the world offset is the pan accumulator from
/// the map origin to the current view. Both are negative-signed: panning
/// the view right drives the world offset further negative on X.
#[derive(Debug, Clone)]
pub struct Camera {
    screen_offset: IVec2,
    world_offset: IVec2,
}

impl Camera {
    /// Creates a camera whose world offset points at a spawn tile.
    pub fn new(spawn_tile: IVec2) -> Self {
        Self {
            screen_offset: SCREEN_ANCHOR,
            world_offset: IVec2::new(
                -(spawn_tile.x * TILE_SIZE as i32),
                -(spawn_tile.y * TILE_SIZE as i32),
            ),
        }
    }

    /// Pans the view `distance` units in a direction by adjusting the
    /// world offset. The screen offset never changes; the viewport's
    /// top-left corner stays (0, 0) in screen coordinates.
    ///
    /// Distances are not validated; callers pan in collision-checked
    /// increments.
    pub fn pan(&mut self, direction: Direction, distance: i32, units: Units) {
        let d = match units {
            Units::Pixel => distance,
            Units::Tile => distance * TILE_SIZE as i32,
        };
        // World content slides opposite to the view
        match direction {
            Direction::Down => self.world_offset.y -= d,
            Direction::Up => self.world_offset.y += d,
            Direction::Left => self.world_offset.x += d,
            Direction::Right => self.world_offset.x -= d,
            Direction::Idle => {}
        }
    }

    /// Returns the selected offset vector, in pixels or in truncated
    /// tile units.
    pub fn offset_from_origin(&self, units: Units, space: CoordSpace) -> IVec2 {
        let v = match space {
            CoordSpace::Screen => self.screen_offset,
            CoordSpace::World => self.world_offset,
        };
        match units {
            Units::Pixel => v,
            Units::Tile => IVec2::new(v.x / TILE_SIZE as i32, v.y / TILE_SIZE as i32),
        }
    }
}

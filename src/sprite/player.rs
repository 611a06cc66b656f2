use crate::camera::Direction;
use crate::sprite::animated::AnimatedSprite;
use macroquad::prelude::*;

/// The player character: an [`AnimatedSprite`] with directional frame
/// keys and the movement flags the map's state machine drives.
///
/// The sprite sheet is expected to carry one sequence per facing,
/// keyed "Up", "Down", "Left" and "Right", with even frame indices as
/// resting poses and odd ones as mid-stride poses.
pub struct PlayerSprite {
    sprite: AnimatedSprite,
    /// Direction the player faces or moves.
    pub direction: Direction,
    /// Whether a tile-to-tile move is in flight.
    pub is_moving: bool,
    /// Set when a move was requested but not yet collision-checked;
    /// consumed by [`Map::update`](crate::Map::update).
    pub beginning_to_move: bool,
}

fn frame_key(direction: Direction) -> Option<&'static str> {
    match direction {
        Direction::Up => Some("Up"),
        Direction::Down => Some("Down"),
        Direction::Left => Some("Left"),
        Direction::Right => Some("Right"),
        Direction::Idle => None,
    }
}

impl PlayerSprite {
    /// Wraps an animated sprite, facing down and standing still.
    pub fn new(mut sprite: AnimatedSprite) -> Self {
        sprite.set_current_key("Down");
        Self {
            sprite,
            direction: Direction::Idle,
            is_moving: false,
            beginning_to_move: false,
        }
    }

    /// The wrapped animated sprite.
    pub fn sprite(&self) -> &AnimatedSprite {
        &self.sprite
    }

    /// Mutable access to the wrapped animated sprite.
    pub fn sprite_mut(&mut self) -> &mut AnimatedSprite {
        &mut self.sprite
    }

    /// Advances the player animation one tick.
    ///
    /// A direction change switches the frame sequence, rewinds it and
    /// flags the move as just requested. While a move is in flight the
    /// walk cycle runs on the sprite clock; while standing on an odd
    /// mid-stride frame with no movement key held, the animation steps
    /// once more so the player settles on an even resting pose.
    pub fn update(&mut self, elapsed_ms: f64, movement_key_held: bool) {
        if self.sprite.visible() {
            if let Some(key) = frame_key(self.direction) {
                if self.sprite.current_key() != Some(key) {
                    self.beginning_to_move = true;
                    self.sprite.set_current_key(key);
                    self.sprite.set_frame_index(0);
                }
            }
        }
        if self.is_moving {
            self.sprite.advance(elapsed_ms);
        } else if self.sprite.frame_index() % 2 != 0 && !movement_key_held {
            let n = self.sprite.frame_count();
            if n > 0 {
                self.sprite.set_frame_index((self.sprite.frame_index() + 1) % n);
            }
        }
    }

    /// Draws the player at the camera's screen anchor (passed as the
    /// raw negative offset). Odd mid-stride frames ride one pixel high,
    /// a cosmetic bounce with no effect on collision or position.
    pub fn draw(&self, screen_offset: IVec2) {
        let bounce = if self.sprite.frame_index() % 2 != 0 {
            -1.0
        } else {
            0.0
        };
        self.sprite.draw(vec2(
            screen_offset.x.abs() as f32,
            screen_offset.y.abs() as f32 + bounce,
        ));
    }
}

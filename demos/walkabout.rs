use gridwalk::{AnimatedSprite, CoordSpace, Direction, Map, PlayerSprite, Units};
use macroquad::prelude::*;

// 15 x 10 tiles of 32 px
fn window_conf() -> Conf {
    Conf {
        window_title: "Walkabout".into(),
        window_width: 480,
        window_height: 320,
        ..Default::default()
    }
}

/// Polls WASD into the player's movement flags. A new move may only be
/// requested while no move is in flight. Returns whether any movement
/// key is held.
fn poll_movement_keys(player: &mut PlayerSprite) -> bool {
    let held = is_key_down(KeyCode::W)
        || is_key_down(KeyCode::A)
        || is_key_down(KeyCode::S)
        || is_key_down(KeyCode::D);

    if !player.is_moving {
        if is_key_down(KeyCode::A) {
            player.direction = Direction::Left;
            player.beginning_to_move = true;
        } else if is_key_down(KeyCode::D) {
            player.direction = Direction::Right;
            player.beginning_to_move = true;
        } else if is_key_down(KeyCode::W) {
            player.direction = Direction::Up;
            player.beginning_to_move = true;
        } else if is_key_down(KeyCode::S) {
            player.direction = Direction::Down;
            player.beginning_to_move = true;
        }
    }
    held
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut map = Map::load("assets/town.tmx").await.expect("Failed to load map");

    let mut player = PlayerSprite::new(
        AnimatedSprite::from_atlas_file("assets/player_walking.xml")
            .expect("Failed to load player atlas"),
    );
    let player_texture = load_texture("assets/player_walking.png")
        .await
        .expect("Failed to load player texture");
    player_texture.set_filter(FilterMode::Nearest);
    player.sprite_mut().set_texture(player_texture);
    player.sprite_mut().set_visible(true);
    player.sprite_mut().set_enabled(true);
    player.sprite_mut().set_frame_duration_ms(115.0);

    loop {
        clear_background(BLACK);

        let movement_key_held = poll_movement_keys(&mut player);
        map.update(&mut player);
        player.update(get_frame_time() as f64 * 1000.0, movement_key_held);

        map.draw();
        player.draw(map.camera.offset_from_origin(Units::Pixel, CoordSpace::Screen));

        draw_text(&format!("FPS: {}", get_fps()), 8.0, 20.0, 20.0, RED);

        next_frame().await;
    }
}

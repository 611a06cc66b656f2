// tests/sprite_tests.rs

use gridwalk::{AnimatedSprite, Direction, PlayerSprite};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

const WALKING_ATLAS: &str = r#"
<TextureAtlas imagePath="player_walking.png">
  <SubTexture name="Down_0" x="0" y="0" width="32" height="48"/>
  <SubTexture name="Down_1" x="32" y="0" width="32" height="48"/>
  <SubTexture name="Down_2" x="64" y="0" width="32" height="48"/>
  <SubTexture name="Down_3" x="96" y="0" width="32" height="48"/>
  <SubTexture name="Up_0" x="0" y="48" width="32" height="48"/>
  <SubTexture name="Up_1" x="32" y="48" width="32" height="48"/>
  <SubTexture name="Left_0" x="0" y="96" width="32" height="48"/>
  <SubTexture name="Left_1" x="32" y="96" width="32" height="48"/>
  <SubTexture name="Right_0" x="0" y="144" width="32" height="48"/>
  <SubTexture name="Right_1" x="32" y="144" width="32" height="48"/>
</TextureAtlas>
"#;

fn temp_atlas() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("gridwalk_atlas_{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    let path = dir.join("player_walking.xml");
    fs::write(&path, WALKING_ATLAS).expect("failed to write atlas");
    path
}

#[test]
fn atlas_file_loads_one_sequence_per_facing() {
    let path = temp_atlas();
    let sprite =
        AnimatedSprite::from_atlas_file(path.to_str().expect("path utf8")).expect("load atlas");

    let sequences = sprite.sequences();
    assert_eq!(sequences.len(), 4);
    assert_eq!(sequences["Down"].len(), 4);
    assert_eq!(sequences["Up"].len(), 2);
    assert_eq!(sequences["Left"].len(), 2);
    assert_eq!(sequences["Right"].len(), 2);

    assert_eq!(sequences["Down"].frame_at(3).unwrap().x, 96.0);
    assert_eq!(sequences["Up"].frame_at(0).unwrap().y, 48.0);
}

#[test]
fn missing_atlas_file_is_a_typed_error() {
    let err = AnimatedSprite::from_atlas_file("no_such_atlas.xml").unwrap_err();
    assert!(matches!(err, gridwalk::AtlasError::Io { .. }));
}

#[test]
fn player_walks_a_full_cycle_while_a_move_is_in_flight() {
    let mut player = PlayerSprite::new(
        AnimatedSprite::from_atlas_str(WALKING_ATLAS).expect("parse atlas"),
    );
    player.sprite_mut().set_visible(true);
    player.sprite_mut().set_frame_duration_ms(100.0);

    player.direction = Direction::Down;
    player.is_moving = true;
    for expected in [1, 2, 3, 0] {
        player.update(100.0, true);
        assert_eq!(player.sprite().frame_index(), expected);
    }
}

#[test]
fn player_settles_on_a_resting_frame_after_the_move() {
    let mut player = PlayerSprite::new(
        AnimatedSprite::from_atlas_str(WALKING_ATLAS).expect("parse atlas"),
    );
    player.sprite_mut().set_visible(true);
    player.sprite_mut().set_frame_duration_ms(100.0);

    player.direction = Direction::Down;
    player.is_moving = true;
    player.update(100.0, true);
    assert_eq!(player.sprite().frame_index(), 1);

    player.is_moving = false;
    player.update(0.0, false);
    assert_eq!(player.sprite().frame_index() % 2, 0);
}

#[test]
fn facing_change_restarts_the_new_sequence() {
    let mut player = PlayerSprite::new(
        AnimatedSprite::from_atlas_str(WALKING_ATLAS).expect("parse atlas"),
    );
    player.sprite_mut().set_visible(true);
    player.sprite_mut().set_frame_duration_ms(100.0);

    player.direction = Direction::Down;
    player.is_moving = true;
    player.update(100.0, true);
    assert_eq!(player.sprite().frame_index(), 1);

    player.direction = Direction::Left;
    player.update(0.0, true);
    assert!(player.beginning_to_move);
    assert_eq!(player.sprite().current_key(), Some("Left"));
    assert_eq!(player.sprite().frame_index(), 0);
}

use crate::error::AtlasError;
use crate::sprite::animation::{parse_atlas_file, parse_atlas_str, FrameSequence};
use macroquad::prelude::*;
use std::collections::HashMap;

/// A sprite animated from named frame sequences over one sprite-sheet
/// texture.
///
/// Playback state is a current sequence key, a positional frame index
/// and an elapsed-time accumulator in milliseconds. The texture is
/// optional so playback logic can run headless; without one, `draw` is
/// a no-op.
#[derive(Debug)]
pub struct AnimatedSprite {
    texture: Option<Texture2D>,
    sequences: HashMap<String, FrameSequence>,
    current_key: Option<String>,
    frame_index: usize,
    frame_duration_ms: f64,
    elapsed_ms: f64,
    visible: bool,
    enabled: bool,
}

impl AnimatedSprite {
    /// Creates a sprite over prebuilt frame sequences. The sprite starts
    /// hidden and disabled with no sequence selected.
    pub fn new(sequences: HashMap<String, FrameSequence>) -> Self {
        Self {
            texture: None,
            sequences,
            current_key: None,
            frame_index: 0,
            frame_duration_ms: 0.0,
            elapsed_ms: 0.0,
            visible: false,
            enabled: false,
        }
    }

    /// Creates a sprite from an atlas description file.
    pub fn from_atlas_file(path: &str) -> Result<Self, AtlasError> {
        Ok(Self::new(parse_atlas_file(path)?))
    }

    /// Creates a sprite from an atlas description string.
    pub fn from_atlas_str(xml: &str) -> Result<Self, AtlasError> {
        Ok(Self::new(parse_atlas_str(xml)?))
    }

    /// Sets the sprite-sheet texture the frame rectangles index into.
    pub fn set_texture(&mut self, texture: Texture2D) {
        self.texture = Some(texture);
    }

    /// The frame sequences this sprite plays.
    pub fn sequences(&self) -> &HashMap<String, FrameSequence> {
        &self.sequences
    }

    /// Key of the sequence currently playing, if one is selected.
    pub fn current_key(&self) -> Option<&str> {
        self.current_key.as_deref()
    }

    /// Selects the sequence to play. The frame index is left alone;
    /// callers wanting a restart also set it to 0.
    pub fn set_current_key(&mut self, key: impl Into<String>) {
        self.current_key = Some(key.into());
    }

    /// Playback position within the current sequence.
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Sets the playback position, clamped into `[0, frame_count)`.
    pub fn set_frame_index(&mut self, index: usize) {
        let n = self.frame_count();
        self.frame_index = if n == 0 { 0 } else { index.min(n - 1) };
    }

    /// Number of frames in the current sequence; 0 when no sequence is
    /// selected or the key is absent.
    pub fn frame_count(&self) -> usize {
        self.current_key
            .as_ref()
            .and_then(|k| self.sequences.get(k))
            .map_or(0, FrameSequence::len)
    }

    /// Atlas rectangle of the current frame, if the current sequence
    /// resolves.
    pub fn current_frame(&self) -> Option<Rect> {
        self.current_key
            .as_ref()
            .and_then(|k| self.sequences.get(k))
            .and_then(|seq| seq.frame_at(self.frame_index))
    }

    /// Milliseconds each frame shows before the index advances.
    pub fn frame_duration_ms(&self) -> f64 {
        self.frame_duration_ms
    }

    /// Sets the per-frame duration in milliseconds.
    pub fn set_frame_duration_ms(&mut self, duration: f64) {
        self.frame_duration_ms = duration;
    }

    /// Whether `draw` renders the sprite.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the sprite.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether `update` advances the animation clock.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Starts or stops the animation clock.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Accumulates elapsed time and advances the frame when due. Does
    /// nothing while disabled.
    pub fn update(&mut self, elapsed_ms: f64) {
        if self.enabled {
            self.advance(elapsed_ms);
        }
    }

    /// Unconditional clock tick: once the accumulator reaches the frame
    /// duration, step one frame (wrapping) and zero the accumulator.
    /// Overshoot past the duration is discarded rather than carried, so
    /// the effective rate lags the nominal one slightly under jitter.
    pub(crate) fn advance(&mut self, elapsed_ms: f64) {
        self.elapsed_ms += elapsed_ms;
        if self.elapsed_ms >= self.frame_duration_ms {
            let n = self.frame_count();
            if n > 0 {
                self.frame_index = (self.frame_index + 1) % n;
            }
            self.elapsed_ms = 0.0;
        }
    }

    /// Draws the current frame with its top-left corner at `position`.
    /// No-op while hidden, without a texture, or without a resolvable
    /// frame.
    pub fn draw(&self, position: Vec2) {
        if !self.visible {
            return;
        }
        let (Some(texture), Some(frame)) = (&self.texture, self.current_frame()) else {
            return;
        };
        draw_texture_ex(
            texture,
            position.x,
            position.y,
            WHITE,
            DrawTextureParams {
                source: Some(frame),
                ..Default::default()
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite_with_frames(key: &str, count: usize) -> AnimatedSprite {
        let mut seq = FrameSequence::new();
        for i in 0..count {
            seq.insert(i as i32, Rect::new(i as f32 * 32.0, 0.0, 32.0, 48.0));
        }
        let mut sequences = HashMap::new();
        sequences.insert(key.to_owned(), seq);
        let mut sprite = AnimatedSprite::new(sequences);
        sprite.set_current_key(key);
        sprite.set_enabled(true);
        sprite
    }

    #[test]
    fn frame_advances_only_once_duration_is_reached() {
        let mut sprite = sprite_with_frames("Down", 4);
        sprite.set_frame_duration_ms(100.0);

        sprite.update(60.0);
        assert_eq!(sprite.frame_index(), 0);

        // 120ms accumulated crosses the 100ms duration exactly once
        sprite.update(60.0);
        assert_eq!(sprite.frame_index(), 1);

        // Overshoot was discarded, so another 60ms is not yet enough
        sprite.update(60.0);
        assert_eq!(sprite.frame_index(), 1);

        sprite.update(60.0);
        assert_eq!(sprite.frame_index(), 2);
    }

    #[test]
    fn frame_index_wraps_modulo_frame_count() {
        let mut sprite = sprite_with_frames("Down", 3);
        sprite.set_frame_duration_ms(10.0);
        for _ in 0..3 {
            sprite.update(10.0);
        }
        assert_eq!(sprite.frame_index(), 0);
    }

    #[test]
    fn disabled_sprite_keeps_its_frame() {
        let mut sprite = sprite_with_frames("Down", 4);
        sprite.set_frame_duration_ms(10.0);
        sprite.set_enabled(false);
        sprite.update(1000.0);
        assert_eq!(sprite.frame_index(), 0);
    }

    #[test]
    fn set_frame_index_clamps_below_frame_count() {
        let mut sprite = sprite_with_frames("Down", 4);
        sprite.set_frame_index(2);
        assert_eq!(sprite.frame_index(), 2);
        sprite.set_frame_index(99);
        assert_eq!(sprite.frame_index(), 3);
    }

    #[test]
    fn absent_sequence_key_is_inert() {
        let mut sprite = sprite_with_frames("Down", 4);
        sprite.set_current_key("Sideways");
        sprite.set_frame_duration_ms(10.0);

        assert_eq!(sprite.frame_count(), 0);
        assert_eq!(sprite.current_frame(), None);
        sprite.update(50.0);
        assert_eq!(sprite.frame_index(), 0);
    }

    #[test]
    fn current_frame_tracks_the_index() {
        let mut sprite = sprite_with_frames("Down", 4);
        sprite.set_frame_duration_ms(10.0);
        sprite.update(10.0);
        assert_eq!(sprite.current_frame().unwrap().x, 32.0);
    }
}

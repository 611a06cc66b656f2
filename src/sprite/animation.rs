use crate::error::AtlasError;
use macroquad::prelude::Rect;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

#[derive(Deserialize)]
struct RawAtlas {
    #[serde(default, rename = "SubTexture")]
    regions: Vec<RawRegion>,
}

#[derive(Deserialize)]
struct RawRegion {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@x")]
    x: u32,
    #[serde(rename = "@y")]
    y: u32,
    #[serde(rename = "@width")]
    width: u32,
    #[serde(rename = "@height")]
    height: u32,
}

/// How a region name classified: either it keys into a sequence, or the
/// lenient parse set it aside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RegionName {
    /// A usable region: sequence key plus ordering key within it.
    Keyed {
        key: String,
        order: i32,
    },
    Ignored,
}

/// Splits a region name on underscores into a sequence key and ordering
/// key. "Left_1" keys "Left" at 1; "Left" keys "Left" at the -1
/// absent-suffix sentinel; names without a letter-initial prefix, or
/// with a digit-led suffix that is not a pure number, are set aside.
pub(crate) fn classify_region_name(name: &str) -> RegionName {
    let parts: Vec<&str> = name.split('_').filter(|p| !p.is_empty()).collect();
    let Some(first) = parts.first() else {
        return RegionName::Ignored;
    };
    if !first.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return RegionName::Ignored;
    }
    if parts.len() == 1 {
        return RegionName::Keyed {
            key: name.to_owned(),
            order: -1,
        };
    }

    let suffix = parts[parts.len() - 1];
    let order = match suffix.parse::<i32>() {
        Ok(n) => n,
        // A digit-led suffix that is not a whole number is malformed;
        // a word suffix just means no ordering key
        Err(_) if suffix.starts_with(|c: char| c.is_ascii_digit()) => return RegionName::Ignored,
        Err(_) => -1,
    };
    RegionName::Keyed {
        key: (*first).to_owned(),
        order,
    }
}

/// A named animation: atlas source rectangles keyed by an ordering
/// integer, played back in ascending key order.
///
/// Ordering keys need not be contiguous; playback positions index the
/// frames positionally.
#[derive(Debug, Clone, Default)]
pub struct FrameSequence {
    frames: BTreeMap<i32, Rect>,
}

impl FrameSequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a frame under an ordering key, replacing any frame already
    /// holding that key.
    pub fn insert(&mut self, order: i32, frame: Rect) {
        self.frames.insert(order, frame);
    }

    /// Number of frames in the sequence.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the sequence holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns the frame at a playback position, counting frames in
    /// ascending ordering-key order.
    pub fn frame_at(&self, position: usize) -> Option<Rect> {
        self.frames.values().nth(position).copied()
    }
}

/// Parses an atlas description string into frame sequences grouped by
/// region-name prefix. Unusable region names are skipped, never an
/// error.
pub fn parse_atlas_str(xml: &str) -> Result<HashMap<String, FrameSequence>, AtlasError> {
    let raw: RawAtlas = quick_xml::de::from_str(xml)?;

    let mut sequences: HashMap<String, FrameSequence> = HashMap::new();
    let mut ignored = 0usize;
    for region in raw.regions {
        match classify_region_name(&region.name) {
            RegionName::Keyed { key, order } => {
                let frame = Rect::new(
                    region.x as f32,
                    region.y as f32,
                    region.width as f32,
                    region.height as f32,
                );
                sequences.entry(key).or_default().insert(order, frame);
            }
            RegionName::Ignored => ignored += 1,
        }
    }
    if ignored > 0 {
        log::debug!("atlas skipped {} region(s) with unusable names", ignored);
    }
    Ok(sequences)
}

/// Parses an atlas description file into frame sequences.
pub fn parse_atlas_file(path: &str) -> Result<HashMap<String, FrameSequence>, AtlasError> {
    let p = Path::new(path);
    let txt = std::fs::read_to_string(p).map_err(|source| AtlasError::Io {
        path: p.to_path_buf(),
        source,
    })?;
    parse_atlas_str(&txt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed(key: &str, order: i32) -> RegionName {
        RegionName::Keyed {
            key: key.to_owned(),
            order,
        }
    }

    #[test]
    fn classifies_prefixed_and_bare_names() {
        assert_eq!(classify_region_name("Left_2"), keyed("Left", 2));
        assert_eq!(classify_region_name("Idle"), keyed("Idle", -1));
        assert_eq!(classify_region_name("Left_Brendan_1"), keyed("Left", 1));
        assert_eq!(classify_region_name("Left_walk"), keyed("Left", -1));
    }

    #[test]
    fn sets_aside_unusable_names() {
        assert_eq!(classify_region_name("7"), RegionName::Ignored);
        assert_eq!(classify_region_name("3_Left"), RegionName::Ignored);
        assert_eq!(classify_region_name("_"), RegionName::Ignored);
        assert_eq!(classify_region_name(""), RegionName::Ignored);
        assert_eq!(classify_region_name("Left_1a"), RegionName::Ignored);
    }

    #[test]
    fn frame_at_follows_ascending_order_keys() {
        let mut seq = FrameSequence::new();
        seq.insert(4, Rect::new(2.0, 0.0, 32.0, 48.0));
        seq.insert(-1, Rect::new(0.0, 0.0, 32.0, 48.0));
        seq.insert(2, Rect::new(1.0, 0.0, 32.0, 48.0));

        assert_eq!(seq.len(), 3);
        assert_eq!(seq.frame_at(0).unwrap().x, 0.0);
        assert_eq!(seq.frame_at(1).unwrap().x, 1.0);
        assert_eq!(seq.frame_at(2).unwrap().x, 2.0);
        assert_eq!(seq.frame_at(3), None);
    }

    #[test]
    fn groups_atlas_regions_by_prefix() {
        let xml = r#"
<TextureAtlas imagePath="walking.png">
  <SubTexture name="Left_0" x="0" y="0" width="32" height="48"/>
  <SubTexture name="Left_1" x="32" y="0" width="32" height="48"/>
  <SubTexture name="Left_2" x="64" y="0" width="32" height="48"/>
  <SubTexture name="Left_3" x="96" y="0" width="32" height="48"/>
  <SubTexture name="Idle" x="128" y="0" width="32" height="48"/>
  <SubTexture name="9_bad" x="160" y="0" width="32" height="48"/>
</TextureAtlas>"#;
        let sequences = parse_atlas_str(xml).expect("parse");

        assert_eq!(sequences.len(), 2);
        let left = &sequences["Left"];
        assert_eq!(left.len(), 4);
        for i in 0..4 {
            assert_eq!(left.frame_at(i).unwrap().x, i as f32 * 32.0);
        }
        assert_eq!(sequences["Idle"].len(), 1);
        assert_eq!(sequences["Idle"].frame_at(0).unwrap().x, 128.0);
    }

    #[test]
    fn malformed_atlas_xml_is_a_typed_error() {
        let err = parse_atlas_str("<TextureAtlas><SubTexture").unwrap_err();
        assert!(matches!(err, AtlasError::Xml(_)));
    }
}

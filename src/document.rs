use crate::error::MapError;
use crate::layer::Layer;
use crate::loader::xml_loader;
use crate::properties::Properties;
use crate::tileset::TileSet;
use std::path::PathBuf;

/// A fully-resolved orthogonal map parsed from a Tiled XML document.
///
/// The structure is immutable after construction: tilesets are sorted by
/// `first_gid`, every nonzero tile is bound to its owning tileset, and
/// layer order matches document order.
#[derive(Debug, Clone)]
pub struct MapDocument {
    /// Map width in tile units.
    pub width: u32,
    /// Map height in tile units.
    pub height: u32,
    /// Map-level key/value properties.
    pub properties: Properties,
    /// Tilesets in increasing `first_gid` order.
    pub tilesets: Vec<TileSet>,
    /// Layers in document (paint) order.
    pub layers: Vec<Layer>,
    /// Names of object groups found in the document. They are parsed but
    /// not interpreted; interactive-object support would hang off these.
    pub object_groups: Vec<String>,
}

impl MapDocument {
    /// Parses a map from an XML string.
    pub fn load_from_str(xml: &str) -> Result<Self, MapError> {
        xml_loader::decode_map_str(xml)
    }

    /// Parses a map from a file. Also returns the directory of the map
    /// file, against which tileset image paths are resolved.
    pub fn load_from_file(path: &str) -> Result<(Self, PathBuf), MapError> {
        xml_loader::decode_map_file(path)
    }

    /// Looks up a layer by name.
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Returns the tileset owning a global tile ID: the one with the
    /// greatest `first_gid` not exceeding `gid`. `None` for empty cells
    /// and for IDs below every tileset's range.
    pub fn tileset_for_gid(&self, gid: u32) -> Option<&TileSet> {
        tileset_index_for_gid(&self.tilesets, gid).map(|i| &self.tilesets[i])
    }
}

pub(crate) fn tileset_index_for_gid(tilesets: &[TileSet], gid: u32) -> Option<usize> {
    if gid == 0 {
        return None;
    }
    let mut owner = None;
    for (i, ts) in tilesets.iter().enumerate() {
        if ts.first_gid <= gid {
            owner = Some(i);
        } else {
            break;
        }
    }
    owner
}

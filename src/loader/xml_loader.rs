// Raw serde mirror of the Tiled XML document tree; converted into the
// resolved model by decode_map_str.
use crate::document::{tileset_index_for_gid, MapDocument};
use crate::error::MapError;
use crate::grid::TileGrid;
use crate::layer::Layer;
use crate::properties::Properties;
use crate::tileset::TileSet;
use crate::TILE_SIZE;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
struct RawMap {
    #[serde(rename = "@width")]
    width: Option<u32>,
    #[serde(rename = "@height")]
    height: Option<u32>,
    properties: Option<RawProperties>,
    #[serde(default, rename = "tileset")]
    tilesets: Vec<RawTileset>,
    #[serde(default, rename = "layer")]
    layers: Vec<RawLayer>,
    #[serde(default, rename = "objectgroup")]
    object_groups: Vec<RawObjectGroup>,
}

#[derive(Deserialize, Default)]
struct RawProperties {
    #[serde(default, rename = "property")]
    entries: Vec<RawProperty>,
}

#[derive(Deserialize)]
struct RawProperty {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@value")]
    value: String,
}

#[derive(Deserialize)]
struct RawTileset {
    #[serde(rename = "@firstgid")]
    firstgid: u32,
    #[serde(rename = "@width")]
    width: u32,
    #[serde(rename = "@height")]
    height: u32,
    image: RawImage,
}

#[derive(Deserialize)]
struct RawImage {
    #[serde(rename = "@source")]
    source: String,
}

#[derive(Deserialize)]
struct RawLayer {
    #[serde(default, rename = "@name")]
    name: String,
    data: RawData,
}

#[derive(Deserialize, Default)]
struct RawData {
    #[serde(rename = "@encoding")]
    encoding: Option<String>,
    #[serde(rename = "@compression")]
    compression: Option<String>,
    #[serde(default, rename = "tile")]
    tiles: Vec<RawDataTile>,
}

#[derive(Deserialize)]
struct RawDataTile {
    #[serde(rename = "@gid")]
    gid: u32,
}

#[derive(Deserialize)]
struct RawObjectGroup {
    #[serde(default, rename = "@name")]
    name: String,
}

pub(crate) fn decode_map_str(xml: &str) -> Result<MapDocument, MapError> {
    let raw: RawMap = quick_xml::de::from_str(xml)?;

    let (Some(width), Some(height)) = (raw.width, raw.height) else {
        return Err(MapError::MissingDimensions);
    };
    if width == 0 || height == 0 {
        return Err(MapError::InvalidMap("map dimensions must be nonzero".into()));
    }

    let mut properties = Properties::new();
    if let Some(block) = raw.properties {
        for p in block.entries {
            properties.insert(p.name, p.value);
        }
    }

    let mut tilesets = Vec::with_capacity(raw.tilesets.len());
    for ts in raw.tilesets {
        if ts.width < TILE_SIZE {
            return Err(MapError::InvalidMap(format!(
                "tileset '{}' atlas is narrower than one tile",
                ts.image.source
            )));
        }
        tilesets.push(TileSet {
            first_gid: ts.firstgid,
            width: ts.width,
            height: ts.height,
            source: ts.image.source,
        });
    }
    // Sort by first_gid so GID ownership is a linear scan
    tilesets.sort_by_key(|t| t.first_gid);

    let mut layers = Vec::with_capacity(raw.layers.len());
    for (index, l) in raw.layers.into_iter().enumerate() {
        if let Some(encoding) = l.data.encoding.or(l.data.compression) {
            return Err(MapError::UnsupportedEncoding {
                layer: l.name,
                encoding,
            });
        }
        if l.data.tiles.len() != (width * height) as usize {
            return Err(MapError::InvalidLayerSize(l.name));
        }

        // Unflatten the row-major cell sequence into the grid
        let mut grid = TileGrid::new(width, height, index);
        for (i, cell) in l.data.tiles.iter().enumerate() {
            let x = i as u32 % width;
            let y = i as u32 / width;
            if let Some(tile) = grid.get_mut(x, y) {
                tile.gid = cell.gid;
            }
        }
        layers.push(Layer {
            name: l.name,
            tiles: grid,
        });
    }

    // Second pass, once every tileset is known: bind each nonzero tile to
    // the tileset owning its GID range.
    for layer in &mut layers {
        for tile in layer.tiles.iter_mut() {
            if tile.gid == 0 {
                continue;
            }
            match tileset_index_for_gid(&tilesets, tile.gid) {
                Some(i) => tile.tileset = Some(i),
                None => {
                    return Err(MapError::UnresolvedGid {
                        layer: layer.name.clone(),
                        gid: tile.gid,
                    })
                }
            }
        }
    }

    let object_groups: Vec<String> = raw.object_groups.into_iter().map(|g| g.name).collect();
    if !object_groups.is_empty() {
        log::debug!(
            "map declares {} object group(s); object layers are not interpreted",
            object_groups.len()
        );
    }

    Ok(MapDocument {
        width,
        height,
        properties,
        tilesets,
        layers,
        object_groups,
    })
}

pub(crate) fn decode_map_file(path: &str) -> Result<(MapDocument, PathBuf), MapError> {
    let p = Path::new(path);
    let txt = std::fs::read_to_string(p).map_err(|source| MapError::Io {
        path: p.to_path_buf(),
        source,
    })?;
    let document = decode_map_str(&txt)?;

    log::info!(
        "loaded map {}: {}x{} tiles, {} tileset(s), {} layer(s)",
        path,
        document.width,
        document.height,
        document.tilesets.len(),
        document.layers.len()
    );

    let map_dir = p
        .parent()
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./"));

    Ok((document, map_dir))
}

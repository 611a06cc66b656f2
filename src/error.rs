use quick_xml::DeError;
use std::io;
use std::path::PathBuf;
use std::{error, fmt};

/// Error type for the map document loader.
#[derive(Debug)]
pub enum MapError {
    /// File I/O error
    Io {
        /// Path of the file that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// XML parse error
    Xml(DeError),
    /// The map element is missing its width or height attribute
    MissingDimensions,
    /// A layer's tile count does not match width * height
    InvalidLayerSize(String),
    /// A layer's data payload uses an encoding or compression this loader does not read
    UnsupportedEncoding {
        /// Name of the offending layer.
        layer: String,
        /// The encoding or compression attribute value.
        encoding: String,
    },
    /// A nonzero global tile ID falls below every tileset's range
    UnresolvedGid {
        /// Name of the layer holding the tile.
        layer: String,
        /// The unresolvable global tile ID.
        gid: u32,
    },
    /// Structurally invalid map content
    InvalidMap(String),
    /// A required map property is absent
    MissingProperty(&'static str),
    /// The SpawnPoint property is not an "x,y" tile coordinate
    InvalidSpawnPoint(String),
    /// A tileset texture could not be loaded
    Texture {
        /// Path of the texture that failed to load.
        path: PathBuf,
        /// Loader error message.
        message: String,
    },
}

impl From<DeError> for MapError {
    fn from(err: DeError) -> Self {
        MapError::Xml(err)
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io { path, source } => {
                write!(f, "I/O error reading {}: {}", path.display(), source)
            }
            MapError::Xml(e) => write!(f, "XML parse error: {}", e),
            MapError::MissingDimensions => {
                write!(f, "Map element is missing its width or height attribute")
            }
            MapError::InvalidLayerSize(name) => write!(
                f,
                "Invalid layer size for layer '{}': tile count does not match map dimensions",
                name
            ),
            MapError::UnsupportedEncoding { layer, encoding } => write!(
                f,
                "Layer '{}' uses unsupported data encoding '{}'; only plain XML tile elements are read",
                layer, encoding
            ),
            MapError::UnresolvedGid { layer, gid } => write!(
                f,
                "Tile GID {} in layer '{}' does not belong to any tileset",
                gid, layer
            ),
            MapError::InvalidMap(msg) => write!(f, "Invalid map: {}", msg),
            MapError::MissingProperty(name) => write!(f, "Map property '{}' is missing", name),
            MapError::InvalidSpawnPoint(raw) => {
                write!(f, "SpawnPoint property '{}' is not an \"x,y\" pair", raw)
            }
            MapError::Texture { path, message } => {
                write!(f, "Loading texture {}: {}", path.display(), message)
            }
        }
    }
}

impl error::Error for MapError {}

/// Error type for the animation atlas loader.
#[derive(Debug)]
pub enum AtlasError {
    /// File I/O error
    Io {
        /// Path of the atlas file that failed to open or read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// XML parse error
    Xml(DeError),
}

impl From<DeError> for AtlasError {
    fn from(err: DeError) -> Self {
        AtlasError::Xml(err)
    }
}

impl fmt::Display for AtlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtlasError::Io { path, source } => {
                write!(f, "I/O error reading {}: {}", path.display(), source)
            }
            AtlasError::Xml(e) => write!(f, "XML parse error: {}", e),
        }
    }
}

impl error::Error for AtlasError {}

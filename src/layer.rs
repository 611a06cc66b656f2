use crate::grid::TileGrid;

/// A named, full-map grid of tiles.
///
/// Layer order in [`MapDocument::layers`](crate::MapDocument) is paint
/// order; the layer at [`COLLISION_LAYER`](crate::COLLISION_LAYER) holds
/// collision data. Cloning a layer deep-copies its grid.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Layer name as declared in the map document.
    pub name: String,
    /// The layer's tile grid.
    pub tiles: TileGrid,
}

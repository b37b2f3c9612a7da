//! Components for the map entity hierarchy.

pub mod layer;
pub mod map;
pub mod object;
pub mod tile;

pub use layer::{LayerId, TileLayer};
pub use map::{LayersInMap, MapGeometry, MapLoadFailed, TiledMap};
pub use object::{MapObject, ObjectLayer, ObjectShape};
pub use tile::{MapTile, TileInstance, TileLayerData};

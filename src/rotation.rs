//! Round-robin selection of the map to show.

use bevy::prelude::*;

/// The map list and how many times the player asked for the next map.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct MapRotation {
    maps: Vec<String>,
    index: usize,
}

impl MapRotation {
    /// Start at the first map. Returns `None` for an empty list.
    pub fn new(maps: Vec<String>) -> Option<Self> {
        if maps.is_empty() {
            return None;
        }
        Some(Self { maps, index: 0 })
    }

    /// Number of advances so far.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The map selected by the current index.
    pub fn current(&self) -> &str {
        &self.maps[self.index % self.maps.len()]
    }

    /// Move on to the next map and return it.
    pub fn advance(&mut self) -> &str {
        self.index += 1;
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAPS: [&str; 3] = ["orthogonal.tmx", "ortho2.tmx", "ortho3.tmx"];

    fn rotation() -> MapRotation {
        MapRotation::new(MAPS.iter().map(ToString::to_string).collect()).expect("maps")
    }

    #[test]
    fn index_counts_touches() {
        for touches in 0..10 {
            let mut rotation = rotation();
            for _ in 0..touches {
                rotation.advance();
            }
            assert_eq!(rotation.index(), touches);
            assert_eq!(rotation.current(), MAPS[touches % 3]);
        }
    }

    #[test]
    fn maps_come_round_robin() {
        let mut rotation = rotation();
        let mut seen = vec![rotation.current().to_string()];
        for _ in 0..6 {
            seen.push(rotation.advance().to_string());
        }
        assert_eq!(
            seen,
            vec![
                "orthogonal.tmx",
                "ortho2.tmx",
                "ortho3.tmx",
                "orthogonal.tmx",
                "ortho2.tmx",
                "ortho3.tmx",
                "orthogonal.tmx",
            ]
        );
    }

    #[test]
    fn empty_rotation_is_rejected() {
        assert!(MapRotation::new(Vec::new()).is_none());
    }

    #[test]
    fn single_map_repeats() {
        let mut rotation = MapRotation::new(vec!["only.tmx".to_string()]).expect("maps");
        assert_eq!(rotation.advance(), "only.tmx");
        assert_eq!(rotation.index(), 1);
    }
}

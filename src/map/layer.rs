use serde::{Deserialize, Serialize};

/// Which of the two stacked map levels an edit or query targets.
///
/// Every tile carries an independent set of fields for each layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MapLayer {
    #[default]
    Surface,
    Cave,
}

impl MapLayer {
    pub fn all() -> &'static [MapLayer] {
        &[MapLayer::Surface, MapLayer::Cave]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MapLayer::Surface => "Surface",
            MapLayer::Cave => "Cave",
        }
    }

    /// The other layer (used by the layer toggle shortcut)
    pub fn toggled(&self) -> MapLayer {
        match self {
            MapLayer::Surface => MapLayer::Cave,
            MapLayer::Cave => MapLayer::Surface,
        }
    }
}

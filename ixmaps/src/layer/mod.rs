//! Map layers: names, geometry stores and the projected layer cache.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

mod cache;
mod source;

pub use cache::{CacheStats, LayerCache};
pub use source::{FileLayerSource, LayerSource};

/// Name of a map layer served by the geometry store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerName {
    /// Country boundaries.
    Political,
    /// Altitude bands.
    Altitudes,
    /// Lakes.
    Lakes,
    /// Rivers.
    Rivers,
    /// Ice caps.
    Icecaps,
    /// Climate zones.
    Climate,
}

impl LayerName {
    /// All layers.
    pub const ALL: [LayerName; 6] = [
        LayerName::Political,
        LayerName::Altitudes,
        LayerName::Lakes,
        LayerName::Rivers,
        LayerName::Icecaps,
        LayerName::Climate,
    ];

    /// Identifier string of the layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerName::Political => "political",
            LayerName::Altitudes => "altitudes",
            LayerName::Lakes => "lakes",
            LayerName::Rivers => "rivers",
            LayerName::Icecaps => "icecaps",
            LayerName::Climate => "climate",
        }
    }
}

impl Display for LayerName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unknown layer identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layer: {0}")]
pub struct UnknownLayer(pub String);

impl FromStr for LayerName {
    type Err = UnknownLayer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayerName::ALL
            .into_iter()
            .find(|layer| layer.as_str() == s)
            .ok_or_else(|| UnknownLayer(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_layer_names() {
        for layer in LayerName::ALL {
            assert_eq!(layer.to_string().parse::<LayerName>(), Ok(layer));
        }
        assert_eq!(
            "background".parse::<LayerName>(),
            Err(UnknownLayer("background".into()))
        );
    }
}

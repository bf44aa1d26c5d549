use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geo::datum::Datum;
use crate::geo::impls::projection::{EqualEarth, IxMapsProjection, NaturalEarth};
use crate::geo::traits::projection::MapProjection;

/// Identifier of a map projection supported by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    /// Web Mercator, rendered natively by the map client. Pass-through.
    Mercator,
    /// 3d globe, rendered natively by the map client. Pass-through.
    Globe,
    /// Equal Earth equal-area pseudocylindrical projection.
    EqualEarth,
    /// Natural Earth compromise pseudocylindrical projection.
    NaturalEarth,
    /// Simulation specific cylindrical projection of the IxEarth world.
    IxMaps,
}

impl ProjectionKind {
    /// All supported projections.
    pub const ALL: [ProjectionKind; 5] = [
        ProjectionKind::Mercator,
        ProjectionKind::Globe,
        ProjectionKind::EqualEarth,
        ProjectionKind::NaturalEarth,
        ProjectionKind::IxMaps,
    ];

    /// Returns true if geometries in this projection are never transformed.
    pub fn is_passthrough(&self) -> bool {
        matches!(self, ProjectionKind::Mercator | ProjectionKind::Globe)
    }

    /// Identifier string, as used in cache keys and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectionKind::Mercator => "mercator",
            ProjectionKind::Globe => "globe",
            ProjectionKind::EqualEarth => "equalearth",
            ProjectionKind::NaturalEarth => "naturalearth",
            ProjectionKind::IxMaps => "ixmaps",
        }
    }

    /// Returns the projection math for the kind, scaled to the given datum. Pass-through kinds return `None`.
    pub fn get_projection(&self, datum: Datum) -> Option<Box<MapProjection>> {
        match self {
            ProjectionKind::Mercator | ProjectionKind::Globe => None,
            ProjectionKind::EqualEarth => Some(Box::new(EqualEarth::new(datum))),
            ProjectionKind::NaturalEarth => Some(Box::new(NaturalEarth::new(datum))),
            ProjectionKind::IxMaps => Some(Box::new(IxMapsProjection::new(datum))),
        }
    }
}

impl Display for ProjectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unknown projection identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown projection: {0}")]
pub struct UnknownProjection(pub String);

impl FromStr for ProjectionKind {
    type Err = UnknownProjection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownProjection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_identifiers() {
        for kind in ProjectionKind::ALL {
            assert_eq!(kind.as_str().parse::<ProjectionKind>(), Ok(kind));
        }
        assert_eq!("EqualEarth".parse(), Ok(ProjectionKind::EqualEarth));
        assert!("robinson".parse::<ProjectionKind>().is_err());
    }

    #[test]
    fn passthrough_kinds_have_no_math() {
        for kind in ProjectionKind::ALL {
            assert_eq!(
                kind.is_passthrough(),
                kind.get_projection(Datum::WGS84).is_none()
            );
        }
    }

    #[test]
    fn serde_names_match_identifiers() {
        for kind in ProjectionKind::ALL {
            let value = serde_json::to_value(kind).unwrap();
            assert_eq!(value, serde_json::json!(kind.as_str()));
        }
    }
}

use serde::Serialize;

/// Outcome of a single validation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True if the check passed.
    pub valid: bool,
    /// Why the check failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    /// Passed check.
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    /// Failed check.
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

/// Outcome of the overlap check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapResult {
    /// True if the candidate overlaps none of the existing features.
    pub valid: bool,
    /// Summary of the collisions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Identifiers of all overlapped features.
    pub overlaps: Vec<String>,
}

/// Outcome of the topology check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyResult {
    /// True if no issues were found.
    pub valid: bool,
    /// All issues joined into one message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Every issue found.
    pub issues: Vec<String>,
    /// Number of self-intersections.
    pub kinks: usize,
}

/// Outcome of the vertex count check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VertexCountResult {
    /// True if the count is inside the allowed range.
    pub valid: bool,
    /// Why the check failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set when the count is valid but large.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Number of distinct ring vertices.
    pub count: usize,
}

/// Outcome of the area check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaValidationResult {
    /// True if the canonical area is inside the bounds of the geometry kind.
    pub valid: bool,
    /// Why the check failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set when the area is close to one of the bounds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Computed area, if the geometry is polygonal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<crate::scale::AreaCalculation>,
}

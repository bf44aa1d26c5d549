/// Mapping from one coordinate space into another and back.
///
/// `project` returns `None` when the input cannot be represented in the output space (for example, when the math
/// degenerates into non-finite values). Callers decide whether that means "drop the vertex" or "fail".
pub trait Projection {
    /// Type of the input point.
    type InPoint;
    /// Type of the projected point.
    type OutPoint;

    /// Projects a point from the input space.
    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint>;
    /// Projects a point back into the input space.
    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint>;
}

/// Projection from geographic coordinates into a planar map, usable behind a trait object.
pub type MapProjection = dyn Projection<
        InPoint = crate::geo::GeoPoint2d,
        OutPoint = crate::cartesian::Point2d,
    > + Send
    + Sync;

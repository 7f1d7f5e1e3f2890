//! Point queries against a blob registry for interactive lookup.

use crate::registry::BlobRegistry;

/// Conventional query radius in grid units for hover-style lookups.
pub const DEFAULT_QUERY_RADIUS: f64 = 30.0;

/// Find a blob whose seed lies within `radius` of a query point.
///
/// Iterates blobs in registration (label) order and returns the first whose
/// seed is at Euclidean distance strictly less than `radius` from
/// `(x, y)`. When several seeds fall inside the radius this is the
/// earliest-registered one, not necessarily the geometrically closest.
/// Stateless: callers re-query on every cursor event and own any
/// presentation state themselves.
///
/// # Arguments
/// * `x` - Query x in image pixel coordinates (column)
/// * `y` - Query y in image pixel coordinates (row)
/// * `registry` - Registry to search
/// * `radius` - Match radius in grid units; [`DEFAULT_QUERY_RADIUS`] is the
///   conventional caller default
///
/// # Returns
/// The matching blob's label, or None if no seed qualifies
pub fn nearest_blob(x: f64, y: f64, registry: &BlobRegistry, radius: f64) -> Option<usize> {
    registry
        .blobs()
        .iter()
        .find(|blob| {
            let (sx, sy) = blob.seed_xy();
            let dx = sx - x;
            let dy = sy - y;
            (dx * dx + dy * dy).sqrt() < radius
        })
        .map(|blob| blob.label)
}

// Vector index access — trait plus the remote and in-memory backends.

pub mod client;
pub mod memory;
pub mod traits;

use traits::normalize_group;

/// Default id prefix under which group centroids are stored.
pub const DEFAULT_CENTROID_PREFIX: &str = "centroid_";

/// Index id of a group's centroid vector: the prefix followed by the
/// normalized group label.
pub fn centroid_id(prefix: &str, group: &str) -> String {
    format!("{prefix}{}", normalize_group(group))
}

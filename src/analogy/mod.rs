// Cross-group analogy resolution — translating an entity into another group
// through embedding-space arithmetic.

pub mod error;
pub mod resolver;
pub mod vector;

pub use error::{MissingVector, ResolveError};
pub use resolver::{AnalogyCandidate, AnalogyResolver, ResolverSettings};

// Entity documents — the free text features are extracted from.

pub mod fs;
pub mod traits;

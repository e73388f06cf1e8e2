// Adapters layer: concrete backends for the domain's outward-facing ports.

pub mod random;
pub mod random_org;

pub use random::{OsRandom, RandomBackend, SeededRandom};
pub use random_org::RandomOrgSource;

pub mod artifacts;
pub mod observability;

pub use artifacts::{ArtifactLoader, LoadedArtifacts};

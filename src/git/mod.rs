pub mod executor;
pub mod repository;

pub use executor::{CommandOutput, GitExecutor};
pub use repository::{GitCollaborator, Repository};

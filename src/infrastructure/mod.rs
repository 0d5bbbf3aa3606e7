// Infrastructure layer
pub mod executor;
pub mod file_system;
pub mod preflight;

pub use executor::*;
pub use file_system::*;
pub use preflight::*;

// Core domain layer
pub mod interfaces;
pub mod models;
pub mod resolver;
pub mod rules;

pub use interfaces::*;
pub use models::*;
pub use resolver::*;
pub use rules::*;

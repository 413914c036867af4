pub mod loader;
pub mod models;
pub mod repository;

pub use loader::*;
pub use models::*;
pub use repository::*;

pub mod config;
pub mod list;
pub mod model;
pub mod validate;

pub use config::*;
pub use list::*;
pub use model::*;
pub use validate::*;

pub mod hook;
pub mod models;
pub mod response;

pub use hook::*;
pub use models::*;
pub use response::*;

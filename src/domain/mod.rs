pub mod user;
pub mod page;

pub use user::*;
pub use page::*;

mod entity;
mod error;

pub use entity::next_user_id;
pub use error::UserError;

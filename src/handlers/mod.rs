pub mod auth;
pub mod comments;
pub mod likes;
pub mod posts;
pub mod users;

pub use auth::*;
pub use comments::*;
pub use likes::*;
pub use posts::*;
pub use users::*;

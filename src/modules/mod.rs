pub mod auth;
pub mod documents;
pub mod roles;
pub mod users;

pub use self::documents::model::Document;
pub use self::users::model::User;

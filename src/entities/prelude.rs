pub use super::facebook_users::Entity as FacebookUsers;
pub use super::pokemon::Entity as Pokemon;

pub mod prelude;

pub mod facebook_users;
pub mod pokemon;

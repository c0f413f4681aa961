pub mod pokemon;
pub mod user;

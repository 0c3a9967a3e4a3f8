pub mod auth;
pub mod people;

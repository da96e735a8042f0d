pub mod public;
pub mod users;

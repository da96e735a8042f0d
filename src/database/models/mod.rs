pub mod user;

pub use user::{stored_now, NewUser, User, UserInput};

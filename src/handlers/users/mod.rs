pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;
pub mod utils;
pub mod validation;

// Re-export handler functions for use in routing
pub use create::post as user_create;
pub use delete::delete as user_delete;
pub use list::get as user_list;
pub use show::get as user_show;
pub use update::put as user_update;

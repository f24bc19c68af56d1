mod app_state;
mod auth_form;
mod gallery;
mod list_manager;
mod session_store;

pub use app_state::*;
pub use auth_form::*;
pub use gallery::*;
pub use list_manager::*;
pub use session_store::*;

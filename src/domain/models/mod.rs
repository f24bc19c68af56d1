mod api;
mod code_filter;
mod confirm;
mod credentials;
mod route;
mod saved_list;
mod session;
mod status_code;

pub use api::*;
pub use code_filter::*;
pub use confirm::*;
pub use credentials::*;
pub use route::*;
pub use saved_list::*;
pub use session::*;
pub use status_code::*;

//! Controllers

mod home;
mod user;

pub use home::HomeController;
pub use user::{User, UserController, UserStore};

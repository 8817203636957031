//! HTML template rendering handlers for the brewer screens.

mod brewers;
mod error;
mod login;

pub use brewers::{
    create_page, create_submit, delete_page, delete_submit, edit_page, edit_submit,
    format_number, index_handler, root_handler,
};
pub use error::PageError;
pub use login::{login_page, login_submit, logout_handler};

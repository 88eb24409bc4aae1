pub mod context_form;
pub mod handlers;
pub mod header;
pub mod login_form;
pub mod project_form;
pub mod results;
pub mod signup_form;
pub mod utils;

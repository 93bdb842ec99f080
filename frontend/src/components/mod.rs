pub mod layout;
pub mod password_field;
pub mod toast;

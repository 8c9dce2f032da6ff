pub mod activity_form;
pub mod help;

pub mod alert;
pub mod date_field;
pub mod delete_guard;
pub mod edit_prefill;
pub mod page;

pub mod field_store;
pub mod flow;
pub mod validator;

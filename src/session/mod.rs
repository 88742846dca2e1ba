pub mod controller;
pub mod session_model;

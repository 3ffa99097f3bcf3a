pub mod secrets;
pub mod validation;

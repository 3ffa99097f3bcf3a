pub mod employee;
pub mod fallback;
pub mod health;

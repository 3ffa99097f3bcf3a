pub mod existence_gate;

pub use existence_gate::{existence_gate, GatedEmployeeId};

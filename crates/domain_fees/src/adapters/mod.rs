//! Port adapters for the fee domain

pub mod memory;

pub use memory::{InMemoryInstallmentPort, InMemorySessionPort, InMemoryStudentPort};

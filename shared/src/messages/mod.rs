pub mod change_set;
pub mod error;
pub mod frame;
pub mod kind;
pub mod payloads;

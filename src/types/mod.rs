//! Core types for xpost.

pub mod generation;
pub mod message;
pub mod response;

pub use generation::*;
pub use message::*;
pub use response::*;

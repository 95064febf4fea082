pub mod generation_handler;

pub use generation_handler::*;

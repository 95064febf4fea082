pub mod debug_handler;

pub use debug_handler::*;

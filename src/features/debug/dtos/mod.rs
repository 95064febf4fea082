pub mod debug_dto;

pub use debug_dto::*;

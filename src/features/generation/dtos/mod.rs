pub mod generation_dto;

pub use generation_dto::*;

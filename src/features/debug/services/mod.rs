mod debug_service;

pub use debug_service::DebugService;

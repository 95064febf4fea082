pub mod prompt_dto;

pub use prompt_dto::{
    CategoryPromptsDto, ClearPromptsResponseDto, ExportQueryParams, PromptExportDto,
    RestorePromptsDto, RestorePromptsResponseDto, UpdatePromptsResponseDto,
};

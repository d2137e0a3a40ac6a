pub mod common_dto;
pub mod design_dto;
pub mod lr_dto;
pub mod share_dto;

pub use common_dto::ApiResponse;

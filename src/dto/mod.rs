//! DTOs de request y response de la API

pub mod admin_dto;
pub mod auth_dto;
pub mod common_dto;
pub mod contract_dto;
pub mod user_profile_dto;
pub mod vehicle_dto;
pub mod vehicle_model_dto;

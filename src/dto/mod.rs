pub mod checkpoint_dto;
pub mod park_dto;

pub mod dto;
pub mod dtr_service;

pub mod lead_magnet_dto;

pub use lead_magnet_dto::{CreateLeadMagnetDto, LeadMagnetResponseDto, UpdateLeadMagnetDto};

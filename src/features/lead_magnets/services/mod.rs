pub mod lead_magnet_service;

pub use lead_magnet_service::LeadMagnetService;

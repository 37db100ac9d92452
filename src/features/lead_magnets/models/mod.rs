pub mod lead_magnet;

pub use lead_magnet::LeadMagnet;

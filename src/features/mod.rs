pub mod categories;
pub mod identity;
pub mod lead_magnets;
pub mod posts;

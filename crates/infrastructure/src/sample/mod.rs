//! Demo/sample data standing in for the not-yet-built backends.

mod analysis;
mod brands;

pub use analysis::{analysis_stages, demo_playbook_html};
pub use brands::{brand_by_id, sample_brands};

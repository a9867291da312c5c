//! Default reference data.

use tracing::info;

use super::{LookupStore, StoreError};

pub const DEFAULT_CUISINES: &[&str] = &[
    "Chinese",
    "French",
    "Indian",
    "Italian",
    "Japanese",
    "Korean",
    "Malay",
    "Mexican",
    "Thai",
    "Vietnamese",
];

pub const DEFAULT_TAGS: &[&str] = &[
    "dinner",
    "easy",
    "healthy",
    "light",
    "popular",
    "quick",
    "spicy",
    "vegan",
    "vegetarian",
];

/// Counts after seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub cuisines: usize,
    pub tags: usize,
}

/// Ensure every default cuisine and tag exists. Existing entries are kept.
pub fn seed_reference_data(lookups: &dyn LookupStore) -> Result<SeedReport, StoreError> {
    for name in DEFAULT_CUISINES {
        lookups.add_cuisine(name)?;
    }
    for name in DEFAULT_TAGS {
        lookups.add_tag(name)?;
    }

    let report = SeedReport {
        cuisines: lookups.cuisines()?.len(),
        tags: lookups.tags()?.len(),
    };
    info!(
        cuisines = report.cuisines,
        tags = report.tags,
        "Reference data seeded"
    );
    Ok(report)
}

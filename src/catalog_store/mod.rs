mod models;
mod schema;
mod store;
mod trait_def;
mod validation;

pub use models::*;
pub use schema::LIBRARY_VERSIONED_SCHEMAS;
pub(crate) use store::{bump_play_count, entry_from_row, find_active_entry, ENTRY_COLUMNS};
pub use store::SqliteLibraryStore;
pub use trait_def::CatalogStore;
pub use validation::{
    validate_compound_key, validate_new_entry, validate_non_empty, validate_positive,
    ValidationError, ValidationResult,
};

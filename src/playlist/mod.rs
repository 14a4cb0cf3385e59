mod models;
mod store;
mod trait_def;

pub use models::PlaylistEntry;
pub(crate) use store::{remove_track, track_number_of, write_cursor};
pub use trait_def::PlaylistStore;

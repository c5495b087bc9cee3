pub mod file_loader;

pub use file_loader::{guess_media_type, load_candidate, load_candidates};

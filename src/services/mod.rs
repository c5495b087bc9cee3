pub mod extraction_service;
pub mod item_validator;
pub mod progress;
pub mod result_encoder;

pub use extraction_service::{ExtractionService, Extractor};
pub use item_validator::{ItemValidator, QueueMutation};
pub use progress::{LogProgressReporter, ProgressReporter, ProgressUpdate};
pub use result_encoder::{encode, export, ExportDocument};

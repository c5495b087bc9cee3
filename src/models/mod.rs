pub mod candidate;
pub mod loaders;
pub mod response;
pub mod submission;

pub use candidate::CandidateFile;
pub use loaders::{load_candidate, load_candidates};
pub use response::{ExtractEntry, ExtractResponse, HealthResponse};
pub use submission::{BatchSummary, SubmissionResult};

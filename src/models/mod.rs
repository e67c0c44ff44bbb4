pub mod evaluation;
pub mod loaders;
pub mod report;
pub mod sections;

pub use evaluation::{
    AggregateResult, Chunk, ChunkOutcome, ChunkResult, Criterion, Evaluation, ResponseFormat,
    PARSE_FAILURE_EXPLANATION,
};
pub use loaders::{file_name, list_files, load_text};
pub use report::{DocumentReport, PUBLISHABLE_THRESHOLD};
pub use sections::{Section, Sections, SECTION_NAMES};

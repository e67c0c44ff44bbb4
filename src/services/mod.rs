pub mod chunker;
pub mod pdf_extractor;
pub mod prompt_builder;
pub mod report_writer;
pub mod response_parser;
pub mod section_parser;

pub use chunker::split_into_chunks;
pub use prompt_builder::build_prompt;
pub use report_writer::ReportWriter;
pub use response_parser::{detect_shape, parse, try_parse, ResponseShape};

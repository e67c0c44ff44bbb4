//! 提示词构建
//!
//! 提示词中要求的输出格式必须与 `response_parser` 能解析的格式一致

use crate::models::{Chunk, Criterion, ResponseFormat};

/// 为单个分块构建评估提示词
pub fn build_prompt(chunk: &Chunk<'_>, criterion: Criterion, format: ResponseFormat) -> String {
    format!(
        "Evaluate the {criterion} of the following research paper excerpt. \
         This excerpt is part {index} of {total} of a larger document, \
         so judge only what this part shows.\n\
         Provide a score between 0 and 1 (1 being {top}) and a brief explanation.\n\n\
         {instructions}\n\n\
         --- BEGIN EXCERPT ---\n\
         {text}\n\
         --- END EXCERPT ---",
        criterion = criterion.name(),
        index = chunk.index,
        total = chunk.total,
        top = criterion.top_score_meaning(),
        instructions = format_instructions(format),
        text = chunk.text,
    )
}

fn format_instructions(format: ResponseFormat) -> &'static str {
    match format {
        ResponseFormat::Markers => {
            "Respond in exactly this format and nothing else:\n\
             Score: <number between 0 and 1>\n\
             Explanation: <one or two sentences>"
        }
        ResponseFormat::Json => {
            "Respond with a single JSON object and nothing else:\n\
             {\"score\": <number between 0 and 1>, \"explanation\": \"<one or two sentences>\"}"
        }
    }
}

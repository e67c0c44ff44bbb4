//! 模型输出解析 - 业务能力层
//!
//! 支持两种输出形态：
//! 1. 文本标记：`Score: 0.8\nExplanation: ...`
//! 2. JSON 对象（可能夹在其他文字中间）：`{"score": 0.8, "explanation": "..."}`
//!
//! 先做能力判断（是否包含可解码的 JSON 对象），再按形态解析，
//! 而不是依赖解析失败后的回退

use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::error::ParseError;
use crate::models::Evaluation;

const SCORE_MARKER: &str = "Score:";
const EXPLANATION_MARKER: &str = "Explanation:";

/// JSON 形态的模型输出
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonEvaluation {
    /// 数字或数字字符串
    pub score: JsonValue,
    pub explanation: String,
}

/// 模型输出的形态
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape<'a> {
    Json(JsonEvaluation),
    Markers(&'a str),
    Unrecognized,
}

/// 判断模型输出属于哪种形态
pub fn detect_shape(raw: &str) -> ResponseShape<'_> {
    if let Some(parsed) = embedded_json(raw)
        .and_then(|json| serde_json::from_str::<JsonEvaluation>(json).ok())
    {
        return ResponseShape::Json(parsed);
    }

    if raw.contains(SCORE_MARKER) && raw.contains(EXPLANATION_MARKER) {
        return ResponseShape::Markers(raw);
    }

    ResponseShape::Unrecognized
}

/// 解析模型输出，区分失败原因
pub fn try_parse(raw: &str) -> Result<Evaluation, ParseError> {
    match detect_shape(raw) {
        ResponseShape::Json(parsed) => {
            let score = match &parsed.score {
                JsonValue::Number(n) => score_from_f64(n.as_f64(), &n.to_string())?,
                JsonValue::String(s) => parse_score(s.trim())?,
                other => {
                    return Err(ParseError::InvalidScore {
                        token: other.to_string(),
                    })
                }
            };
            Ok(Evaluation {
                score,
                explanation: parsed.explanation.trim().to_string(),
            })
        }
        ResponseShape::Markers(text) => parse_markers(text),
        ResponseShape::Unrecognized => Err(ParseError::Unrecognized),
    }
}

/// 解析模型输出，任何失败都折叠为 `0 分 + "Failed to parse the response."`
pub fn parse(raw: &str) -> Evaluation {
    try_parse(raw).unwrap_or_else(|_| Evaluation::parse_failure())
}

/// 第一个 `{` 到最后一个 `}` 之间的内容
fn embedded_json(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

fn parse_markers(text: &str) -> Result<Evaluation, ParseError> {
    let (_, after_score) = text
        .split_once(SCORE_MARKER)
        .ok_or(ParseError::Unrecognized)?;
    let (_, after_explanation) = text
        .split_once(EXPLANATION_MARKER)
        .ok_or(ParseError::Unrecognized)?;

    // 兼容 Markdown 加粗：`**Score:** 0.8`
    let token = after_score
        .split_whitespace()
        .map(|t| t.trim_matches('*'))
        .find(|t| !t.is_empty())
        .unwrap_or_default();

    Ok(Evaluation {
        score: parse_score(token)?,
        explanation: after_explanation
            .trim()
            .trim_start_matches('*')
            .trim_start()
            .to_string(),
    })
}

fn parse_score(token: &str) -> Result<f64, ParseError> {
    let value = token.parse::<f64>().map_err(|_| ParseError::InvalidScore {
        token: token.to_string(),
    })?;
    score_from_f64(Some(value), token)
}

fn score_from_f64(value: Option<f64>, token: &str) -> Result<f64, ParseError> {
    let value = value.ok_or_else(|| ParseError::InvalidScore {
        token: token.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ParseError::NonFiniteScore {
            token: token.to_string(),
        });
    }
    if !(0.0..=1.0).contains(&value) {
        warn!("模型给出的分数 {} 超出 [0, 1]，按原值计入", value);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PARSE_FAILURE_EXPLANATION;

    #[test]
    fn test_parse_markers() {
        let evaluation = parse("Score: 0.8\nExplanation: Well argued.");
        assert_eq!(evaluation.score, 0.8);
        assert_eq!(evaluation.explanation, "Well argued.");
    }

    #[test]
    fn test_parse_markers_with_markdown_and_preamble() {
        let evaluation =
            parse("Here is my assessment.\n**Score:** 0.65\n**Explanation:** Mostly consistent.");
        assert_eq!(evaluation.score, 0.65);
        assert_eq!(evaluation.explanation, "Mostly consistent.");
    }

    #[test]
    fn test_parse_json() {
        let evaluation = parse(r#"{"score": 0.6, "explanation": "ok"}"#);
        assert_eq!(evaluation.score, 0.6);
        assert_eq!(evaluation.explanation, "ok");
    }

    #[test]
    fn test_parse_json_embedded_in_prose() {
        let evaluation = parse(
            "Sure! Here is the result:\n```json\n{\"score\": 0.6, \"explanation\": \"ok\"}\n```\nHope this helps.",
        );
        assert_eq!(evaluation.score, 0.6);
        assert_eq!(evaluation.explanation, "ok");
    }

    #[test]
    fn test_parse_json_with_string_score() {
        let evaluation = parse(r#"{"score": "0.7", "explanation": "fine"}"#);
        assert_eq!(evaluation.score, 0.7);
    }

    #[test]
    fn test_malformed_json_falls_back_to_markers() {
        let evaluation = parse("Score: 0.5\nExplanation: uses {braces without json}");
        assert_eq!(evaluation.score, 0.5);
        assert_eq!(evaluation.explanation, "uses {braces without json}");
    }

    #[test]
    fn test_malformed_output_collapses_to_zero() {
        for raw in [
            "",
            "The paper is great.",
            "Score: high\nExplanation: great",
            "Score: 0.9",
            r#"{"score": 0.9, "explanation": "unterminated"#,
            r#"{"rating": 0.9}"#,
            "Score: NaN\nExplanation: ?",
        ] {
            let evaluation = parse(raw);
            assert_eq!(evaluation.score, 0.0, "raw={raw:?}");
            assert_eq!(evaluation.explanation, PARSE_FAILURE_EXPLANATION, "raw={raw:?}");
        }
    }

    #[test]
    fn test_try_parse_reports_reason() {
        assert_eq!(try_parse("no markers"), Err(ParseError::Unrecognized));
        assert_eq!(
            try_parse("Score: high\nExplanation: x"),
            Err(ParseError::InvalidScore {
                token: "high".to_string()
            })
        );
        assert_eq!(
            try_parse("Score: inf\nExplanation: x"),
            Err(ParseError::NonFiniteScore {
                token: "inf".to_string()
            })
        );
    }

    #[test]
    fn test_out_of_range_score_is_kept_as_parsed() {
        let evaluation = parse("Score: 8\nExplanation: out of ten");
        assert_eq!(evaluation.score, 8.0);
        assert_eq!(evaluation.explanation, "out of ten");
        assert_eq!(parse(r#"{"score": -0.2, "explanation": "x"}"#).score, -0.2);
    }

    #[test]
    fn test_detect_shape() {
        assert!(matches!(
            detect_shape(r#"{"score": 1, "explanation": "x"}"#),
            ResponseShape::Json(_)
        ));
        assert!(matches!(
            detect_shape("Score: 1\nExplanation: x"),
            ResponseShape::Markers(_)
        ));
        assert_eq!(detect_shape("}{"), ResponseShape::Unrecognized);
    }
}

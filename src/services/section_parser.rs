//! 论文章节切分
//!
//! - 清理文本：合并断行连字符、压缩空白
//! - 查找各章节标题第一次出现的位置（优先首字母大写或全大写的写法）
//! - 章节内容从标题之后延伸到下一个已识别标题（含 References）或文本末尾

use regex::Regex;
use std::sync::LazyLock;

use crate::models::Sections;

/// (章节名, 标题的可选写法)；References 等只作为终止标记
const HEADERS: [(&str, &[&str]); 8] = [
    ("Abstract", &["Abstract"]),
    ("Introduction", &["Introduction"]),
    ("Methodology", &["Methodology", "Methods", "Method"]),
    ("Results", &["Results"]),
    ("Discussion", &["Discussion"]),
    ("Conclusion", &["Conclusions", "Conclusion"]),
    ("References", &["References", "Bibliography"]),
    ("Acknowledgements", &["Acknowledgements", "Acknowledgments"]),
];

struct HeaderPattern {
    name: &'static str,
    /// 首字母大写或全大写
    strict: Regex,
    /// 忽略大小写
    loose: Regex,
}

impl HeaderPattern {
    fn new(name: &'static str, spellings: &[&str]) -> Self {
        let mut cased: Vec<String> = spellings.iter().map(|s| s.to_string()).collect();
        cased.extend(spellings.iter().map(|s| s.to_uppercase()));

        let strict = format!(r"\b(?:{})\b[:\s]*", cased.join("|"));
        let loose = format!(r"(?i)\b(?:{})\b[:\s]*", spellings.join("|"));

        Self {
            name,
            strict: Regex::new(&strict).expect("章节标题正则无效"),
            loose: Regex::new(&loose).expect("章节标题正则无效"),
        }
    }

    /// 标题的 (起始, 结束) 字节位置
    fn locate(&self, text: &str) -> Option<(usize, usize)> {
        self.strict
            .find(text)
            .or_else(|| self.loose.find(text))
            .map(|m| (m.start(), m.end()))
    }
}

static HEADER_PATTERNS: LazyLock<Vec<HeaderPattern>> = LazyLock::new(|| {
    HEADERS
        .iter()
        .map(|(name, spellings)| HeaderPattern::new(name, spellings))
        .collect()
});

/// 合并断行连字符并压缩空白
pub fn clean_text(text: &str) -> String {
    text.replace("-\n", "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 把原始文本切分为固定章节
pub fn parse_sections(raw_text: &str) -> Sections {
    let text = clean_text(raw_text);

    let found: Vec<(&'static str, usize, usize)> = HEADER_PATTERNS
        .iter()
        .filter_map(|p| p.locate(&text).map(|(start, end)| (p.name, start, end)))
        .collect();

    Sections::new(|name| {
        let &(_, start, end) = found.iter().find(|(n, _, _)| *n == name)?;
        let bound = found
            .iter()
            .map(|&(_, other_start, _)| other_start)
            .filter(|&other_start| other_start > start)
            .min()
            .unwrap_or(text.len());
        text.get(end..bound).map(|content| content.trim().to_string())
    })
}

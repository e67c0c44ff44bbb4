/// 论文章节（按固定顺序）
pub const SECTION_NAMES: [&str; 6] = [
    "Abstract",
    "Introduction",
    "Methodology",
    "Results",
    "Discussion",
    "Conclusion",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: &'static str,
    pub content: String,
}

/// 章节名 → 正文，顺序与 `SECTION_NAMES` 一致，未找到的章节内容为空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    entries: Vec<Section>,
}

impl Sections {
    pub fn new(mut lookup: impl FnMut(&'static str) -> Option<String>) -> Self {
        let entries = SECTION_NAMES
            .iter()
            .map(|&name| Section {
                name,
                content: lookup(name).unwrap_or_default(),
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| s.content.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.entries.iter()
    }

    /// 渲染为预处理文本文件格式：`Name:\ncontent\n\n`
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|s| format!("{}:\n{}\n\n", s.name, s.content))
            .collect()
    }
}

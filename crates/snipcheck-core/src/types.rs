//! 公共类型（对外暴露）
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 语言标签（封闭集合，每次分析只确定一次）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "javascript", alias = "js")]
    JavaScript,
    #[serde(rename = "typescript", alias = "ts")]
    TypeScript,
    #[serde(rename = "python", alias = "py")]
    Python,
    #[serde(rename = "c")]
    C,
    #[serde(rename = "cpp", alias = "c++")]
    Cpp,
    #[serde(rename = "java")]
    Java,
    #[serde(rename = "csharp", alias = "c#", alias = "cs")]
    CSharp,
    #[serde(rename = "html")]
    Html,
    #[serde(rename = "css")]
    Css,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Language {
    /// 全部语言（含 Unknown），顺序即列表输出顺序
    pub const ALL: [Language; 10] = [
        Language::JavaScript,
        Language::TypeScript,
        Language::Python,
        Language::C,
        Language::Cpp,
        Language::Java,
        Language::CSharp,
        Language::Html,
        Language::Css,
        Language::Unknown,
    ];

    /// 展示名称
    pub fn name(self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Python => "Python",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Java => "Java",
            Language::CSharp => "C#",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 无法识别的语言名（CLI `--language` 参数等）
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language: {0}")]
pub struct ParseLanguageError(pub String);

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = match s.trim().to_ascii_lowercase().as_str() {
            "javascript" | "js" => Language::JavaScript,
            "typescript" | "ts" => Language::TypeScript,
            "python" | "py" => Language::Python,
            "c" => Language::C,
            "cpp" | "c++" | "cxx" => Language::Cpp,
            "java" => Language::Java,
            "csharp" | "c#" | "cs" => Language::CSharp,
            "html" | "htm" => Language::Html,
            "css" => Language::Css,
            "unknown" => Language::Unknown,
            _ => return Err(ParseLanguageError(s.to_string())),
        };
        Ok(lang)
    }
}

/// 问题等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Syntax,
    Logical,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Syntax => "syntax",
            Severity::Logical => "logical",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单次分析的完整结果（每次分析整体替换上一次）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub language: Language,
    pub findings: Vec<crate::findings::Finding>,
    pub tips: Vec<String>,
}

impl Review {
    /// 空结果（空白输入时返回）
    pub fn empty() -> Self {
        Self { language: Language::Unknown, findings: Vec::new(), tips: Vec::new() }
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty() && self.tips.is_empty()
    }
}

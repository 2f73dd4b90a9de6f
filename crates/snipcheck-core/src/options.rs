//! 分析选项（模块）
use crate::types::Language;

/// 长行阈值（字符数）；超过则生成提示
pub const DEFAULT_LONG_LINE_THRESHOLD: usize = 100;

/// 分析选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// 行长度上限（按字符计），超过即生成 Tip
    pub long_line_threshold: usize,
    /// 指定语言时跳过自动检测
    pub language: Option<Language>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self { long_line_threshold: DEFAULT_LONG_LINE_THRESHOLD, language: None }
    }
}

//! 命中项（Finding）与统计
use serde::Serialize;

use crate::types::Severity;

/// 单条问题：行号从 1 开始，snippet 为该行去除首尾空白后的文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    #[serde(rename = "line")]
    pub line_number: usize,
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
    pub snippet: Option<String>,
}

impl Finding {
    pub(crate) fn new(
        line_number: usize,
        severity: Severity,
        message: impl Into<String>,
        suggestion: impl Into<String>,
        snippet: Option<&str>,
    ) -> Self {
        Self {
            line_number,
            severity,
            message: message.into(),
            suggestion: suggestion.into(),
            snippet: snippet.map(|s| s.trim().to_string()),
        }
    }
}

/// 按等级计数（syntax, logical, warning）
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub syntax: usize,
    pub logical: usize,
    pub warning: usize,
}

pub fn count_by_severity(findings: &[Finding]) -> SeverityCounts {
    let mut counts = SeverityCounts::default();
    for f in findings {
        match f.severity {
            Severity::Syntax => counts.syntax += 1,
            Severity::Logical => counts.logical += 1,
            Severity::Warning => counts.warning += 1,
        }
    }
    counts
}

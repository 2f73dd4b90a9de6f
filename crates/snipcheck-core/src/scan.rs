//! 分析主流程：检测语言 → 按行切分 → 规则扫描
use tracing::debug;

use crate::detectors::detect;
use crate::engine::analyze;
use crate::options::AnalyzeOptions;
use crate::rules::RuleTable;
use crate::types::Review;

/// 对一段代码文本执行完整分析
/// - 空白文本直接返回空结果（Unknown、无 findings/tips）
/// - `opts.language` 指定时跳过自动检测
/// - 按 '\n' 切分；CRLF 行尾的 '\r' 保留在行内
pub fn review_text(text: &str, table: &RuleTable, opts: &AnalyzeOptions) -> Review {
    if text.trim().is_empty() {
        return Review::empty();
    }

    let language = opts.language.unwrap_or_else(|| detect(text));
    let lines: Vec<&str> = text.split('\n').collect();
    let (findings, tips) = analyze(&lines, language, table, opts);

    debug!(
        %language,
        lines = lines.len(),
        findings = findings.len(),
        tips = tips.len(),
        "review finished"
    );

    Review { language, findings, tips }
}

/// 使用内置规则表与默认选项
pub fn review_builtin(text: &str) -> Review {
    review_text(text, RuleTable::builtin(), &AnalyzeOptions::default())
}

//! 结果输出（JSON / 纯文本）
use std::io::{self, Write};

use crate::findings::count_by_severity;
use crate::types::Review;

/// 以单个 JSON 对象写出结果（含按等级统计）
pub fn write_json(review: &Review, out: &mut dyn Write) -> io::Result<()> {
    let item = serde_json::json!({
        "language": review.language,
        "findings": review.findings,
        "tips": review.tips,
        "summary": count_by_severity(&review.findings),
    });
    serde_json::to_writer_pretty(&mut *out, &item)?;
    writeln!(out)
}

/// 人类可读的文本输出
pub fn write_text(review: &Review, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "language: {}", review.language)?;
    if review.is_clean() {
        writeln!(out, "no issues found")?;
        return Ok(());
    }

    for f in &review.findings {
        writeln!(out, "L{} [{}] {} -> {}", f.line_number, f.severity, f.message, f.suggestion)?;
        if let Some(snippet) = &f.snippet {
            writeln!(out, "    {snippet}")?;
        }
    }
    for tip in &review.tips {
        writeln!(out, "tip: {tip}")?;
    }

    let c = count_by_severity(&review.findings);
    writeln!(
        out,
        "{} finding(s): syntax={} logical={} warning={}; {} tip(s)",
        review.findings.len(),
        c.syntax,
        c.logical,
        c.warning,
        review.tips.len()
    )
}

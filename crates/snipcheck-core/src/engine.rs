//! 规则引擎：逐行规则匹配 + 与语言无关的通用检查
//!
//! - 每行独立匹配（无跨行上下文），一行可命中多条规则。
//! - 通用检查：长行提示、死循环启发式（拼接全文后查找字面量）。
//! - 输出完全由输入决定，无隐藏状态。
use aho_corasick::AhoCorasick;
use std::sync::LazyLock;

use crate::findings::Finding;
use crate::options::AnalyzeOptions;
use crate::rules::RuleTable;
use crate::types::{Language, Severity};

/// 死循环字面量（定位行时按此顺序）
const INFINITE_LOOP_LITERALS: [&str; 2] = ["while(true)", "for(;;)"];

static LOOP_MATCHER: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::new(INFINITE_LOOP_LITERALS).expect("build aho-corasick")
});

/// 使用内置规则表与默认选项分析
pub fn analyze_builtin<S: AsRef<str>>(lines: &[S], language: Language) -> (Vec<Finding>, Vec<String>) {
    analyze(lines, language, RuleTable::builtin(), &AnalyzeOptions::default())
}

/// 对给定行执行规则扫描，返回 (findings, tips)
///
/// 结果顺序：按行号升序，同一行内按规则表顺序；死循环提示（若有）追加在末尾。
pub fn analyze<S: AsRef<str>>(
    lines: &[S],
    language: Language,
    table: &RuleTable,
    opts: &AnalyzeOptions,
) -> (Vec<Finding>, Vec<String>) {
    let rules = table.rules_for(language);
    let mut findings: Vec<Finding> = Vec::new();
    let mut tips: Vec<String> = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line: &str = line.as_ref();
        let line_number = idx + 1;

        for rule in rules {
            if rule.pattern.is_match(line) {
                findings.push(Finding::new(
                    line_number,
                    rule.severity,
                    rule.message.as_str(),
                    rule.suggestion.as_str(),
                    Some(line),
                ));
            }
        }

        let len = line.chars().count();
        if len > opts.long_line_threshold {
            tips.push(long_line_tip(line_number, len, opts.long_line_threshold));
        }
    }

    if let Some(f) = infinite_loop_finding(lines) {
        findings.push(f);
    }

    (findings, tips)
}

fn long_line_tip(line_number: usize, len: usize, threshold: usize) -> String {
    format!(
        "Line {line_number} is {len} characters long (limit {threshold}); consider splitting it."
    )
}

/// 死循环启发式：全文（无分隔符拼接）含字面量时，报告首个包含字面量的行
///
/// 若字面量只在拼接边界处出现（任何单行都不含），报告第 1 行且不带 snippet。
fn infinite_loop_finding<S: AsRef<str>>(lines: &[S]) -> Option<Finding> {
    let lines: Vec<&str> = lines.iter().map(|l| l.as_ref()).collect();
    if !LOOP_MATCHER.is_match(lines.concat().as_str()) {
        return None;
    }

    let (line_number, snippet) = match lines.iter().position(|l| LOOP_MATCHER.is_match(*l)) {
        Some(i) => (i + 1, Some(lines[i])),
        None => (1, None),
    };

    Some(Finding::new(
        line_number,
        Severity::Logical,
        "Possible infinite loop",
        "Make sure the loop has a reachable break, return or changing exit condition.",
        snippet,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_nothing_for_every_language() {
        let empty: [&str; 0] = [];
        for lang in Language::ALL {
            let (findings, tips) = analyze_builtin(&empty, lang);
            assert!(findings.is_empty(), "{lang}");
            assert!(tips.is_empty(), "{lang}");
        }
    }

    #[test]
    fn loose_equality_yields_one_warning() {
        let (findings, tips) = analyze_builtin(&["x == 5"], Language::JavaScript);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].suggestion.contains("==="));
        assert_eq!(findings[0].line_number, 1);
        assert_eq!(findings[0].snippet.as_deref(), Some("x == 5"));
        assert!(tips.is_empty());
    }

    #[test]
    fn one_line_can_hit_several_rules() {
        let (findings, _) = analyze_builtin(&["var a = b == c;"], Language::JavaScript);
        let messages: Vec<_> = findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["'var' declaration found", "Loose equality operator '==' used"]
        );
    }

    #[test]
    fn python_print_statement() {
        let (findings, _) = analyze_builtin(&["print \"hi\""], Language::Python);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Syntax);
        assert!(findings[0].message.contains("missing parentheses"));

        let (findings, _) = analyze_builtin(&["print(\"hi\")"], Language::Python);
        assert!(findings.iter().all(|f| !f.message.contains("missing parentheses")));
    }

    #[test]
    fn long_line_tip_mentions_length_and_line() {
        let long = "a".repeat(150);
        let (findings, tips) = analyze_builtin(&["short", long.as_str()], Language::Unknown);
        assert!(findings.is_empty());
        assert_eq!(tips.len(), 1);
        assert!(tips[0].contains("150"));
        assert!(tips[0].starts_with("Line 2 "));
    }

    #[test]
    fn threshold_is_exclusive_and_counts_chars() {
        let exactly = "a".repeat(100);
        let wide = "é".repeat(100);
        let (_, tips) = analyze_builtin(&[exactly.as_str(), wide.as_str()], Language::Unknown);
        assert!(tips.is_empty());

        let opts = AnalyzeOptions { long_line_threshold: 10, ..AnalyzeOptions::default() };
        let (_, tips) = analyze(&["12345678901"], Language::Unknown, RuleTable::builtin(), &opts);
        assert_eq!(tips.len(), 1);
    }

    #[test]
    fn infinite_loop_reports_first_line() {
        let (findings, _) = analyze_builtin(&["a", "while(true){}", "b"], Language::Unknown);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Logical);
        assert_eq!(findings[0].line_number, 2);
        assert_eq!(findings[0].snippet.as_deref(), Some("while(true){}"));
    }

    #[test]
    fn only_one_loop_finding_per_document() {
        let lines = ["for(;;) {", "}", "while(true) {}"];
        let (findings, _) = analyze_builtin(&lines, Language::Java);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line_number, 1);
    }

    #[test]
    fn loop_literal_spanning_lines_reports_line_one() {
        let (findings, _) = analyze_builtin(&["x = 1", "while(", "true)"], Language::Unknown);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line_number, 1);
        assert_eq!(findings[0].snippet, None);
    }

    #[test]
    fn spaced_loop_is_not_flagged() {
        let (findings, _) = analyze_builtin(&["while (true) {}"], Language::Unknown);
        assert!(findings.is_empty());
    }

    #[test]
    fn loop_finding_comes_after_rule_findings() {
        let (findings, _) = analyze_builtin(&["while(true) {", "  var x = 1", "}"], Language::JavaScript);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].line_number, 2);
        assert_eq!(findings[1].severity, Severity::Logical);
        assert_eq!(findings[1].line_number, 1);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let long = "b".repeat(120);
        let lines = vec!["var a = 1", "if (a == 2);", long.as_str(), "for(;;){}"];
        let first = analyze_builtin(&lines, Language::JavaScript);
        let second = analyze_builtin(&lines, Language::JavaScript);
        assert_eq!(first, second);
    }

    #[test]
    fn unconfigured_language_still_gets_generic_tip() {
        let long = format!("    System.out.println(\"{}\");", "x".repeat(120));
        let (findings, tips) = analyze_builtin(&[long.as_str()], Language::Java);
        assert!(findings.is_empty());
        assert_eq!(tips.len(), 1);
    }
}

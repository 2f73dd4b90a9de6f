//! 代码片段审查核心库
//!
//! 设计要点：
//! - 语言检测：有序正则候选表，首个命中即为结果（优先级由顺序决定，而非“最具体”）。
//! - 规则引擎：按语言查表，逐行独立匹配；另有与语言无关的长行提示与死循环启发式。
//! - 全函数设计：任何输入都有确定输出，不抛错；规则表为进程级只读配置。
//! - 仅加载外部规则文件时可能出错（`RuleError`），分析路径本身不会失败。

mod detectors;
mod engine;
mod findings;
mod options;
mod report;
mod rules;
mod scan;
mod session;
mod types;

pub use detectors::{detect, detection_order};
pub use engine::{analyze, analyze_builtin};
pub use findings::{count_by_severity, Finding, SeverityCounts};
pub use options::{AnalyzeOptions, DEFAULT_LONG_LINE_THRESHOLD};
pub use report::{write_json, write_text};
pub use rules::{Rule, RuleError, RuleTable};
pub use scan::{review_builtin, review_text};
pub use session::{ReviewSession, Ticket};
pub use types::{Language, ParseLanguageError, Review, Severity};

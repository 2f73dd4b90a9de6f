//! 规则表：内置规则（编译期常量）+ 可选 TOML 规则文件
//!
//! 规则表在进程启动时构建一次，之后只读；未配置规则的语言返回空切片而非错误。
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

use crate::types::{Language, Severity};

/// 内置规则条目（模式为源码常量）
struct RuleDef {
    id: &'static str,
    pattern: &'static str,
    severity: Severity,
    message: &'static str,
    suggestion: &'static str,
}

const fn def(
    id: &'static str,
    pattern: &'static str,
    severity: Severity,
    message: &'static str,
    suggestion: &'static str,
) -> RuleDef {
    RuleDef { id, pattern, severity, message, suggestion }
}

const JAVASCRIPT_RULES: &[RuleDef] = &[
    def(
        "js/no-var",
        r"\bvar\s+\w+",
        Severity::Warning,
        "'var' declaration found",
        "Use 'let' or 'const' instead of 'var'.",
    ),
    def(
        "js/strict-equality",
        r"(?:^|[^=!<>])==(?:[^=]|$)",
        Severity::Warning,
        "Loose equality operator '==' used",
        "Use '===' for strict equality comparison.",
    ),
    def(
        "js/strict-inequality",
        r"!=(?:[^=]|$)",
        Severity::Warning,
        "Loose inequality operator '!=' used",
        "Use '!==' for strict inequality comparison.",
    ),
    def(
        "js/no-console",
        r"console\.log\(",
        Severity::Warning,
        "Debug output left in code",
        "Remove console.log calls before shipping.",
    ),
    def(
        "js/no-eval",
        r"\beval\s*\(",
        Severity::Warning,
        "Use of eval()",
        "Avoid eval; parse or dispatch on the data explicitly.",
    ),
    def(
        "js/empty-control-body",
        r"^\s*(?:if|while|for)\s*\(.*\)\s*;\s*$",
        Severity::Logical,
        "Control statement has an empty body",
        "Remove the ';' after the condition so the next statement is part of the body.",
    ),
];

const TYPESCRIPT_RULES: &[RuleDef] = &[
    def(
        "ts/no-any",
        r":\s*any\b",
        Severity::Warning,
        "Type 'any' disables type checking",
        "Use a specific type or 'unknown'.",
    ),
    def(
        "ts/no-ts-ignore",
        r"@ts-ignore",
        Severity::Warning,
        "Type error suppressed with @ts-ignore",
        "Fix the type error or use @ts-expect-error with a reason.",
    ),
    def(
        "ts/no-var",
        r"\bvar\s+\w+",
        Severity::Warning,
        "'var' declaration found",
        "Use 'let' or 'const' instead of 'var'.",
    ),
    def(
        "ts/strict-equality",
        r"(?:^|[^=!<>])==(?:[^=]|$)",
        Severity::Warning,
        "Loose equality operator '==' used",
        "Use '===' for strict equality comparison.",
    ),
];

const PYTHON_RULES: &[RuleDef] = &[
    def(
        "py/print-statement",
        r"^\s*print\s+[^\s(=]",
        Severity::Syntax,
        "print used as a statement (missing parentheses)",
        "Call print as a function: print(...).",
    ),
    def(
        "py/missing-colon",
        r"^\s*(?:if|elif|else|for|while|def|class|try|except|finally|with)\b[^:#]*$",
        Severity::Syntax,
        "Block statement is missing a trailing ':'",
        "Add ':' at the end of the statement.",
    ),
    def(
        "py/none-comparison",
        r"(?:==|!=)\s*None\b",
        Severity::Warning,
        "Comparison to None with '==' or '!='",
        "Use 'is None' or 'is not None'.",
    ),
    def(
        "py/bare-except",
        r"^\s*except\s*:",
        Severity::Warning,
        "Bare except clause",
        "Catch a specific exception type.",
    ),
    def(
        "py/trailing-semicolon",
        r";\s*$",
        Severity::Warning,
        "Unnecessary trailing semicolon",
        "Python statements do not need a trailing ';'.",
    ),
];

const HTML_RULES: &[RuleDef] = &[
    def(
        "html/deprecated-element",
        r"(?i)<(?:font|center|marquee|blink)\b",
        Severity::Warning,
        "Deprecated HTML element",
        "Use semantic markup and CSS for presentation.",
    ),
    def(
        "html/inline-style",
        r#"(?i)\sstyle\s*=\s*["']"#,
        Severity::Warning,
        "Inline style attribute",
        "Move styles into a stylesheet.",
    ),
    def(
        "html/inline-handler",
        r"(?i)\son(?:click|load|change|submit|mouseover)\s*=",
        Severity::Warning,
        "Inline event handler attribute",
        "Attach event listeners from a script instead.",
    ),
];

const CSS_RULES: &[RuleDef] = &[
    def(
        "css/no-important",
        r"!important",
        Severity::Warning,
        "Use of !important",
        "Raise selector specificity instead of forcing with !important.",
    ),
    def(
        "css/universal-selector",
        r"^\s*\*\s*\{",
        Severity::Warning,
        "Universal selector matches every element",
        "Target specific elements or classes.",
    ),
    def(
        "css/zero-unit",
        r":\s*0(?:px|em|rem|%)\s*[;}]",
        Severity::Warning,
        "Unit on a zero value",
        "Write 0 without a unit.",
    ),
    def(
        "css/missing-semicolon",
        r"^\s*[\w-]+\s*:\s*[^;{}]+$",
        Severity::Syntax,
        "Declaration is missing a trailing ';'",
        "End each declaration with ';'.",
    ),
];

/// 内置规则按语言分发；C、C++、Java、C# 暂无规则（已知覆盖缺口）
fn builtin_defs(lang: Language) -> &'static [RuleDef] {
    match lang {
        Language::JavaScript => JAVASCRIPT_RULES,
        Language::TypeScript => TYPESCRIPT_RULES,
        Language::Python => PYTHON_RULES,
        Language::Html => HTML_RULES,
        Language::Css => CSS_RULES,
        Language::C | Language::Cpp | Language::Java | Language::CSharp | Language::Unknown => &[],
    }
}

/// 编译后的单条规则（不可变）
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub pattern: Regex,
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
}

/// 规则文件加载错误
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("failed to read rule file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid rule file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("rule `{id}` has neither `pattern` nor `regex`")]
    MissingPattern { id: String },
    #[error("rule `{id}` has an invalid pattern")]
    Pattern {
        id: String,
        #[source]
        source: regex::Error,
    },
}

/// 单条规则的配置（支持 pattern 或 regex 字段）
#[derive(Debug, Clone, Deserialize)]
struct RuleEntry {
    #[serde(default)]
    id: Option<String>,
    language: Language,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    regex: Option<String>,
    #[serde(default = "default_severity")]
    severity: Severity,
    message: String,
    #[serde(default)]
    suggestion: String,
}

fn default_severity() -> Severity {
    Severity::Warning
}

/// 顶层规则文件结构
#[derive(Debug, Clone, Deserialize)]
struct RuleFile {
    #[serde(default)]
    rules: Vec<RuleEntry>,
}

/// 语言 → 有序规则列表
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    by_language: HashMap<Language, Vec<Rule>>,
}

static BUILTIN: LazyLock<RuleTable> = LazyLock::new(RuleTable::compile_builtin);

impl RuleTable {
    /// 进程级内置规则表
    pub fn builtin() -> &'static RuleTable {
        &BUILTIN
    }

    fn compile_builtin() -> Self {
        let mut by_language = HashMap::new();
        for lang in Language::ALL {
            let mut rules = Vec::new();
            for d in builtin_defs(lang) {
                if let Ok(pattern) = Regex::new(d.pattern) {
                    rules.push(Rule {
                        id: d.id.to_string(),
                        pattern,
                        severity: d.severity,
                        message: d.message.to_string(),
                        suggestion: d.suggestion.to_string(),
                    });
                }
            }
            if !rules.is_empty() {
                by_language.insert(lang, rules);
            }
        }
        Self { by_language }
    }

    /// 指定语言的规则；未配置时返回空切片
    pub fn rules_for(&self, lang: Language) -> &[Rule] {
        self.by_language.get(&lang).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// 规则总数
    pub fn len(&self) -> usize {
        self.by_language.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 内置规则 + TOML 规则文件（追加在对应语言内置规则之后）
    pub fn load_with_extra(path: &Path) -> Result<Self, RuleError> {
        let txt = std::fs::read_to_string(path)
            .map_err(|source| RuleError::Io { path: path.to_path_buf(), source })?;
        let table = Self::builtin().with_extra_toml(&txt)?;
        debug!(path = %path.display(), rules = table.len(), "rule file loaded");
        Ok(table)
    }

    /// 在当前规则表基础上追加 TOML 文本中的规则，返回新表
    pub fn with_extra_toml(&self, txt: &str) -> Result<Self, RuleError> {
        let parsed: RuleFile = toml::from_str(txt)?;
        let mut table = self.clone();

        for (i, e) in parsed.rules.into_iter().enumerate() {
            let id = e.id.unwrap_or_else(|| format!("custom/{}", i + 1));
            // 兼容两种字段名：pattern 或 regex
            let pat = match (e.pattern, e.regex) {
                (Some(p), _) => p,
                (None, Some(r)) => r,
                _ => return Err(RuleError::MissingPattern { id }),
            };
            let pattern = match Regex::new(&pat) {
                Ok(rx) => rx,
                Err(source) => return Err(RuleError::Pattern { id, source }),
            };
            table.by_language.entry(e.language).or_default().push(Rule {
                id,
                pattern,
                severity: e.severity,
                message: e.message,
                suggestion: e.suggestion,
            });
        }

        Ok(table)
    }
}

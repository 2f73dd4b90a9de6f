//! 语言检测器（有序正则候选表，首个命中即返回）
//!
//! 设计要点：
//! - 候选表顺序即优先级：C 先于更宽泛的 C++ 检查（C++ 的 include 模式同样能命中 C 头文件）；
//!   C# 先于 JavaScript，`var x = ...` 的 C# 片段靠 `using System` 等标记归类。
//! - 模式为“任意位置”匹配而非整文件结构匹配，注释里出现的单个 token 也足以判定，属于已知的启发式局限。
//! - 纯函数，无副作用；空白输入直接返回 Unknown。
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::types::Language;

/// 候选模式（按优先级排列）
const CANDIDATE_SPECS: &[(Language, &str)] = &[
    (
        Language::TypeScript,
        // 类型注解要求冒号前是标识符且同一行紧跟类型名，避免命中 `std::string` 与 `public:` 标签
        r"\binterface\s+\w+\s*\{|(?:^|[^:\w])\w+\??[ \t]*:[ \t]*(?:string|number|boolean|any|void)\b",
    ),
    (
        Language::CSharp,
        r"(?m)^\s*using\s+System\b|\bConsole\.Write(?:Line)?\s*\(",
    ),
    (
        Language::JavaScript,
        r"\b(?:const|let|var)\s+\w+\s*=|\bfunction\s*\w*\s*\(|console\.log\(|\bdocument\.|=>\s*\{|\brequire\(",
    ),
    (
        Language::Python,
        r"(?m)^\s*def\s+\w+\s*\(|^\s*import\s+\w+\s*$|^\s*from\s+[\w.]+\s+import\b|^\s*print\b|^\s*elif\b|\bself\.\w+",
    ),
    (
        Language::C,
        r"#include\s*<(?:stdio|stdlib|string|math|stdbool|stdint|unistd)\.h>|\bprintf\s*\(|\bmalloc\s*\(",
    ),
    (
        Language::Cpp,
        r"(?m)#include\s*<[\w./]+>|\bstd::|\bcout\s*<<|\bcin\s*>>|\bnamespace\s+\w+\s*\{|^\s*(?:public|private|protected)\s*:",
    ),
    (
        Language::Java,
        r"(?m)\bpublic\s+(?:final\s+)?class\s+\w+|\bSystem\.out\.print|^\s*import\s+java\.|\bpublic\s+static\s+void\s+main\b",
    ),
    (
        Language::Html,
        r"(?i)<!doctype\s+html|<(?:html|head|body|div|span|p|a|ul|ol|li|table|script|h[1-6])\b[^>]*>",
    ),
    (
        Language::Css,
        r"(?m)^\s*[.#]?[\w-]+(?:\s*[,>+~]?\s*[.#]?[\w:-]+)*\s*\{|^\s*[\w-]+\s*:\s*[^;]+;\s*$",
    ),
];

/// 已编译的候选项
struct Candidate {
    language: Language,
    pattern: Regex,
}

/// 进程级只读候选表（首次使用时编译一次）
static CANDIDATES: LazyLock<Vec<Candidate>> = LazyLock::new(|| {
    let mut out = Vec::with_capacity(CANDIDATE_SPECS.len());
    for (language, pat) in CANDIDATE_SPECS {
        // 与规则加载一致：编译失败的模式直接跳过
        if let Ok(pattern) = Regex::new(pat) {
            out.push(Candidate { language: *language, pattern });
        }
    }
    out
});

/// 猜测文本所属语言
pub fn detect(text: &str) -> Language {
    if text.trim().is_empty() {
        return Language::Unknown;
    }
    for c in CANDIDATES.iter() {
        if c.pattern.is_match(text) {
            debug!(language = %c.language, "language detected");
            return c.language;
        }
    }
    Language::Unknown
}

/// 检测优先级（供 `rules` 子命令等展示）
pub fn detection_order() -> impl Iterator<Item = Language> {
    CANDIDATE_SPECS.iter().map(|(l, _)| *l)
}

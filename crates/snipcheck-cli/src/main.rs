use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use snipcheck_core::{
    detect, detection_order, review_text, write_json, write_text, AnalyzeOptions, Language,
    ReviewSession, RuleTable, DEFAULT_LONG_LINE_THRESHOLD,
};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "snipcheck", version, about = "Heuristic review of pasted code snippets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 检测语言并按规则审查代码片段
    Review {
        /// 输入文件；省略或为 "-" 时读取标准输入
        #[arg(long, default_value = "-")]
        input: PathBuf,

        /// 指定语言（跳过自动检测），例如 js、python、c++
        #[arg(long)]
        language: Option<Language>,

        /// 输出格式：text 或 json
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// 额外规则文件（TOML），追加在内置规则之后
        #[arg(long)]
        rules: Option<PathBuf>,

        /// 长行提示阈值（字符数）
        #[arg(long, default_value_t = DEFAULT_LONG_LINE_THRESHOLD)]
        max_line_length: usize,

        /// 模拟“分析中”的延迟（毫秒）
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
    },
    /// 仅输出检测到的语言
    Detect {
        #[arg(long, default_value = "-")]
        input: PathBuf,
    },
    /// 列出各语言已配置的规则
    Rules {
        /// 仅列出指定语言
        #[arg(long)]
        language: Option<Language>,

        /// 额外规则文件（TOML）
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Review { input, language, format, rules, max_line_length, delay_ms } => {
            let text = read_input(&input)?;
            let table = load_table(rules.as_deref())?;
            let opts = AnalyzeOptions { long_line_threshold: max_line_length, language };

            info!(?input, bytes = text.len(), "starting review");
            // 单次调用只有一个请求，`--delay-ms` 仅模拟“分析中”的等待，不会被后续请求取代
            let review = if delay_ms > 0 {
                let session = ReviewSession::new();
                session.run_delayed(&text, &table, &opts, Duration::from_millis(delay_ms))
            } else {
                Some(review_text(&text, &table, &opts))
            };

            if let Some(review) = review {
                let written = match format.as_str() {
                    "json" => write_json(&review, &mut out),
                    _ => write_text(&review, &mut out),
                };
                written.context("write report")?;
                info!(
                    language = %review.language,
                    findings = review.findings.len(),
                    tips = review.tips.len(),
                    "review finished"
                );
            }
        }
        Commands::Detect { input } => {
            let text = read_input(&input)?;
            writeln!(out, "{}", detect(&text))?;
        }
        Commands::Rules { language, rules } => {
            let table = load_table(rules.as_deref())?;
            print_rules(&table, language, &mut out)?;
        }
    }

    out.flush().context("flush output")?;
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 支持通过环境变量 RUST_LOG 控制日志等级，如：RUST_LOG=debug
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 读取输入："-" 表示标准输入
fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("read stdin")?;
        return Ok(buf);
    }
    // 非 UTF-8 内容按有损方式读取，保证总能给出结果
    let bytes = std::fs::read(path).with_context(|| format!("read input {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == std::ffi::OsStr::new("-")
}

/// 规则表：未指定规则文件时直接复用内置表
fn load_table(rules: Option<&Path>) -> Result<RuleTable> {
    match rules {
        Some(path) => RuleTable::load_with_extra(path)
            .with_context(|| format!("load rule file {}", path.display())),
        None => Ok(RuleTable::builtin().clone()),
    }
}

fn print_rules(table: &RuleTable, only: Option<Language>, out: &mut dyn Write) -> Result<()> {
    let order: Vec<String> = detection_order().map(|l| l.to_string()).collect();
    writeln!(out, "detection order: {}", order.join(" > "))?;
    for lang in Language::ALL {
        if only.is_some_and(|l| l != lang) {
            continue;
        }
        let rules = table.rules_for(lang);
        writeln!(out, "{} ({} rules)", lang, rules.len())?;
        for r in rules {
            writeln!(out, "  {:<28} {:<8} {}", r.id, r.severity.as_str(), r.message)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_review_flags() {
        let cli = Cli::try_parse_from([
            "snipcheck",
            "review",
            "--language",
            "py",
            "--format",
            "json",
            "--max-line-length",
            "80",
        ])
        .unwrap();
        match cli.command {
            Commands::Review { input, language, format, max_line_length, delay_ms, rules } => {
                assert!(is_stdin(&input));
                assert_eq!(language, Some(Language::Python));
                assert_eq!(format, "json");
                assert_eq!(max_line_length, 80);
                assert_eq!(delay_ms, 0);
                assert!(rules.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_format_and_language() {
        assert!(Cli::try_parse_from(["snipcheck", "review", "--format", "xml"]).is_err());
        assert!(Cli::try_parse_from(["snipcheck", "review", "--language", "cobol"]).is_err());
    }

    #[test]
    fn rules_listing_filters_by_language() {
        let mut buf = Vec::new();
        print_rules(RuleTable::builtin(), Some(Language::Css), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("detection order: TypeScript > C# > JavaScript > Python > C > C++ > Java"));
        assert!(text.contains("CSS (4 rules)"));
        assert!(text.contains("css/no-important"));
        assert!(!text.contains("JavaScript ("));
    }

    #[test]
    fn delayed_single_request_is_always_delivered() {
        let session = ReviewSession::new();
        let review = session.run_delayed(
            "var a = 1",
            RuleTable::builtin(),
            &AnalyzeOptions::default(),
            Duration::from_millis(5),
        );
        assert_eq!(review.map(|r| r.language), Some(Language::JavaScript));
    }

    #[test]
    fn reads_file_input_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snippet.js");
        std::fs::write(&path, b"var a = 1;\xff\n").unwrap();
        let text = read_input(&path).unwrap();
        assert!(text.starts_with("var a = 1;"));
        assert!(text.contains('\u{fffd}'));
    }
}

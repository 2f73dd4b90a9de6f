//! 分析会话：模拟“分析中”延迟，新请求使旧请求的结果作废
//!
//! 延迟仅用于界面反馈，无取消、超时与重试；结果交付时若票据已过期则直接丢弃。
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

use crate::options::AnalyzeOptions;
use crate::rules::RuleTable;
use crate::scan::review_text;
use crate::types::Review;

/// 一次分析请求的票据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// 分析会话（可跨线程共享）
#[derive(Debug, Default)]
pub struct ReviewSession {
    generation: AtomicU64,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始一次新的分析；之前发出的票据全部失效
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// 交付结果：仅当票据仍为最新时返回
    pub fn complete(&self, ticket: Ticket, review: Review) -> Option<Review> {
        if self.is_current(ticket) {
            Some(review)
        } else {
            debug!(ticket = ticket.0, "superseded review dropped");
            None
        }
    }

    /// 带延迟的完整流程：开票 → 等待 → 分析 → 交付
    pub fn run_delayed(
        &self,
        text: &str,
        table: &RuleTable,
        opts: &AnalyzeOptions,
        delay: Duration,
    ) -> Option<Review> {
        let ticket = self.begin();
        debug!(ticket = ticket.0, ?delay, "analyzing");
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        let review = review_text(text, table, opts);
        self.complete(ticket, review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::review_builtin;
    use crate::types::Language;
    use std::sync::Arc;

    #[test]
    fn latest_ticket_is_delivered() {
        let session = ReviewSession::new();
        let t = session.begin();
        let review = review_builtin("x == 5");
        assert_eq!(session.complete(t, review.clone()), Some(review));
    }

    #[test]
    fn newer_request_supersedes_pending_one() {
        let session = ReviewSession::new();
        let old = session.begin();
        let new = session.begin();
        assert!(!session.is_current(old));
        assert_eq!(session.complete(old, review_builtin("var a = 1")), None);
        assert!(session.complete(new, review_builtin("var a = 1")).is_some());
    }

    #[test]
    fn run_delayed_without_delay_delivers() {
        let session = ReviewSession::new();
        let got = session
            .run_delayed("let a = 1", RuleTable::builtin(), &AnalyzeOptions::default(), Duration::ZERO)
            .unwrap();
        assert_eq!(got.language, Language::JavaScript);
    }

    #[test]
    fn slow_request_is_dropped_when_superseded() {
        let session = Arc::new(ReviewSession::new());
        let slow = {
            let session = Arc::clone(&session);
            std::thread::spawn(move || {
                session.run_delayed(
                    "var a = 1",
                    RuleTable::builtin(),
                    &AnalyzeOptions::default(),
                    Duration::from_millis(500),
                )
            })
        };
        std::thread::sleep(Duration::from_millis(100));
        let fast = session.run_delayed(
            "print \"hi\"",
            RuleTable::builtin(),
            &AnalyzeOptions::default(),
            Duration::ZERO,
        );
        assert_eq!(fast.map(|r| r.language), Some(Language::Python));
        assert_eq!(slow.join().unwrap(), None);
    }
}

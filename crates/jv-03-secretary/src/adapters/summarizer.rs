//! Summary providers and the fallback chain.

use crate::domain::SummarizeError;
use crate::ports::{Summarizer, SummaryContext};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Characters of content quoted by the rule-based summary.
const SNIPPET_CHARS: usize = 60;

/// Template summary; never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedSummarizer;

impl RuleBasedSummarizer {
    pub fn summary(context: &SummaryContext<'_>) -> String {
        let snippet: String = context
            .content
            .chars()
            .take(SNIPPET_CHARS)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        format!("已收录 [{}]：{}", context.kind, snippet)
    }
}

#[async_trait]
impl Summarizer for RuleBasedSummarizer {
    fn name(&self) -> &str {
        "rule-based"
    }

    async fn summarize(&self, context: &SummaryContext<'_>) -> Result<String, SummarizeError> {
        Ok(Self::summary(context))
    }
}

/// Tries each provider in order and ends at the rule-based template.
///
/// A provider that errors or returns blank text is skipped.
#[derive(Default)]
pub struct FallbackSummarizer {
    providers: Vec<Arc<dyn Summarizer>>,
}

impl FallbackSummarizer {
    pub fn new(providers: Vec<Arc<dyn Summarizer>>) -> Self {
        Self { providers }
    }

    pub fn push(&mut self, provider: Arc<dyn Summarizer>) {
        self.providers.push(provider);
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

#[async_trait]
impl Summarizer for FallbackSummarizer {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn summarize(&self, context: &SummaryContext<'_>) -> Result<String, SummarizeError> {
        for provider in &self.providers {
            match provider.summarize(context).await {
                Ok(text) if !text.trim().is_empty() => return Ok(text.trim().to_string()),
                Ok(_) => warn!(provider = provider.name(), "empty summary, falling back"),
                Err(e) => warn!(provider = provider.name(), error = %e, "summary failed, falling back"),
            }
        }
        Ok(RuleBasedSummarizer::summary(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Scripted {
        reply: Result<String, SummarizeError>,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(reply: Result<&str, SummarizeError>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(String::from),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Summarizer for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn summarize(&self, _: &SummaryContext<'_>) -> Result<String, SummarizeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn context(content: &str) -> SummaryContext<'_> {
        SummaryContext {
            content,
            kind: ItemKind::Text,
        }
    }

    #[tokio::test]
    async fn test_rule_based_template() {
        let long = format!("第一行\n{}", "字".repeat(100));
        let summary = RuleBasedSummarizer.summarize(&context(&long)).await.unwrap();
        assert!(summary.starts_with("已收录 [text]：第一行 字"));
        assert_eq!(summary.chars().count(), "已收录 [text]：".chars().count() + SNIPPET_CHARS);
    }

    #[tokio::test]
    async fn test_empty_chain_uses_template() {
        let chain = FallbackSummarizer::default();
        assert_eq!(
            chain.summarize(&context("买牛奶")).await.unwrap(),
            "已收录 [text]：买牛奶"
        );
    }

    #[tokio::test]
    async fn test_first_good_provider_wins() {
        let failing = Scripted::new(Err(SummarizeError::Unavailable("no token".into())));
        let blank = Scripted::new(Ok("   "));
        let good = Scripted::new(Ok(" 提醒：买牛奶 "));
        let unused = Scripted::new(Ok("never"));

        let providers: Vec<Arc<dyn Summarizer>> =
            vec![failing.clone(), blank.clone(), good.clone(), unused.clone()];
        let chain = FallbackSummarizer::new(providers);
        assert_eq!(chain.provider_names().len(), 4);
        assert_eq!(chain.summarize(&context("买牛奶")).await.unwrap(), "提醒：买牛奶");
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
        assert_eq!(blank.calls.load(Ordering::SeqCst), 1);
        assert_eq!(unused.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_all_providers_fail() {
        let mut chain = FallbackSummarizer::default();
        chain.push(Scripted::new(Err(SummarizeError::Failed("503".into()))));
        assert_eq!(
            chain.summarize(&context("买牛奶")).await.unwrap(),
            "已收录 [text]：买牛奶"
        );
    }
}

//! Canned topic knowledge base: the pipeline's stand-in for web search.
//!
//! Known topics map to fixed fact paragraphs; anything else gets a generic
//! templated paragraph embedding the query verbatim. Lookups await a
//! configurable delay so the caller's "searching" stage stays observable.

use std::time::Duration;

use tracing::{debug, instrument};

/// Default simulated search latency.
const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(1500);

/// Known topics in declaration order. The first keyword contained in the
/// lowercased query wins, so order is authoritative when a query matches
/// more than one entry.
const FACTS: &[(&str, &str)] = &[
    (
        "decentralized compute",
        "Decentralized compute refers to a network of distributed computers that share resources \
         to perform tasks without a central authority. Projects like Nosana leverage this model \
         to provide censorship-resistant and cost-effective computing power for AI and other \
         intensive workloads. It contrasts with traditional cloud providers like AWS or Google \
         Cloud by distributing trust and control among participants.",
    ),
    (
        "ai agents",
        "AI agents are autonomous programs that can perceive their environment, make decisions, \
         and take actions to achieve specific goals. They often use Large Language Models (LLMs) \
         for reasoning and can be equipped with 'tools' (functions) to interact with external \
         systems, like APIs or databases. Frameworks like Mastra help orchestrate these agents \
         and their tool-calling capabilities.",
    ),
];

// ---------------------------------------------------------------------------
// TopicKnowledgeBase
// ---------------------------------------------------------------------------

/// Read-only fact store shared by all pipeline invocations.
///
/// Never fails: every query resolves to either a known paragraph or the
/// fallback template.
#[derive(Debug, Clone)]
pub struct TopicKnowledgeBase {
    delay: Duration,
}

impl Default for TopicKnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicKnowledgeBase {
    /// Knowledge base with the default simulated latency (1.5 s).
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_SEARCH_DELAY,
        }
    }

    /// Knowledge base with a custom simulated latency. Tests pass zero.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Look up the fact paragraph for a query.
    ///
    /// Case-insensitive substring match against the known keywords in
    /// declaration order; unknown topics fall back to a generic paragraph
    /// that embeds the original (non-normalized) query verbatim.
    #[instrument(skip_all, fields(query = %query))]
    pub async fn lookup(&self, query: &str) -> String {
        tokio::time::sleep(self.delay).await;

        let normalized = query.to_lowercase();
        for (keyword, paragraph) in FACTS {
            if normalized.contains(keyword) {
                debug!(keyword, "known topic matched");
                return (*paragraph).to_string();
            }
        }

        debug!("no known topic matched, using fallback");
        fallback_paragraph(query)
    }
}

/// Fallback paragraph for unknown topics, embedding the query verbatim.
fn fallback_paragraph(query: &str) -> String {
    format!(
        "Found several articles about \"{query}\". The core idea revolves around its impact on \
         modern technology. It is a rapidly evolving field with significant investment and \
         research focus. Key applications are emerging in various industries, from finance to \
         healthcare."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> TopicKnowledgeBase {
        TopicKnowledgeBase::with_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn known_topic_exact() {
        let facts = kb().lookup("decentralized compute").await;
        assert_eq!(facts, FACTS[0].1);
    }

    #[tokio::test]
    async fn known_topic_as_substring_any_case() {
        let facts = kb().lookup("What is Decentralized Compute good for?").await;
        assert_eq!(facts, FACTS[0].1);

        let facts = kb().lookup("tell me about AI AGENTS please").await;
        assert_eq!(facts, FACTS[1].1);
    }

    #[tokio::test]
    async fn unknown_topic_uses_fallback_with_verbatim_query() {
        let query = "Quantum Basket Weaving";
        let facts = kb().lookup(query).await;
        assert!(facts.contains("Found several articles about \"Quantum Basket Weaving\"."));
        assert!(facts.contains("from finance to healthcare"));
    }

    #[tokio::test]
    async fn fallback_preserves_query_casing() {
        let facts = kb().lookup("MiXeD CaSe ToPiC").await;
        assert!(facts.contains("\"MiXeD CaSe ToPiC\""));
    }

    #[tokio::test]
    async fn first_declared_keyword_wins_on_double_match() {
        let facts = kb()
            .lookup("decentralized compute for ai agents")
            .await;
        assert_eq!(facts, FACTS[0].1);
    }

    #[tokio::test]
    async fn lookups_are_deterministic() {
        let a = kb().lookup("some niche topic").await;
        let b = kb().lookup("some niche topic").await;
        assert_eq!(a, b);
    }
}

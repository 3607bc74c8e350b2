//! Extractive summarizers
//!
//! Both strategies only select and rearrange sentences that already exist in
//! the retrieved chunks; nothing is generated.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    SummaryConfig, SummaryStrategy, NO_MEANINGFUL_SENTENCES, NO_RELEVANT_SENTENCES,
};
use crate::domain::ports::{Embedder, Summarizer};

/// Ranks sentences by embedding similarity to the query
pub struct SemanticSummarizer {
    embedder: Arc<dyn Embedder>,
    config: SummaryConfig,
}

impl SemanticSummarizer {
    /// Summarizer using `embedder` for query and sentences
    pub fn new(embedder: Arc<dyn Embedder>, config: SummaryConfig) -> Self {
        Self { embedder, config }
    }

    /// Sentences of every chunk that have at least `min_words` words
    fn candidate_sentences(&self, chunks: &[String]) -> Vec<String> {
        chunks
            .iter()
            .flat_map(|chunk| split_sentences(chunk))
            .filter(|sentence| sentence.split(' ').count() >= self.config.min_words)
            .collect()
    }
}

#[async_trait]
impl Summarizer for SemanticSummarizer {
    fn strategy(&self) -> SummaryStrategy {
        SummaryStrategy::Semantic
    }

    async fn summarize(&self, query: &str, chunks: &[String]) -> DomainResult<String> {
        let sentences = self.candidate_sentences(chunks);
        if sentences.is_empty() {
            return Ok(NO_MEANINGFUL_SENTENCES.to_string());
        }

        let query_vector = self.embedder.embed(query).await?;
        let sentence_vectors = self.embedder.embed_batch(&sentences).await?;
        if sentence_vectors.len() != sentences.len() {
            return Err(DomainError::Embedding(format!(
                "expected {} sentence embeddings, got {}",
                sentences.len(),
                sentence_vectors.len()
            )));
        }

        let mut scored: Vec<(usize, f32)> = sentence_vectors
            .iter()
            .map(|v| dot(v, &query_vector))
            .enumerate()
            .collect();

        // Stable: equal scores keep sentence order. NaN ranks last.
        scored.sort_by(|a, b| rank_key(b.1).total_cmp(&rank_key(a.1)));

        let summary = scored
            .iter()
            .take(self.config.max_sentences)
            .map(|(position, _)| sentences[*position].as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let summary = truncate_chars(&summary, self.config.max_chars);

        tracing::debug!(
            candidates = sentences.len(),
            chars = summary.chars().count(),
            "semantic summary"
        );

        if summary.is_empty() {
            return Ok(NO_RELEVANT_SENTENCES.to_string());
        }
        Ok(summary)
    }
}

fn rank_key(score: f32) -> f32 {
    if score.is_nan() {
        f32::NEG_INFINITY
    } else {
        score
    }
}

/// Keeps sentences that mention any query word; needs no embeddings
#[derive(Debug, Clone, Default)]
pub struct KeywordSummarizer;

impl KeywordSummarizer {
    /// Keyword summarizer
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Summarizer for KeywordSummarizer {
    fn strategy(&self) -> SummaryStrategy {
        SummaryStrategy::Keyword
    }

    async fn summarize(&self, query: &str, chunks: &[String]) -> DomainResult<String> {
        let combined = chunks.join(" ");
        let pieces: Vec<&str> = combined
            .split('.')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .collect();

        let words: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();

        let mut summary = String::new();
        for piece in &pieces {
            let lowered = piece.to_lowercase();
            if words.iter().any(|word| lowered.contains(word.as_str())) {
                summary.push_str(piece);
                summary.push_str(". ");
            }
        }

        if summary.is_empty() {
            let head: Vec<&str> = pieces.iter().take(3).copied().collect();
            summary = format!("{}...", head.join(" "));
        }

        Ok(summary.trim().to_string())
    }
}

/// Split after `.`, `!` or `?` followed by whitespace, collapsing runs of
/// whitespace inside each sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(&(next_index, next)) = chars.peek() {
                if next.is_whitespace() {
                    sentences.push(&text[start..next_index]);
                    start = next_index;
                }
            }
        }
    }
    sentences.push(&text[start..]);

    sentences
        .into_iter()
        .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|s| !s.is_empty())
        .collect()
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Hard cut at `max_chars` characters; not word-boundary aware
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scores sentences by how often they mention "toll"
    struct TollCounter;

    #[async_trait]
    impl Embedder for TollCounter {
        fn name(&self) -> &'static str {
            "toll-counter"
        }

        fn dimension(&self) -> usize {
            1
        }

        async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| vec![t.to_lowercase().matches("toll").count() as f32])
                .collect())
        }
    }

    /// Every text gets the same vector
    struct Flat;

    #[async_trait]
    impl Embedder for Flat {
        fn name(&self) -> &'static str {
            "flat"
        }

        fn dimension(&self) -> usize {
            2
        }

        async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![0.5, 0.5]).collect())
        }
    }

    /// Reads the entry number from "Entry N ..." sentences; every third
    /// entry embeds to NaN
    struct Scattered;

    impl Scattered {
        fn score(entry: usize) -> f32 {
            if entry % 3 == 0 {
                f32::NAN
            } else {
                ((entry * 7919) % 101) as f32
            }
        }
    }

    #[async_trait]
    impl Embedder for Scattered {
        fn name(&self) -> &'static str {
            "scattered"
        }

        fn dimension(&self) -> usize {
            1
        }

        async fn embed_batch(&self, texts: &[String]) -> DomainResult<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| match t.split(' ').nth(1).and_then(|n| n.parse().ok()) {
                    Some(entry) => vec![Self::score(entry)],
                    None => vec![1.0],
                })
                .collect())
        }
    }

    fn semantic(embedder: impl Embedder + 'static) -> SemanticSummarizer {
        SemanticSummarizer::new(Arc::new(embedder), SummaryConfig::default())
    }

    fn chunks(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("First one.  Second\n one!Third? Last   bit");
        assert_eq!(sentences, vec!["First one.", "Second one!Third?", "Last bit"]);
        assert!(split_sentences("   ").is_empty());
        assert_eq!(split_sentences("v1.2 stays whole."), vec!["v1.2 stays whole."]);
    }

    #[tokio::test]
    async fn test_ranks_by_similarity() {
        let summarizer = semantic(TollCounter);
        let input = chunks(&[
            "Speed limits on the highway are strictly enforced by police. \
             Toll booths accept cards and toll tags at every toll plaza.",
            "A toll exemption applies to registered emergency vehicles.",
        ]);

        let summary = summarizer.summarize("toll", &input).await.unwrap();
        assert!(summary.starts_with("Toll booths accept cards"));
        assert!(summary.contains("toll exemption"));
        assert!(summary.ends_with("enforced by police."));
    }

    #[tokio::test]
    async fn test_nan_scores_rank_last() {
        let summarizer = semantic(Scattered);
        let text = (0..500)
            .map(|i| format!("Entry {i} in the long list."))
            .collect::<Vec<_>>()
            .join(" ");

        let summary = summarizer.summarize("entry", &[text]).await.unwrap();

        let mut ranked: Vec<usize> = (0..500).filter(|i| i % 3 != 0).collect();
        ranked.sort_by(|a, b| Scattered::score(*b).total_cmp(&Scattered::score(*a)));
        let expected = ranked[..5]
            .iter()
            .map(|i| format!("Entry {i} in the long list."))
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(summary, expected);
        assert!(summary.starts_with("Entry 32 in"));
    }

    #[tokio::test]
    async fn test_short_sentences_never_selected() {
        let summarizer = semantic(TollCounter);
        let input = chunks(&["Toll toll toll. This sentence has exactly six words."]);

        let summary = summarizer.summarize("toll", &input).await.unwrap();
        assert_eq!(summary, "This sentence has exactly six words.");
    }

    #[tokio::test]
    async fn test_noise_only_input_returns_sentinel() {
        let summarizer = semantic(TollCounter);
        let input = chunks(&["Page 1.", "Figure 2 shows.", ""]);

        let summary = summarizer.summarize("toll", &input).await.unwrap();
        assert_eq!(summary, NO_MEANINGFUL_SENTENCES);
        assert_eq!(
            summarizer.summarize("toll", &[]).await.unwrap(),
            NO_MEANINGFUL_SENTENCES
        );
    }

    #[tokio::test]
    async fn test_ties_keep_original_order() {
        let summarizer = SemanticSummarizer::new(
            Arc::new(Flat),
            SummaryConfig {
                max_sentences: 2,
                ..Default::default()
            },
        );
        let input = chunks(&[
            "Alpha sentence has six words here. Beta sentence has six words here.",
            "Gamma sentence has six words here.",
        ]);

        let summary = summarizer.summarize("anything", &input).await.unwrap();
        assert_eq!(
            summary,
            "Alpha sentence has six words here. Beta sentence has six words here."
        );
    }

    #[tokio::test]
    async fn test_output_bounded_by_max_chars() {
        let summarizer = SemanticSummarizer::new(
            Arc::new(Flat),
            SummaryConfig {
                max_chars: 40,
                ..Default::default()
            },
        );
        let long = "Ünïcode words fill this rather long sentence completely. ".repeat(10);

        let summary = summarizer.summarize("q", &[long]).await.unwrap();
        assert_eq!(summary.chars().count(), 40);
    }

    #[tokio::test]
    async fn test_keyword_keeps_matching_pieces() {
        let summarizer = KeywordSummarizer::new();
        let input = chunks(&[
            "Speed limits are posted. The TOLL exemption covers ambulances.",
            "Exemption forms are online. Parking is free",
        ]);

        let summary = summarizer.summarize("toll exemption", &input).await.unwrap();
        assert_eq!(
            summary,
            "The TOLL exemption covers ambulances. Exemption forms are online."
        );
    }

    #[tokio::test]
    async fn test_keyword_falls_back_to_first_pieces() {
        let summarizer = KeywordSummarizer::new();
        let input = chunks(&["One. Two. Three. Four."]);

        let summary = summarizer.summarize("zebra", &input).await.unwrap();
        assert_eq!(summary, "One Two Three...");
        assert_eq!(summarizer.strategy(), SummaryStrategy::Keyword);
    }
}

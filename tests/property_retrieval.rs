//! Property-based tests for chunking and search invariants
//!
//! 1. Window count: ceil(max(L - overlap, 0) / stride), or 1 when L <= size
//! 2. Coverage: every token lands in some chunk
//! 3. Overlap: adjacent full windows share exactly `overlap` tokens
//! 4. Search agrees with a brute-force reference under both metrics
//! 5. Hashing embeddings are unit length or zero

use docsift::adapters::embeddings::HashingEmbedder;
use docsift::domain::models::{Chunk, DistanceMetric};
use docsift::services::chunk_words;
use docsift::{FlatIndex, VectorSearch};
use proptest::prelude::*;

fn tokens_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}", 0..200)
}

fn window_params() -> impl Strategy<Value = (usize, usize)> {
    (1usize..40).prop_flat_map(|size| (Just(size), 0..size))
}

fn expected_windows(tokens: usize, size: usize, overlap: usize) -> usize {
    if tokens == 0 {
        0
    } else if tokens <= size {
        1
    } else {
        (tokens - overlap).div_ceil(size - overlap)
    }
}

proptest! {
    #[test]
    fn prop_window_count(tokens in tokens_strategy(), (size, overlap) in window_params()) {
        let text = tokens.join(" ");
        let chunks = chunk_words(&text, size, overlap).unwrap();
        prop_assert_eq!(chunks.len(), expected_windows(tokens.len(), size, overlap));
    }

    #[test]
    fn prop_every_token_covered(tokens in tokens_strategy(), (size, overlap) in window_params()) {
        let text = tokens.join(" ");
        let chunks = chunk_words(&text, size, overlap).unwrap();

        let stride = size - overlap;
        let mut covered = vec![false; tokens.len()];
        for (n, chunk) in chunks.iter().enumerate() {
            let start = n * stride;
            for (offset, word) in chunk.split_whitespace().enumerate() {
                prop_assert_eq!(word, tokens[start + offset].as_str());
                covered[start + offset] = true;
            }
        }
        prop_assert!(covered.iter().all(|c| *c));
    }

    #[test]
    fn prop_adjacent_windows_share_overlap(
        tokens in tokens_strategy(),
        (size, overlap) in window_params(),
    ) {
        let text = tokens.join(" ");
        let chunks = chunk_words(&text, size, overlap).unwrap();

        for pair in chunks.windows(2) {
            let left: Vec<&str> = pair[0].split_whitespace().collect();
            let right: Vec<&str> = pair[1].split_whitespace().collect();
            if right.len() == size {
                prop_assert_eq!(&left[size - overlap..], &right[..overlap]);
            }
        }
    }

    #[test]
    fn prop_search_matches_brute_force(
        points in prop::collection::vec((-10.0f32..10.0, -10.0f32..10.0), 1..30),
        query in (-10.0f32..10.0, -10.0f32..10.0),
        k in 1usize..40,
        cosine in any::<bool>(),
    ) {
        let metric = if cosine { DistanceMetric::Cosine } else { DistanceMetric::L2 };
        let vectors: Vec<Vec<f32>> = points.iter().map(|(x, y)| vec![*x, *y]).collect();
        let chunks = (0..points.len()).map(|i| Chunk::new(i, format!("p{i}"), "grid")).collect();
        let index = FlatIndex::build(vectors.clone(), chunks, metric).unwrap();

        let query = vec![query.0, query.1];
        let hits = index.search(&query, k).unwrap();

        let mut reference: Vec<(usize, f32)> = vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, metric.distance(&query, v)))
            .collect();
        reference.sort_by(|a, b| a.1.total_cmp(&b.1));
        reference.truncate(k);

        prop_assert_eq!(hits.len(), reference.len());
        for (hit, (_, distance)) in hits.iter().zip(&reference) {
            prop_assert!((hit.distance - distance).abs() < 1e-5);
        }
        prop_assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn prop_hashing_embeddings_are_normalized(text in "[a-zA-Z0-9 .,!?]{0,300}") {
        let embedder = HashingEmbedder::new(64).unwrap();
        let vector = embedder.embed_text(&text);
        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();

        prop_assert_eq!(vector.len(), 64);
        prop_assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-4);
        prop_assert_eq!(vector, embedder.embed_text(&text));
    }
}

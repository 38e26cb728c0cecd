//! Lexical chunk retrieval.
//!
//! Scores chunks against a question by case-insensitive word overlap, with a
//! bonus when the whole question appears verbatim in a chunk. Deterministic:
//! the same question against the same chunk sequence always produces the
//! same ranking, and equally scored chunks keep original document order.

use std::collections::HashSet;

use docqa_ingest::Chunk;
use thiserror::Error;

/// Score added when the full question string occurs verbatim in a chunk.
const PHRASE_BONUS: u32 = 5;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("question must not be empty")]
    EmptyQuestion,
}

/// Lowercased word set of `text`. Splitting on non-alphanumeric characters
/// keeps "budget?" matching "budget".
fn word_set(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Relevance score of one chunk for a question.
fn score_chunk(chunk: &Chunk, question_lower: &str, question_words: &HashSet<String>) -> u32 {
    let chunk_lower = chunk.text.to_lowercase();
    let chunk_words = word_set(&chunk_lower);

    let mut score = question_words.intersection(&chunk_words).count() as u32;
    if chunk_lower.contains(question_lower) {
        score += PHRASE_BONUS;
    }
    score
}

/// Select the `top_k` chunks most relevant to `question`, highest first.
///
/// Returns every chunk when the sequence has at most `top_k` entries. Ties
/// break on ascending chunk index (earlier chunk wins). An empty or
/// whitespace-only question is an input error.
pub fn retrieve<'a>(
    chunks: &'a [Chunk],
    question: &str,
    top_k: usize,
) -> Result<Vec<&'a Chunk>, RetrievalError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(RetrievalError::EmptyQuestion);
    }

    let question_lower = question.to_lowercase();
    let question_words = word_set(&question_lower);

    let mut scored: Vec<(u32, &Chunk)> = chunks
        .iter()
        .map(|c| (score_chunk(c, &question_lower, &question_words), c))
        .collect();
    // Stable sort over an index-ordered input gives the original-order tie-break.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let selected: Vec<&Chunk> = scored.into_iter().take(top_k).map(|(_, c)| c).collect();
    tracing::debug!(
        "Retrieved {}/{} chunks for question ({} words)",
        selected.len(),
        chunks.len(),
        question_words.len()
    );
    Ok(selected)
}

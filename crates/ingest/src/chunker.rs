//! Fixed-window overlap chunker.
//!
//! Splits normalized document text into character windows of a configured
//! maximum length, with a configured overlap between consecutive windows so
//! context is not lost at chunk boundaries. Windows preserve reading order.

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for the chunking engine.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Maximum characters per chunk (default: 2000).
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks (default: 200).
    pub chunk_overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 2000,
            chunk_overlap: 200,
        }
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A contiguous span of document text, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 0-based position within the document.
    pub index: usize,
    /// The chunk text content.
    pub text: String,
    /// Character offset of the window start in the document.
    pub start: usize,
    /// Character offset one past the window end.
    pub end: usize,
}

// ── Chunking ────────────────────────────────────────────────────────────────

/// Split `text` into overlapping character windows.
///
/// Each window covers at most `chunk_size` characters; consecutive windows
/// share `chunk_overlap` characters. Offsets are in characters, and slicing
/// always happens on `char` boundaries. Empty text yields no chunks.
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Vec<Chunk> {
    // Byte offset of every char boundary, plus the end of the string, so a
    // character window [a, b) maps to the byte range boundaries[a]..boundaries[b].
    let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    boundaries.push(text.len());
    let char_count = boundaries.len() - 1;

    if char_count == 0 || config.chunk_size == 0 {
        return Vec::new();
    }

    // Overlap must leave the window a forward step, or chunking never ends.
    let overlap = config.chunk_overlap.min(config.chunk_size - 1);

    let mut chunks = Vec::new();
    let mut start = 0usize;
    loop {
        let end = (start + config.chunk_size).min(char_count);
        chunks.push(Chunk {
            index: chunks.len(),
            text: text[boundaries[start]..boundaries[end]].to_string(),
            start,
            end,
        });
        if end == char_count {
            break;
        }
        start = end - overlap;
    }
    chunks
}

// ── Tests ───────────────────────────────────────────────────────────────────

pub mod chunker;
pub mod extract;

pub use chunker::{chunk_text, Chunk, ChunkConfig};
pub use extract::{extract_document, ExtractedDocument, ExtractionError};

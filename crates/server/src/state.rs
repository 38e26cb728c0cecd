use docqa_core::Config;
use docqa_ingest::ChunkConfig;
use docqa_llm::AnswerGenerator;

use crate::sessions::SessionStore;

pub struct AppState {
    pub sessions: SessionStore,
    pub generator: AnswerGenerator,
    pub chunking: ChunkConfig,
    pub top_k: usize,
    pub max_file_size: usize,
}

impl AppState {
    pub fn new(config: &Config, generator: AnswerGenerator) -> Self {
        Self {
            sessions: SessionStore::new(),
            generator,
            chunking: ChunkConfig {
                chunk_size: config.ingest.chunk_size,
                chunk_overlap: config.ingest.chunk_overlap,
            },
            top_k: config.retrieval.top_k,
            max_file_size: config.ingest.max_file_size,
        }
    }
}

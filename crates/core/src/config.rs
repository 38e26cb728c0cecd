use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ingest: IngestConfig,
    pub retrieval: RetrievalConfig,
    pub llm: LlmConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            ingest: IngestConfig::from_env(),
            retrieval: RetrievalConfig::from_env(),
            llm: LlmConfig::from_env(),
        }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  server:    {}:{}", self.server.host, self.server.port);
        tracing::info!(
            "  ingest:    max_file_size={}B, chunk_size={}, overlap={}",
            self.ingest.max_file_size,
            self.ingest.chunk_size,
            self.ingest.chunk_overlap
        );
        tracing::info!("  retrieval: top_k={}", self.retrieval.top_k);
        tracing::info!(
            "  llm:       model={}, api_key={}",
            self.llm.model,
            if self.llm.is_configured() { "set" } else { "(missing)" }
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_u16("PORT", 5001),
        }
    }
}

// ── Ingest ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Maximum accepted upload size in bytes.
    pub max_file_size: usize,
    /// Maximum characters per chunk.
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks.
    pub chunk_overlap: usize,
}

impl IngestConfig {
    fn from_env() -> Self {
        Self {
            max_file_size: env_usize("MAX_FILE_SIZE", 16 * 1024 * 1024),
            // A zero chunk size would make every ingest produce an empty
            // chunk sequence; clamp so sessions always hold at least one chunk.
            chunk_size: env_usize("CHUNK_SIZE", 2000).max(1),
            chunk_overlap: env_usize("CHUNK_OVERLAP", 200),
        }
    }
}

// ── Retrieval ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of chunks handed to the answer generator.
    pub top_k: usize,
}

impl RetrievalConfig {
    fn from_env() -> Self {
        Self {
            top_k: env_usize("RETRIEVAL_TOP_K", 3),
        }
    }
}

// ── LLM (Gemini) ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub google_api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl LlmConfig {
    fn from_env() -> Self {
        Self {
            google_api_key: env_opt("GOOGLE_API_KEY"),
            model: env_or("GEMINI_MODEL", "gemini-2.5-flash"),
            temperature: env_or("LLM_TEMPERATURE", "0.2").parse().unwrap_or(0.2),
            max_tokens: env_u32("LLM_MAX_TOKENS", 1024),
            timeout_secs: env_opt("LLM_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.google_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test owns the CHUNK_SIZE variable: env mutation is process-wide
    // and parallel tests would race on it.
    #[test]
    fn zero_chunk_size_is_clamped_to_one() {
        std::env::remove_var("CHUNK_SIZE");
        assert_eq!(IngestConfig::from_env().chunk_size, 2000);

        std::env::set_var("CHUNK_SIZE", "0");
        assert_eq!(IngestConfig::from_env().chunk_size, 1);
        std::env::remove_var("CHUNK_SIZE");
    }
}

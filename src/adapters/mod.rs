// Adapters layer: concrete implementations for external systems (pdf parsing, storage, structuring service).

pub mod gemini;
pub mod pdf;
pub mod storage;

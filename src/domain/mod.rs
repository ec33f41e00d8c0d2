//! Domain Layer - 领域层
//!
//! 文本分块算法，纯函数实现，无 I/O

mod chunker;

pub use chunker::{chunk_text, ChunkConfig, Segment, DEFAULT_MAX_CHUNK_CHARS};

//! In-memory full-text search: an inverted index over short documents with
//! TF-IDF ranking, inclusion/exclusion queries, document removal and
//! near-duplicate detection.

pub mod concurrent_map;
pub mod document;
pub mod duplicates;
pub mod error;
pub mod index;
pub mod log_duration;
pub mod paginate;
pub mod process_queries;
pub mod query;
pub mod ranking;
pub mod request_queue;
pub mod search_server;
pub mod shared;
pub mod tokenizer;

pub use concurrent_map::ConcurrentMap;
pub use document::{DocId, DocumentPredicate, DocumentRecord, DocumentStatus, ScoredDocument, WithStatus};
pub use error::{Result, SearchError};
pub use index::InvertedIndex;
pub use paginate::{paginate, Page};
pub use process_queries::{process_queries, process_queries_joined};
pub use query::Query;
pub use ranking::{ExecutionPolicy, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
pub use request_queue::RequestQueue;
pub use search_server::{DocumentMatch, SearchServer};
pub use shared::SharedSearchServer;
pub use tokenizer::StopWords;

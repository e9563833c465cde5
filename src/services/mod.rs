pub mod answer_resolver;
pub mod corpus_cache;
pub mod record_fetcher;
pub mod sampler;

pub use corpus_cache::{CachedCorpusEntry, CorpusCache};
pub use record_fetcher::{HttpRecordFetcher, RecordFetcher};

pub mod blob_store;
pub mod clock;
pub mod random;

pub use blob_store::{BlobStore, FsBlobStore, HttpBlobStore};
pub use clock::{Clock, ManualClock, SystemClock};
pub use random::{OsRandom, RandomSource, SeededRandom};

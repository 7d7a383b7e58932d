//! Seam traits: the store capability contract and the engine-facing
//! query interface.

mod search;
mod store;

pub use search::ISearch;
pub use store::ICorpusStore;

//! Bundled [`FileSource`](crate::FileSource) implementations.

pub mod local;
pub mod memory;

pub use local::LocalFiles;
pub use memory::InMemoryFiles;

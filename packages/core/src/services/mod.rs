//! Business Services
//!
//! - `TreeDuplicator` - recursive page tree duplication
//!
//! Services coordinate between the store layer and callers, implementing
//! the duplication rules on top of the `NodeStore` boundary.

pub mod duplicator;
pub mod error;

pub use duplicator::TreeDuplicator;
pub use error::DuplicationError;

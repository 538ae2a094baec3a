mod concurrent_set;
mod stamped_ptr;

pub use concurrent_set::{ConcurrentSet, SetNode};
pub(crate) use stamped_ptr::{DELETED, LIVE, StampedPtr};

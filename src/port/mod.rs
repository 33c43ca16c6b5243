pub mod allocator;
pub mod probe;

pub use allocator::PortAllocator;
pub use probe::{LoopbackProbe, PortProbe};

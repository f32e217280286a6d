pub mod buffer;
pub mod pool;

pub use buffer::GrowableBuffer;
pub use pool::{ArrayPool, Pooled};

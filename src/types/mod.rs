mod bucket;
mod channel;
mod depth;
mod error;

pub use bucket::*;
pub use channel::*;
pub use depth::*;
pub use error::*;

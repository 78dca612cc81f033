pub mod builder;
pub mod definition;
pub mod snapshot;

pub use builder::*;
pub use definition::*;
pub use snapshot::*;

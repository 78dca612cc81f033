pub mod instance;
pub mod value;

pub use instance::*;
pub use value::*;

//! Safe SQL builder: identifiers from `Table` only, values as parameters.

mod builder;
pub use builder::*;

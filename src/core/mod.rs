pub mod classify;
pub mod date;
pub mod value;
pub mod value_path;

pub use classify::{Classification, Kind, classify};
pub use value::Value;
pub use value_path::{PathSegment, ValuePath};

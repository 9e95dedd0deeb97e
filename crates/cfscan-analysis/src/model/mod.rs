//! Data model - one record type per element kind plus the file catalog entry.
//!
//! Every record is created once during extraction. The only post-creation
//! field is `used_in` on functions and components, filled when the result
//! is assembled from the resolver's usage map.

mod elements;
mod files;

pub use elements::*;
pub use files::*;

//! Static world content: the built-in mob table and world areas, plus a
//! loader for JSON content directories layered on top of them.

pub mod builtin;
pub mod error;
pub mod loader;

pub use error::ContentError;
pub use loader::{load_content, Content};

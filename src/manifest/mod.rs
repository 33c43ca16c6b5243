//! Compose manifest model, construction and output.
//!
//! - `types` - the compose document (`Manifest`, `ServiceDescriptor`, ...)
//! - `builder` - backend planning and composition (`ManifestBuilder`, `compose`)
//! - `writer` - YAML rendering and atomic replacement (`ManifestWriter`)

mod builder;
mod duration;
mod types;
mod writer;

pub use builder::*;
pub use duration::format_duration;
pub use types::*;
pub use writer::ManifestWriter;

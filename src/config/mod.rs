//! Configuration parsing and types.
//!
//! - `types` - the `config.json` model (`Config`)
//! - `parser` - loading and parsing (`Parser`)
//! - `settings` - per-run parameters (`GeneratorSettings`)

mod parser;
mod settings;
mod types;

pub use parser::*;
pub use settings::*;
pub use types::*;

//! YAML bridge: parsing documents into generic trees and serializing them
//! back to text.
//!
//! The engine does all of its slow-path work over `serde_yaml::Value`
//! trees; this module owns the two crossings between text and tree.

pub mod emitter;
pub mod parser;

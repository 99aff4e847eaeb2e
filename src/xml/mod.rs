//! Minimal round-tripping XML tree for WordprocessingML parts.

mod io;
mod node;

pub use io::{parse, serialize, XmlDecl};
pub use node::{Element, XmlNode};

pub mod emitter;
pub mod error;
pub mod geometry;
pub mod id;
pub mod model;
pub mod parser;

pub use emitter::{emit_markup, emit_svg_document};
pub use error::ParseError;
pub use geometry::{Geometry, Positions};
pub use id::NodeId;
pub use model::*;
pub use parser::parse_markup;

// Re-export petgraph and kurbo types so downstream crates agree on versions
pub use kurbo;
pub use petgraph::graph::NodeIndex;

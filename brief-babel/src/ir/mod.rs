//! Intermediate Representation (IR) for digest documents
//!
//! Parsing produces the IR and every serializer consumes it. It is a flat list of blocks;
//! article boundaries are marked by [`nodes::Block::Separator`].

pub mod nodes;

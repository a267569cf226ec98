//! Node types generated by `syntax-tblgen` from its test schema.
//!
//! The build script regenerates them on every schema or generator change, so
//! the tests in this crate always run the generator's current output against
//! the `syntax-tree` runtime.

pub mod nodes {
    include!(concat!(env!("OUT_DIR"), "/nodes.rs"));
}

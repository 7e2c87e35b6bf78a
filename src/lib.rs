//! Navigational core for a schema-validation library.
//!
//! Resolve a dotted/bracketed path expression like `"a.b[2].c"` against a
//! tree of composable schema nodes (and an optional concrete value) to the
//! subschema governing that location, together with the ancestry chain
//! conditional schema logic needs to collapse to a concrete shape.
//!
//! Design goals:
//! - Call-local state only; every resolution is a pure fold over segments.
//! - Failures name the offending segment and the full path.
//! - Array/tuple index hops refine in place; only object-field descents
//!   grow the ancestry chain.

pub mod de;
pub mod reach;
pub mod schema;
pub mod segment;

pub use reach::{locate, locate_resolved, reach, Located, ReachError};
pub use schema::{Ancestor, Reference, ResolveContext, ScalarKind, Schema, When};

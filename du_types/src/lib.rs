//! Declaration Manifest Types
//!
//! This crate contains the data structures describing C# declarations that
//! the discriminated union generator consumes. It provides pure data types
//! without any file I/O or code generation logic.

pub mod syntax;
pub mod type_syntax;

// Re-export commonly used types at the crate root
pub use syntax::*;
pub use type_syntax::{NameSegment, TupleElement, TypeSyntax, TypeSyntaxError, PREDEFINED_TYPES};

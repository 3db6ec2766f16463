//! Declaration Manifest Loading and Semantic Queries
//!
//! This crate loads declaration manifests from disk, resolves imports between
//! them, and answers the questions the generator asks of a compilation: which
//! type declarations carry the marker attribute, what their ancestry looks
//! like, and what the declared symbols and their member signatures are.

pub mod cancel;
pub mod compilation;
pub mod error;
pub mod file;
pub mod resolver;
pub mod semantic;

// Re-export commonly used types at the crate root
pub use cancel::CancellationToken;
pub use compilation::{is_marker_attribute, Candidate, Compilation, SyntaxNode, SyntaxPath};
pub use error::LoadError;
pub use file::SourceFile;
pub use resolver::ImportResolver;
pub use semantic::{MemberSymbol, MethodSymbol, ParameterSymbol, SemanticModel, TypeSymbol};

// Re-export du_types for convenience
pub use du_types;

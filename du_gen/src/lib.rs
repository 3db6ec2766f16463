//! Discriminated Union Source Generation
//!
//! Turns marked C# type declarations into the supporting implementation of a
//! closed sum type: case storage, factories, an exhaustive `Match`, and a
//! default `ToString`. The pipeline is
//! candidate -> [`parser`] -> [`model`] -> [`render`] -> [`sink`], driven by
//! [`generator::Generator`].

pub mod attribute;
pub mod cmds;
pub mod generator;
pub mod model;
pub mod names;
pub mod options;
pub mod parser;
pub mod render;
pub mod sink;

pub use generator::{GenerationReport, Generator};
pub use model::DiscriminatedUnionTypeInfo;
pub use options::{GeneratorOptions, ReferenceStyle};
pub use sink::{DirectorySink, EmissionSink, EmitError, MemorySink};

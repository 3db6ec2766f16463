/* Generator configuration, populated from CLI flags */

use serde_derive::Serialize;

/* How reference-type unions expose their cases to match handlers */
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceStyle {
    /* Handlers receive a `Cases.X` interface */
    #[default]
    Capability,
    /* Handlers receive the stored values; case types are file-local */
    Flat,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GeneratorOptions {
    pub reference_style: ReferenceStyle,
    /* Emit the marker attribute source alongside the unions */
    pub emit_attribute: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            reference_style: ReferenceStyle::Capability,
            emit_attribute: true,
        }
    }
}

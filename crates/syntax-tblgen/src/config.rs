//! Configuration for code generation.

/// Path the emitted code imports the runtime prelude from, unless overridden.
pub const DEFAULT_RUNTIME_CRATE: &str = "syntax_tree";

/// Language of the emitted source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Language {
    #[default]
    Rust,
}

/// Configuration for code generation.
///
/// ```ignore
/// let config = GeneratorConfig::builder()
///     .runtime_crate("crate::syntax")
///     .build();
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct GeneratorConfig {
    /// Path of the runtime crate whose `prelude` interface output imports.
    #[builder(into, default = DEFAULT_RUNTIME_CRATE.to_string())]
    pub runtime_crate: String,

    #[builder(default)]
    pub language: Language,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

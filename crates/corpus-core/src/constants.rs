/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Connector tokens that mark a compound phrase as technical jargon
/// rather than a definitional mention ("caching search", "cache api").
pub const TECHNICAL_CONNECTORS: &[&str] = &["search", "api", "tool", "function"];

/// Vocabulary that marks a document as definitional.
pub const DEFINITIONAL_INDICATORS: &[&str] =
    &["what is", "definition", "overview", "introduction", "about"];

/// Query prefixes that signal conceptual ("what is X") intent.
pub const CONCEPTUAL_PREFIXES: &[&str] = &["what is ", "what are ", "define ", "overview of "];

/// Maximum content length carried into a response snippet.
pub const SNIPPET_MAX_CHARS: usize = 500;

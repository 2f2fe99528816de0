//! Generator-wide configuration
//!
//! Per-type configuration comes from markers; this covers what applies to every artifact of a run.

use crate::version::FASTFIELD_VERSION;

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Stamp a generation timestamp into artifact headers (breaks byte-identical output)
    pub emit_timestamp: bool,
    /// Emit `#[allow(..)]` on generated items
    pub lint_allows: bool,
    /// Tool identity written into the generation marker
    pub tool_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            emit_timestamp: false,
            lint_allows: true,
            tool_name: "fastfield".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the header timestamp
    pub fn with_timestamp(mut self, enabled: bool) -> Self {
        self.emit_timestamp = enabled;
        self
    }

    /// Enable or disable lint allowances on generated items
    pub fn with_lint_allows(mut self, enabled: bool) -> Self {
        self.lint_allows = enabled;
        self
    }

    /// Set the tool identity
    pub fn with_tool_name(mut self, name: impl Into<String>) -> Self {
        self.tool_name = name.into();
        self
    }

    /// Tool identity and version, as written into the generation marker.
    pub fn tool_identity(&self) -> String {
        format!("{} {}", self.tool_name, FASTFIELD_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_reproducible() {
        let config = GeneratorConfig::default();
        assert!(!config.emit_timestamp);
        assert!(config.lint_allows);
        assert_eq!(config.tool_name, "fastfield");
    }

    #[test]
    fn test_builder_methods() {
        let config = GeneratorConfig::new()
            .with_timestamp(true)
            .with_lint_allows(false)
            .with_tool_name("custom");
        assert!(config.emit_timestamp);
        assert!(!config.lint_allows);
        assert_eq!(config.tool_name, "custom");
    }

    #[test]
    fn test_tool_identity_includes_version() {
        let config = GeneratorConfig::default();
        assert_eq!(config.tool_identity(), format!("fastfield {FASTFIELD_VERSION}"));
    }
}

//! Command options

use smol_str::SmolStr;

/// Options shared by every command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOptions {
    /// Prepended to each command identifier, separated by a `.`
    pub identifier_prefix: SmolStr,
    /// Content types the commands accept
    pub supported_content_types: Vec<SmolStr>,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            identifier_prefix: SmolStr::new_static("AccessNinja"),
            supported_content_types: vec![
                SmolStr::new_static("public.swift-source"),
                SmolStr::new_static("com.apple.dt.playground"),
            ],
        }
    }
}

impl CommandOptions {
    pub fn supports(&self, content_type: &str) -> bool {
        self.supported_content_types.iter().any(|t| t == content_type)
    }
}

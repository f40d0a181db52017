//! Configuration for writing key templates

/// Configuration options for template output
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Command shown in the provenance header
    pub command: String,

    /// Write header and body with one call instead of two
    pub single_write: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            command: "tinkey create-key-template".to_string(),
            single_write: false,
        }
    }
}

impl WriterConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the command shown in the provenance header
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Set whether header and body go out in a single write
    pub fn with_single_write(mut self, single_write: bool) -> Self {
        self.single_write = single_write;
        self
    }
}

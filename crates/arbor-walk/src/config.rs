//! Walk configuration types.

use derive_builder::Builder;

use crate::filter::Filter;

/// Configuration for a construction pass.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WalkConfig {
    /// Stably sort directory entries by name before processing. When off,
    /// entries are processed in whatever order the OS returns, which is not
    /// guaranteed stable across platforms or runs.
    #[builder(default = "false")]
    pub sort: bool,

    /// Entry filter; None includes everything.
    #[builder(default)]
    pub filter: Option<Filter>,

    /// Entry names skipped unconditionally, before the filter runs.
    #[builder(default = "default_ignore()")]
    pub ignore: Vec<String>,
}

fn default_ignore() -> Vec<String> {
    vec![".DS_Store".to_string()]
}

impl WalkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref ignore) = self.ignore {
            if ignore.iter().any(|name| name.is_empty()) {
                return Err("Ignore entries cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl WalkConfig {
    /// Create a new walk config builder.
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Check if an entry name is in the ignore set.
    pub fn should_ignore(&self, name: &str) -> bool {
        self.ignore.iter().any(|ignored| ignored == name)
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            sort: false,
            filter: None,
            ignore: default_ignore(),
        }
    }
}

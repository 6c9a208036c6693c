//! Template compiler configuration.
//!
//! [`TemplateConfig`] tells a compilation pass where to look, which files
//! qualify, and whether a shared layout wraps every template. It is supplied
//! by the host application at installation time and never mutated afterwards;
//! development-mode reloading rebuilds the derived [`TemplateSet`] from it
//! wholesale rather than editing it in place.
//!
//! [`TemplateSet`]: crate::TemplateSet

use std::path::PathBuf;

/// Default template file suffix.
pub const DEFAULT_EXTENSION: &str = ".tmpl";

/// Configuration for template discovery and compilation.
///
/// # Example
///
/// ```rust,ignore
/// use veneer_templates::TemplateConfig;
///
/// let config = TemplateConfig::new("templates")
///     .with_extension(".html")
///     .with_layout("layout");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfig {
    /// Root directory scanned recursively for template files.
    pub directory: PathBuf,
    /// Required file suffix (e.g. `.tmpl`) for a file to be treated as a
    /// template. Files without this suffix are ignored.
    pub extension: String,
    /// Logical name of an optional shared layout template. When set, every
    /// template is compiled jointly with the layout and rendering executes
    /// the layout, which in turn pulls in the requested template.
    pub layout: Option<String>,
}

impl TemplateConfig {
    /// Creates a configuration rooted at `directory` with the default
    /// `.tmpl` extension and no layout.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            layout: None,
        }
    }

    /// Sets the required file suffix. Include the leading dot.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets the logical name of the shared layout template.
    ///
    /// The layout file itself is never independently addressable: it is
    /// excluded from the compiled mapping and only reachable through the
    /// templates compiled against it.
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    /// On-disk path of the configured layout file, if a layout is set.
    pub(crate) fn layout_path(&self) -> Option<PathBuf> {
        self.layout
            .as_ref()
            .map(|layout| self.directory.join(format!("{}{}", layout, self.extension)))
    }
}

/// Compile-time settings captured by a [`CompiledPath`](crate::CompiledPath).
///
/// The default is lenient: `set` creates missing objects, arrays and keys and
/// grows arrays past their end. The strict switches turn each of those into a
/// `NotFound` error instead. `get` behaves the same in both modes for data that
/// exists.
///
/// ```
/// use pathkit::Options;
///
/// let options = Options::new().strict_maps().field_tag("json");
/// assert!(options.rejects_missing_keys());
/// assert!(!options.rejects_missing_indexes());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Reject any missing structure on `set`; implies both switches below
    pub strict_paths: bool,
    /// Reject `set` through object keys that do not exist yet
    pub strict_maps: bool,
    /// Reject `set` at array positions past the end
    pub strict_slices: bool,
    /// Name of the alias table used to address record fields
    pub field_tag: Option<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self) -> Self {
        self.strict_paths = true;
        self
    }

    pub fn strict_maps(mut self) -> Self {
        self.strict_maps = true;
        self
    }

    pub fn strict_slices(mut self) -> Self {
        self.strict_slices = true;
        self
    }

    pub fn field_tag(mut self, tag: impl Into<String>) -> Self {
        self.field_tag = Some(tag.into());
        self
    }

    pub fn rejects_missing_keys(&self) -> bool {
        self.strict_paths || self.strict_maps
    }

    pub fn rejects_missing_indexes(&self) -> bool {
        self.strict_paths || self.strict_slices
    }
}

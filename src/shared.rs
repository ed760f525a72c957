use std::collections::HashMap;

/// Reserved `base_address_class` values which mark synthetic pseudo-symbols
/// rather than real code addresses.
pub mod address_class {
    /// The synthetic root node of a call tree.
    pub const ROOT: u32 = 0;
    /// An address that could not be resolved to any symbol.
    pub const UNRESOLVED: u32 = 1;
    /// A row for which symbol display does not apply.
    pub const NOT_APPLICABLE: u32 = 2;
    /// The idle pseudo-frame.
    pub const IDLE: u32 = 3;
}

/// The coarse usage classification of a symbol's owning image, as reported
/// by the symbol-resolution subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UsageType(pub u32);

impl UsageType {
    /// The value which marks dynamically compiled (jitted) code.
    pub const JITTED: UsageType = UsageType(4);

    pub fn is_jitted(self) -> bool {
        self == UsageType::JITTED
    }
}

/// The symbol metadata consumed by [`format_symbol`](crate::format_symbol).
///
/// All fields are supplied by an external symbol-resolution subsystem; this
/// crate only reads them. Everything is borrowed, so a `SymbolData` can be
/// assembled cheaply per formatting call from whatever storage the caller
/// keeps its symbol table in.
#[derive(Clone, Copy, Debug)]
pub struct SymbolData<'a> {
    /// Sentinel classification of the symbol's base address; the values in
    /// [`address_class`] select fixed pseudo-symbol strings.
    pub base_address_class: u32,
    /// The raw (mangled) symbol name.
    pub name: &'a str,
    /// File name of the owning module. Preferred over
    /// `image_original_file_name` when non-empty.
    pub image_file_name: &'a str,
    /// Fallback source for the owning module's file name.
    pub image_original_file_name: &'a str,
    /// Usage classification; [`UsageType::JITTED`] selects the jitted name
    /// grammar.
    pub usage: UsageType,
    /// Zero on success; any other value indexes the caller's
    /// [`FailureDescriptions`] table.
    pub load_failure_code: u32,
}

/// Source of human-readable descriptions for symbol load failure codes.
///
/// The table itself is owned by the caller; this crate queries it only when
/// `load_failure_code` is nonzero. A missing entry must not fail the lookup,
/// it just means the generic `"Unknown failure"` label gets used.
pub trait FailureDescriptions {
    fn description_for(&self, code: u32) -> Option<&str>;
}

/// No failure descriptions at all. Every nonzero failure code renders as
/// `"Unknown failure"`.
impl FailureDescriptions for () {
    fn description_for(&self, _code: u32) -> Option<&str> {
        None
    }
}

impl FailureDescriptions for HashMap<u32, String> {
    fn description_for(&self, code: u32) -> Option<&str> {
        self.get(&code).map(String::as_str)
    }
}

/// A simple owned failure-description table.
#[derive(Clone, Debug, Default)]
pub struct SymbolLoadFailureTable {
    descriptions: HashMap<u32, String>,
}

impl SymbolLoadFailureTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: u32, description: impl Into<String>) {
        self.descriptions.insert(code, description.into());
    }
}

impl FailureDescriptions for SymbolLoadFailureTable {
    fn description_for(&self, code: u32) -> Option<&str> {
        self.descriptions.description_for(code)
    }
}

impl<S: Into<String>> FromIterator<(u32, S)> for SymbolLoadFailureTable {
    fn from_iter<I: IntoIterator<Item = (u32, S)>>(iter: I) -> Self {
        SymbolLoadFailureTable {
            descriptions: iter
                .into_iter()
                .map(|(code, description)| (code, description.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn failure_table_lookup() {
        let table: SymbolLoadFailureTable =
            [(1, "Symbol file not found"), (3, "Timed out")].into_iter().collect();
        assert_eq!(table.description_for(1), Some("Symbol file not found"));
        assert_eq!(table.description_for(3), Some("Timed out"));
        assert_eq!(table.description_for(2), None);
        assert_eq!(().description_for(1), None);
    }
}

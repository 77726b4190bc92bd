//! Custom vocabulary seen while encoding.
//!
//! Names outside the static registry travel inline in the stream, so the
//! decoder never needs this table. It exists so callers can see which custom
//! names their documents use and, via [`ExtensionTable::listing`], get
//! registry lines with provisional codes for promoting them to static codes.

use indexmap::IndexSet;

use htmlbin_core::registry;
use htmlbin_core::Vocabulary;

/// Insertion-ordered sets of custom element and attribute names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionTable {
    elements: IndexSet<String>,
    attributes: IndexSet<String>,
}

impl ExtensionTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, vocabulary: Vocabulary) -> &IndexSet<String> {
        match vocabulary {
            Vocabulary::Element => &self.elements,
            Vocabulary::Attribute => &self.attributes,
        }
    }

    /// Record a name, returning true the first time it is seen
    pub fn register(&mut self, vocabulary: Vocabulary, name: &str) -> bool {
        let set = match vocabulary {
            Vocabulary::Element => &mut self.elements,
            Vocabulary::Attribute => &mut self.attributes,
        };
        if set.contains(name) {
            return false;
        }
        set.insert(name.to_string())
    }

    pub fn contains(&self, vocabulary: Vocabulary, name: &str) -> bool {
        self.set(vocabulary).contains(name)
    }

    /// Names in first-seen order
    pub fn names(&self, vocabulary: Vocabulary) -> impl Iterator<Item = &str> {
        self.set(vocabulary).iter().map(String::as_str)
    }

    /// Provisional code for a registered name: codes continue sequentially
    /// after the highest static code of the vocabulary
    pub fn provisional_code(&self, vocabulary: Vocabulary, name: &str) -> Option<usize> {
        let index = self.set(vocabulary).get_index_of(name)?;
        Some(usize::from(registry::max_code(vocabulary)) + 1 + index)
    }

    /// Total number of registered names
    pub fn len(&self) -> usize {
        self.elements.len() + self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registry source lines for the registered names, one per line:
    /// `CONST_NAME("name", code),`
    pub fn listing(&self, vocabulary: Vocabulary) -> String {
        let first = usize::from(registry::max_code(vocabulary)) + 1;
        let mut out = String::new();
        for (index, name) in self.set(vocabulary).iter().enumerate() {
            let constant: String = name
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
                .collect();
            out.push_str(&format!("{constant}(\"{name}\", {}),\n", first + index));
        }
        out
    }
}

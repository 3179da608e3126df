//! String interner implementation using DashMap for concurrent access.
//!
//! The table is keyed by string content, so a hash collision degrades into
//! an ordinary bucket probe instead of a wrong answer. A reverse map gives
//! O(1) symbol-to-string resolution.

use ahash::RandomState;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

use super::{Symbol, KNOWN_SYMBOLS};

/// Global string table instance
///
/// Initialized on first use. The known symbols are interned first, in
/// order, so their indices match the constants in the parent module.
pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    for name in KNOWN_SYMBOLS {
        table.intern(name);
    }
    table
});

/// Thread-safe string table
pub struct StringTable {
    /// Maps string content to its symbol index
    names: DashMap<&'static str, u32, RandomState>,

    /// Maps symbol index back to string content
    strings: DashMap<u32, &'static str, RandomState>,

    /// Next index to hand out (atomic for lock-free increment)
    next_index: AtomicU32,
}

impl StringTable {
    fn new() -> Self {
        Self {
            names: DashMap::with_hasher(RandomState::new()),
            strings: DashMap::with_hasher(RandomState::new()),
            next_index: AtomicU32::new(0),
        }
    }

    /// Intern a string
    ///
    /// Fast path is a single lookup on the content map. On a miss the
    /// string is copied, leaked to obtain the `'static` lifetime, and
    /// registered in both directions. A racing intern of the same string
    /// wastes at most one small allocation; both racers observe the same
    /// index.
    pub fn intern(&self, string: &str) -> Symbol {
        if let Some(index) = self.names.get(string) {
            return Symbol { index: *index };
        }

        let owned: &'static str = Box::leak(string.to_owned().into_boxed_str());
        let index = *self
            .names
            .entry(owned)
            .or_insert_with(|| self.next_index.fetch_add(1, Ordering::SeqCst));
        self.strings.insert(index, owned);

        Symbol { index }
    }

    /// Resolve a symbol back to its string
    ///
    /// Symbols are only ever produced by `intern`, so resolution cannot
    /// miss for well-formed symbols.
    pub fn resolve(&self, symbol: Symbol) -> &'static str {
        self.strings
            .get(&symbol.index)
            .map(|entry| *entry)
            .unwrap_or("<unknown>")
    }

    /// Number of distinct interned strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns true if nothing has been interned yet
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_starts_with_known_symbols() {
        // Touching the table forces initialization.
        let _ = STRING_TABLE.intern("anything");
        assert!(STRING_TABLE.len() >= KNOWN_SYMBOLS.len());
        assert!(!STRING_TABLE.is_empty());
    }

    #[test]
    fn test_intern_resolve() {
        let sym = STRING_TABLE.intern("resolve_target");
        assert_eq!(STRING_TABLE.resolve(sym), "resolve_target");
    }

    #[test]
    fn test_repeat_intern_is_stable() {
        let first = STRING_TABLE.intern("stable_name");
        let len_after_first = STRING_TABLE.len();
        let second = STRING_TABLE.intern("stable_name");
        assert_eq!(first, second);
        assert_eq!(STRING_TABLE.len(), len_after_first);
    }
}

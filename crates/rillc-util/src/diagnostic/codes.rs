//! Diagnostic codes for categorizing compiler errors and warnings.
//!
//! Codes follow the format `{prefix}{number}` ("E" for errors, "W" for
//! warnings) so users can reference and suppress specific diagnostics.
//! The semantic phase owns the `3xxx` range.

/// A unique code identifying a diagnostic message
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    /// The prefix ("E" for error, "W" for warning)
    pub prefix: &'static str,
    /// The numeric identifier
    pub number: u32,
}

impl DiagnosticCode {
    /// Create a new diagnostic code
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    /// Get the full code string (e.g., "E3001")
    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // =========================================================================
    // SEMANTIC ERROR CODES (E3001-E3999)
    // =========================================================================

    /// E3001: two expressions whose types must be compatible are not
    pub const E_MISMATCH: Self = Self::new("E", 3001);
    /// E3002: a context requires a class of types (numeric, pointer, ...)
    pub const E_TYPE_EXPECTED: Self = Self::new("E", 3002);
    /// E3003: a context requires a specific type (return, initializer, argument)
    pub const E_TYPE_EXPECTED_SPECIFIC: Self = Self::new("E", 3003);
    /// E3004: the target of `=`, `++`, `--`, `&` must be addressable
    pub const E_LVALUE_REQUIRED: Self = Self::new("E", 3004);
    /// E3005: wrong number of arguments, fields, or initializer elements
    pub const E_DEGREE: Self = Self::new("E", 3005);
    /// E3006: the field name does not exist in the record
    pub const E_UNKNOWN_MEMBER: Self = Self::new("E", 3006);
    /// E3007: an argument does not fit its parameter type
    pub const E_PARAMETER_MISMATCH: Self = Self::new("E", 3007);
    /// E3008: a symbol that does not denote a value used in value position
    pub const E_SYMBOL_AS_VALUE: Self = Self::new("E", 3008);
    /// E3009: an operator applied to a type outside its domain
    pub const E_OPERATOR_TYPE: Self = Self::new("E", 3009);
    /// E3010: a definition conflicts with the symbol's declared type
    pub const E_CONFLICTING_DECLARATION: Self = Self::new("E", 3010);
    /// E3011: a name declared twice in the same scope
    pub const E_REDECLARATION: Self = Self::new("E", 3011);
    /// E3012: a node shape the analyzer cannot dispatch (collaborator bug)
    pub const E_INTERNAL: Self = Self::new("E", 3012);

    // =========================================================================
    // SEMANTIC WARNING CODES (W3001-W3999)
    // =========================================================================

    /// W3001: explicit conversion between pointer and integer
    pub const W_POINTER_INT_CAST: Self = Self::new("W", 3001);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

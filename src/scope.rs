//! Scope kinds and the identifiers that make up a parsed scope chain.

/// Classification of a brace-delimited scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeKind {
    /// Not actually a scope.
    None,
    /// A scope whose kind could not be determined.
    #[default]
    Unknown,
    /// A control block (`if`, `for`, `try`, ...).
    Control,
    Namespace,
    Class,
    Struct,
    /// A function or method body.
    Function,
}

/// One link in a scope chain, e.g. `Foo` in `class Foo { ... }`.
///
/// `explicit` records whether the scope is expected to appear textually.
/// Namespace parts of a signature start implicit: `using namespace Foo;`
/// puts code in `Foo` without a brace anywhere near it. Class and function
/// parts are explicit from the start, and the narrower marks an identifier
/// explicit once it has proven its scope in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeIdentifier {
    pub name: String,
    pub kind: ScopeKind,
    pub explicit: bool,
}

impl ScopeIdentifier {
    /// An identifier whose scope may be implicit.
    pub fn new(name: impl Into<String>, kind: ScopeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            explicit: false,
        }
    }

    /// An identifier whose scope must appear textually.
    pub fn explicit(name: impl Into<String>, kind: ScopeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            explicit: true,
        }
    }
}

//! Language detection and per-language signature parsing.
//!
//! Only the C family gets real scope support; every other language falls
//! back to the plain engine. Signatures arrive from debuggers and symbol
//! stores, so the C++ parser has to strip a fair amount of decoration
//! (catch funclets, lambda hashes, template suffixes) before the parts are
//! usable as scope names.

use std::collections::HashSet;
use std::sync::LazyLock;

use tracing::debug;

use crate::scope::{ScopeIdentifier, ScopeKind};
use crate::tokens::{is_word, remove_between};

/// Programming language of a file, detected from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    C,
    Cpp,
    CSharp,
    TypeScript,
    JavaScript,
    Python,
    ObjectiveC,
    ObjectiveCpp,
    Swift,
    Go,
    VisualBasic,
    FSharp,
    Unknown,
}

impl Language {
    /// Detect from a file path or a bare extension (with or without the dot).
    pub fn from_path(path: &str) -> Self {
        let ext = path.rsplit('/').next().unwrap_or(path);
        let ext = match ext.rsplit_once('.') {
            Some((_, ext)) => ext,
            None => return Self::Unknown,
        };
        Self::from_extension(ext)
    }

    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "cs" => Self::CSharp,
            "c" | "h" => Self::C,
            "cpp" | "cxx" | "cc" | "hpp" | "hxx" => Self::Cpp,
            "ts" | "tsx" => Self::TypeScript,
            "js" | "jsx" => Self::JavaScript,
            "py" => Self::Python,
            "m" => Self::ObjectiveC,
            "mm" => Self::ObjectiveCpp,
            "swift" => Self::Swift,
            "go" => Self::Go,
            "vb" => Self::VisualBasic,
            "fs" => Self::FSharp,
            _ => Self::Unknown,
        }
    }

    /// True for languages the C-style engine understands.
    pub fn is_c_family(self) -> bool {
        matches!(self, Self::C | Self::Cpp | Self::CSharp)
    }
}

// C++ keywords from cppreference, plus "except", "final", and "finally".
static CPP_KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "alignas", "alignof", "and", "and_eq", "asm", "atomic_cancel", "atomic_commit",
        "atomic_noexcept", "auto", "bitand", "bitor", "bool", "break", "case", "catch", "char",
        "char8_t", "char16_t", "char32_t", "class", "compl", "concept", "const", "consteval",
        "constexpr", "constinit", "const_cast", "continue", "co_await", "co_return", "co_yield",
        "decltype", "default", "delete", "do", "double", "dynamic_cast", "else", "enum", "except",
        "explicit", "export", "extern", "false", "final", "finally", "float", "for", "friend",
        "goto", "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not",
        "not_eq", "nullptr", "operator", "or", "or_eq", "private", "protected", "public",
        "reflexpr", "register", "reinterpret_cast", "requires", "return", "short", "signed",
        "sizeof", "static", "static_assert", "static_cast", "struct", "switch", "synchronized",
        "template", "this", "thread_local", "throw", "true", "try", "typedef", "typeid",
        "typename", "union", "unsigned", "using", "virtual", "void", "volatile", "wchar_t",
        "while", "xor", "xor_eq",
    ]
    .into_iter()
    .collect()
});

static CSHARP_KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
        "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
        "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
        "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
        "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
        "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
        "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
        "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
        "void", "volatile", "while",
    ]
    .into_iter()
    .collect()
});

/// Keyword set and signature parser for one C-family language.
#[derive(Clone, Copy)]
pub struct LanguageProfile {
    pub language: Language,
    keywords: &'static LazyLock<HashSet<&'static str>>,
    parse: fn(&str) -> Vec<ScopeIdentifier>,
}

impl std::fmt::Debug for LanguageProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageProfile")
            .field("language", &self.language)
            .finish()
    }
}

impl LanguageProfile {
    /// The profile for a C-family language, `None` otherwise.
    pub fn for_language(language: Language) -> Option<Self> {
        match language {
            Language::C | Language::Cpp => Some(Self {
                language,
                keywords: &CPP_KEYWORDS,
                parse: parse_cpp_signature,
            }),
            Language::CSharp => Some(Self {
                language,
                keywords: &CSHARP_KEYWORDS,
                parse: parse_csharp_signature,
            }),
            _ => None,
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    /// Parse a function signature into a scope chain, outermost first.
    /// An empty chain means the signature was unusable.
    pub fn parse_signature(&self, signature: &str) -> Vec<ScopeIdentifier> {
        let chain = (self.parse)(signature);
        debug!(signature, parts = chain.len(), "parsed function signature");
        chain
    }
}

/// Parse C/C++ signatures like `Namespace::Class::Method`, tolerating full
/// prototypes (`int Foo::Bar(int a)`) and debugger decorations.
fn parse_cpp_signature(signature: &str) -> Vec<ScopeIdentifier> {
    let mut sig = signature.trim().to_string();
    if sig.is_empty() {
        return Vec::new();
    }

    // A prototype form: keep the last space-separated token before the "(".
    if sig.contains('(') && sig.contains(')') {
        let before = &sig[..sig.find('(').unwrap_or(sig.len())];
        sig = before
            .split_whitespace()
            .next_back()
            .unwrap_or("")
            .to_string();
    }

    // Anything still containing a space is not a signature we can use.
    if sig.is_empty() || sig.contains(' ') {
        return Vec::new();
    }

    let parts = sanitize_cpp_signature(&sig);

    // Namespaces may be implicit ("using namespace"), so only the class and
    // method parts are expected to have an explicit scope.
    let count = parts.len();
    parts
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            if i + 1 == count {
                ScopeIdentifier::explicit(part, ScopeKind::Function)
            } else if i + 2 == count {
                ScopeIdentifier::explicit(part, ScopeKind::Class)
            } else if i == 0 {
                ScopeIdentifier::new(part, ScopeKind::Namespace)
            } else {
                ScopeIdentifier::new(part, ScopeKind::Unknown)
            }
        })
        .collect()
}

/// Split a decorated C++ signature into usable scope-name parts.
///
/// Handles the forms the debugger emits for funclets and lambdas, e.g.
/// `` `Class::Method'::`1'::catch$0 ``, `Method$catch$0`,
/// `Method__lambda_<hash>___`, and `_anonymous_namespace_` parts.
fn sanitize_cpp_signature(signature: &str) -> Vec<String> {
    // Bracketed parts name something implicit that never appears in code.
    let mut sig = remove_between(signature, '[', ']');

    // Funclet signatures sometimes wrap the valid part in underscores.
    let try_block = sig.contains("catch$") || sig.contains("fin$") || sig.contains("filt$");

    // A comma means embedded template arguments; the part before the
    // underscore that precedes the first comma is what survives.
    if let Some(comma) = sig.find(',') {
        if let Some(underscore) = sig[..comma].rfind('_') {
            sig.truncate(underscore);
        }
    }

    let raw_parts: Vec<&str> = sig
        .split("::")
        .flat_map(|p| p.split('.'))
        .filter(|p| !p.is_empty())
        .collect();

    let mut parts: Vec<String> = Vec::with_capacity(raw_parts.len());
    let mut prev = String::new();
    for raw in raw_parts {
        let mut part = raw.trim_matches(['`', '\'']).to_string();

        // A number wrapped in underscores is funclet noise.
        if part.len() >= 3
            && part.starts_with('_')
            && part.ends_with('_')
            && part[1..part.len() - 1].parse::<i64>().is_ok()
        {
            continue;
        }

        if part.starts_with("<lambda") || part.starts_with("__lambda_") {
            // A bare lambda part: nothing after it can be located.
            break;
        } else if let Some(rest) = part.strip_prefix("__l") {
            if rest.parse::<i64>().is_ok() {
                continue;
            }
        } else if part == "_anonymous_namespace_" {
            continue;
        }

        if part == "ctor" || part == "cctor" || part == "{ctor}" || part == "{cctor}" {
            part = prev.clone();
        } else if part == "dtor" || part == "{dtor}" {
            part = format!("~{prev}");
        } else if !prev.is_empty() && part == format!("_{prev}") {
            part = format!("~{prev}");
        } else if part.contains("$catch$") || part.contains("$filt$") || part.contains("$fin$") {
            // "Method$catch$0": keep everything before the second-to-last "$".
            if let Some(last) = part.rfind('$') {
                if let Some(prior) = part[..last].rfind('$') {
                    part.truncate(prior);
                }
            }
        } else if let Some((method, _)) = part.split_once("__lambda_") {
            // "Method__lambda_<hash>___": keep the method, drop the rest of
            // the chain.
            let method = method.to_string();
            if is_word(&method, false) {
                parts.push(method.clone());
            }
            return finish_cpp_parts(parts, try_block);
        }

        if is_word(&part, false) {
            prev = part.clone();
            parts.push(part);
        }
    }

    finish_cpp_parts(parts, try_block)
}

fn finish_cpp_parts(mut parts: Vec<String>, try_block: bool) -> Vec<String> {
    // Funclet wrapping adds a leading underscore to the first part and a
    // trailing one to the last; only multi-part signatures carry them.
    if try_block && parts.len() > 1 {
        let first = &parts[0];
        let last = &parts[parts.len() - 1];
        if first.starts_with('_') && last.ends_with('_') {
            parts[0] = parts[0][1..].to_string();
            let end = parts.len() - 1;
            let trimmed = parts[end][..parts[end].len() - 1].to_string();
            parts[end] = trimmed;
        }
    }
    parts
}

/// Parse C# signatures like `Namespace.Class.Method`,
/// `Namespace::Class+_Iterator_d__24.MoveNext`, or `Class..ctor`.
fn parse_csharp_signature(signature: &str) -> Vec<ScopeIdentifier> {
    let signature = signature.trim();
    if signature.is_empty() {
        return Vec::new();
    }

    let parts: Vec<&str> = signature
        .split("::")
        .flat_map(|p| p.split('.'))
        .flat_map(|p| p.split('+'))
        .filter(|p| !p.is_empty())
        .collect();

    let count = parts.len();
    if count < 2 {
        return vec![ScopeIdentifier::explicit(signature, ScopeKind::Function)];
    }

    let mut identifiers = Vec::with_capacity(count);

    if parts[count - 2].starts_with('_') && parts[count - 1] == "MoveNext" {
        // Iterator method: the compiler-generated state machine's MoveNext.
        // "Namespace.Class+_Method_d__24.MoveNext" names Method.
        if count < 4 {
            // Too mangled to trust; let the caller fall back to a plain scan.
            return Vec::new();
        }
        for (i, part) in parts.iter().enumerate().take(count - 1) {
            if i == count - 2 {
                let method = part
                    .split('_')
                    .find(|s| !s.is_empty())
                    .unwrap_or(part);
                identifiers.push(ScopeIdentifier::explicit(method, ScopeKind::Function));
            } else if i == count - 3 {
                identifiers.push(ScopeIdentifier::explicit(*part, ScopeKind::Class));
            } else if i == 0 {
                identifiers.push(ScopeIdentifier::explicit(*part, ScopeKind::Namespace));
            } else {
                identifiers.push(ScopeIdentifier::explicit(*part, ScopeKind::Unknown));
            }
        }
        return identifiers;
    }

    for (i, part) in parts.iter().enumerate() {
        if i == count - 1 {
            if i > 0 && *part == "ctor" {
                // Constructor: the method shares the class's name.
                identifiers.push(ScopeIdentifier::explicit(parts[i - 1], ScopeKind::Function));
            } else if *part == "cctor" {
                // Static initializer: the code is scoped to the class itself.
            } else {
                identifiers.push(ScopeIdentifier::explicit(*part, ScopeKind::Function));
            }
        } else if i == count - 2 {
            identifiers.push(ScopeIdentifier::explicit(*part, ScopeKind::Class));
        } else if i == 0 {
            // C# files always declare their namespaces, so even the
            // namespace part is expected to appear textually.
            identifiers.push(ScopeIdentifier::explicit(*part, ScopeKind::Namespace));
        } else {
            identifiers.push(ScopeIdentifier::explicit(*part, ScopeKind::Unknown));
        }
    }

    identifiers
}

#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`PhraseRule`](crate::PhraseRule) from a name, a regex literal and
/// a rewrite closure over the captures.
#[macro_export]
macro_rules! phrase_rule {
    (
        name: $name:expr,
        pattern: $pat:literal,
        rewrite: |$caps:ident| $body:expr
        $(,)?
    ) => {{
        $crate::PhraseRule {
            name: $name,
            pattern: $crate::regex!($pat),
            rewrite: |$caps| $body,
        }
    }};
}

/// Build a [`TokenPhrase`](crate::TokenPhrase) table entry.
#[macro_export]
macro_rules! phrase {
    ($words:literal => $symbol:literal) => {
        $crate::TokenPhrase { words: $words, symbol: $symbol }
    };
    ($words:literal) => {
        $crate::TokenPhrase { words: $words, symbol: "" }
    };
}

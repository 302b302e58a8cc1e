use crate::TokenPhrase;

/// Conversational phrases with no arithmetic meaning. Matched as whole words,
/// longest first.
pub(crate) fn get() -> Vec<TokenPhrase> {
    vec![
        phrase!("what is the result of"),
        phrase!("what is"),
        phrase!("what's"),
        phrase!("whats"),
        phrase!("how much is"),
        phrase!("can you tell me"),
        phrase!("tell me"),
        phrase!("could you calculate"),
        phrase!("calculate"),
        phrase!("compute"),
        phrase!("the result of"),
        phrase!("please"),
        phrase!("equals"),
        phrase!("is"),
    ]
}

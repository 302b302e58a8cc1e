use crate::TokenPhrase;

/// Operator, grouping and decimal-separator words and their symbols.
pub(crate) fn get() -> Vec<TokenPhrase> {
    vec![
        // addition
        phrase!("plus" => "+"),
        phrase!("added to" => "+"),
        // subtraction
        phrase!("minus" => "-"),
        phrase!("subtracted by" => "-"),
        phrase!("take away" => "-"),
        phrase!("less" => "-"),
        // multiplication
        phrase!("times" => "*"),
        phrase!("multiplied by" => "*"),
        phrase!("x" => "*"),
        // division
        phrase!("divided by" => "/"),
        phrase!("divided" => "/"),
        phrase!("over" => "/"),
        // exponent
        phrase!("raised to the power of" => "**"),
        phrase!("to the power of" => "**"),
        phrase!("to the power" => "**"),
        phrase!("raised to" => "**"),
        // modulo
        phrase!("modulo" => "%"),
        phrase!("modulus" => "%"),
        phrase!("mod" => "%"),
        // grouping
        phrase!("open parenthesis" => "("),
        phrase!("open parentheses" => "("),
        phrase!("opening parenthesis" => "("),
        phrase!("left parenthesis" => "("),
        phrase!("parenthesis" => "("),
        phrase!("close parenthesis" => ")"),
        phrase!("close parentheses" => ")"),
        phrase!("closing parenthesis" => ")"),
        phrase!("right parenthesis" => ")"),
        // decimal separator
        phrase!("point" => "."),
        phrase!("dot" => "."),
    ]
}

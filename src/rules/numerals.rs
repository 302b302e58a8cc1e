//! Number-word folding.
//!
//! Spelled-out numerals are composed into a single digit literal before any
//! other rule runs, so later rules only ever see digits:
//!
//! ```text
//! "two hundred and five"    -> "205"
//! "twelve thousand three"   -> "12003"
//! "5 thousand"              -> "5000"
//! "three point one four"    -> "3.14"
//! "two three"               -> "2" "3"     (no composition)
//! ```

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Map of number words 0..19 to integer values.
static ZERO_NINETEEN_MAP: Lazy<HashMap<&'static str, u64>> = Lazy::new(|| {
    HashMap::from([
        ("zero", 0),
        ("one", 1),
        ("two", 2),
        ("three", 3),
        ("four", 4),
        ("five", 5),
        ("six", 6),
        ("seven", 7),
        ("eight", 8),
        ("nine", 9),
        ("ten", 10),
        ("eleven", 11),
        ("twelve", 12),
        ("thirteen", 13),
        ("fourteen", 14),
        ("fifteen", 15),
        ("sixteen", 16),
        ("seventeen", 17),
        ("eighteen", 18),
        ("nineteen", 19),
    ])
});

/// Map of tens words (twenty, thirty, ...) to their numeric values.
static TENS_MAP: Lazy<HashMap<&'static str, u64>> = Lazy::new(|| {
    HashMap::from([
        ("twenty", 20),
        ("thirty", 30),
        ("forty", 40),
        ("fourty", 40),
        ("fifty", 50),
        ("sixty", 60),
        ("seventy", 70),
        ("eighty", 80),
        ("ninety", 90),
    ])
});

const DECIMAL_WORDS: &[&str] = &["point", "dot"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Part {
    Unit(u64),
    Teen(u64),
    Tens(u64),
    Hundred,
    Thousand,
    Literal(f64),
}

impl Part {
    fn is_small(self) -> bool {
        matches!(self, Part::Unit(_) | Part::Teen(_) | Part::Tens(_))
    }
}

fn classify(word: &str) -> Option<Part> {
    if let Some(&v) = ZERO_NINETEEN_MAP.get(word) {
        return Some(if v < 10 { Part::Unit(v) } else { Part::Teen(v) });
    }
    if let Some(&v) = TENS_MAP.get(word) {
        return Some(Part::Tens(v));
    }
    match word {
        "hundred" => Some(Part::Hundred),
        "thousand" => Some(Part::Thousand),
        _ if is_digit_literal(word) => word.parse().ok().map(Part::Literal),
        _ => None,
    }
}

fn is_digit_literal(word: &str) -> bool {
    regex!(r"^\d+(\.\d+)?$").is_match(word)
}

/// Running state while composing one numeral.
#[derive(Debug, Default)]
struct Accumulator {
    total: f64,
    group: f64,
    last: Option<Part>,
}

impl Accumulator {
    /// Whether `next` may extend the numeral built so far.
    fn accepts(&self, next: Part) -> bool {
        match (self.last, next) {
            (None, _) => true,
            (Some(Part::Tens(_)), Part::Unit(_)) => true,
            (Some(Part::Hundred), p) if p.is_small() => true,
            (Some(Part::Thousand), p) if p.is_small() => true,
            (Some(Part::Unit(_) | Part::Teen(_) | Part::Literal(_)), Part::Hundred) => self.group < 100.0,
            (Some(_), Part::Thousand) => self.total == 0.0,
            _ => false,
        }
    }

    fn push(&mut self, part: Part) {
        match part {
            Part::Unit(v) | Part::Teen(v) | Part::Tens(v) => self.group += v as f64,
            Part::Literal(v) => self.group = v,
            Part::Hundred => self.group = self.multiplier() * 100.0,
            Part::Thousand => {
                self.total = self.multiplier() * 1000.0;
                self.group = 0.0;
            }
        }
        self.last = Some(part);
    }

    /// What "hundred"/"thousand" scale: the group so far, or 1 when the word
    /// opens the numeral. An explicit zero stays zero.
    fn multiplier(&self) -> f64 {
        if self.last.is_none() { 1.0 } else { self.group }
    }

    fn value(&self) -> f64 {
        self.total + self.group
    }
}

/// Compose the longest numeral starting at `words[0]`.
///
/// Returns the value, how many words were consumed and whether any of them
/// was a number word (as opposed to a single digit literal).
fn read_numeral(words: &[String]) -> Option<(f64, usize, bool)> {
    let mut acc = Accumulator::default();
    let mut consumed = 0;
    let mut spelled = false;

    while consumed < words.len() {
        let word = words[consumed].as_str();

        // "and" joins "hundred"/"thousand" to a following small number.
        if word == "and" && matches!(acc.last, Some(Part::Hundred | Part::Thousand)) {
            match words.get(consumed + 1).and_then(|w| classify(w)) {
                Some(next) if next.is_small() => {
                    consumed += 1;
                    continue;
                }
                _ => break,
            }
        }

        let Some(part) = classify(word) else { break };
        if !acc.accepts(part) {
            break;
        }
        if !matches!(part, Part::Literal(_)) {
            spelled = true;
        }
        acc.push(part);
        consumed += 1;
    }

    if consumed == 0 { None } else { Some((acc.value(), consumed, spelled)) }
}

/// Read decimal digits after "point": unit words (one digit each) or a single
/// integer literal.
fn read_decimal_digits(words: &[String]) -> Option<(String, usize)> {
    if let Some(first) = words.first() {
        if regex!(r"^\d+$").is_match(first) {
            return Some((first.clone(), 1));
        }
    }

    let mut digits = String::new();
    for word in words {
        match ZERO_NINETEEN_MAP.get(word.as_str()) {
            Some(&v) if v < 10 => digits.push(char::from(b'0' + v as u8)),
            _ => break,
        }
    }
    if digits.is_empty() {
        None
    } else {
        let n = digits.len();
        Some((digits, n))
    }
}

fn render(value: f64) -> String {
    format!("{}", value)
}

/// Fold every numeral in `words`. Returns the new words and how many numerals
/// were rewritten.
pub(crate) fn fold(words: &[String]) -> (Vec<String>, usize) {
    let mut out = Vec::with_capacity(words.len());
    let mut folded = 0;
    let mut i = 0;

    while i < words.len() {
        let word = words[i].as_str();

        if let Some((value, consumed, spelled)) = read_numeral(&words[i..]) {
            let rest = &words[i + consumed..];
            let decimal = match rest.first() {
                Some(w) if DECIMAL_WORDS.contains(&w.as_str()) && value.fract() == 0.0 => {
                    read_decimal_digits(&rest[1..])
                }
                _ => None,
            };

            match decimal {
                Some((digits, n)) => {
                    out.push(format!("{}.{}", render(value), digits));
                    i += consumed + 1 + n;
                    folded += 1;
                }
                None if spelled || consumed > 1 => {
                    out.push(render(value));
                    i += consumed;
                    folded += 1;
                }
                None => {
                    // a lone digit literal stays as written
                    out.push(word.to_string());
                    i += 1;
                }
            }
            continue;
        }

        if DECIMAL_WORDS.contains(&word) {
            if let Some((digits, n)) = read_decimal_digits(&words[i + 1..]) {
                out.push(format!("0.{}", digits));
                i += 1 + n;
                folded += 1;
                continue;
            }
        }

        out.push(word.to_string());
        i += 1;
    }

    (out, folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold_str(input: &str) -> String {
        let words: Vec<String> = input.split_whitespace().map(str::to_string).collect();
        fold(&words).0.join(" ")
    }

    #[test]
    fn composes_numerals() {
        let cases = [
            ("zero", "0"),
            ("seven", "7"),
            ("fifteen", "15"),
            ("twenty five", "25"),
            ("ninety nine", "99"),
            ("hundred", "100"),
            ("one hundred", "100"),
            ("two hundred thirty four", "234"),
            ("two hundred and five", "205"),
            ("fifteen hundred", "1500"),
            ("thousand", "1000"),
            ("five thousand", "5000"),
            ("twelve thousand three hundred", "12300"),
            ("one thousand and one", "1001"),
            ("5 thousand", "5000"),
            ("2.5 thousand", "2500"),
            ("zero hundred", "0"),
            ("0 thousand", "0"),
            ("zero thousand", "0"),
            ("hundred thousand", "100000"),
        ];
        for (input, expected) in cases {
            assert_eq!(fold_str(input), expected, "input: {}", input);
        }
    }

    #[test]
    fn decimals() {
        assert_eq!(fold_str("three point one four"), "3.14");
        assert_eq!(fold_str("3 point 25"), "3.25");
        assert_eq!(fold_str("point five"), "0.5");
        assert_eq!(fold_str("twenty point five plus 1"), "20.5 plus 1");
    }

    #[test]
    fn leaves_non_composable_sequences_apart() {
        assert_eq!(fold_str("two three"), "2 3");
        assert_eq!(fold_str("twenty thirty"), "20 30");
        assert_eq!(fold_str("two hundred three hundred"), "203 100");
        assert_eq!(fold_str("twenty 5"), "20 5");
    }

    #[test]
    fn keeps_other_words_and_literals() {
        assert_eq!(fold_str("5 plus 3"), "5 plus 3");
        assert_eq!(fold_str("007"), "007");
        assert_eq!(fold_str("five and six"), "5 and 6");
        assert_eq!(fold_str("one hundred and"), "100 and");
        assert_eq!(fold_str("5 point"), "5 point");
        assert_eq!(fold_str("someone"), "someone");
    }

    #[test]
    fn counts_folds() {
        let words: Vec<String> = "twenty five plus 3 times two".split_whitespace().map(str::to_string).collect();
        assert_eq!(fold(&words).1, 2);
    }
}

//! Predicate Naming
//!
//! Derives the predicate name of an enum key (`"sign_up"` -> `"isSignUp"`)
//! and the Rust identifiers used by the static codegen.
//!
//! Word boundaries:
//! - any run of non-alphanumeric characters
//! - a lowercase letter followed by an uppercase letter (`signUp`)
//! - a letter followed by a digit, or a digit followed by a letter (`Key1`)
//! - inside an uppercase run, the last capital when a lowercase letter
//!   follows it (`XMLHttp` -> `XML`, `Http`)

/// Prefix of every predicate name
pub const PREDICATE_PREFIX: &str = "is";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    Digit,
    Separator,
}

fn classify(c: char) -> CharClass {
    if c.is_uppercase() {
        CharClass::Upper
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        CharClass::Lower
    } else {
        CharClass::Separator
    }
}

/// Split a key into its words
pub fn words(key: &str) -> Vec<String> {
    let chars: Vec<char> = key.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        let class = classify(c);
        if class == CharClass::Separator {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
            let prev_class = classify(prev);
            let next_class = chars.get(i + 1).map(|&n| classify(n));
            let boundary = match (prev_class, class) {
                (CharClass::Lower, CharClass::Upper) => true,
                (CharClass::Digit, CharClass::Upper | CharClass::Lower) => true,
                (CharClass::Upper | CharClass::Lower, CharClass::Digit) => true,
                (CharClass::Upper, CharClass::Upper) => next_class == Some(CharClass::Lower),
                _ => false,
            };
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// Lowercase a word and uppercase its first letter
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Convert a key to PascalCase (`"SIGN_IN"` -> `"SignIn"`)
pub fn to_pascal_case(key: &str) -> String {
    words(key).iter().map(|w| capitalize(w)).collect()
}

/// Convert a key to snake_case (`"SignIn"` -> `"sign_in"`)
pub fn to_snake_case(key: &str) -> String {
    words(key)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Derive the predicate name for a key (`"sign-up"` -> `"isSignUp"`)
pub fn predicate_name(key: &str) -> String {
    format!("{}{}", PREDICATE_PREFIX, to_pascal_case(key))
}

/// Rust method name for a predicate name (`"isSignUp"` -> `"is_sign_up"`)
pub fn method_name(predicate: &str) -> String {
    let rest = predicate.strip_prefix(PREDICATE_PREFIX).unwrap_or(predicate);
    let snake = to_snake_case(rest);
    if snake.is_empty() {
        PREDICATE_PREFIX.to_string()
    } else {
        format!("{}_{}", PREDICATE_PREFIX, snake)
    }
}

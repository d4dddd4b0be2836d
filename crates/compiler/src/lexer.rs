//! Tokenizer for stepvm source text.

/// A single whitespace-separated word of a source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Anything that is not an integer literal.
    Word(&'a str),
    /// An optionally negative base-10 literal that fits in `i32`.
    Int { text: &'a str, value: i32 },
}

impl<'a> Token<'a> {
    pub(crate) fn text(&self) -> &'a str {
        match *self {
            Token::Word(text) | Token::Int { text, .. } => text,
        }
    }
}

/// Tokenize a single line of source text.
///
/// Returns an empty Vec for blank lines and for lines whose first
/// non-blank character is `#`.
pub(crate) fn tokenize_line(line: &str) -> Vec<Token<'_>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Vec::new();
    }
    line.split_whitespace().map(classify).collect()
}

fn classify(word: &str) -> Token<'_> {
    let digits = word.strip_prefix('-').unwrap_or(word);
    let is_literal = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
    match word.parse::<i32>() {
        Ok(value) if is_literal => Token::Int { text: word, value },
        _ => Token::Word(word),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(text: &str) -> Token<'_> {
        Token::Int {
            text,
            value: text.parse().unwrap(),
        }
    }

    #[test]
    fn empty_line() {
        assert_eq!(tokenize_line(""), vec![]);
    }

    #[test]
    fn whitespace_only() {
        assert_eq!(tokenize_line("   \t  "), vec![]);
    }

    #[test]
    fn comment_only() {
        assert_eq!(tokenize_line("# set up counters"), vec![]);
        assert_eq!(tokenize_line("   #indented"), vec![]);
    }

    #[test]
    fn instruction_with_operands() {
        assert_eq!(
            tokenize_line("add 0 1 2"),
            vec![Token::Word("add"), int("0"), int("1"), int("2")]
        );
    }

    #[test]
    fn tabs_and_repeated_spaces() {
        assert_eq!(
            tokenize_line("\tsetc   4\t-12 "),
            vec![Token::Word("setc"), int("4"), int("-12")]
        );
    }

    #[test]
    fn hash_after_instruction_is_not_a_comment() {
        assert_eq!(
            tokenize_line("jmpc 0 # loop"),
            vec![Token::Word("jmpc"), int("0"), Token::Word("#"), Token::Word("loop")]
        );
    }

    #[test]
    fn plus_sign_and_hex_are_words() {
        assert_eq!(tokenize_line("+5")[0], Token::Word("+5"));
        assert_eq!(tokenize_line("0x10")[0], Token::Word("0x10"));
        assert_eq!(tokenize_line("-")[0], Token::Word("-"));
    }

    #[test]
    fn out_of_range_literal_is_a_word() {
        assert_eq!(tokenize_line("2147483648")[0], Token::Word("2147483648"));
        assert_eq!(tokenize_line("-2147483648")[0], int("-2147483648"));
    }

    #[test]
    fn leading_zeros_are_accepted() {
        assert_eq!(
            tokenize_line("007")[0],
            Token::Int {
                text: "007",
                value: 7
            }
        );
    }

    #[test]
    fn token_text() {
        assert_eq!(Token::Word("x").text(), "x");
        assert_eq!(int("-3").text(), "-3");
    }
}

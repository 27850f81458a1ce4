//! Path data tokenizer.
//!
//! Tokens are slices of the input. Rules:
//! - letters are standalone tokens (except an exponent marker inside a number)
//! - `,` and whitespace separate tokens
//! - `-`/`+` start a new token unless the current token ends in `e`/`E`
//! - `.` starts a new token if the current token already contains a `.`

/// Iterator over the tokens of a path data string.
#[derive(Debug, Clone)]
pub(crate) struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }
}

fn is_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = &self.src[self.pos..];
        let skipped = rest.len() - rest.trim_start_matches(is_separator).len();
        self.pos += skipped;

        let rest = &self.src[self.pos..];
        let mut chars = rest.char_indices();
        let (_, first) = chars.next()?;

        if first.is_ascii_alphabetic() {
            let len = first.len_utf8();
            self.pos += len;
            return Some(&rest[..len]);
        }

        let mut has_dot = first == '.';
        let mut has_exp = false;
        let mut has_digit = first.is_ascii_digit();
        let mut last = first;
        let mut end = first.len_utf8();

        for (idx, c) in chars {
            let take = match c {
                c if is_separator(c) => false,
                'e' | 'E' => has_digit && !has_exp,
                c if c.is_ascii_alphabetic() => false,
                '-' | '+' => last == 'e' || last == 'E',
                '.' => !has_dot && !has_exp,
                _ => true,
            };
            if !take {
                break;
            }
            match c {
                '.' => has_dot = true,
                'e' | 'E' => has_exp = true,
                c if c.is_ascii_digit() => has_digit = true,
                _ => {}
            }
            last = c;
            end = idx + c.len_utf8();
        }

        self.pos += end;
        Some(&rest[..end])
    }
}

/// Whether a token is a command letter.
pub(crate) fn is_command(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic())
}

/// Numbers of a list written with path-data rules (`10-5.5.5` is three
/// numbers). Stops at the first token that is not a number.
pub fn parse_numbers(s: &str) -> Vec<f32> {
    Tokenizer::new(s)
        .map_while(|t| t.parse::<f32>().ok().filter(|v| v.is_finite()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<&str> {
        Tokenizer::new(s).collect()
    }

    #[test]
    fn test_letters_are_standalone() {
        assert_eq!(tokens("M10,20L30 40z"), vec!["M", "10", "20", "L", "30", "40", "z"]);
    }

    #[test]
    fn test_minus_starts_token() {
        assert_eq!(tokens("M10-20"), vec!["M", "10", "-20"]);
        assert_eq!(tokens("l-5-5"), vec!["l", "-5", "-5"]);
    }

    #[test]
    fn test_exponent_sign_kept() {
        assert_eq!(tokens("M1e-5-2"), vec!["M", "1e-5", "-2"]);
        assert_eq!(tokens("M1.5E+2 3"), vec!["M", "1.5E+2", "3"]);
    }

    #[test]
    fn test_second_dot_starts_token() {
        assert_eq!(tokens("M1.5.5"), vec!["M", "1.5", ".5"]);
        assert_eq!(tokens("M.5.5.5"), vec!["M", ".5", ".5", ".5"]);
    }

    #[test]
    fn test_garbage_stays_in_token() {
        assert_eq!(tokens("M1#2 3"), vec!["M", "1#2", "3"]);
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_numbers("10,20 30-5.5.5"), vec![10.0, 20.0, 30.0, -5.5, 0.5]);
        assert_eq!(parse_numbers("1 2 x 3"), vec![1.0, 2.0]);
        assert!(parse_numbers("").is_empty());
    }

    #[test]
    fn test_is_command() {
        assert!(is_command("M"));
        assert!(is_command("z"));
        assert!(!is_command("10"));
        assert!(!is_command("-"));
    }
}

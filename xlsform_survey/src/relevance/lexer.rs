//! Tokens of a relevance expression.

use std::fmt::Display;

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Comparison {
    GreaterOrEqual,
    Greater,
    LessOrEqual,
    Less,
    NotEqual,
    Equal,
}

impl Comparison {
    // Longest operators first.
    const ALL: [Comparison; 6] = [
        Comparison::GreaterOrEqual,
        Comparison::Greater,
        Comparison::LessOrEqual,
        Comparison::Less,
        Comparison::NotEqual,
        Comparison::Equal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::GreaterOrEqual => ">=",
            Comparison::Greater => ">",
            Comparison::LessOrEqual => "<=",
            Comparison::Less => "<",
            Comparison::NotEqual => "!=",
            Comparison::Equal => "=",
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Logical {
    And,
    Or,
}

/// The pieces of an expression. The lexer produces the plain tokens, the
/// rewriter replaces some sequences by the idiom tokens.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Token {
    /// `${name}`
    Reference(String),
    /// A quoted string, without its quotes.
    Literal(String),
    Number(String),
    Comparison(Comparison),
    Logical(Logical),
    OpenParen,
    CloseParen,
    Comma,
    /// A function name or any other identifier.
    Word(String),
    /// Any other character, kept as-is.
    Symbol(String),
    // Idioms
    /// More than N options were selected.
    SelectedMoreThan(String),
    /// The text answer has exactly N characters.
    LengthEquals(String),
    NotAnswered,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Reference(s) => write!(f, "${{{}}}", s),
            Token::Literal(s) => write!(f, "'{}'", s),
            Token::Number(s) | Token::Word(s) | Token::Symbol(s) => write!(f, "{}", s),
            Token::Comparison(c) => write!(f, "{}", c.as_str()),
            Token::Logical(Logical::And) => write!(f, "{{{{ AND }}}}"),
            Token::Logical(Logical::Or) => write!(f, "{{{{ OR }}}}"),
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::SelectedMoreThan(n) => write!(f, "selected> {}", n),
            Token::LengthEquals(n) => write!(f, "length= {}", n),
            Token::NotAnswered => write!(f, "=∅"),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}

/// Splits an expression into tokens. Whitespace only separates tokens.
pub fn tokenize(expr: &str) -> Vec<Token> {
    let chars: Vec<char> = expr.chars().collect();
    let mut res: Vec<Token> = Vec::new();
    let mut i = 0;
    let collect = |from: usize, to: usize| chars[from..to].iter().collect::<String>();
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        // ${name}
        if c == '$' && chars.get(i + 1) == Some(&'{') {
            if let Some(end) = (i + 2..chars.len()).find(|&j| chars[j] == '}') {
                res.push(Token::Reference(collect(i + 2, end).trim().to_string()));
                i = end + 1;
                continue;
            }
        }
        if c == '\'' || c == '"' {
            if let Some(end) = (i + 1..chars.len()).find(|&j| chars[j] == c) {
                res.push(Token::Literal(collect(i + 1, end)));
                i = end + 1;
                continue;
            }
        }
        if let Some(op) = Comparison::ALL.iter().find(|op| {
            let s: Vec<char> = op.as_str().chars().collect();
            chars[i..].starts_with(&s)
        }) {
            res.push(Token::Comparison(*op));
            i += op.as_str().len();
            continue;
        }
        if c.is_ascii_digit() {
            let end = (i..chars.len())
                .find(|&j| !(chars[j].is_ascii_digit() || chars[j] == '.'))
                .unwrap_or(chars.len());
            res.push(Token::Number(collect(i, end)));
            i = end;
            continue;
        }
        if c.is_alphabetic() || c == '_' {
            let end = (i..chars.len())
                .find(|&j| !is_word_char(chars[j]))
                .unwrap_or(chars.len());
            let word = collect(i, end);
            res.push(match word.to_lowercase().as_str() {
                "and" => Token::Logical(Logical::And),
                "or" => Token::Logical(Logical::Or),
                _ => Token::Word(word),
            });
            i = end;
            continue;
        }
        res.push(match c {
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            ',' => Token::Comma,
            _ => Token::Symbol(c.to_string()),
        });
        i += 1;
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens() {
        let toks = tokenize("selected(${q1}, 'a b') and ${age}>=18 OR count-selected(${q2})>1");
        assert_eq!(
            toks,
            vec![
                Token::Word("selected".to_string()),
                Token::OpenParen,
                Token::Reference("q1".to_string()),
                Token::Comma,
                Token::Literal("a b".to_string()),
                Token::CloseParen,
                Token::Logical(Logical::And),
                Token::Reference("age".to_string()),
                Token::Comparison(Comparison::GreaterOrEqual),
                Token::Number("18".to_string()),
                Token::Logical(Logical::Or),
                Token::Word("count-selected".to_string()),
                Token::OpenParen,
                Token::Reference("q2".to_string()),
                Token::CloseParen,
                Token::Comparison(Comparison::Greater),
                Token::Number("1".to_string()),
            ]
        );
    }

    #[test]
    fn words_containing_logical_operators() {
        let toks = tokenize("${q} = 'order' and android");
        assert_eq!(toks[2], Token::Literal("order".to_string()));
        assert_eq!(toks[3], Token::Logical(Logical::And));
        assert_eq!(toks[4], Token::Word("android".to_string()));
    }

    #[test]
    fn unterminated_pieces() {
        let toks = tokenize("${q = 'a");
        assert_eq!(toks[0], Token::Symbol("$".to_string()));
        assert_eq!(toks[1], Token::Symbol("{".to_string()));
        assert_eq!(toks[2], Token::Word("q".to_string()));
        assert_eq!(toks[3], Token::Comparison(Comparison::Equal));
        assert_eq!(toks[4], Token::Symbol("'".to_string()));
        assert_eq!(toks[5], Token::Word("a".to_string()));
    }

    #[test]
    fn display() {
        let toks = tokenize("string-length(${name}) != 0");
        let s: Vec<String> = toks.iter().map(|t| t.to_string()).collect();
        assert_eq!(s, vec!["string-length", "(", "${name}", ")", "!=", "0"]);
    }
}

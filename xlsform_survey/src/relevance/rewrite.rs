//! Rewrites of the token stream that do not depend on the language.

use super::lexer::{Comparison, Logical, Token};

/// Tries to match at the start of the tokens. Returns the number of tokens
/// consumed and their replacement.
pub(crate) type Rule = fn(&[Token]) -> Option<(usize, Vec<Token>)>;

fn is_word(t: &Token, name: &str) -> bool {
    matches!(t, Token::Word(w) if w.eq_ignore_ascii_case(name))
}

/// `selected(${q}, 'a')` is `${q} = 'a'`
fn selected(toks: &[Token]) -> Option<(usize, Vec<Token>)> {
    match toks {
        [w, Token::OpenParen, Token::Reference(q), Token::Comma, Token::Literal(a), Token::CloseParen, ..]
            if is_word(w, "selected") =>
        {
            Some((
                6,
                vec![
                    Token::Reference(q.clone()),
                    Token::Comparison(Comparison::Equal),
                    Token::Literal(a.clone()),
                ],
            ))
        }
        _ => None,
    }
}

/// `not(${q} = 'a')` is `${q} != 'a'`
fn not_equal(toks: &[Token]) -> Option<(usize, Vec<Token>)> {
    match toks {
        [w, Token::OpenParen, Token::Reference(q), Token::Comparison(Comparison::Equal), Token::Literal(a), Token::CloseParen, ..]
            if is_word(w, "not") =>
        {
            Some((
                6,
                vec![
                    Token::Reference(q.clone()),
                    Token::Comparison(Comparison::NotEqual),
                    Token::Literal(a.clone()),
                ],
            ))
        }
        _ => None,
    }
}

/// `count-selected(${q}) > 2`
fn count_selected(toks: &[Token]) -> Option<(usize, Vec<Token>)> {
    match toks {
        [w, Token::OpenParen, Token::Reference(q), Token::CloseParen, Token::Comparison(Comparison::Greater), Token::Number(n), ..]
            if is_word(w, "count-selected") =>
        {
            Some((
                6,
                vec![Token::Reference(q.clone()), Token::SelectedMoreThan(n.clone())],
            ))
        }
        _ => None,
    }
}

/// `string-length(${q}) = 0`
fn string_length(toks: &[Token]) -> Option<(usize, Vec<Token>)> {
    match toks {
        [w, Token::OpenParen, Token::Reference(q), Token::CloseParen, Token::Comparison(Comparison::Equal), Token::Number(n), ..]
            if is_word(w, "string-length") =>
        {
            Some((
                6,
                vec![Token::Reference(q.clone()), Token::LengthEquals(n.clone())],
            ))
        }
        _ => None,
    }
}

/// `${q} = 'NaN' or string-length(${q}) = 0` tells whether a question was
/// left unanswered.
fn answered(toks: &[Token]) -> Option<(usize, Vec<Token>)> {
    match toks {
        [Token::Reference(a), Token::Comparison(Comparison::Equal), Token::Literal(nan), Token::Logical(Logical::Or), Token::Reference(b), Token::LengthEquals(zero), ..]
            if a == b && nan == "NaN" && zero == "0" =>
        {
            Some((6, vec![Token::Reference(a.clone()), Token::NotAnswered]))
        }
        _ => None,
    }
}

/// The shorthand forms of the functions, applied one after the other.
pub(crate) const SUGAR_RULES: [Rule; 4] = [selected, not_equal, count_selected, string_length];

pub(crate) const ANSWERED_RULE: Rule = answered;

pub(crate) fn apply(tokens: &[Token], rule: Rule) -> Vec<Token> {
    let mut res: Vec<Token> = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        match rule(&tokens[i..]) {
            Some((consumed, replacement)) => {
                res.extend(replacement);
                i += consumed;
            }
            None => {
                res.push(tokens[i].clone());
                i += 1;
            }
        }
    }
    res
}

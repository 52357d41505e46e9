//! Turns a rewritten token stream into markup, one language at a time.

use super::lexer::{Comparison, Logical, Token};
use crate::config::ParseOptions;
use crate::language::DatumLanguage;
use crate::question_type::FormQuestionType;
use crate::survey::{find_question, SurveyItem};

/// How far the rendering goes. Each stage also applies the previous ones.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub(crate) enum Stage {
    Tokens,
    Idioms,
    Operators,
    Parentheses,
    Comparisons,
    References,
    LogicalOperators,
}

impl Stage {
    pub(crate) const RENDERING: [Stage; 6] = [
        Stage::Idioms,
        Stage::Operators,
        Stage::Parentheses,
        Stage::Comparisons,
        Stage::References,
        Stage::LogicalOperators,
    ];
}

/// English is worded, other languages use symbols.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub(crate) enum Register {
    Words,
    Symbols,
}

impl Register {
    pub(crate) fn for_language(language: &DatumLanguage) -> Register {
        if language.is_english() {
            Register::Words
        } else {
            Register::Symbols
        }
    }

    fn comparison(&self, c: Comparison) -> &'static str {
        match (self, c) {
            (Register::Words, Comparison::GreaterOrEqual) => "is greater than or equal with",
            (Register::Words, Comparison::Greater) => "is greater than",
            (Register::Words, Comparison::LessOrEqual) => "is less than or equal with",
            (Register::Words, Comparison::Less) => "is less than",
            (Register::Words, Comparison::NotEqual) => "was NOT answered with",
            (Register::Words, Comparison::Equal) => "was answered with",
            (Register::Symbols, Comparison::GreaterOrEqual) => "≥",
            (Register::Symbols, Comparison::Greater) => "&gt;",
            (Register::Symbols, Comparison::LessOrEqual) => "≤",
            (Register::Symbols, Comparison::Less) => "&lt;",
            (Register::Symbols, Comparison::NotEqual) => "≠",
            (Register::Symbols, Comparison::Equal) => "=",
        }
    }

    fn logical(&self, l: Logical) -> &'static str {
        match (self, l) {
            (Register::Words, Logical::And) => "AND",
            (Register::Words, Logical::Or) => "OR",
            (Register::Symbols, Logical::And) => "&amp;&amp;",
            (Register::Symbols, Logical::Or) => "||",
        }
    }
}

fn plural(count: &str, singular: &str, plural: &str) -> String {
    if count == "1" {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

fn segment(class: &str, text: &str) -> String {
    format!("<span class=\"relevance-segment rsg-{}\">{}</span>", class, text)
}

fn precondition(segments: &[String]) -> String {
    format!(
        "<span class=\"relevance-precondition\">{}</span>",
        segments.join(" ")
    )
}

// A token, or a group of tokens rendered together.
enum Piece<'t> {
    /// `${q} = 'a'`
    Comparison {
        question: &'t str,
        comparison: Comparison,
        value: &'t str,
    },
    /// `${q}` and the tokens that follow it.
    Reference { question: &'t str, tail: &'t [Token] },
    Single(&'t Token),
}

fn belongs_to_tail(t: &Token) -> bool {
    !matches!(
        t,
        Token::Reference(_)
            | Token::Literal(_)
            | Token::Logical(_)
            | Token::OpenParen
            | Token::CloseParen
    )
}

fn pieces(tokens: &[Token]) -> Vec<Piece<'_>> {
    let mut res: Vec<Piece> = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i..] {
            [Token::Reference(q), Token::Comparison(c), Token::Literal(v), ..] => {
                res.push(Piece::Comparison {
                    question: q,
                    comparison: *c,
                    value: v,
                });
                i += 3;
            }
            [Token::Reference(q), rest @ ..] => {
                let len = rest.iter().take_while(|t| belongs_to_tail(t)).count();
                res.push(Piece::Reference {
                    question: q,
                    tail: &rest[..len],
                });
                i += 1 + len;
            }
            _ => {
                res.push(Piece::Single(&tokens[i]));
                i += 1;
            }
        }
    }
    res
}

/// Renders the tokens of one relevance expression in one language.
pub(crate) struct Renderer<'a> {
    pub items: &'a [SurveyItem],
    pub language: &'a DatumLanguage,
    pub options: &'a ParseOptions,
}

impl<'a> Renderer<'a> {
    fn register(&self) -> Register {
        Register::for_language(self.language)
    }

    fn comparison_text(&self, c: Comparison, stage: Stage) -> String {
        if stage >= Stage::Operators {
            self.register().comparison(c).to_string()
        } else {
            c.as_str().to_string()
        }
    }

    fn token_text(&self, t: &Token, stage: Stage) -> String {
        match t {
            Token::SelectedMoreThan(n) if stage >= Stage::Idioms => format!(
                "was answered with more than {}",
                plural(n, "option", "options")
            ),
            Token::LengthEquals(n) if stage >= Stage::Idioms => format!(
                "was answered with {}",
                plural(n, "character", "characters")
            ),
            Token::NotAnswered if stage >= Stage::Idioms => "was NOT answered".to_string(),
            Token::Comparison(c) => self.comparison_text(*c, stage),
            _ => t.to_string(),
        }
    }

    // Returns the text and whether it is markup.
    fn piece(&self, p: &Piece, stage: Stage) -> (String, bool) {
        match p {
            Piece::Comparison {
                question,
                comparison,
                value,
            } => {
                if stage >= Stage::Comparisons {
                    (self.comparison_markup(question, *comparison, value), true)
                } else {
                    (
                        format!(
                            "${{{}}} {} '{}'",
                            question,
                            self.comparison_text(*comparison, stage),
                            value
                        ),
                        false,
                    )
                }
            }
            Piece::Reference { question, tail } => {
                let tail: Vec<String> = tail.iter().map(|t| self.token_text(t, stage)).collect();
                if stage >= Stage::References {
                    (self.reference_markup(question, &tail.join(" ")), true)
                } else {
                    let mut parts = vec![format!("${{{}}}", question)];
                    parts.extend(tail);
                    (parts.join(" "), false)
                }
            }
            Piece::Single(Token::OpenParen) if stage >= Stage::Parentheses => (
                format!(
                    "<span class=\"relevance-precondition\">{}&nbsp;</span>",
                    segment("lp", "(")
                ),
                true,
            ),
            Piece::Single(Token::CloseParen) if stage >= Stage::Parentheses => (
                format!(
                    "<span class=\"relevance-precondition\">&nbsp;{}</span>",
                    segment("lp", ")")
                ),
                true,
            ),
            Piece::Single(Token::Logical(l)) if stage >= Stage::LogicalOperators => (
                format!(
                    "<span class=\"relevance-precondition\"> {} </span>",
                    segment("lo", &format!("&nbsp;{}&nbsp;", self.register().logical(*l)))
                ),
                true,
            ),
            Piece::Single(t) => (self.token_text(t, stage), false),
        }
    }

    fn question_label(&self, name: &str, label: Option<&str>) -> String {
        match label {
            Some(l) => segment("qs", l),
            None => segment(
                "qs",
                &format!("Question \"{}\" translation not found;", name),
            ),
        }
    }

    fn comparison_markup(&self, name: &str, comparison: Comparison, value: &str) -> String {
        let op = self.register().comparison(comparison);
        let question = match find_question(self.items, name) {
            Some(q) => q,
            None => {
                return precondition(&[
                    segment("nf", &format!("Question \"{}\" not found;", name)),
                    segment("co", op),
                    segment("nf", &format!("Answer \"{}\" not found;", value)),
                ])
            }
        };
        let label = self.question_label(name, question.label.translation(self.language));
        let ty = question.question_type();
        if ty.requires_selection_answers() {
            let answer = match question.answer(value) {
                Some(a) => match a.answer_label.translation(self.language) {
                    Some(t) => segment("as", t),
                    None => segment(
                        "as",
                        &format!("Answer \"{}\" translation not found;", value),
                    ),
                },
                None => segment("nf", &format!("Answer \"{}\" not found;", value)),
            };
            return precondition(&[label, segment("co", op), answer]);
        }
        let boolean = self.options.calculate_is_prefix_as_boolean
            && ty == FormQuestionType::Calculate
            && question.name.to_lowercase().starts_with("is");
        match value {
            "0" | "1" if boolean => precondition(&[
                label,
                segment("co", "is"),
                segment("as", if value == "1" { "True" } else { "False" }),
            ]),
            _ => precondition(&[label, segment("co", op), segment("as", value)]),
        }
    }

    fn reference_markup(&self, name: &str, tail: &str) -> String {
        let mut segments = vec![match find_question(self.items, name) {
            Some(q) => self.question_label(name, q.label.translation(self.language)),
            None => segment("nf", &format!("Question \"{}\" not found;", name)),
        }];
        if !tail.is_empty() {
            segments.push(segment("tp", tail));
        }
        precondition(&segments)
    }

    /// Renders all the tokens up to the given stage.
    pub(crate) fn render(&self, tokens: &[Token], stage: Stage) -> String {
        let mut res = String::new();
        let mut previous_is_text = false;
        for p in pieces(tokens) {
            let (text, is_markup) = self.piece(&p, stage);
            if !is_markup && previous_is_text {
                res.push(' ');
            }
            res.push_str(&text);
            previous_is_text = !is_markup;
        }
        res
    }
}

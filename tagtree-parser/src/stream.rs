//! Character-level pass over the literal fragments of a template.
//!
//! `<div class="a">Some text ${value}<span>More</span></div>` becomes the flat
//! token list `<div class="a">`, `Some text`, value, `<span>`, `More`,
//! `</span>`, `</div>`.

use std::collections::VecDeque;

use crate::classify::{is_char_whitespace, is_closing_tag, is_html_comment, is_html_tag, is_whitespace};
use crate::value::{Classified, TypedValue, Value, classify_value};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    OpenTag(String),
    CloseTag(String),
    /// An HTML comment including its delimiters.
    Comment(String),
    Text(String),
    Value(TypedValue),
}

impl Token {
    /// Classifies a finished run of markup text by its content.
    pub fn from_markup(text: String) -> Self {
        if is_closing_tag(&text) {
            Token::CloseTag(text)
        } else if is_html_tag(&text) {
            Token::OpenTag(text)
        } else if is_html_comment(&text) {
            Token::Comment(text)
        } else {
            Token::Text(text)
        }
    }
}

/// Scratch state for one conversion; never shared between calls.
#[derive(Debug, Default)]
struct Converter {
    in_tag: bool,
    in_attribute_value: bool,
    /// The previous character was an unescaped `\` inside a quoted value.
    escaped: bool,
    in_comment: bool,
    previous: Option<char>,
    buffer: String,
    tokens: Vec<Token>,
}

impl Converter {
    fn step(&mut self, ch: char) {
        if self.in_comment {
            if ch == '\n' {
                self.close_comment();
            }
        } else if ch == '<' && !self.in_attribute_value {
            self.open_tag();
        } else if ch == '>' && self.in_tag && !self.in_attribute_value {
            self.close_tag();
        } else if ch == '/' && self.previous == Some('/') && !self.in_tag {
            self.open_comment();
        } else {
            self.process_char(ch);
        }
        self.previous = Some(ch);
    }

    fn open_tag(&mut self) {
        self.flush_text();
        self.in_tag = true;
        self.buffer.push('<');
    }

    fn close_tag(&mut self) {
        self.buffer.push('>');
        let tag = std::mem::take(&mut self.buffer);
        self.tokens.push(Token::from_markup(tag));
        self.in_tag = false;
    }

    // Line comments are dropped together with the text already buffered on
    // their line.
    fn open_comment(&mut self) {
        self.in_comment = true;
        self.buffer.clear();
    }

    fn close_comment(&mut self) {
        self.in_comment = false;
        self.buffer.clear();
    }

    fn process_char(&mut self, ch: char) {
        let was_in_value = self.in_attribute_value;
        let escaped = std::mem::take(&mut self.escaped);
        self.buffer.push(ch);

        if !self.in_tag {
            return;
        }
        if was_in_value {
            match ch {
                '\\' if !escaped => self.escaped = true,
                '"' if !escaped => self.in_attribute_value = false,
                _ => {}
            }
        } else if ch == '"' && self.previous == Some('=') {
            self.in_attribute_value = true;
        }
        // `< ` is a stray angle bracket, not a tag.
        if self.previous == Some('<') && !was_in_value && is_char_whitespace(Some(ch)) {
            self.in_tag = false;
        }
    }

    /// Emits buffered text unless it is only whitespace.
    fn flush_text(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buffer);
        if !is_whitespace(&text) {
            self.tokens.push(Token::from_markup(text.trim().to_string()));
        }
    }

    /// Emits whatever is left once the input ends. An unfinished tag is plain
    /// text, never markup.
    fn finish(&mut self) {
        if self.in_tag {
            let text = std::mem::take(&mut self.buffer);
            tracing::debug!(text = %text, "template ends inside a tag");
            if !is_whitespace(&text) {
                self.tokens.push(Token::Text(text.trim().to_string()));
            }
        } else {
            self.flush_text();
        }
    }

    /// Splices text into the tag being read. The text always lands inside a
    /// quoted attribute value, so its quotes and spaces cannot start new
    /// attributes.
    fn splice_attribute_text(&mut self, text: &str) {
        if self.in_attribute_value {
            push_escaped(&mut self.buffer, text);
            self.escaped = false;
            self.previous = None;
        } else if self.previous == Some('=') {
            self.buffer.push('"');
            push_escaped(&mut self.buffer, text);
            self.buffer.push('"');
            self.previous = Some('"');
        } else {
            tracing::debug!(text = %text, "dropping value outside an attribute value");
        }
    }

    fn push_value(&mut self, value: Value) {
        match classify_value(value) {
            Classified::Text(text) if self.in_tag => self.splice_attribute_text(&text),
            Classified::Typed(TypedValue::Interpolation(raw)) if self.in_tag => {
                self.splice_attribute_text(&raw)
            }
            Classified::Text(text) => {
                self.flush_text();
                self.tokens.push(Token::Text(text));
            }
            Classified::Typed(typed) => {
                if !self.in_tag {
                    self.flush_text();
                }
                self.tokens.push(Token::Value(typed));
            }
        }
    }
}

fn push_escaped(buffer: &mut String, text: &str) {
    for ch in text.chars() {
        if matches!(ch, '"' | '\\') {
            buffer.push('\\');
        }
        buffer.push(ch);
    }
}

/// Converts literal fragments and the values between them into a flat list
/// of tokens in document order.
///
/// A value slot reached inside a line comment is skipped and its value moves
/// on to the next slot; values still pending after the last fragment are
/// dropped.
pub fn convert(literals: &[&str], values: Vec<Value>) -> Vec<Token> {
    let mut values: VecDeque<Value> = values.into();
    let mut converter = Converter::default();

    let last = literals.len().saturating_sub(1);
    for (index, literal) in literals.iter().enumerate() {
        for ch in literal.chars() {
            converter.step(ch);
        }
        if index < last && !converter.in_comment {
            if let Some(value) = values.pop_front() {
                converter.push_value(value);
            }
        }
    }
    if !converter.in_comment {
        converter.finish();
    }

    if !values.is_empty() {
        tracing::debug!(dropped = values.len(), "values left over after the last literal");
    }
    converter.tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<String> {
        tokens
            .iter()
            .map(|t| match t {
                Token::OpenTag(s) | Token::CloseTag(s) | Token::Comment(s) | Token::Text(s) => {
                    s.clone()
                }
                Token::Value(v) => format!("{:?}", v.kind()),
            })
            .collect()
    }

    #[test]
    fn splits_tags_and_text() {
        let tokens = convert(&[r#"<div class="a b">  Some text <span>More</span></div>"#], vec![]);
        assert_eq!(
            texts(&tokens),
            vec![r#"<div class="a b">"#, "Some text", "<span>", "More", "</span>", "</div>"]
        );
        assert!(matches!(tokens[0], Token::OpenTag(_)));
        assert!(matches!(tokens[5], Token::CloseTag(_)));
    }

    #[test]
    fn quoted_angle_brackets_stay_in_the_tag() {
        let tokens = convert(&[r#"<a title="1 > 0">x</a>"#], vec![]);
        assert_eq!(tokens[0], Token::OpenTag(r#"<a title="1 > 0">"#.into()));
    }

    #[test]
    fn stray_angle_bracket_is_text() {
        let tokens = convert(&["<p>1 < 2</p>"], vec![]);
        assert_eq!(texts(&tokens), vec!["<p>", "1", "< 2", "</p>"]);
    }

    #[test]
    fn line_comment_drops_its_line() {
        let tokens = convert(&["<div>\n  // <b>gone</b>\n  kept\n</div>"], vec![]);
        assert_eq!(texts(&tokens), vec!["<div>", "kept", "</div>"]);
    }

    #[test]
    fn slashes_inside_tags_are_not_comments() {
        let tokens = convert(&[r#"<a href="http://example.com">x</a>"#], vec![]);
        assert_eq!(tokens[0], Token::OpenTag(r#"<a href="http://example.com">"#.into()));
    }

    #[test]
    fn html_comment_is_a_token() {
        let tokens = convert(&["<div><!-- c --></div>"], vec![]);
        assert_eq!(tokens[1], Token::Comment("<!-- c -->".into()));
    }

    #[test]
    fn values_keep_document_order() {
        let tokens = convert(&["<p>Hello ", "!</p>"], vec![Value::from("Bill")]);
        assert_eq!(texts(&tokens), vec!["<p>", "Hello", "Bill", "!", "</p>"]);
    }

    #[test]
    fn value_inside_tag_joins_the_attribute() {
        let tokens = convert(&[r#"<input value=""#, r#"">"#], vec![Value::from("Bill Evans")]);
        assert_eq!(tokens, vec![Token::OpenTag(r#"<input value="Bill Evans">"#.into())]);
    }

    #[test]
    fn value_quotes_cannot_open_attributes() {
        let tokens =
            convert(&[r#"<button class=""#, r#""></button>"#], vec![Value::from(r#"a" onclick="x"#)]);
        assert_eq!(
            tokens[0],
            Token::OpenTag(r#"<button class="a\" onclick=\"x">"#.into())
        );
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn unquoted_value_is_quoted() {
        let tokens = convert(&["<input value=", ">"], vec![Value::from("a b")]);
        assert_eq!(tokens, vec![Token::OpenTag(r#"<input value="a b">"#.into())]);
    }

    #[test]
    fn value_in_attribute_name_position_is_dropped() {
        let tokens = convert(&["<input ", ">"], vec![Value::from("disabled")]);
        assert_eq!(tokens, vec![Token::OpenTag("<input >".into())]);
    }

    #[test]
    fn escaped_quote_keeps_the_value_open() {
        let tokens = convert(&[r#"<a title="say \"hi\" > now">x</a>"#], vec![]);
        assert_eq!(
            texts(&tokens),
            vec![r#"<a title="say \"hi\" > now">"#, "x", "</a>"]
        );
    }

    #[test]
    fn unfinished_tag_at_the_end_is_text() {
        let tokens = convert(&["<div>x</div"], vec![]);
        assert_eq!(tokens.last(), Some(&Token::Text("</div".into())));
    }

    #[test]
    fn value_in_comment_moves_to_next_slot() {
        let tokens = convert(&["<div>// ", "\n", "</div>"], vec![Value::from(1), Value::from(2)]);
        assert_eq!(texts(&tokens), vec!["<div>", "1", "</div>"]);
    }

    #[test]
    fn trailing_text_is_flushed() {
        let tokens = convert(&["<br> tail"], vec![]);
        assert_eq!(texts(&tokens), vec!["<br>", "tail"]);
    }
}

//! Tokenizer for Nunjucks template source.
//!
//! The lexer alternates between two modes:
//! - data mode: raw template text, emitted as `Token::Data`
//! - code mode: the inside of `{{ … }}` and `{% … %}` tags
//!
//! Comments (`{# … #}`) are dropped. `{% raw %}` and `{% verbatim %}`
//! bodies are emitted as plain data so nothing inside them is parsed.

use super::TemplateError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Template text outside any tag.
    Data(String),
    /// `{{`
    VariableStart,
    /// `}}`
    VariableEnd,
    /// `{%`
    BlockStart,
    /// `%}`
    BlockEnd,
    Str(String),
    Int(i64),
    Float(f64),
    Name(String),
    Punct(&'static str),
    Eof,
}

/// A token with its 1-based source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
    pub col: usize,
}

const PUNCT_3: &[&str] = &["===", "!=="];
const PUNCT_2: &[&str] = &["==", "!=", "<=", ">=", "//", "**"];
const PUNCT_1: &[&str] = &[
    "+", "-", "*", "/", "%", "~", "|", ".", ",", ":", "=", "(", ")", "[", "]", "{", "}", "<", ">",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Variable,
    Block,
}

pub fn tokenize(source: &str) -> Result<Vec<Spanned>, TemplateError> {
    Lexer::new(source).run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    tokens: Vec<Spanned>,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Spanned>, TemplateError> {
        while self.pos < self.chars.len() {
            self.lex_data()?;
        }
        self.push(Token::Eof, self.line, self.col);
        Ok(self.tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c))
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    fn push(&mut self, token: Token, line: usize, col: usize) {
        self.tokens.push(Spanned { token, line, col });
    }

    fn error(&self, message: impl Into<String>) -> TemplateError {
        TemplateError::new(message, self.line, self.col)
    }

    /// Consume template text up to the next tag opener, then the tag itself.
    fn lex_data(&mut self) -> Result<(), TemplateError> {
        let (line, col) = (self.line, self.col);
        let mut text = String::new();
        while self.pos < self.chars.len()
            && !(self.starts_with("{{") || self.starts_with("{%") || self.starts_with("{#"))
        {
            if let Some(c) = self.bump() {
                text.push(c);
            }
        }
        if !text.is_empty() {
            self.push(Token::Data(text), line, col);
        }

        if self.starts_with("{#") {
            self.skip_comment()
        } else if self.starts_with("{{") {
            self.lex_tag(TagKind::Variable)
        } else if self.starts_with("{%") {
            if let Some(end_tag) = self.raw_block_end_tag() {
                self.lex_raw_block(end_tag)
            } else {
                self.lex_tag(TagKind::Block)
            }
        } else {
            Ok(())
        }
    }

    fn skip_comment(&mut self) -> Result<(), TemplateError> {
        let (line, col) = (self.line, self.col);
        self.bump_n(2);
        while self.pos < self.chars.len() {
            if self.starts_with("#}") {
                self.bump_n(2);
                return Ok(());
            }
            self.bump();
        }
        Err(TemplateError::new("unterminated comment", line, col))
    }

    /// Returns the matching end tag name if the block tag at the cursor opens
    /// a `raw` or `verbatim` section.
    fn raw_block_end_tag(&self) -> Option<&'static str> {
        let name = self.tag_name_at(self.pos + 2);
        match name.as_str() {
            "raw" => Some("endraw"),
            "verbatim" => Some("endverbatim"),
            _ => None,
        }
    }

    /// Reads the first word of a block tag whose body starts at `start`,
    /// skipping whitespace and a `-` trim marker.
    fn tag_name_at(&self, start: usize) -> String {
        let mut i = start;
        while let Some(&c) = self.chars.get(i) {
            if c == '-' || c.is_whitespace() {
                i += 1;
            } else {
                break;
            }
        }
        let mut name = String::new();
        while let Some(&c) = self.chars.get(i) {
            if c.is_alphanumeric() || c == '_' {
                name.push(c);
                i += 1;
            } else {
                break;
            }
        }
        name
    }

    fn skip_to_block_end(&mut self) -> Result<(), TemplateError> {
        let (line, col) = (self.line, self.col);
        while self.pos < self.chars.len() {
            if self.starts_with("%}") {
                self.bump_n(2);
                return Ok(());
            }
            self.bump();
        }
        Err(TemplateError::new("unterminated block tag", line, col))
    }

    fn lex_raw_block(&mut self, end_tag: &str) -> Result<(), TemplateError> {
        let (open_line, open_col) = (self.line, self.col);
        self.skip_to_block_end()?;

        let (line, col) = (self.line, self.col);
        let mut text = String::new();
        while self.pos < self.chars.len() {
            if self.starts_with("{%") && self.tag_name_at(self.pos + 2) == end_tag {
                self.skip_to_block_end()?;
                if !text.is_empty() {
                    self.push(Token::Data(text), line, col);
                }
                return Ok(());
            }
            if let Some(c) = self.bump() {
                text.push(c);
            }
        }
        Err(TemplateError::new(
            format!("expected {end_tag}"),
            open_line,
            open_col,
        ))
    }

    fn lex_tag(&mut self, kind: TagKind) -> Result<(), TemplateError> {
        let (line, col) = (self.line, self.col);
        self.bump_n(2);
        // whitespace control marker
        if self.peek() == Some('-') {
            self.bump();
        }
        let start = match kind {
            TagKind::Variable => Token::VariableStart,
            TagKind::Block => Token::BlockStart,
        };
        self.push(start, line, col);
        self.lex_code(kind, line, col)
    }

    fn lex_code(
        &mut self,
        kind: TagKind,
        open_line: usize,
        open_col: usize,
    ) -> Result<(), TemplateError> {
        let mut brace_depth = 0usize;
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.bump();
            }
            let (line, col) = (self.line, self.col);
            let Some(c) = self.peek() else {
                let what = match kind {
                    TagKind::Variable => "variable",
                    TagKind::Block => "block",
                };
                return Err(TemplateError::new(
                    format!("unterminated {what} tag"),
                    open_line,
                    open_col,
                ));
            };

            if let Some(len) = self.tag_end_len(kind, brace_depth) {
                self.bump_n(len);
                let end = match kind {
                    TagKind::Variable => Token::VariableEnd,
                    TagKind::Block => Token::BlockEnd,
                };
                self.push(end, line, col);
                return Ok(());
            }

            if c == '"' || c == '\'' {
                let value = self.lex_string(c)?;
                self.push(Token::Str(value), line, col);
            } else if c.is_ascii_digit() {
                let token = self.lex_number()?;
                self.push(token, line, col);
            } else if c.is_alphabetic() || c == '_' || c == '$' {
                let mut name = String::new();
                while let Some(c) = self.peek() {
                    if c.is_alphanumeric() || c == '_' || c == '$' {
                        name.push(c);
                        self.bump();
                    } else {
                        break;
                    }
                }
                self.push(Token::Name(name), line, col);
            } else if let Some(p) = PUNCT_3.iter().find(|p| self.starts_with(p)) {
                self.bump_n(3);
                self.push(Token::Punct(*p), line, col);
            } else if let Some(p) = PUNCT_2.iter().find(|p| self.starts_with(p)) {
                self.bump_n(2);
                self.push(Token::Punct(*p), line, col);
            } else if let Some(p) = PUNCT_1.iter().find(|p| self.starts_with(p)) {
                match *p {
                    "{" => brace_depth += 1,
                    "}" => brace_depth = brace_depth.saturating_sub(1),
                    _ => {}
                }
                self.bump();
                self.push(Token::Punct(*p), line, col);
            } else {
                return Err(self.error(format!("unexpected character '{c}'")));
            }
        }
    }

    /// Length of the closing delimiter at the cursor, including a leading
    /// `-` trim marker, or `None` if the cursor is not at the tag end.
    fn tag_end_len(&self, kind: TagKind, brace_depth: usize) -> Option<usize> {
        let close = match kind {
            TagKind::Variable if brace_depth > 0 => return None,
            TagKind::Variable => "}}",
            TagKind::Block => "%}",
        };
        if self.starts_with(close) {
            Some(2)
        } else if self.peek() == Some('-') && self.rest_starts_with(1, close) {
            Some(3)
        } else {
            None
        }
    }

    fn rest_starts_with(&self, offset: usize, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(offset + i) == Some(c))
    }

    fn lex_string(&mut self, quote: char) -> Result<String, TemplateError> {
        let (line, col) = (self.line, self.col);
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(TemplateError::new("unterminated string", line, col)),
                Some(c) if c == quote => return Ok(value),
                Some('\\') => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some(c) => value.push(c),
                    None => return Err(TemplateError::new("unterminated string", line, col)),
                },
                Some(c) => value.push(c),
            }
        }
    }

    fn lex_number(&mut self) -> Result<Token, TemplateError> {
        let mut digits = String::new();
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            digits.push(c);
            self.bump();
        }
        let is_float =
            self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit());
        if !is_float {
            // past i64 range the literal is still a number
            return match digits.parse() {
                Ok(n) => Ok(Token::Int(n)),
                Err(_) => digits
                    .parse()
                    .map(Token::Float)
                    .map_err(|_| self.error(format!("invalid integer '{digits}'"))),
            };
        }
        digits.push('.');
        self.bump();
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            digits.push(c);
            self.bump();
        }
        digits
            .parse()
            .map(Token::Float)
            .map_err(|_| self.error(format!("invalid number '{digits}'")))
    }
}

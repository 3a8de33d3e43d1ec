use std::fmt::{Display, Formatter};
use std::str::Chars;
use crate::util;

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenPos {
    pub line: i32,
    pub column: i32,
}

impl TokenPos {
    pub fn new(line: i32, column: i32) -> TokenPos {
        TokenPos { line, column }
    }

    pub fn begin() -> TokenPos {
        TokenPos::new(1, 1)
    }
}

impl Display for TokenPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {} column {}]", self.line, self.column)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenType {
    None,
    Illegal,

    ParenthesisLeft, ParenthesisRight,
    BracketLeft, BracketRight,
    SquareBracketLeft, SquareBracketRight,
    Dot, Comma, Semicolon, Colon,

    Assign, Equal,
    Not, NotEqual,
    Greater, Less,

    Plus, Minus,
    Multiply, Divide, Modulo,

    Identifier,
    Int,
    String,

    // Keywords
    Function,
    Let, Const,
    While,
    If, Else,
    Return,
    True, False,

    // EOF
    Eof,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    token_type: TokenType,
    source: String,
    start: TokenPos, end: TokenPos,
}

impl Token {
    pub fn new(token_type: TokenType, source: String, start: TokenPos, end: TokenPos) -> Token {
        Token {
            token_type, source,
            start, end
        }
    }

    pub fn empty() -> Token {
        Token {
            token_type: TokenType::None,
            source: String::from(""),
            start: TokenPos::begin(), end: TokenPos::begin(),
        }
    }

    pub fn token_type(&self) -> TokenType { self.token_type }
    pub fn source(&self) -> &str { &self.source }
    pub fn start(&self) -> &TokenPos { &self.start }
    pub fn end(&self) -> &TokenPos { &self.end }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.token_type {
            TokenType::None => f.write_str("None"),
            TokenType::Eof => f.write_str("Eof"),
            TokenType::String => write!(f, "`\"{}\"`", self.source),
            _ => write!(f, "`{}`", self.source),
        }
    }
}

pub struct Lexer<'source> {
    input: &'source str,

    chars: Chars<'source>,
    peeked: Option<char>,

    start_index: usize,
    current_index: usize,

    start_pos: TokenPos,
    current_pos: TokenPos,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Lexer<'source> {
        Lexer {
            input: source,

            chars: source.chars(),
            peeked: None,

            start_index: 0,
            current_index: 0,

            start_pos: TokenPos::begin(),
            current_pos: TokenPos::begin(),
        }
    }

    /// Scans the next token. Unknown characters become `Illegal` tokens
    /// rather than failures, so this can always be called again until `Eof`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start_index = self.current_index;
        self.start_pos = self.current_pos;

        let c = match self.consume() {
            Some(c) => c,
            None => return self.make_token(TokenType::Eof),
        };

        match c {
            '(' => self.make_token(TokenType::ParenthesisLeft),
            ')' => self.make_token(TokenType::ParenthesisRight),
            '{' => self.make_token(TokenType::BracketLeft),
            '}' => self.make_token(TokenType::BracketRight),
            '[' => self.make_token(TokenType::SquareBracketLeft),
            ']' => self.make_token(TokenType::SquareBracketRight),
            '.' => self.make_token(TokenType::Dot),
            ',' => self.make_token(TokenType::Comma),
            ';' => self.make_token(TokenType::Semicolon),
            ':' => self.make_token(TokenType::Colon),

            '=' => if self.expect('=') { self.make_token(TokenType::Equal) } else {
                self.make_token(TokenType::Assign)
            },
            '!' => if self.expect('=') { self.make_token(TokenType::NotEqual) } else {
                self.make_token(TokenType::Not)
            },
            '>' => self.make_token(TokenType::Greater),
            '<' => self.make_token(TokenType::Less),

            '+' => self.make_token(TokenType::Plus),
            '-' => self.make_token(TokenType::Minus),
            '*' => self.make_token(TokenType::Multiply),
            '/' => self.make_token(TokenType::Divide),
            '%' => self.make_token(TokenType::Modulo),

            '"' => self.scan_string(),
            '0'..='9' => self.scan_number(),
            c if util::is_alphabetic(c) => self.scan_identifier(),

            _ => self.make_token(TokenType::Illegal),
        }
    }

    fn scan_string(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }

            let _ = self.consume();
        }

        // An unterminated string runs to the end of input; the content up to
        // there still becomes the token text.
        let end_index = if self.is_eof() {
            self.current_index
        } else {
            let _ = self.consume(); // the trailing '"'
            self.current_index - 1
        };

        Token {
            token_type: TokenType::String,
            source: self.input[(self.start_index + 1)..end_index].to_owned(),
            start: self.start_pos, end: self.current_pos,
        }
    }

    fn scan_number(&mut self) -> Token {
        // Only contiguous digits; a following '.' is left for its own token,
        // and the parser joins `INT . INT` back into a float literal.
        while let Some('0'..='9') = self.peek() {
            let _ = self.consume();
        }

        self.make_token(TokenType::Int)
    }

    fn scan_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if !util::is_alphanumeric(c) {
                break;
            }

            let _ = self.consume();
        }

        let name = &self.input[self.start_index..self.current_index];
        let mut chars = name.chars();

        let token_type = match chars.next().expect("Internal interpreter error: Empty identifier") {
            'c' => Lexer::check_keyword(name, 1, "const", TokenType::Const),
            'e' => Lexer::check_keyword(name, 1, "else", TokenType::Else),
            'f' => {
                if let Some(c) = chars.next() {
                    match c {
                        'n' => Lexer::check_keyword(name, 2, "fn", TokenType::Function),
                        'a' => Lexer::check_keyword(name, 2, "false", TokenType::False),
                        _ => TokenType::Identifier,
                    }
                } else { TokenType::Identifier }
            },
            'i' => Lexer::check_keyword(name, 1, "if", TokenType::If),
            'l' => Lexer::check_keyword(name, 1, "let", TokenType::Let),
            'r' => Lexer::check_keyword(name, 1, "return", TokenType::Return),
            't' => Lexer::check_keyword(name, 1, "true", TokenType::True),
            'w' => Lexer::check_keyword(name, 1, "while", TokenType::While),
            _ => TokenType::Identifier,
        };

        Token { source: name.to_owned(), token_type, start: self.start_pos, end: self.current_pos }
    }

    fn check_keyword(name: &str, start: usize, keyword: &'static str, token_type: TokenType) -> TokenType {
        if name[start..] == keyword[start..] {
            token_type
        } else {
            TokenType::Identifier
        }
    }

    fn make_token(&self, token_type: TokenType) -> Token {
        Token {
            token_type,
            source: self.input[self.start_index..self.current_index].to_owned(),

            start: self.start_pos, end: self.current_pos,
        }
    }

    fn consume(&mut self) -> Option<char> {
        let c = if let Some(c) = self.peeked.take() {
            Some(c)
        } else {
            self.chars.next()
        };

        c.map(|c| {
            self.current_index += c.len_utf8();

            if c == '\n' {
                self.current_pos.line += 1;
                self.current_pos.column = 1;
            } else {
                self.current_pos.column += 1;
            }

            c
        })
    }

    fn peek(&mut self) -> Option<char> {
        if let Some(c) = self.peeked {
            Some(c)
        } else {
            let c = self.chars.next();
            self.peeked = c;
            c
        }
    }

    fn expect(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            let _ = self.consume();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                return;
            }

            let _ = self.consume();
        }
    }

    fn is_eof(&self) -> bool {
        self.current_index >= self.input.len()
    }
}

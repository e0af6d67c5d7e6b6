use std::fmt;
use std::sync::Arc;

use crate::error::ParseError;

/// Represents the smallest meaningful units (atoms) of the SQL language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // --- SQL Keywords ---
    Create,
    Table,
    Insert,
    Into,
    Values,
    Select,
    From,
    Where,
    Not,
    Unique,

    // --- Data Types ---
    Int,
    Varchar,
    Float,
    Boolean,

    // --- Identifiers & Literals ---
    /// A name representing a table or a column (e.g., `users`, `id`).
    Ident(String),
    /// A 64-bit integer literal (e.g., `42`, `-7`).
    Number(i64),
    /// A 64-bit floating-point literal (e.g., `3.14`).
    FloatNumber(f64),
    /// A string literal, defined between single quotes (e.g., `'Alice'`).
    /// A doubled quote inside the literal stands for a single quote.
    String(Arc<str>),
    /// The boolean literal `TRUE`.
    True,
    /// The boolean literal `FALSE`.
    False,
    /// The literal `NULL`.
    Null,

    // --- Symbols ---
    /// Left parenthesis `(`
    LeftParen,
    /// Right parenthesis `)`
    RightParen,
    /// Comma `,`
    Comma,
    /// Semicolon `;`
    Semicolon,
    /// Wildcard symbol `*`
    Star,
    /// Equal to `=`
    Equal,
    /// Not equal to, written `!=` or `<>`
    NotEqual,
    /// Lower than `<`
    Less,
    /// Lower than or equal `<=`
    LessEqual,
    /// Greater than `>`
    Greater,
    /// Greater than or equal `>=`
    GreaterEqual,

    // --- Special ---
    /// Represents the End Of File/Input.
    Eof,
}

impl fmt::Display for TokenKind {
    /// Renders the token the way error messages quote it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Create => "CREATE",
            TokenKind::Table => "TABLE",
            TokenKind::Insert => "INSERT",
            TokenKind::Into => "INTO",
            TokenKind::Values => "VALUES",
            TokenKind::Select => "SELECT",
            TokenKind::From => "FROM",
            TokenKind::Where => "WHERE",
            TokenKind::Not => "NOT",
            TokenKind::Unique => "UNIQUE",
            TokenKind::Int => "INT",
            TokenKind::Varchar => "VARCHAR",
            TokenKind::Float => "FLOAT",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Null => "NULL",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Star => "'*'",
            TokenKind::Equal => "'='",
            TokenKind::NotEqual => "'!='",
            TokenKind::Less => "'<'",
            TokenKind::LessEqual => "'<='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEqual => "'>='",
            TokenKind::Eof => "end of input",
            TokenKind::Ident(name) => return write!(f, "identifier {name:?}"),
            TokenKind::Number(n) => return write!(f, "{n}"),
            TokenKind::FloatNumber(x) => return write!(f, "{x}"),
            TokenKind::String(s) => return write!(f, "'{s}'"),
        };
        f.write_str(text)
    }
}

/// A token plus the character offset where it starts in the source text.
/// Offsets let the parser report where a grammar mismatch happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

/// A lexical scanner (lexer) that converts a raw SQL string into a sequence
/// of [Token]s.
pub struct Tokenizer {
    /// The input string stored as a vector of characters for easy iteration.
    input: Vec<char>,
    /// The current position in the character vector.
    position: usize,
}

impl Tokenizer {
    /// Creates a new Tokenizer for the given input string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Processes the entire input and returns a vector of tokens, always
    /// terminated by [TokenKind::Eof].
    ///
    /// # Errors
    /// Returns an error if an invalid character is encountered or if a
    /// string literal is left unterminated.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                break;
            }

            let token = self.next_token()?;
            tokens.push(token);
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            offset: self.position,
        });
        Ok(tokens)
    }

    /// Identifies the next token based on the character at the current position.
    fn next_token(&mut self) -> Result<Token, ParseError> {
        let offset = self.position;
        let ch = self.current_char();

        let kind = match ch {
            '(' => {
                self.advance();
                TokenKind::LeftParen
            }
            ')' => {
                self.advance();
                TokenKind::RightParen
            }
            ',' => {
                self.advance();
                TokenKind::Comma
            }
            ';' => {
                self.advance();
                TokenKind::Semicolon
            }
            '*' => {
                self.advance();
                TokenKind::Star
            }
            '=' => {
                self.advance();
                TokenKind::Equal
            }
            '!' => {
                self.advance();
                if self.matches('=') {
                    TokenKind::NotEqual
                } else {
                    return Err(ParseError::UnexpectedCharacter { ch: '!', offset });
                }
            }
            '<' => {
                self.advance();
                if self.matches('=') {
                    TokenKind::LessEqual
                } else if self.matches('>') {
                    TokenKind::NotEqual
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                self.advance();
                if self.matches('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            '-' => {
                self.advance();
                if !self.is_at_end() && self.current_char().is_ascii_digit() {
                    return self.read_number(offset, true);
                }
                return Err(ParseError::UnexpectedCharacter { ch: '-', offset });
            }
            c if c.is_alphabetic() || c == '_' => return self.read_identifier(offset),
            c if c.is_ascii_digit() => return self.read_number(offset, false),
            '\'' => return self.read_string(offset),
            _ => return Err(ParseError::UnexpectedCharacter { ch, offset }),
        };

        Ok(Token { kind, offset })
    }

    // --- Navigation Helpers ---

    /// Returns the character at the current position.
    fn current_char(&self) -> char {
        self.input[self.position]
    }

    /// Moves the cursor forward by one character.
    fn advance(&mut self) {
        self.position += 1;
    }

    /// Consumes the current character if it equals `expected`.
    fn matches(&mut self, expected: char) -> bool {
        if !self.is_at_end() && self.current_char() == expected {
            self.advance();
            return true;
        }
        false
    }

    /// Checks if the cursor has reached the end of the input.
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Consumes any whitespace characters (spaces, tabs, newlines).
    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    // --- Extraction Logic ---

    /// Reads a sequence of alphanumeric characters and determines if it's
    /// a reserved SQL keyword or a user-defined identifier.
    ///
    /// Keywords are matched case-insensitively; identifiers keep their case.
    fn read_identifier(&mut self, offset: usize) -> Result<Token, ParseError> {
        let mut ident = String::new();

        while !self.is_at_end()
            && (self.current_char().is_alphanumeric() || self.current_char() == '_')
        {
            ident.push(self.current_char());
            self.advance();
        }

        let kind = match ident.to_uppercase().as_str() {
            "CREATE" => TokenKind::Create,
            "TABLE" => TokenKind::Table,
            "INSERT" => TokenKind::Insert,
            "INTO" => TokenKind::Into,
            "VALUES" => TokenKind::Values,
            "SELECT" => TokenKind::Select,
            "FROM" => TokenKind::From,
            "WHERE" => TokenKind::Where,
            "NOT" => TokenKind::Not,
            "UNIQUE" => TokenKind::Unique,
            "INT" => TokenKind::Int,
            "VARCHAR" => TokenKind::Varchar,
            "FLOAT" => TokenKind::Float,
            "BOOLEAN" => TokenKind::Boolean,
            "TRUE" => TokenKind::True,
            "FALSE" => TokenKind::False,
            "NULL" => TokenKind::Null,
            _ => TokenKind::Ident(ident),
        };

        Ok(Token { kind, offset })
    }

    /// Reads a numeric literal. If a dot `.` is encountered, it returns a
    /// [TokenKind::FloatNumber], otherwise a [TokenKind::Number].
    fn read_number(&mut self, offset: usize, negative: bool) -> Result<Token, ParseError> {
        let mut number = String::new();
        if negative {
            number.push('-');
        }
        let mut has_dot = false;

        while !self.is_at_end()
            && (self.current_char().is_ascii_digit() || (self.current_char() == '.' && !has_dot))
        {
            if self.current_char() == '.' {
                has_dot = true;
            }
            number.push(self.current_char());
            self.advance();
        }

        // A second dot right after the literal can only be a typo.
        if !self.is_at_end() && self.current_char() == '.' {
            return Err(ParseError::UnexpectedCharacter {
                ch: '.',
                offset: self.position,
            });
        }

        let kind = if has_dot {
            number
                .parse::<f64>()
                .map(TokenKind::FloatNumber)
                .map_err(|_| ParseError::UnexpectedCharacter { ch: '.', offset })?
        } else {
            number
                .parse::<i64>()
                .map(TokenKind::Number)
                .map_err(|_| ParseError::UnexpectedToken {
                    expected: "an integer literal in range".into(),
                    found: number.clone(),
                    offset,
                })?
        };

        Ok(Token { kind, offset })
    }

    /// Reads a string literal enclosed in single quotes. A doubled quote
    /// (`''`) inside the literal is an escaped single quote.
    fn read_string(&mut self, offset: usize) -> Result<Token, ParseError> {
        self.advance(); // Skip the opening quote

        let mut string = String::new();
        loop {
            if self.is_at_end() {
                return Err(ParseError::UnterminatedLiteral { offset });
            }
            let ch = self.current_char();
            self.advance();
            if ch != '\'' {
                string.push(ch);
                continue;
            }
            // Closing quote, unless doubled.
            if self.matches('\'') {
                string.push('\'');
            } else {
                break;
            }
        }

        Ok(Token {
            kind: TokenKind::String(Arc::from(string.as_str())),
            offset,
        })
    }
}

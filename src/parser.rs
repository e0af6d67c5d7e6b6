use crate::ast::{
    ColumnSpec, ComparisonOp, CreateTable, Insert, Select, SelectColumns, Statement, WhereClause,
};
use crate::data_type::DataType;
use crate::error::ParseError;
use crate::tokenizer::{Token, TokenKind, Tokenizer};
use crate::value::Value;

/// Tokenizes and parses a single SQL statement.
///
/// This is the usual entry point; [Parser] is public for callers that
/// already hold a token stream.
pub fn parse_statement(sql: &str) -> Result<Statement, ParseError> {
    let tokens = Tokenizer::new(sql).tokenize()?;
    Parser::new(tokens).parse()
}

/// Recursive-descent parser over the tokenizer's output.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Expects the token stream to be [TokenKind::Eof]-terminated, as
    /// produced by [Tokenizer::tokenize].
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parses exactly one statement.
    ///
    /// A trailing semicolon is allowed; anything else after a complete
    /// statement is an error, never silently ignored.
    pub fn parse(&mut self) -> Result<Statement, ParseError> {
        let statement = match self.current().kind {
            TokenKind::Create => self.parse_create_table(),
            TokenKind::Insert => self.parse_insert(),
            TokenKind::Select => self.parse_select(),
            _ => Err(self.unexpected("CREATE, INSERT or SELECT")),
        }?;

        // semicolon is optional in SQL so skip it
        if self.current().kind == TokenKind::Semicolon {
            self.advance();
        }

        // Check we are at the end of the statement
        if !self.is_at_end() {
            return Err(self.unexpected("end of statement"));
        }

        Ok(statement)
    }

    // --- helpers ---

    fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    /// Builds an [ParseError::UnexpectedToken] for the current token.
    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let token = self.current();
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: token.kind.to_string(),
            offset: token.offset,
        }
    }

    fn consume(&mut self, expected: TokenKind) -> Result<(), ParseError> {
        if self.current().kind == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected.to_string()))
        }
    }

    fn consume_ident(&mut self) -> Result<String, ParseError> {
        match &self.current().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    fn consume_data_type(&mut self) -> Result<DataType, ParseError> {
        let data_type = match &self.current().kind {
            TokenKind::Int => DataType::Int,
            TokenKind::Varchar => DataType::Varchar,
            TokenKind::Float => DataType::Float,
            TokenKind::Boolean => DataType::Boolean,
            // An identifier here is a type name we don't know.
            TokenKind::Ident(name) => {
                return Err(ParseError::UnsupportedType { name: name.clone() });
            }
            _ => return Err(self.unexpected("a column type")),
        };
        self.advance();
        Ok(data_type)
    }

    fn consume_literal(&mut self) -> Result<Value, ParseError> {
        let value = match &self.current().kind {
            TokenKind::Number(n) => Value::Int(*n),
            TokenKind::FloatNumber(x) => Value::Float(*x),
            TokenKind::String(s) => Value::Text(s.clone()),
            TokenKind::True => Value::Bool(true),
            TokenKind::False => Value::Bool(false),
            TokenKind::Null => Value::Null,
            _ => return Err(self.unexpected("a literal value")),
        };
        self.advance();
        Ok(value)
    }

    fn consume_operator(&mut self) -> Result<ComparisonOp, ParseError> {
        let op = match self.current().kind {
            TokenKind::Equal => ComparisonOp::Eq,
            TokenKind::NotEqual => ComparisonOp::NotEq,
            TokenKind::Less => ComparisonOp::Lt,
            TokenKind::LessEqual => ComparisonOp::LtEq,
            TokenKind::Greater => ComparisonOp::Gt,
            TokenKind::GreaterEqual => ComparisonOp::GtEq,
            _ => return Err(self.unexpected("a comparison operator")),
        };
        self.advance();
        Ok(op)
    }

    // --- statements ---

    fn parse_create_table(&mut self) -> Result<Statement, ParseError> {
        self.consume(TokenKind::Create)?;
        self.consume(TokenKind::Table)?;
        let name = self.consume_ident()?;
        self.consume(TokenKind::LeftParen)?;

        let mut columns = vec![];
        loop {
            columns.push(self.parse_column_spec()?);
            match self.current().kind {
                TokenKind::RightParen => {
                    self.advance();
                    break;
                }
                TokenKind::Comma => {
                    self.advance();
                }
                _ => return Err(self.unexpected("',' or ')'")),
            }
        }

        Ok(Statement::CreateTable(CreateTable { name, columns }))
    }

    fn parse_column_spec(&mut self) -> Result<ColumnSpec, ParseError> {
        let name = self.consume_ident()?;
        let data_type = self.consume_data_type()?;

        let mut max_length = None;
        if data_type == DataType::Varchar && self.current().kind == TokenKind::LeftParen {
            self.advance();
            max_length = Some(self.consume_length()?);
            self.consume(TokenKind::RightParen)?;
        }

        let mut nullable = true;
        let mut unique = false;
        loop {
            match self.current().kind {
                TokenKind::Not => {
                    self.advance();
                    self.consume(TokenKind::Null)?;
                    nullable = false;
                }
                TokenKind::Unique => {
                    self.advance();
                    unique = true;
                }
                _ => break,
            }
        }

        Ok(ColumnSpec {
            name,
            data_type,
            max_length,
            nullable,
            unique,
        })
    }

    fn consume_length(&mut self) -> Result<usize, ParseError> {
        match self.current().kind {
            TokenKind::Number(n) if n > 0 => {
                self.advance();
                Ok(n as usize)
            }
            _ => Err(self.unexpected("a positive length")),
        }
    }

    fn parse_insert(&mut self) -> Result<Statement, ParseError> {
        self.consume(TokenKind::Insert)?;
        self.consume(TokenKind::Into)?;
        let table = self.consume_ident()?;

        if self.current().kind != TokenKind::Values {
            return Err(ParseError::MissingClause { clause: "VALUES" });
        }
        self.advance();

        self.consume(TokenKind::LeftParen)?;
        let mut values = vec![self.consume_literal()?];
        while self.current().kind == TokenKind::Comma {
            self.advance();
            values.push(self.consume_literal()?);
        }
        self.consume(TokenKind::RightParen)?;

        Ok(Statement::Insert(Insert { table, values }))
    }

    fn parse_select(&mut self) -> Result<Statement, ParseError> {
        self.consume(TokenKind::Select)?;

        let columns = if self.current().kind == TokenKind::Star {
            self.advance();
            SelectColumns::Star
        } else {
            let mut names = vec![self.consume_ident()?];
            while self.current().kind == TokenKind::Comma {
                self.advance();
                names.push(self.consume_ident()?);
            }
            SelectColumns::Names(names)
        };

        if self.current().kind != TokenKind::From {
            return Err(ParseError::MissingClause { clause: "FROM" });
        }
        self.advance();
        let table = self.consume_ident()?;

        let where_clause = if self.current().kind == TokenKind::Where {
            self.advance();
            Some(self.parse_where_clause()?)
        } else {
            None
        };

        Ok(Statement::Select(Select {
            table,
            columns,
            where_clause,
        }))
    }

    fn parse_where_clause(&mut self) -> Result<WhereClause, ParseError> {
        let column = self.consume_ident()?;
        let op = self.consume_operator()?;
        let value = self.consume_literal()?;

        Ok(WhereClause { column, op, value })
    }
}

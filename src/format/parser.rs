//! Single-pass parser from tokens to a [`Model`].
//!
//! The parser never fails. Anything it cannot place is reported as a
//! [`Diagnostic`] and skipped, and parsing resumes with the next token.
//!
//! Two pieces of context carry across tokens until they are changed: the
//! current database type (set by a type keyword such as `ORACLE`) and the
//! current home (set by `HOME`). A `DATABASE` entry inherits both.

use super::lexer::{Lexer, Token, TokenKind};
use crate::model::{DbType, Diagnostic, MetricId, Model, Record};
use tracing::{debug, trace};

/// Result of parsing an export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutput {
    pub model: Model,
    /// In input order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Where the parser is in the section nesting.
#[derive(Debug)]
enum State {
    NoContext,
    TypeOpen,
    HomeOpen,
    RecordOpen(Record),
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::NoContext => "no-context",
            State::TypeOpen => "type-open",
            State::HomeOpen => "home-open",
            State::RecordOpen(_) => "record-open",
        }
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    state: State,
    current_type: Option<DbType>,
    current_home: Option<String>,
    model: Model,
    diagnostics: Vec<Diagnostic>,
}

/// Parse exported configuration text.
pub fn parse(input: &str) -> ParseOutput {
    let output = Parser::new(input).run();
    debug!(
        records = output.model.len(),
        diagnostics = output.diagnostics.len(),
        "parsed dbspi configuration"
    );
    output
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
            state: State::NoContext,
            current_type: None,
            current_home: None,
            model: Model::new(),
            diagnostics: Vec::new(),
        }
    }

    fn run(mut self) -> ParseOutput {
        while let Some(token) = self.lexer.next_token() {
            self.step(token);
            trace!(state = self.state.name(), token = token.text);
        }
        self.close_record();

        ParseOutput {
            model: self.model,
            diagnostics: self.diagnostics,
        }
    }

    fn step(&mut self, token: Token<'a>) {
        // Keywords are always bare words; a quoted "ORACLE" is just a string.
        if token.kind == TokenKind::Quoted {
            self.unrecognized(token);
            return;
        }

        match token.text {
            "SYNTAX_VERSION" => {
                self.close_record();
                self.state = State::NoContext;
                if let Some(value) = self.value("SYNTAX_VERSION") {
                    match value.text.parse::<u32>() {
                        Ok(version) => self.model.global.syntax_version = Some(version),
                        Err(_) => self.unrecognized(value),
                    }
                }
            }
            "HOME" => {
                self.close_record();
                if let Some(value) = self.value("HOME") {
                    self.current_home = Some(value.text.to_string());
                    self.state = State::HomeOpen;
                }
            }
            "DATABASE" => {
                self.close_record();
                if let Some(value) = self.value("DATABASE") {
                    self.open_record(value.text);
                }
            }
            "CONNECT" => {
                if let Some(value) = self.value("CONNECT") {
                    let connect = Some(value.text.to_string());
                    match &mut self.state {
                        State::RecordOpen(record) => record.connect = connect,
                        _ => self.model.global.listener_connect = connect,
                    }
                }
            }
            "LOGFILE" => {
                if let Some(value) = self.value("LOGFILE") {
                    match &mut self.state {
                        State::RecordOpen(record) => record.logfile = Some(value.text.to_string()),
                        _ => debug!(logfile = value.text, "ignoring LOGFILE outside a database"),
                    }
                }
            }
            "FILTER" => self.filter(),
            "LISTENER" => {
                self.close_record();
                self.state = State::NoContext;
                if let Some(value) = self.value("LISTENER") {
                    self.model.global.listener_name = Some(value.text.to_string());
                }
            }
            other => match DbType::from_keyword(other) {
                Some(db_type) => {
                    self.close_record();
                    self.current_type = Some(db_type);
                    self.state = State::TypeOpen;
                }
                None => self.unrecognized(token),
            },
        }
    }

    fn filter(&mut self) {
        let Some(metric) = self.value("FILTER") else {
            return;
        };
        let Some(clause) = self.value("FILTER") else {
            return;
        };

        if !matches!(self.state, State::RecordOpen(_)) {
            debug!(metric = metric.text, "ignoring FILTER outside a database");
            return;
        }

        match MetricId::new(metric.text) {
            Some(id) => {
                if let State::RecordOpen(record) = &mut self.state {
                    record.filters.insert(id, clause.text.to_string());
                }
            }
            None => self.unrecognized(metric),
        }
    }

    fn open_record(&mut self, name: &str) {
        if self.model.contains(name) {
            self.diagnostics.push(Diagnostic::DuplicateName {
                name: name.to_string(),
            });
        }

        let mut record = Record::new(name);
        record.record_type = self.current_type;
        record.home = self.current_home.clone();
        self.state = State::RecordOpen(record);
    }

    /// Store the open record, if any. A later definition replaces an earlier one.
    fn close_record(&mut self) {
        let fallback = if self.current_home.is_some() {
            State::HomeOpen
        } else if self.current_type.is_some() {
            State::TypeOpen
        } else {
            State::NoContext
        };

        if let State::RecordOpen(record) = std::mem::replace(&mut self.state, fallback) {
            self.model.insert(record);
        }
    }

    /// Next token as the operand of `keyword`.
    fn value(&mut self, keyword: &'static str) -> Option<Token<'a>> {
        let token = self.lexer.next_token();
        if token.is_none() {
            self.diagnostics.push(Diagnostic::MissingValue { keyword });
        }
        token
    }

    fn unrecognized(&mut self, token: Token<'_>) {
        self.diagnostics.push(Diagnostic::UnrecognizedToken {
            token: token.text.to_string(),
            offset: token.offset,
        });
    }
}

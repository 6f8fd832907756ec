//! Recursive descent parser for Swift declarations
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST: the text of the
//! resulting tree is always exactly the input text.
//!
//! Only declarations are parsed structurally. Expressions and statement
//! conditions are carried as flat token runs, with balanced `()`/`[]`/`{}`
//! groups consumed as units so that declaration boundaries can be found
//! without a full expression grammar.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};
use std::ops::Range;

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse Swift source code into a CST
pub fn parse_swift(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Contextual keywords that act as declaration modifiers
const CONTEXTUAL_MODIFIERS: &[&str] = &[
    "open",
    "package",
    "final",
    "override",
    "mutating",
    "nonmutating",
    "lazy",
    "weak",
    "unowned",
    "required",
    "convenience",
    "dynamic",
    "optional",
    "indirect",
    "prefix",
    "postfix",
    "infix",
    "nonisolated",
    "distributed",
    "consuming",
    "borrowing",
    "__consuming",
];

/// A significant token together with the trivia attached to it.
///
/// Trailing trivia runs up to (not including) the next newline; everything
/// else between two significant tokens leads the second one.
#[derive(Debug, Clone)]
struct Piece {
    leading: Range<usize>,
    token: usize,
    trailing: Range<usize>,
}

fn attach_trivia(tokens: &[Token<'_>]) -> (Vec<Piece>, Range<usize>) {
    let mut pieces = Vec::new();
    let mut i = 0;
    loop {
        let leading_start = i;
        while i < tokens.len() && tokens[i].kind.is_trivia() {
            i += 1;
        }
        if i == tokens.len() {
            return (pieces, leading_start..i);
        }
        let token = i;
        i += 1;
        let trailing_start = i;
        while i < tokens.len() && tokens[i].kind.is_trivia() && tokens[i].kind != SyntaxKind::NEWLINE
        {
            i += 1;
        }
        pieces.push(Piece {
            leading: leading_start..token,
            token,
            trailing: trailing_start..i,
        });
    }
}

/// Where a declaration found by lookahead starts and what it is
#[derive(Debug, Clone, Copy)]
struct DeclScan {
    kind: SyntaxKind,
    modifiers: usize,
    introducer: usize,
}

/// What a depth-0 `{` means while consuming the tail of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Braces {
    /// Type body; ends the item
    Members,
    /// Function-like body; ends the item
    Body,
    /// Accessor or observer blocks; the item continues afterwards
    Accessors,
    /// Trailing closures; the item continues afterwards
    Closures,
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pieces: Vec<Piece>,
    eof_trivia: Range<usize>,
    pos: usize,
    last: Option<SyntaxKind>,
    brace_depth: usize,
    directive_depth: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        let (pieces, eof_trivia) = attach_trivia(tokens);
        Self {
            tokens,
            pieces,
            eof_trivia,
            pos: 0,
            last: None,
            brace_depth: 0,
            directive_depth: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn token_at(&self, i: usize) -> Option<&Token<'a>> {
        self.pieces.get(i).map(|p| &self.tokens[p.token])
    }

    fn kind_at(&self, i: usize) -> SyntaxKind {
        self.token_at(i).map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn text_at(&self, i: usize) -> &str {
        self.token_at(i).map(|t| t.text).unwrap_or("")
    }

    fn current_kind(&self) -> SyntaxKind {
        self.kind_at(self.pos)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current_kind() == kind
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.pieces.len()
    }

    /// No trivia at all between piece `i` and the one before it
    fn adjacent(&self, i: usize) -> bool {
        match (i.checked_sub(1).and_then(|p| self.pieces.get(p)), self.pieces.get(i)) {
            (Some(prev), Some(piece)) => prev.trailing.is_empty() && piece.leading.is_empty(),
            _ => false,
        }
    }

    /// Piece `i` starts a new line
    fn newline_before(&self, i: usize) -> bool {
        if i == 0 {
            return true;
        }
        self.pieces.get(i).is_some_and(|p| {
            self.tokens[p.leading.clone()]
                .iter()
                .any(|t| t.kind == SyntaxKind::NEWLINE)
        })
    }

    fn is_contextual_modifier(&self, i: usize) -> bool {
        self.kind_at(i) == SyntaxKind::IDENT && CONTEXTUAL_MODIFIERS.contains(&self.text_at(i))
    }

    fn is_plain_name(&self, i: usize) -> bool {
        self.kind_at(i) == SyntaxKind::IDENT && !self.is_contextual_modifier(i)
    }

    fn at_statement_keyword(&self) -> bool {
        is_block_statement(self.current_kind())
            || matches!(
                self.current_kind(),
                SyntaxKind::RETURN_KW
                    | SyntaxKind::THROW_KW
                    | SyntaxKind::BREAK_KW
                    | SyntaxKind::CONTINUE_KW
            )
    }

    // =========================================================================
    // Declaration lookahead
    // =========================================================================

    /// Check whether a declaration starts at the current token.
    ///
    /// Nothing directly after a `.` starts a declaration (`self.init`, `.init`).
    fn decl_ahead(&self) -> Option<DeclScan> {
        if self.at_eof() || self.last == Some(SyntaxKind::DOT) {
            return None;
        }
        let mut i = self.pos;
        while self.kind_at(i) == SyntaxKind::AT {
            i = self.skip_attribute(i);
        }
        let modifiers = i;
        while let Some(len) = self.modifier_len(i) {
            i += len;
        }
        let kind = self.introducer_at(i)?;
        Some(DeclScan {
            kind,
            modifiers,
            introducer: i,
        })
    }

    /// `@name`, `@a.b`, `@name(...)`; returns the index after the attribute
    fn skip_attribute(&self, at: usize) -> usize {
        let mut i = at + 1;
        let name_like = |i: usize| {
            let kind = self.kind_at(i);
            kind == SyntaxKind::IDENT || kind.is_keyword()
        };
        if name_like(i) && self.adjacent(i) {
            i += 1;
            while self.kind_at(i) == SyntaxKind::DOT && name_like(i + 1) {
                i += 2;
            }
        }
        if self.kind_at(i) == SyntaxKind::L_PAREN && self.adjacent(i) {
            i = self.skip_balanced(i);
        }
        i
    }

    /// Skip a balanced group starting at the opener at `at`
    fn skip_balanced(&self, at: usize) -> usize {
        let mut depth = 0usize;
        let mut i = at;
        while i < self.pieces.len() {
            match self.kind_at(i) {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return i + 1;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        i
    }

    /// Number of tokens in the modifier at `i`, including a `(set)`-style detail
    fn modifier_len(&self, i: usize) -> Option<usize> {
        let is_modifier = match self.kind_at(i) {
            SyntaxKind::PRIVATE_KW
            | SyntaxKind::FILEPRIVATE_KW
            | SyntaxKind::INTERNAL_KW
            | SyntaxKind::PUBLIC_KW
            | SyntaxKind::STATIC_KW => true,
            // `class func`, `class var`; `class Name` is an introducer
            SyntaxKind::CLASS_KW => !self.is_plain_name(i + 1),
            SyntaxKind::IDENT => self.is_contextual_modifier(i),
            _ => false,
        };
        if !is_modifier {
            return None;
        }
        let has_detail = self.kind_at(i + 1) == SyntaxKind::L_PAREN
            && self.adjacent(i + 1)
            && self.kind_at(i + 2) == SyntaxKind::IDENT
            && self.kind_at(i + 3) == SyntaxKind::R_PAREN;
        Some(if has_detail { 4 } else { 1 })
    }

    fn introducer_at(&self, i: usize) -> Option<SyntaxKind> {
        let named = self.kind_at(i + 1) == SyntaxKind::IDENT;
        let kind = match self.kind_at(i) {
            SyntaxKind::FUNC_KW => SyntaxKind::FUNCTION_DECL,
            SyntaxKind::CLASS_KW if named => SyntaxKind::CLASS_DECL,
            SyntaxKind::STRUCT_KW if named => SyntaxKind::STRUCT_DECL,
            SyntaxKind::ENUM_KW if named => SyntaxKind::ENUM_DECL,
            SyntaxKind::PROTOCOL_KW if named => SyntaxKind::PROTOCOL_DECL,
            SyntaxKind::EXTENSION_KW if named => SyntaxKind::EXTENSION_DECL,
            SyntaxKind::VAR_KW | SyntaxKind::LET_KW => SyntaxKind::VARIABLE_DECL,
            SyntaxKind::INIT_KW => SyntaxKind::INITIALIZER_DECL,
            SyntaxKind::DEINIT_KW => SyntaxKind::DEINIT_DECL,
            SyntaxKind::SUBSCRIPT_KW => SyntaxKind::SUBSCRIPT_DECL,
            SyntaxKind::TYPEALIAS_KW => SyntaxKind::TYPEALIAS_DECL,
            SyntaxKind::IMPORT_KW => SyntaxKind::IMPORT_DECL,
            SyntaxKind::ASSOCIATEDTYPE_KW => SyntaxKind::ASSOCIATEDTYPE_DECL,
            SyntaxKind::OPERATOR_KW => SyntaxKind::OPERATOR_DECL,
            SyntaxKind::PRECEDENCEGROUP_KW => SyntaxKind::PRECEDENCEGROUP_DECL,
            SyntaxKind::CASE_KW => SyntaxKind::ENUM_CASE_DECL,
            SyntaxKind::IDENT if named && self.text_at(i) == "actor" => SyntaxKind::ACTOR_DECL,
            SyntaxKind::IDENT if named && self.text_at(i) == "macro" => SyntaxKind::MACRO_DECL,
            _ => return None,
        };
        Some(kind)
    }

    /// Where the tail of the current item stops at depth 0
    fn at_rest_boundary(&self) -> bool {
        let kind = self.current_kind();
        if self.at_eof()
            || matches!(kind, SyntaxKind::R_BRACE | SyntaxKind::SEMICOLON)
            || kind.is_directive()
        {
            return true;
        }
        self.decl_ahead().is_some() || (self.newline_before(self.pos) && self.at_statement_keyword())
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        let kind = self.current_kind();
        self.bump_as(kind);
    }

    /// Consume the current token with its trivia, emitting it as `kind`
    fn bump_as(&mut self, kind: SyntaxKind) {
        let Some(piece) = self.pieces.get(self.pos).cloned() else {
            return;
        };
        let tokens = self.tokens;
        self.emit_trivia(piece.leading);
        self.builder.token(kind.into(), tokens[piece.token].text);
        self.emit_trivia(piece.trailing);
        self.last = Some(kind);
        self.pos += 1;
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn emit_trivia(&mut self, range: Range<usize>) {
        let tokens = self.tokens;
        for token in &tokens[range] {
            self.builder.token(token.kind.into(), token.text);
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let end = self
            .tokens
            .last()
            .map(|t| t.offset + TextSize::of(t.text))
            .unwrap_or_default();
        let range = self
            .token_at(self.pos)
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(end));
        self.errors.push(SyntaxError::new(message, range));
    }

    /// Record an error and wrap the offending token in an ERROR node
    fn error_bump(&mut self, message: impl Into<String>) {
        self.error(message);
        self.start_node(SyntaxKind::ERROR);
        self.bump();
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar
    // =========================================================================

    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);
        self.parse_items();
        let eof_trivia = self.eof_trivia.clone();
        self.emit_trivia(eof_trivia);
        self.finish_node();
    }

    /// Items until end of input, the closing `}` of the enclosing block, or
    /// the next clause of the enclosing `#if`
    fn parse_items(&mut self) {
        while !self.at_eof() {
            let kind = self.current_kind();
            if kind == SyntaxKind::R_BRACE {
                if self.brace_depth > 0 {
                    break;
                }
                self.error_bump("unmatched '}'");
                continue;
            }
            if matches!(
                kind,
                SyntaxKind::POUND_ELSEIF | SyntaxKind::POUND_ELSE | SyntaxKind::POUND_ENDIF
            ) {
                if self.directive_depth > 0 {
                    break;
                }
                self.error_bump("directive without matching #if");
                continue;
            }
            let before = self.pos;
            self.parse_item();
            if self.pos == before {
                self.error_bump("unexpected token");
            }
        }
    }

    fn parse_item(&mut self) {
        if let Some(scan) = self.decl_ahead() {
            self.parse_decl(scan);
            return;
        }
        match self.current_kind() {
            SyntaxKind::SEMICOLON => self.bump(),
            SyntaxKind::POUND_IF => self.parse_if_config(),
            kind if is_block_statement(kind) => self.parse_block_statement(),
            _ => self.parse_simple_statement(),
        }
    }

    /// attributes? modifiers introducer tail
    fn parse_decl(&mut self, scan: DeclScan) {
        self.start_node(scan.kind);

        if self.pos < scan.modifiers {
            self.start_node(SyntaxKind::ATTRIBUTE_LIST);
            while self.pos < scan.modifiers {
                self.parse_attribute();
            }
            self.finish_node();
        }

        self.start_node(SyntaxKind::MODIFIER_LIST);
        while self.pos < scan.introducer {
            self.parse_modifier();
        }
        self.finish_node();

        self.bump();

        match scan.kind {
            SyntaxKind::IMPORT_DECL => {
                // import class Foundation.NSObject
                if matches!(
                    self.current_kind(),
                    SyntaxKind::CLASS_KW
                        | SyntaxKind::STRUCT_KW
                        | SyntaxKind::ENUM_KW
                        | SyntaxKind::PROTOCOL_KW
                        | SyntaxKind::FUNC_KW
                        | SyntaxKind::VAR_KW
                        | SyntaxKind::LET_KW
                        | SyntaxKind::TYPEALIAS_KW
                ) && !self.at_eof()
                {
                    self.bump();
                }
                self.parse_rest(Braces::Closures);
            }
            SyntaxKind::CLASS_DECL
            | SyntaxKind::STRUCT_DECL
            | SyntaxKind::ENUM_DECL
            | SyntaxKind::PROTOCOL_DECL
            | SyntaxKind::EXTENSION_DECL
            | SyntaxKind::ACTOR_DECL => self.parse_rest(Braces::Members),
            SyntaxKind::FUNCTION_DECL
            | SyntaxKind::INITIALIZER_DECL
            | SyntaxKind::DEINIT_DECL
            | SyntaxKind::SUBSCRIPT_DECL
            | SyntaxKind::MACRO_DECL
            | SyntaxKind::PRECEDENCEGROUP_DECL => self.parse_rest(Braces::Body),
            SyntaxKind::VARIABLE_DECL => self.parse_rest(Braces::Accessors),
            _ => self.parse_rest(Braces::Closures),
        }

        self.finish_node();
    }

    fn parse_attribute(&mut self) {
        let end = self.skip_attribute(self.pos);
        self.start_node(SyntaxKind::ATTRIBUTE);
        while self.pos < end && !self.at_eof() {
            self.bump();
        }
        self.finish_node();
    }

    fn parse_modifier(&mut self) {
        let len = self.modifier_len(self.pos).unwrap_or(1);
        self.start_node(SyntaxKind::MODIFIER);
        let kind = match (self.current_kind(), self.text_at(self.pos)) {
            (SyntaxKind::IDENT, "open") => SyntaxKind::OPEN_KW,
            (SyntaxKind::IDENT, "package") => SyntaxKind::PACKAGE_KW,
            (kind, _) => kind,
        };
        self.bump_as(kind);
        for _ in 1..len {
            self.bump();
        }
        self.finish_node();
    }

    /// Consume the rest of an item up to its depth-0 boundary
    fn parse_rest(&mut self, mut braces: Braces) {
        while !self.at_rest_boundary() {
            match self.current_kind() {
                SyntaxKind::L_BRACE => match braces {
                    Braces::Members => {
                        self.parse_block(SyntaxKind::MEMBER_BLOCK);
                        break;
                    }
                    Braces::Body => {
                        self.parse_block(SyntaxKind::CODE_BLOCK);
                        break;
                    }
                    Braces::Accessors => self.parse_block(SyntaxKind::CODE_BLOCK),
                    Braces::Closures => self.parse_block(SyntaxKind::CLOSURE),
                },
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => self.parse_delimited(),
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => {
                    self.error("unbalanced closing delimiter");
                    self.bump();
                }
                // `var x = { ... }()` initialises with a closure
                SyntaxKind::OPERATOR if braces == Braces::Accessors && self.text_at(self.pos) == "=" => {
                    braces = Braces::Closures;
                    self.bump();
                }
                _ => self.bump(),
            }
        }
    }

    /// `( … )` or `[ … ]`, with closures parsed inside
    fn parse_delimited(&mut self) {
        let close = match self.current_kind() {
            SyntaxKind::L_PAREN => SyntaxKind::R_PAREN,
            SyntaxKind::L_BRACKET => SyntaxKind::R_BRACKET,
            _ => {
                self.bump();
                return;
            }
        };
        self.bump();
        loop {
            if self.at_eof() {
                self.error(format!("expected {:?}", close));
                break;
            }
            match self.current_kind() {
                kind if kind == close => {
                    self.bump();
                    break;
                }
                SyntaxKind::R_BRACE => {
                    self.error(format!("expected {:?}", close));
                    break;
                }
                SyntaxKind::L_BRACE => self.parse_block(SyntaxKind::CLOSURE),
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => self.parse_delimited(),
                _ => self.bump(),
            }
        }
    }

    /// `{ items }` as a MEMBER_BLOCK, CODE_BLOCK or CLOSURE
    fn parse_block(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.brace_depth += 1;
        let directive_depth = std::mem::take(&mut self.directive_depth);
        self.parse_items();
        self.directive_depth = directive_depth;
        self.brace_depth -= 1;
        if !self.eat(SyntaxKind::R_BRACE) {
            self.error("expected '}'");
        }
        self.finish_node();
    }

    /// `#if cond items (#elseif cond items)* (#else items)? #endif`
    fn parse_if_config(&mut self) {
        self.start_node(SyntaxKind::IF_CONFIG);
        loop {
            self.start_node(SyntaxKind::IF_CONFIG_CLAUSE);
            let head = self.current_kind();
            self.bump();
            if head != SyntaxKind::POUND_ELSE {
                while !self.at_eof() && !self.newline_before(self.pos) {
                    match self.current_kind() {
                        SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => self.parse_delimited(),
                        _ => self.bump(),
                    }
                }
            }
            self.directive_depth += 1;
            self.parse_items();
            self.directive_depth -= 1;
            self.finish_node();

            if self.at(SyntaxKind::POUND_ELSEIF) || self.at(SyntaxKind::POUND_ELSE) {
                continue;
            }
            if !self.eat(SyntaxKind::POUND_ENDIF) {
                self.error("expected #endif");
            }
            break;
        }
        self.finish_node();
    }

    /// if / guard / for / while / repeat / switch / do / defer
    fn parse_block_statement(&mut self) {
        let head = self.current_kind();
        self.start_node(SyntaxKind::STATEMENT);
        self.bump();
        loop {
            self.parse_condition();
            if !self.at(SyntaxKind::L_BRACE) {
                break;
            }
            self.parse_block(SyntaxKind::CODE_BLOCK);
            if self.at(SyntaxKind::ELSE_KW) || self.at(SyntaxKind::CATCH_KW) {
                self.bump();
                continue;
            }
            if head == SyntaxKind::REPEAT_KW && self.at(SyntaxKind::WHILE_KW) {
                self.bump();
                self.parse_rest(Braces::Closures);
            }
            break;
        }
        self.finish_node();
    }

    /// Statement header up to its block; `let`/`var` here are patterns
    fn parse_condition(&mut self) {
        while !self.at_eof() {
            match self.current_kind() {
                SyntaxKind::L_BRACE | SyntaxKind::R_BRACE | SyntaxKind::SEMICOLON => break,
                kind if kind.is_directive() => break,
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => self.parse_delimited(),
                _ => self.bump(),
            }
        }
    }

    /// Expression, return/throw/break/continue and anything unrecognised
    fn parse_simple_statement(&mut self) {
        self.start_node(SyntaxKind::STATEMENT);
        match self.current_kind() {
            SyntaxKind::L_BRACE => self.parse_block(SyntaxKind::CLOSURE),
            SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET => self.parse_delimited(),
            SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => {
                self.error("unbalanced closing delimiter");
                self.bump();
            }
            _ => self.bump(),
        }
        self.parse_rest(Braces::Closures);
        self.finish_node();
    }
}

fn is_block_statement(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IF_KW
            | SyntaxKind::GUARD_KW
            | SyntaxKind::FOR_KW
            | SyntaxKind::WHILE_KW
            | SyntaxKind::REPEAT_KW
            | SyntaxKind::SWITCH_KW
            | SyntaxKind::DO_KW
            | SyntaxKind::DEFER_KW
    )
}

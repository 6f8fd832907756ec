//! Logos-based lexer for Swift
//!
//! Every byte of the input ends up in exactly one token, trivia included,
//! so the tree built on top of it can reproduce the source verbatim.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\x0B\x0C]+")]
    Whitespace,

    #[regex(r"(\r\n|\r|\n)+")]
    Newline,

    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*", allow_greedy = true)]
    #[regex(r"`[^`\r\n]+`")]
    #[regex(r"\$[a-zA-Z0-9_]+")]
    Ident,

    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"0x[0-9a-fA-F][0-9a-fA-F_]*")]
    #[regex(r"0o[0-7][0-7_]*")]
    #[regex(r"0b[01][01_]*")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9][0-9_]*)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9][0-9_]*")]
    Float,

    #[token("\"", string_literal)]
    #[token("\"\"\"", multiline_string_literal)]
    #[regex("#+\"", raw_string_literal)]
    String,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("@")]
    At,

    #[regex(r"[=\-+!*%<>&|^~?]+")]
    #[token("/")]
    #[token("/=")]
    #[token("\\")]
    #[token("#")]
    Operator,

    // =========================================================================
    // COMPILER DIRECTIVES
    // =========================================================================
    #[token("#if")]
    PoundIf,
    #[token("#elseif")]
    PoundElseif,
    #[token("#else")]
    PoundElse,
    #[token("#endif")]
    PoundEndif,
    #[regex(r"#[a-zA-Z_][a-zA-Z0-9_]*")]
    PoundIdent,

    // =========================================================================
    // KEYWORDS (reserved words only; contextual ones lex as identifiers)
    // =========================================================================
    #[token("associatedtype")]
    AssociatedtypeKw,
    #[token("break")]
    BreakKw,
    #[token("case")]
    CaseKw,
    #[token("catch")]
    CatchKw,
    #[token("class")]
    ClassKw,
    #[token("continue")]
    ContinueKw,
    #[token("defer")]
    DeferKw,
    #[token("deinit")]
    DeinitKw,
    #[token("do")]
    DoKw,
    #[token("else")]
    ElseKw,
    #[token("enum")]
    EnumKw,
    #[token("extension")]
    ExtensionKw,
    #[token("fileprivate")]
    FileprivateKw,
    #[token("for")]
    ForKw,
    #[token("func")]
    FuncKw,
    #[token("guard")]
    GuardKw,
    #[token("if")]
    IfKw,
    #[token("import")]
    ImportKw,
    #[token("in")]
    InKw,
    #[token("init")]
    InitKw,
    #[token("internal")]
    InternalKw,
    #[token("let")]
    LetKw,
    #[token("operator")]
    OperatorKw,
    #[token("precedencegroup")]
    PrecedencegroupKw,
    #[token("private")]
    PrivateKw,
    #[token("protocol")]
    ProtocolKw,
    #[token("public")]
    PublicKw,
    #[token("repeat")]
    RepeatKw,
    #[token("return")]
    ReturnKw,
    #[token("static")]
    StaticKw,
    #[token("struct")]
    StructKw,
    #[token("subscript")]
    SubscriptKw,
    #[token("switch")]
    SwitchKw,
    #[token("throw")]
    ThrowKw,
    #[token("typealias")]
    TypealiasKw,
    #[token("var")]
    VarKw,
    #[token("where")]
    WhereKw,
    #[token("while")]
    WhileKw,
}

/// Consume a (possibly nested) block comment; the opening `/*` is already matched.
/// An unterminated comment swallows the rest of the input.
fn block_comment(lex: &mut logos::Lexer<LogosToken>) -> bool {
    let bytes = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(b"/*") {
            depth += 1;
            i += 2;
        } else if bytes[i..].starts_with(b"*/") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                lex.bump(i);
                return true;
            }
        } else {
            i += 1;
        }
    }
    lex.bump(bytes.len());
    true
}

fn string_literal(lex: &mut logos::Lexer<LogosToken>) -> bool {
    let consumed = scan_literal(lex.remainder().as_bytes(), 0, false);
    lex.bump(consumed);
    true
}

fn multiline_string_literal(lex: &mut logos::Lexer<LogosToken>) -> bool {
    let consumed = scan_literal(lex.remainder().as_bytes(), 0, true);
    lex.bump(consumed);
    true
}

/// `#"…"#`, `##"…"##` and the multi-line `#"""…"""#` forms.
fn raw_string_literal(lex: &mut logos::Lexer<LogosToken>) -> bool {
    let hashes = lex.slice().len() - 1;
    let rest = lex.remainder().as_bytes();
    let (open, multiline) = if rest.starts_with(b"\"\"") {
        (2, true)
    } else {
        (0, false)
    };
    let consumed = scan_literal(&rest[open..], hashes, multiline);
    lex.bump(open + consumed);
    true
}

/// Scan a string body up to and including its closing delimiter.
///
/// Returns the number of bytes consumed. Single-line literals stop before a
/// line break when unterminated; multi-line ones run to the end of input.
fn scan_literal(bytes: &[u8], hashes: usize, multiline: bool) -> usize {
    let quotes = if multiline { 3 } else { 1 };
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if pounds_at(bytes, i + 1, hashes) => {
                let after = i + 1 + hashes;
                if bytes.get(after) == Some(&b'(') {
                    i = scan_interpolation(bytes, after + 1);
                } else {
                    i = after + 1;
                }
            }
            b'"' if quotes_at(bytes, i, quotes) && pounds_at(bytes, i + quotes, hashes) => {
                return i + quotes + hashes;
            }
            b'\n' | b'\r' if !multiline => return i,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Skip a `\( … )` interpolation, starting just after the `(`.
fn scan_interpolation(bytes: &[u8], start: usize) -> usize {
    let mut depth = 1usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            b'"' => {
                let multiline = bytes[i..].starts_with(b"\"\"\"");
                let open = if multiline { 3 } else { 1 };
                i += open + scan_literal(&bytes[i + open..], 0, multiline);
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}

fn pounds_at(bytes: &[u8], at: usize, count: usize) -> bool {
    (0..count).all(|k| bytes.get(at + k) == Some(&b'#'))
}

fn quotes_at(bytes: &[u8], at: usize, count: usize) -> bool {
    (0..count).all(|k| bytes.get(at + k) == Some(&b'"'))
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            Newline => SyntaxKind::NEWLINE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,

            // Literals
            Ident => SyntaxKind::IDENT,
            Integer => SyntaxKind::INTEGER,
            Float => SyntaxKind::FLOAT,
            String => SyntaxKind::STRING,

            // Punctuation
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,
            At => SyntaxKind::AT,
            Operator => SyntaxKind::OPERATOR,

            // Directives
            PoundIf => SyntaxKind::POUND_IF,
            PoundElseif => SyntaxKind::POUND_ELSEIF,
            PoundElse => SyntaxKind::POUND_ELSE,
            PoundEndif => SyntaxKind::POUND_ENDIF,
            PoundIdent => SyntaxKind::POUND_IDENT,

            // Keywords
            AssociatedtypeKw => SyntaxKind::ASSOCIATEDTYPE_KW,
            BreakKw => SyntaxKind::BREAK_KW,
            CaseKw => SyntaxKind::CASE_KW,
            CatchKw => SyntaxKind::CATCH_KW,
            ClassKw => SyntaxKind::CLASS_KW,
            ContinueKw => SyntaxKind::CONTINUE_KW,
            DeferKw => SyntaxKind::DEFER_KW,
            DeinitKw => SyntaxKind::DEINIT_KW,
            DoKw => SyntaxKind::DO_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            EnumKw => SyntaxKind::ENUM_KW,
            ExtensionKw => SyntaxKind::EXTENSION_KW,
            FileprivateKw => SyntaxKind::FILEPRIVATE_KW,
            ForKw => SyntaxKind::FOR_KW,
            FuncKw => SyntaxKind::FUNC_KW,
            GuardKw => SyntaxKind::GUARD_KW,
            IfKw => SyntaxKind::IF_KW,
            ImportKw => SyntaxKind::IMPORT_KW,
            InKw => SyntaxKind::IN_KW,
            InitKw => SyntaxKind::INIT_KW,
            InternalKw => SyntaxKind::INTERNAL_KW,
            LetKw => SyntaxKind::LET_KW,
            OperatorKw => SyntaxKind::OPERATOR_KW,
            PrecedencegroupKw => SyntaxKind::PRECEDENCEGROUP_KW,
            PrivateKw => SyntaxKind::PRIVATE_KW,
            ProtocolKw => SyntaxKind::PROTOCOL_KW,
            PublicKw => SyntaxKind::PUBLIC_KW,
            RepeatKw => SyntaxKind::REPEAT_KW,
            ReturnKw => SyntaxKind::RETURN_KW,
            StaticKw => SyntaxKind::STATIC_KW,
            StructKw => SyntaxKind::STRUCT_KW,
            SubscriptKw => SyntaxKind::SUBSCRIPT_KW,
            SwitchKw => SyntaxKind::SWITCH_KW,
            ThrowKw => SyntaxKind::THROW_KW,
            TypealiasKw => SyntaxKind::TYPEALIAS_KW,
            VarKw => SyntaxKind::VAR_KW,
            WhereKw => SyntaxKind::WHERE_KW,
            WhileKw => SyntaxKind::WHILE_KW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        Lexer::new(input).map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_function_header() {
        let tokens: Vec<_> = Lexer::new("private func foo()").collect();
        assert_eq!(tokens.len(), 7); // private, ws, func, ws, foo, (, )
        assert_eq!(tokens[0].kind, SyntaxKind::PRIVATE_KW);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[2].kind, SyntaxKind::FUNC_KW);
        assert_eq!(tokens[4].kind, SyntaxKind::IDENT);
        assert_eq!(tokens[4].text, "foo");
        assert_eq!(tokens[4].offset, TextSize::new(13));
    }

    #[test]
    fn test_contextual_keywords_are_identifiers() {
        assert_eq!(
            kinds("open package final"),
            vec![
                SyntaxKind::IDENT,
                SyntaxKind::WHITESPACE,
                SyntaxKind::IDENT,
                SyntaxKind::WHITESPACE,
                SyntaxKind::IDENT,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(kinds("function"), vec![SyntaxKind::IDENT]);
        assert_eq!(kinds("privateValue"), vec![SyntaxKind::IDENT]);
    }

    #[test]
    fn test_newline_is_separate_trivia() {
        assert_eq!(
            kinds("a \n\tb"),
            vec![
                SyntaxKind::IDENT,
                SyntaxKind::WHITESPACE,
                SyntaxKind::NEWLINE,
                SyntaxKind::WHITESPACE,
                SyntaxKind::IDENT,
            ]
        );
    }

    #[test]
    fn test_nested_block_comment() {
        let tokens = tokenize("/* outer /* inner */ still */x");
        assert_eq!(tokens[0].kind, SyntaxKind::BLOCK_COMMENT);
        assert_eq!(tokens[0].text, "/* outer /* inner */ still */");
        assert_eq!(tokens[1].kind, SyntaxKind::IDENT);
    }

    #[test]
    fn test_doc_comment_is_not_operator() {
        assert_eq!(kinds("/** doc */"), vec![SyntaxKind::BLOCK_COMMENT]);
        assert_eq!(kinds("/// doc"), vec![SyntaxKind::LINE_COMMENT]);
    }

    #[test]
    fn test_string_with_brace_and_interpolation() {
        let tokens = tokenize(r#""{ \(dict["key"]) }" x"#);
        assert_eq!(tokens[0].kind, SyntaxKind::STRING);
        assert_eq!(tokens[0].text, r#""{ \(dict["key"]) }""#);
        assert_eq!(tokens[2].kind, SyntaxKind::IDENT);
    }

    #[test]
    fn test_multiline_and_raw_strings() {
        let tokens = tokenize("\"\"\"\n{\n\"\"\"");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, SyntaxKind::STRING);

        let tokens = tokenize(r##"#"a "quoted" }"# y"##);
        assert_eq!(tokens[0].kind, SyntaxKind::STRING);
        assert_eq!(tokens[0].text, r##"#"a "quoted" }"#"##);
    }

    #[test]
    fn test_unterminated_string_stops_at_newline() {
        let tokens = tokenize("\"abc\nfunc");
        assert_eq!(tokens[0].kind, SyntaxKind::STRING);
        assert_eq!(tokens[0].text, "\"abc");
        assert_eq!(tokens[1].kind, SyntaxKind::NEWLINE);
        assert_eq!(tokens[2].kind, SyntaxKind::FUNC_KW);
    }

    #[test]
    fn test_directives() {
        let kinds = kinds("#if DEBUG #elseif X #else #endif #available");
        assert!(kinds.contains(&SyntaxKind::POUND_IF));
        assert!(kinds.contains(&SyntaxKind::POUND_ELSEIF));
        assert!(kinds.contains(&SyntaxKind::POUND_ELSE));
        assert!(kinds.contains(&SyntaxKind::POUND_ENDIF));
        assert!(kinds.contains(&SyntaxKind::POUND_IDENT));
    }

    #[test]
    fn test_lexing_is_lossless() {
        let input = "@objc public final class A<T>: B where T: C {\n  var x = 0x1F + 1.5e3 // c\n}\n";
        let rebuilt: String = tokenize(input).iter().map(|t| t.text).collect();
        assert_eq!(rebuilt, input);
    }
}

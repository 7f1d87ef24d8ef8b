use crate::ast::SyntaxError;
use groovyscope_api::Span;
use logos::Logos;

/// Token types of the Groovy subset understood by the parser.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    // Keywords
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("static")]
    Static,
    #[token("public")]
    Public,
    #[token("protected")]
    Protected,
    #[token("private")]
    Private,
    #[token("abstract")]
    Abstract,
    #[token("final")]
    Final,
    #[token("synchronized")]
    Synchronized,
    #[token("transient")]
    Transient,
    #[token("volatile")]
    Volatile,
    #[token("class")]
    Class,
    #[token("interface")]
    Interface,
    #[token("enum")]
    Enum,
    #[token("extends")]
    Extends,
    #[token("implements")]
    Implements,
    #[token("new")]
    New,
    #[token("this")]
    This,
    #[token("super")]
    Super,
    #[token("instanceof")]
    InstanceOf,
    #[token("def")]
    Def,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("return")]
    Return,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("throw")]
    Throw,
    #[token("throws")]
    Throws,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("in")]
    In,
    #[token("as")]
    As,

    // Operators
    #[token("=")]
    Assign,
    #[token("+=")]
    AddAssign,
    #[token("-=")]
    SubAssign,
    #[token("*=")]
    MulAssign,
    #[token("/=")]
    DivAssign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    Inc,
    #[token("--")]
    Dec,
    #[token("!")]
    Bang,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    PipePipe,
    #[token("==")]
    Eq,
    #[token("!=")]
    Ne,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("<=>")]
    Spaceship,
    #[token("<<")]
    LShift,
    #[token("?")]
    Question,
    #[token("?:")]
    Elvis,
    #[token(":")]
    Colon,
    #[token("->")]
    Arrow,
    #[token("..")]
    DotDot,
    #[token("..<")]
    DotDotLt,
    #[token("?.")]
    SafeDot,
    #[token("*.")]
    SpreadDot,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("@")]
    At,
    #[token("...")]
    Ellipsis,

    // Literals
    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleQuotedString,
    #[regex(r"'([^'\\]|\\.)*'")]
    SingleQuotedString,
    #[regex(r"0[xX][0-9a-fA-F]+[lL]?")]
    HexInteger,
    #[regex(r"[0-9][0-9_]*")]
    DecimalInteger,
    /// `1L`, `1G`, `1I`
    #[regex(r"[0-9][0-9_]*[lLgGiI]")]
    SuffixedInteger,
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    DecimalLiteral,
    /// `1.5f`, `2d`, `3.0G`
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?[fFdDgG]|[0-9]+([eE][+-]?[0-9]+)?[fFdD]")]
    SuffixedDecimal,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Identifier,

    // Comments and whitespace
    #[regex(r"//[^\n]*")]
    LineComment,
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/", priority = 3)]
    BlockComment,
    #[regex(r"[ \t\n\r\f]+", priority = 3)]
    Whitespace,
    #[token("\u{FEFF}")]
    Bom,
}

impl Token {
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Token::Public
                | Token::Protected
                | Token::Private
                | Token::Static
                | Token::Final
                | Token::Abstract
                | Token::Synchronized
                | Token::Transient
                | Token::Volatile
        )
    }

    fn is_trivia(&self) -> bool {
        matches!(
            self,
            Token::Whitespace | Token::LineComment | Token::BlockComment | Token::Bom
        )
    }
}

/// A significant token with its byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalToken {
    pub token: Token,
    pub span: Span,
    /// Whether a line break separates this token from the previous one.
    pub newline_before: bool,
}

/// Splits `source` into significant tokens, dropping whitespace and comments.
///
/// Characters no token matches are skipped and reported to `errors`.
pub fn tokenize(source: &str, errors: &mut Vec<SyntaxError>) -> Vec<LexicalToken> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    let mut newline_before = false;

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let Ok(token) = result else {
            errors.push(SyntaxError {
                message: format!("unrecognized input '{}'", lexer.slice()),
                span: Span::new(range.start, range.end),
            });
            continue;
        };
        if token.is_trivia() {
            if lexer.slice().contains('\n') {
                newline_before = true;
            }
            continue;
        }
        tokens.push(LexicalToken {
            token,
            span: Span::new(range.start, range.end),
            newline_before,
        });
        newline_before = false;
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<LexicalToken> {
        let mut errors = Vec::new();
        let tokens = tokenize(source, &mut errors);
        assert!(errors.is_empty(), "{:?}", errors);
        tokens
    }

    fn kinds(source: &str) -> Vec<Token> {
        lex(source).into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn ranges_are_not_decimals() {
        assert_eq!(
            kinds("1..4"),
            vec![Token::DecimalInteger, Token::DotDot, Token::DecimalInteger]
        );
        assert_eq!(
            kinds("1.each"),
            vec![Token::DecimalInteger, Token::Dot, Token::Identifier]
        );
    }

    #[test]
    fn numeric_suffixes() {
        assert_eq!(
            kinds("1f 1d 2L 1.5 3.0G"),
            vec![
                Token::SuffixedDecimal,
                Token::SuffixedDecimal,
                Token::SuffixedInteger,
                Token::DecimalLiteral,
                Token::SuffixedDecimal,
            ]
        );
    }

    #[test]
    fn tracks_line_breaks_across_comments() {
        let tokens = lex("x // trailing\ny /* a\nb */ z");
        assert!(!tokens[0].newline_before);
        assert!(tokens[1].newline_before);
        assert!(tokens[2].newline_before);
    }

    #[test]
    fn navigation_operators() {
        assert_eq!(
            kinds("a?.b*.c ?: d"),
            vec![
                Token::Identifier,
                Token::SafeDot,
                Token::Identifier,
                Token::SpreadDot,
                Token::Identifier,
                Token::Elvis,
                Token::Identifier,
            ]
        );
    }

    #[test]
    fn skips_unknown_characters() {
        let mut errors = Vec::new();
        let tokens = tokenize("a # b", &mut errors);
        assert_eq!(
            tokens.iter().map(|t| t.token).collect::<Vec<_>>(),
            vec![Token::Identifier, Token::Identifier]
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].span, Span::new(2, 3));
    }
}

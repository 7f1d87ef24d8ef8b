//! Recursive-descent parser for the Groovy subset the inference engine consumes.
//!
//! Groovy is newline sensitive: a `(`, `[` or `{` on a new line starts a new
//! statement rather than continuing the previous expression, and a bare
//! `Type name` pair on one line is a declaration. The parser tracks line
//! breaks per token to honour both rules.

pub mod lexer;

use crate::ast::*;
use crate::error::{GroovyError, Result};
use tracing::debug;
use groovyscope_api::Span;
use lexer::{LexicalToken, Token, tokenize};

/// Parses `source` as a compilation unit whose script class is `name`.
///
/// Never fails: malformed statements are skipped, brackets left open at the
/// end of input are closed, and both are recorded in [`Module::syntax_errors`].
pub fn parse_module(source: &str, name: &str) -> Module {
    let mut module = Module::new(name.to_string(), source.len());
    let tokens = tokenize(source, &mut module.syntax_errors);
    let parser = Parser {
        source,
        tokens,
        current: 0,
        module,
    };
    parser.parse()
}

#[derive(Clone, Copy)]
struct Checkpoint {
    current: usize,
    exprs: usize,
    classes: usize,
    syntax_errors: usize,
}

struct Parser<'s> {
    source: &'s str,
    tokens: Vec<LexicalToken>,
    current: usize,
    module: Module,
}

impl<'s> Parser<'s> {
    fn parse(mut self) -> Module {
        loop {
            while self.eat(Token::Semicolon) {}
            if self.is_at_end() {
                break;
            }
            let cp = self.checkpoint();
            let result = match self.peek() {
                Some(Token::Package) => self.parse_package(),
                Some(Token::Import) => self.parse_import().map(|import| {
                    self.module.imports.push(import);
                }),
                _ => self.parse_top_level_item(),
            };
            if let Err(err) = result {
                self.recover(cp, err);
            }
        }
        if !self.module.syntax_errors.is_empty() {
            debug!(
                "{}: recovered from {} syntax errors",
                self.module.name,
                self.module.syntax_errors.len()
            );
        }
        self.module.link_parents();
        self.module
    }

    // ---------------------------------------------------------------
    // Token helpers
    // ---------------------------------------------------------------

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn peek(&self) -> Option<Token> {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> Option<Token> {
        self.tokens.get(self.current + n).map(|t| t.token)
    }

    fn check(&self, token: Token) -> bool {
        self.peek() == Some(token)
    }

    fn advance(&mut self) -> Option<LexicalToken> {
        let tok = self.tokens.get(self.current).copied();
        if tok.is_some() {
            self.current += 1;
        }
        tok
    }

    fn eat(&mut self, token: Token) -> bool {
        if self.check(token) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token, what: &str) -> Result<LexicalToken> {
        if self.check(token) {
            self.advance()
                .ok_or_else(|| self.error(&format!("expected {}", what)))
        } else {
            Err(self.error(&format!("expected {}", what)))
        }
    }

    fn lexeme(&self, tok: &LexicalToken) -> &'s str {
        &self.source[tok.span.start..tok.span.end]
    }

    fn current_start(&self) -> usize {
        self.tokens
            .get(self.current)
            .map(|t| t.span.start)
            .unwrap_or(self.source.len())
    }

    fn previous_end(&self) -> usize {
        if self.current == 0 {
            return 0;
        }
        self.tokens
            .get(self.current - 1)
            .map(|t| t.span.end)
            .unwrap_or(self.source.len())
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.previous_end().max(start))
    }

    /// True when the current token sits on a later line than the previous one.
    fn newline_before(&self) -> bool {
        self.tokens
            .get(self.current)
            .map(|t| t.newline_before)
            .unwrap_or(true)
    }

    /// True when the current token continues the previous line.
    fn same_line(&self, token: Token) -> bool {
        self.check(token) && !self.newline_before()
    }

    fn at_statement_end(&self) -> bool {
        self.is_at_end()
            || self.check(Token::Semicolon)
            || self.check(Token::RBrace)
            || self.newline_before()
    }

    fn error(&self, message: &str) -> GroovyError {
        GroovyError::Parse {
            offset: self.current_start(),
            message: message.to_string(),
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            current: self.current,
            exprs: self.module.expr_count(),
            classes: self.module.classes.len(),
            syntax_errors: self.module.syntax_errors.len(),
        }
    }

    fn rewind(&mut self, cp: Checkpoint) {
        self.current = cp.current;
        self.module.truncate(cp.exprs);
        self.module.classes.truncate(cp.classes);
        self.module.syntax_errors.truncate(cp.syntax_errors);
    }

    fn syntax_error(&mut self, message: impl Into<String>, span: Span) {
        self.module.syntax_errors.push(SyntaxError {
            message: message.into(),
            span,
        });
    }

    /// Eats the closing `token`, accepting the end of input in its place.
    fn close(&mut self, token: Token, what: &str) -> Result<()> {
        if self.eat(token) {
            return Ok(());
        }
        if self.is_at_end() {
            let end = self.source.len();
            self.syntax_error(format!("expected {} before end of input", what), Span::new(end, end));
            return Ok(());
        }
        Err(self.error(&format!("expected {}", what)))
    }

    /// Drops whatever was parsed since `cp`, records `err` and skips the
    /// statement it occurred in.
    fn recover(&mut self, cp: Checkpoint, err: GroovyError) {
        let (offset, message) = match err {
            GroovyError::Parse { offset, message } => (offset, message),
            other => (self.current_start(), other.to_string()),
        };
        let end = self
            .tokens
            .iter()
            .find(|t| t.span.start == offset)
            .map(|t| t.span.end)
            .unwrap_or(offset);
        self.rewind(cp);
        self.syntax_error(message, Span::new(offset, end));
        self.skip_statement();
    }

    /// Advances past at least one token, stopping at the next statement
    /// boundary outside brackets.
    fn skip_statement(&mut self) {
        let mut depth = 0usize;
        while let Some(tok) = self.advance() {
            match tok.token {
                Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
                Token::RParen | Token::RBracket | Token::RBrace => depth = depth.saturating_sub(1),
                _ => {}
            }
            if depth == 0 && self.at_statement_end() {
                break;
            }
        }
    }

    /// Runs `f` speculatively, restoring the position when it declines or fails.
    fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<Option<T>>) -> Option<T> {
        let cp = self.checkpoint();
        match f(self) {
            Ok(Some(value)) => Some(value),
            Ok(None) | Err(_) => {
                self.rewind(cp);
                None
            }
        }
    }

    fn identifier(&mut self, what: &str) -> Result<(String, Span)> {
        let tok = self.expect(Token::Identifier, what)?;
        Ok((self.lexeme(&tok).to_string(), tok.span))
    }

    fn qualified_name(&mut self) -> Result<(String, Span)> {
        let (mut name, span) = self.identifier("a name")?;
        let mut end = span.end;
        while self.check(Token::Dot) && self.peek_at(1) == Some(Token::Identifier) {
            self.advance();
            let (part, part_span) = self.identifier("a name")?;
            name.push('.');
            name.push_str(&part);
            end = part_span.end;
        }
        Ok((name, Span::new(span.start, end)))
    }

    // ---------------------------------------------------------------
    // Compilation unit
    // ---------------------------------------------------------------

    fn parse_package(&mut self) -> Result<()> {
        self.expect(Token::Package, "'package'")?;
        let (name, _) = self.qualified_name()?;
        self.module.package = Some(name);
        Ok(())
    }

    fn parse_import(&mut self) -> Result<ImportDecl> {
        let start = self.expect(Token::Import, "'import'")?.span.start;
        let is_static = self.eat(Token::Static);
        let (path, _) = self.qualified_name()?;
        let mut star = false;
        if self.check(Token::Dot) && self.peek_at(1) == Some(Token::Star) {
            self.advance();
            self.advance();
            star = true;
        }
        let alias = if self.eat(Token::As) {
            Some(self.identifier("an import alias")?.0)
        } else {
            None
        };
        Ok(ImportDecl {
            path,
            star,
            alias,
            is_static,
            span: self.span_from(start),
        })
    }

    fn parse_top_level_item(&mut self) -> Result<()> {
        let cp = self.checkpoint();
        let annotations = self.parse_annotations()?;
        let modifiers = self.parse_modifiers();

        if self.is_class_start() {
            self.parse_class(annotations, modifiers, None)?;
            return Ok(());
        }

        let start = cp_start(self, cp);
        if let Some(header) = self.attempt(|p| p.method_header(&modifiers, None)) {
            let method = self.parse_method_rest(header, annotations, modifiers, start, true)?;
            self.module.methods.push(method);
            return Ok(());
        }

        self.rewind(cp);
        let stmt = self.parse_statement()?;
        self.module.statements.push(stmt);
        Ok(())
    }

    // ---------------------------------------------------------------
    // Declarations
    // ---------------------------------------------------------------

    fn is_class_start(&self) -> bool {
        match self.peek() {
            Some(Token::Class) | Some(Token::Interface) | Some(Token::Enum) => true,
            Some(Token::At) => self.peek_at(1) == Some(Token::Interface),
            _ => false,
        }
    }

    fn parse_annotations(&mut self) -> Result<Vec<AnnotationNode>> {
        let mut annotations = Vec::new();
        while self.check(Token::At) && self.peek_at(1) == Some(Token::Identifier) {
            let start = self.current_start();
            self.advance();
            let (name, name_span) = self.qualified_name()?;
            let mut args = Vec::new();
            if self.same_line(Token::LParen) {
                self.advance();
                if !self.check(Token::RParen) {
                    if self.check(Token::Identifier) && self.peek_at(1) == Some(Token::Assign) {
                        loop {
                            let (key, _) = self.identifier("an annotation member")?;
                            self.expect(Token::Assign, "'='")?;
                            let value = self.parse_expr()?;
                            args.push((key, value));
                            if !self.eat(Token::Comma) {
                                break;
                            }
                        }
                    } else {
                        let value = self.parse_expr()?;
                        args.push(("value".to_string(), value));
                    }
                }
                self.expect(Token::RParen, "')'")?;
            }
            annotations.push(AnnotationNode {
                name: TypeNode::new(name, name_span),
                args,
                span: self.span_from(start),
            });
        }
        Ok(annotations)
    }

    fn parse_modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::default();
        while let Some(tok) = self.peek() {
            match tok {
                Token::Public => modifiers.visibility = Some(Visibility::Public),
                Token::Protected => modifiers.visibility = Some(Visibility::Protected),
                Token::Private => modifiers.visibility = Some(Visibility::Private),
                Token::Static => modifiers.is_static = true,
                Token::Final => modifiers.is_final = true,
                Token::Abstract => modifiers.is_abstract = true,
                t if t.is_modifier() => {}
                _ => break,
            }
            self.advance();
        }
        modifiers
    }

    fn parse_class(
        &mut self,
        annotations: Vec<AnnotationNode>,
        modifiers: Modifiers,
        outer: Option<&str>,
    ) -> Result<()> {
        let start = annotations
            .first()
            .map(|a| a.span.start)
            .unwrap_or_else(|| self.current_start());
        let kind = match self.advance().map(|t| t.token) {
            Some(Token::Class) => ClassKind::Class,
            Some(Token::Interface) => ClassKind::Interface,
            Some(Token::Enum) => ClassKind::Enum,
            Some(Token::At) => {
                self.expect(Token::Interface, "'interface'")?;
                ClassKind::Annotation
            }
            _ => return Err(self.error("expected a type declaration")),
        };
        let (simple, name_span) = self.identifier("a type name")?;
        let name = match outer {
            Some(outer) => format!("{}${}", outer, simple),
            None => simple.clone(),
        };

        let type_params = if self.check(Token::Lt) {
            self.parse_type_params()?
        } else {
            Vec::new()
        };

        let mut superclass = None;
        let mut interfaces = Vec::new();
        if self.eat(Token::Extends) {
            if kind == ClassKind::Interface {
                interfaces = self.parse_type_list()?;
            } else {
                superclass = Some(self.parse_type()?);
            }
        }
        if self.eat(Token::Implements) {
            interfaces.extend(self.parse_type_list()?);
        }

        self.expect(Token::LBrace, "'{'")?;
        let mut class = ClassDecl {
            name,
            name_span,
            kind,
            type_params,
            superclass,
            interfaces,
            fields: Vec::new(),
            methods: Vec::new(),
            enum_constants: Vec::new(),
            annotations,
            modifiers,
            span: Span::new(start, start),
        };

        if kind == ClassKind::Enum {
            self.parse_enum_constants(&mut class)?;
        }

        while !self.check(Token::RBrace) && !self.is_at_end() {
            if self.eat(Token::Semicolon) {
                continue;
            }
            let cp = self.checkpoint();
            let (fields, methods) = (class.fields.len(), class.methods.len());
            if let Err(err) = self.parse_member(&mut class, &simple) {
                class.fields.truncate(fields);
                class.methods.truncate(methods);
                self.recover(cp, err);
            }
        }
        self.close(Token::RBrace, "'}'")?;
        class.span = self.span_from(start);
        self.module.classes.push(class);
        Ok(())
    }

    fn parse_enum_constants(&mut self, class: &mut ClassDecl) -> Result<()> {
        while self.check(Token::Identifier)
            && matches!(
                self.peek_at(1),
                Some(Token::Comma)
                    | Some(Token::LParen)
                    | Some(Token::Semicolon)
                    | Some(Token::RBrace)
                    | None
            )
            || self.check(Token::Identifier) && self.tokens_break_after_identifier()
        {
            let (name, span) = self.identifier("an enum constant")?;
            let binding = self.module.alloc(span, ExprKind::Binding(name.clone()));
            let args = if self.same_line(Token::LParen) {
                self.parse_call_args()?
            } else {
                Vec::new()
            };
            class.enum_constants.push(EnumConstant {
                name,
                binding,
                args,
                span: self.span_from(span.start),
            });
            if !self.eat(Token::Comma) {
                break;
            }
        }
        self.eat(Token::Semicolon);
        Ok(())
    }

    /// An identifier followed by a line break (enum constant list without commas).
    fn tokens_break_after_identifier(&self) -> bool {
        self.tokens
            .get(self.current + 1)
            .map(|t| t.newline_before)
            .unwrap_or(true)
    }

    fn parse_member(&mut self, class: &mut ClassDecl, simple_name: &str) -> Result<()> {
        let start = self.current_start();
        let annotations = self.parse_annotations()?;
        let modifiers = self.parse_modifiers();

        if self.is_class_start() {
            let outer = class.name.clone();
            return self.parse_class(annotations, modifiers, Some(&outer));
        }

        if self.check(Token::LBrace) {
            // initializer blocks carry no declarations
            self.parse_block()?;
            return Ok(());
        }

        let is_constructor = self.check(Token::Identifier)
            && self.peek_at(1) == Some(Token::LParen)
            && self
                .tokens
                .get(self.current)
                .map(|t| self.lexeme(t) == simple_name)
                .unwrap_or(false);

        if is_constructor {
            let (name, name_span) = self.identifier("a constructor name")?;
            let header = MethodHeader {
                name,
                name_span,
                type_params: Vec::new(),
                return_type: None,
                params: self.parse_params()?,
                is_constructor: true,
            };
            let method = self.parse_method_rest(header, annotations, modifiers, start, false)?;
            class.methods.push(method);
            return Ok(());
        }

        if let Some(header) = self.attempt(|p| p.method_header(&modifiers, Some(simple_name))) {
            let method = self.parse_method_rest(header, annotations, modifiers, start, false)?;
            class.methods.push(method);
            return Ok(());
        }

        let ty = if self.eat(Token::Def) {
            None
        } else {
            let ty = self.parse_type()?;
            if ty.is_dynamic() { None } else { Some(ty) }
        };
        loop {
            let (name, name_span) = self.identifier("a field name")?;
            let binding = self.module.alloc(name_span, ExprKind::Binding(name.clone()));
            let init = if self.eat(Token::Assign) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            class.fields.push(FieldDecl {
                name,
                binding,
                ty: ty.clone(),
                init,
                modifiers: modifiers.clone(),
                annotations: annotations.clone(),
                span: self.span_from(start),
            });
            if !self.eat(Token::Comma) {
                break;
            }
        }
        Ok(())
    }

    /// `[<T>] (def | Type) name (params)` without the body.
    fn method_header(
        &mut self,
        modifiers: &Modifiers,
        class_name: Option<&str>,
    ) -> Result<Option<MethodHeader>> {
        let type_params = if self.check(Token::Lt) {
            self.parse_type_params()?
        } else {
            Vec::new()
        };

        let has_modifiers = *modifiers != Modifiers::default();
        let return_type = if self.eat(Token::Def) {
            None
        } else if self.check(Token::Identifier) && self.peek_at(1) == Some(Token::LParen) {
            // `static foo() {}` has no declared return type
            if !has_modifiers && type_params.is_empty() && class_name.is_none() {
                return Ok(None);
            }
            None
        } else if self.check(Token::Identifier) {
            let ty = self.parse_type()?;
            if ty.is_dynamic() { None } else { Some(ty) }
        } else {
            return Ok(None);
        };

        if !(self.check(Token::Identifier) && self.peek_at(1) == Some(Token::LParen)) {
            return Ok(None);
        }
        if self.newline_before() && return_type.is_some() {
            return Ok(None);
        }
        let (name, name_span) = self.identifier("a method name")?;
        let params = self.parse_params()?;

        // script methods must have a body; members may be abstract
        if class_name.is_none() && !self.check(Token::LBrace) && !self.check(Token::Throws) {
            return Ok(None);
        }

        Ok(Some(MethodHeader {
            name,
            name_span,
            type_params,
            return_type,
            params,
            is_constructor: false,
        }))
    }

    fn parse_method_rest(
        &mut self,
        header: MethodHeader,
        annotations: Vec<AnnotationNode>,
        modifiers: Modifiers,
        start: usize,
        require_body: bool,
    ) -> Result<MethodDecl> {
        let throws = if self.eat(Token::Throws) {
            self.parse_type_list()?
        } else {
            Vec::new()
        };
        let body = if self.check(Token::LBrace) {
            Some(self.parse_block()?)
        } else if require_body {
            return Err(self.error("expected a method body"));
        } else {
            None
        };
        Ok(MethodDecl {
            name: header.name,
            name_span: header.name_span,
            type_params: header.type_params,
            return_type: header.return_type,
            params: header.params,
            body,
            modifiers,
            annotations,
            throws,
            is_constructor: header.is_constructor,
            span: self.span_from(start),
        })
    }

    fn parse_params(&mut self) -> Result<Vec<Param>> {
        self.expect(Token::LParen, "'('")?;
        let mut params = Vec::new();
        if !self.check(Token::RParen) {
            loop {
                params.push(self.parse_param()?);
                if !self.eat(Token::Comma) {
                    break;
                }
            }
        }
        self.expect(Token::RParen, "')'")?;
        Ok(params)
    }

    fn parse_param(&mut self) -> Result<Param> {
        let start = self.current_start();
        let annotations = self.parse_annotations()?;
        self.eat(Token::Final);
        let mut ty = if self.eat(Token::Def) {
            None
        } else if self.check(Token::Identifier)
            && matches!(
                self.peek_at(1),
                Some(Token::Identifier)
                    | Some(Token::Lt)
                    | Some(Token::Dot)
                    | Some(Token::LBracket)
                    | Some(Token::Ellipsis)
            )
        {
            Some(self.parse_type()?)
        } else {
            None
        };
        let varargs = self.eat(Token::Ellipsis);
        if varargs {
            if let Some(ty) = ty.as_mut() {
                ty.dims += 1;
            }
        }
        let (name, name_span) = self.identifier("a parameter name")?;
        let binding = self.module.alloc(name_span, ExprKind::Binding(name.clone()));
        let default = if self.eat(Token::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Param {
            name,
            binding,
            ty,
            default,
            varargs,
            annotations,
            span: self.span_from(start),
        })
    }

    fn parse_type_params(&mut self) -> Result<Vec<TypeParamNode>> {
        self.expect(Token::Lt, "'<'")?;
        let mut params = Vec::new();
        loop {
            let (name, span) = self.identifier("a type parameter")?;
            let mut bounds = Vec::new();
            if self.eat(Token::Extends) {
                bounds.push(self.parse_type()?);
                // `T extends A & B` is not lexed; a single bound covers the corpus
            }
            params.push(TypeParamNode {
                name,
                bounds,
                span: self.span_from(span.start),
            });
            if !self.eat(Token::Comma) {
                break;
            }
        }
        self.expect(Token::Gt, "'>'")?;
        Ok(params)
    }

    fn parse_type_list(&mut self) -> Result<Vec<TypeNode>> {
        let mut types = vec![self.parse_type()?];
        while self.eat(Token::Comma) {
            types.push(self.parse_type()?);
        }
        Ok(types)
    }

    fn parse_type(&mut self) -> Result<TypeNode> {
        let (name, span) = self.qualified_name()?;
        let mut ty = TypeNode::new(name, span);
        if self.check(Token::Lt) {
            self.advance();
            if !self.eat(Token::Gt) {
                loop {
                    let arg = if self.check(Token::Question) {
                        let q = self.advance().map(|t| t.span).unwrap_or(span);
                        if self.eat(Token::Extends) || self.eat(Token::Super) {
                            self.parse_type()?
                        } else {
                            TypeNode::new("Object", q)
                        }
                    } else {
                        self.parse_type()?
                    };
                    ty.args.push(arg);
                    if self.eat(Token::Comma) {
                        continue;
                    }
                    self.expect(Token::Gt, "'>'")?;
                    break;
                }
            }
        }
        while self.check(Token::LBracket) && self.peek_at(1) == Some(Token::RBracket) {
            self.advance();
            self.advance();
            ty.dims += 1;
        }
        ty.span = self.span_from(span.start);
        Ok(ty)
    }

    // ---------------------------------------------------------------
    // Statements
    // ---------------------------------------------------------------

    fn parse_block(&mut self) -> Result<Block> {
        let start = self.expect(Token::LBrace, "'{'")?.span.start;
        let stmts = self.parse_statements_until_brace();
        self.close(Token::RBrace, "'}'")?;
        Ok(Block {
            stmts,
            span: self.span_from(start),
        })
    }

    fn parse_statements_until_brace(&mut self) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        loop {
            while self.eat(Token::Semicolon) {}
            if self.check(Token::RBrace) || self.is_at_end() {
                break;
            }
            let cp = self.checkpoint();
            match self.parse_statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(err) => self.recover(cp, err),
            }
        }
        stmts
    }

    fn parse_statement(&mut self) -> Result<Stmt> {
        let start = self.current_start();
        let kind = match self.peek() {
            Some(Token::LBrace) => StmtKind::Block(self.parse_block()?),
            Some(Token::If) => {
                self.advance();
                self.expect(Token::LParen, "'('")?;
                let cond = self.parse_expr()?;
                self.close(Token::RParen, "')'")?;
                let then_branch = Box::new(self.parse_statement()?);
                let else_branch = if self.eat(Token::Else) {
                    Some(Box::new(self.parse_statement()?))
                } else {
                    None
                };
                StmtKind::If {
                    cond,
                    then_branch,
                    else_branch,
                }
            }
            Some(Token::While) => {
                self.advance();
                self.expect(Token::LParen, "'('")?;
                let cond = self.parse_expr()?;
                self.close(Token::RParen, "')'")?;
                let body = Box::new(self.parse_statement()?);
                StmtKind::While { cond, body }
            }
            Some(Token::For) => self.parse_for()?,
            Some(Token::Return) => {
                self.advance();
                if self.at_statement_end() {
                    StmtKind::Return(None)
                } else {
                    StmtKind::Return(Some(self.parse_expr()?))
                }
            }
            Some(Token::Throw) => {
                self.advance();
                StmtKind::Throw(self.parse_expr()?)
            }
            Some(Token::Break) => {
                self.advance();
                StmtKind::Break
            }
            Some(Token::Continue) => {
                self.advance();
                StmtKind::Continue
            }
            _ => match self.parse_var_decl()? {
                Some(decl) => StmtKind::VarDecl(decl),
                None => StmtKind::Expr(self.parse_expression_statement()?),
            },
        };
        self.eat(Token::Semicolon);
        Ok(Stmt {
            kind,
            span: self.span_from(start),
        })
    }

    /// `[final] (def | Type) name` followed by `=` or the end of the statement.
    fn var_decl_header(&mut self) -> Result<Option<(Modifiers, Option<TypeNode>, String, Span)>> {
        self.parse_annotations()?;
        let modifiers = self.parse_modifiers();

        let ty = if self.eat(Token::Def) {
            None
        } else if self.check(Token::Identifier)
            && self.peek_at(1) == Some(Token::Assign)
            && modifiers != Modifiers::default()
        {
            None
        } else if self.check(Token::Identifier) {
            let ty = self.parse_type()?;
            if !looks_like_type(&ty) {
                return Ok(None);
            }
            Some(ty)
        } else {
            return Ok(None);
        };

        if !self.check(Token::Identifier) || (ty.is_some() && self.newline_before()) {
            return Ok(None);
        }
        let (name, name_span) = self.identifier("a variable name")?;
        if !(self.check(Token::Assign) || self.at_statement_end()) {
            return Ok(None);
        }
        Ok(Some((modifiers, ty, name, name_span)))
    }

    fn parse_var_decl(&mut self) -> Result<Option<VarDecl>> {
        let Some((modifiers, ty, name, name_span)) = self.attempt(|p| p.var_decl_header()) else {
            return Ok(None);
        };
        let binding = self.module.alloc(name_span, ExprKind::Binding(name.clone()));
        let init = if self.eat(Token::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Some(VarDecl {
            name,
            binding,
            ty,
            init,
            modifiers,
        }))
    }

    fn parse_for(&mut self) -> Result<StmtKind> {
        self.expect(Token::For, "'for'")?;
        self.expect(Token::LParen, "'('")?;

        if let Some((var, collection)) = self.attempt(|p| p.for_in_header()) {
            self.expect(Token::RParen, "')'")?;
            let body = Box::new(self.parse_statement()?);
            return Ok(StmtKind::ForIn {
                var,
                collection,
                body,
            });
        }

        let mut init = Vec::new();
        if !self.check(Token::Semicolon) {
            loop {
                let start = self.current_start();
                let kind = match self.parse_var_decl()? {
                    Some(decl) => StmtKind::VarDecl(decl),
                    None => StmtKind::Expr(self.parse_expr()?),
                };
                init.push(Stmt {
                    kind,
                    span: self.span_from(start),
                });
                if !self.eat(Token::Comma) {
                    break;
                }
            }
        }
        self.expect(Token::Semicolon, "';'")?;
        let cond = if self.check(Token::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(Token::Semicolon, "';'")?;
        let mut update = Vec::new();
        if !self.check(Token::RParen) {
            loop {
                update.push(self.parse_expr()?);
                if !self.eat(Token::Comma) {
                    break;
                }
            }
        }
        self.expect(Token::RParen, "')'")?;
        let body = Box::new(self.parse_statement()?);
        Ok(StmtKind::For {
            init,
            cond,
            update,
            body,
        })
    }

    fn for_in_header(&mut self) -> Result<Option<(Param, ExprId)>> {
        let start = self.current_start();
        self.eat(Token::Final);
        let ty = if self.eat(Token::Def) {
            None
        } else if self.check(Token::Identifier)
            && matches!(self.peek_at(1), Some(Token::In) | Some(Token::Colon))
        {
            None
        } else if self.check(Token::Identifier) {
            Some(self.parse_type()?)
        } else {
            return Ok(None);
        };
        if !self.check(Token::Identifier) {
            return Ok(None);
        }
        let (name, name_span) = self.identifier("a loop variable")?;
        if !(self.eat(Token::In) || self.eat(Token::Colon)) {
            return Ok(None);
        }
        let binding = self.module.alloc(name_span, ExprKind::Binding(name.clone()));
        let var = Param {
            name,
            binding,
            ty,
            default: None,
            varargs: false,
            annotations: Vec::new(),
            span: Span::new(start, name_span.end),
        };
        let collection = self.parse_expr()?;
        Ok(Some((var, collection)))
    }

    /// An expression, optionally followed by command-call arguments (`println x`).
    fn parse_expression_statement(&mut self) -> Result<ExprId> {
        let expr = self.parse_expr()?;
        if self.at_statement_end() || !self.starts_command_argument() {
            return Ok(expr);
        }
        let is_callable = matches!(
            self.module.expr(expr).kind,
            ExprKind::Variable(_) | ExprKind::Property { .. }
        );
        if !is_callable {
            return Ok(expr);
        }
        let mut args = vec![self.parse_expr()?];
        while self.eat(Token::Comma) {
            args.push(self.parse_expr()?);
        }
        Ok(self.into_call(expr, args))
    }

    fn starts_command_argument(&self) -> bool {
        matches!(
            self.peek(),
            Some(Token::Identifier)
                | Some(Token::DoubleQuotedString)
                | Some(Token::SingleQuotedString)
                | Some(Token::DecimalInteger)
                | Some(Token::HexInteger)
                | Some(Token::SuffixedInteger)
                | Some(Token::DecimalLiteral)
                | Some(Token::SuffixedDecimal)
                | Some(Token::True)
                | Some(Token::False)
                | Some(Token::Null)
                | Some(Token::New)
                | Some(Token::This)
        )
    }

    /// Turns a variable or property node into a call carrying `extra` arguments.
    fn into_call(&mut self, callee: ExprId, extra: Vec<ExprId>) -> ExprId {
        let end = self.previous_end();
        let expr = self.module.expr(callee).clone();
        match expr.kind {
            ExprKind::Variable(name) => {
                self.module.expr_mut(callee).kind = ExprKind::Name(name);
                self.module.alloc(
                    Span::new(expr.span.start, end),
                    ExprKind::MethodCall {
                        receiver: None,
                        name: callee,
                        args: extra,
                        safe: false,
                        spread: false,
                    },
                )
            }
            ExprKind::Property {
                receiver,
                name,
                safe,
                spread,
            } => {
                let node = self.module.expr_mut(callee);
                node.kind = ExprKind::MethodCall {
                    receiver: Some(receiver),
                    name,
                    args: extra,
                    safe,
                    spread,
                };
                node.span = Span::new(expr.span.start, end);
                callee
            }
            ExprKind::MethodCall {
                receiver,
                name,
                mut args,
                safe,
                spread,
            } => {
                args.extend(extra);
                let node = self.module.expr_mut(callee);
                node.kind = ExprKind::MethodCall {
                    receiver,
                    name,
                    args,
                    safe,
                    spread,
                };
                node.span = Span::new(expr.span.start, end);
                callee
            }
            _ => callee,
        }
    }

    // ---------------------------------------------------------------
    // Expressions
    // ---------------------------------------------------------------

    fn parse_expr(&mut self) -> Result<ExprId> {
        self.parse_assignment()
    }

    fn span_of(&self, id: ExprId) -> Span {
        self.module.expr(id).span
    }

    fn binary(&mut self, op: BinaryOp, lhs: ExprId, rhs: ExprId) -> ExprId {
        let span = self.span_of(lhs).join(&self.span_of(rhs));
        self.module.alloc(span, ExprKind::Binary { op, lhs, rhs })
    }

    fn parse_assignment(&mut self) -> Result<ExprId> {
        let target = self.parse_ternary()?;
        let op = match self.peek() {
            Some(Token::Assign) => None,
            Some(Token::AddAssign) => Some(BinaryOp::Add),
            Some(Token::SubAssign) => Some(BinaryOp::Sub),
            Some(Token::MulAssign) => Some(BinaryOp::Mul),
            Some(Token::DivAssign) => Some(BinaryOp::Div),
            _ => return Ok(target),
        };
        self.advance();
        let value = self.parse_assignment()?;
        let span = self.span_of(target).join(&self.span_of(value));
        Ok(self
            .module
            .alloc(span, ExprKind::Assign { op, target, value }))
    }

    fn parse_ternary(&mut self) -> Result<ExprId> {
        let cond = self.parse_or()?;
        if self.eat(Token::Question) {
            let then = self.parse_ternary()?;
            self.expect(Token::Colon, "':'")?;
            let otherwise = self.parse_ternary()?;
            let span = self.span_of(cond).join(&self.span_of(otherwise));
            return Ok(self.module.alloc(
                span,
                ExprKind::Ternary {
                    cond,
                    then,
                    otherwise,
                },
            ));
        }
        if self.eat(Token::Elvis) {
            let fallback = self.parse_ternary()?;
            let span = self.span_of(cond).join(&self.span_of(fallback));
            return Ok(self.module.alloc(
                span,
                ExprKind::Elvis {
                    value: cond,
                    fallback,
                },
            ));
        }
        Ok(cond)
    }

    fn parse_or(&mut self) -> Result<ExprId> {
        let mut lhs = self.parse_and()?;
        while self.eat(Token::PipePipe) {
            let rhs = self.parse_and()?;
            lhs = self.binary(BinaryOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<ExprId> {
        let mut lhs = self.parse_equality()?;
        while self.eat(Token::AndAnd) {
            let rhs = self.parse_equality()?;
            lhs = self.binary(BinaryOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_equality(&mut self) -> Result<ExprId> {
        let mut lhs = self.parse_relational()?;
        loop {
            let op = match self.peek() {
                Some(Token::Eq) => BinaryOp::Eq,
                Some(Token::Ne) => BinaryOp::NotEq,
                Some(Token::Spaceship) => BinaryOp::Compare,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_relational()?;
            lhs = self.binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_relational(&mut self) -> Result<ExprId> {
        let mut lhs = self.parse_shift()?;
        loop {
            let op = match self.peek() {
                Some(Token::Lt) => BinaryOp::Lt,
                Some(Token::Gt) => BinaryOp::Gt,
                Some(Token::Le) => BinaryOp::LtEq,
                Some(Token::Ge) => BinaryOp::GtEq,
                Some(Token::In) => BinaryOp::In,
                Some(Token::As) => {
                    self.advance();
                    let ty = self.parse_type()?;
                    let span = self.span_of(lhs).join(&ty.span);
                    lhs = self.module.alloc(span, ExprKind::Cast { expr: lhs, ty });
                    continue;
                }
                Some(Token::InstanceOf) => {
                    self.advance();
                    let ty = self.parse_type()?;
                    let span = self.span_of(lhs).join(&ty.span);
                    lhs = self
                        .module
                        .alloc(span, ExprKind::InstanceOf { expr: lhs, ty });
                    continue;
                }
                _ => break,
            };
            self.advance();
            let rhs = self.parse_shift()?;
            lhs = self.binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_shift(&mut self) -> Result<ExprId> {
        let mut lhs = self.parse_range()?;
        while self.eat(Token::LShift) {
            let rhs = self.parse_range()?;
            lhs = self.binary(BinaryOp::LeftShift, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_range(&mut self) -> Result<ExprId> {
        let from = self.parse_additive()?;
        let inclusive = match self.peek() {
            Some(Token::DotDot) => true,
            Some(Token::DotDotLt) => false,
            _ => return Ok(from),
        };
        self.advance();
        let to = self.parse_additive()?;
        let span = self.span_of(from).join(&self.span_of(to));
        Ok(self.module.alloc(
            span,
            ExprKind::Range {
                from,
                to,
                inclusive,
            },
        ))
    }

    fn parse_additive(&mut self) -> Result<ExprId> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_multiplicative()?;
            lhs = self.binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> Result<ExprId> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::Percent) => BinaryOp::Mod,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = self.binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<ExprId> {
        let op = match self.peek() {
            Some(Token::Bang) => UnaryOp::Not,
            Some(Token::Minus) => UnaryOp::Neg,
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Inc) => UnaryOp::Inc,
            Some(Token::Dec) => UnaryOp::Dec,
            _ => return self.parse_postfix(),
        };
        let start = self.current_start();
        self.advance();
        let operand = self.parse_unary()?;
        let span = Span::new(start, self.span_of(operand).end);
        Ok(self.module.alloc(span, ExprKind::Unary { op, operand }))
    }

    fn parse_postfix(&mut self) -> Result<ExprId> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek() {
                Some(Token::Dot) | Some(Token::SafeDot) | Some(Token::SpreadDot) => {
                    let op = self.advance().map(|t| t.token);
                    let safe = op == Some(Token::SafeDot);
                    let spread = op == Some(Token::SpreadDot);
                    let start = self.span_of(expr).start;
                    let name_tok = match self.peek() {
                        Some(Token::Identifier) | Some(Token::Class) | Some(Token::In) => {
                            self.advance()
                        }
                        _ => None,
                    };
                    let Some(name_tok) = name_tok else {
                        // `receiver.` keeps its receiver and gets an empty member name
                        let at = self.previous_end();
                        self.syntax_error("expected a member name", Span::new(at, at));
                        let name = self
                            .module
                            .alloc(Span::new(at, at), ExprKind::Name(String::new()));
                        expr = self.module.alloc(
                            Span::new(start, at),
                            ExprKind::Property {
                                receiver: expr,
                                name,
                                safe,
                                spread,
                            },
                        );
                        break;
                    };
                    let name_text = self.lexeme(&name_tok).to_string();
                    let name = self
                        .module
                        .alloc(name_tok.span, ExprKind::Name(name_text));
                    if self.same_line(Token::LParen) {
                        let args = self.parse_call_args()?;
                        expr = self.module.alloc(
                            self.span_from(start),
                            ExprKind::MethodCall {
                                receiver: Some(expr),
                                name,
                                args,
                                safe,
                                spread,
                            },
                        );
                    } else {
                        expr = self.module.alloc(
                            self.span_from(start),
                            ExprKind::Property {
                                receiver: expr,
                                name,
                                safe,
                                spread,
                            },
                        );
                    }
                }
                Some(Token::LParen) if !self.newline_before() => {
                    if !matches!(self.module.expr(expr).kind, ExprKind::Variable(_)) {
                        break;
                    }
                    let args = self.parse_call_args()?;
                    expr = self.into_call(expr, args);
                }
                Some(Token::LBracket) if !self.newline_before() => {
                    self.advance();
                    let index = self.parse_expr()?;
                    self.close(Token::RBracket, "']'")?;
                    let span = self.span_from(self.span_of(expr).start);
                    expr = self
                        .module
                        .alloc(span, ExprKind::Index { receiver: expr, index });
                }
                Some(Token::LBrace) if !self.newline_before() => {
                    let callable = matches!(
                        self.module.expr(expr).kind,
                        ExprKind::Variable(_)
                            | ExprKind::Property { .. }
                            | ExprKind::MethodCall { .. }
                    );
                    if !callable {
                        break;
                    }
                    let closure = self.parse_closure()?;
                    expr = self.into_call(expr, vec![closure]);
                }
                Some(Token::Inc) | Some(Token::Dec) if !self.newline_before() => {
                    let op = if self.check(Token::Inc) {
                        UnaryOp::Inc
                    } else {
                        UnaryOp::Dec
                    };
                    self.advance();
                    let span = self.span_from(self.span_of(expr).start);
                    expr = self
                        .module
                        .alloc(span, ExprKind::Unary { op, operand: expr });
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    /// `(args)` with named arguments collected into a leading map.
    fn parse_call_args(&mut self) -> Result<Vec<ExprId>> {
        let open = self.expect(Token::LParen, "'('")?;
        let mut args = Vec::new();
        let mut named = Vec::new();
        let mut named_start = None;
        if !self.check(Token::RParen) && !self.is_at_end() {
            loop {
                let is_named = matches!(
                    self.peek(),
                    Some(Token::Identifier)
                        | Some(Token::SingleQuotedString)
                        | Some(Token::DoubleQuotedString)
                ) && self.peek_at(1) == Some(Token::Colon);
                if is_named {
                    named_start.get_or_insert(self.current_start());
                    let key = self.parse_map_key()?;
                    self.expect(Token::Colon, "':'")?;
                    let value = self.parse_expr()?;
                    named.push(MapEntry { key, value });
                } else {
                    args.push(self.parse_expr()?);
                }
                if !self.eat(Token::Comma) || self.is_at_end() {
                    break;
                }
            }
        }
        self.close(Token::RParen, "')'")?;
        if let Some(start) = named_start {
            let end = named
                .last()
                .map(|e| self.span_of(e.value).end)
                .unwrap_or(open.span.end);
            let map = self
                .module
                .alloc(Span::new(start, end), ExprKind::Map(named));
            args.insert(0, map);
        }
        // a closure right after the parentheses is one more argument
        if self.same_line(Token::LBrace) {
            args.push(self.parse_closure()?);
        }
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<ExprId> {
        let Some(tok) = self.tokens.get(self.current).copied() else {
            return Err(self.error("unexpected end of input"));
        };
        let text = self.lexeme(&tok);
        let kind = match tok.token {
            Token::DecimalInteger => ExprKind::Literal(Literal::Integer(text.to_string())),
            Token::HexInteger => {
                if text.ends_with(&['l', 'L'][..]) {
                    ExprKind::Literal(Literal::Long(text.to_string()))
                } else {
                    ExprKind::Literal(Literal::Integer(text.to_string()))
                }
            }
            Token::SuffixedInteger => {
                let digits = text[..text.len() - 1].to_string();
                match text.chars().last() {
                    Some('l') | Some('L') => ExprKind::Literal(Literal::Long(digits)),
                    Some('g') | Some('G') => ExprKind::Literal(Literal::BigInteger(digits)),
                    _ => ExprKind::Literal(Literal::Integer(digits)),
                }
            }
            Token::DecimalLiteral => ExprKind::Literal(Literal::BigDecimal(text.to_string())),
            Token::SuffixedDecimal => {
                let digits = text[..text.len() - 1].to_string();
                match text.chars().last() {
                    Some('f') | Some('F') => ExprKind::Literal(Literal::Float(digits)),
                    Some('d') | Some('D') => ExprKind::Literal(Literal::Double(digits)),
                    _ => ExprKind::Literal(Literal::BigDecimal(digits)),
                }
            }
            Token::SingleQuotedString | Token::DoubleQuotedString => {
                ExprKind::Literal(Literal::String(text[1..text.len() - 1].to_string()))
            }
            Token::True => ExprKind::Literal(Literal::Boolean(true)),
            Token::False => ExprKind::Literal(Literal::Boolean(false)),
            Token::Null => ExprKind::Literal(Literal::Null),
            Token::Identifier => ExprKind::Variable(text.to_string()),
            Token::This => ExprKind::This,
            Token::Super => ExprKind::Super,
            Token::New => return self.parse_new(),
            Token::LParen => {
                if let Some(cast) = self.attempt(|p| p.prefix_cast()) {
                    return Ok(cast);
                }
                self.advance();
                let inner = self.parse_expr()?;
                self.close(Token::RParen, "')'")?;
                return Ok(inner);
            }
            Token::LBracket => return self.parse_collection_literal(),
            Token::LBrace => return self.parse_closure(),
            _ => return Err(self.error("expected an expression")),
        };
        self.advance();
        Ok(self.module.alloc(tok.span, kind))
    }

    /// `(Type) operand`; declines unless the parentheses hold only a type
    /// and an operand follows on the same line.
    fn prefix_cast(&mut self) -> Result<Option<ExprId>> {
        let start = self.expect(Token::LParen, "'('")?.span.start;
        if !self.check(Token::Identifier) {
            return Ok(None);
        }
        let ty = self.parse_type()?;
        if !looks_like_type(&ty) || !self.eat(Token::RParen) {
            return Ok(None);
        }
        if self.newline_before() || !self.starts_cast_operand() {
            return Ok(None);
        }
        let expr = self.parse_unary()?;
        let span = Span::new(start, self.span_of(expr).end);
        Ok(Some(self.module.alloc(span, ExprKind::Cast { expr, ty })))
    }

    fn starts_cast_operand(&self) -> bool {
        self.starts_command_argument()
            || matches!(
                self.peek(),
                Some(Token::Super) | Some(Token::LParen) | Some(Token::LBracket) | Some(Token::Bang)
            )
    }

    fn parse_new(&mut self) -> Result<ExprId> {
        let start = self.expect(Token::New, "'new'")?.span.start;
        let mut ty = self.parse_type()?;
        let mut args = Vec::new();
        if self.check(Token::LBracket) {
            while self.eat(Token::LBracket) {
                if !self.check(Token::RBracket) {
                    args.push(self.parse_expr()?);
                }
                self.expect(Token::RBracket, "']'")?;
                ty.dims += 1;
            }
        } else if self.check(Token::LParen) {
            args = self.parse_call_args()?;
        }
        Ok(self
            .module
            .alloc(self.span_from(start), ExprKind::New { ty, args }))
    }

    fn parse_map_key(&mut self) -> Result<ExprId> {
        if self.check(Token::Identifier) && self.peek_at(1) == Some(Token::Colon) {
            let tok = self.expect(Token::Identifier, "a map key")?;
            let key = self.lexeme(&tok).to_string();
            return Ok(self
                .module
                .alloc(tok.span, ExprKind::Literal(Literal::String(key))));
        }
        self.parse_expr()
    }

    fn parse_collection_literal(&mut self) -> Result<ExprId> {
        let start = self.expect(Token::LBracket, "'['")?.span.start;
        if self.eat(Token::Colon) {
            self.close(Token::RBracket, "']'")?;
            return Ok(self
                .module
                .alloc(self.span_from(start), ExprKind::Map(Vec::new())));
        }
        if self.check(Token::RBracket) || self.is_at_end() {
            self.close(Token::RBracket, "']'")?;
            return Ok(self
                .module
                .alloc(self.span_from(start), ExprKind::List(Vec::new())));
        }

        let first = self.parse_map_key()?;
        if self.eat(Token::Colon) {
            let value = self.parse_expr()?;
            let mut entries = vec![MapEntry { key: first, value }];
            while self.eat(Token::Comma) {
                if self.check(Token::RBracket) || self.is_at_end() {
                    break;
                }
                let key = self.parse_map_key()?;
                self.expect(Token::Colon, "':'")?;
                let value = self.parse_expr()?;
                entries.push(MapEntry { key, value });
            }
            self.close(Token::RBracket, "']'")?;
            return Ok(self
                .module
                .alloc(self.span_from(start), ExprKind::Map(entries)));
        }

        let mut items = vec![first];
        while self.eat(Token::Comma) {
            if self.check(Token::RBracket) || self.is_at_end() {
                break;
            }
            items.push(self.parse_expr()?);
        }
        self.close(Token::RBracket, "']'")?;
        Ok(self
            .module
            .alloc(self.span_from(start), ExprKind::List(items)))
    }

    fn parse_closure(&mut self) -> Result<ExprId> {
        let start = self.expect(Token::LBrace, "'{'")?.span.start;
        let params = self.attempt(|p| p.closure_params());
        let stmts = self.parse_statements_until_brace();
        self.close(Token::RBrace, "'}'")?;
        let span = self.span_from(start);
        Ok(self.module.alloc(
            span,
            ExprKind::Closure(ClosureExpr {
                params,
                body: Block { stmts, span },
            }),
        ))
    }

    fn closure_params(&mut self) -> Result<Option<Vec<Param>>> {
        if self.eat(Token::Arrow) {
            return Ok(Some(Vec::new()));
        }
        let mut params = Vec::new();
        loop {
            params.push(self.parse_param()?);
            if self.eat(Token::Comma) {
                continue;
            }
            if self.eat(Token::Arrow) {
                return Ok(Some(params));
            }
            return Ok(None);
        }
    }
}

struct MethodHeader {
    name: String,
    name_span: Span,
    type_params: Vec<TypeParamNode>,
    return_type: Option<TypeNode>,
    params: Vec<Param>,
    is_constructor: bool,
}

fn cp_start(parser: &Parser<'_>, cp: Checkpoint) -> usize {
    parser
        .tokens
        .get(cp.current)
        .map(|t| t.span.start)
        .unwrap_or(parser.source.len())
}

/// A bare `Name ident` pair is a declaration only when `Name` reads as a type:
/// capitalised, primitive, qualified, parameterized or an array.
fn looks_like_type(ty: &TypeNode) -> bool {
    if !ty.args.is_empty() || ty.dims > 0 || ty.name.contains('.') {
        return true;
    }
    const PRIMITIVES: &[&str] = &[
        "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
    ];
    PRIMITIVES.contains(&ty.name.as_str())
        || ty
            .name
            .chars()
            .next()
            .map(|c| c.is_ascii_uppercase())
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Module {
        parse_module(source, "Script")
    }

    #[test]
    fn declarations_end_at_line_breaks() {
        let module = parse("Map<String,Integer> x\nx.entrySet()");
        assert_eq!(module.statements.len(), 2);
        let StmtKind::VarDecl(decl) = &module.statements[0].kind else {
            panic!("expected a declaration");
        };
        assert_eq!(decl.name, "x");
        assert_eq!(decl.ty.as_ref().unwrap().args.len(), 2);
        assert!(matches!(module.statements[1].kind, StmtKind::Expr(_)));
    }

    #[test]
    fn trailing_closures_become_call_arguments() {
        let module = parse("[''].each { it }\neach { it }");
        for stmt in &module.statements {
            let StmtKind::Expr(id) = stmt.kind else {
                panic!("expected an expression statement");
            };
            let ExprKind::MethodCall { args, .. } = &module.expr(id).kind else {
                panic!("expected a call, got {:?}", module.expr(id).kind);
            };
            assert!(matches!(module.expr(args[0]).kind, ExprKind::Closure(_)));
        }
    }

    #[test]
    fn closure_parameters_are_optional() {
        let module = parse("[1].inject { a, b -> a }\n[1].each { it.x }");
        let closures: Vec<_> = module
            .exprs()
            .filter_map(|(_, e)| match &e.kind {
                ExprKind::Closure(c) => Some(c.params.as_ref().map(|p| p.len())),
                _ => None,
            })
            .collect();
        assert_eq!(closures, vec![Some(2), None]);
    }

    #[test]
    fn maps_lists_and_ranges() {
        let module = parse("def a = [1:1]\ndef b = [x, '']\ndef c = [:]\ndef d = 1..4");
        let kinds: Vec<_> = module
            .statements
            .iter()
            .map(|s| match &s.kind {
                StmtKind::VarDecl(d) => module.expr(d.init.unwrap()).kind.clone(),
                _ => panic!("expected declarations"),
            })
            .collect();
        assert!(matches!(&kinds[0], ExprKind::Map(e) if e.len() == 1));
        assert!(matches!(&kinds[1], ExprKind::List(i) if i.len() == 2));
        assert!(matches!(&kinds[2], ExprKind::Map(e) if e.is_empty()));
        assert!(matches!(kinds[3], ExprKind::Range { inclusive: true, .. }));
    }

    #[test]
    fn classes_with_generics_properties_and_methods() {
        let module = parse(
            "class MyMap<K,V> extends HashMap<K,WeakReference<V>> {\n  Map<V,Class<K>> val\n  public int size() { 0 }\n}",
        );
        let class = &module.classes[0];
        assert_eq!(class.name, "MyMap");
        assert_eq!(class.type_params.len(), 2);
        assert_eq!(class.superclass.as_ref().unwrap().args.len(), 2);
        assert!(class.fields[0].is_property());
        assert_eq!(class.methods[0].name, "size");
    }

    #[test]
    fn script_methods_with_type_parameters() {
        let module = parse(
            "static <T extends A> T loadSomething(T t) {\n return t\n}\ndef val = loadSomething(new B())",
        );
        assert_eq!(module.methods.len(), 1);
        assert_eq!(module.methods[0].type_params[0].bounds[0].name, "A");
        assert_eq!(module.statements.len(), 1);
    }

    #[test]
    fn enum_constants_without_commas() {
        let module = parse(
            "enum Some {\n AA(List)\n public final Class<List<String>> other\n public Some(Class<List<String>> other) {\n this.other = other\n }\n}",
        );
        let class = &module.classes[0];
        assert_eq!(class.enum_constants.len(), 1);
        assert_eq!(class.fields[0].name, "other");
        assert!(class.methods[0].is_constructor);
    }

    #[test]
    fn for_in_loops() {
        let module = parse("for (a in [1, 2].iterator()) { a }\nfor (Integer b : xs) b");
        assert!(module
            .statements
            .iter()
            .all(|s| matches!(s.kind, StmtKind::ForIn { .. })));
    }

    #[test]
    fn index_on_a_new_line_is_a_new_statement() {
        let module = parse("def x = y\n[1, 2]");
        assert_eq!(module.statements.len(), 2);
    }

    #[test]
    fn brackets_open_at_the_end_of_input_are_closed() {
        let module = parse("def x = (1");
        assert_eq!(module.statements.len(), 1);
        assert_eq!(module.syntax_errors.len(), 1);
        assert_eq!(module.syntax_errors[0].span, Span::new(10, 10));

        let module = parse("def s = 'a'\nif (s) {\n s.foo(\n");
        assert_eq!(module.statements.len(), 2);
        let StmtKind::If { then_branch, .. } = &module.statements[1].kind else {
            panic!("expected an if statement");
        };
        let StmtKind::Block(block) = &then_branch.kind else {
            panic!("expected a block");
        };
        assert_eq!(block.stmts.len(), 1);
        assert_eq!(module.syntax_errors.len(), 2);
    }

    #[test]
    fn trailing_dot_leaves_an_empty_member_name() {
        let module = parse("def s = 'a'\ns.");
        let StmtKind::Expr(id) = module.statements[1].kind else {
            panic!("expected an expression statement");
        };
        let ExprKind::Property { receiver, name, .. } = &module.expr(id).kind else {
            panic!("expected a property, got {:?}", module.expr(id).kind);
        };
        assert_eq!(module.expr(*receiver).kind, ExprKind::Variable("s".to_string()));
        assert_eq!(module.expr(*name).kind, ExprKind::Name(String::new()));
        assert_eq!(module.expr(*name).span, Span::new(14, 14));
        assert_eq!(module.syntax_errors[0].message, "expected a member name");
    }

    #[test]
    fn malformed_statements_are_skipped() {
        let module = parse("class extends {\n int x\n}\ndef y = 1 +* 2\ndef z = 3");
        assert!(module.classes.is_empty());
        assert_eq!(module.statements.len(), 1);
        assert!(matches!(&module.statements[0].kind, StmtKind::VarDecl(d) if d.name == "z"));
        assert_eq!(module.syntax_errors.len(), 2);
        assert_eq!(module.syntax_errors[0].span, Span::new(6, 13));
    }

    #[test]
    fn malformed_members_are_skipped() {
        let module = parse("class Foo {\n int = 1\n String name\n}");
        let class = &module.classes[0];
        assert_eq!(class.fields.len(), 1);
        assert_eq!(class.fields[0].name, "name");
        assert_eq!(module.syntax_errors.len(), 1);
    }

    #[test]
    fn prefix_casts() {
        let module = parse("def r = (String) 5\ndef k = (String).name\ndef n = (x) + 1");
        let inits: Vec<_> = module
            .statements
            .iter()
            .map(|s| match &s.kind {
                StmtKind::VarDecl(d) => module.expr(d.init.unwrap()).kind.clone(),
                _ => panic!("expected declarations"),
            })
            .collect();
        assert!(matches!(&inits[0], ExprKind::Cast { ty, .. } if ty.name == "String"));
        assert!(matches!(&inits[1], ExprKind::Property { .. }));
        assert!(matches!(&inits[2], ExprKind::Binary { op: BinaryOp::Add, .. }));
        assert!(module.syntax_errors.is_empty());
    }
}

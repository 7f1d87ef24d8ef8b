//! The inference driver.
//!
//! Walks a unit in evaluation order, maintaining the scope stack, and asks
//! the lookup chain for the type of every expression once its children are
//! typed. The walk stops as soon as the requested expression is typed.

use crate::ast::{
    AnnotationNode, Block, ClassDecl, ClosureExpr, ExprId, ExprKind, FieldDecl, MethodDecl, Module, Param, Stmt,
    StmtKind, TypeNode, VarDecl,
};
use crate::config::GroovyVersion;
use crate::inference::adapters::source::script_fqn;
use crate::inference::attributes::NodeAttributes;
use crate::inference::chain::LookupChain;
use crate::inference::context::LookupContext;
use crate::inference::core::imports::ImportScope;
use crate::inference::dgm::DgmTable;
use crate::inference::lookup::{LookupResult, Receiver};
use crate::inference::scope::{FrameKind, ScopeStack, VariableInfo, element_type};
use crate::inference::GroovyTypeSystem;
use groovyscope_api::{Span, TypeRef};
use std::collections::HashMap;
use tracing::trace;

const LIST: &str = "java.util.List";

/// Everything the driver reads about one unit.
#[derive(Clone, Copy)]
pub struct UnitView<'a> {
    pub ts: &'a dyn GroovyTypeSystem,
    pub module: &'a Module,
    pub imports: &'a ImportScope,
    pub attributes: &'a NodeAttributes,
    pub dgm: &'a DgmTable,
    pub version: GroovyVersion,
}

pub struct InferenceDriver<'a> {
    unit: UnitView<'a>,
    chain: &'a LookupChain,
    scope: ScopeStack,
    resolved: HashMap<ExprId, LookupResult>,
    /// Parameter types handed to closure literals by the call they are passed to.
    closure_hints: HashMap<ExprId, Vec<TypeRef>>,
    target: Option<ExprId>,
    done: bool,
}

impl<'a> InferenceDriver<'a> {
    pub fn new(unit: UnitView<'a>, chain: &'a LookupChain) -> Self {
        Self {
            unit,
            chain,
            scope: ScopeStack::new(),
            resolved: HashMap::new(),
            closure_hints: HashMap::new(),
            target: None,
            done: false,
        }
    }

    /// The expression a query for `span` is about.
    ///
    /// Member names widen to the property access or call they belong to.
    pub fn target_for(module: &Module, span: Span) -> Option<ExprId> {
        let id = module.innermost_covering(span)?;
        match module.expr(id).kind {
            ExprKind::Name(_) => module.parent(id).or(Some(id)),
            _ => Some(id),
        }
    }

    /// Types the expression covering `span`.
    pub fn resolve(mut self, span: Span) -> (Option<ExprId>, LookupResult) {
        let Some(target) = Self::target_for(self.unit.module, span) else {
            return (None, LookupResult::unknown());
        };
        trace!("resolving expression {} for {:?}", target.0, span);
        self.target = Some(target);
        self.walk_module();
        let result = self.resolved.remove(&target).unwrap_or_else(LookupResult::unknown);
        (Some(target), result)
    }

    /// Types every expression of the unit.
    pub fn resolve_all(mut self) -> HashMap<ExprId, LookupResult> {
        self.walk_module();
        self.resolved
    }

    fn walk_module(&mut self) {
        let module = self.unit.module;
        self.scope.push_frame(FrameKind::Module);
        for class in &module.classes {
            self.class(class);
        }
        if module.is_script() {
            let fqn = script_fqn(module).unwrap_or_else(|| module.script_class());
            self.scope.push_frame(FrameKind::Class(fqn));
            for method in &module.methods {
                self.method(method);
            }
            self.scope.push_frame(FrameKind::Method { is_static: false });
            for stmt in &module.statements {
                self.stmt(stmt);
            }
            self.scope.pop_frame();
            self.scope.pop_frame();
        }
        self.scope.pop_frame();
    }

    fn class(&mut self, class: &ClassDecl) {
        let fqn = self.unit.module.qualify(&class.name);
        let type_params = class.type_params.iter().map(|p| p.name.clone()).collect();
        self.scope
            .push_frame_with_type_params(FrameKind::Class(fqn), type_params);
        self.annotations(&class.annotations);
        for constant in &class.enum_constants {
            for arg in &constant.args {
                self.expr(*arg);
            }
            self.expr(constant.binding);
        }
        for field in &class.fields {
            self.field(field);
        }
        for method in &class.methods {
            self.method(method);
        }
        self.scope.pop_frame();
    }

    fn field(&mut self, field: &FieldDecl) {
        self.annotations(&field.annotations);
        if let Some(init) = field.init {
            self.scope.push_frame(FrameKind::Method {
                is_static: field.modifiers.is_static,
            });
            self.expr(init);
            self.scope.pop_frame();
        }
        self.expr(field.binding);
    }

    fn method(&mut self, method: &MethodDecl) {
        self.annotations(&method.annotations);
        let type_params = method.type_params.iter().map(|p| p.name.clone()).collect();
        self.scope.push_frame_with_type_params(
            FrameKind::Method {
                is_static: method.modifiers.is_static,
            },
            type_params,
        );
        for param in &method.params {
            self.param(param, None);
        }
        if let Some(body) = &method.body {
            self.block_stmts(body);
        }
        self.scope.pop_frame();
    }

    fn annotations(&mut self, annotations: &[AnnotationNode]) {
        for annotation in annotations {
            for (_, value) in &annotation.args {
                self.expr(*value);
            }
        }
    }

    /// Declares a parameter: its written type, else the hinted one, else `Object`.
    fn param(&mut self, param: &Param, hint: Option<&TypeRef>) {
        self.annotations(&param.annotations);
        if let Some(default) = param.default {
            self.expr(default);
        }
        let info = match param.ty.as_ref().filter(|t| !t.is_dynamic()) {
            Some(ty) => VariableInfo::explicit(self.declared_type(ty), Some(param.span)),
            None => VariableInfo::inferred(hint.cloned().unwrap_or_else(TypeRef::object), Some(param.span)),
        };
        self.scope.declare(param.name.clone(), info);
        self.expr(param.binding);
    }

    fn declared_type(&self, node: &TypeNode) -> TypeRef {
        self.context().resolve_type(node).boxed()
    }

    fn block_stmts(&mut self, block: &Block) {
        for stmt in &block.stmts {
            self.stmt(stmt);
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        if self.done {
            return;
        }
        match &stmt.kind {
            StmtKind::Expr(expr) | StmtKind::Throw(expr) => self.expr(*expr),
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.expr(*value);
                }
            }
            StmtKind::VarDecl(decl) => self.var_decl(decl),
            StmtKind::Block(block) => {
                self.scope.push_frame(FrameKind::Block);
                self.block_stmts(block);
                self.scope.pop_frame();
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.expr(*cond);
                self.stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.stmt(else_branch);
                }
            }
            StmtKind::While { cond, body } => {
                self.expr(*cond);
                self.scope.push_frame(FrameKind::Loop);
                self.stmt(body);
                self.scope.pop_frame();
            }
            StmtKind::ForIn { var, collection, body } => {
                self.expr(*collection);
                let element = match self.known_type(*collection) {
                    Some(ty) => element_type(self.unit.ts, &ty),
                    None => TypeRef::object(),
                };
                self.scope.push_frame(FrameKind::Loop);
                self.param(var, Some(&element));
                self.stmt(body);
                self.scope.pop_frame();
            }
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                self.scope.push_frame(FrameKind::Loop);
                for stmt in init {
                    self.stmt(stmt);
                }
                if let Some(cond) = cond {
                    self.expr(*cond);
                }
                for expr in update {
                    self.expr(*expr);
                }
                self.stmt(body);
                self.scope.pop_frame();
            }
            StmtKind::Break | StmtKind::Continue => {}
        }
    }

    fn var_decl(&mut self, decl: &VarDecl) {
        if let Some(init) = decl.init {
            self.expr(init);
        }
        let span = Some(self.unit.module.expr(decl.binding).span);
        let info = match decl.ty.as_ref().filter(|t| !t.is_dynamic()) {
            Some(ty) => VariableInfo::explicit(self.declared_type(ty), span),
            None => {
                // an unresolved initializer still declares an Object, not an unknown
                let ty = decl
                    .init
                    .and_then(|init| self.known_type(init))
                    .unwrap_or_else(TypeRef::object);
                VariableInfo::inferred(ty, span)
            }
        };
        self.scope.declare(decl.name.clone(), info);
        self.expr(decl.binding);
    }

    fn known_type(&self, id: ExprId) -> Option<TypeRef> {
        self.resolved
            .get(&id)
            .and_then(LookupResult::confident_type)
            .cloned()
    }

    fn context(&self) -> LookupContext<'_> {
        LookupContext {
            ts: self.unit.ts,
            module: self.unit.module,
            imports: self.unit.imports,
            scope: &self.scope,
            attributes: self.unit.attributes,
            dgm: self.unit.dgm,
            version: self.unit.version,
            resolved: &self.resolved,
        }
    }

    fn receiver_of(&self, id: ExprId, spread: bool) -> Option<Receiver> {
        let receiver = Receiver::from_result(self.resolved.get(&id)?)?;
        if spread && !receiver.is_static {
            return Some(Receiver::instance(element_type(self.unit.ts, &receiver.type_ref)));
        }
        Some(receiver)
    }

    fn expr(&mut self, id: ExprId) {
        if self.done {
            return;
        }
        let module = self.unit.module;
        let mut receiver = None;
        let mut spread_result = false;

        match &module.expr(id).kind {
            ExprKind::Name(_) => {
                self.finish(id, LookupResult::unknown());
                return;
            }
            ExprKind::Closure(closure) => {
                self.closure(id, closure);
            }
            ExprKind::Property {
                receiver: target,
                name,
                spread,
                ..
            } => {
                self.expr(*target);
                self.expr(*name);
                receiver = self.receiver_of(*target, *spread);
                spread_result = *spread;
            }
            ExprKind::MethodCall {
                receiver: target,
                name,
                args,
                spread,
                ..
            } => {
                if let Some(target) = target {
                    self.expr(*target);
                    receiver = self.receiver_of(*target, *spread);
                    spread_result = *spread;
                }
                self.expr(*name);
                self.call_args(receiver.as_ref(), target.is_some(), *name, args);
            }
            kind => {
                for child in kind.children() {
                    self.expr(child);
                }
            }
        }

        if self.done {
            return;
        }
        let mut result = self.chain.lookup(id, receiver.as_ref(), &self.context());
        if spread_result {
            if let Some(ty) = result.type_ref.take() {
                result.type_ref = Some(TypeRef::generic(LIST, vec![ty.boxed()]));
            }
        }
        if let ExprKind::Assign {
            op: None,
            target,
            value,
        } = &module.expr(id).kind
        {
            if let (ExprKind::Variable(name), Some(ty)) = (&module.expr(*target).kind, self.known_type(*value)) {
                self.scope.update(name, ty);
            }
        }
        self.finish(id, result);
    }

    fn finish(&mut self, id: ExprId, result: LookupResult) {
        self.resolved.insert(id, result);
        if self.target == Some(id) {
            self.done = true;
        }
    }

    /// Types the arguments of a call. Closure literals go last, once the
    /// other arguments are known, so extension methods can bind their
    /// parameters.
    fn call_args(&mut self, receiver: Option<&Receiver>, explicit_receiver: bool, name: ExprId, args: &[ExprId]) {
        let module = self.unit.module;
        let is_closure = |id: ExprId| matches!(module.expr(id).kind, ExprKind::Closure(_));
        for arg in args.iter().filter(|a| !is_closure(**a)) {
            self.expr(*arg);
        }
        if self.done {
            return;
        }

        let on = match (receiver, explicit_receiver) {
            (Some(receiver), _) => Some(receiver.expression_type()),
            (None, false) => self.scope.enclosing_type().map(TypeRef::new),
            (None, true) => None,
        };
        let method = match &module.expr(name).kind {
            ExprKind::Name(method) => Some(method.as_str()),
            _ => None,
        };
        if let (Some(on), Some(method)) = (on, method) {
            let ctx = self.context();
            let arg_types = ctx.arg_types(args);
            let mut hints = Vec::new();
            for arg in args.iter().filter(|a| is_closure(**a)) {
                let ExprKind::Closure(closure) = &module.expr(*arg).kind else {
                    continue;
                };
                let declared = closure.params.as_ref().map_or(1, Vec::len);
                let bound = self
                    .unit
                    .dgm
                    .closure_signature(self.unit.ts, &on, method, args.len())
                    .and_then(|signature| signature.closure_params(self.unit.ts, &on, declared, &arg_types));
                if let Some(bound) = bound {
                    trace!("closure {} of {} takes {:?}", arg.0, method, bound);
                    hints.push((*arg, bound));
                }
            }
            self.closure_hints.extend(hints);
        }

        for arg in args.iter().filter(|a| is_closure(**a)) {
            self.expr(*arg);
        }
    }

    fn closure(&mut self, id: ExprId, closure: &ClosureExpr) {
        let hints = self.closure_hints.remove(&id).unwrap_or_default();
        self.scope.push_frame(FrameKind::Closure);
        match &closure.params {
            Some(params) => {
                for (index, param) in params.iter().enumerate() {
                    self.param(param, hints.get(index));
                }
            }
            None => {
                let it = hints.into_iter().next().unwrap_or_else(TypeRef::object);
                self.scope.declare("it", VariableInfo::inferred(it, None));
            }
        }
        self.block_stmts(&closure.body);
        self.scope.pop_frame();
    }
}

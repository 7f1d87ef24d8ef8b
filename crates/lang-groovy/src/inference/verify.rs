//! Declaration checks reported next to inference results.
//!
//! Unresolvable and malformed type references, misplaced annotations,
//! `@Override` on methods overriding nothing, annotation members with
//! parameters and concrete classes missing inherited abstract methods, plus
//! the syntax errors the parser recovered from. All problems are continuable;
//! inference never depends on them.

use crate::ast::{
    AnnotationNode, Block, ClassDecl, ClassKind, ExprKind, MethodDecl, Module, Stmt, StmtKind, TypeNode,
};
use crate::inference::adapters::source::{CONSTRUCTOR_NAME, GROOVY_OBJECT};
use crate::inference::core::generics::spec_for_declaring_type;
use crate::inference::core::imports::{ImportScope, NameResolution};
use crate::inference::core::normalization::{TypeNormalizer, TypeProblem};
use crate::inference::core::types::{ElementTarget, MemberInfo};
use crate::inference::GroovyTypeSystem;
use groovyscope_api::{Diagnostic, DiagnosticKind, OBJECT, Span, TypeRef};
use std::collections::HashSet;
use tracing::debug;

const OVERRIDE: &str = "java.lang.Override";
const TARGET: &str = "java.lang.annotation.Target";

/// Checks `module`; `problems` are those met while publishing its declarations.
pub fn verify(
    ts: &dyn GroovyTypeSystem,
    module: &Module,
    imports: &ImportScope,
    problems: &[TypeProblem],
) -> Vec<Diagnostic> {
    let mut verifier = Verifier {
        ts,
        module,
        imports,
        diagnostics: Vec::new(),
        reported: HashSet::new(),
    };
    for error in &module.syntax_errors {
        verifier.report(DiagnosticKind::Syntax, error.message.clone(), error.span);
    }
    for problem in problems {
        verifier.type_problem(problem);
    }
    verifier.body_types();
    for class in &module.classes {
        verifier.class(class);
    }
    for method in &module.methods {
        verifier.annotations(&method.annotations, ElementTarget::Method);
    }
    debug!("{} diagnostics for {}", verifier.diagnostics.len(), module.name);
    let mut diagnostics = verifier.diagnostics;
    diagnostics.sort_by_key(|d| (d.span.start, d.span.end));
    diagnostics
}

struct Verifier<'a> {
    ts: &'a dyn GroovyTypeSystem,
    module: &'a Module,
    imports: &'a ImportScope,
    diagnostics: Vec<Diagnostic>,
    /// (kind, span) pairs already reported.
    reported: HashSet<(DiagnosticKind, Span)>,
}

impl Verifier<'_> {
    fn report(&mut self, kind: DiagnosticKind, message: String, span: Span) {
        if self.reported.insert((kind, span)) {
            self.diagnostics.push(Diagnostic::error(kind, message, span));
        }
    }

    fn type_problem(&mut self, problem: &TypeProblem) {
        match problem {
            TypeProblem::Unresolved { name, span } => self.report(
                DiagnosticKind::UnresolvedType,
                format!("{} cannot be resolved to a type", name),
                *span,
            ),
            TypeProblem::Ambiguous { name, candidates, span } => self.report(
                DiagnosticKind::AmbiguousImport,
                format!("The type {} is ambiguous ({})", name, candidates.join(", ")),
                *span,
            ),
            TypeProblem::Malformed { written, span } => self.report(
                DiagnosticKind::MalformedGenerics,
                format!("Incorrect number of type arguments in {}", written),
                *span,
            ),
        }
    }

    /// Types written inside method bodies, closures and scripts.
    fn body_types(&mut self) {
        let module = self.module;
        let type_params: Vec<String> = module
            .classes
            .iter()
            .flat_map(|c| {
                c.type_params
                    .iter()
                    .chain(c.methods.iter().flat_map(|m| m.type_params.iter()))
            })
            .chain(module.methods.iter().flat_map(|m| m.type_params.iter()))
            .map(|p| p.name.clone())
            .collect();

        let mut nodes: Vec<&TypeNode> = Vec::new();
        for stmt in &module.statements {
            collect_stmt_types(stmt, &mut nodes);
        }
        let methods = module
            .classes
            .iter()
            .flat_map(|c| c.methods.iter())
            .chain(module.methods.iter());
        for method in methods {
            if let Some(body) = &method.body {
                collect_block_types(body, &mut nodes);
            }
        }
        for (_, expr) in module.exprs() {
            match &expr.kind {
                ExprKind::New { ty, .. } | ExprKind::Cast { ty, .. } | ExprKind::InstanceOf { ty, .. } => {
                    nodes.push(ty)
                }
                ExprKind::Closure(closure) => {
                    for param in closure.params.iter().flatten() {
                        nodes.extend(param.ty.as_ref());
                    }
                    collect_block_types(&closure.body, &mut nodes);
                }
                _ => {}
            }
        }

        let normalizer = TypeNormalizer::new(self.ts, self.imports).with_type_params(type_params);
        let mut problems = Vec::new();
        for node in nodes {
            normalizer.normalize_reporting(node, &mut problems);
        }
        for problem in &problems {
            self.type_problem(problem);
        }
    }

    fn class(&mut self, class: &ClassDecl) {
        let fqn = self.module.qualify(&class.name);
        let class_target = match class.kind {
            ClassKind::Annotation => ElementTarget::AnnotationType,
            _ => ElementTarget::Type,
        };
        self.annotations(&class.annotations, class_target);
        for field in &class.fields {
            self.annotations(&field.annotations, ElementTarget::Field);
        }
        for method in &class.methods {
            let target = if method.is_constructor {
                ElementTarget::Constructor
            } else {
                ElementTarget::Method
            };
            self.annotations(&method.annotations, target);
            for param in &method.params {
                self.annotations(&param.annotations, ElementTarget::Parameter);
            }
            if class.kind == ClassKind::Annotation {
                self.annotation_member(method);
            }
            if self.is_annotated(&method.annotations, OVERRIDE) && !self.overrides(&fqn, class, method) {
                let span = method
                    .annotations
                    .iter()
                    .find(|a| self.annotation_type(a).as_deref() == Some(OVERRIDE))
                    .map_or(method.name_span, |a| a.span);
                self.report(
                    DiagnosticKind::OverrideMismatch,
                    format!(
                        "Method '{}' from class '{}' does not override method from its superclass or interfaces but is annotated with @Override.",
                        method.name, fqn
                    ),
                    span,
                );
            }
        }
        if matches!(class.kind, ClassKind::Class | ClassKind::Enum) && !class.modifiers.is_abstract {
            self.abstract_methods(&fqn, class);
        }
    }

    fn annotation_type(&self, annotation: &AnnotationNode) -> Option<String> {
        self.imports
            .resolve(self.ts, &annotation.name.name)
            .best()
            .map(str::to_string)
    }

    fn is_annotated(&self, annotations: &[AnnotationNode], fqn: &str) -> bool {
        annotations
            .iter()
            .any(|a| self.annotation_type(a).as_deref() == Some(fqn))
    }

    fn annotations(&mut self, annotations: &[AnnotationNode], target: ElementTarget) {
        for annotation in annotations {
            let fqn = match self.imports.resolve(self.ts, &annotation.name.name) {
                NameResolution::NotFound => {
                    self.report(
                        DiagnosticKind::UnresolvedType,
                        format!("{} cannot be resolved to a type", annotation.name.name),
                        annotation.name.span,
                    );
                    continue;
                }
                resolution => match resolution.best() {
                    Some(fqn) => fqn.to_string(),
                    None => continue,
                },
            };
            if fqn == TARGET {
                continue;
            }
            let Some(allowed) = self.ts.get_type_info(&fqn).and_then(|info| info.annotation_targets) else {
                continue;
            };
            let permitted = allowed.contains(&target)
                || (target == ElementTarget::AnnotationType && allowed.contains(&ElementTarget::Type));
            if !permitted {
                self.report(
                    DiagnosticKind::AnnotationTarget,
                    format!("Annotation @{} is not allowed on element {}", fqn, target.constant()),
                    annotation.span,
                );
            }
        }
    }

    fn annotation_member(&mut self, method: &MethodDecl) {
        if let Some(param) = method.params.first() {
            self.report(
                DiagnosticKind::AnnotationMember,
                "Annotation members may not have parameters.".to_string(),
                param.span,
            );
        }
        if let Some(thrown) = method.throws.first() {
            self.report(
                DiagnosticKind::AnnotationMember,
                "Annotation members may not have a throws clause.".to_string(),
                thrown.span,
            );
        }
    }

    /// The class as a type parameterized by its own type variables.
    fn self_type(fqn: &str, class: &ClassDecl) -> TypeRef {
        TypeRef::generic(
            fqn,
            class.type_params.iter().map(|p| TypeRef::new(p.name.as_str())).collect(),
        )
    }

    /// Parameter types of `member` seen from `receiver`, erased.
    fn corrected_signature(&self, receiver: &TypeRef, member: &MemberInfo) -> Vec<TypeRef> {
        let spec = spec_for_declaring_type(self.ts, receiver, &member.declaring_type);
        member
            .parameters
            .iter()
            .flatten()
            .map(|p| spec.substitute(&p.type_ref).erasure())
            .collect()
    }

    fn own_signature(&self, fqn: &str, method: &MethodDecl) -> Option<Vec<TypeRef>> {
        let own = self
            .ts
            .get_members(fqn, &method.name)
            .into_iter()
            .find(|m| m.is_method() && m.span == Some(method.span) && m.arity() == method.params.len())?;
        Some(own.erased_signature())
    }

    fn overrides(&self, fqn: &str, class: &ClassDecl, method: &MethodDecl) -> bool {
        let Some(signature) = self.own_signature(fqn, method) else {
            return true;
        };
        let receiver = Self::self_type(fqn, class);
        let mut ancestors: Vec<String> = self.ts.walk_ancestors(fqn).collect();
        if !ancestors.iter().any(|a| a == OBJECT) {
            ancestors.push(OBJECT.to_string());
        }
        ancestors.iter().any(|ancestor| {
            self.ts
                .get_members(ancestor, &method.name)
                .iter()
                .filter(|m| m.is_method() && !m.is_static())
                .any(|m| self.corrected_signature(&receiver, m) == signature)
        })
    }

    fn abstract_methods(&mut self, fqn: &str, class: &ClassDecl) {
        let receiver = Self::self_type(fqn, class);
        let concrete_superclasses = self.concrete_superclasses(fqn);
        let mut seen = HashSet::new();
        let ancestors: Vec<String> = self.ts.walk_ancestors(fqn).filter(|a| a != GROOVY_OBJECT).collect();
        for ancestor in ancestors {
            for member in self.ts.get_all_members(&ancestor) {
                if !member.is_method() || !member.is_abstract() || member.name == CONSTRUCTOR_NAME {
                    continue;
                }
                let owner = TypeRef::new(member.declaring_type.as_str());
                if concrete_superclasses
                    .iter()
                    .any(|c| self.ts.is_subtype(&TypeRef::new(c.as_str()), &owner))
                {
                    continue;
                }
                let signature = self.corrected_signature(&receiver, &member);
                if !seen.insert((member.name.clone(), signature.clone())) {
                    continue;
                }
                let implemented = self
                    .ts
                    .find_all_in_hierarchy(fqn, &member.name)
                    .iter()
                    .filter(|m| m.is_method() && !m.is_abstract())
                    .any(|m| self.corrected_signature(&receiver, m) == signature);
                if implemented {
                    continue;
                }
                let params: Vec<&str> = member
                    .parameters
                    .iter()
                    .flatten()
                    .map(|p| p.type_ref.simple_name())
                    .collect();
                self.report(
                    DiagnosticKind::MissingAbstractImplementation,
                    format!(
                        "The type {} must implement the inherited abstract method {}.{}({})",
                        class.name.rsplit('$').next().unwrap_or(&class.name),
                        owner.simple_name(),
                        member.name,
                        params.join(", ")
                    ),
                    class.name_span,
                );
            }
        }
    }
}

impl Verifier<'_> {
    /// Concrete classes above `fqn`; they already implement every abstract
    /// method of their own supertypes.
    fn concrete_superclasses(&self, fqn: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        let mut current = self.ts.get_superclass(fqn);
        while let Some(superclass) = current {
            if !visited.insert(superclass.name.clone()) {
                break;
            }
            if self
                .ts
                .get_type_info(&superclass.name)
                .is_some_and(|info| !info.is_abstract())
            {
                out.push(superclass.name.clone());
            }
            current = self.ts.get_superclass(&superclass.name);
        }
        out
    }
}

fn collect_block_types<'m>(block: &'m Block, nodes: &mut Vec<&'m TypeNode>) {
    for stmt in &block.stmts {
        collect_stmt_types(stmt, nodes);
    }
}

fn collect_stmt_types<'m>(stmt: &'m Stmt, nodes: &mut Vec<&'m TypeNode>) {
    match &stmt.kind {
        StmtKind::VarDecl(decl) => nodes.extend(decl.ty.as_ref()),
        StmtKind::Block(block) => collect_block_types(block, nodes),
        StmtKind::If {
            then_branch,
            else_branch,
            ..
        } => {
            collect_stmt_types(then_branch, nodes);
            if let Some(else_branch) = else_branch {
                collect_stmt_types(else_branch, nodes);
            }
        }
        StmtKind::While { body, .. } => collect_stmt_types(body, nodes),
        StmtKind::ForIn { var, body, .. } => {
            nodes.extend(var.ty.as_ref());
            collect_stmt_types(body, nodes);
        }
        StmtKind::For { init, body, .. } => {
            for stmt in init {
                collect_stmt_types(stmt, nodes);
            }
            collect_stmt_types(body, nodes);
        }
        StmtKind::Expr(_)
        | StmtKind::Return(_)
        | StmtKind::Throw(_)
        | StmtKind::Break
        | StmtKind::Continue => {}
    }
}

//! Publishes the declarations of a parsed unit as type bindings.
//!
//! Groovy adds members the source never spells out: property accessors,
//! enum `values()`/`valueOf`, overloads for parameters with default values,
//! the implicit `GroovyObject` interface and the script class wrapping
//! top-level statements. All of them are synthesized here so lookups see a
//! unit the way the compiler would present it.

use super::overlay::OverlayTypeSystem;
use super::registry::{TypeRegistry, getter_name};
use crate::ast::{ClassDecl, ClassKind, ExprId, ExprKind, MethodDecl, Module, Modifiers};
use crate::inference::core::imports::ImportScope;
use crate::inference::core::normalization::{TypeNormalizer, TypeProblem};
use crate::inference::core::types::{
    ElementTarget, MemberInfo, MemberKind, ParameterInfo, TypeDecl, TypeInfo, TypeKind,
    TypeParameter,
};
use crate::inference::GroovyTypeSystem;
use groovyscope_api::TypeRef;
use tracing::{debug, trace};

pub const GROOVY_OBJECT: &str = "groovy.lang.GroovyObject";
pub const SCRIPT: &str = "groovy.lang.Script";
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// The bindings of one unit plus the problems met while resolving its types.
#[derive(Debug, Clone, Default)]
pub struct PublishedUnit {
    pub registry: TypeRegistry,
    pub problems: Vec<TypeProblem>,
}

/// Resolves every declaration of `module` against `base` and the unit itself.
pub fn publish<B: GroovyTypeSystem + ?Sized>(
    base: &B,
    module: &Module,
    imports: &ImportScope,
) -> PublishedUnit {
    // Unit types must be known (with their arity) before any signature
    // mentioning them is normalized.
    let mut skeleton = TypeRegistry::new();
    for class in &module.classes {
        let mut info = TypeInfo::new(module.qualify(&class.name), type_kind(class.kind));
        info.type_parameters = class
            .type_params
            .iter()
            .map(|p| TypeParameter::new(p.name.clone()))
            .collect();
        skeleton.add_type(TypeDecl::new(info));
    }
    let script = script_fqn(module);
    if let Some(fqn) = &script {
        skeleton.add_type(TypeDecl::new(TypeInfo::new(fqn.clone(), TypeKind::Class)));
    }

    let view = OverlayTypeSystem::new(base, skeleton);
    let mut problems = Vec::new();
    let decls: Vec<TypeDecl> = {
        let publisher = SourcePublisher {
            ts: &view,
            module,
            imports,
        };
        let mut decls: Vec<TypeDecl> = module
            .classes
            .iter()
            .map(|class| publisher.class_decl(class, &mut problems))
            .collect();
        if let Some(fqn) = &script {
            decls.push(publisher.script_decl(fqn, &mut problems));
        }
        decls
    };

    let mut registry = view.into_top();
    for decl in decls {
        trace!("publishing {} with {} members", decl.info.fqn, decl.members.len());
        registry.add_type(decl);
    }
    debug!("published {} types from {}", registry.len(), module.name);
    PublishedUnit { registry, problems }
}

/// The script class of `module`, unless the unit declares a class of that name.
pub fn script_fqn(module: &Module) -> Option<String> {
    if !module.is_script() {
        return None;
    }
    let fqn = module.script_class();
    let clashes = module.classes.iter().any(|c| module.qualify(&c.name) == fqn);
    (!clashes).then_some(fqn)
}

fn type_kind(kind: ClassKind) -> TypeKind {
    match kind {
        ClassKind::Class => TypeKind::Class,
        ClassKind::Interface => TypeKind::Interface,
        ClassKind::Enum => TypeKind::Enum,
        ClassKind::Annotation => TypeKind::Annotation,
    }
}

/// Groovy members and types without an access modifier are public.
fn public_by_default(modifiers: &Modifiers) -> Vec<String> {
    let mut out = modifiers.to_strings();
    if modifiers.visibility.is_none() {
        out.insert(0, "public".to_string());
    }
    out
}

/// `ElementType` constant names in an annotation value: `METHOD`,
/// `ElementType.METHOD` or a list of either.
pub fn element_constants(module: &Module, value: ExprId) -> Vec<String> {
    match &module.expr(value).kind {
        ExprKind::Variable(name) => vec![name.clone()],
        ExprKind::Property { name, .. } => match &module.expr(*name).kind {
            ExprKind::Name(name) => vec![name.clone()],
            _ => Vec::new(),
        },
        ExprKind::List(items) => items
            .iter()
            .flat_map(|item| element_constants(module, *item))
            .collect(),
        _ => Vec::new(),
    }
}

struct SourcePublisher<'a, T: GroovyTypeSystem + ?Sized> {
    ts: &'a T,
    module: &'a Module,
    imports: &'a ImportScope,
}

impl<T: GroovyTypeSystem + ?Sized> SourcePublisher<'_, T> {
    fn normalizer(&self, type_params: &[String]) -> TypeNormalizer<'_, T> {
        TypeNormalizer::new(self.ts, self.imports).with_type_params(type_params.iter().cloned())
    }

    fn class_decl(&self, class: &ClassDecl, problems: &mut Vec<TypeProblem>) -> TypeDecl {
        let fqn = self.module.qualify(&class.name);
        let kind = type_kind(class.kind);
        let class_params: Vec<String> = class.type_params.iter().map(|p| p.name.clone()).collect();
        let normalizer = self.normalizer(&class_params);

        let mut info = TypeInfo::new(fqn.clone(), kind);
        info.modifiers = public_by_default(&class.modifiers);
        info.type_parameters = class
            .type_params
            .iter()
            .map(|p| TypeParameter {
                name: p.name.clone(),
                bounds: p
                    .bounds
                    .iter()
                    .map(|b| normalizer.normalize_reporting(b, problems))
                    .collect(),
            })
            .collect();

        info.superclass = match class.kind {
            ClassKind::Class => Some(
                class
                    .superclass
                    .as_ref()
                    .map(|s| normalizer.normalize_reporting(s, problems))
                    .unwrap_or_else(TypeRef::object),
            ),
            ClassKind::Enum => Some(TypeRef::generic("java.lang.Enum", vec![TypeRef::new(fqn.clone())])),
            ClassKind::Interface | ClassKind::Annotation => None,
        };
        info.interfaces = class
            .interfaces
            .iter()
            .map(|i| normalizer.normalize_reporting(i, problems))
            .collect();
        match class.kind {
            ClassKind::Class | ClassKind::Enum => {
                if !info.interfaces.iter().any(|i| i.name == GROOVY_OBJECT) {
                    info.interfaces.push(TypeRef::new(GROOVY_OBJECT));
                }
            }
            ClassKind::Annotation => {
                info.interfaces.push(TypeRef::new("java.lang.annotation.Annotation"));
                info.annotation_targets = self.declared_targets(class);
            }
            ClassKind::Interface => {}
        }

        let mut decl = TypeDecl::new(info);
        self.add_fields(&mut decl, class, &normalizer, problems);
        for method in &class.methods {
            let members = self.method_members(&fqn, &class_params, class.kind, method, problems);
            decl.members.extend(members);
        }

        if class.kind == ClassKind::Enum {
            for constant in &class.enum_constants {
                let mut field = MemberInfo::field(fqn.clone(), constant.name.clone(), TypeRef::new(fqn.clone()))
                    .with_modifiers(&["public", "static", "final"]);
                field.span = Some(constant.span);
                decl.members.push(field);
            }
            decl.members.push(
                MemberInfo::method(fqn.clone(), "values", TypeRef::new(fqn.clone()).array_of(1), Vec::new())
                    .with_modifiers(&["public", "static"]),
            );
            decl.members.push(
                MemberInfo::method(
                    fqn.clone(),
                    "valueOf",
                    TypeRef::new(fqn.clone()),
                    vec![ParameterInfo::new("name", TypeRef::new("java.lang.String"))],
                )
                .with_modifiers(&["public", "static"]),
            );
        }
        decl
    }

    fn declared_targets(&self, class: &ClassDecl) -> Option<Vec<ElementTarget>> {
        let target = class.annotations.iter().find(|a| {
            let name = a.name.name.as_str();
            name == "Target" || name == "java.lang.annotation.Target"
        })?;
        let value = target.args.iter().find(|(key, _)| key == "value")?.1;
        Some(
            element_constants(self.module, value)
                .iter()
                .filter_map(|c| ElementTarget::from_constant(c))
                .collect(),
        )
    }

    fn add_fields(
        &self,
        decl: &mut TypeDecl,
        class: &ClassDecl,
        normalizer: &TypeNormalizer<'_, T>,
        problems: &mut Vec<TypeProblem>,
    ) {
        let fqn = decl.info.fqn.clone();
        let constants_only = matches!(class.kind, ClassKind::Interface | ClassKind::Annotation);

        for field in &class.fields {
            let (ty, explicit) = match &field.ty {
                Some(node) => (normalizer.normalize_reporting(node, problems), true),
                None => (TypeRef::object(), false),
            };
            let property = field.is_property() && !constants_only;

            let mut member = MemberInfo::field(fqn.clone(), field.name.clone(), ty.clone());
            member.explicit_type = explicit;
            member.span = Some(field.span);
            member.modifiers = if constants_only {
                vec!["public".into(), "static".into(), "final".into()]
            } else {
                public_by_default(&field.modifiers)
            };
            if property {
                member.kind = MemberKind::Property;
            }
            let is_static = member.is_static();
            decl.members.push(member);

            if !property {
                continue;
            }
            let mut accessors = vec![(getter_name(&field.name), ty.clone(), Vec::new())];
            if ty.name == "boolean" && ty.dims == 0 {
                accessors.push((format!("is{}", &getter_name(&field.name)[3..]), ty.clone(), Vec::new()));
            }
            if !field.modifiers.is_final {
                accessors.push((
                    format!("set{}", &getter_name(&field.name)[3..]),
                    TypeRef::new("void"),
                    vec![ParameterInfo::new("value", ty.clone())],
                ));
            }
            for (name, returns, params) in accessors {
                let declared = class
                    .methods
                    .iter()
                    .any(|m| m.name == name && m.params.len() == params.len());
                if declared {
                    continue;
                }
                let mut accessor = MemberInfo::method(fqn.clone(), name, returns, params);
                if is_static {
                    accessor.modifiers.push("static".into());
                }
                accessor.explicit_type = explicit;
                accessor.span = Some(field.span);
                decl.members.push(accessor);
            }
        }
    }

    /// The method itself plus one overload per trailing default argument.
    fn method_members(
        &self,
        declaring: &str,
        class_params: &[String],
        kind: ClassKind,
        method: &MethodDecl,
        problems: &mut Vec<TypeProblem>,
    ) -> Vec<MemberInfo> {
        let mut visible: Vec<String> = class_params.to_vec();
        visible.extend(method.type_params.iter().map(|p| p.name.clone()));
        let normalizer = self.normalizer(&visible);

        let returns = if method.is_constructor {
            TypeRef::generic(
                declaring,
                class_params.iter().map(|p| TypeRef::new(p.clone())).collect(),
            )
        } else {
            method
                .return_type
                .as_ref()
                .map(|r| normalizer.normalize_reporting(r, problems))
                .unwrap_or_else(TypeRef::object)
        };

        let parameters: Vec<ParameterInfo> = method
            .params
            .iter()
            .map(|p| ParameterInfo {
                name: p.name.clone(),
                type_ref: match &p.ty {
                    Some(node) => normalizer.normalize_reporting(node, problems),
                    None => TypeRef::object().array_of(usize::from(p.varargs)),
                },
                is_varargs: p.varargs,
            })
            .collect();

        let mut modifiers = public_by_default(&method.modifiers);
        let implicitly_abstract = match kind {
            ClassKind::Interface => method.body.is_none() && !method.modifiers.is_static,
            ClassKind::Annotation => true,
            ClassKind::Class | ClassKind::Enum => false,
        };
        if implicitly_abstract && !modifiers.iter().any(|m| m == "abstract") {
            modifiers.push("abstract".into());
        }

        let name = if method.is_constructor {
            CONSTRUCTOR_NAME.to_string()
        } else {
            method.name.clone()
        };
        let mut member = MemberInfo::method(declaring, name, returns, parameters.clone());
        member.kind = if method.is_constructor {
            MemberKind::Constructor
        } else {
            MemberKind::Method
        };
        member.modifiers = modifiers;
        member.explicit_type = method.is_constructor || method.return_type.is_some();
        member.span = Some(method.span);
        member.type_parameters = method
            .type_params
            .iter()
            .map(|p| TypeParameter {
                name: p.name.clone(),
                bounds: p
                    .bounds
                    .iter()
                    .map(|b| normalizer.normalize_reporting(b, problems))
                    .collect(),
            })
            .collect();

        let defaulted: Vec<usize> = method
            .params
            .iter()
            .enumerate()
            .filter(|(_, p)| p.default.is_some())
            .map(|(i, _)| i)
            .collect();
        let mut members = vec![member.clone()];
        for n in 1..=defaulted.len() {
            let dropped = &defaulted[defaulted.len() - n..];
            let mut overload = member.clone();
            overload.parameters = Some(
                parameters
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !dropped.contains(i))
                    .map(|(_, p)| p.clone())
                    .collect(),
            );
            members.push(overload);
        }
        members
    }

    fn script_decl(&self, fqn: &str, problems: &mut Vec<TypeProblem>) -> TypeDecl {
        let mut info = TypeInfo::new(fqn, TypeKind::Class);
        info.superclass = Some(TypeRef::new(SCRIPT));
        let mut decl = TypeDecl::new(info);
        for method in &self.module.methods {
            let members = self.method_members(fqn, &[], ClassKind::Class, method, problems);
            decl.members.extend(members);
        }
        decl.members.push(MemberInfo::method(fqn, "run", TypeRef::object(), Vec::new()));
        decl.members.push(
            MemberInfo::method(
                fqn,
                "main",
                TypeRef::new("void"),
                vec![ParameterInfo::new("args", TypeRef::new("java.lang.String").array_of(1))],
            )
            .with_modifiers(&["public", "static"]),
        );
        decl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::adapters::jdk::jdk_registry;
    use crate::inference::{InheritanceProvider, MemberProvider, TypeProvider};
    use crate::parser::parse_module;

    fn publish_source(source: &str) -> PublishedUnit {
        let module = parse_module(source, "Search");
        let imports = ImportScope::for_module(&module, &[]);
        publish(jdk_registry(), &module, &imports)
    }

    #[test]
    fn classes_are_groovy_objects() {
        let unit = publish_source("package p\nclass Foo extends ArrayList<String> {}\n");
        let reg = &unit.registry;
        assert_eq!(
            reg.get_superclass("p.Foo"),
            Some(TypeRef::generic("java.util.ArrayList", vec![TypeRef::new("java.lang.String")]))
        );
        assert_eq!(reg.get_interfaces("p.Foo"), vec![TypeRef::new(GROOVY_OBJECT)]);
        assert!(unit.problems.is_empty());
    }

    #[test]
    fn properties_get_accessors() {
        let unit = publish_source("class Foo {\n  String name\n  final int size = 1\n  private Date when\n}\n");
        let reg = &unit.registry;
        let getter = &reg.get_members("Foo", "getName")[0];
        assert_eq!(getter.type_ref, TypeRef::new("java.lang.String"));
        assert_eq!(reg.get_members("Foo", "setName").len(), 1);
        assert_eq!(reg.get_members("Foo", "getSize").len(), 1);
        assert!(reg.get_members("Foo", "setSize").is_empty());
        assert!(reg.get_members("Foo", "getWhen").is_empty());
        assert_eq!(reg.get_members("Foo", "name")[0].kind, MemberKind::Property);
    }

    #[test]
    fn enums_extend_enum_of_themselves() {
        let unit = publish_source("enum Color {\n  RED, GREEN\n}\n");
        let reg = &unit.registry;
        assert_eq!(
            reg.get_superclass("Color"),
            Some(TypeRef::generic("java.lang.Enum", vec![TypeRef::new("Color")]))
        );
        assert!(reg.get_members("Color", "RED")[0].is_static());
        assert_eq!(reg.get_members("Color", "values")[0].type_ref.to_string(), "Color[]");
    }

    #[test]
    fn scripts_become_classes() {
        let unit = publish_source("def foo(int a, String b = 'x') { a }\nfoo(1)\n");
        let reg = &unit.registry;
        assert_eq!(reg.get_superclass("Search"), Some(TypeRef::new(SCRIPT)));
        let arities: Vec<usize> = reg.get_members("Search", "foo").iter().map(|m| m.arity()).collect();
        assert_eq!(arities, vec![2, 1]);
    }

    #[test]
    fn unknown_types_are_reported() {
        let unit = publish_source("class Foo {\n  Nope field\n}\n");
        assert!(matches!(&unit.problems[0], TypeProblem::Unresolved { name, .. } if name == "Nope"));
        assert!(unit.registry.has_type("Foo"));
    }

    #[test]
    fn annotation_targets_come_from_the_declaration() {
        let unit = publish_source(
            "import java.lang.annotation.*\n@Target(ElementType.FIELD)\n@interface Marker {}\n",
        );
        let info = unit.registry.get_type_info("Marker").unwrap();
        assert_eq!(info.annotation_targets, Some(vec![ElementTarget::Field]));
    }
}

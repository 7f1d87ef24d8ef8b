//! Data structures describing nominal type declarations ("bindings").
//!
//! These are pure data types; generic member types reference the declaring
//! type's parameters by their simple names (`K`, `V`, `E`).

use groovyscope_api::{Span, TypeRef};

/// A generic type parameter declaration, e.g. `T extends Comparable<T>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
    pub name: String,
    pub bounds: Vec<TypeRef>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    pub fn bounded(name: impl Into<String>, bound: TypeRef) -> Self {
        Self {
            name: name.into(),
            bounds: vec![bound],
        }
    }

    /// The erasure of the first bound, `java.lang.Object` when unbounded.
    pub fn erased_bound(&self) -> TypeRef {
        self.bounds
            .first()
            .map(TypeRef::erasure)
            .unwrap_or_else(TypeRef::object)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

/// Program elements an annotation may be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementTarget {
    Type,
    Field,
    Method,
    Parameter,
    Constructor,
    LocalVariable,
    AnnotationType,
    Package,
}

impl ElementTarget {
    /// Parses a `java.lang.annotation.ElementType` constant name.
    pub fn from_constant(name: &str) -> Option<Self> {
        Some(match name {
            "TYPE" => Self::Type,
            "FIELD" => Self::Field,
            "METHOD" => Self::Method,
            "PARAMETER" => Self::Parameter,
            "CONSTRUCTOR" => Self::Constructor,
            "LOCAL_VARIABLE" => Self::LocalVariable,
            "ANNOTATION_TYPE" => Self::AnnotationType,
            "PACKAGE" => Self::Package,
            _ => return None,
        })
    }

    pub fn constant(self) -> &'static str {
        match self {
            Self::Type => "TYPE",
            Self::Field => "FIELD",
            Self::Method => "METHOD",
            Self::Parameter => "PARAMETER",
            Self::Constructor => "CONSTRUCTOR",
            Self::LocalVariable => "LOCAL_VARIABLE",
            Self::AnnotationType => "ANNOTATION_TYPE",
            Self::Package => "PACKAGE",
        }
    }
}

/// Information about a type (class, interface, enum, annotation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    /// Binary name, e.g. `java.util.Map$Entry`.
    pub fqn: String,
    pub kind: TypeKind,
    pub modifiers: Vec<String>,
    pub type_parameters: Vec<TypeParameter>,
    /// `None` for interfaces and `java.lang.Object`.
    pub superclass: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    /// Declared `@Target` of an annotation type; `None` means unrestricted.
    pub annotation_targets: Option<Vec<ElementTarget>>,
}

impl TypeInfo {
    pub fn new(fqn: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            fqn: fqn.into(),
            kind,
            modifiers: vec!["public".to_string()],
            type_parameters: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            annotation_targets: None,
        }
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Annotation)
    }

    pub fn is_abstract(&self) -> bool {
        self.is_interface() || self.modifiers.iter().any(|m| m == "abstract")
    }

    /// The declared supertypes, superclass first.
    pub fn supertypes(&self) -> impl Iterator<Item = &TypeRef> {
        self.superclass.iter().chain(self.interfaces.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    /// A Groovy property: a field with synthesized accessors.
    Property,
    Method,
    Constructor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: String,
    pub type_ref: TypeRef,
    /// True when declared with `...`; `type_ref` then carries the extra dimension.
    pub is_varargs: bool,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            is_varargs: false,
        }
    }
}

/// Information about a member (field, property, method, constructor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub name: String,
    pub kind: MemberKind,
    /// The type that declares this member (may differ from the lookup type).
    pub declaring_type: String,
    /// Field type or method return type, in terms of the declaring type's parameters.
    pub type_ref: TypeRef,
    /// Method parameters (`None` for fields and properties).
    pub parameters: Option<Vec<ParameterInfo>>,
    /// Method type parameters, e.g. `<T>` in `<T> T cast(Object o)`.
    pub type_parameters: Vec<TypeParameter>,
    pub modifiers: Vec<String>,
    /// Whether the type was written in source rather than defaulted (`def`).
    pub explicit_type: bool,
    /// Source location for members declared in analysed units.
    pub span: Option<Span>,
}

impl MemberInfo {
    pub fn field(declaring_type: impl Into<String>, name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Field,
            declaring_type: declaring_type.into(),
            type_ref: ty,
            parameters: None,
            type_parameters: Vec::new(),
            modifiers: vec!["public".to_string()],
            explicit_type: true,
            span: None,
        }
    }

    pub fn method(
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        returns: TypeRef,
        parameters: Vec<ParameterInfo>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method,
            declaring_type: declaring_type.into(),
            type_ref: returns,
            parameters: Some(parameters),
            type_parameters: Vec::new(),
            modifiers: vec!["public".to_string()],
            explicit_type: true,
            span: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = modifiers.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn with_type_parameters(mut self, params: Vec<TypeParameter>) -> Self {
        self.type_parameters = params;
        self
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.iter().any(|m| m == "static")
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.iter().any(|m| m == "abstract")
    }

    pub fn is_method(&self) -> bool {
        self.kind == MemberKind::Method
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.kind, MemberKind::Field | MemberKind::Property)
    }

    pub fn arity(&self) -> usize {
        self.parameters.as_ref().map(Vec::len).unwrap_or(0)
    }

    pub fn is_varargs(&self) -> bool {
        self.parameters
            .as_ref()
            .and_then(|p| p.last())
            .map(|p| p.is_varargs)
            .unwrap_or(false)
    }

    /// Erased parameter types, used to compare signatures across a hierarchy.
    pub fn erased_signature(&self) -> Vec<TypeRef> {
        self.parameters
            .iter()
            .flatten()
            .map(|p| p.type_ref.erasure())
            .collect()
    }

    pub fn is_method_type_parameter(&self, name: &str) -> bool {
        self.type_parameters.iter().any(|p| p.name == name)
    }
}

/// A type declaration together with its directly declared members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub info: TypeInfo,
    pub members: Vec<MemberInfo>,
}

impl TypeDecl {
    pub fn new(info: TypeInfo) -> Self {
        Self {
            info,
            members: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_parameters_erase_to_object() {
        assert_eq!(TypeParameter::new("T").erased_bound(), TypeRef::object());
        let bounded = TypeParameter::bounded(
            "T",
            TypeRef::generic("java.lang.Comparable", vec![TypeRef::new("T")]),
        );
        assert_eq!(bounded.erased_bound(), TypeRef::new("java.lang.Comparable"));
    }

    #[test]
    fn interfaces_are_abstract() {
        let info = TypeInfo::new("java.util.List", TypeKind::Interface);
        assert!(info.is_abstract());
        assert!(!TypeInfo::new("java.util.ArrayList", TypeKind::Class).is_abstract());
    }
}

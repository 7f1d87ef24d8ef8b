use crate::error::{ApiError, ApiResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const OBJECT: &str = "java.lang.Object";

const PRIMITIVES: &[(&str, &str)] = &[
    ("boolean", "java.lang.Boolean"),
    ("byte", "java.lang.Byte"),
    ("char", "java.lang.Character"),
    ("short", "java.lang.Short"),
    ("int", "java.lang.Integer"),
    ("long", "java.lang.Long"),
    ("float", "java.lang.Float"),
    ("double", "java.lang.Double"),
    ("void", "java.lang.Void"),
];

/// A resolved reference to a (possibly parameterized, possibly array) type.
///
/// Nested types use `$` as the separator (`java.util.Map$Entry`). A type with
/// no arguments is either non-generic or raw; once resolved, a non-empty
/// argument list always matches the declared arity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct TypeRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TypeRef>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub dims: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            dims: 0,
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            args,
            dims: 0,
        }
    }

    pub fn object() -> Self {
        Self::new(OBJECT)
    }

    /// Adds `dims` array dimensions on top of the existing ones.
    pub fn array_of(mut self, dims: usize) -> Self {
        self.dims += dims;
        self
    }

    pub fn is_array(&self) -> bool {
        self.dims > 0
    }

    /// The component type of an array, `None` for non-arrays.
    pub fn component(&self) -> Option<TypeRef> {
        if self.dims == 0 {
            return None;
        }
        let mut component = self.clone();
        component.dims -= 1;
        Some(component)
    }

    /// Drops the type arguments, keeping array dimensions.
    pub fn erasure(&self) -> TypeRef {
        TypeRef {
            name: self.name.clone(),
            args: Vec::new(),
            dims: self.dims,
        }
    }

    pub fn is_raw(&self) -> bool {
        self.args.is_empty()
    }

    pub fn is_object(&self) -> bool {
        self.dims == 0 && self.name == OBJECT
    }

    pub fn is_primitive(&self) -> bool {
        self.dims == 0 && PRIMITIVES.iter().any(|(p, _)| *p == self.name)
    }

    /// Maps primitives (and `void`) to their wrapper types.
    pub fn boxed(&self) -> TypeRef {
        if self.dims == 0 {
            if let Some((_, wrapper)) = PRIMITIVES.iter().find(|(p, _)| *p == self.name) {
                return TypeRef::new(*wrapper);
            }
        }
        self.clone()
    }

    /// The unqualified name, ignoring outer types.
    pub fn simple_name(&self) -> &str {
        self.name
            .rsplit(&['.', '$'][..])
            .next()
            .unwrap_or(self.name.as_str())
    }

    /// Parses the rendered form, e.g. `java.util.Map<K,java.util.List<V>>[]`.
    ///
    /// Wildcards collapse to their bound (`? extends X` is `X`, `?` is Object)
    /// and a trailing `...` counts as one array dimension.
    pub fn parse(input: &str) -> ApiResult<TypeRef> {
        let mut parser = TypeRefParser { input, pos: 0 };
        let ty = parser.parse_type()?;
        parser.skip_ws();
        if parser.pos != input.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(ty)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", arg)?;
            }
            f.write_str(">")?;
        }
        for _ in 0..self.dims {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

impl FromStr for TypeRef {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeRef::parse(s)
    }
}

struct TypeRefParser<'a> {
    input: &'a str,
    pos: usize,
}

impl TypeRefParser<'_> {
    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn error(&self, reason: &str) -> ApiError {
        ApiError::InvalidTypeRef {
            input: self.input.to_string(),
            reason: format!("{} at offset {}", reason, self.pos),
        }
    }

    fn parse_type(&mut self) -> ApiResult<TypeRef> {
        if self.eat("?") {
            if self.eat("extends ") || self.eat("super ") {
                return self.parse_type();
            }
            return Ok(TypeRef::object());
        }

        let name = self.parse_name()?;
        let mut ty = TypeRef::new(name);

        if self.eat("<") {
            if !self.eat(">") {
                loop {
                    ty.args.push(self.parse_type()?);
                    if self.eat(",") {
                        continue;
                    }
                    if self.eat(">") {
                        break;
                    }
                    return Err(self.error("expected ',' or '>'"));
                }
            }
        }

        loop {
            if self.eat("[]") || self.eat("...") {
                ty.dims += 1;
            } else {
                break;
            }
        }
        Ok(ty)
    }

    fn parse_name(&mut self) -> ApiResult<String> {
        self.skip_ws();
        let len = self
            .rest()
            .char_indices()
            .find(|(_, c)| !(c.is_alphanumeric() || matches!(c, '_' | '$' | '.')))
            .map(|(i, _)| i)
            .unwrap_or(self.rest().len());
        // a trailing "..." belongs to varargs, not to the name
        let name = self.rest()[..len].trim_end_matches('.');
        if name.is_empty() {
            return Err(self.error("expected a type name"));
        }
        let name = name.to_string();
        self.pos += name.len();
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_without_spaces() {
        let ty = TypeRef::generic(
            "java.util.Map",
            vec![
                TypeRef::new("java.lang.String"),
                TypeRef::generic("java.util.List", vec![TypeRef::new("java.lang.Integer")]),
            ],
        );
        assert_eq!(
            ty.to_string(),
            "java.util.Map<java.lang.String,java.util.List<java.lang.Integer>>"
        );
    }

    #[test]
    fn parses_nested_arrays_and_wildcards() {
        let ty = TypeRef::parse("java.util.List<? extends java.lang.Number>[][]").unwrap();
        assert_eq!(ty.dims, 2);
        assert_eq!(ty.args[0], TypeRef::new("java.lang.Number"));

        let entry = TypeRef::parse("java.util.Map$Entry<K, V>").unwrap();
        assert_eq!(entry.to_string(), "java.util.Map$Entry<K,V>");

        let varargs = TypeRef::parse("java.lang.Object...").unwrap();
        assert_eq!(varargs, TypeRef::object().array_of(1));
    }

    #[test]
    fn rejects_garbage() {
        assert!(TypeRef::parse("java.util.List<").is_err());
        assert!(TypeRef::parse("<T>").is_err());
    }

    #[test]
    fn boxing_and_erasure() {
        assert_eq!(TypeRef::new("int").boxed(), TypeRef::new("java.lang.Integer"));
        assert_eq!(TypeRef::new("int").array_of(1).boxed(), TypeRef::new("int").array_of(1));
        let list = TypeRef::parse("java.util.List<java.lang.String>[]").unwrap();
        assert_eq!(list.erasure().to_string(), "java.util.List[]");
        assert_eq!(list.component().unwrap().dims, 0);
        assert_eq!(TypeRef::new("java.util.Map$Entry").simple_name(), "Entry");
    }
}

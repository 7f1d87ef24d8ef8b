//! Simple-name resolution against a unit's imports.

use super::type_system::TypeProvider;
use crate::ast::{ImportDecl, Module};
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::warn;

/// Packages every Groovy unit imports implicitly, in lookup order.
pub const DEFAULT_STAR_IMPORTS: &[&str] = &[
    "java.lang",
    "java.io",
    "java.net",
    "java.util",
    "groovy.lang",
    "groovy.util",
];

/// Types every Groovy unit imports implicitly.
pub const DEFAULT_TYPE_IMPORTS: &[&str] = &["java.math.BigDecimal", "java.math.BigInteger"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameResolution {
    Found(String),
    /// Several on-demand imports provide the name; candidates in import order.
    Ambiguous(Vec<String>),
    NotFound,
}

impl NameResolution {
    /// The resolved name, taking the first candidate of an ambiguous one.
    pub fn best(&self) -> Option<&str> {
        match self {
            NameResolution::Found(fqn) => Some(fqn),
            NameResolution::Ambiguous(candidates) => candidates.first().map(String::as_str),
            NameResolution::NotFound => None,
        }
    }
}

/// A static import: `owner.member`, or every static member of `owner`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticImport {
    pub owner: String,
    pub member: Option<String>,
    pub alias: Option<String>,
}

/// The names visible in one compilation unit.
#[derive(Debug, Clone, Default)]
pub struct ImportScope {
    package: Option<String>,
    /// Simple name (or alias) to binary name, from single-type imports.
    single: IndexMap<String, String>,
    unit_types: HashMap<String, String>,
    declared_stars: Vec<String>,
    extra_stars: Vec<String>,
    statics: Vec<StaticImport>,
}

impl ImportScope {
    /// Collects the declared imports of `module` plus `extra` (configured) imports.
    pub fn for_module(module: &Module, extra: &[ImportDecl]) -> Self {
        let mut scope = ImportScope {
            package: module.package.clone(),
            ..Default::default()
        };

        for class in &module.classes {
            let fqn = module.qualify(&class.name);
            let simple = class.name.rsplit('$').next().unwrap_or(&class.name);
            scope.unit_types.entry(simple.to_string()).or_insert(fqn.clone());
            scope.unit_types.insert(class.name.replace('$', "."), fqn);
        }
        if module.is_script() {
            scope
                .unit_types
                .entry(module.name.clone())
                .or_insert_with(|| module.script_class());
        }

        for import in &module.imports {
            scope.add(import, false);
        }
        for import in extra {
            scope.add(import, true);
        }
        scope
    }

    fn add(&mut self, import: &ImportDecl, extra: bool) {
        if import.is_static {
            let (owner, member) = if import.star {
                (import.path.clone(), None)
            } else {
                match import.path.rsplit_once('.') {
                    Some((owner, member)) => (owner.to_string(), Some(member.to_string())),
                    None => return,
                }
            };
            self.statics.push(StaticImport {
                owner,
                member,
                alias: import.alias.clone(),
            });
            return;
        }

        if import.star {
            let stars = if extra {
                &mut self.extra_stars
            } else {
                &mut self.declared_stars
            };
            stars.push(import.path.clone());
            return;
        }

        let simple = import
            .alias
            .clone()
            .unwrap_or_else(|| import.path.rsplit('.').next().unwrap_or(&import.path).to_string());
        if extra {
            self.single.entry(simple).or_insert_with(|| import.path.clone());
        } else {
            self.single.insert(simple, import.path.clone());
        }
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn static_imports(&self) -> &[StaticImport] {
        &self.statics
    }

    /// Owners whose static member `name` is visible, with the member's real name.
    pub fn static_member_owners(&self, name: &str) -> Vec<(String, String)> {
        self.statics
            .iter()
            .filter_map(|s| match (&s.member, &s.alias) {
                (Some(member), Some(alias)) if alias == name => Some((s.owner.clone(), member.clone())),
                (Some(member), None) if member == name => Some((s.owner.clone(), member.clone())),
                (None, _) => Some((s.owner.clone(), name.to_string())),
                _ => None,
            })
            .collect()
    }

    /// Resolves a name as written in source (`Map`, `Map.Entry`, `java.util.List`).
    pub fn resolve<T: TypeProvider + ?Sized>(&self, ts: &T, name: &str) -> NameResolution {
        if !name.contains('.') {
            return self.resolve_simple(ts, name);
        }

        if let Some(found) = resolve_qualified(ts, name) {
            return NameResolution::Found(found);
        }

        if let Some(fqn) = self.unit_types.get(name) {
            return NameResolution::Found(fqn.clone());
        }

        // `Outer.Inner` where `Outer` is imported
        let (head, rest) = name.split_once('.').unwrap_or((name, ""));
        if let Some(outer) = self.resolve_simple(ts, head).best() {
            let nested = format!("{}${}", outer, rest.replace('.', "$"));
            if ts.has_type(&nested) {
                return NameResolution::Found(nested);
            }
        }
        NameResolution::NotFound
    }

    fn resolve_simple<T: TypeProvider + ?Sized>(&self, ts: &T, name: &str) -> NameResolution {
        if let Some(fqn) = self.single.get(name) {
            return NameResolution::Found(fqn.clone());
        }

        if let Some(fqn) = self.unit_types.get(name) {
            return NameResolution::Found(fqn.clone());
        }

        if let Some(pkg) = self.package.as_deref().filter(|p| !p.is_empty()) {
            let candidate = format!("{}.{}", pkg, name);
            if ts.has_type(&candidate) {
                return NameResolution::Found(candidate);
            }
        } else if ts.has_type(name) {
            return NameResolution::Found(name.to_string());
        }

        let declared: Vec<String> = self
            .declared_stars
            .iter()
            .filter_map(|pkg| on_demand(ts, pkg, name))
            .collect();
        match declared.len() {
            0 => {}
            1 => return NameResolution::Found(declared[0].clone()),
            _ => {
                warn!("{} is ambiguous between {}", name, declared.join(" and "));
                return NameResolution::Ambiguous(declared);
            }
        }

        if let Some(found) = self.extra_stars.iter().find_map(|pkg| on_demand(ts, pkg, name)) {
            return NameResolution::Found(found);
        }

        if let Some(found) = DEFAULT_TYPE_IMPORTS
            .iter()
            .find(|fqn| fqn.rsplit('.').next() == Some(name))
        {
            return NameResolution::Found(found.to_string());
        }

        DEFAULT_STAR_IMPORTS
            .iter()
            .find_map(|pkg| on_demand(ts, pkg, name))
            .map(NameResolution::Found)
            .unwrap_or(NameResolution::NotFound)
    }
}

/// `pkg.name`, or `pkg$name` when the star import names a type.
fn on_demand<T: TypeProvider + ?Sized>(ts: &T, pkg: &str, name: &str) -> Option<String> {
    let in_package = format!("{}.{}", pkg, name);
    if ts.has_type(&in_package) {
        return Some(in_package);
    }
    let nested = format!("{}${}", pkg, name);
    ts.has_type(&nested).then_some(nested)
}

/// A fully qualified name, trying later segments as nested types.
fn resolve_qualified<T: TypeProvider + ?Sized>(ts: &T, name: &str) -> Option<String> {
    if ts.has_type(name) {
        return Some(name.to_string());
    }
    let dots: Vec<usize> = name.match_indices('.').map(|(i, _)| i).collect();
    for &split in dots.iter().rev() {
        let candidate = format!("{}${}", &name[..split], name[split + 1..].replace('.', "$"));
        if ts.has_type(&candidate) {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::adapters::jdk::jdk_registry;
    use crate::parser::parse_module;

    fn scope(source: &str) -> ImportScope {
        let module = parse_module(source, "Search");
        ImportScope::for_module(&module, &[])
    }

    #[test]
    fn default_imports() {
        let ts = jdk_registry();
        let scope = scope("def x = 1");
        assert_eq!(scope.resolve(ts, "List"), NameResolution::Found("java.util.List".into()));
        assert_eq!(scope.resolve(ts, "String"), NameResolution::Found("java.lang.String".into()));
        assert_eq!(
            scope.resolve(ts, "BigDecimal"),
            NameResolution::Found("java.math.BigDecimal".into())
        );
        assert_eq!(scope.resolve(ts, "Closure"), NameResolution::Found("groovy.lang.Closure".into()));
        assert_eq!(scope.resolve(ts, "Nope"), NameResolution::NotFound);
    }

    #[test]
    fn nested_types_by_dotted_name() {
        let ts = jdk_registry();
        let scope = scope("def x = 1");
        assert_eq!(
            scope.resolve(ts, "Map.Entry"),
            NameResolution::Found("java.util.Map$Entry".into())
        );
        assert_eq!(
            scope.resolve(ts, "java.util.Map.Entry"),
            NameResolution::Found("java.util.Map$Entry".into())
        );
    }

    #[test]
    fn aliases_and_unit_classes_win() {
        let ts = jdk_registry();
        let scope = scope("import java.util.LinkedList as List\nclass Date {}\n");
        assert_eq!(scope.resolve(ts, "List"), NameResolution::Found("java.util.LinkedList".into()));
        assert_eq!(scope.resolve(ts, "Date"), NameResolution::Found("Date".into()));
    }

    #[test]
    fn static_imports_expose_members() {
        let scope = scope("import static java.util.Collections.emptyList\nimport static java.lang.Math.*\n");
        assert_eq!(
            scope.static_member_owners("emptyList"),
            vec![("java.util.Collections".to_string(), "emptyList".to_string())]
        );
        assert_eq!(
            scope.static_member_owners("max"),
            vec![("java.lang.Math".to_string(), "max".to_string())]
        );
    }
}

//! Entry point: parses units, publishes their declarations and answers
//! type queries against them.

use crate::ast::{ExprId, Module};
use crate::config::{ExtraImports, GroovyVersion, InferenceOptions};
use crate::error::Result;
use crate::inference::adapters::jdk::jdk_registry;
use crate::inference::adapters::overlay::OverlayTypeSystem;
use crate::inference::adapters::registry::TypeRegistry;
use crate::inference::adapters::source::publish;
use crate::inference::attributes::NodeAttributes;
use crate::inference::chain::LookupChain;
use crate::inference::core::imports::ImportScope;
use crate::inference::core::normalization::TypeProblem;
use crate::inference::dgm::DgmTable;
use crate::inference::driver::{InferenceDriver, UnitView};
use crate::inference::lookup::LookupResult;
use crate::inference::verify::verify;
use crate::inference::GroovyTypeSystem;
use crate::parser::parse_module;
use groovyscope_api::{Diagnostic, Resolution, Span, TypeResolver};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Where declarations not written in the analysed sources come from.
#[derive(Clone)]
enum Bindings {
    Jdk,
    Custom(Arc<dyn GroovyTypeSystem>),
}

impl Bindings {
    fn get(&self) -> &(dyn GroovyTypeSystem + 'static) {
        match self {
            Bindings::Jdk => jdk_registry(),
            Bindings::Custom(ts) => ts.as_ref(),
        }
    }
}

/// Analyses Groovy units against the built-in bindings plus every source
/// added with [`InferenceEngine::add_source`].
pub struct InferenceEngine {
    options: InferenceOptions,
    extra_imports: ExtraImports,
    bindings: Bindings,
    sources: TypeRegistry,
    chain: LookupChain,
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self {
            options: InferenceOptions::default(),
            extra_imports: ExtraImports::default(),
            bindings: Bindings::Jdk,
            sources: TypeRegistry::new(),
            chain: LookupChain::standard(),
        }
    }
}

impl InferenceEngine {
    pub fn new(options: InferenceOptions) -> Result<Self> {
        let extra_imports = ExtraImports::parse(&options.extra_imports)?;
        info!(
            "inference engine for Groovy {} ({} extension methods)",
            options.groovy_version,
            DgmTable::for_version(options.groovy_version).len()
        );
        Ok(Self {
            options,
            extra_imports,
            ..Self::default()
        })
    }

    /// Replaces the built-in JDK bindings.
    pub fn with_base(mut self, base: impl GroovyTypeSystem + 'static) -> Self {
        self.bindings = Bindings::Custom(Arc::new(base));
        self
    }

    pub fn options(&self) -> &InferenceOptions {
        &self.options
    }

    pub fn version(&self) -> GroovyVersion {
        self.options.groovy_version
    }

    /// The extension methods active for the configured Groovy version.
    pub fn dgm(&self) -> &'static DgmTable {
        DgmTable::for_version(self.options.groovy_version)
    }

    /// Parses another unit and makes its declarations visible to later analyses.
    pub fn add_source(&mut self, name: &str, text: &str) {
        let module = parse_module(text, &unit_name(name));
        let imports = ImportScope::for_module(&module, &self.extra_imports.for_file(name));
        let sources = std::mem::take(&mut self.sources);
        let view = OverlayTypeSystem::new(self.bindings.get(), sources);
        let published = publish(&view, &module, &imports);
        let mut sources = view.into_top();
        for decl in published.registry.decls() {
            sources.add_type(decl.clone());
        }
        debug!("added {} ({} types known from sources)", name, sources.len());
        self.sources = sources;
    }

    /// Parses and binds the unit `name` (a file name such as `Search.groovy`).
    ///
    /// Incomplete source still yields a unit; what the parser skipped is
    /// reported by [`CompilationUnit::diagnostics`].
    pub fn analyze(&self, name: &str, text: &str) -> CompilationUnit<'_> {
        let module = parse_module(text, &unit_name(name));
        self.bind(module, name)
    }

    /// Analyses text that has no file of its own; it is named after the
    /// configured script name.
    pub fn analyze_snippet(&self, text: &str) -> CompilationUnit<'_> {
        let name = self.options.script_name.clone();
        self.analyze(&format!("{}.groovy", name), text)
    }

    /// Binds an already parsed unit.
    pub fn analyze_module(&self, module: Module) -> CompilationUnit<'_> {
        let file_name = format!("{}.groovy", module.name);
        self.bind(module, &file_name)
    }

    fn bind(&self, module: Module, file_name: &str) -> CompilationUnit<'_> {
        let imports = ImportScope::for_module(&module, &self.extra_imports.for_file(file_name));
        let view = OverlayTypeSystem::new(self.bindings.get(), self.sources.clone());
        let published = publish(&view, &module, &imports);
        let mut registry = view.into_top();
        for decl in published.registry.decls() {
            registry.add_type(decl.clone());
        }
        CompilationUnit {
            engine: self,
            types: OverlayTypeSystem::new(self.bindings.get(), registry),
            module,
            imports,
            problems: published.problems,
            attributes: NodeAttributes::default(),
        }
    }
}

/// `Search.groovy` and `src/Search.groovy` both name the unit `Search`.
fn unit_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
        .to_string()
}

/// One analysed unit, ready for type queries.
pub struct CompilationUnit<'e> {
    engine: &'e InferenceEngine,
    module: Module,
    imports: ImportScope,
    types: OverlayTypeSystem<'e, dyn GroovyTypeSystem>,
    problems: Vec<TypeProblem>,
    attributes: NodeAttributes,
}

impl<'e> CompilationUnit<'e> {
    /// Attaches the results of a static type checking pass over this unit.
    pub fn with_attributes(mut self, attributes: NodeAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn imports(&self) -> &ImportScope {
        &self.imports
    }

    /// The bindings this unit resolves against, its own declarations included.
    pub fn types(&self) -> &dyn GroovyTypeSystem {
        &self.types
    }

    /// The expression a query for `span` is answered for.
    pub fn expr_at(&self, span: Span) -> Option<ExprId> {
        InferenceDriver::target_for(&self.module, span)
    }

    /// Types every expression of the unit.
    pub fn resolve_all(&self) -> HashMap<ExprId, LookupResult> {
        InferenceDriver::new(self.view(), &self.engine.chain).resolve_all()
    }

    fn view(&self) -> UnitView<'_> {
        UnitView {
            ts: &self.types,
            module: &self.module,
            imports: &self.imports,
            attributes: &self.attributes,
            dgm: self.engine.dgm(),
            version: self.engine.version(),
        }
    }
}

impl TypeResolver for CompilationUnit<'_> {
    fn resolve(&self, range: Span) -> Resolution {
        let (target, result) = InferenceDriver::new(self.view(), &self.engine.chain).resolve(range);
        let Some(target) = target else {
            return Resolution::unresolved();
        };
        let mut resolution = result.into_resolution(self.module.expr(target).span);
        resolution.type_ref = resolution.type_ref.map(|t| t.boxed());
        resolution
    }

    fn diagnostics(&self) -> Vec<Diagnostic> {
        verify(&self.types, &self.module, &self.imports, &self.problems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::adapters::registry::TypeDeclBuilder;
    use groovyscope_api::Confidence;

    fn span_of(source: &str, needle: &str) -> Span {
        let start = source.rfind(needle).unwrap();
        Span::new(start, start + needle.len())
    }

    #[test]
    fn unit_names_drop_directories_and_extensions() {
        assert_eq!(unit_name("src/p/Search.groovy"), "Search");
        assert_eq!(unit_name("Search"), "Search");
    }

    #[test]
    fn added_sources_are_visible_to_later_units() {
        let mut engine = InferenceEngine::default();
        engine
            .add_source("Other.groovy", "package p\nclass Other {\n  List<String> names\n}\n");
        let source = "import p.Other\ndef o = new Other()\no.names";
        let unit = engine.analyze("Search.groovy", source);
        let resolution = unit.resolve(span_of(source, "names"));
        assert_eq!(resolution.type_name().as_deref(), Some("java.util.List<java.lang.String>"));
    }

    #[test]
    fn uncovered_ranges_are_unresolved() {
        let engine = InferenceEngine::default();
        let unit = engine.analyze_snippet("def x = 1\n");
        let resolution = unit.resolve(Span::new(100, 104));
        assert_eq!(resolution, Resolution::unresolved());
    }

    #[test]
    fn custom_bindings_replace_the_jdk() {
        let mut base = TypeRegistry::new();
        base.add_type(TypeDeclBuilder::class("java.lang.Object").build());
        base.add_type(
            TypeDeclBuilder::class("acme.Widget")
                .extends("java.lang.Object")
                .method("size", "long", &[])
                .build(),
        );
        let engine = InferenceEngine::default().with_base(base);
        let source = "import acme.Widget\nnew Widget().size()";
        let unit = engine.analyze("Search.groovy", source);
        let resolution = unit.resolve(span_of(source, "size"));
        assert_eq!(resolution.type_name().as_deref(), Some("java.lang.Long"));
        assert_eq!(resolution.confidence, Confidence::Exact);
    }
}

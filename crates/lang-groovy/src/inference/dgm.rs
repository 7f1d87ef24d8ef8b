//! Extension method (DefaultGroovyMethods) tables.
//!
//! Groovy adds methods such as `each`, `collect` or `inject` to JDK types
//! without inheritance. A [`DgmTable`] maps `(receiver erasure, name, arity)`
//! to a signature whose types are templates over the receiver:
//!
//! | template | meaning                                       |
//! |----------|-----------------------------------------------|
//! | `$R`     | the receiver                                  |
//! | `$E`     | the receiver's element type                   |
//! | `$K` `$V`| key and value types of a map receiver         |
//! | `$A0`    | the first argument                            |
//! | `$C`     | the return type of the closure argument       |
//!
//! One immutable table exists per Groovy release that changed the set of
//! methods; [`DgmTable::for_version`] picks the newest one not after the
//! active version.

use crate::config::GroovyVersion;
use crate::inference::core::generics::GenericsSpec;
use crate::inference::scope::iteration::{closure_param_types, element_type, map_key_value};
use crate::inference::GroovyTypeSystem;
use groovyscope_api::{OBJECT, TypeRef};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use tracing::debug;

const CLOSURE: &str = "groovy.lang.Closure";
const OBJECT_ARRAY: &str = "java.lang.Object[]";

/// How the parameters of a closure argument are typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClosureParams {
    /// Each element; for maps the entry, or key and value for two parameters.
    Element,
    /// Element plus an `Integer` index; for maps entry or key and value first.
    ElementWithIndex,
    /// One element, or two for comparator closures.
    ElementOrPair,
    /// `inject` without a seed: accumulator and element are both elements.
    Accumulator,
    /// `inject(seed)`: the seed type, then the element.
    AccumulatorWithSeed,
    /// The receiver itself (`with`, `tap`, `withStream`).
    Receiver,
    /// Fixed templates, e.g. `java.lang.Integer` for `times`.
    Fixed(Vec<TypeRef>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DgmSignature {
    /// Erased receiver type the method is declared on.
    pub receiver: String,
    pub name: String,
    /// Parameter type templates, receiver excluded.
    pub params: Vec<TypeRef>,
    pub returns: TypeRef,
    pub closure: Option<ClosureParams>,
    /// First release providing the method.
    pub since: GroovyVersion,
}

impl DgmSignature {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Return type for a call on `receiver` with `arg_types`, boxed.
    pub fn return_type<T: GroovyTypeSystem + ?Sized>(
        &self,
        ts: &T,
        receiver: &TypeRef,
        arg_types: &[TypeRef],
    ) -> TypeRef {
        template_spec(ts, receiver, arg_types)
            .substitute(&self.returns)
            .boxed()
    }

    /// Parameter types for a closure argument declaring `declared` parameters.
    pub fn closure_params<T: GroovyTypeSystem + ?Sized>(
        &self,
        ts: &T,
        receiver: &TypeRef,
        declared: usize,
        arg_types: &[TypeRef],
    ) -> Option<Vec<TypeRef>> {
        let rule = self.closure.as_ref()?;
        let spec = template_spec(ts, receiver, arg_types);
        Some(closure_param_types(ts, rule, receiver, declared, &spec, arg_types))
    }
}

/// Bindings for the template variables of a call on `receiver`.
pub fn template_spec<T: GroovyTypeSystem + ?Sized>(
    ts: &T,
    receiver: &TypeRef,
    arg_types: &[TypeRef],
) -> GenericsSpec {
    let mut spec = GenericsSpec::new();
    spec.insert("$R", receiver.boxed());
    spec.insert("$E", element_type(ts, receiver));
    let (key, value) = map_key_value(ts, receiver).unwrap_or_else(|| (TypeRef::object(), TypeRef::object()));
    spec.insert("$K", key);
    spec.insert("$V", value);
    spec.insert(
        "$A0",
        arg_types.first().map(TypeRef::boxed).unwrap_or_else(TypeRef::object),
    );
    let closure_return = arg_types
        .iter()
        .rev()
        .find(|t| t.name == CLOSURE && t.dims == 0)
        .and_then(|t| t.args.first().cloned())
        .unwrap_or_else(TypeRef::object);
    spec.insert("$C", closure_return);
    spec
}

type Key = (String, String, usize);

/// Extension methods available in one Groovy release.
#[derive(Debug, Clone)]
pub struct DgmTable {
    version: GroovyVersion,
    entries: IndexMap<Key, DgmSignature>,
}

/// Releases that changed the table, oldest first.
const RELEASES: &[GroovyVersion] = &[
    GroovyVersion::V1_7,
    GroovyVersion::V1_8,
    GroovyVersion::V2_0,
    GroovyVersion::V2_4,
    GroovyVersion::V2_5,
];

static TABLES: Lazy<Vec<DgmTable>> = Lazy::new(|| RELEASES.iter().map(|v| DgmTable::build(*v)).collect());

impl DgmTable {
    /// The shared table for `version`.
    pub fn for_version(version: GroovyVersion) -> &'static DgmTable {
        let index = RELEASES
            .iter()
            .rposition(|release| *release <= version)
            .unwrap_or(0);
        &TABLES[index]
    }

    /// Builds the table of methods present in `version`.
    pub fn build(version: GroovyVersion) -> DgmTable {
        let mut builder = TableBuilder {
            version,
            entries: IndexMap::new(),
            receiver: OBJECT.to_string(),
            since: GroovyVersion::V1_7,
        };
        object_methods(&mut builder);
        iterable_methods(&mut builder);
        collection_methods(&mut builder);
        list_and_set_methods(&mut builder);
        map_methods(&mut builder);
        array_methods(&mut builder);
        iterator_methods(&mut builder);
        string_methods(&mut builder);
        number_methods(&mut builder);
        io_methods(&mut builder);
        debug!("built extension table for Groovy {} with {} methods", version, builder.entries.len());
        DgmTable {
            version,
            entries: builder.entries,
        }
    }

    pub fn version(&self) -> GroovyVersion {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, receiver: &str, name: &str, arity: usize) -> Option<&DgmSignature> {
        self.entries
            .get(&(receiver.to_string(), name.to_string(), arity))
    }

    pub fn signatures(&self) -> impl Iterator<Item = &DgmSignature> {
        self.entries.values()
    }

    /// Signatures declared on exactly `receiver`.
    pub fn signatures_for<'a>(&'a self, receiver: &'a str) -> impl Iterator<Item = &'a DgmSignature> + 'a {
        self.entries.values().filter(move |s| s.receiver == receiver)
    }

    /// Erasures searched for a receiver, most specific first.
    fn receiver_chain<T: GroovyTypeSystem + ?Sized>(ts: &T, receiver: &TypeRef) -> Vec<String> {
        if receiver.is_array() {
            return vec![OBJECT_ARRAY.to_string(), OBJECT.to_string()];
        }
        let boxed = receiver.boxed();
        let mut chain = vec![boxed.name.clone()];
        chain.extend(ts.walk_ancestors(&boxed.name));
        if !chain.iter().any(|c| c == OBJECT) {
            chain.push(OBJECT.to_string());
        }
        chain
    }

    /// The most specific method applicable to `receiver`.
    pub fn find<T: GroovyTypeSystem + ?Sized>(
        &self,
        ts: &T,
        receiver: &TypeRef,
        name: &str,
        arity: usize,
    ) -> Option<&DgmSignature> {
        Self::receiver_chain(ts, receiver)
            .iter()
            .find_map(|r| self.get(r, name, arity))
    }

    /// The closure rule for `name` on `receiver`.
    ///
    /// When the receiver has no such method, any same-name method with a
    /// closure rule is used, so `1.reverseEach { it }` still binds `it`.
    pub fn closure_signature<T: GroovyTypeSystem + ?Sized>(
        &self,
        ts: &T,
        receiver: &TypeRef,
        name: &str,
        arity: usize,
    ) -> Option<&DgmSignature> {
        self.find(ts, receiver, name, arity)
            .filter(|s| s.closure.is_some())
            .or_else(|| {
                self.entries
                    .values()
                    .find(|s| s.name == name && s.arity() == arity && s.closure.is_some())
            })
            .or_else(|| {
                self.entries
                    .values()
                    .find(|s| s.name == name && s.closure.is_some())
            })
    }
}

struct TableBuilder {
    version: GroovyVersion,
    entries: IndexMap<Key, DgmSignature>,
    receiver: String,
    since: GroovyVersion,
}

impl TableBuilder {
    fn on(&mut self, receiver: &str) -> &mut Self {
        self.receiver = receiver.to_string();
        self.since = GroovyVersion::V1_7;
        self
    }

    fn since(&mut self, version: GroovyVersion) -> &mut Self {
        self.since = version;
        self
    }

    fn push(&mut self, name: &str, params: &[&str], returns: &str, closure: Option<ClosureParams>) -> &mut Self {
        if self.since > self.version {
            return self;
        }
        let signature = DgmSignature {
            receiver: self.receiver.clone(),
            name: name.to_string(),
            params: params.iter().map(|p| template(p)).collect(),
            returns: template(returns),
            closure,
            since: self.since,
        };
        let key = (signature.receiver.clone(), signature.name.clone(), signature.arity());
        self.entries.insert(key, signature);
        self
    }

    fn method(&mut self, name: &str, params: &[&str], returns: &str) -> &mut Self {
        self.push(name, params, returns, None)
    }

    fn closure(&mut self, name: &str, returns: &str, rule: ClosureParams) -> &mut Self {
        self.push(name, &[CLOSURE], returns, Some(rule))
    }

    fn closure_with(&mut self, name: &str, params: &[&str], returns: &str, rule: ClosureParams) -> &mut Self {
        self.push(name, params, returns, Some(rule))
    }
}

fn template(written: &str) -> TypeRef {
    TypeRef::parse(written).unwrap_or_else(|_| TypeRef::new(written))
}

fn fixed(types: &[&str]) -> ClosureParams {
    ClosureParams::Fixed(types.iter().map(|t| template(t)).collect())
}

use ClosureParams::{Accumulator, AccumulatorWithSeed, Element, ElementOrPair, ElementWithIndex, Receiver};

fn object_methods(t: &mut TableBuilder) {
    t.on(OBJECT)
        .closure("each", "$R", Element)
        .closure("eachWithIndex", "$R", ElementWithIndex)
        .closure("collect", "java.util.List<$C>", Element)
        .method("collect", &[], "java.util.List<$E>")
        .closure("find", "$E", Element)
        .closure("findAll", "java.util.List<$E>", Element)
        .closure("findResult", "$C", Element)
        .closure("findIndexOf", "int", Element)
        .closure("any", "boolean", Element)
        .closure("every", "boolean", Element)
        .method("grep", &["java.lang.Object"], "java.util.List<$E>")
        .closure_with("inject", &["java.lang.Object", CLOSURE], "$A0", AccumulatorWithSeed)
        .method("iterator", &[], "java.util.Iterator<$E>")
        .closure("with", "$C", Receiver)
        .closure("identity", "$C", Receiver)
        .method("is", &["java.lang.Object"], "boolean")
        .method("isCase", &["java.lang.Object"], "boolean")
        .method("asBoolean", &[], "boolean")
        .method("dump", &[], "java.lang.String")
        .method("inspect", &[], "java.lang.String")
        .method("getMetaClass", &[], "groovy.lang.MetaClass")
        .method("getProperties", &[], "java.util.Map<java.lang.String,java.lang.Object>")
        .method("hasProperty", &["java.lang.String"], "groovy.lang.MetaProperty")
        .method("print", &["java.lang.Object"], "void")
        .method("println", &[], "void")
        .method("println", &["java.lang.Object"], "void")
        .method("printf", &["java.lang.String", "java.lang.Object[]"], "void")
        .method("sleep", &["long"], "void")
        .method("split", &[CLOSURE], "java.util.List<java.util.List<$E>>");
    t.since(GroovyVersion::V2_5).closure("tap", "$R", Receiver);
}

fn iterable_methods(t: &mut TableBuilder) {
    t.on("java.lang.Iterable")
        .closure("each", "$R", Element)
        .closure("eachWithIndex", "$R", ElementWithIndex)
        .closure("collect", "java.util.List<$C>", Element)
        .closure("find", "$E", Element)
        .closure("findAll", "java.util.Collection<$E>", Element)
        .closure("any", "boolean", Element)
        .closure("every", "boolean", Element)
        .closure("groupBy", "java.util.Map<$C,java.util.List<$E>>", Element)
        .closure("countBy", "java.util.Map<$C,java.lang.Integer>", Element)
        .closure("sum", "$C", Element)
        .method("sum", &[], "$E")
        .method("first", &[], "$E")
        .method("last", &[], "$E")
        .method("head", &[], "$E")
        .method("tail", &[], "java.util.List<$E>")
        .method("getAt", &["int"], "$E")
        .method("join", &["java.lang.String"], "java.lang.String")
        .method("toList", &[], "java.util.List<$E>")
        .method("toSet", &[], "java.util.Set<$E>")
        .method("max", &[], "$E")
        .method("min", &[], "$E")
        .closure("max", "$E", ElementOrPair)
        .closure("min", "$E", ElementOrPair)
        .method("sort", &[], "java.util.List<$E>")
        .closure("sort", "java.util.List<$E>", ElementOrPair)
        .method("take", &["int"], "java.util.List<$E>")
        .method("drop", &["int"], "java.util.List<$E>")
        .method("size", &[], "int")
        .method("count", &["java.lang.Object"], "int")
        .closure("count", "int", Element);
    t.since(GroovyVersion::V1_8)
        .closure("collectMany", "java.util.List<java.lang.Object>", Element)
        .closure("collectEntries", "java.util.Map", Element)
        .closure("takeWhile", "java.util.List<$E>", Element);
    t.since(GroovyVersion::V2_0)
        .closure("dropWhile", "java.util.List<$E>", Element)
        .method("collate", &["int"], "java.util.List<java.util.List<$E>>");
    t.since(GroovyVersion::V2_4)
        .method("indexed", &[], "java.util.Map<java.lang.Integer,$E>")
        .method("withIndex", &[], "java.util.List<groovy.lang.Tuple2<$E,java.lang.Integer>>")
        .method("toSorted", &[], "java.util.List<$E>")
        .closure("toSorted", "java.util.List<$E>", ElementOrPair);
}

fn collection_methods(t: &mut TableBuilder) {
    t.on("java.util.Collection")
        .closure("findAll", "java.util.Collection<$E>", Element)
        .method("unique", &[], "$R")
        .closure("unique", "$R", ElementOrPair)
        .method("inject", &[CLOSURE], "$E")
        .closure("inject", "$E", Accumulator)
        .closure_with("inject", &["java.lang.Object", CLOSURE], "$A0", AccumulatorWithSeed)
        .closure("split", "java.util.List<java.util.List<$E>>", Element)
        .method("flatten", &[], "java.util.List<java.lang.Object>")
        .method("asList", &[], "java.util.List<$E>")
        .method("plus", &["java.lang.Object"], "$R")
        .method("minus", &["java.lang.Object"], "$R")
        .method("leftShift", &["java.lang.Object"], "$R")
        .method("intersect", &["java.lang.Iterable"], "$R")
        .method("asImmutable", &[], "$R")
        .method("asSynchronized", &[], "$R")
        .closure("removeAll", "boolean", Element)
        .closure("retainAll", "boolean", Element)
        .method("getAt", &["java.lang.String"], "java.util.List<java.lang.Object>");
    t.since(GroovyVersion::V1_8)
        .closure("collectEntries", "java.util.Map", Element);
}

fn list_and_set_methods(t: &mut TableBuilder) {
    t.on("java.util.List")
        .closure("findAll", "java.util.List<$E>", Element)
        .closure("reverseEach", "$R", Element)
        .method("reverse", &[], "$R")
        .method("getAt", &["int"], "$E")
        .method("pop", &[], "$E")
        .method("push", &["java.lang.Object"], "boolean")
        .method("multiply", &["java.lang.Number"], "java.util.List<$E>")
        .method("swap", &["int", "int"], "$R")
        .method("getIndices", &[], "groovy.lang.IntRange")
        .method("plus", &["java.lang.Object"], "$R")
        .method("minus", &["java.lang.Object"], "$R");
    t.since(GroovyVersion::V1_8)
        .closure("takeWhile", "java.util.List<$E>", Element);

    t.on("java.util.Set")
        .closure("findAll", "java.util.Set<$E>", Element)
        .method("plus", &["java.lang.Object"], "$R")
        .method("minus", &["java.lang.Object"], "$R");
}

fn map_methods(t: &mut TableBuilder) {
    t.on("java.util.Map")
        .closure("each", "$R", Element)
        .closure("reverseEach", "$R", Element)
        .closure("eachWithIndex", "$R", ElementWithIndex)
        .closure("collect", "java.util.List<$C>", Element)
        .closure("find", "java.util.Map$Entry<$K,$V>", Element)
        .closure("findAll", "$R", Element)
        .closure("findResult", "$C", Element)
        .closure("any", "boolean", Element)
        .closure("every", "boolean", Element)
        .closure("count", "int", Element)
        .closure("groupBy", "java.util.Map<$C,java.util.Map<$K,$V>>", Element)
        .closure("sort", "$R", ElementOrPair)
        .closure("max", "java.util.Map$Entry<$K,$V>", ElementOrPair)
        .closure("min", "java.util.Map$Entry<$K,$V>", ElementOrPair)
        .closure_with("inject", &["java.lang.Object", CLOSURE], "$A0", AccumulatorWithSeed)
        .method("getAt", &["java.lang.Object"], "$V")
        .method("get", &["java.lang.Object", "java.lang.Object"], "$V")
        .method("subMap", &["java.util.Collection"], "$R")
        .closure("withDefault", "java.util.Map<$K,$V>", fixed(&["$K"]))
        .method("plus", &["java.util.Map"], "$R")
        .method("asImmutable", &[], "$R")
        .method("isCase", &["java.lang.Object"], "boolean");
    t.since(GroovyVersion::V1_8)
        .closure("collectEntries", "java.util.Map", Element)
        .closure("collectMany", "java.util.List<java.lang.Object>", Element);
}

fn array_methods(t: &mut TableBuilder) {
    t.on(OBJECT_ARRAY)
        .closure("each", "$R", Element)
        .closure("eachWithIndex", "$R", ElementWithIndex)
        .closure("reverseEach", "$R", Element)
        .closure("collect", "java.util.List<$C>", Element)
        .closure("find", "$E", Element)
        .closure("findAll", "java.util.List<$E>", Element)
        .closure("any", "boolean", Element)
        .closure("every", "boolean", Element)
        .closure("inject", "$E", Accumulator)
        .closure_with("inject", &["java.lang.Object", CLOSURE], "$A0", AccumulatorWithSeed)
        .method("iterator", &[], "java.util.Iterator<$E>")
        .method("toList", &[], "java.util.List<$E>")
        .method("first", &[], "$E")
        .method("last", &[], "$E")
        .method("max", &[], "$E")
        .method("min", &[], "$E")
        .method("sum", &[], "$E")
        .method("join", &["java.lang.String"], "java.lang.String")
        .method("sort", &[], "$R")
        .method("reverse", &[], "$R")
        .method("size", &[], "int")
        .method("contains", &["java.lang.Object"], "boolean")
        .method("count", &["java.lang.Object"], "int")
        .closure("groupBy", "java.util.Map<$C,java.util.List<$E>>", Element);
    t.since(GroovyVersion::V1_8)
        .closure("collectEntries", "java.util.Map", Element);
}

fn iterator_methods(t: &mut TableBuilder) {
    t.on("java.util.Iterator")
        .closure("each", "$R", Element)
        .closure("eachWithIndex", "$R", ElementWithIndex)
        .closure("collect", "java.util.List<$C>", Element)
        .closure("find", "$E", Element)
        .closure("findAll", "java.util.List<$E>", Element)
        .closure("any", "boolean", Element)
        .closure("every", "boolean", Element)
        .closure("inject", "$E", Accumulator)
        .closure_with("inject", &["java.lang.Object", CLOSURE], "$A0", AccumulatorWithSeed)
        .method("toList", &[], "java.util.List<$E>")
        .method("sum", &[], "$E")
        .method("max", &[], "$E")
        .method("min", &[], "$E")
        .method("take", &["int"], "$R");
}

fn string_methods(t: &mut TableBuilder) {
    t.on("java.lang.String")
        .closure("each", "$R", Element)
        .closure("eachLine", "java.lang.Object", fixed(&["java.lang.String"]))
        .closure_with(
            "eachMatch",
            &["java.lang.String", CLOSURE],
            "$R",
            fixed(&["java.lang.String"]),
        )
        .closure_with(
            "splitEachLine",
            &["java.lang.String", CLOSURE],
            "java.lang.Object",
            fixed(&["java.util.List<java.lang.String>"]),
        )
        .closure_with(
            "replaceAll",
            &["java.lang.String", CLOSURE],
            "java.lang.String",
            fixed(&["java.lang.Object"]),
        )
        .method("size", &[], "int")
        .method("getAt", &["int"], "java.lang.String")
        .method("readLines", &[], "java.util.List<java.lang.String>")
        .method("tokenize", &[], "java.util.List<java.lang.String>")
        .method("tokenize", &["java.lang.String"], "java.util.List<java.lang.String>")
        .method("toList", &[], "java.util.List<java.lang.String>")
        .method("toInteger", &[], "java.lang.Integer")
        .method("toLong", &[], "java.lang.Long")
        .method("toDouble", &[], "java.lang.Double")
        .method("toBigDecimal", &[], "java.math.BigDecimal")
        .method("toBoolean", &[], "java.lang.Boolean")
        .method("toURL", &[], "java.net.URL")
        .method("toURI", &[], "java.net.URI")
        .method("isNumber", &[], "boolean")
        .method("isInteger", &[], "boolean")
        .method("capitalize", &[], "java.lang.String")
        .method("reverse", &[], "java.lang.String")
        .method("center", &["java.lang.Number"], "java.lang.String")
        .method("padLeft", &["java.lang.Number"], "java.lang.String")
        .method("padRight", &["java.lang.Number"], "java.lang.String")
        .method("multiply", &["java.lang.Number"], "java.lang.String")
        .method("plus", &["java.lang.Object"], "java.lang.String")
        .method("minus", &["java.lang.Object"], "java.lang.String")
        .method("find", &["java.lang.String"], "java.lang.String")
        .method("findAll", &["java.lang.String"], "java.util.List<java.lang.String>")
        .method("count", &["java.lang.String"], "int")
        .method("stripIndent", &[], "java.lang.String")
        .method("stripMargin", &[], "java.lang.String")
        .method("normalize", &[], "java.lang.String")
        .method("denormalize", &[], "java.lang.String");
}

fn number_methods(t: &mut TableBuilder) {
    t.on("java.lang.Number")
        .closure("times", "void", fixed(&["java.lang.Integer"]))
        .closure_with("upto", &["java.lang.Number", CLOSURE], "void", fixed(&["$R"]))
        .closure_with("downto", &["java.lang.Number", CLOSURE], "void", fixed(&["$R"]))
        .closure_with(
            "step",
            &["java.lang.Number", "java.lang.Number", CLOSURE],
            "void",
            fixed(&["$R"]),
        )
        .method("abs", &[], "$R")
        .method("intdiv", &["java.lang.Number"], "java.lang.Number")
        .method("power", &["java.lang.Number"], "java.lang.Number")
        .method("toInteger", &[], "java.lang.Integer")
        .method("toLong", &[], "java.lang.Long")
        .method("toDouble", &[], "java.lang.Double")
        .method("toBigDecimal", &[], "java.math.BigDecimal")
        .method("toBigInteger", &[], "java.math.BigInteger");
}

fn io_methods(t: &mut TableBuilder) {
    t.on("java.io.File")
        .closure("eachLine", "java.lang.Object", fixed(&["java.lang.String"]))
        .closure("eachFile", "void", fixed(&["java.io.File"]))
        .closure("eachDir", "void", fixed(&["java.io.File"]))
        .closure("eachFileRecurse", "void", fixed(&["java.io.File"]))
        .closure("withReader", "$C", fixed(&["java.io.BufferedReader"]))
        .closure("withWriter", "$C", fixed(&["java.io.BufferedWriter"]))
        .closure("withInputStream", "$C", fixed(&["java.io.BufferedInputStream"]))
        .closure("withOutputStream", "$C", fixed(&["java.io.OutputStream"]))
        .method("getText", &[], "java.lang.String")
        .method("getText", &["java.lang.String"], "java.lang.String")
        .method("readLines", &[], "java.util.List<java.lang.String>")
        .method("getBytes", &[], "byte[]")
        .method("newReader", &[], "java.io.BufferedReader")
        .method("newWriter", &[], "java.io.BufferedWriter")
        .method("newInputStream", &[], "java.io.BufferedInputStream")
        .method("leftShift", &["java.lang.Object"], "java.io.File")
        .method("write", &["java.lang.String"], "void")
        .method("append", &["java.lang.Object"], "void");

    t.on("java.io.InputStream")
        .closure("eachByte", "void", fixed(&["java.lang.Byte"]))
        .closure("eachLine", "java.lang.Object", fixed(&["java.lang.String"]))
        .closure("withReader", "$C", fixed(&["java.io.BufferedReader"]))
        .closure("withStream", "$C", Receiver)
        .method("getText", &[], "java.lang.String")
        .method("readLines", &[], "java.util.List<java.lang.String>")
        .method("newReader", &[], "java.io.BufferedReader")
        .method("getBytes", &[], "byte[]")
        .method("iterator", &[], "java.util.Iterator<java.lang.Byte>");

    t.on("java.io.Reader")
        .closure("eachLine", "java.lang.Object", fixed(&["java.lang.String"]))
        .closure("withReader", "$C", Receiver)
        .closure_with(
            "splitEachLine",
            &["java.lang.String", CLOSURE],
            "java.lang.Object",
            fixed(&["java.util.List<java.lang.String>"]),
        )
        .method("getText", &[], "java.lang.String")
        .method("readLines", &[], "java.util.List<java.lang.String>")
        .method("iterator", &[], "java.util.Iterator<java.lang.String>");

    t.on("java.io.OutputStream")
        .closure("withStream", "$C", Receiver)
        .method("leftShift", &["java.lang.Object"], "$R");

    t.on("java.io.Writer")
        .closure("withWriter", "$C", Receiver)
        .method("leftShift", &["java.lang.Object"], "$R");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::adapters::jdk::jdk_registry;

    fn ty(s: &str) -> TypeRef {
        TypeRef::parse(s).unwrap()
    }

    #[test]
    fn most_specific_receiver_wins() {
        let ts = jdk_registry();
        let table = DgmTable::for_version(GroovyVersion::V2_4);
        let list = ty("java.util.ArrayList<java.lang.String>");
        let find_all = table.find(ts, &list, "findAll", 1).unwrap();
        assert_eq!(find_all.receiver, "java.util.List");
        assert_eq!(
            find_all.return_type(ts, &list, &[ty("groovy.lang.Closure")]).to_string(),
            "java.util.List<java.lang.String>"
        );

        let each = table.find(ts, &ty("java.util.Date"), "each", 1).unwrap();
        assert_eq!(each.receiver, OBJECT);
    }

    #[test]
    fn arrays_use_the_object_array_table() {
        let ts = jdk_registry();
        let table = DgmTable::for_version(GroovyVersion::V2_4);
        let strings = ty("java.lang.String[]");
        let iterator = table.find(ts, &strings, "iterator", 0).unwrap();
        assert_eq!(
            iterator.return_type(ts, &strings, &[]).to_string(),
            "java.util.Iterator<java.lang.String>"
        );
    }

    #[test]
    fn closure_results_flow_into_return_types() {
        let ts = jdk_registry();
        let table = DgmTable::for_version(GroovyVersion::V2_4);
        let list = ty("java.util.List<java.lang.Integer>");
        let collect = table.find(ts, &list, "collect", 1).unwrap();
        let closure = ty("groovy.lang.Closure<java.lang.String>");
        assert_eq!(
            collect.return_type(ts, &list, &[closure]).to_string(),
            "java.util.List<java.lang.String>"
        );
    }

    #[test]
    fn tables_are_gated_by_version() {
        let ts = jdk_registry();
        let list = ty("java.util.List<java.lang.Integer>");
        assert!(DgmTable::for_version(GroovyVersion::V1_7).find(ts, &list, "collectEntries", 1).is_none());
        assert!(DgmTable::for_version(GroovyVersion::V1_8).find(ts, &list, "collectEntries", 1).is_some());
        assert!(DgmTable::for_version(GroovyVersion::V2_4).find(ts, &list, "tap", 1).is_none());
        assert!(DgmTable::for_version(GroovyVersion::new(3, 0)).find(ts, &list, "tap", 1).is_some());
        assert_eq!(DgmTable::for_version(GroovyVersion::new(2, 1)).version(), GroovyVersion::V2_0);
    }

    #[test]
    fn closure_rules_fall_back_to_any_receiver() {
        let ts = jdk_registry();
        let table = DgmTable::for_version(GroovyVersion::V2_4);
        let integer = ty("java.lang.Integer");
        let rule = table.closure_signature(ts, &integer, "reverseEach", 1).unwrap();
        let params = rule.closure_params(ts, &integer, 1, &[]).unwrap();
        assert_eq!(params, vec![integer]);
    }
}

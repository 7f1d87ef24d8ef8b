//! Built-in declarations of the JDK and GDK types Groovy code leans on.
//!
//! This is a curated subset: the collection framework, the boxed numbers,
//! streams and readers, references, the annotations the verifier checks and
//! the `groovy.lang` runtime types.

use super::registry::{TypeDeclBuilder as T, TypeRegistry};
use crate::inference::core::types::ElementTarget;
use once_cell::sync::Lazy;
use tracing::debug;

static JDK: Lazy<TypeRegistry> = Lazy::new(|| {
    let mut reg = TypeRegistry::new();
    java_lang(&mut reg);
    java_lang_annotation(&mut reg);
    java_lang_ref(&mut reg);
    java_util(&mut reg);
    java_io(&mut reg);
    java_net(&mut reg);
    java_math(&mut reg);
    groovy_lang(&mut reg);
    groovy_transform(&mut reg);
    groovy_util(&mut reg);
    debug!("built JDK registry with {} types", reg.len());
    reg
});

/// The process-wide registry of built-in declarations.
pub fn jdk_registry() -> &'static TypeRegistry {
    &JDK
}

const BOXED_NUMBERS: &[(&str, &str, &str)] = &[
    ("java.lang.Integer", "int", "parseInt"),
    ("java.lang.Long", "long", "parseLong"),
    ("java.lang.Short", "short", "parseShort"),
    ("java.lang.Byte", "byte", "parseByte"),
    ("java.lang.Double", "double", "parseDouble"),
    ("java.lang.Float", "float", "parseFloat"),
];

fn java_lang(reg: &mut TypeRegistry) {
    T::class("java.lang.Object")
        .method("toString", "java.lang.String", &[])
        .method("equals", "boolean", &["java.lang.Object"])
        .method("hashCode", "int", &[])
        .method("getClass", "java.lang.Class", &[])
        .method("notify", "void", &[])
        .method("notifyAll", "void", &[])
        .method("wait", "void", &[])
        .method("wait", "void", &["long"])
        .register(reg);

    T::class("java.lang.Class")
        .modifiers(&["public", "final"])
        .type_params(&["T"])
        .implements("java.io.Serializable")
        .method("getName", "java.lang.String", &[])
        .method("getSimpleName", "java.lang.String", &[])
        .method("getPackage", "java.lang.Package", &[])
        .method("newInstance", "T", &[])
        .method("cast", "T", &["java.lang.Object"])
        .method("isInstance", "boolean", &["java.lang.Object"])
        .method("isInterface", "boolean", &[])
        .method("isArray", "boolean", &[])
        .method("getSuperclass", "java.lang.Class<? super T>", &[])
        .method("getInterfaces", "java.lang.Class[]", &[])
        .method("getComponentType", "java.lang.Class", &[])
        .method("getEnumConstants", "T[]", &[])
        .generic_method(&["A extends java.lang.annotation.Annotation"], "getAnnotation", "A", &["java.lang.Class<A>"])
        .static_method("forName", "java.lang.Class", &["java.lang.String"])
        .register(reg);

    T::class("java.lang.Package")
        .method("getName", "java.lang.String", &[])
        .register(reg);

    T::interface("java.lang.CharSequence")
        .method("length", "int", &[])
        .method("charAt", "char", &["int"])
        .method("subSequence", "java.lang.CharSequence", &["int", "int"])
        .register(reg);

    T::interface("java.lang.Comparable")
        .type_params(&["T"])
        .method("compareTo", "int", &["T"])
        .register(reg);

    T::interface("java.lang.Iterable")
        .type_params(&["T"])
        .method("iterator", "java.util.Iterator<T>", &[])
        .register(reg);

    T::interface("java.lang.Runnable")
        .method("run", "void", &[])
        .register(reg);

    T::interface("java.lang.Cloneable").register(reg);
    T::interface("java.lang.AutoCloseable")
        .method("close", "void", &[])
        .register(reg);
    T::interface("java.lang.Appendable")
        .method("append", "java.lang.Appendable", &["java.lang.CharSequence"])
        .register(reg);

    T::class("java.lang.String")
        .modifiers(&["public", "final"])
        .implements("java.io.Serializable")
        .implements("java.lang.Comparable<java.lang.String>")
        .implements("java.lang.CharSequence")
        .method("length", "int", &[])
        .method("isEmpty", "boolean", &[])
        .method("charAt", "char", &["int"])
        .method("trim", "java.lang.String", &[])
        .method("toUpperCase", "java.lang.String", &[])
        .method("toLowerCase", "java.lang.String", &[])
        .method("substring", "java.lang.String", &["int"])
        .method("substring", "java.lang.String", &["int", "int"])
        .method("indexOf", "int", &["java.lang.String"])
        .method("lastIndexOf", "int", &["java.lang.String"])
        .method("startsWith", "boolean", &["java.lang.String"])
        .method("endsWith", "boolean", &["java.lang.String"])
        .method("contains", "boolean", &["java.lang.CharSequence"])
        .method("matches", "boolean", &["java.lang.String"])
        .method("equalsIgnoreCase", "boolean", &["java.lang.String"])
        .method("compareTo", "int", &["java.lang.String"])
        .method("split", "java.lang.String[]", &["java.lang.String"])
        .method("replace", "java.lang.String", &["java.lang.CharSequence", "java.lang.CharSequence"])
        .method("replaceAll", "java.lang.String", &["java.lang.String", "java.lang.String"])
        .method("concat", "java.lang.String", &["java.lang.String"])
        .method("getBytes", "byte[]", &[])
        .method("toCharArray", "char[]", &[])
        .method("intern", "java.lang.String", &[])
        .static_method("format", "java.lang.String", &["java.lang.String", "java.lang.Object..."])
        .static_method("valueOf", "java.lang.String", &["java.lang.Object"])
        .static_method("join", "java.lang.String", &["java.lang.CharSequence", "java.lang.CharSequence..."])
        .register(reg);

    T::class("java.lang.StringBuilder")
        .modifiers(&["public", "final"])
        .implements("java.lang.CharSequence")
        .implements("java.lang.Appendable")
        .implements("java.io.Serializable")
        .method("append", "java.lang.StringBuilder", &["java.lang.Object"])
        .method("insert", "java.lang.StringBuilder", &["int", "java.lang.Object"])
        .method("reverse", "java.lang.StringBuilder", &[])
        .method("length", "int", &[])
        .method("charAt", "char", &["int"])
        .method("toString", "java.lang.String", &[])
        .register(reg);

    T::class("java.lang.Number")
        .modifiers(&["public", "abstract"])
        .implements("java.io.Serializable")
        .method("intValue", "int", &[])
        .method("longValue", "long", &[])
        .method("doubleValue", "double", &[])
        .method("floatValue", "float", &[])
        .method("shortValue", "short", &[])
        .method("byteValue", "byte", &[])
        .register(reg);

    for (fqn, primitive, parse) in BOXED_NUMBERS {
        T::class(fqn)
            .modifiers(&["public", "final"])
            .extends("java.lang.Number")
            .implements(&format!("java.lang.Comparable<{}>", fqn))
            .static_field("MAX_VALUE", primitive)
            .static_field("MIN_VALUE", primitive)
            .static_method(parse, primitive, &["java.lang.String"])
            .static_method("valueOf", fqn, &[primitive])
            .static_method("valueOf", fqn, &["java.lang.String"])
            .static_method("toString", "java.lang.String", &[primitive])
            .method("compareTo", "int", &[fqn])
            .register(reg);
    }

    T::class("java.lang.Boolean")
        .modifiers(&["public", "final"])
        .implements("java.io.Serializable")
        .implements("java.lang.Comparable<java.lang.Boolean>")
        .static_field("TRUE", "java.lang.Boolean")
        .static_field("FALSE", "java.lang.Boolean")
        .method("booleanValue", "boolean", &[])
        .static_method("parseBoolean", "boolean", &["java.lang.String"])
        .static_method("valueOf", "java.lang.Boolean", &["boolean"])
        .register(reg);

    T::class("java.lang.Character")
        .modifiers(&["public", "final"])
        .implements("java.io.Serializable")
        .implements("java.lang.Comparable<java.lang.Character>")
        .method("charValue", "char", &[])
        .static_method("isDigit", "boolean", &["char"])
        .static_method("isLetter", "boolean", &["char"])
        .static_method("isWhitespace", "boolean", &["char"])
        .static_method("toUpperCase", "char", &["char"])
        .register(reg);

    T::class("java.lang.Void")
        .modifiers(&["public", "final"])
        .register(reg);

    T::class("java.lang.Enum")
        .modifiers(&["public", "abstract"])
        .type_params(&["E extends java.lang.Enum<E>"])
        .implements("java.lang.Comparable<E>")
        .implements("java.io.Serializable")
        .method("name", "java.lang.String", &[])
        .method("ordinal", "int", &[])
        .method("compareTo", "int", &["E"])
        .method("getDeclaringClass", "java.lang.Class<E>", &[])
        .static_generic_method(
            &["T extends java.lang.Enum<T>"],
            "valueOf",
            "T",
            &["java.lang.Class<T>", "java.lang.String"],
        )
        .register(reg);

    T::class("java.lang.Math")
        .modifiers(&["public", "final"])
        .static_field("PI", "double")
        .static_field("E", "double")
        .static_method("abs", "int", &["int"])
        .static_method("abs", "double", &["double"])
        .static_method("max", "int", &["int", "int"])
        .static_method("max", "long", &["long", "long"])
        .static_method("max", "double", &["double", "double"])
        .static_method("min", "int", &["int", "int"])
        .static_method("min", "double", &["double", "double"])
        .static_method("pow", "double", &["double", "double"])
        .static_method("sqrt", "double", &["double"])
        .static_method("round", "long", &["double"])
        .static_method("floor", "double", &["double"])
        .static_method("ceil", "double", &["double"])
        .static_method("random", "double", &[])
        .register(reg);

    T::class("java.lang.System")
        .modifiers(&["public", "final"])
        .static_field("out", "java.io.PrintStream")
        .static_field("err", "java.io.PrintStream")
        .static_field("in", "java.io.InputStream")
        .static_method("currentTimeMillis", "long", &[])
        .static_method("nanoTime", "long", &[])
        .static_method("getProperty", "java.lang.String", &["java.lang.String"])
        .static_method("getenv", "java.lang.String", &["java.lang.String"])
        .static_method("exit", "void", &["int"])
        .register(reg);

    T::class("java.lang.Thread")
        .implements("java.lang.Runnable")
        .method("start", "void", &[])
        .method("run", "void", &[])
        .method("getName", "java.lang.String", &[])
        .method("join", "void", &[])
        .static_method("currentThread", "java.lang.Thread", &[])
        .static_method("sleep", "void", &["long"])
        .register(reg);

    T::class("java.lang.Throwable")
        .implements("java.io.Serializable")
        .method("getMessage", "java.lang.String", &[])
        .method("getCause", "java.lang.Throwable", &[])
        .method("printStackTrace", "void", &[])
        .register(reg);
    T::class("java.lang.Exception")
        .extends("java.lang.Throwable")
        .register(reg);
    T::class("java.lang.RuntimeException")
        .extends("java.lang.Exception")
        .register(reg);
    T::class("java.lang.IllegalArgumentException")
        .extends("java.lang.RuntimeException")
        .register(reg);
    T::class("java.lang.IllegalStateException")
        .extends("java.lang.RuntimeException")
        .register(reg);
    T::class("java.lang.NullPointerException")
        .extends("java.lang.RuntimeException")
        .register(reg);
    T::class("java.lang.UnsupportedOperationException")
        .extends("java.lang.RuntimeException")
        .register(reg);
    T::class("java.lang.Error")
        .extends("java.lang.Throwable")
        .register(reg);

    T::annotation("java.lang.Override")
        .targets(&[ElementTarget::Method])
        .register(reg);
    T::annotation("java.lang.Deprecated").register(reg);
    T::annotation("java.lang.SuppressWarnings")
        .targets(&[
            ElementTarget::Type,
            ElementTarget::Field,
            ElementTarget::Method,
            ElementTarget::Parameter,
            ElementTarget::Constructor,
            ElementTarget::LocalVariable,
        ])
        .method("value", "java.lang.String[]", &[])
        .register(reg);
    T::annotation("java.lang.FunctionalInterface")
        .targets(&[ElementTarget::Type])
        .register(reg);
}

fn java_lang_annotation(reg: &mut TypeRegistry) {
    T::interface("java.lang.annotation.Annotation")
        .method("annotationType", "java.lang.Class", &[])
        .register(reg);

    let mut element_type = T::enumeration("java.lang.annotation.ElementType");
    for target in [
        ElementTarget::Type,
        ElementTarget::Field,
        ElementTarget::Method,
        ElementTarget::Parameter,
        ElementTarget::Constructor,
        ElementTarget::LocalVariable,
        ElementTarget::AnnotationType,
        ElementTarget::Package,
    ] {
        element_type = element_type.static_field(target.constant(), "java.lang.annotation.ElementType");
    }
    element_type.register(reg);

    T::enumeration("java.lang.annotation.RetentionPolicy")
        .static_field("SOURCE", "java.lang.annotation.RetentionPolicy")
        .static_field("CLASS", "java.lang.annotation.RetentionPolicy")
        .static_field("RUNTIME", "java.lang.annotation.RetentionPolicy")
        .register(reg);

    T::annotation("java.lang.annotation.Target")
        .targets(&[ElementTarget::AnnotationType])
        .method("value", "java.lang.annotation.ElementType[]", &[])
        .register(reg);
    T::annotation("java.lang.annotation.Retention")
        .targets(&[ElementTarget::AnnotationType])
        .method("value", "java.lang.annotation.RetentionPolicy", &[])
        .register(reg);
    T::annotation("java.lang.annotation.Documented")
        .targets(&[ElementTarget::AnnotationType])
        .register(reg);
    T::annotation("java.lang.annotation.Inherited")
        .targets(&[ElementTarget::AnnotationType])
        .register(reg);
}

fn java_lang_ref(reg: &mut TypeRegistry) {
    T::class("java.lang.ref.Reference")
        .modifiers(&["public", "abstract"])
        .type_params(&["T"])
        .method("get", "T", &[])
        .method("clear", "void", &[])
        .register(reg);
    T::class("java.lang.ref.WeakReference")
        .type_params(&["T"])
        .extends("java.lang.ref.Reference<T>")
        .register(reg);
    T::class("java.lang.ref.SoftReference")
        .type_params(&["T"])
        .extends("java.lang.ref.Reference<T>")
        .register(reg);
}

fn java_util(reg: &mut TypeRegistry) {
    T::interface("java.util.Iterator")
        .type_params(&["E"])
        .method("hasNext", "boolean", &[])
        .method("next", "E", &[])
        .method("remove", "void", &[])
        .register(reg);
    T::interface("java.util.ListIterator")
        .type_params(&["E"])
        .extends("java.util.Iterator<E>")
        .method("hasPrevious", "boolean", &[])
        .method("previous", "E", &[])
        .method("nextIndex", "int", &[])
        .register(reg);
    T::interface("java.util.Enumeration")
        .type_params(&["E"])
        .method("hasMoreElements", "boolean", &[])
        .method("nextElement", "E", &[])
        .register(reg);

    T::interface("java.util.Collection")
        .type_params(&["E"])
        .extends("java.lang.Iterable<E>")
        .method("size", "int", &[])
        .method("isEmpty", "boolean", &[])
        .method("contains", "boolean", &["java.lang.Object"])
        .method("iterator", "java.util.Iterator<E>", &[])
        .method("add", "boolean", &["E"])
        .method("remove", "boolean", &["java.lang.Object"])
        .method("addAll", "boolean", &["java.util.Collection<? extends E>"])
        .method("removeAll", "boolean", &["java.util.Collection<?>"])
        .method("containsAll", "boolean", &["java.util.Collection<?>"])
        .method("clear", "void", &[])
        .method("toArray", "java.lang.Object[]", &[])
        .generic_method(&["T"], "toArray", "T[]", &["T[]"])
        .register(reg);

    T::interface("java.util.List")
        .type_params(&["E"])
        .extends("java.util.Collection<E>")
        .method("get", "E", &["int"])
        .method("set", "E", &["int", "E"])
        .method("add", "void", &["int", "E"])
        .method("remove", "E", &["int"])
        .method("indexOf", "int", &["java.lang.Object"])
        .method("lastIndexOf", "int", &["java.lang.Object"])
        .method("subList", "java.util.List<E>", &["int", "int"])
        .method("listIterator", "java.util.ListIterator<E>", &[])
        .method("iterator", "java.util.Iterator<E>", &[])
        .register(reg);

    T::interface("java.util.Set")
        .type_params(&["E"])
        .extends("java.util.Collection<E>")
        .method("iterator", "java.util.Iterator<E>", &[])
        .register(reg);
    T::interface("java.util.SortedSet")
        .type_params(&["E"])
        .extends("java.util.Set<E>")
        .method("first", "E", &[])
        .method("last", "E", &[])
        .method("headSet", "java.util.SortedSet<E>", &["E"])
        .method("tailSet", "java.util.SortedSet<E>", &["E"])
        .register(reg);
    T::interface("java.util.Queue")
        .type_params(&["E"])
        .extends("java.util.Collection<E>")
        .method("peek", "E", &[])
        .method("poll", "E", &[])
        .method("element", "E", &[])
        .method("offer", "boolean", &["E"])
        .register(reg);
    T::interface("java.util.Deque")
        .type_params(&["E"])
        .extends("java.util.Queue<E>")
        .method("push", "void", &["E"])
        .method("pop", "E", &[])
        .method("peekFirst", "E", &[])
        .method("peekLast", "E", &[])
        .method("getFirst", "E", &[])
        .method("getLast", "E", &[])
        .register(reg);
    T::interface("java.util.RandomAccess").register(reg);

    T::interface("java.util.Map")
        .type_params(&["K", "V"])
        .method("size", "int", &[])
        .method("isEmpty", "boolean", &[])
        .method("get", "V", &["java.lang.Object"])
        .method("put", "V", &["K", "V"])
        .method("remove", "V", &["java.lang.Object"])
        .method("containsKey", "boolean", &["java.lang.Object"])
        .method("containsValue", "boolean", &["java.lang.Object"])
        .method("putAll", "void", &["java.util.Map<? extends K,? extends V>"])
        .method("clear", "void", &[])
        .method("keySet", "java.util.Set<K>", &[])
        .method("values", "java.util.Collection<V>", &[])
        .method("entrySet", "java.util.Set<java.util.Map$Entry<K,V>>", &[])
        .method("getOrDefault", "V", &["java.lang.Object", "V"])
        .register(reg);
    T::interface("java.util.Map$Entry")
        .type_params(&["K", "V"])
        .method("getKey", "K", &[])
        .method("getValue", "V", &[])
        .method("setValue", "V", &["V"])
        .register(reg);
    T::interface("java.util.SortedMap")
        .type_params(&["K", "V"])
        .extends("java.util.Map<K,V>")
        .method("firstKey", "K", &[])
        .method("lastKey", "K", &[])
        .method("headMap", "java.util.SortedMap<K,V>", &["K"])
        .method("tailMap", "java.util.SortedMap<K,V>", &["K"])
        .register(reg);

    T::class("java.util.AbstractCollection")
        .modifiers(&["public", "abstract"])
        .type_params(&["E"])
        .implements("java.util.Collection<E>")
        .register(reg);
    T::class("java.util.AbstractList")
        .modifiers(&["public", "abstract"])
        .type_params(&["E"])
        .extends("java.util.AbstractCollection<E>")
        .implements("java.util.List<E>")
        .register(reg);
    T::class("java.util.AbstractSequentialList")
        .modifiers(&["public", "abstract"])
        .type_params(&["E"])
        .extends("java.util.AbstractList<E>")
        .register(reg);
    T::class("java.util.ArrayList")
        .type_params(&["E"])
        .extends("java.util.AbstractList<E>")
        .implements("java.util.List<E>")
        .implements("java.util.RandomAccess")
        .implements("java.lang.Cloneable")
        .implements("java.io.Serializable")
        .method("ensureCapacity", "void", &["int"])
        .method("trimToSize", "void", &[])
        .register(reg);
    T::class("java.util.LinkedList")
        .type_params(&["E"])
        .extends("java.util.AbstractSequentialList<E>")
        .implements("java.util.List<E>")
        .implements("java.util.Deque<E>")
        .implements("java.lang.Cloneable")
        .implements("java.io.Serializable")
        .method("addFirst", "void", &["E"])
        .method("addLast", "void", &["E"])
        .method("removeFirst", "E", &[])
        .method("removeLast", "E", &[])
        .register(reg);
    T::class("java.util.Vector")
        .type_params(&["E"])
        .extends("java.util.AbstractList<E>")
        .implements("java.util.List<E>")
        .implements("java.util.RandomAccess")
        .method("elements", "java.util.Enumeration<E>", &[])
        .method("elementAt", "E", &["int"])
        .register(reg);
    T::class("java.util.Stack")
        .type_params(&["E"])
        .extends("java.util.Vector<E>")
        .method("push", "E", &["E"])
        .method("pop", "E", &[])
        .method("peek", "E", &[])
        .register(reg);

    T::class("java.util.AbstractSet")
        .modifiers(&["public", "abstract"])
        .type_params(&["E"])
        .extends("java.util.AbstractCollection<E>")
        .implements("java.util.Set<E>")
        .register(reg);
    T::class("java.util.HashSet")
        .type_params(&["E"])
        .extends("java.util.AbstractSet<E>")
        .implements("java.util.Set<E>")
        .implements("java.lang.Cloneable")
        .implements("java.io.Serializable")
        .register(reg);
    T::class("java.util.LinkedHashSet")
        .type_params(&["E"])
        .extends("java.util.HashSet<E>")
        .implements("java.util.Set<E>")
        .register(reg);
    T::class("java.util.TreeSet")
        .type_params(&["E"])
        .extends("java.util.AbstractSet<E>")
        .implements("java.util.SortedSet<E>")
        .implements("java.lang.Cloneable")
        .implements("java.io.Serializable")
        .register(reg);

    T::class("java.util.AbstractMap")
        .modifiers(&["public", "abstract"])
        .type_params(&["K", "V"])
        .implements("java.util.Map<K,V>")
        .register(reg);
    T::class("java.util.HashMap")
        .type_params(&["K", "V"])
        .extends("java.util.AbstractMap<K,V>")
        .implements("java.util.Map<K,V>")
        .implements("java.lang.Cloneable")
        .implements("java.io.Serializable")
        .register(reg);
    T::class("java.util.LinkedHashMap")
        .type_params(&["K", "V"])
        .extends("java.util.HashMap<K,V>")
        .implements("java.util.Map<K,V>")
        .register(reg);
    T::class("java.util.TreeMap")
        .type_params(&["K", "V"])
        .extends("java.util.AbstractMap<K,V>")
        .implements("java.util.SortedMap<K,V>")
        .implements("java.lang.Cloneable")
        .implements("java.io.Serializable")
        .register(reg);
    T::class("java.util.Dictionary")
        .modifiers(&["public", "abstract"])
        .type_params(&["K", "V"])
        .method("keys", "java.util.Enumeration<K>", &[])
        .method("elements", "java.util.Enumeration<V>", &[])
        .register(reg);
    T::class("java.util.Hashtable")
        .type_params(&["K", "V"])
        .extends("java.util.Dictionary<K,V>")
        .implements("java.util.Map<K,V>")
        .implements("java.lang.Cloneable")
        .implements("java.io.Serializable")
        .register(reg);
    T::class("java.util.Properties")
        .extends("java.util.Hashtable<java.lang.Object,java.lang.Object>")
        .method("getProperty", "java.lang.String", &["java.lang.String"])
        .method("setProperty", "java.lang.Object", &["java.lang.String", "java.lang.String"])
        .method("load", "void", &["java.io.InputStream"])
        .register(reg);

    T::interface("java.util.Comparator")
        .type_params(&["T"])
        .method("compare", "int", &["T", "T"])
        .register(reg);

    T::class("java.util.Date")
        .implements("java.io.Serializable")
        .implements("java.lang.Cloneable")
        .implements("java.lang.Comparable<java.util.Date>")
        .method("getTime", "long", &[])
        .method("setTime", "void", &["long"])
        .method("before", "boolean", &["java.util.Date"])
        .method("after", "boolean", &["java.util.Date"])
        .method("compareTo", "int", &["java.util.Date"])
        .register(reg);

    T::class("java.util.Random")
        .implements("java.io.Serializable")
        .method("nextInt", "int", &[])
        .method("nextInt", "int", &["int"])
        .method("nextDouble", "double", &[])
        .method("nextBoolean", "boolean", &[])
        .register(reg);

    T::class("java.util.Collections")
        .static_generic_method(&["T"], "emptyList", "java.util.List<T>", &[])
        .static_generic_method(&["T"], "emptySet", "java.util.Set<T>", &[])
        .static_generic_method(&["K", "V"], "emptyMap", "java.util.Map<K,V>", &[])
        .static_generic_method(&["T"], "singletonList", "java.util.List<T>", &["T"])
        .static_generic_method(&["T"], "singleton", "java.util.Set<T>", &["T"])
        .static_generic_method(&["T"], "unmodifiableList", "java.util.List<T>", &["java.util.List<? extends T>"])
        .static_generic_method(&["T"], "unmodifiableSet", "java.util.Set<T>", &["java.util.Set<? extends T>"])
        .static_generic_method(
            &["K", "V"],
            "unmodifiableMap",
            "java.util.Map<K,V>",
            &["java.util.Map<? extends K,? extends V>"],
        )
        .static_generic_method(
            &["T extends java.lang.Comparable<? super T>"],
            "sort",
            "void",
            &["java.util.List<T>"],
        )
        .static_generic_method(&["T"], "max", "T", &["java.util.Collection<? extends T>"])
        .static_generic_method(&["T"], "min", "T", &["java.util.Collection<? extends T>"])
        .static_method("reverse", "void", &["java.util.List<?>"])
        .register(reg);

    T::class("java.util.Arrays")
        .static_generic_method(&["T"], "asList", "java.util.List<T>", &["T..."])
        .static_method("toString", "java.lang.String", &["java.lang.Object[]"])
        .static_method("sort", "void", &["java.lang.Object[]"])
        .register(reg);

    T::class("java.util.Objects")
        .modifiers(&["public", "final"])
        .static_method("equals", "boolean", &["java.lang.Object", "java.lang.Object"])
        .static_method("hash", "int", &["java.lang.Object..."])
        .static_generic_method(&["T"], "requireNonNull", "T", &["T"])
        .register(reg);

    T::class("java.util.UUID")
        .modifiers(&["public", "final"])
        .implements("java.io.Serializable")
        .implements("java.lang.Comparable<java.util.UUID>")
        .static_method("randomUUID", "java.util.UUID", &[])
        .register(reg);
}

fn java_io(reg: &mut TypeRegistry) {
    T::interface("java.io.Serializable").register(reg);
    T::interface("java.io.Closeable")
        .extends("java.lang.AutoCloseable")
        .method("close", "void", &[])
        .register(reg);
    T::interface("java.io.Flushable")
        .method("flush", "void", &[])
        .register(reg);

    T::class("java.io.InputStream")
        .modifiers(&["public", "abstract"])
        .implements("java.io.Closeable")
        .method("read", "int", &[])
        .method("read", "int", &["byte[]"])
        .method("available", "int", &[])
        .method("skip", "long", &["long"])
        .method("close", "void", &[])
        .register(reg);
    T::class("java.io.FilterInputStream")
        .extends("java.io.InputStream")
        .register(reg);
    T::class("java.io.BufferedInputStream")
        .extends("java.io.FilterInputStream")
        .register(reg);
    T::class("java.io.DataInputStream")
        .extends("java.io.FilterInputStream")
        .method("readInt", "int", &[])
        .method("readLong", "long", &[])
        .method("readBoolean", "boolean", &[])
        .method("readUTF", "java.lang.String", &[])
        .register(reg);
    T::class("java.io.FileInputStream")
        .extends("java.io.InputStream")
        .register(reg);
    T::class("java.io.ByteArrayInputStream")
        .extends("java.io.InputStream")
        .register(reg);

    T::class("java.io.OutputStream")
        .modifiers(&["public", "abstract"])
        .implements("java.io.Closeable")
        .implements("java.io.Flushable")
        .method("write", "void", &["int"])
        .method("write", "void", &["byte[]"])
        .register(reg);
    T::class("java.io.FilterOutputStream")
        .extends("java.io.OutputStream")
        .register(reg);
    T::class("java.io.PrintStream")
        .extends("java.io.FilterOutputStream")
        .implements("java.lang.Appendable")
        .method("println", "void", &[])
        .method("println", "void", &["java.lang.Object"])
        .method("print", "void", &["java.lang.Object"])
        .method("printf", "java.io.PrintStream", &["java.lang.String", "java.lang.Object..."])
        .register(reg);
    T::class("java.io.ByteArrayOutputStream")
        .extends("java.io.OutputStream")
        .method("toByteArray", "byte[]", &[])
        .method("size", "int", &[])
        .register(reg);
    T::class("java.io.FileOutputStream")
        .extends("java.io.OutputStream")
        .register(reg);

    T::class("java.io.Reader")
        .modifiers(&["public", "abstract"])
        .implements("java.io.Closeable")
        .method("read", "int", &[])
        .method("ready", "boolean", &[])
        .register(reg);
    T::class("java.io.BufferedReader")
        .extends("java.io.Reader")
        .method("readLine", "java.lang.String", &[])
        .register(reg);
    T::class("java.io.InputStreamReader")
        .extends("java.io.Reader")
        .method("getEncoding", "java.lang.String", &[])
        .register(reg);
    T::class("java.io.FileReader")
        .extends("java.io.InputStreamReader")
        .register(reg);
    T::class("java.io.StringReader")
        .extends("java.io.Reader")
        .register(reg);

    T::class("java.io.Writer")
        .modifiers(&["public", "abstract"])
        .implements("java.lang.Appendable")
        .implements("java.io.Closeable")
        .implements("java.io.Flushable")
        .method("write", "void", &["java.lang.String"])
        .register(reg);
    T::class("java.io.BufferedWriter")
        .extends("java.io.Writer")
        .method("newLine", "void", &[])
        .register(reg);
    T::class("java.io.PrintWriter")
        .extends("java.io.Writer")
        .method("println", "void", &["java.lang.Object"])
        .method("print", "void", &["java.lang.Object"])
        .register(reg);
    T::class("java.io.StringWriter")
        .extends("java.io.Writer")
        .method("getBuffer", "java.lang.StringBuffer", &[])
        .register(reg);

    T::class("java.io.File")
        .implements("java.io.Serializable")
        .implements("java.lang.Comparable<java.io.File>")
        .static_field("separator", "java.lang.String")
        .method("getName", "java.lang.String", &[])
        .method("getPath", "java.lang.String", &[])
        .method("getAbsolutePath", "java.lang.String", &[])
        .method("getParent", "java.lang.String", &[])
        .method("getParentFile", "java.io.File", &[])
        .method("exists", "boolean", &[])
        .method("isDirectory", "boolean", &[])
        .method("isFile", "boolean", &[])
        .method("length", "long", &[])
        .method("delete", "boolean", &[])
        .method("mkdirs", "boolean", &[])
        .method("list", "java.lang.String[]", &[])
        .method("listFiles", "java.io.File[]", &[])
        .method("toURI", "java.net.URI", &[])
        .register(reg);

    T::class("java.io.IOException")
        .extends("java.lang.Exception")
        .register(reg);
    T::class("java.io.FileNotFoundException")
        .extends("java.io.IOException")
        .register(reg);
}

fn java_net(reg: &mut TypeRegistry) {
    T::class("java.net.URL")
        .modifiers(&["public", "final"])
        .implements("java.io.Serializable")
        .method("openStream", "java.io.InputStream", &[])
        .method("getHost", "java.lang.String", &[])
        .method("getPort", "int", &[])
        .method("getPath", "java.lang.String", &[])
        .method("getProtocol", "java.lang.String", &[])
        .method("toURI", "java.net.URI", &[])
        .register(reg);
    T::class("java.net.URI")
        .modifiers(&["public", "final"])
        .implements("java.io.Serializable")
        .implements("java.lang.Comparable<java.net.URI>")
        .method("getHost", "java.lang.String", &[])
        .method("getPath", "java.lang.String", &[])
        .method("getScheme", "java.lang.String", &[])
        .method("toURL", "java.net.URL", &[])
        .static_method("create", "java.net.URI", &["java.lang.String"])
        .register(reg);
}

fn java_math(reg: &mut TypeRegistry) {
    T::class("java.math.BigDecimal")
        .extends("java.lang.Number")
        .implements("java.lang.Comparable<java.math.BigDecimal>")
        .static_field("ZERO", "java.math.BigDecimal")
        .static_field("ONE", "java.math.BigDecimal")
        .method("add", "java.math.BigDecimal", &["java.math.BigDecimal"])
        .method("subtract", "java.math.BigDecimal", &["java.math.BigDecimal"])
        .method("multiply", "java.math.BigDecimal", &["java.math.BigDecimal"])
        .method("divide", "java.math.BigDecimal", &["java.math.BigDecimal"])
        .method("negate", "java.math.BigDecimal", &[])
        .method("scale", "int", &[])
        .method("setScale", "java.math.BigDecimal", &["int"])
        .method("toBigInteger", "java.math.BigInteger", &[])
        .method("compareTo", "int", &["java.math.BigDecimal"])
        .static_method("valueOf", "java.math.BigDecimal", &["double"])
        .register(reg);
    T::class("java.math.BigInteger")
        .extends("java.lang.Number")
        .implements("java.lang.Comparable<java.math.BigInteger>")
        .static_field("ZERO", "java.math.BigInteger")
        .static_field("ONE", "java.math.BigInteger")
        .method("add", "java.math.BigInteger", &["java.math.BigInteger"])
        .method("subtract", "java.math.BigInteger", &["java.math.BigInteger"])
        .method("multiply", "java.math.BigInteger", &["java.math.BigInteger"])
        .method("mod", "java.math.BigInteger", &["java.math.BigInteger"])
        .method("pow", "java.math.BigInteger", &["int"])
        .method("compareTo", "int", &["java.math.BigInteger"])
        .static_method("valueOf", "java.math.BigInteger", &["long"])
        .register(reg);
}

fn groovy_lang(reg: &mut TypeRegistry) {
    T::interface("groovy.lang.GroovyObject")
        .method("getProperty", "java.lang.Object", &["java.lang.String"])
        .method("setProperty", "void", &["java.lang.String", "java.lang.Object"])
        .method("invokeMethod", "java.lang.Object", &["java.lang.String", "java.lang.Object"])
        .method("getMetaClass", "groovy.lang.MetaClass", &[])
        .method("setMetaClass", "void", &["groovy.lang.MetaClass"])
        .register(reg);
    T::interface("groovy.lang.MetaClass")
        .method("getTheClass", "java.lang.Class", &[])
        .method("respondsTo", "java.util.List", &["java.lang.Object", "java.lang.String"])
        .method("hasProperty", "groovy.lang.MetaProperty", &["java.lang.Object", "java.lang.String"])
        .register(reg);
    T::class("groovy.lang.MetaProperty")
        .modifiers(&["public", "abstract"])
        .method("getName", "java.lang.String", &[])
        .method("getType", "java.lang.Class", &[])
        .register(reg);
    T::class("groovy.lang.GroovyObjectSupport")
        .modifiers(&["public", "abstract"])
        .implements("groovy.lang.GroovyObject")
        .register(reg);

    T::class("groovy.lang.Binding")
        .extends("groovy.lang.GroovyObjectSupport")
        .method("getVariable", "java.lang.Object", &["java.lang.String"])
        .method("setVariable", "void", &["java.lang.String", "java.lang.Object"])
        .method("hasVariable", "boolean", &["java.lang.String"])
        .method("getVariables", "java.util.Map", &[])
        .register(reg);
    T::class("groovy.lang.Script")
        .modifiers(&["public", "abstract"])
        .extends("groovy.lang.GroovyObjectSupport")
        .method("run", "java.lang.Object", &[])
        .method("getBinding", "groovy.lang.Binding", &[])
        .method("setBinding", "void", &["groovy.lang.Binding"])
        .method("evaluate", "java.lang.Object", &["java.lang.String"])
        .method("println", "void", &[])
        .method("println", "void", &["java.lang.Object"])
        .method("print", "void", &["java.lang.Object"])
        .method("printf", "void", &["java.lang.String", "java.lang.Object..."])
        .register(reg);

    T::class("groovy.lang.Closure")
        .modifiers(&["public", "abstract"])
        .type_params(&["V"])
        .extends("groovy.lang.GroovyObjectSupport")
        .implements("java.lang.Cloneable")
        .implements("java.lang.Runnable")
        .implements("java.io.Serializable")
        .method("call", "V", &["java.lang.Object..."])
        .method("curry", "groovy.lang.Closure<V>", &["java.lang.Object..."])
        .method("getMaximumNumberOfParameters", "int", &[])
        .method("getParameterTypes", "java.lang.Class[]", &[])
        .method("getDelegate", "java.lang.Object", &[])
        .method("setDelegate", "void", &["java.lang.Object"])
        .method("getOwner", "java.lang.Object", &[])
        .method("getThisObject", "java.lang.Object", &[])
        .method("setResolveStrategy", "void", &["int"])
        .method("memoize", "groovy.lang.Closure<V>", &[])
        .method("run", "void", &[])
        .static_field("DELEGATE_FIRST", "int")
        .static_field("OWNER_FIRST", "int")
        .register(reg);

    T::interface("groovy.lang.Range")
        .type_params(&["T extends java.lang.Comparable"])
        .extends("java.util.List<T>")
        .method("getFrom", "T", &[])
        .method("getTo", "T", &[])
        .method("isReverse", "boolean", &[])
        .method("containsWithinBounds", "boolean", &["java.lang.Object"])
        .method("step", "java.util.List<T>", &["int"])
        .method("inspect", "java.lang.String", &[])
        .register(reg);
    T::class("groovy.lang.IntRange")
        .extends("java.util.AbstractList<java.lang.Integer>")
        .implements("groovy.lang.Range<java.lang.Integer>")
        .method("getFromInt", "int", &[])
        .method("getToInt", "int", &[])
        .register(reg);
    T::class("groovy.lang.ObjectRange")
        .extends("java.util.AbstractList<java.lang.Comparable>")
        .implements("groovy.lang.Range<java.lang.Comparable>")
        .register(reg);

    T::class("groovy.lang.GString")
        .modifiers(&["public", "abstract"])
        .extends("groovy.lang.GroovyObjectSupport")
        .implements("java.lang.Comparable")
        .implements("java.lang.CharSequence")
        .implements("java.io.Serializable")
        .method("getValues", "java.lang.Object[]", &[])
        .method("getStrings", "java.lang.String[]", &[])
        .register(reg);
    T::class("groovy.lang.Tuple")
        .extends("java.util.AbstractList<java.lang.Object>")
        .register(reg);
    T::class("groovy.lang.Tuple2")
        .type_params(&["T1", "T2"])
        .extends("groovy.lang.Tuple")
        .method("getFirst", "T1", &[])
        .method("getSecond", "T2", &[])
        .register(reg);
    T::class("groovy.lang.MissingMethodException")
        .extends("java.lang.RuntimeException")
        .register(reg);
    T::class("groovy.lang.MissingPropertyException")
        .extends("java.lang.RuntimeException")
        .register(reg);

    T::annotation("groovy.lang.Grab")
        .targets(&[
            ElementTarget::Type,
            ElementTarget::Method,
            ElementTarget::Field,
            ElementTarget::LocalVariable,
            ElementTarget::Constructor,
            ElementTarget::Parameter,
            ElementTarget::Package,
        ])
        .register(reg);
    T::annotation("groovy.lang.Delegate")
        .targets(&[ElementTarget::Field])
        .register(reg);
    T::annotation("groovy.lang.Lazy")
        .targets(&[ElementTarget::Field])
        .register(reg);
    T::annotation("groovy.lang.Singleton")
        .targets(&[ElementTarget::Type])
        .register(reg);
    T::annotation("groovy.lang.DelegatesTo")
        .targets(&[ElementTarget::Parameter])
        .register(reg);
}

fn groovy_transform(reg: &mut TypeRegistry) {
    let type_or_method = [ElementTarget::Type, ElementTarget::Method, ElementTarget::Constructor];
    T::annotation("groovy.transform.CompileStatic")
        .targets(&type_or_method)
        .register(reg);
    T::annotation("groovy.transform.CompileDynamic")
        .targets(&type_or_method)
        .register(reg);
    T::annotation("groovy.transform.TypeChecked")
        .targets(&type_or_method)
        .register(reg);
    for name in ["ToString", "EqualsAndHashCode", "Canonical", "Immutable", "TupleConstructor", "InheritConstructors"] {
        T::annotation(&format!("groovy.transform.{}", name))
            .targets(&[ElementTarget::Type])
            .register(reg);
    }
    T::annotation("groovy.transform.Field")
        .targets(&[ElementTarget::LocalVariable])
        .register(reg);
    T::annotation("groovy.transform.Memoized")
        .targets(&[ElementTarget::Method])
        .register(reg);
    T::annotation("groovy.transform.Synchronized")
        .targets(&[ElementTarget::Method])
        .register(reg);
}

fn groovy_util(reg: &mut TypeRegistry) {
    T::class("groovy.util.Expando")
        .extends("groovy.lang.GroovyObjectSupport")
        .method("getProperties", "java.util.Map", &[])
        .register(reg);
    T::class("groovy.util.Eval")
        .static_method("me", "java.lang.Object", &["java.lang.String"])
        .static_method("x", "java.lang.Object", &["java.lang.Object", "java.lang.String"])
        .register(reg);
    T::class("groovy.util.ConfigObject")
        .extends("java.util.LinkedHashMap<java.lang.Object,java.lang.Object>")
        .method("flatten", "java.util.Map", &[])
        .method("toProperties", "java.util.Properties", &[])
        .register(reg);
    T::class("groovy.util.ConfigSlurper")
        .method("parse", "groovy.util.ConfigObject", &["java.lang.String"])
        .register(reg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{GroovyTypeSystem, InheritanceProvider, TypeProvider};

    #[test]
    fn every_supertype_is_declared() {
        let reg = jdk_registry();
        for fqn in reg.type_names() {
            for ancestor in reg.walk_ancestors(fqn) {
                assert!(reg.has_type(&ancestor), "{} extends undeclared {}", fqn, ancestor);
            }
        }
    }

    #[test]
    fn streams_reach_input_stream() {
        let reg = jdk_registry();
        let ancestors: Vec<String> = reg.walk_ancestors("java.io.DataInputStream").collect();
        assert_eq!(ancestors[0], "java.io.FilterInputStream");
        assert!(ancestors.contains(&"java.io.InputStream".to_string()));
    }

    #[test]
    fn interfaces_still_see_object_members() {
        let reg = jdk_registry();
        let members = reg.find_member_in_hierarchy("java.util.List", "toString");
        assert_eq!(members[0].declaring_type, "java.lang.Object");
    }
}

mod common;

use common::{assert_type, assert_type_of_all, assert_type_with_units};

const XX: &str = "class XX {\nXX[] xx\nXX yy\n}";

fn assert_with_xx(contents: &str, needle: &str, expected: &str) {
    assert_type_with_units(&[("XX.groovy", XX)], contents, needle, expected);
}

// ---------------------------------------------------------------
// Lists and sets
// ---------------------------------------------------------------

#[test]
fn constructor_keeps_type_arguments() {
    assert_type_of_all("new LinkedList<String>()", "java.util.LinkedList<java.lang.String>");
    assert_type("def x = new LinkedList<String>()\nx", "x", "java.util.LinkedList<java.lang.String>");
}

#[test]
fn list_literals_take_the_first_element_type() {
    assert_type("def x = [ '' ]\nx", "x", "java.util.List<java.lang.String>");
    assert_type("def x = [ 1 ]\nx", "x", "java.util.List<java.lang.Integer>");
}

#[test]
fn list_methods_substitute_the_element_type() {
    assert_type("[ 1 ].get(0)", "get", "java.lang.Integer");
    assert_type("[ 1 ].iterator()", "iterator", "java.util.Iterator<java.lang.Integer>");
    assert_type("[ 1 ].iterator().next()", "next", "java.lang.Integer");
}

#[test]
fn raw_constructors_stay_raw() {
    assert_type("def x = new LinkedList()\nx", "x", "java.util.LinkedList");
    assert_type("def x = new HashSet()\nx", "x", "java.util.HashSet");
    assert_type_of_all("new HashMap()", "java.util.HashMap");
}

// ---------------------------------------------------------------
// Maps
// ---------------------------------------------------------------

#[test]
fn map_constructors_and_literals() {
    assert_type_of_all(
        "new HashMap<String,Integer>()",
        "java.util.HashMap<java.lang.String,java.lang.Integer>",
    );
    assert_type(
        "def x = new HashMap<String,Integer>()\nx",
        "x",
        "java.util.HashMap<java.lang.String,java.lang.Integer>",
    );
    assert_type_of_all("[ 1:1 ]", "java.util.Map<java.lang.Integer,java.lang.Integer>");
}

#[test]
fn entry_sets_see_map_arguments_through_supertypes() {
    let entries = "java.util.Set<java.util.Map$Entry<java.lang.String,java.lang.Integer>>";
    assert_type("def x = new HashMap<String,Integer>()\nx.entrySet", "entrySet", entries);
    assert_type("Map<String,Integer> x\nx.entrySet().iterator().next().value", "entrySet", entries);
    assert_type(
        "[ 1:1 ].entrySet()",
        "entrySet",
        "java.util.Set<java.util.Map$Entry<java.lang.Integer,java.lang.Integer>>",
    );
}

#[test]
fn entry_keys_and_values() {
    assert_type(
        "def x = new HashMap<String,Integer>()\nx.entrySet().iterator().next().key",
        "key",
        "java.lang.String",
    );
    assert_type(
        "def x = new HashMap<String,Integer>()\nx.entrySet().iterator().next().value",
        "value",
        "java.lang.Integer",
    );
    assert_type("Map<String,Integer> x\nx.entrySet().iterator().next().value", "value", "java.lang.Integer");
}

#[test]
fn script_method_return_types_flow_into_variables() {
    assert_type(
        "Map<Integer, Integer> x() { }\ndef f = x()\nf",
        "f",
        "java.util.Map<java.lang.Integer,java.lang.Integer>",
    );
}

#[test]
fn maps_of_lists() {
    assert_type(
        "Map<String,List<Integer>> x\nx.entrySet().iterator().next().value",
        "value",
        "java.util.List<java.lang.Integer>",
    );
    assert_type(
        "Map<String,List<Integer>> x\nx.entrySet().iterator().next().value.iterator().next()",
        "next",
        "java.lang.Integer",
    );
    assert_type("def x = [1: [1]]\nx.entrySet().iterator().next().key", "key", "java.lang.Integer");
}

#[test]
fn chained_subscripts_on_nested_maps() {
    assert_type(
        "Map<String, Map<Integer, List<Date>>> dataTyped\ndef x = dataTyped      ['foo'][5][2]\nx",
        "x",
        "java.util.Date",
    );
}

// ---------------------------------------------------------------
// Arrays
// ---------------------------------------------------------------

#[test]
fn coerced_arrays() {
    assert_type("def x = [ 1, 2 ] as String[]\nx", "x", "java.lang.String[]");
    assert_type("def x = [ 1, 2 ] as String[]\nx[0].length", "length", "java.lang.Integer");
}

#[test]
fn array_properties_of_other_units() {
    assert_with_xx("new XX().xx", "xx", "XX[]");
    assert_with_xx("new XX().xx[0].yy", "yy", "XX");
    assert_with_xx("new XX().xx[new XX()].yy", "yy", "XX");
    assert_with_xx("new XX().xx[0].xx[9].yy", "yy", "XX");
}

#[test]
fn array_getters_of_other_units() {
    assert_with_xx("new XX().getXx()", "getXx", "XX[]");
    assert_with_xx("new XX().getXx()[0].xx[9].yy", "yy", "XX");
    assert_with_xx("new XX().getXx()[0].getYy()", "getYy", "XX");
    assert_with_xx(
        "new XX().getXx()[0].xx[0].xx[0].xx[0].xx[0].xx[0].xx[0].xx[0].xx[0].xx[0].xx[0].xx[0].xx",
        "xx",
        "XX[]",
    );
    assert_with_xx(
        "new XX().getYy().getYy().getYy().getYy().getYy().getYy().getYy().getYy().getXx()[0].xx[0].xx[0].xx",
        "xx",
        "XX[]",
    );
}

// ---------------------------------------------------------------
// For loops
// ---------------------------------------------------------------

#[test]
fn loops_over_ranges_and_iterators() {
    assert_type("def x = 1..4\nfor (a in x) { \na }", "a", "java.lang.Integer");
    assert_type("for (a in 1..4) { \na }", "a", "java.lang.Integer");
    assert_type("for (a in [1, 2].iterator()) { \na }", "a", "java.lang.Integer");
    assert_type("for (a in (1..4).iterator()) { \na }", "a", "java.lang.Integer");
}

#[test]
fn loops_over_maps_yield_entries() {
    assert_type("for (a in [1 : 1]) { \na.key }", "key", "java.lang.Integer");
    assert_type("for (a in [1 : 1]) { \na.value }", "value", "java.lang.Integer");
}

#[test]
fn loops_over_streams_and_arrays() {
    assert_type("InputStream x\nfor (a in x) { \na }", "a", "java.lang.Byte");
    assert_type("DataInputStream x\nfor (a in x) { \na }", "a", "java.lang.Byte");
    assert_type("Integer[] x\nfor (a in x) { \na }", "a", "java.lang.Integer");
}

#[test]
fn loops_over_properties_and_locals() {
    let contents = "class X {\nList<String> images\n}\ndef sample = new X()\nfor (img in sample.images) {\n    img\n}";
    assert_type(contents, "img", "java.lang.String");

    let contents = "class X {\n public void m() {\n  List<String> ls = new ArrayList<String>();\n  for (foo in ls) {\n   foo\n  }\n }\n}\n";
    assert_type(contents, "foo", "java.lang.String");
}

// ---------------------------------------------------------------
// Closures passed to extension methods
// ---------------------------------------------------------------

#[test]
fn implicit_closure_parameter_is_the_element() {
    assert_type("[''].each { it }", "it", "java.lang.String");
    assert_type("(1..4).find { it }", "it", "java.lang.Integer");
    assert_type("[''].reverseEach { val -> val }", "val", "java.lang.String");
}

#[test]
fn map_closures_with_one_parameter_receive_entries() {
    assert_type("['a':1].unique { it.key }", "key", "java.lang.String");
    assert_type("['a':1].collect { it.value }", "value", "java.lang.Integer");
}

#[test]
fn declared_closure_parameter_types_win() {
    assert_type("[''].reverseEach { Integer val -> val }", "val", "java.lang.Integer");
    assert_type("[''].reverseEach { Integer it -> it }", "it", "java.lang.Integer");
}

#[test]
fn indexed_iteration() {
    assert_type("[new Date()].eachWithIndex { val, i -> val }", "val", "java.util.Date");
    assert_type("[''].eachWithIndex { val, i -> i }", "i", "java.lang.Integer");
    assert_type("[1:new Date()].eachWithIndex { key, val, i -> val }", "val", "java.util.Date");
    assert_type("[1:new Date()].eachWithIndex { key, val, i -> key }", "key", "java.lang.Integer");
    assert_type("[1:new Date()].eachWithIndex { key, val, i -> i }", "i", "java.lang.Integer");
}

#[test]
fn map_closures_with_two_parameters_receive_keys_and_values() {
    assert_type("[1:new Date()].each { key, val -> key }", "key", "java.lang.Integer");
    assert_type("[1:new Date()].each { key, val -> val }", "val", "java.util.Date");
    assert_type("[1:new Date()].collect { key, val -> key }", "key", "java.lang.Integer");
    assert_type("[1:new Date()].collect { key, val -> val }", "val", "java.util.Date");
    assert_type("[1f: 1d].collectEntries { key, value -> [value, key] } ", "value", "java.lang.Double");
    assert_type("[1f: 1d].collectEntries { key, value -> [value, key] } ", "key", "java.lang.Float");
}

#[test]
fn accumulators_and_comparators() {
    assert_type("[1].inject { a, b -> a }", "a", "java.lang.Integer");
    assert_type("[1].inject { a, b -> b }", "b", "java.lang.Integer");
    assert_type("[1].unique { a, b -> b }", "b", "java.lang.Integer");
    assert_type("[1].unique { a, b -> a }", "a", "java.lang.Integer");
}

#[test]
fn each_on_non_iterables() {
    assert_type("1.each { it }", "it", "java.lang.Integer");
    assert_type("each { it }", "it", "Search");
    assert_type("1.reverseEach { it }", "it", "java.lang.Integer");
}

// ---------------------------------------------------------------
// Subclasses binding inherited type parameters
// ---------------------------------------------------------------

#[test]
fn fixed_arguments_in_extends_clauses() {
    let contents = "class MyMap extends HashMap<String,Class> { }\nMyMap m\nm.get()";
    assert_type(contents, "get", "java.lang.Class");

    let contents = "class MyMap extends HashMap<String,Class> { }\nMyMap m\nm.entrySet()";
    assert_type(
        contents,
        "entrySet",
        "java.util.Set<java.util.Map$Entry<java.lang.String,java.lang.Class>>",
    );
}

#[test]
fn nested_arguments_in_extends_clauses() {
    let expected = "java.util.Set<java.util.Map$Entry<java.lang.String,java.lang.ref.WeakReference<java.lang.Class>>>";
    let contents = "import java.lang.ref.WeakReference\n\
                    class MyMap<K,V> extends HashMap<K,WeakReference<V>>{ }\n\
                    MyMap<String,Class> m\n\
                    m.entrySet()";
    assert_type(contents, "entrySet", expected);

    let contents = "import java.lang.ref.WeakReference\n\
                    class MyMap<K,V> extends HashMap<K,WeakReference<V>>{ }\n\
                    class MySubMap extends MyMap<String,Class>{ }\n\
                    MySubMap m\n\
                    m.entrySet()";
    assert_type(contents, "entrySet", expected);

    let contents = "import java.lang.ref.WeakReference\n\
                    class MyMap<K,V> extends HashMap<K,WeakReference<List<K>>>{ }\n\
                    class MySubMap extends MyMap<String,Class>{ }\n\
                    MySubMap m\n\
                    m.entrySet()";
    assert_type(
        contents,
        "entrySet",
        "java.util.Set<java.util.Map$Entry<java.lang.String,java.lang.ref.WeakReference<java.util.List<java.lang.String>>>>",
    );
}

#[test]
fn own_type_parameters_of_subclasses() {
    let contents = "import java.lang.ref.WeakReference\n\
                    class MyMap<K,V> extends HashMap<K,WeakReference<V>>{ }\n\
                    class MySubMap<L> extends MyMap<String,Class>{ \n  Map<L,Class> val\n}\n\
                    MySubMap<Integer> m\n\
                    m.val";
    assert_type(contents, "val", "java.util.Map<java.lang.Integer,java.lang.Class>");

    let contents = "class MyMap<K,V> extends HashMap<K,V>{\nMap<V,Class<K>> val}\nMyMap<Integer,Class> m\nm.val";
    assert_type(
        contents,
        "val",
        "java.util.Map<java.lang.Class,java.lang.Class<java.lang.Integer>>",
    );
}

#[test]
fn swapped_arguments_in_extends_clauses() {
    let contents = "class MyMap<K,V> extends HashMap<V,K>{ }\nMyMap<Integer,Class> m\nm.get";
    assert_type(contents, "get", "java.lang.Integer");
}

// ---------------------------------------------------------------
// Collection literals built from inferred values
// ---------------------------------------------------------------

#[test]
fn literals_of_inferred_values() {
    assert_type("def x = 9\ndef xxx = [x]\nxxx", "xxx", "java.util.List<java.lang.Integer>");
    assert_type("def x = 9\ndef xxx = [x, '']\nxxx", "xxx", "java.util.List<java.lang.Integer>");
    assert_type("def x = 9\ndef xxx = [x+9*8, '']\nxxx", "xxx", "java.util.List<java.lang.Integer>");
    assert_type("def x = 9\ndef xxx = x..x\nxxx", "xxx", "groovy.lang.Range<java.lang.Integer>");
    assert_type("def x = 9\ndef xxx = (x*1)..x\nxxx", "xxx", "groovy.lang.Range<java.lang.Integer>");
}

#[test]
fn map_literals_of_inferred_values() {
    let expected = "java.util.Map<java.lang.Integer,java.lang.Boolean>";
    assert_type("def x = 9\ndef y = false\ndef xxx = [(x):y]\nxxx", "xxx", expected);
    assert_type("def x = 9\ndef y = false\ndef xxx = [(x+x):!y]\nxxx", "xxx", expected);
    assert_type("def x = 9\ndef y = false\ndef xxx = [(x+x):!y, a:'a', b:'b']\nxxx", "xxx", expected);
    assert_type(
        "def x = 9\ndef y = false\ndef xxx = [[(x+x):!y, a:'a', b:'b']]\nxxx",
        "xxx",
        "java.util.List<java.util.Map<java.lang.Integer,java.lang.Boolean>>",
    );
}

// ---------------------------------------------------------------
// Generic methods
// ---------------------------------------------------------------

#[test]
fn generic_instance_methods_bind_from_class_literals() {
    let contents = "import groovy.transform.CompileStatic\n\
                    class A {\n\
                    \x20   public <T> T myMethod(Class<T> claz) {\n\
                    \x20       return null\n\
                    \x20   }\n\
                    \x20   @CompileStatic\n\
                    \x20   static void main(String[] args) {\n\
                    \x20       A a = new A()\n\
                    \x20       def val = a.myMethod(String)\n\
                    \x20       val.trim()\n\
                    \x20   }\n\
                    }";
    assert_type(contents, "val", "java.lang.String");

    let contents = "class A {\n\
                    \x20   public <T> T myMethod(Class<T> claz) {\n\
                    \x20       return null\n\
                    \x20   }\n\
                    \x20   def m() {\n\
                    \x20       def val = myMethod(String)\n\
                    \x20       val.trim()\n\
                    \x20   }\n\
                    }";
    assert_type(contents, "val", "java.lang.String");
}

#[test]
fn generic_static_methods_bind_from_class_literals() {
    let contents = "class A {\n\
                    \x20   static <T> T myMethod(Class<T> claz) {\n\
                    \x20       return null\n\
                    \x20   }\n\
                    \x20   @groovy.transform.CompileStatic\n\
                    \x20   static void main(String[] args) {\n\
                    \x20       def val = A.myMethod(String)\n\
                    \x20       val.trim()\n\
                    \x20   }\n\
                    }";
    assert_type(contents, "val", "java.lang.String");

    let contents = "class A {\n\
                    \x20   static <T> T myMethod(Class<T> claz) {\n\
                    \x20       return null\n\
                    \x20   }\n\
                    \x20   def m() {\n\
                    \x20       def val = myMethod(String)\n\
                    \x20       val.trim()\n\
                    \x20   }\n\
                    }";
    assert_type(contents, "val", "java.lang.String");
}

#[test]
fn bounded_type_parameters_bind_to_the_argument() {
    let contents = "class A { }\n\
                    class B extends A {}\n\
                    static <T extends A> T loadSomething(T t) {\n\
                    \x20   return t\n\
                    }\n\
                    def val = loadSomething(new B())\n";
    assert_type(contents, "val", "B");
}

#[test]
fn untyped_fields_are_not_inferred_from_initializers() {
    let contents = "class A {}\n\
                    class B extends A {}\n\
                    class C {\n\
                    \x20   static <T extends A> T loadSomething(T t) {\n\
                    \x20       return t\n\
                    \x20   }\n\
                    \x20   def col = loadSomething(new B())\n\
                    \x20   def m() { col }\
                    }\n";
    assert_type(contents, "col", "java.lang.Object");
}

mod common;

use common::{assert_render, assert_render_opts, options};
use pretty_values::{
    commented, render, Bytes, Inspect, SeqKind, Shape, TypeInfo, DICT, LIST,
};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::rc::Rc;

#[test]
fn scalars() {
    assert_render(&42, 79, &["42"]);
    assert_render(&-7i64, 79, &["-7"]);
    assert_render(&u64::MAX, 79, &["18446744073709551615"]);
    assert_render(&true, 79, &["True"]);
    assert_render(&None::<i32>, 79, &["None"]);
    assert_render(&Some(3), 79, &["3"]);
    assert_render(&'x', 79, &["'x'"]);
}

#[test]
fn floats() {
    assert_render(&1.5f64, 79, &["1.5"]);
    assert_render(&2.0f64, 79, &["2.0"]);
    assert_render(&0.1f32, 79, &["0.10000000149011612"]);
    assert_render(&f64::INFINITY, 79, &["float('inf')"]);
    assert_render(&f64::NEG_INFINITY, 79, &["float('-inf')"]);
    assert_render(&f64::NAN, 79, &["float('nan')"]);
}

#[test]
fn strings_and_bytes() {
    assert_render(&"plain", 79, &["'plain'"]);
    assert_render(&"it's", 79, &["\"it's\""]);
    assert_render(&String::from("tab\there"), 79, &["'tab\\there'"]);
    assert_render(&Bytes(vec![0, b'a', 0xff]), 79, &["b'\\x00a\\xff'"]);
}

#[test]
fn empty_containers() {
    assert_render(&Vec::<i32>::new(), 79, &["[]"]);
    assert_render(&(), 79, &["()"]);
    assert_render(&BTreeSet::<i32>::new(), 79, &["set()"]);
    assert_render(&BTreeMap::<i32, i32>::new(), 79, &["{}"]);
}

#[test]
fn tuples() {
    assert_render(&(1,), 79, &["(1,)"]);
    assert_render(&(1, "two", 3.0), 79, &["(1, 'two', 3.0)"]);
}

#[test]
fn sequences_break_one_item_per_line() {
    let greek = vec!["alpha", "beta", "gamma", "delta"];
    assert_render(&greek, 79, &["['alpha', 'beta', 'gamma', 'delta']"]);
    assert_render(
        &greek,
        20,
        &["[", "    'alpha',", "    'beta',", "    'gamma',", "    'delta'", "]"],
    );
}

#[test]
fn nested_sequences() {
    let nested = vec![vec![1, 2, 3], vec![4, 5, 6]];
    assert_render(&nested, 79, &["[[1, 2, 3], [4, 5, 6]]"]);
    assert_render(&nested, 15, &["[", "    [1, 2, 3],", "    [4, 5, 6]", "]"]);
}

#[test]
fn mappings() {
    let mut map = BTreeMap::new();
    map.insert("first", vec![1, 2, 3]);
    map.insert("second", vec![]);
    assert_render(&map, 79, &["{'first': [1, 2, 3], 'second': []}"]);
    assert_render(
        &map,
        24,
        &["{", "    'first': [1, 2, 3],", "    'second': []", "}"],
    );
    assert_render(
        &map,
        20,
        &[
            "{",
            "    'first': [",
            "        1,",
            "        2,",
            "        3",
            "    ],",
            "    'second': []",
            "}",
        ],
    );
}

#[test]
fn unordered_containers_are_sorted() {
    let set = [3, 1, 2].into_iter().collect::<HashSet<_>>();
    assert_render(&set, 79, &["{1, 2, 3}"]);

    let map = [(3, "c"), (1, "a"), (2, "b")]
        .into_iter()
        .collect::<HashMap<_, _>>();
    assert_render(&map, 79, &["{1: 'a', 2: 'b', 3: 'c'}"]);
}

/// A mapping that keeps its entries in insertion order.
struct Pairs(Vec<(&'static str, i32)>);

impl Inspect for Pairs {
    fn type_info(&self) -> &'static TypeInfo {
        &DICT
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Mapping {
            entries: self
                .0
                .iter()
                .map(|(key, value)| (key as &dyn Inspect, value as &dyn Inspect))
                .collect(),
            ordered: true,
        }
    }
}

#[test]
fn sort_keys() {
    let pairs = Pairs(vec![("b", 1), ("c", 2), ("a", 3)]);
    assert_render(&pairs, 79, &["{'b': 1, 'c': 2, 'a': 3}"]);

    let mut sorted = options(79);
    sorted.sort_keys = true;
    assert_render_opts(&pairs, &sorted, &["{'a': 3, 'b': 1, 'c': 2}"]);

    // Sorting happens before truncation.
    sorted.max_seq_len = Some(1);
    assert_render_opts(
        &pairs,
        &sorted,
        &["{", "    'a': 3,", "    # ...and 2 more elements", "}"],
    );
}

#[test]
fn truncation() {
    let items = vec![1, 2, 3, 4, 5];
    let mut opts = options(79);
    opts.max_seq_len = Some(2);
    assert_render_opts(
        &items,
        &opts,
        &["[", "    1,", "    2,", "    # ...and 3 more elements", "]"],
    );

    opts.max_seq_len = None;
    assert_render_opts(&items, &opts, &["[1, 2, 3, 4, 5]"]);

    opts.max_seq_len = Some(5);
    assert_render_opts(&items, &opts, &["[1, 2, 3, 4, 5]"]);

    opts.max_seq_len = Some(0);
    assert_render_opts(&items, &opts, &["[", "    # ...and 5 more elements", "]"]);
}

#[test]
fn max_depth() {
    let nested = vec![vec![1], vec![]];
    let mut opts = options(79);
    opts.max_depth = Some(1);
    assert_render_opts(&nested, &opts, &["[[...], []]"]);
    opts.max_depth = Some(0);
    assert_render_opts(&nested, &opts, &["[...]"]);
    opts.max_depth = Some(2);
    assert_render_opts(&nested, &opts, &["[[1], []]"]);
}

#[test]
fn ribbon_width() {
    let items = vec![1, 2, 3, 4, 5];
    let mut opts = options(79);
    opts.ribbon_width = 10;
    assert_render_opts(
        &items,
        &opts,
        &["[", "    1,", "    2,", "    3,", "    4,", "    5", "]"],
    );
}

#[test]
fn comments() {
    let items: Vec<Box<dyn Inspect>> = vec![
        Box::new(1),
        Box::new(commented(2, "two")),
        Box::new(3),
    ];
    assert_render(&items, 79, &["[", "    1,", "    2,  # two", "    3", "]"]);

    let pair = commented(vec![1, 2], "a pair");
    assert_render(&pair, 79, &["[1, 2]  # a pair"]);
    assert_render(&pair, 12, &["# a pair", "[1, 2]"]);
}

static COUNTER: TypeInfo = TypeInfo {
    module: "collections",
    name: "Counter",
    bases: &[&DICT],
};

static STACK: TypeInfo = TypeInfo {
    module: "containers",
    name: "Stack",
    bases: &[&LIST],
};

struct Counter(BTreeMap<&'static str, i32>);

impl Inspect for Counter {
    fn type_info(&self) -> &'static TypeInfo {
        &COUNTER
    }

    fn shape(&self) -> Shape<'_> {
        self.0.shape()
    }
}

struct Stack(Vec<i32>);

impl Inspect for Stack {
    fn type_info(&self) -> &'static TypeInfo {
        &STACK
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Sequence {
            kind: SeqKind::List,
            items: self.0.iter().map(|item| item as &dyn Inspect).collect(),
            ordered: true,
        }
    }
}

#[test]
fn subtypes_of_builtins_show_their_name() {
    let mut counts = BTreeMap::new();
    counts.insert("a", 2);
    counts.insert("b", 1);
    assert_render(&Counter(counts), 79, &["Counter({'a': 2, 'b': 1})"]);
    assert_render(&Stack(vec![1, 2]), 79, &["Stack([1, 2])"]);
    assert_render(
        &Stack(vec![100, 200, 300]),
        12,
        &["Stack([", "    100,", "    200,", "    300", "])"],
    );
}

#[test]
fn shared_siblings_are_not_recursion() {
    let shared = Rc::new(vec![1]);
    let twice = vec![shared.clone(), shared];
    assert_render(&twice, 79, &["[[1], [1]]"]);
}

#[test]
fn output_is_deterministic() {
    let map = (0..20)
        .map(|i| (format!("key{}", i), vec![i; 3]))
        .collect::<HashMap<_, _>>();
    let first = render(&map, &options(40)).unwrap();
    for _ in 0..5 {
        assert_eq!(render(&map, &options(40)).unwrap(), first);
    }
}

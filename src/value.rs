//! The view of values that printers work with.
//!
//! Every printable value implements [`Inspect`], which reports its runtime type (a [`TypeInfo`],
//! with the ancestors it inherits printers from) and, for built-in kinds of data, its
//! [`Shape`].

use std::any::Any;
use std::borrow::Cow;
use std::cell::OnceCell;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::BuildHasher;
use std::ptr;
use std::rc::Rc;
use std::sync::Arc;

/// The runtime type of a value, for printer dispatch.
///
/// Types are compared by identity, so each `TypeInfo` should be a `static`:
///
/// ```
/// use pretty_values::{TypeInfo, OBJECT};
///
/// static POINT: TypeInfo = TypeInfo {
///     module: "geometry",
///     name: "Point",
///     bases: &[&OBJECT],
/// };
/// assert_eq!(POINT.qualified_name(), "geometry.Point");
/// ```
pub struct TypeInfo {
    pub module: &'static str,
    pub name: &'static str,
    /// The direct ancestors, in order of precedence.
    pub bases: &'static [&'static TypeInfo],
}

impl TypeInfo {
    /// `module.Name`: the name that deferred printers are registered under.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.module, self.name)
    }

    pub fn is(&self, other: &TypeInfo) -> bool {
        ptr::eq(self, other)
    }

    /// The method resolution order: this type, followed by its ancestors from nearest to
    /// farthest, each exactly once. This is the C3 linearization when one exists, and a
    /// depth-first walk otherwise.
    pub fn mro(&'static self) -> Vec<&'static TypeInfo> {
        c3_linearization(self).unwrap_or_else(|| depth_first_order(self))
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<type {}>", self.qualified_name())
    }
}

fn c3_linearization(ty: &'static TypeInfo) -> Option<Vec<&'static TypeInfo>> {
    let mut sequences = Vec::new();
    for base in ty.bases {
        sequences.push(c3_linearization(base)?);
    }
    sequences.push(ty.bases.to_vec());

    let mut order = vec![ty];
    loop {
        sequences.retain(|seq| !seq.is_empty());
        if sequences.is_empty() {
            return Some(order);
        }
        // The next type is the first head that does not appear in the tail of any sequence.
        let head = sequences.iter().map(|seq| seq[0]).find(|candidate| {
            sequences
                .iter()
                .all(|seq| !seq[1..].iter().any(|ty| ty.is(candidate)))
        })?;
        order.push(head);
        for seq in &mut sequences {
            if seq[0].is(head) {
                seq.remove(0);
            }
        }
    }
}

fn depth_first_order(ty: &'static TypeInfo) -> Vec<&'static TypeInfo> {
    fn visit(ty: &'static TypeInfo, order: &mut Vec<&'static TypeInfo>) {
        if order.iter().any(|seen| seen.is(ty)) {
            return;
        }
        order.push(ty);
        for base in ty.bases {
            visit(base, order);
        }
    }

    let mut order = Vec::new();
    visit(ty, &mut order);
    order
}

pub static OBJECT: TypeInfo = TypeInfo {
    module: "builtins",
    name: "object",
    bases: &[],
};
pub static NONE: TypeInfo = TypeInfo {
    module: "builtins",
    name: "NoneType",
    bases: &[&OBJECT],
};
pub static INT: TypeInfo = TypeInfo {
    module: "builtins",
    name: "int",
    bases: &[&OBJECT],
};
pub static BOOL: TypeInfo = TypeInfo {
    module: "builtins",
    name: "bool",
    bases: &[&INT],
};
pub static FLOAT: TypeInfo = TypeInfo {
    module: "builtins",
    name: "float",
    bases: &[&OBJECT],
};
pub static STR: TypeInfo = TypeInfo {
    module: "builtins",
    name: "str",
    bases: &[&OBJECT],
};
pub static BYTES: TypeInfo = TypeInfo {
    module: "builtins",
    name: "bytes",
    bases: &[&OBJECT],
};
pub static LIST: TypeInfo = TypeInfo {
    module: "builtins",
    name: "list",
    bases: &[&OBJECT],
};
pub static TUPLE: TypeInfo = TypeInfo {
    module: "builtins",
    name: "tuple",
    bases: &[&OBJECT],
};
pub static SET: TypeInfo = TypeInfo {
    module: "builtins",
    name: "set",
    bases: &[&OBJECT],
};
pub static DICT: TypeInfo = TypeInfo {
    module: "builtins",
    name: "dict",
    bases: &[&OBJECT],
};

/// The structure of a value, as far as the built-in printers are concerned.
pub enum Shape<'a> {
    None,
    Bool(bool),
    Int(i128),
    Float(f64),
    Str(Cow<'a, str>),
    Bytes(Cow<'a, [u8]>),
    Sequence {
        kind: SeqKind,
        items: Vec<&'a dyn Inspect>,
        /// Whether the order of `items` is meaningful. Unordered sequences are sorted before
        /// being displayed.
        ordered: bool,
    },
    Mapping {
        entries: Vec<(&'a dyn Inspect, &'a dyn Inspect)>,
        /// Whether the order of `entries` is meaningful. Unordered mappings are sorted by key
        /// before being displayed.
        ordered: bool,
    },
    /// Nothing is known about the value's structure; it needs a registered printer.
    Opaque,
}

/// The kinds of bracketed sequence syntax.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeqKind {
    /// `[1, 2]`
    List,
    /// `(1, 2)`
    Tuple,
    /// `{1, 2}`
    Set,
}

/// A value that can be pretty printed.
pub trait Inspect {
    /// The value's runtime type, which determines its printer.
    fn type_info(&self) -> &'static TypeInfo;

    fn shape(&self) -> Shape<'_> {
        Shape::Opaque
    }

    /// An address that identifies this value while it is alive, for values that can be shared
    /// (and so can contain themselves).
    fn identity(&self) -> Option<usize> {
        None
    }

    /// Access to the concrete value, for printers of `'static` types.
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }

    /// A comment to display alongside the value.
    fn comment(&self) -> Option<&str> {
        None
    }
}

impl<'a> dyn Inspect + 'a {
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any()?.downcast_ref::<T>()
    }
}

impl fmt::Debug for dyn Inspect + '_ {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<{} value>", self.type_info().qualified_name())
    }
}

/// A byte string, displayed like `b'\x00bytes'`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Bytes(pub Vec<u8>);

/// A value displayed along with a comment.
#[derive(Clone, Debug)]
pub struct Commented<T> {
    pub value: T,
    pub comment: String,
}

pub fn commented<T: Inspect>(value: T, comment: impl Into<String>) -> Commented<T> {
    Commented {
        value,
        comment: comment.into(),
    }
}

/*************
 * Wrappers *
 *************/

/// Implement everything but `identity` by deferring to `**self`.
macro_rules! delegate_inspect {
    () => {
        fn type_info(&self) -> &'static TypeInfo {
            (**self).type_info()
        }

        fn shape(&self) -> Shape<'_> {
            (**self).shape()
        }

        fn as_any(&self) -> Option<&dyn Any> {
            (**self).as_any()
        }

        fn comment(&self) -> Option<&str> {
            (**self).comment()
        }
    };
}

impl<T: Inspect + ?Sized> Inspect for &T {
    delegate_inspect!();

    fn identity(&self) -> Option<usize> {
        (**self).identity()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    delegate_inspect!();

    fn identity(&self) -> Option<usize> {
        (**self).identity()
    }
}

impl<T: Inspect + ?Sized> Inspect for Rc<T> {
    delegate_inspect!();

    fn identity(&self) -> Option<usize> {
        Some(Rc::as_ptr(self) as *const () as usize)
    }
}

impl<T: Inspect + ?Sized> Inspect for Arc<T> {
    delegate_inspect!();

    fn identity(&self) -> Option<usize> {
        Some(Arc::as_ptr(self) as *const () as usize)
    }
}

impl<T: Inspect> Inspect for Commented<T> {
    fn type_info(&self) -> &'static TypeInfo {
        self.value.type_info()
    }

    fn shape(&self) -> Shape<'_> {
        self.value.shape()
    }

    fn identity(&self) -> Option<usize> {
        self.value.identity()
    }

    fn as_any(&self) -> Option<&dyn Any> {
        self.value.as_any()
    }

    fn comment(&self) -> Option<&str> {
        Some(&self.comment)
    }
}

/// An unset cell displays as `None`.
impl<T: Inspect> Inspect for OnceCell<T> {
    fn type_info(&self) -> &'static TypeInfo {
        self.get().map_or(&NONE, |value| value.type_info())
    }

    fn shape(&self) -> Shape<'_> {
        self.get().map_or(Shape::None, |value| value.shape())
    }

    fn identity(&self) -> Option<usize> {
        self.get().and_then(|value| value.identity())
    }

    fn as_any(&self) -> Option<&dyn Any> {
        self.get().and_then(|value| value.as_any())
    }

    fn comment(&self) -> Option<&str> {
        self.get().and_then(|value| value.comment())
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn type_info(&self) -> &'static TypeInfo {
        self.as_ref().map_or(&NONE, |value| value.type_info())
    }

    fn shape(&self) -> Shape<'_> {
        self.as_ref().map_or(Shape::None, |value| value.shape())
    }

    fn identity(&self) -> Option<usize> {
        self.as_ref().and_then(|value| value.identity())
    }

    fn as_any(&self) -> Option<&dyn Any> {
        self.as_ref().and_then(|value| value.as_any())
    }

    fn comment(&self) -> Option<&str> {
        self.as_ref().and_then(|value| value.comment())
    }
}

/************
 * Scalars *
 ************/

impl Inspect for bool {
    fn type_info(&self) -> &'static TypeInfo {
        &BOOL
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Bool(*self)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

macro_rules! inspect_int {
    ($($int:ty),*) => {
        $(
            impl Inspect for $int {
                fn type_info(&self) -> &'static TypeInfo {
                    &INT
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Int(i128::from(*self))
                }

                fn as_any(&self) -> Option<&dyn Any> {
                    Some(self)
                }
            }
        )*
    };
}

inspect_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl Inspect for isize {
    fn type_info(&self) -> &'static TypeInfo {
        &INT
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Int(*self as i128)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl Inspect for usize {
    fn type_info(&self) -> &'static TypeInfo {
        &INT
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Int(*self as i128)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl Inspect for f32 {
    fn type_info(&self) -> &'static TypeInfo {
        &FLOAT
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Float(f64::from(*self))
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl Inspect for f64 {
    fn type_info(&self) -> &'static TypeInfo {
        &FLOAT
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Float(*self)
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl Inspect for str {
    fn type_info(&self) -> &'static TypeInfo {
        &STR
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Str(Cow::Borrowed(self))
    }
}

impl Inspect for String {
    fn type_info(&self) -> &'static TypeInfo {
        &STR
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Str(Cow::Borrowed(self))
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl Inspect for char {
    fn type_info(&self) -> &'static TypeInfo {
        &STR
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Str(Cow::Owned(self.to_string()))
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl Inspect for Bytes {
    fn type_info(&self) -> &'static TypeInfo {
        &BYTES
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Bytes(Cow::Borrowed(&self.0))
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

/// The empty tuple.
impl Inspect for () {
    fn type_info(&self) -> &'static TypeInfo {
        &TUPLE
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Sequence {
            kind: SeqKind::Tuple,
            items: Vec::new(),
            ordered: true,
        }
    }
}

/****************
 * Collections *
 ****************/

fn sequence<'a, T: Inspect + 'a>(
    kind: SeqKind,
    items: impl Iterator<Item = &'a T>,
    ordered: bool,
) -> Shape<'a> {
    Shape::Sequence {
        kind,
        items: items.map(|item| item as &dyn Inspect).collect(),
        ordered,
    }
}

fn mapping<'a, K: Inspect + 'a, V: Inspect + 'a>(
    entries: impl Iterator<Item = (&'a K, &'a V)>,
    ordered: bool,
) -> Shape<'a> {
    Shape::Mapping {
        entries: entries
            .map(|(key, value)| (key as &dyn Inspect, value as &dyn Inspect))
            .collect(),
        ordered,
    }
}

impl<T: Inspect> Inspect for [T] {
    fn type_info(&self) -> &'static TypeInfo {
        &LIST
    }

    fn shape(&self) -> Shape<'_> {
        sequence(SeqKind::List, self.iter(), true)
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn type_info(&self) -> &'static TypeInfo {
        &LIST
    }

    fn shape(&self) -> Shape<'_> {
        sequence(SeqKind::List, self.iter(), true)
    }
}

impl<T: Inspect> Inspect for Vec<T> {
    fn type_info(&self) -> &'static TypeInfo {
        &LIST
    }

    fn shape(&self) -> Shape<'_> {
        sequence(SeqKind::List, self.iter(), true)
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn type_info(&self) -> &'static TypeInfo {
        &LIST
    }

    fn shape(&self) -> Shape<'_> {
        sequence(SeqKind::List, self.iter(), true)
    }
}

impl<T: Inspect> Inspect for BTreeSet<T> {
    fn type_info(&self) -> &'static TypeInfo {
        &SET
    }

    fn shape(&self) -> Shape<'_> {
        sequence(SeqKind::Set, self.iter(), true)
    }
}

impl<T: Inspect, S: BuildHasher> Inspect for HashSet<T, S> {
    fn type_info(&self) -> &'static TypeInfo {
        &SET
    }

    fn shape(&self) -> Shape<'_> {
        sequence(SeqKind::Set, self.iter(), false)
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn type_info(&self) -> &'static TypeInfo {
        &DICT
    }

    fn shape(&self) -> Shape<'_> {
        mapping(self.iter(), true)
    }
}

impl<K: Inspect, V: Inspect, S: BuildHasher> Inspect for HashMap<K, V, S> {
    fn type_info(&self) -> &'static TypeInfo {
        &DICT
    }

    fn shape(&self) -> Shape<'_> {
        mapping(self.iter(), false)
    }
}

macro_rules! inspect_tuple {
    ($($name:ident: $index:tt),*) => {
        impl<$($name: Inspect),*> Inspect for ($($name,)*) {
            fn type_info(&self) -> &'static TypeInfo {
                &TUPLE
            }

            fn shape(&self) -> Shape<'_> {
                Shape::Sequence {
                    kind: SeqKind::Tuple,
                    items: vec![$(&self.$index as &dyn Inspect),*],
                    ordered: true,
                }
            }
        }
    };
}

inspect_tuple!(A: 0);
inspect_tuple!(A: 0, B: 1);
inspect_tuple!(A: 0, B: 1, C: 2);
inspect_tuple!(A: 0, B: 1, C: 2, D: 3);

/******************
 * Key ordering *
 ******************/

/// A total order on values of any type, used to sort mapping keys and unordered sequences.
///
/// Values of the same kind are compared naturally (numbers by value, including `int` against
/// `float`; strings and bytes lexicographically; sequences element by element). Values of
/// different kinds are ordered by kind. Opaque values are ordered by type name, then identity.
pub fn compare_keys(a: &dyn Inspect, b: &dyn Inspect) -> Ordering {
    let (shape_a, shape_b) = (a.shape(), b.shape());
    match (&shape_a, &shape_b) {
        (Shape::Str(x), Shape::Str(y)) => x.cmp(y),
        (Shape::Bytes(x), Shape::Bytes(y)) => x.cmp(y),
        (
            Shape::Sequence { items: xs, .. },
            Shape::Sequence { items: ys, .. },
        ) => compare_sequences(xs, ys),
        (Shape::Mapping { entries: xs, .. }, Shape::Mapping { entries: ys, .. }) => {
            xs.len().cmp(&ys.len())
        }
        (Shape::Opaque, Shape::Opaque) => a
            .type_info()
            .qualified_name()
            .cmp(&b.type_info().qualified_name())
            .then_with(|| a.identity().cmp(&b.identity())),
        _ => match (number(&shape_a), number(&shape_b)) {
            (Some(x), Some(y)) => compare_numbers(x, y),
            _ => kind_rank(&shape_a).cmp(&kind_rank(&shape_b)),
        },
    }
}

fn compare_sequences(xs: &[&dyn Inspect], ys: &[&dyn Inspect]) -> Ordering {
    for (x, y) in xs.iter().zip(ys) {
        let ordering = compare_keys(*x, *y);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    xs.len().cmp(&ys.len())
}

#[derive(Clone, Copy)]
enum Number {
    Int(i128),
    Float(f64),
}

fn number(shape: &Shape) -> Option<Number> {
    match shape {
        Shape::Bool(b) => Some(Number::Int(i128::from(*b))),
        Shape::Int(n) => Some(Number::Int(*n)),
        Shape::Float(x) => Some(Number::Float(*x)),
        _ => None,
    }
}

fn compare_numbers(x: Number, y: Number) -> Ordering {
    match (x, y) {
        (Number::Int(x), Number::Int(y)) => x.cmp(&y),
        (Number::Int(x), Number::Float(y)) => compare_int_float(x, y),
        (Number::Float(x), Number::Int(y)) => compare_int_float(y, x).reverse(),
        (Number::Float(x), Number::Float(y)) => x.total_cmp(&y),
    }
}

/// Exact, and consistent with `f64::total_cmp`: an int sits where the equal float `+0.0`, `1.0`,
/// ... would.
fn compare_int_float(x: i128, y: f64) -> Ordering {
    // 2^127, exactly representable.
    const LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

    if y.is_nan() {
        return if y.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    let whole = y.trunc();
    if whole >= LIMIT {
        return Ordering::Less;
    }
    if whole < -LIMIT {
        return Ordering::Greater;
    }
    // In range and integral, so the conversion is exact.
    match x.cmp(&(whole as i128)) {
        Ordering::Equal if y > whole => Ordering::Less,
        Ordering::Equal if y < whole => Ordering::Greater,
        Ordering::Equal if y == 0.0 && y.is_sign_negative() => Ordering::Greater,
        ordering => ordering,
    }
}

fn kind_rank(shape: &Shape) -> u8 {
    match shape {
        Shape::None => 0,
        Shape::Bool(_) | Shape::Int(_) | Shape::Float(_) => 1,
        Shape::Str(_) => 2,
        Shape::Bytes(_) => 3,
        Shape::Sequence { .. } => 4,
        Shape::Mapping { .. } => 5,
        Shape::Opaque => 6,
    }
}

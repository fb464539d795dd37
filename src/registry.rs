//! Printer dispatch: which function builds the doc for a value of a given type.

use crate::context::PrettyContext;
use crate::doc::Doc;
use crate::doc_constructors::token;
use crate::syntax::Token;
use crate::value::{Inspect, TypeInfo};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Builds the doc for a value. Nested values must be printed through the context (with
/// [`PrettyContext::pretty`] or the helpers), never by calling other printers directly.
pub type PrettyFn =
    Arc<dyn Fn(&dyn Inspect, &PrettyContext<'_>) -> Result<Doc, PrinterError> + Send + Sync>;

/// Decides whether a predicate printer applies to a value.
pub type Predicate = Arc<dyn Fn(&dyn Inspect) -> bool + Send + Sync>;

/// Wrap a closure as a [`PrettyFn`].
pub fn printer<F>(f: F) -> PrettyFn
where
    F: Fn(&dyn Inspect, &PrettyContext<'_>) -> Result<Doc, PrinterError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A failure inside a printer function. It is passed through to the caller of
/// [`render`](crate::render) unchanged.
pub struct PrinterError(Box<dyn StdError + Send + Sync>);

impl PrinterError {
    pub fn new(error: impl Into<Box<dyn StdError + Send + Sync>>) -> PrinterError {
        PrinterError(error.into())
    }

    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync> {
        self.0
    }
}

impl fmt::Debug for PrinterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for PrinterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for PrinterError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

/// A deferred printer whose type could not be located, reported by
/// [`Registry::register_deferred_checked`] in strict mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("`{0}` is not a module-qualified type name")]
    Unqualified(String),
    #[error("module `{module}` of deferred printer `{qualified_name}` has not been declared")]
    UnknownModule {
        qualified_name: String,
        module: String,
    },
    #[error("type `{qualified_name}` has not been declared")]
    UnknownType { qualified_name: String },
}

/// Whether bulk deferred registration reports names that cannot be located.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strictness {
    Lenient,
    Strict,
}

/// A table of printers.
///
/// A value's printer is found by walking its type's [MRO](TypeInfo::mro). For each type, the
/// printer registered for it is used if there is one; otherwise a deferred printer registered
/// under its qualified name is bound to it (once, permanently) and used. Failing that, the
/// predicate printers are tried in registration order, and finally the default printer.
///
/// Registering and resolving different types concurrently is safe, and so is resolving the same
/// type from many threads. Registering a type while a value of that same type is being resolved
/// is up to the caller to avoid.
pub struct Registry {
    /// Keyed by the address of the `TypeInfo`.
    printers: RwLock<FxHashMap<usize, PrettyFn>>,
    /// Keyed by module, then type name. A deferred printer is only ever moved out of here while
    /// `printers` is write-locked.
    deferred: RwLock<FxHashMap<String, FxHashMap<String, PrettyFn>>>,
    predicates: RwLock<Vec<(Predicate, PrettyFn)>>,
    /// Declared type names, by module.
    declared: RwLock<FxHashMap<String, FxHashSet<String>>>,
    /// Method resolution orders computed so far, keyed like `printers`.
    mros: RwLock<FxHashMap<usize, Arc<[&'static TypeInfo]>>>,
    default_printer: PrettyFn,
}

fn type_key(type_info: &'static TypeInfo) -> usize {
    type_info as *const TypeInfo as usize
}

fn split_qualified_name(qualified_name: &str) -> Option<(&str, &str)> {
    qualified_name
        .rsplit_once('.')
        .filter(|(module, name)| !module.is_empty() && !name.is_empty())
}

/// Names without a module are kept under the empty module; no declared type can match them.
fn deferred_key(qualified_name: &str) -> (&str, &str) {
    qualified_name.rsplit_once('.').unwrap_or(("", qualified_name))
}

fn has_deferred(
    deferred: &FxHashMap<String, FxHashMap<String, PrettyFn>>,
    ty: &'static TypeInfo,
) -> bool {
    deferred
        .get(ty.module)
        .map_or(false, |names| names.contains_key(ty.name))
}

impl Registry {
    /// A registry with no printers, apart from the default.
    pub fn new() -> Registry {
        Registry {
            printers: RwLock::new(FxHashMap::default()),
            deferred: RwLock::new(FxHashMap::default()),
            predicates: RwLock::new(Vec::new()),
            declared: RwLock::new(FxHashMap::default()),
            mros: RwLock::new(FxHashMap::default()),
            default_printer: printer(default_printer),
        }
    }

    /// A registry with printers for the built-in scalars, sequences, and mappings.
    pub fn with_builtins() -> Registry {
        let registry = Registry::new();
        crate::builtins::install(&registry);
        registry
    }

    /// Use `printer` for values of exactly `type_info` (and of types that inherit from it, unless
    /// they have a closer printer). Replaces any printer already registered for `type_info`.
    pub fn register<F>(&self, type_info: &'static TypeInfo, printer: F)
    where
        F: Fn(&dyn Inspect, &PrettyContext<'_>) -> Result<Doc, PrinterError>
            + Send
            + Sync
            + 'static,
    {
        self.register_printer(type_info, Arc::new(printer));
    }

    pub fn register_printer(&self, type_info: &'static TypeInfo, printer: PrettyFn) {
        tracing::debug!(type_name = %type_info.qualified_name(), "registered printer");
        let previous = self.printers.write().insert(type_key(type_info), printer);
        if previous.is_some() {
            tracing::debug!(type_name = %type_info.qualified_name(), "replaced printer");
        }
    }

    /// Use `printer` for the type named `qualified_name` (`module.Name`), once a value of that
    /// type (or one inheriting from it) is first resolved.
    pub fn register_deferred<F>(&self, qualified_name: impl Into<String>, printer: F)
    where
        F: Fn(&dyn Inspect, &PrettyContext<'_>) -> Result<Doc, PrinterError>
            + Send
            + Sync
            + 'static,
    {
        self.register_deferred_printer(qualified_name.into(), Arc::new(printer));
    }

    pub fn register_deferred_printer(&self, qualified_name: String, printer: PrettyFn) {
        tracing::debug!(type_name = %qualified_name, "registered deferred printer");
        let (module, name) = deferred_key(&qualified_name);
        self.deferred
            .write()
            .entry(module.to_owned())
            .or_default()
            .insert(name.to_owned(), printer);
    }

    /// Register many deferred printers. Every entry is registered either way, but in strict mode
    /// entries whose module or type has not been [declared](Registry::declare) are reported.
    pub fn register_deferred_checked(
        &self,
        entries: impl IntoIterator<Item = (String, PrettyFn)>,
        strictness: Strictness,
    ) -> Result<(), Vec<RegistryError>> {
        let mut errors = Vec::new();
        for (qualified_name, printer) in entries {
            if strictness == Strictness::Strict {
                if let Some(error) = self.check_declared(&qualified_name) {
                    tracing::warn!(%error, "deferred printer cannot be located");
                    errors.push(error);
                }
            }
            self.register_deferred_printer(qualified_name, printer);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn check_declared(&self, qualified_name: &str) -> Option<RegistryError> {
        let (module, name) = match split_qualified_name(qualified_name) {
            Some(split) => split,
            None => return Some(RegistryError::Unqualified(qualified_name.to_owned())),
        };
        let declared = self.declared.read();
        match declared.get(module) {
            None => Some(RegistryError::UnknownModule {
                qualified_name: qualified_name.to_owned(),
                module: module.to_owned(),
            }),
            Some(names) if !names.contains(name) => Some(RegistryError::UnknownType {
                qualified_name: qualified_name.to_owned(),
            }),
            Some(_) => None,
        }
    }

    /// Record that `type_info` (and its module) exists, for strict deferred registration.
    pub fn declare(&self, type_info: &'static TypeInfo) {
        self.declared
            .write()
            .entry(type_info.module.to_owned())
            .or_default()
            .insert(type_info.name.to_owned());
    }

    /// Use `printer` for values that `predicate` accepts, if no type-based printer applies.
    pub fn register_predicate<P, F>(&self, predicate: P, printer: F)
    where
        P: Fn(&dyn Inspect) -> bool + Send + Sync + 'static,
        F: Fn(&dyn Inspect, &PrettyContext<'_>) -> Result<Doc, PrinterError>
            + Send
            + Sync
            + 'static,
    {
        self.predicates
            .write()
            .push((Arc::new(predicate), Arc::new(printer)));
    }

    /// Whether a printer (possibly deferred) is registered for `type_info`, or with
    /// `check_ancestors`, for any type in its MRO.
    pub fn is_registered(&self, type_info: &'static TypeInfo, check_ancestors: bool) -> bool {
        let mro = self.mro(type_info);
        let candidates = if check_ancestors { &mro[..] } else { &mro[..1] };
        let printers = self.printers.read();
        let deferred = self.deferred.read();
        candidates
            .iter()
            .any(|&ty| printers.contains_key(&type_key(ty)) || has_deferred(&deferred, ty))
    }

    /// Find the printer for `value`. Never fails: unknown types get the default printer.
    pub fn resolve(&self, value: &dyn Inspect) -> PrettyFn {
        let type_info = value.type_info();
        for &ty in self.mro(type_info).iter() {
            if let Some(printer) = self.lookup(ty) {
                return printer;
            }
        }

        let predicates = self.predicates.read().clone();
        for (predicate, printer) in predicates {
            if predicate(value) {
                return printer;
            }
        }
        self.default_printer.clone()
    }

    fn mro(&self, type_info: &'static TypeInfo) -> Arc<[&'static TypeInfo]> {
        if let Some(mro) = self.mros.read().get(&type_key(type_info)) {
            return mro.clone();
        }
        let mro: Arc<[&'static TypeInfo]> = type_info.mro().into();
        self.mros
            .write()
            .entry(type_key(type_info))
            .or_insert(mro)
            .clone()
    }

    fn lookup(&self, ty: &'static TypeInfo) -> Option<PrettyFn> {
        let key = type_key(ty);
        if let Some(printer) = self.printers.read().get(&key) {
            return Some(printer.clone());
        }
        if !has_deferred(&self.deferred.read(), ty) {
            // Another thread may have just bound it. Binding holds the `printers` write lock
            // from the removal until the insertion, so this read sees the result.
            return self.printers.read().get(&key).cloned();
        }

        let mut printers = self.printers.write();
        if let Some(printer) = printers.get(&key) {
            return Some(printer.clone());
        }
        let bound = {
            let mut deferred = self.deferred.write();
            let names = deferred.get_mut(ty.module)?;
            let bound = names.remove(ty.name)?;
            if names.is_empty() {
                deferred.remove(ty.module);
            }
            bound
        };
        tracing::debug!(type_name = %ty.qualified_name(), "bound deferred printer");
        printers.insert(key, bound.clone());
        Some(bound)
    }

    #[cfg(test)]
    fn pending_deferred(&self) -> usize {
        self.deferred.read().values().map(|names| names.len()).sum()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

/// `<module.Name object>`, or `<module.Name object at 0x...>` for shared values.
pub(crate) fn default_printer(
    value: &dyn Inspect,
    _ctx: &PrettyContext<'_>,
) -> Result<Doc, PrinterError> {
    let type_name = value.type_info().qualified_name();
    let repr = match value.identity() {
        Some(identity) => format!("<{} object at {:#x}>", type_name, identity),
        None => format!("<{} object>", type_name),
    };
    Ok(token(Token::NameEntity, repr))
}

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::with_builtins);

/// The process-wide registry used by [`render`](crate::render) and [`pformat`](crate::pformat).
pub fn global_registry() -> &'static Registry {
    &GLOBAL
}

/// [`Registry::register`] on the global registry.
pub fn register<F>(type_info: &'static TypeInfo, printer: F)
where
    F: Fn(&dyn Inspect, &PrettyContext<'_>) -> Result<Doc, PrinterError> + Send + Sync + 'static,
{
    GLOBAL.register(type_info, printer)
}

/// [`Registry::register_deferred`] on the global registry.
pub fn register_deferred<F>(qualified_name: impl Into<String>, printer: F)
where
    F: Fn(&dyn Inspect, &PrettyContext<'_>) -> Result<Doc, PrinterError> + Send + Sync + 'static,
{
    GLOBAL.register_deferred(qualified_name, printer)
}

/// [`Registry::register_deferred_checked`] on the global registry.
pub fn register_deferred_checked(
    entries: impl IntoIterator<Item = (String, PrettyFn)>,
    strictness: Strictness,
) -> Result<(), Vec<RegistryError>> {
    GLOBAL.register_deferred_checked(entries, strictness)
}

/// [`Registry::register_predicate`] on the global registry.
pub fn register_predicate<P, F>(predicate: P, printer: F)
where
    P: Fn(&dyn Inspect) -> bool + Send + Sync + 'static,
    F: Fn(&dyn Inspect, &PrettyContext<'_>) -> Result<Doc, PrinterError> + Send + Sync + 'static,
{
    GLOBAL.register_predicate(predicate, printer)
}

/// [`Registry::declare`] on the global registry.
pub fn declare(type_info: &'static TypeInfo) {
    GLOBAL.declare(type_info)
}

/// [`Registry::is_registered`] on the global registry.
pub fn is_registered(type_info: &'static TypeInfo, check_ancestors: bool) -> bool {
    GLOBAL.is_registered(type_info, check_ancestors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc_constructors::text;
    use crate::options::RenderOptions;
    use crate::value::{INT, OBJECT};

    static ANIMAL: TypeInfo = TypeInfo {
        module: "zoo",
        name: "Animal",
        bases: &[&OBJECT],
    };
    static DOG: TypeInfo = TypeInfo {
        module: "zoo",
        name: "Dog",
        bases: &[&ANIMAL],
    };

    struct Dog;

    impl Inspect for Dog {
        fn type_info(&self) -> &'static TypeInfo {
            &DOG
        }
    }

    fn print(registry: &Registry, value: &dyn Inspect) -> String {
        let options = RenderOptions::default();
        let ctx = PrettyContext::new(registry, &options);
        let printer = registry.resolve(value);
        printer(value, &ctx).unwrap().to_string()
    }

    #[test]
    fn resolution_order() {
        let registry = Registry::new();
        assert_eq!(print(&registry, &Dog), "name.entity:'<zoo.Dog object>'");

        registry.register_predicate(|_| true, |_, _| Ok(text("predicate")));
        assert_eq!(print(&registry, &Dog), "'predicate'");

        registry.register(&ANIMAL, |_, _| Ok(text("animal")));
        assert_eq!(print(&registry, &Dog), "'animal'");

        registry.register(&DOG, |_, _| Ok(text("dog")));
        assert_eq!(print(&registry, &Dog), "'dog'");
    }

    #[test]
    fn deferred_printers_bind_once() {
        let registry = Registry::new();
        registry.register_deferred("zoo.Animal", |_, _| Ok(text("deferred animal")));
        assert!(registry.is_registered(&ANIMAL, false));
        assert!(!registry.is_registered(&DOG, false));
        assert!(registry.is_registered(&DOG, true));

        assert_eq!(print(&registry, &Dog), "'deferred animal'");
        assert_eq!(registry.pending_deferred(), 0);
        assert!(registry.printers.read().contains_key(&type_key(&ANIMAL)));

        // An exact registration beats the bound ancestor printer.
        registry.register(&DOG, |_, _| Ok(text("dog")));
        assert_eq!(print(&registry, &Dog), "'dog'");
    }

    #[test]
    fn concurrent_resolution_binds_deferred_printers() {
        use std::sync::Barrier;

        for _ in 0..500 {
            let registry = Registry::new();
            registry.register_deferred("zoo.Dog", |_, _| Ok(text("deferred dog")));
            let barrier = Barrier::new(4);
            std::thread::scope(|scope| {
                for _ in 0..4 {
                    scope.spawn(|| {
                        barrier.wait();
                        let printer = registry.resolve(&Dog);
                        assert!(!Arc::ptr_eq(&printer, &registry.default_printer));
                    });
                }
            });
            assert_eq!(registry.pending_deferred(), 0);
            assert_eq!(print(&registry, &Dog), "'deferred dog'");
        }
    }

    #[test]
    fn mro_is_computed_once_per_type() {
        let registry = Registry::new();
        let first = registry.mro(&DOG);
        let second = registry.mro(&DOG);
        assert!(Arc::ptr_eq(&first, &second));
        let names = first.iter().map(|ty| ty.name).collect::<Vec<_>>();
        assert_eq!(names, vec!["Dog", "Animal", "object"]);
    }

    #[test]
    fn strict_deferred_registration_reports_unknown_names() {
        let registry = Registry::new();
        registry.declare(&ANIMAL);
        let noop = || printer(|_, _| Ok(text("")));
        let result = registry.register_deferred_checked(
            vec![
                ("zoo.Animal".to_owned(), noop()),
                ("zoo.Cat".to_owned(), noop()),
                ("aquarium.Fish".to_owned(), noop()),
                ("Fish".to_owned(), noop()),
            ],
            Strictness::Strict,
        );
        assert_eq!(
            result,
            Err(vec![
                RegistryError::UnknownType {
                    qualified_name: "zoo.Cat".to_owned()
                },
                RegistryError::UnknownModule {
                    qualified_name: "aquarium.Fish".to_owned(),
                    module: "aquarium".to_owned()
                },
                RegistryError::Unqualified("Fish".to_owned()),
            ])
        );
        // Still registered.
        assert_eq!(registry.pending_deferred(), 4);

        let lenient = registry.register_deferred_checked(
            vec![("nowhere.Thing".to_owned(), noop())],
            Strictness::Lenient,
        );
        assert_eq!(lenient, Ok(()));
    }

    #[test]
    fn builtins_are_installed_globally() {
        assert!(is_registered(&INT, false));
        assert!(!is_registered(&OBJECT, false));
    }

    #[test]
    fn printer_errors_pass_through() {
        let registry = Registry::new();
        registry.register(&DOG, |_, _| Err(PrinterError::new("no dogs allowed")));
        let options = RenderOptions::default();
        let ctx = PrettyContext::new(&registry, &options);
        let error = ctx.pretty(&Dog).unwrap_err();
        assert_eq!(error.to_string(), "no dogs allowed");
    }
}

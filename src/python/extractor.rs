//! Metadata extraction from a parsed Python module.
//!
//! Walks the module body and each class body in statement order, building
//! the namespace a Python import would produce: functions, classes, aliases
//! of either, imported names, and every other binding as opaque data. Only
//! the values that end up bound to functions or classes become
//! [`ModuleMember`]s. Names taken with `from module import name` are looked
//! up through a caller-supplied resolver once the body has been walked.

use std::collections::HashMap;

use tree_sitter::Node;

use super::docstring::{docstring_of, string_value};
use super::imports::{import_bindings, ImportedMember};
use super::parser::{node_text, statements, PythonSource};
use crate::core::{
    ArgSpec, BaseRef, Callable, Class, ClassMember, DefaultValue, Documentable, Member, Module,
    ModuleMember,
};

/// Builtin types that may appear as bases without an import.
const BUILTIN_TYPES: &[&str] = &[
    "object",
    "type",
    "int",
    "float",
    "complex",
    "bool",
    "str",
    "bytes",
    "bytearray",
    "list",
    "tuple",
    "dict",
    "set",
    "frozenset",
    "property",
    "BaseException",
    "Exception",
    "ArithmeticError",
    "AssertionError",
    "AttributeError",
    "ImportError",
    "IndexError",
    "KeyError",
    "LookupError",
    "NotImplementedError",
    "OSError",
    "RuntimeError",
    "StopIteration",
    "TypeError",
    "ValueError",
    "ZeroDivisionError",
    "Warning",
    "UserWarning",
    "DeprecationWarning",
];

/// Insertion-ordered name bindings. Rebinding keeps the original position.
struct Scope<V> {
    order: Vec<String>,
    values: HashMap<String, V>,
}

impl<V> Default for Scope<V> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            values: HashMap::new(),
        }
    }
}

impl<V> Scope<V> {
    fn bind(&mut self, name: impl Into<String>, value: V) {
        let name = name.into();
        if !self.values.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.values.insert(name, value);
    }

    fn unbind(&mut self, name: &str) {
        if self.values.remove(name).is_some() {
            self.order.retain(|bound| bound != name);
        }
    }

    fn get(&self, name: &str) -> Option<&V> {
        self.values.get(name)
    }

    fn into_ordered(self) -> impl Iterator<Item = (String, V)> {
        let mut values = self.values;
        self.order
            .into_iter()
            .filter_map(move |name| values.remove(&name).map(|value| (name, value)))
    }
}

/// Value bound to a module-level name.
enum Binding {
    Entity(Documentable),
    Import {
        target: String,
        member: Option<ImportedMember>,
    },
    Other,
}

/// What a decorator turns the decorated function into.
#[derive(Debug, PartialEq, Eq)]
enum DecoratorKind {
    Property,
    ClassMethod,
    StaticMethod,
    /// Returns a callable object that is not a function
    Wrapper,
    /// Returns a function, or is unknown and assumed to
    Transparent,
}

/// Extract the functions and classes bound at the top level of `parsed`.
///
/// `resolve_import` supplies the entity behind a `from` import, or `None`
/// when the source module is unavailable or binds something else.
pub fn extract_module(
    parsed: &PythonSource,
    module_name: &str,
    package: &str,
    mut resolve_import: impl FnMut(&ImportedMember) -> Option<Documentable>,
) -> Module {
    let extractor = Extractor {
        source: &parsed.source,
        module: module_name,
        package,
    };

    let root = parsed.root();
    let mut scope = Scope::default();
    for stmt in statements(&root) {
        extractor.module_statement(&stmt, &mut scope);
    }

    let members = scope
        .into_ordered()
        .filter_map(|(name, binding)| {
            let entity = match binding {
                Binding::Entity(entity) => entity,
                Binding::Import {
                    member: Some(member),
                    ..
                } => resolve_import(&member)?,
                Binding::Import { member: None, .. } | Binding::Other => return None,
            };
            Some(ModuleMember { name, entity })
        })
        .collect();

    Module {
        name: module_name.to_string(),
        path: parsed.path.clone(),
        members,
    }
}

struct Extractor<'a> {
    source: &'a str,
    module: &'a str,
    package: &'a str,
}

impl<'a> Extractor<'a> {
    fn text(&self, node: &Node) -> &'a str {
        node_text(node, self.source)
    }

    fn module_statement(&self, stmt: &Node, scope: &mut Scope<Binding>) {
        match stmt.kind() {
            "function_definition" => {
                if let Some(callable) = self.function(stmt) {
                    scope.bind(callable.name.clone(), Binding::Entity(callable.into()));
                }
            }
            "class_definition" => {
                if let Some(class) = self.class(stmt, scope) {
                    scope.bind(class.name.clone(), Binding::Entity(class.into()));
                }
            }
            "decorated_definition" => {
                let Some(definition) = stmt.child_by_field_name("definition") else {
                    return;
                };
                if definition.kind() == "function_definition"
                    && self.decorator_kind(stmt) != DecoratorKind::Transparent
                {
                    if let Some(name) = definition.child_by_field_name("name") {
                        scope.bind(self.text(&name), Binding::Other);
                    }
                    return;
                }
                self.module_statement(&definition, scope);
            }
            "import_statement" | "import_from_statement" => {
                for binding in import_bindings(stmt, self.source, self.package) {
                    scope.bind(
                        binding.local,
                        Binding::Import {
                            target: binding.target,
                            member: binding.member,
                        },
                    );
                }
            }
            "expression_statement" => {
                for (target, value) in self.assignments(stmt) {
                    let binding = match value.and_then(|name| scope.get(&name)) {
                        Some(Binding::Entity(entity)) => Binding::Entity(entity.clone()),
                        Some(Binding::Import { target, member }) => Binding::Import {
                            target: target.clone(),
                            member: member.clone(),
                        },
                        _ => Binding::Other,
                    };
                    scope.bind(target, binding);
                }
            }
            "delete_statement" => {
                for name in self.deleted_names(stmt) {
                    scope.unbind(&name);
                }
            }
            _ => {}
        }
    }

    fn class(&self, node: &Node, scope: &Scope<Binding>) -> Option<Class> {
        let name = self.text(&node.child_by_field_name("name")?).to_string();
        let body = node.child_by_field_name("body")?;
        let bases = self.bases(node.child_by_field_name("superclasses"), scope);

        let mut members = Scope::default();
        for stmt in statements(&body) {
            self.class_statement(&stmt, &mut members, scope);
        }

        Some(Class {
            name,
            module: self.module.to_string(),
            doc: docstring_of(&body, self.source),
            bases,
            members: members
                .into_ordered()
                .map(|(name, value)| ClassMember::new(name, value))
                .collect(),
        })
    }

    fn class_statement(&self, stmt: &Node, members: &mut Scope<Member>, outer: &Scope<Binding>) {
        match stmt.kind() {
            "function_definition" => {
                if let Some(callable) = self.function(stmt) {
                    members.bind(callable.name.clone(), Member::Function(callable));
                }
            }
            "decorated_definition" => {
                let Some(definition) = stmt.child_by_field_name("definition") else {
                    return;
                };
                if definition.kind() != "function_definition" {
                    self.class_statement(&definition, members, outer);
                    return;
                }
                if let Some(callable) = self.function(&definition) {
                    let name = callable.name.clone();
                    let member = match self.decorator_kind(stmt) {
                        DecoratorKind::Property => Member::Property,
                        DecoratorKind::ClassMethod => Member::ClassMethod(callable),
                        DecoratorKind::StaticMethod => Member::StaticMethod(callable),
                        DecoratorKind::Wrapper => Member::Wrapped,
                        DecoratorKind::Transparent => Member::Function(callable),
                    };
                    members.bind(name, member);
                }
            }
            "class_definition" => {
                if let Some(nested) = self.class(stmt, outer) {
                    members.bind(nested.name.clone(), Member::NestedClass(Box::new(nested)));
                }
            }
            "expression_statement" => {
                for (target, value) in self.assignments(stmt) {
                    let member = value
                        .and_then(|name| members.get(&name).cloned())
                        .unwrap_or(Member::Data);
                    members.bind(target, member);
                }
            }
            "delete_statement" => {
                for name in self.deleted_names(stmt) {
                    members.unbind(&name);
                }
            }
            _ => {}
        }
    }

    fn function(&self, node: &Node) -> Option<Callable> {
        let name = self.text(&node.child_by_field_name("name")?).to_string();
        let parameters = node.child_by_field_name("parameters")?;
        let doc = node
            .child_by_field_name("body")
            .and_then(|body| docstring_of(&body, self.source));

        Some(Callable {
            name,
            doc,
            spec: Some(self.argspec(&parameters)),
        })
    }

    fn argspec(&self, parameters: &Node) -> ArgSpec {
        let mut spec = ArgSpec::default();
        let mut keyword_only = false;

        for param in statements(parameters) {
            match param.kind() {
                "identifier" | "tuple_pattern" => {
                    push_parameter(&mut spec, keyword_only, self.text(&param), None)
                }
                "typed_parameter" => {
                    let Some(inner) = statements(&param).into_iter().next() else {
                        continue;
                    };
                    match inner.kind() {
                        "list_splat_pattern" => {
                            spec.varargs = self.splat_name(&inner);
                            keyword_only = true;
                        }
                        "dictionary_splat_pattern" => spec.varkw = self.splat_name(&inner),
                        _ => push_parameter(&mut spec, keyword_only, self.text(&inner), None),
                    }
                }
                "default_parameter" | "typed_default_parameter" => {
                    let (Some(name), Some(value)) = (
                        param.child_by_field_name("name"),
                        param.child_by_field_name("value"),
                    ) else {
                        continue;
                    };
                    let default = self.default_value(&value);
                    push_parameter(&mut spec, keyword_only, self.text(&name), Some(default));
                }
                "list_splat_pattern" => {
                    spec.varargs = self.splat_name(&param);
                    keyword_only = true;
                }
                "dictionary_splat_pattern" => spec.varkw = self.splat_name(&param),
                "keyword_separator" => keyword_only = true,
                // positional_separator
                _ => {}
            }
        }

        spec
    }

    /// Defaults display like `str(value)`: string literals show their
    /// contents, anything else its source expression.
    fn default_value(&self, value: &Node) -> DefaultValue {
        match string_value(value, self.source) {
            Some(text) => DefaultValue::new(text),
            None => DefaultValue::new(single_line(self.text(value))),
        }
    }

    fn splat_name(&self, pattern: &Node) -> Option<String> {
        statements(pattern)
            .first()
            .map(|name| self.text(name).to_string())
    }

    /// Simple assignments in an expression statement as `(target, value)`,
    /// where `value` is the assigned name if the right side is a bare name.
    /// Annotation-only statements bind nothing.
    fn assignments(&self, stmt: &Node) -> Vec<(String, Option<String>)> {
        let Some(mut assignment) = statements(stmt)
            .into_iter()
            .find(|node| node.kind() == "assignment")
        else {
            return Vec::new();
        };

        // `a = b = value` nests the second assignment on the right
        let mut targets = Vec::new();
        let value = loop {
            if let Some(left) = assignment.child_by_field_name("left") {
                targets.push(left);
            }
            match assignment.child_by_field_name("right") {
                Some(right) if right.kind() == "assignment" => assignment = right,
                other => break other,
            }
        };
        let Some(value) = value else {
            return Vec::new();
        };

        // unpacking never binds a target to the right side as a whole
        let unpacking = targets.iter().any(|target| target.kind() != "identifier");
        let value_name = (value.kind() == "identifier" && !unpacking)
            .then(|| self.text(&value).to_string());

        targets
            .iter()
            .flat_map(|target| self.target_names(target))
            .map(|name| (name, value_name.clone()))
            .collect()
    }

    fn target_names(&self, target: &Node) -> Vec<String> {
        match target.kind() {
            "identifier" => vec![self.text(target).to_string()],
            "pattern_list" | "tuple_pattern" | "list_pattern" => statements(target)
                .iter()
                .flat_map(|inner| self.target_names(inner))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn deleted_names(&self, stmt: &Node) -> Vec<String> {
        statements(stmt)
            .iter()
            .flat_map(|target| match target.kind() {
                "expression_list" => statements(target)
                    .iter()
                    .flat_map(|inner| self.target_names(inner))
                    .collect(),
                _ => self.target_names(target),
            })
            .collect()
    }

    fn bases(&self, superclasses: Option<Node>, scope: &Scope<Binding>) -> Vec<BaseRef> {
        let bases: Vec<BaseRef> = superclasses
            .map(|list| {
                statements(&list)
                    .iter()
                    .filter(|arg| arg.kind() != "keyword_argument")
                    .map(|arg| self.base(arg, scope))
                    .collect()
            })
            .unwrap_or_default();

        if bases.is_empty() {
            vec![BaseRef::qualified("builtins", "object")]
        } else {
            bases
        }
    }

    fn base(&self, expr: &Node, scope: &Scope<Binding>) -> BaseRef {
        match expr.kind() {
            "identifier" => self.resolve_name(self.text(expr), scope),
            "attribute" => {
                let path: String = self.text(expr).split_whitespace().collect();
                self.resolve_attribute(&path, scope)
            }
            // Generic[T] and friends contribute their unsubscripted value
            "subscript" => match expr.child_by_field_name("value") {
                Some(value) => self.base(&value, scope),
                None => BaseRef::bare(self.text(expr)),
            },
            _ => BaseRef::bare(single_line(self.text(expr))),
        }
    }

    fn resolve_name(&self, name: &str, scope: &Scope<Binding>) -> BaseRef {
        match scope.get(name) {
            Some(Binding::Entity(Documentable::Class(class))) => {
                BaseRef::qualified(class.module.clone(), class.name.clone())
            }
            Some(Binding::Import { target, .. }) => split_qualified(target),
            Some(_) => BaseRef::bare(name),
            None if BUILTIN_TYPES.contains(&name) => BaseRef::qualified("builtins", name),
            None => BaseRef::bare(name),
        }
    }

    fn resolve_attribute(&self, path: &str, scope: &Scope<Binding>) -> BaseRef {
        let Some((head, rest)) = path.split_once('.') else {
            return self.resolve_name(path, scope);
        };

        match scope.get(head) {
            Some(Binding::Import { target, .. }) => {
                split_qualified(&format!("{}.{}", target, rest))
            }
            Some(Binding::Entity(Documentable::Class(class))) => {
                let name = rest.rsplit('.').next().unwrap_or(rest);
                BaseRef::qualified(class.module.clone(), name)
            }
            _ => split_qualified(path),
        }
    }

    /// Kind decided by the outermost decorator that changes the function's type.
    fn decorator_kind(&self, decorated: &Node) -> DecoratorKind {
        statements(decorated)
            .iter()
            .filter(|child| child.kind() == "decorator")
            .filter_map(|decorator| statements(decorator).into_iter().next())
            .map(|expr| {
                let callee = match expr.kind() {
                    "call" => expr.child_by_field_name("function").unwrap_or(expr),
                    _ => expr,
                };
                classify_decorator(self.text(&callee))
            })
            .find(|kind| *kind != DecoratorKind::Transparent)
            .unwrap_or(DecoratorKind::Transparent)
    }
}

fn push_parameter(spec: &mut ArgSpec, keyword_only: bool, name: &str, default: Option<DefaultValue>) {
    if keyword_only {
        spec.kwonlyargs.push((name.to_string(), default));
        return;
    }
    spec.args.push(name.to_string());
    if let Some(default) = default {
        spec.defaults.push(default);
    }
}

fn classify_decorator(expr: &str) -> DecoratorKind {
    let last = expr.rsplit('.').next().unwrap_or(expr);
    match last {
        "classmethod" => DecoratorKind::ClassMethod,
        "staticmethod" => DecoratorKind::StaticMethod,
        "property" | "cached_property" | "abstractproperty" => DecoratorKind::Property,
        "setter" | "getter" | "deleter" if expr.contains('.') => DecoratorKind::Property,
        "lru_cache" | "cache" | "partialmethod" | "singledispatchmethod" => DecoratorKind::Wrapper,
        _ => DecoratorKind::Transparent,
    }
}

fn split_qualified(path: &str) -> BaseRef {
    match path.rsplit_once('.') {
        Some((module, name)) => BaseRef::qualified(module, name),
        None => BaseRef::bare(path),
    }
}

/// Collapse a multi-line expression onto one line.
fn single_line(text: &str) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

//! Documentation inheritance between classes.
//!
//! An undocumented class takes the first documentation found along its
//! method resolution order, and an undocumented method takes the
//! documentation of the first same-named member found there. The order is
//! the C3 linearization Python computes for `__mro__`. Only classes bound in
//! the module, defined there or imported into it, can be inspected; any
//! other base is opaque.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::core::{BaseRef, Class, Documentable, Member, Module};

pub fn inherit_docs(module: &mut Module) {
    let classes: HashMap<String, Class> = module
        .members
        .iter()
        .filter_map(|member| match &member.entity {
            Documentable::Class(class) => Some((class_key(class), class.clone())),
            Documentable::Function(_) => None,
        })
        .collect();

    let mut linearizer = Linearizer::new(&classes);
    for member in &mut module.members {
        if let Documentable::Class(class) = &mut member.entity {
            let key = class_key(class);
            let ancestors: Vec<&Class> = linearizer
                .mro(&key)
                .iter()
                .filter(|ancestor| **ancestor != key)
                .filter_map(|ancestor| classes.get(ancestor))
                .collect();
            apply(class, &ancestors);
        }
    }
}

fn class_key(class: &Class) -> String {
    format!("{}.{}", class.module, class.name)
}

fn base_key(base: &BaseRef) -> String {
    base.qualified_name().unwrap_or_else(|_| base.name.clone())
}

/// C3 linearization over the classes of one module.
struct Linearizer<'c> {
    classes: &'c HashMap<String, Class>,
    cache: HashMap<String, Vec<String>>,
    visiting: HashSet<String>,
}

impl<'c> Linearizer<'c> {
    fn new(classes: &'c HashMap<String, Class>) -> Self {
        Self {
            classes,
            cache: HashMap::new(),
            visiting: HashSet::new(),
        }
    }

    /// Method resolution order of `key`, starting with `key` itself.
    ///
    /// Unknown classes and classes reached again through a cycle of bases
    /// have no ancestors.
    fn mro(&mut self, key: &str) -> Vec<String> {
        if let Some(mro) = self.cache.get(key) {
            return mro.clone();
        }
        let Some(class) = self.classes.get(key) else {
            return vec![key.to_string()];
        };
        if !self.visiting.insert(key.to_string()) {
            return vec![key.to_string()];
        }

        let bases: Vec<String> = class.bases.iter().map(base_key).collect();
        let mut sequences: Vec<Vec<String>> = bases.iter().map(|base| self.mro(base)).collect();
        sequences.push(bases);

        let mut mro = vec![key.to_string()];
        match merge(sequences) {
            Some(tail) => mro.extend(tail),
            None => debug!("{} has no consistent method resolution order", key),
        }

        self.visiting.remove(key);
        self.cache.insert(key.to_string(), mro.clone());
        mro
    }
}

/// C3 merge: repeatedly take the first head that is in no other tail.
fn merge(mut sequences: Vec<Vec<String>>) -> Option<Vec<String>> {
    let mut merged = Vec::new();
    loop {
        sequences.retain(|sequence| !sequence.is_empty());
        if sequences.is_empty() {
            return Some(merged);
        }

        let head = sequences
            .iter()
            .map(|sequence| &sequence[0])
            .find(|candidate| {
                !sequences
                    .iter()
                    .any(|sequence| sequence[1..].contains(*candidate))
            })?
            .clone();

        for sequence in &mut sequences {
            if sequence[0] == head {
                sequence.remove(0);
            }
        }
        merged.push(head);
    }
}

fn apply(class: &mut Class, ancestors: &[&Class]) {
    if class.doc().is_none() {
        if let Some(doc) = ancestors.iter().find_map(|ancestor| ancestor.doc()) {
            class.doc = Some(doc.to_string());
        }
    }

    for member in &mut class.members {
        let Member::Function(method) = &mut member.value else {
            continue;
        };
        if method.doc().is_some() {
            continue;
        }
        let inherited = ancestors
            .iter()
            .find_map(|ancestor| member_doc(ancestor, &method.name));
        if let Some(doc) = inherited {
            debug!("{}.{} inherits its documentation", class.name, method.name);
            method.doc = Some(doc.to_string());
        }
    }
}

fn member_doc<'c>(class: &'c Class, name: &str) -> Option<&'c str> {
    class
        .members
        .iter()
        .filter(|member| member.name == name)
        .find_map(|member| match &member.value {
            Member::Function(callable)
            | Member::ClassMethod(callable)
            | Member::StaticMethod(callable) => callable.doc(),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::python::extractor::extract_module;
    use crate::python::parser::parse_source;
    use indoc::indoc;
    use std::path::Path;

    fn module(source: &str) -> Module {
        let parsed = parse_source(source, Path::new("zoo.py")).unwrap();
        let mut module = extract_module(&parsed, "zoo", "", |_| None);
        inherit_docs(&mut module);
        module
    }

    fn class<'m>(module: &'m Module, name: &str) -> &'m Class {
        module
            .members
            .iter()
            .find_map(|m| match &m.entity {
                Documentable::Class(c) if m.name == name => Some(c),
                _ => None,
            })
            .unwrap()
    }

    fn method_doc<'c>(class: &'c Class, name: &str) -> Option<&'c str> {
        class.members.iter().find_map(|m| match &m.value {
            Member::Function(c) if m.name == name => c.doc(),
            _ => None,
        })
    }

    const ZOO: &str = indoc! {r#"
        class Animal:
            """Something alive."""

            def speak(self):
                """Make a sound."""

            def eat(self, food):
                pass

        class Dog(Animal):
            def speak(self):
                return "woof"

            def fetch(self):
                pass

        class Puppy(Dog):
            """A young dog."""

            def speak(self):
                pass

            squeak = speak
    "#};

    #[test]
    fn test_class_inherits_ancestor_doc() {
        let zoo = module(ZOO);
        assert_eq!(class(&zoo, "Dog").doc(), Some("Something alive."));
        assert_eq!(class(&zoo, "Puppy").doc(), Some("A young dog."));
    }

    #[test]
    fn test_method_inherits_from_nearest_documented_ancestor() {
        let zoo = module(ZOO);
        assert_eq!(method_doc(class(&zoo, "Dog"), "speak"), Some("Make a sound."));
        assert_eq!(method_doc(class(&zoo, "Puppy"), "speak"), Some("Make a sound."));
        assert_eq!(method_doc(class(&zoo, "Puppy"), "squeak"), Some("Make a sound."));
        assert_eq!(method_doc(class(&zoo, "Dog"), "fetch"), None);
        assert_eq!(method_doc(class(&zoo, "Animal"), "eat"), None);
    }

    #[test]
    fn test_foreign_bases_are_not_inspected() {
        let zoo = module("from lib import Base\n\nclass Thing(Base):\n    def run(self):\n        pass\n");
        assert_eq!(class(&zoo, "Thing").doc(), None);
    }

    #[test]
    fn test_diamond_follows_c3_order() {
        let zoo = module(indoc! {r#"
            class A:
                """From A."""

                def run(self):
                    """Run like A."""

            class B(A):
                pass

            class C(A):
                """From C."""

                def run(self):
                    """Run like C."""

            class D(B, C):
                def run(self):
                    pass
        "#});
        assert_eq!(class(&zoo, "D").doc(), Some("From C."));
        assert_eq!(method_doc(class(&zoo, "D"), "run"), Some("Run like C."));
        assert_eq!(class(&zoo, "B").doc(), Some("From A."));
    }

    #[test]
    fn test_merge_orders_diamond() {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let merged = merge(vec![
            strings(&["B", "A", "object"]),
            strings(&["C", "A", "object"]),
            strings(&["B", "C"]),
        ]);
        assert_eq!(merged, Some(strings(&["B", "C", "A", "object"])));
    }

    #[test]
    fn test_inconsistent_order_has_no_ancestors() {
        // X(A, B) and Y(B, A) cannot share a subclass
        let zoo = module(indoc! {r#"
            class A:
                """From A."""

            class B:
                """From B."""

            class X(A, B):
                pass

            class Y(B, A):
                pass

            class Z(X, Y):
                pass
        "#});
        assert_eq!(class(&zoo, "X").doc(), Some("From A."));
        assert_eq!(class(&zoo, "Z").doc(), None);
    }

    #[test]
    fn test_imported_ancestor_is_inspected() {
        let source = "from .base import Animal\n\nclass Dog(Animal):\n    def speak(self):\n        pass\n";
        let parsed = parse_source(source, Path::new("zoo/dogs.py")).unwrap();
        let mut zoo = extract_module(&parsed, "zoo.dogs", "zoo", |member| {
            let speak = crate::core::Callable::new("speak", crate::core::ArgSpec::new(["self"]))
                .with_doc("Make a noise.");
            Some(
                Class::new(member.name.clone(), "zoo.base")
                    .with_doc("Something alive.")
                    .with_member("speak", Member::Function(speak))
                    .into(),
            )
        });
        inherit_docs(&mut zoo);
        assert_eq!(class(&zoo, "Dog").doc(), Some("Something alive."));
        assert_eq!(method_doc(class(&zoo, "Dog"), "speak"), Some("Make a noise."));
    }

    #[test]
    fn test_cyclic_names_terminate() {
        // the second definition of A refers to the first, which is replaced
        let zoo = module("class A:\n    pass\n\nclass A(A):\n    pass\n");
        assert_eq!(class(&zoo, "A").doc(), None);
    }
}

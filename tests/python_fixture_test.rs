//! Extraction and rendering of the fixture package under `tests/fixtures/python`.

use indoc::indoc;
use pretty_assertions::assert_eq;
use pymdgen::commands::{generate_to, ordered_members, GenerateConfig};
use pymdgen::config::MemberOrder;
use pymdgen::python::{ExtractOptions, ModuleLoader, ModuleResolver};
use pymdgen::{DiagnosticLevel, Documentable, Error, HeadingDepth, Member};
use std::path::PathBuf;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/python")
}

fn config(modules: &[&str], order: MemberOrder, inherit_docs: bool) -> GenerateConfig {
    GenerateConfig {
        modules: modules.iter().map(|m| m.to_string()).collect(),
        search_paths: vec![fixtures()],
        section_level: HeadingDepth::new(3).unwrap(),
        order,
        inherit_docs,
        diagnostics: DiagnosticLevel::Quiet,
        output: None,
    }
}

fn loader() -> ModuleLoader {
    ModuleLoader::new(ModuleResolver::new(vec![fixtures()]), ExtractOptions::default())
}

fn generate(config: &GenerateConfig) -> String {
    let mut buffer = Vec::new();
    generate_to(config, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[test]
fn test_animals_module_markdown() {
    let markdown = generate(&config(&["zoo.animals"], MemberOrder::Alphabetical, true));

    let expected = indoc! {r#"
        ### Animal

        ```
        Animal(builtins.object)
        ```

        Something alive.

        #### speak

        ```
        speak(self, loud=False)
        ```

        Make a noise.


        ### Dog

        ```
        Dog(zoo.base.Animal)
        ```

        A loyal dog.

        #### speak

        ```
        speak(self, loud=False)
        ```

        Make a noise.

        #### fetch

        ```
        fetch(self, thing, *, times=1)
        ```

        Fetch a thing.

        #### bark

        ```
        bark(self, thing, *, times=1)
        ```

        Fetch a thing.


        ### Pack

        ```
        Pack(collections.abc.Sequence)
        ```

        A group of dogs.


        ### Puppy

        ```
        Puppy(zoo.animals.Dog)
        ```

        A loyal dog.

        #### nap

        ```
        nap(self)
        ```

        Sleep a while.


        ### feed

        ```
        feed(animal, food=hay, *extras, **options)
        ```

        Feed an animal.

        Extra food may be given.

        ### give_food

        ```
        give_food(animal, food=hay, *extras, **options)
        ```

        Feed an animal.

        Extra food may be given.

"#};
    assert_eq!(markdown, expected);
}

#[test]
fn test_source_order_follows_module_body() {
    let module = loader().load("zoo.animals").unwrap();

    let names: Vec<&str> = ordered_members(&module, MemberOrder::Source)
        .into_iter()
        .map(|member| member.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Animal", "feed", "_undocumented", "Dog", "Puppy", "Pack", "give_food"]
    );
}

#[test]
fn test_class_members_are_classified() {
    let module = loader().load("zoo.animals").unwrap();

    let dog = module
        .members
        .iter()
        .find_map(|member| match &member.entity {
            Documentable::Class(class) if member.name == "Dog" => Some(class),
            _ => None,
        })
        .unwrap();

    let kinds: Vec<(&str, &str)> = dog
        .members
        .iter()
        .map(|member| {
            let kind = match &member.value {
                Member::Function(_) => "function",
                Member::Property => "property",
                Member::ClassMethod(_) => "classmethod",
                Member::StaticMethod(_) => "staticmethod",
                Member::Wrapped => "wrapped",
                Member::NestedClass(_) => "class",
                Member::Data => "data",
            };
            (member.name.as_str(), kind)
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            ("legs", "data"),
            ("speak", "function"),
            ("fetch", "function"),
            ("name", "property"),
            ("create", "classmethod"),
            ("bark", "function"),
        ]
    );
}

#[test]
fn test_undocumented_subclass_without_inheritance() {
    let markdown = generate(&config(&["zoo.animals"], MemberOrder::Alphabetical, false));
    assert!(!markdown.contains("### Puppy"));
    assert!(markdown.contains("### Dog"));
}

#[test]
fn test_package_init_and_several_modules() {
    let markdown = generate(&config(&["zoo", "zoo.base"], MemberOrder::Source, true));

    let expected = indoc! {r#"
        ### feed

        ```
        feed(animal, food=hay, *extras, **options)
        ```

        Feed an animal.

        Extra food may be given.

        ### open_gates

        ```
        open_gates(when=dawn)
        ```

        Open every gate.

        ### Animal

        ```
        Animal(builtins.object)
        ```

        Something alive.

        #### speak

        ```
        speak(self, loud=False)
        ```

        Make a noise.


"#};
    assert_eq!(markdown, expected);
}

#[test]
fn test_imported_class_keeps_its_defining_module() {
    let mut loader = loader();
    let animals = loader.load("zoo.animals").unwrap();
    let animal = animals
        .members
        .iter()
        .find_map(|member| match &member.entity {
            Documentable::Class(class) if member.name == "Animal" => Some(class),
            _ => None,
        })
        .unwrap();
    assert_eq!(animal.module, "zoo.base");
    assert_eq!(loader.load("zoo.base").unwrap().members.len(), 1);
}

#[test]
fn test_syntax_error_is_reported() {
    let err = loader().load("broken").unwrap_err();

    match err {
        Error::Parse { file, line, .. } => {
            assert!(file.ends_with("broken.py"));
            assert!(line >= 1);
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

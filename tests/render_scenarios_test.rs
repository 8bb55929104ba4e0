//! Rendering of hand-built metadata, covering the documented output shapes.

use indoc::indoc;
use pretty_assertions::assert_eq;
use pymdgen::{
    ArgSpec, BaseRef, Callable, Class, Documentable, HeadingDepth, Member, RenderOutcome,
    Renderer, SkipReason,
};

fn depth(level: usize) -> HeadingDepth {
    HeadingDepth::new(level).unwrap()
}

#[test]
fn test_function_with_every_parameter_group() {
    let callable = Callable::new(
        "name",
        ArgSpec::new(["a", "b", "c"])
            .with_defaults(["1"])
            .with_varargs("args")
            .with_varkw("kwargs"),
    )
    .with_doc("Adds things.");

    let rendered = Renderer::default().render("name", &callable.into(), depth(4));

    let expected = indoc! {"
        #### name

        ```
        name(a, b, c=1, *args, **kwargs)
        ```

        Adds things.

"};
    assert_eq!(rendered.markdown, expected);
}

#[test]
fn test_undocumented_function_renders_nothing() {
    let callable = Callable::new("name", ArgSpec::new(["a"]));
    let rendered = Renderer::default().render("name", &callable.into(), depth(3));

    assert_eq!(rendered.markdown, "");
    assert_eq!(
        rendered.outcome,
        RenderOutcome::Skipped(SkipReason::NoDocumentation)
    );
}

#[test]
fn test_class_renders_documented_methods_one_level_deeper() {
    let class = Class::new("Foo", "pkg")
        .with_doc("A thing.")
        .with_base(BaseRef::qualified("bar", "Base"))
        .with_member(
            "run",
            Member::Function(Callable::new("run", ArgSpec::new(["self"])).with_doc("Runs.")),
        )
        .with_member(
            "helper",
            Member::Function(Callable::new("helper", ArgSpec::new(["self"]))),
        );

    let rendered = Renderer::default().render("Foo", &class.into(), depth(3));

    let expected = indoc! {"
        ### Foo

        ```
        Foo(bar.Base)
        ```

        A thing.

        #### run

        ```
        run(self)
        ```

        Runs.


"};
    assert_eq!(rendered.markdown, expected);
}

#[test]
fn test_callable_without_metadata_is_skipped() {
    let entity: Documentable = Callable::native("builtin").with_doc("Opaque.").into();
    let rendered = Renderer::default().render("builtin", &entity, depth(3));

    assert_eq!(rendered.markdown, "");
    assert!(matches!(
        rendered.outcome,
        RenderOutcome::Skipped(SkipReason::MetadataUnavailable(_))
    ));
}

#[test]
fn test_unreadable_method_does_not_affect_siblings() {
    let class = Class::new("Wrapper", "pkg")
        .with_doc("Wraps.")
        .with_member(
            "native",
            Member::Function(Callable::native("native").with_doc("Native.")),
        )
        .with_member(
            "plain",
            Member::Function(Callable::new("plain", ArgSpec::new(["self"])).with_doc("Plain.")),
        );

    let rendered = Renderer::default().render("Wrapper", &class.into(), depth(2));

    assert!(rendered.markdown.contains("### plain\n"));
    assert!(!rendered.markdown.contains("native"));
    assert_eq!(
        rendered.outcome,
        RenderOutcome::Rendered {
            methods: 1,
            skipped_methods: 1
        }
    );
}

#[test]
fn test_non_function_members_are_not_rendered() {
    let nested = Class::new("Inner", "pkg").with_doc("Inner.");
    let class = Class::new("Outer", "pkg")
        .with_doc("Outer.")
        .with_base(BaseRef::qualified("builtins", "object"))
        .with_member("size", Member::Property)
        .with_member("Inner", Member::NestedClass(Box::new(nested)))
        .with_member(
            "build",
            Member::ClassMethod(Callable::new("build", ArgSpec::new(["cls"])).with_doc("Build.")),
        )
        .with_member(
            "util",
            Member::StaticMethod(Callable::new("util", ArgSpec::default()).with_doc("Util.")),
        )
        .with_member("cached", Member::Wrapped)
        .with_member("LIMIT", Member::Data);

    let rendered = Renderer::default().render("Outer", &class.into(), depth(1));

    let expected = indoc! {"
        # Outer

        ```
        Outer(builtins.object)
        ```

        Outer.


"};
    assert_eq!(rendered.markdown, expected);
}

#[test]
fn test_keyword_only_parameters() {
    let callable = Callable::new(
        "connect",
        ArgSpec::new(["host"])
            .with_kwonly("timeout", Some("30"))
            .with_kwonly("secure", None),
    )
    .with_doc("Connect.");

    let rendered = Renderer::default().render("connect", &callable.into(), depth(3));
    assert!(rendered
        .markdown
        .contains("\nconnect(host, *, timeout=30, secure)\n"));
}

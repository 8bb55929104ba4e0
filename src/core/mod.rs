//! Metadata model for documentable Python objects.
//!
//! These types are read-only views produced by the extraction pass and
//! consumed by the signature reconstructor and the renderer. Nothing here
//! outlives a single generation run.

pub mod errors;

use std::fmt;
use std::path::PathBuf;

use errors::{Error, Result};

/// Display representation of a parameter's default value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultValue(String);

impl DefaultValue {
    pub fn new(repr: impl Into<String>) -> Self {
        Self(repr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameter metadata of a callable, shaped like a reflective host reports it.
///
/// `defaults` align with the *last* entries of `args`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArgSpec {
    pub args: Vec<String>,
    pub varargs: Option<String>,
    pub varkw: Option<String>,
    pub defaults: Vec<DefaultValue>,
    pub kwonlyargs: Vec<(String, Option<DefaultValue>)>,
}

impl ArgSpec {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_defaults<I, S>(mut self, defaults: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defaults = defaults.into_iter().map(DefaultValue::new).collect();
        self
    }

    pub fn with_varargs(mut self, name: impl Into<String>) -> Self {
        self.varargs = Some(name.into());
        self
    }

    pub fn with_varkw(mut self, name: impl Into<String>) -> Self {
        self.varkw = Some(name.into());
        self
    }

    pub fn with_kwonly(mut self, name: impl Into<String>, default: Option<&str>) -> Self {
        self.kwonlyargs
            .push((name.into(), default.map(DefaultValue::new)));
        self
    }
}

/// A function or method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Callable {
    /// Name the object was defined with, which may differ from the name it is
    /// documented under.
    pub name: String,
    pub doc: Option<String>,
    /// `None` when the callable exposes no parameter metadata.
    pub spec: Option<ArgSpec>,
}

impl Callable {
    pub fn new(name: impl Into<String>, spec: ArgSpec) -> Self {
        Self {
            name: name.into(),
            doc: None,
            spec: Some(spec),
        }
    }

    /// A callable without readable parameter metadata.
    pub fn native(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            spec: None,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Documentation text, treating an empty string as absent.
    pub fn doc(&self) -> Option<&str> {
        non_empty(self.doc.as_deref())
    }
}

/// Reference to a direct base type of a class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseRef {
    pub module: Option<String>,
    pub name: String,
}

impl BaseRef {
    pub fn qualified(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: Some(module.into()),
            name: name.into(),
        }
    }

    /// A base whose defining module is unknown.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            module: None,
            name: name.into(),
        }
    }

    pub fn qualified_name(&self) -> Result<String> {
        match self.module.as_deref() {
            Some(module) if !module.is_empty() => Ok(format!("{}.{}", module, self.name)),
            _ => Err(Error::MalformedBase {
                name: self.name.clone(),
            }),
        }
    }

    /// Fully-qualified identifier, or the bare name when there is none.
    pub fn display_name(&self) -> String {
        self.qualified_name().unwrap_or_else(|err| {
            tracing::debug!("{}; using bare name", err);
            self.name.clone()
        })
    }
}

/// Value bound to a name in a class body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Member {
    /// Plain function, the only member kind rendered beneath a class
    Function(Callable),
    Property,
    ClassMethod(Callable),
    StaticMethod(Callable),
    /// Callable object built by a decorator such as `functools.lru_cache`
    Wrapped,
    NestedClass(Box<Class>),
    Data,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassMember {
    pub name: String,
    pub value: Member,
}

impl ClassMember {
    pub fn new(name: impl Into<String>, value: Member) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A class and the attributes declared directly on its body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Class {
    pub name: String,
    pub module: String,
    pub doc: Option<String>,
    pub bases: Vec<BaseRef>,
    /// Declaration order of the class body
    pub members: Vec<ClassMember>,
}

impl Class {
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
            doc: None,
            bases: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_base(mut self, base: BaseRef) -> Self {
        self.bases.push(base);
        self
    }

    pub fn with_member(mut self, name: impl Into<String>, value: Member) -> Self {
        self.members.push(ClassMember::new(name, value));
        self
    }

    pub fn doc(&self) -> Option<&str> {
        non_empty(self.doc.as_deref())
    }

    pub fn summary(&self) -> ClassSummary<'_> {
        ClassSummary::of(self)
    }
}

/// Base names and plain methods of a class, derived per render.
#[derive(Debug, PartialEq, Eq)]
pub struct ClassSummary<'a> {
    pub base_names: Vec<String>,
    pub methods: Vec<(&'a str, &'a Callable)>,
}

impl<'a> ClassSummary<'a> {
    pub fn of(class: &'a Class) -> Self {
        let base_names = class.bases.iter().map(BaseRef::display_name).collect();
        let methods = class
            .members
            .iter()
            .filter_map(|member| match &member.value {
                Member::Function(callable) => Some((member.name.as_str(), callable)),
                _ => None,
            })
            .collect();

        Self {
            base_names,
            methods,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Function,
    Class,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::Class => write!(f, "class"),
        }
    }
}

/// A function or class considered for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Documentable {
    Function(Callable),
    Class(Class),
}

impl Documentable {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Function(_) => EntityKind::Function,
            Self::Class(_) => EntityKind::Class,
        }
    }

    pub fn doc(&self) -> Option<&str> {
        match self {
            Self::Function(callable) => callable.doc(),
            Self::Class(class) => class.doc(),
        }
    }

    pub fn recorded_name(&self) -> &str {
        match self {
            Self::Function(callable) => &callable.name,
            Self::Class(class) => &class.name,
        }
    }
}

impl From<Callable> for Documentable {
    fn from(callable: Callable) -> Self {
        Self::Function(callable)
    }
}

impl From<Class> for Documentable {
    fn from(class: Class) -> Self {
        Self::Class(class)
    }
}

/// Name bound at module level together with its value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleMember {
    pub name: String,
    pub entity: Documentable,
}

/// A loaded module and the functions and classes bound in its namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub path: PathBuf,
    /// Binding order of the module body
    pub members: Vec<ModuleMember>,
}

fn non_empty(doc: Option<&str>) -> Option<&str> {
    doc.filter(|text| !text.is_empty())
}

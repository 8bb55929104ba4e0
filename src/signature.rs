//! Signature reconstruction.
//!
//! Turns a callable's parameter metadata into a display-oriented
//! [`ParameterSet`]: leading positional names, the trailing defaulted suffix,
//! keyword-only parameters and the variadic catch-alls.

use crate::core::errors::{Error, Result};
use crate::core::{Callable, DefaultValue};

/// Display decomposition of a callable's parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterSet {
    pub positional: Vec<String>,
    pub defaulted: Vec<(String, DefaultValue)>,
    /// Variadic name with its `*` prefix
    pub variadic: Option<String>,
    pub keyword_only: Vec<(String, Option<DefaultValue>)>,
    /// Keyword-variadic name with its `**` prefix
    pub keyword_variadic: Option<String>,
}

impl ParameterSet {
    /// Parameter groups in display order, each already comma-joined.
    /// Empty groups are omitted.
    pub fn display_groups(&self) -> Vec<String> {
        let mut groups = Vec::new();

        if !self.positional.is_empty() {
            groups.push(self.positional.join(", "));
        }

        if !self.defaulted.is_empty() {
            groups.push(
                self.defaulted
                    .iter()
                    .map(|(name, value)| format!("{}={}", name, value))
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }

        let mut tail = Vec::new();
        match &self.variadic {
            Some(variadic) => tail.push(variadic.clone()),
            None if !self.keyword_only.is_empty() => tail.push("*".to_string()),
            None => {}
        }
        tail.extend(self.keyword_only.iter().map(|(name, default)| match default {
            Some(value) => format!("{}={}", name, value),
            None => name.clone(),
        }));
        tail.extend(self.keyword_variadic.iter().cloned());
        if !tail.is_empty() {
            groups.push(tail.join(", "));
        }

        groups
    }

    /// The call line shown for a function, e.g. `name(a, b=1, *args)`.
    pub fn call_line(&self, name: &str) -> String {
        format!("{}({})", name, self.display_groups().join(", "))
    }

    /// Names of the positional and defaulted parameters in declaration order.
    pub fn named_parameters(&self) -> impl Iterator<Item = &str> {
        self.positional
            .iter()
            .map(String::as_str)
            .chain(self.defaulted.iter().map(|(name, _)| name.as_str()))
    }
}

/// Reconstruct the parameter set of `callable`.
///
/// Fails with [`Error::MetadataUnavailable`] when the callable carries no
/// parameter metadata, or when it lists more defaults than parameters.
pub fn reconstruct(callable: &Callable) -> Result<ParameterSet> {
    let spec = callable.spec.as_ref().ok_or_else(|| {
        Error::metadata_unavailable(&callable.name, "no parameter metadata exposed")
    })?;

    let total = spec.args.len();
    let defaults = spec.defaults.len();
    if defaults > total {
        return Err(Error::metadata_unavailable(
            &callable.name,
            format!("{} default value(s) for {} parameter(s)", defaults, total),
        ));
    }

    let (positional, with_defaults) = spec.args.split_at(total - defaults);
    let defaulted = with_defaults
        .iter()
        .cloned()
        .zip(spec.defaults.iter().cloned())
        .collect();

    Ok(ParameterSet {
        positional: positional.to_vec(),
        defaulted,
        variadic: spec.varargs.as_ref().map(|name| format!("*{}", name)),
        keyword_only: spec.kwonlyargs.clone(),
        keyword_variadic: spec.varkw.as_ref().map(|name| format!("**{}", name)),
    })
}

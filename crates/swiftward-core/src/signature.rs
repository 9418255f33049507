//! Method identity: Objective-C selectors and Swift function signatures.

use serde::Serialize;

use crate::swift_type::SwiftType;

/// Objective-C-style method identity: static-ness plus keyword labels,
/// independent of parameter types.
///
/// The first keyword is the method name; each following entry is the label of
/// one argument (`None` for an anonymous position).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SelectorSignature {
    pub is_static: bool,
    pub keywords: Vec<Option<String>>,
}

impl SelectorSignature {
    pub fn new(is_static: bool, keywords: impl IntoIterator<Item = Option<String>>) -> Self {
        Self {
            is_static,
            keywords: keywords.into_iter().collect(),
        }
    }

    /// Number of arguments the selector takes.
    pub fn argument_count(&self) -> usize {
        self.keywords.len().saturating_sub(1)
    }

    pub fn name(&self) -> &str {
        self.keywords
            .first()
            .and_then(|k| k.as_deref())
            .unwrap_or("")
    }
}

impl std::fmt::Display for SelectorSignature {
    /// Renders the Objective-C spelling: `name` or `name:label:...:`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.keywords.len() == 1 {
            return f.write_str(self.name());
        }
        for keyword in &self.keywords {
            match keyword {
                Some(keyword) => write!(f, "{keyword}:")?,
                None => f.write_str(":")?,
            }
        }
        Ok(())
    }
}

/// One parameter of a Swift function signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParameterSignature {
    /// External argument label; `None` for `_`.
    pub label: Option<String>,
    /// Internal parameter name.
    pub name: String,
    pub ty: SwiftType,
    /// Whether the parameter carries a default value, making it droppable
    /// at call sites.
    pub has_default_value: bool,
}

impl ParameterSignature {
    pub fn new(label: Option<&str>, name: &str, ty: SwiftType) -> Self {
        Self {
            label: label.map(str::to_string),
            name: name.to_string(),
            ty,
            has_default_value: false,
        }
    }

    /// Labeled parameter whose label equals its name.
    pub fn named(name: &str, ty: SwiftType) -> Self {
        Self::new(Some(name), name, ty)
    }
}

/// A fully-typed Swift function signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FunctionSignature {
    pub name: String,
    pub parameters: Vec<ParameterSignature>,
    pub return_type: SwiftType,
    pub is_static: bool,
    pub is_mutating: bool,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>, parameters: Vec<ParameterSignature>) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type: SwiftType::VOID,
            is_static: false,
            is_mutating: false,
        }
    }

    pub fn with_return_type(mut self, return_type: SwiftType) -> Self {
        self.return_type = return_type;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_mutating(mut self, is_mutating: bool) -> Self {
        self.is_mutating = is_mutating;
        self
    }

    /// The selector for the full argument list.
    pub fn selector_signature(&self) -> SelectorSignature {
        let mut keywords = Vec::with_capacity(self.parameters.len() + 1);
        keywords.push(Some(self.name.clone()));
        keywords.extend(self.parameters.iter().map(|p| p.label.clone()));
        SelectorSignature {
            is_static: self.is_static,
            keywords,
        }
    }

    /// All selectors a call site can match: the full form, plus one form per
    /// droppable trailing run of defaulted parameters.
    pub fn selector_signatures(&self) -> Vec<SelectorSignature> {
        let mut signatures = vec![self.selector_signature()];
        let mut upper = self.parameters.len();
        while upper > 0 && self.parameters[upper - 1].has_default_value {
            upper -= 1;
            let mut keywords = Vec::with_capacity(upper + 1);
            keywords.push(Some(self.name.clone()));
            keywords.extend(self.parameters[..upper].iter().map(|p| p.label.clone()));
            signatures.push(SelectorSignature {
                is_static: self.is_static,
                keywords,
            });
        }
        signatures
    }
}

impl std::fmt::Display for FunctionSignature {
    /// Renders the Swift spelling: `name(label:_:)`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        for parameter in &self.parameters {
            match &parameter.label {
                Some(label) => write!(f, "{label}:")?,
                None => f.write_str("_:")?,
            }
        }
        f.write_str(")")
    }
}

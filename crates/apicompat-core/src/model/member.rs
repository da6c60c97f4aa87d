use serde::{Deserialize, Serialize};

use super::attribute::AttributeDef;
use super::type_def::Visibility;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    #[default]
    Method,
    Constructor,
    Property,
    Field,
    Event,
}

impl MemberKind {
    /// Single-letter prefix used in member identities (`M`, `P`, `F`, `E`)
    pub fn tag(&self) -> char {
        match self {
            MemberKind::Method | MemberKind::Constructor => 'M',
            MemberKind::Property => 'P',
            MemberKind::Field => 'F',
            MemberKind::Event => 'E',
        }
    }

    fn takes_parameter_list(&self) -> bool {
        matches!(self, MemberKind::Method | MemberKind::Constructor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDef {
    #[serde(default)]
    pub name: String,

    /// Fully-qualified parameter type
    #[serde(rename = "type")]
    pub type_name: String,
}

/// A member of a type
///
/// For fields, properties and events `return_type` holds the member's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDef {
    pub name: String,

    #[serde(default)]
    pub kind: MemberKind,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub parameters: Vec<ParameterDef>,

    #[serde(default)]
    pub return_type: Option<String>,

    #[serde(default)]
    pub generic_arity: u32,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default)]
    pub is_virtual: bool,

    #[serde(default)]
    pub is_abstract: bool,

    /// Literal value of a constant field (enum values)
    #[serde(default)]
    pub constant_value: Option<String>,

    #[serde(default)]
    pub attributes: Vec<AttributeDef>,
}

impl MemberDef {
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility: Visibility::Public,
            parameters: Vec::new(),
            return_type: None,
            generic_arity: 0,
            is_static: false,
            is_virtual: false,
            is_abstract: false,
            constant_value: None,
            attributes: Vec::new(),
        }
    }

    pub fn method(name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Method)
    }

    pub fn constructor() -> Self {
        Self::new(".ctor", MemberKind::Constructor)
    }

    pub fn property(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Property).returns(type_name)
    }

    pub fn field(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Field).returns(type_name)
    }

    pub fn event(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Event).returns(type_name)
    }

    /// An enum literal with the given value
    pub fn enum_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut member = Self::new(name, MemberKind::Field);
        member.is_static = true;
        member.constant_value = Some(value.into());
        member
    }

    /// Append a parameter named after its position (`p0`, `p1`, …)
    pub fn with_param(self, type_name: impl Into<String>) -> Self {
        let name = format!("p{}", self.parameters.len());
        self.with_named_param(name, type_name)
    }

    pub fn with_named_param(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(ParameterDef {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }

    pub fn returns(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = Some(type_name.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_generic_arity(mut self, arity: u32) -> Self {
        self.generic_arity = arity;
        self
    }

    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn virtual_member(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    pub fn abstract_member(mut self) -> Self {
        self.is_abstract = true;
        self.is_virtual = true;
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeDef) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Member name as shown in paths, e.g. ``Convert``1(System.String)``.
    ///
    /// Parameter types go through `rename` so callers can render either the
    /// declared names or canonicalised ones.
    pub fn display_name_with<F>(&self, rename: F) -> String
    where
        F: Fn(&str) -> String,
    {
        let mut out = self.name.clone();
        if self.generic_arity > 0 {
            out.push_str(&format!("``{}", self.generic_arity));
        }
        if self.kind.takes_parameter_list() || !self.parameters.is_empty() {
            let params: Vec<String> = self
                .parameters
                .iter()
                .map(|p| rename(&p.type_name))
                .collect();
            out.push('(');
            out.push_str(&params.join(", "));
            out.push(')');
        }
        out
    }

    pub fn display_name(&self) -> String {
        self.display_name_with(str::to_string)
    }
}

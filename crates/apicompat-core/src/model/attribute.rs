use serde::{Deserialize, Serialize};

/// Type name of the attribute that hides an element from IntelliSense.
pub const EDITOR_BROWSABLE_ATTRIBUTE: &str = "System.ComponentModel.EditorBrowsableAttribute";

/// A custom attribute applied to an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDef {
    /// Fully-qualified attribute type name
    #[serde(rename = "type")]
    pub type_name: String,

    /// Constructor arguments rendered as strings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
}

impl AttributeDef {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    /// `[EditorBrowsable(EditorBrowsableState.Never)]`
    pub fn editor_browsable_never() -> Self {
        Self::new(EDITOR_BROWSABLE_ATTRIBUTE).with_argument("Never")
    }

    /// True for an EditorBrowsable attribute whose state is `Never`.
    ///
    /// Accepts the enum member name in any qualification and the raw value `1`.
    pub fn is_editor_browsable_never(&self) -> bool {
        if self.type_name != EDITOR_BROWSABLE_ATTRIBUTE {
            return false;
        }
        self.arguments.first().is_some_and(|arg| {
            let state = arg.rsplit('.').next().unwrap_or(arg).trim();
            state == "Never" || state == "1"
        })
    }
}

/// True if any attribute in the list marks its owner as never browsable.
pub fn has_editor_browsable_never(attributes: &[AttributeDef]) -> bool {
    attributes.iter().any(AttributeDef::is_editor_browsable_never)
}

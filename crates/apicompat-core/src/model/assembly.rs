use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::type_def::TypeDef;

fn default_version() -> String {
    "0.0.0.0".to_string()
}

/// One compiled library's public surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyDef {
    pub name: String,

    /// Dotted numeric version, e.g. `4.1.0.0`
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub namespaces: Vec<NamespaceDef>,

    /// Types this assembly forwards to another assembly
    #[serde(default)]
    pub forwarded_types: Vec<TypeForwarderDef>,

    /// References the provider could not resolve while loading this assembly
    #[serde(default)]
    pub unresolved_references: Vec<String>,

    /// Reference facade with no real definitions
    #[serde(default)]
    pub is_facade: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceDef {
    pub name: String,

    #[serde(default)]
    pub types: Vec<TypeDef>,
}

/// A type forwarder: `type_name` lives in `target_assembly`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeForwarderDef {
    /// Namespace-qualified name of the forwarded type
    #[serde(rename = "type")]
    pub type_name: String,
    pub target_assembly: String,
}

impl AssemblyDef {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            namespaces: Vec::new(),
            forwarded_types: Vec::new(),
            unresolved_references: Vec::new(),
            is_facade: false,
        }
    }

    pub fn with_namespace(mut self, namespace: NamespaceDef) -> Self {
        self.namespaces.push(namespace);
        self.normalize();
        self
    }

    pub fn with_forwarder(
        mut self,
        type_name: impl Into<String>,
        target_assembly: impl Into<String>,
    ) -> Self {
        self.forwarded_types.push(TypeForwarderDef {
            type_name: type_name.into(),
            target_assembly: target_assembly.into(),
        });
        self
    }

    pub fn with_unresolved_reference(mut self, reference: impl Into<String>) -> Self {
        self.unresolved_references.push(reference.into());
        self
    }

    pub fn facade(mut self) -> Self {
        self.is_facade = true;
        self
    }

    /// Propagate namespace names into the types they contain.
    ///
    /// Must run after deserialisation; builders call it implicitly.
    pub fn normalize(&mut self) {
        for ns in &mut self.namespaces {
            for ty in &mut ns.types {
                ty.namespace = ns.name.clone();
            }
        }
    }

    /// Iterate every defined type
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.namespaces.iter().flat_map(|ns| ns.types.iter())
    }

    /// Find a defined (not forwarded) type by namespace-qualified name
    pub fn find_type(&self, full_name: &str) -> Option<&TypeDef> {
        self.types().find(|ty| ty.full_name() == full_name)
    }

    pub fn find_forwarder(&self, full_name: &str) -> Option<&TypeForwarderDef> {
        self.forwarded_types
            .iter()
            .find(|fwd| fwd.type_name == full_name)
    }

    /// Compare `version` numerically, component by component.
    ///
    /// Missing components count as zero; non-numeric components as zero.
    pub fn compare_version(&self, other: &AssemblyDef) -> Ordering {
        let left = version_parts(&self.version);
        let right = version_parts(&other.version);
        let len = left.len().max(right.len());
        (0..len)
            .map(|i| {
                let a = left.get(i).copied().unwrap_or(0);
                let b = right.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

fn version_parts(version: &str) -> Vec<u64> {
    version
        .split('.')
        .map(|part| part.trim().parse::<u64>().unwrap_or(0))
        .collect()
}

impl NamespaceDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    pub fn with_type(mut self, mut ty: TypeDef) -> Self {
        ty.namespace = self.name.clone();
        self.types.push(ty);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_sets_namespace() {
        let asm = AssemblyDef::new("Lib", "1.0.0.0")
            .with_namespace(NamespaceDef::new("Foo").with_type(TypeDef::class("Bar")));
        let ty = asm.types().next().unwrap();
        assert_eq!(ty.namespace, "Foo");
        assert_eq!(ty.full_name(), "Foo.Bar");
        assert!(asm.find_type("Foo.Bar").is_some());
        assert!(asm.find_type("Foo.Baz").is_none());
    }

    #[test]
    fn test_version_comparison() {
        let a = AssemblyDef::new("Lib", "4.1.0.0");
        let b = AssemblyDef::new("Lib", "4.0.9.9");
        let c = AssemblyDef::new("Lib", "4.1");
        assert_eq!(a.compare_version(&b), Ordering::Greater);
        assert_eq!(b.compare_version(&a), Ordering::Less);
        assert_eq!(a.compare_version(&c), Ordering::Equal);
    }

    #[test]
    fn test_deserialize_defaults() {
        let asm: AssemblyDef = serde_json::from_value(serde_json::json!({
            "name": "Lib",
            "namespaces": [{ "name": "Foo", "types": [{ "name": "Bar" }] }]
        }))
        .unwrap();
        assert_eq!(asm.version, "0.0.0.0");
        assert!(asm.forwarded_types.is_empty());
        assert!(!asm.is_facade);
    }
}

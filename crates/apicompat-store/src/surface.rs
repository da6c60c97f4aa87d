//! Surface files: one serialized `AssemblyDef` per YAML or JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use apicompat_core::model::AssemblyDef;

use crate::errors::{invalid_surface, io_error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceFormat {
    Yaml,
    Json,
}

impl SurfaceFormat {
    /// Format implied by a file extension, if it is a surface file at all
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Some(SurfaceFormat::Yaml),
            Some("json") => Some(SurfaceFormat::Json),
            _ => None,
        }
    }
}

/// Parse one surface document.
///
/// # Errors
///
/// `InvalidSurface` when the document does not describe an assembly.
pub fn parse_surface(text: &str, format: SurfaceFormat, origin: &Path) -> Result<AssemblyDef> {
    let mut assembly: AssemblyDef = match format {
        SurfaceFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|e| invalid_surface(origin, e.to_string()))?
        }
        SurfaceFormat::Json => {
            serde_json::from_str(text).map_err(|e| invalid_surface(origin, e.to_string()))?
        }
    };
    assembly.normalize();
    Ok(assembly)
}

/// Load a surface file, or every surface file in a directory (sorted by name).
///
/// # Errors
///
/// - `InvalidSurface` for a missing path, an unknown extension, or a
///   malformed document
/// - `Io` when a file or directory cannot be read
pub fn load_surface(path: &Path) -> Result<Vec<AssemblyDef>> {
    if !path.exists() {
        return Err(invalid_surface(path, "surface path does not exist"));
    }

    if path.is_dir() {
        let mut files: Vec<PathBuf> = fs::read_dir(path)
            .map_err(|e| io_error("read_surface_dir", path, e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && SurfaceFormat::from_path(p).is_some())
            .collect();
        files.sort();
        return files.iter().map(|file| load_surface_file(file)).collect();
    }

    Ok(vec![load_surface_file(path)?])
}

fn load_surface_file(path: &Path) -> Result<AssemblyDef> {
    let format = SurfaceFormat::from_path(path)
        .ok_or_else(|| invalid_surface(path, "expected a .yaml, .yml or .json surface file"))?;
    let text = fs::read_to_string(path).map_err(|e| io_error("read_surface", path, e))?;
    let assembly = parse_surface(&text, format, path)?;
    tracing::debug!(
        assembly = %assembly.name,
        path = %path.display(),
        "Loaded surface"
    );
    Ok(assembly)
}

/// Load every path in order.
///
/// # Errors
///
/// The first error from [`load_surface`].
pub fn load_surfaces(paths: &[PathBuf]) -> Result<Vec<AssemblyDef>> {
    let mut assemblies = Vec::new();
    for path in paths {
        assemblies.extend(load_surface(path)?);
    }
    Ok(assemblies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SurfaceFormat::from_path(Path::new("a.yml")), Some(SurfaceFormat::Yaml));
        assert_eq!(SurfaceFormat::from_path(Path::new("a.json")), Some(SurfaceFormat::Json));
        assert_eq!(SurfaceFormat::from_path(Path::new("a.dll")), None);
    }

    #[test]
    fn test_parse_normalizes_namespaces() {
        let text = r#"
name: Lib
version: 1.2.0.0
namespaces:
  - name: Foo
    types:
      - name: Bar
        members:
          - name: Baz
            parameters:
              - { name: value, type: System.Int32 }
"#;
        let asm = parse_surface(text, SurfaceFormat::Yaml, Path::new("lib.yaml")).unwrap();
        let ty = asm.types().next().unwrap();
        assert_eq!(ty.full_name(), "Foo.Bar");
        assert_eq!(ty.members[0].display_name(), "Baz(System.Int32)");
    }

    #[test]
    fn test_malformed_surface() {
        let err = parse_surface("{ \"version\": 1 }", SurfaceFormat::Json, Path::new("x.json")).unwrap_err();
        assert_eq!(err.code(), "ERR_INVALID_SURFACE");
        assert_eq!(err.path(), Some("x.json"));
    }
}

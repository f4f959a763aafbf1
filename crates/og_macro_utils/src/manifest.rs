use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The parsed `Cargo.toml` of the crate invoking a proc-macro.
///
/// Generated code has to name `og_serial` the way the calling crate sees
/// it. A crate may depend on `og_serial` directly or only on the
/// `objgraph` facade, so the path is looked up in its manifest.
///
/// # Example
///
/// ```rust
/// # use og_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("og_serial"));
/// ```
///
/// # Resolution rules
///
/// 1. A crate listed in `dependencies` resolves to `::crate_name`.
/// 2. A crate named `og_*` resolves to `::objgraph::*` when the caller
///    depends on the `objgraph` facade (`og_serial` -> `::objgraph::serial`).
/// 3. Steps 1 and 2 are repeated on `dev-dependencies`.
/// 4. Anything else, including an unreadable manifest, falls back to `::crate_name`.
///
/// A crate that refers to itself should declare `extern crate self as name;`
/// so the absolute path also works inside it.
#[derive(Debug)]
pub struct Manifest {
    document: Option<Document<Box<str>>>,
    modified_time: Option<SystemTime>,
}

const FACADE_NAME: &str = "objgraph";
const MEMBER_PREFIX: &str = "og_";

impl Manifest {
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        path.exists().then_some(path)
    }

    fn load(path: &PathBuf) -> Self {
        let modified_time = std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .ok();
        let document = std::fs::read_to_string(path)
            .ok()
            .and_then(|text| Document::parse(text.into_boxed_str()).ok());
        Self {
            document,
            modified_time,
        }
    }

    fn absolute(name: &str) -> Option<syn::Path> {
        syn::parse_str(&format!("::{name}")).ok()
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Self::absolute(name);
        }
        let member = name.strip_prefix(MEMBER_PREFIX)?;
        if !deps.contains_key(FACADE_NAME) {
            return None;
        }
        syn::parse_str(&format!("::{FACADE_NAME}::{member}")).ok()
    }

    /// Returns the path under which the caller can reach crate `name`.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        if let Some(document) = &self.document {
            for section in ["dependencies", "dev-dependencies"] {
                if let Some(Item::Table(deps)) = document.get(section)
                    && let Some(path) = Self::find_in_deps(deps, name)
                {
                    return path;
                }
            }
        }
        // Crate names are always valid paths; `crate` only covers malformed input.
        Self::absolute(name).unwrap_or_else(|| syn::parse_quote!(crate))
    }

    /// Runs `func` against the caller's manifest.
    ///
    /// Manifests are cached per path and re-read only when the file's
    /// modification time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(path) = Self::manifest_path() else {
            return func(&Self {
                document: None,
                modified_time: None,
            });
        };

        let current_time = std::fs::metadata(&path)
            .and_then(|metadata| metadata.modified())
            .ok();

        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&path)
                && current_time.is_some()
                && manifest.modified_time == current_time
            {
                return func(manifest);
            }
        }

        let manifest = Self::load(&path);
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Manifest;
    use toml_edit::Document;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            document: Document::parse(text.to_owned().into_boxed_str()).ok(),
            modified_time: None,
        }
    }

    fn segments(path: &syn::Path) -> Vec<String> {
        path.segments.iter().map(|s| s.ident.to_string()).collect()
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\nog_serial = \"0.0.1\"\n");
        let path = m.get_crate_path("og_serial");
        assert!(path.leading_colon.is_some());
        assert_eq!(segments(&path), ["og_serial"]);
    }

    #[test]
    fn through_facade() {
        let m = manifest("[dev-dependencies]\nobjgraph = { path = \"..\" }\n");
        assert_eq!(segments(&m.get_crate_path("og_serial")), ["objgraph", "serial"]);
    }

    #[test]
    fn fallback() {
        let m = manifest("not toml [");
        assert_eq!(segments(&m.get_crate_path("og_serial")), ["og_serial"]);
    }
}

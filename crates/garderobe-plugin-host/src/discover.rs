use std::env::consts::DLL_EXTENSION;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use libloading::Library;

use garderobe_plugin_sdk::{
    take_export, DataPlugin, FunctionalPlugin, PluginEntry, PluginModule, SerializePlugin,
    ENTRY_SYMBOL,
};

use crate::config::PluginDirs;
use crate::error::HostError;
use crate::hosted::HostedPlugin;

/// The capability a plugin directory is scanned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Data,
    Functional,
    Serialize,
}

impl Capability {
    pub fn label(self) -> &'static str {
        match self {
            Capability::Data => "data",
            Capability::Functional => "functional",
            Capability::Serialize => "serialize",
        }
    }
}

/// Everything one startup scan produced.
///
/// Instances appear in module-enumeration order (file name order within a
/// directory), then registration order within each module. Skipped modules
/// land in `errors` and never fail the scan.
pub struct DiscoveredPlugins {
    pub data: Vec<HostedPlugin<dyn DataPlugin>>,
    pub functional: Vec<HostedPlugin<dyn FunctionalPlugin>>,
    pub serialize: Vec<HostedPlugin<dyn SerializePlugin>>,
    pub errors: Vec<HostError>,
}

impl DiscoveredPlugins {
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            functional: Vec::new(),
            serialize: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.functional.is_empty() && self.serialize.is_empty()
    }
}

/// Enumerates candidate plugin libraries in one directory, non-recursive.
///
/// A missing directory is not an error; plugin absence is normal. Entries
/// are sorted by file name so module-enumeration order is deterministic.
pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>, HostError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(dir).map_err(|source| HostError::Scan {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut candidates: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case(DLL_EXTENSION))
                    .unwrap_or(false)
        })
        .collect();
    candidates.sort();
    Ok(candidates)
}

/// Scans the three plugin directories and loads every module they contain.
///
/// Each directory contributes only its own capability: registrations of
/// another kind found there are dropped with a warning, matching the
/// per-directory contract of the original loaders.
pub fn discover(dirs: &PluginDirs) -> DiscoveredPlugins {
    let mut result = DiscoveredPlugins::empty();

    for capability in [Capability::Data, Capability::Functional, Capability::Serialize] {
        let dir = dirs.for_capability(capability);
        let candidates = match scan_directory(dir) {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::warn!(directory = %dir.display(), error = %err, "plugin directory scan failed");
                result.errors.push(err);
                continue;
            }
        };
        for candidate in candidates {
            match unsafe { load_module(&candidate) } {
                Ok((library, module)) => {
                    keep_capability(capability, library, module, &mut result);
                }
                Err(err) => {
                    tracing::warn!(module = %candidate.display(), error = %err, "skipping plugin module");
                    result.errors.push(err);
                }
            }
        }
    }

    result
}

unsafe fn load_module(path: &Path) -> Result<(Arc<Library>, PluginModule), HostError> {
    let library = Library::new(path).map_err(|source| HostError::LibraryLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let entry = library
        .get::<PluginEntry>(ENTRY_SYMBOL.as_bytes())
        .map_err(|_| HostError::MissingEntry {
            path: path.to_path_buf(),
        })?;
    let module = take_export(*entry).into_module();
    Ok((Arc::new(library), module))
}

fn keep_capability(
    capability: Capability,
    library: Arc<Library>,
    module: PluginModule,
    result: &mut DiscoveredPlugins,
) {
    let (data, functional, serialize) = module.into_parts();
    let dropped = match capability {
        Capability::Data => {
            let dropped = functional.len() + serialize.len();
            result
                .data
                .extend(data.into_iter().map(|plugin| HostedPlugin::dynamic(library.clone(), plugin)));
            dropped
        }
        Capability::Functional => {
            let dropped = data.len() + serialize.len();
            result.functional.extend(
                functional
                    .into_iter()
                    .map(|plugin| HostedPlugin::dynamic(library.clone(), plugin)),
            );
            dropped
        }
        Capability::Serialize => {
            let dropped = data.len() + functional.len();
            result.serialize.extend(
                serialize
                    .into_iter()
                    .map(|plugin| HostedPlugin::dynamic(library.clone(), plugin)),
            );
            dropped
        }
    };
    if dropped > 0 {
        tracing::warn!(
            capability = capability.label(),
            dropped,
            "module registered plugins outside its directory's capability"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn fake_library(dir: &Path, stem: &str) -> PathBuf {
        let path = dir.join(format!("{stem}.{DLL_EXTENSION}"));
        let mut file = File::create(&path).unwrap();
        write!(file, "not a real library").unwrap();
        path
    }

    #[test]
    fn missing_directory_yields_empty_scan() {
        let dir = tempdir().unwrap();
        let candidates = scan_directory(&dir.path().join("absent")).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn scan_keeps_only_dynamic_libraries_sorted() {
        let dir = tempdir().unwrap();
        let second = fake_library(dir.path(), "zeta");
        let first = fake_library(dir.path(), "alpha");
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        let candidates = scan_directory(dir.path()).unwrap();
        assert_eq!(candidates, vec![first, second]);
    }

    #[test]
    fn corrupt_module_is_skipped_not_fatal() {
        let root = tempdir().unwrap();
        let dirs = PluginDirs::under(root.path());
        std::fs::create_dir_all(&dirs.serialize).unwrap();
        fake_library(&dirs.serialize, "broken");

        let discovered = discover(&dirs);
        assert!(discovered.is_empty());
        assert_eq!(discovered.errors.len(), 1);
    }

    #[test]
    fn all_directories_missing_is_a_clean_empty_result() {
        let root = tempdir().unwrap();
        let discovered = discover(&PluginDirs::under(root.path()));
        assert!(discovered.is_empty());
        assert!(discovered.errors.is_empty());
    }
}

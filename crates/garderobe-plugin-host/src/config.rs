use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::discover::Capability;

/// The three well-known plugin directories, scanned independently at
/// startup. Defaults are resolved relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDirs {
    #[serde(default = "default_data_dir")]
    pub data: PathBuf,
    #[serde(default = "default_functional_dir")]
    pub functional: PathBuf,
    #[serde(default = "default_serialize_dir")]
    pub serialize: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data-plugins")
}

fn default_functional_dir() -> PathBuf {
    PathBuf::from("functional-plugins")
}

fn default_serialize_dir() -> PathBuf {
    PathBuf::from("serialize-plugins")
}

impl Default for PluginDirs {
    fn default() -> Self {
        Self {
            data: default_data_dir(),
            functional: default_functional_dir(),
            serialize: default_serialize_dir(),
        }
    }
}

impl PluginDirs {
    /// The default directory names, rooted somewhere other than the
    /// working directory.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let defaults = Self::default();
        Self {
            data: root.join(defaults.data),
            functional: root.join(defaults.functional),
            serialize: root.join(defaults.serialize),
        }
    }

    pub fn for_capability(&self, capability: Capability) -> &Path {
        match capability {
            Capability::Data => &self.data,
            Capability::Functional => &self.functional,
            Capability::Serialize => &self.serialize,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_relative_to_the_working_directory() {
        let dirs = PluginDirs::default();
        assert_eq!(dirs.data, PathBuf::from("data-plugins"));
        assert_eq!(dirs.functional, PathBuf::from("functional-plugins"));
        assert_eq!(dirs.serialize, PathBuf::from("serialize-plugins"));
    }

    #[test]
    fn under_reroots_every_directory() {
        let dirs = PluginDirs::under("/opt/garderobe");
        assert_eq!(dirs.serialize, PathBuf::from("/opt/garderobe/serialize-plugins"));
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let dirs: PluginDirs = serde_json::from_str(r#"{"data": "/srv/plugins"}"#).unwrap();
        assert_eq!(dirs.data, PathBuf::from("/srv/plugins"));
        assert_eq!(dirs.functional, PathBuf::from("functional-plugins"));
    }
}

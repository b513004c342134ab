use garderobe_plugin_host::HostedPlugin;

use crate::error::EngineError;

/// Ordered plugin list with at most one active selection.
///
/// The list is append-only after startup; the "None" sentinel of the
/// original selection UI maps to `select(None)`.
pub struct PluginBank<P: ?Sized> {
    plugins: Vec<HostedPlugin<P>>,
    active: Option<usize>,
}

impl<P: ?Sized> PluginBank<P> {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
            active: None,
        }
    }

    pub fn push(&mut self, plugin: HostedPlugin<P>) {
        self.plugins.push(plugin);
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.plugins.iter().map(|hosted| &**hosted)
    }

    pub fn get(&self, index: usize) -> Option<&P> {
        self.plugins.get(index).map(|hosted| &**hosted)
    }

    /// Sets or clears the active slot.
    pub fn select(&mut self, selection: Option<usize>) -> Result<(), EngineError> {
        if let Some(index) = selection {
            if index >= self.plugins.len() {
                return Err(EngineError::InvalidSelection {
                    index,
                    available: self.plugins.len(),
                });
            }
        }
        self.active = selection;
        Ok(())
    }

    pub fn active(&self) -> Option<&P> {
        self.active.and_then(|index| self.get(index))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }
}

impl<P: ?Sized> Default for PluginBank<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    trait Named {
        fn name(&self) -> &'static str;
    }

    struct A;
    struct B;

    impl Named for A {
        fn name(&self) -> &'static str {
            "a"
        }
    }

    impl Named for B {
        fn name(&self) -> &'static str {
            "b"
        }
    }

    fn bank() -> PluginBank<dyn Named> {
        let mut bank = PluginBank::new();
        bank.push(HostedPlugin::builtin(Box::new(A) as Box<dyn Named>));
        bank.push(HostedPlugin::builtin(Box::new(B) as Box<dyn Named>));
        bank
    }

    #[test]
    fn nothing_is_active_by_default() {
        assert!(bank().active().is_none());
    }

    #[test]
    fn selection_round_trips() {
        let mut bank = bank();
        bank.select(Some(1)).unwrap();
        assert_eq!(bank.active().unwrap().name(), "b");
        bank.select(None).unwrap();
        assert!(bank.active().is_none());
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let mut bank = bank();
        let err = bank.select(Some(2)).unwrap_err();
        assert!(matches!(
            err,
            crate::EngineError::InvalidSelection {
                index: 2,
                available: 2
            }
        ));
        assert!(bank.active().is_none());
    }

    #[test]
    fn iter_preserves_registration_order() {
        let names: Vec<_> = bank().iter().map(Named::name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}

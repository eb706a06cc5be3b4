use std::collections::BTreeMap;

/// Looks up user-facing strings (button labels, prompt intros) for the active language.
pub trait Translate: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Map-backed translations. Unknown keys translate to themselves.
///
/// ```
/// use smooch_core::{Translate, TranslationCatalog};
///
/// let catalog = TranslationCatalog::from_iter([("yes", "Sí")]);
/// assert_eq!(catalog.translate("yes"), "Sí");
/// assert_eq!(catalog.translate("no"), "no");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationCatalog {
    entries: BTreeMap<String, String>,
}

impl TranslationCatalog {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Overlays `overrides` on top of the current entries.
    pub fn merge<I, K, V>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in overrides {
            self.entries.insert(key.into(), value.into());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TranslationCatalog
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut catalog = Self::default();
        catalog.merge(iter);
        catalog
    }
}

impl Translate for TranslationCatalog {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_defaults() {
        let mut catalog = TranslationCatalog::from_iter([("yes", "Yes"), ("no", "No")]);
        catalog.merge([("yes", "Oui")]);
        assert_eq!(catalog.translate("yes"), "Oui");
        assert_eq!(catalog.translate("no"), "No");
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn closures_translate() {
        let upper = |key: &str| key.to_uppercase();
        assert_eq!(upper.translate("ask_to_escalate"), "ASK_TO_ESCALATE");
    }
}

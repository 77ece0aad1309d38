use std::collections::BTreeMap;

use rigbench_advisor::Translator;
use rigbench_ops::{TranslationStore, BUILTIN_LANGUAGES};
use rigbench_types::Result;
use tracing::info;

use crate::validation_error;

/// Two-letter key derived from a language name, e.g. "Deutsch" -> "de".
pub fn language_key(name: &str) -> Result<String> {
    let key: String = name.trim().to_lowercase().chars().take(2).collect();
    if key.is_empty() {
        return Err(validation_error("Please enter a language name."));
    }
    Ok(key)
}

/// Adds UI languages by machine-translating the base string table.
pub struct Localizer<T: Translator> {
    translator: T,
    store: TranslationStore,
}

impl<T: Translator> Localizer<T> {
    pub fn new(translator: T, store: TranslationStore) -> Self {
        Self { translator, store }
    }

    /// Built-in languages first, then custom ones in key order.
    pub fn languages(&self) -> Result<Vec<String>> {
        let mut languages: Vec<String> =
            BUILTIN_LANGUAGES.iter().map(|l| l.to_string()).collect();
        languages.extend(self.store.load()?.into_keys());
        Ok(languages)
    }

    pub fn strings(&self, key: &str) -> Result<Option<BTreeMap<String, String>>> {
        Ok(self.store.load()?.remove(key))
    }

    /// Translates `base` into `language_name` and persists it; returns the new key.
    pub async fn add_language(
        &self,
        base: &BTreeMap<String, String>,
        language_name: &str,
    ) -> Result<String> {
        let key = language_key(language_name)?;
        let mut table = self.store.load()?;
        if BUILTIN_LANGUAGES.contains(&key.as_str()) || table.contains_key(&key) {
            return Err(validation_error(format!(
                "Language '{}' already exists.",
                key.to_uppercase()
            )));
        }

        let translated = self
            .translator
            .translate(base, language_name.trim())
            .await?;
        table.insert(key.clone(), translated);
        self.store.save(&table)?;
        info!("Added UI language {key} ({})", language_name.trim());
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use async_trait::async_trait;
    use rigbench_advisor::CannedAdvisor;
    use rigbench_types::RigbenchError;

    use super::*;

    #[derive(Clone, Default)]
    struct CountingTranslator {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Translator for CountingTranslator {
        async fn translate(
            &self,
            base: &BTreeMap<String, String>,
            target_language: &str,
        ) -> Result<BTreeMap<String, String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            CannedAdvisor::new().translate(base, target_language).await
        }
    }

    fn base() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("game".to_string(), "Game".to_string()),
            ("device".to_string(), "Device".to_string()),
        ])
    }

    #[test]
    fn derives_two_letter_keys() {
        assert_eq!(language_key(" Deutsch ").expect("key"), "de");
        assert_eq!(language_key("FR").expect("key"), "fr");
        assert_eq!(language_key("j").expect("key"), "j");
        assert_eq!(language_key("Ελληνικά").expect("key"), "ελ");
        assert!(language_key("  ").is_err());
    }

    #[tokio::test]
    async fn adds_and_persists_a_language() {
        let dir = tempfile::tempdir().expect("tempdir");
        let translator = CountingTranslator::default();
        let localizer =
            Localizer::new(translator.clone(), TranslationStore::in_dir(dir.path()));

        let key = localizer.add_language(&base(), "Deutsch").await.expect("add");
        assert_eq!(key, "de");
        assert_eq!(localizer.languages().expect("list"), ["en", "tr", "de"]);
        let strings = localizer.strings("de").expect("load").expect("present");
        assert_eq!(
            strings.get("game").map(String::as_str),
            Some("[Deutsch] Game")
        );
        assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn existing_keys_are_rejected_without_translating() {
        let dir = tempfile::tempdir().expect("tempdir");
        let translator = CountingTranslator::default();
        let localizer =
            Localizer::new(translator.clone(), TranslationStore::in_dir(dir.path()));

        let err = localizer
            .add_language(&base(), "English")
            .await
            .expect_err("en is built in");
        assert!(matches!(err, RigbenchError::Validation(ref msg) if msg.contains("'EN'")));

        localizer.add_language(&base(), "Deutsch").await.expect("add");
        assert!(localizer.add_language(&base(), "deutsch").await.is_err());
        assert_eq!(translator.calls.load(Ordering::SeqCst), 1);
    }
}

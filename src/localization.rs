use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Language used when the user's language is unknown or unsupported
pub const DEFAULT_LANGUAGE: &str = "en";

const RESOURCES: [(&str, &str); 2] = [
    ("en", include_str!("../locales/en/main.ftl")),
    ("fr", include_str!("../locales/fr/main.ftl")),
];

static LOCALIZATION_MANAGER: LazyLock<LocalizationManager> = LazyLock::new(LocalizationManager::new);

/// Localization manager for the recipe bot
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a new localization manager with every bundled locale
    pub fn new() -> Self {
        let mut bundles = HashMap::new();

        for (code, source) in RESOURCES {
            match Self::create_bundle(code, source) {
                Some(bundle) => {
                    bundles.insert(code.to_string(), bundle);
                }
                None => warn!(locale = code, "Skipping locale that failed to load"),
            }
        }

        Self { bundles }
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(code: &str, source: &str) -> Option<FluentBundle<FluentResource>> {
        let locale: LanguageIdentifier = code.parse().ok()?;
        let mut bundle = FluentBundle::new_concurrent(vec![locale]);
        // Telegram renders the bidi isolation marks literally
        bundle.set_use_isolating(false);

        let resource = match FluentResource::try_new(source.to_string()) {
            Ok(resource) => resource,
            Err((resource, errors)) => {
                warn!(locale = code, errors = ?errors, "Locale resource has syntax errors");
                resource
            }
        };
        bundle.add_resource(resource).ok()?;

        Some(bundle)
    }

    /// Whether a bundle exists for the language
    pub fn supports(&self, language: &str) -> bool {
        self.bundles.contains_key(language)
    }

    /// Get a localized message, falling back to English
    pub fn get_message(&self, key: &str, args: Option<&FluentArgs>, language: &str) -> String {
        let candidates = [language, DEFAULT_LANGUAGE];

        for bundle in candidates.iter().filter_map(|code| self.bundles.get(*code)) {
            let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) else {
                continue;
            };

            let mut errors = Vec::new();
            let value = bundle.format_pattern(pattern, args, &mut errors);
            if !errors.is_empty() {
                warn!(key, errors = ?errors, "Errors while formatting message");
            }
            return value.into_owned();
        }

        format!("Missing translation: {key}")
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, args: &[(&str, &str)], language: &str) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.get_message(key, Some(&fluent_args), language)
    }
}

impl Default for LocalizationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a Telegram `language_code` such as `fr-CA` to a supported language
pub fn detect_language(language_code: Option<&str>) -> &'static str {
    let Some(code) = language_code else {
        return DEFAULT_LANGUAGE;
    };
    let primary = code
        .split(|c| c == '-' || c == '_')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    RESOURCES
        .iter()
        .map(|(supported, _)| *supported)
        .find(|supported| *supported == primary && LOCALIZATION_MANAGER.supports(supported))
        .unwrap_or(DEFAULT_LANGUAGE)
}

/// Localized message for the user's language
pub fn t_lang(key: &str, language_code: Option<&str>) -> String {
    LOCALIZATION_MANAGER.get_message(key, None, detect_language(language_code))
}

/// Localized message with arguments for the user's language
pub fn t_args_lang(key: &str, args: &[(&str, &str)], language_code: Option<&str>) -> String {
    LOCALIZATION_MANAGER.get_message_with_args(key, args, detect_language(language_code))
}

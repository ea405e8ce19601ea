use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Language used when the user's language is unknown or unsupported
pub const DEFAULT_LANGUAGE: &str = "es";

/// Languages with a bundled message catalogue
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["es", "en"];

const ES_MESSAGES: &str = include_str!("../locales/es/main.ftl");
const EN_MESSAGES: &str = include_str!("../locales/en/main.ftl");

type Bundle = FluentBundle<FluentResource>;

/// Localization manager for the catalog bot
pub struct LocalizationManager {
    bundles: HashMap<&'static str, Arc<Bundle>>,
}

impl LocalizationManager {
    /// Create a new localization manager with every bundled language
    pub fn new() -> anyhow::Result<Self> {
        let mut bundles = HashMap::new();
        for (language, source) in [("es", ES_MESSAGES), ("en", EN_MESSAGES)] {
            let locale: LanguageIdentifier = language.parse()?;
            bundles.insert(language, Arc::new(Self::create_bundle(locale, source)?));
        }
        Ok(Self { bundles })
    }

    fn create_bundle(locale: LanguageIdentifier, source: &str) -> anyhow::Result<Bundle> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Unicode isolation marks would end up inside Telegram HTML captions
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            anyhow::anyhow!("invalid message catalogue for {locale}: {errors:?}")
        })?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow::anyhow!("duplicate messages for {locale}: {errors:?}"))?;

        Ok(bundle)
    }

    /// Get a localized message in `language`, falling back to the default language
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let bundle = match self
            .bundles
            .get(language)
            .or_else(|| self.bundles.get(DEFAULT_LANGUAGE))
        {
            Some(bundle) => bundle,
            None => return format!("Missing translation: {key}"),
        };

        let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) else {
            return format!("Missing translation: {key}");
        };

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (name, value) in args {
                fluent_args.set(*name, FluentValue::from(*value));
            }
            fluent_args
        });

        let mut errors = Vec::new();
        let value = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            warn!(key, language, ?errors, "Errors while formatting localized message");
        }
        value.into_owned()
    }
}

/// Map a Telegram language code (`en-US`, `es`, ...) to a supported language
pub fn detect_language(language_code: Option<&str>) -> &'static str {
    let primary = language_code
        .and_then(|code| code.split(['-', '_']).next())
        .map(str::to_ascii_lowercase);

    SUPPORTED_LANGUAGES
        .into_iter()
        .find(|language| primary.as_deref() == Some(*language))
        .unwrap_or(DEFAULT_LANGUAGE)
}

static LOCALIZATION_MANAGER: LazyLock<Option<LocalizationManager>> =
    LazyLock::new(|| match LocalizationManager::new() {
        Ok(manager) => Some(manager),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load message catalogues");
            None
        }
    });

/// Force loading of the message catalogues, reporting catalogue errors early
pub fn init_localization() -> anyhow::Result<()> {
    match LOCALIZATION_MANAGER.as_ref() {
        Some(_) => Ok(()),
        None => Err(anyhow::anyhow!("message catalogues could not be loaded")),
    }
}

/// Localized message for the user's Telegram language code
pub fn t_lang(key: &str, language_code: Option<&str>) -> String {
    t_args_lang(key, &[], language_code)
}

/// Localized message with arguments for the user's Telegram language code
pub fn t_args_lang(key: &str, args: &[(&str, &str)], language_code: Option<&str>) -> String {
    let Some(manager) = LOCALIZATION_MANAGER.as_ref() else {
        return format!("Missing translation: {key}");
    };
    let language = detect_language(language_code);
    if args.is_empty() {
        manager.get_message_in_language(key, language, None)
    } else {
        let args_map: HashMap<&str, &str> = args.iter().copied().collect();
        manager.get_message_in_language(key, language, Some(&args_map))
    }
}

use dioxus_i18n::prelude::*;
use unic_langid::{langid, LanguageIdentifier};

/// Initialize i18n with the configured language, English as fallback
pub fn init_i18n(language: &str) -> I18nConfig {
    let selected = language.parse::<LanguageIdentifier>().unwrap_or_else(|_| {
        log::warn!("Unknown language tag {:?}, using en-US", language);
        langid!("en-US")
    });

    I18nConfig::new(selected)
        .with_locale(Locale::new_static(
            langid!("en-US"),
            include_str!("../locales/en-US.ftl"),
        ))
        .with_locale(Locale::new_static(
            langid!("ko-KR"),
            include_str!("../locales/ko-KR.ftl"),
        ))
        .with_fallback(langid!("en-US"))
}

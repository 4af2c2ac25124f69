// Natural-language defaults derived from a country or a locale
use crate::countries::country_language;
use crate::locale::locale_language;

/// Language code we use when even the locale is unusable
pub const FALLBACK_LANGUAGE: &str = "en";

/// Language the runtime locale speaks, e.g. `fr` for `fr-CA`
pub fn language_for_locale(locale: &str) -> String {
    locale_language(locale).unwrap_or_else(|| FALLBACK_LANGUAGE.to_string())
}

/// Majority language of a country, or the locale's language when the table has no row
pub fn language_for_country(country_code: &str, locale: &str) -> String {
    match country_language(country_code) {
        Some(lang) => lang.to_string(),
        None => language_for_locale(locale),
    }
}

// Runtime locale detection
//
// The locale is the offline signal: it seeds the language and currency
// defaults, and it is the fallback when IP geolocation is unavailable.

/// What we assume when the environment tells us nothing
pub const DEFAULT_LOCALE: &str = "en-US";

/// Environment variables consulted, in precedence order
const LOCALE_VARS: [&str; 4] = ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"];

/// Source of the current locale string (`language-REGION`)
pub trait LocaleProvider: Send + Sync {
    /// The raw locale, or `None` when the runtime does not expose one
    fn locale(&self) -> Option<String>;

    /// Normalized locale with the `en-US` fallback applied
    fn current_locale(&self) -> String {
        self.locale()
            .and_then(|raw| normalize_locale(&raw))
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
    }
}

/// Reads the POSIX locale variables
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLocale;

impl LocaleProvider for EnvLocale {
    fn locale(&self) -> Option<String> {
        LOCALE_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            // LANGUAGE may be a colon-separated priority list
            .filter_map(|value| value.split(':').next().map(str::to_string))
            .find(|value| normalize_locale(value).is_some())
    }
}

/// A locale pinned by configuration or tests
#[derive(Debug, Clone)]
pub struct FixedLocale(pub String);

impl FixedLocale {
    pub fn new(locale: impl Into<String>) -> Self {
        Self(locale.into())
    }
}

impl LocaleProvider for FixedLocale {
    fn locale(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Turn `de_DE.UTF-8`, `pt-br` or `en-US@euro` into `de-DE`, `pt-BR`, `en-US`
///
/// Returns `None` for empty input and for the `C`/`POSIX` pseudo-locales.
pub fn normalize_locale(raw: &str) -> Option<String> {
    let base = raw
        .trim()
        .split(['.', '@'])
        .next()
        .unwrap_or("")
        .replace('_', "-");

    let mut parts = base.split('-').filter(|p| !p.is_empty());
    let language = parts.next()?.to_lowercase();

    if language == "c" || language == "posix" {
        return None;
    }

    match parts.next() {
        Some(region) => Some(format!("{}-{}", language, region.to_uppercase())),
        None => Some(language),
    }
}

/// Primary language subtag, e.g. `fr` for `fr-CA`
pub fn locale_language(locale: &str) -> Option<String> {
    normalize_locale(locale).and_then(|l| l.split('-').next().map(str::to_string))
}

/// Region subtag, upper-cased, e.g. `CA` for `fr-ca`
pub fn locale_region(locale: &str) -> Option<String> {
    normalize_locale(locale).and_then(|l| l.split('-').nth(1).map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("en-US").as_deref(), Some("en-US"));
        assert_eq!(normalize_locale("de_DE.UTF-8").as_deref(), Some("de-DE"));
        assert_eq!(normalize_locale("pt-br").as_deref(), Some("pt-BR"));
        assert_eq!(normalize_locale("fr_FR@euro").as_deref(), Some("fr-FR"));
        assert_eq!(normalize_locale("ja").as_deref(), Some("ja"));
        assert_eq!(normalize_locale("C.UTF-8"), None);
        assert_eq!(normalize_locale("POSIX"), None);
        assert_eq!(normalize_locale("  "), None);
    }

    #[test]
    fn test_locale_parts() {
        assert_eq!(locale_language("fr-CA").as_deref(), Some("fr"));
        assert_eq!(locale_region("fr-ca").as_deref(), Some("CA"));
        assert_eq!(locale_region("fr"), None);
    }

    #[test]
    fn test_fixed_locale_falls_back_to_default() {
        assert_eq!(FixedLocale::new("de_AT").current_locale(), "de-AT");
        assert_eq!(FixedLocale::new("C").current_locale(), DEFAULT_LOCALE);
        assert_eq!(FixedLocale::new("").current_locale(), DEFAULT_LOCALE);
    }
}

// The detection pass as an ordered list of rules
//
// Each rule looks at the record as it stands after the rules before it and
// proposes at most one field. Rules only ever fill empty fields.
use crate::currency::{currency_for_country, currency_for_locale};
use crate::language::{language_for_country, language_for_locale};
use crate::location::{LocationSource, ResolvedLocation};
use crate::models::{CurrencyCode, Location};
use crate::preferences::PreferenceRecord;
use tracing::debug;

/// Everything the rules may consult besides the record itself
#[derive(Debug, Clone)]
pub struct DetectionContext {
    /// Result of the location chain; `None` when it found nothing or was not run
    pub resolved: Option<ResolvedLocation>,
    /// Normalized runtime locale
    pub locale: String,
}

impl DetectionContext {
    fn ip_location(&self) -> Option<&Location> {
        self.resolved
            .as_ref()
            .filter(|r| r.source == LocationSource::IpLookup)
            .map(|r| &r.location)
    }
}

/// A single-field update proposed by a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferencePatch {
    Location(Location),
    Currency(CurrencyCode),
    NaturalLanguages(Vec<String>),
}

impl PreferencePatch {
    fn field(&self) -> &'static str {
        match self {
            PreferencePatch::Location(_) => "location",
            PreferencePatch::Currency(_) => "currency",
            PreferencePatch::NaturalLanguages(_) => "naturalLanguages",
        }
    }

    /// Apply unless the target field is already populated; returns whether it wrote
    pub fn apply_if_empty(self, record: &mut PreferenceRecord) -> bool {
        match self {
            PreferencePatch::Location(location) if record.location.is_none() => {
                record.location = Some(location);
                true
            }
            PreferencePatch::Currency(code) if record.currency.is_none() => {
                record.currency = Some(code);
                true
            }
            PreferencePatch::NaturalLanguages(langs)
                if record.natural_languages.is_empty() && !langs.is_empty() =>
            {
                record.natural_languages = langs;
                true
            }
            _ => false,
        }
    }
}

pub type DetectionRule = fn(&PreferenceRecord, &DetectionContext) -> Option<PreferencePatch>;

/// The rules, in the order they are folded
pub const DETECTION_RULES: &[(&str, DetectionRule)] = &[
    ("location_from_ip", location_from_ip),
    ("currency_from_location", currency_from_location),
    ("language_from_ip_location", language_from_ip_location),
    ("language_from_locale", language_from_locale),
    ("currency_from_locale", currency_from_locale),
];

// A locale guess is good enough to pick a currency but is never recorded as
// the user's location.
fn location_from_ip(record: &PreferenceRecord, ctx: &DetectionContext) -> Option<PreferencePatch> {
    if record.location.is_some() {
        return None;
    }
    ctx.ip_location()
        .map(|location| PreferencePatch::Location(location.country_only()))
}

fn currency_from_location(record: &PreferenceRecord, ctx: &DetectionContext) -> Option<PreferencePatch> {
    if record.currency.is_some() {
        return None;
    }
    ctx.resolved
        .as_ref()
        .map(|r| PreferencePatch::Currency(currency_for_country(&r.location.country_code)))
}

fn language_from_ip_location(record: &PreferenceRecord, ctx: &DetectionContext) -> Option<PreferencePatch> {
    if !record.natural_languages.is_empty() {
        return None;
    }
    ctx.ip_location().map(|location| {
        PreferencePatch::NaturalLanguages(vec![language_for_country(
            &location.country_code,
            &ctx.locale,
        )])
    })
}

fn language_from_locale(record: &PreferenceRecord, ctx: &DetectionContext) -> Option<PreferencePatch> {
    if !record.natural_languages.is_empty() {
        return None;
    }
    Some(PreferencePatch::NaturalLanguages(vec![language_for_locale(&ctx.locale)]))
}

fn currency_from_locale(record: &PreferenceRecord, ctx: &DetectionContext) -> Option<PreferencePatch> {
    if record.currency.is_some() {
        return None;
    }
    Some(PreferencePatch::Currency(currency_for_locale(&ctx.locale)))
}

/// Fold the rules left to right over `record`; returns whether anything changed
pub fn apply_detection_rules(
    record: &mut PreferenceRecord,
    ctx: &DetectionContext,
    rules: &[(&str, DetectionRule)],
) -> bool {
    let mut changed = false;

    for (name, rule) in rules {
        if let Some(patch) = rule(record, ctx) {
            let field = patch.field();
            if patch.apply_if_empty(record) {
                debug!("Detection rule {} filled {}", name, field);
                changed = true;
            }
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(resolved: Option<(Location, LocationSource)>, locale: &str) -> DetectionContext {
        DetectionContext {
            resolved: resolved.map(|(location, source)| ResolvedLocation { location, source }),
            locale: locale.to_string(),
        }
    }

    fn detect(record: &mut PreferenceRecord, ctx: &DetectionContext) -> bool {
        apply_detection_rules(record, ctx, DETECTION_RULES)
    }

    #[test]
    fn test_ip_location_drives_everything() {
        let mut record = PreferenceRecord::default();
        let ctx = ctx(
            Some((Location::new("Germany", "DE"), LocationSource::IpLookup)),
            "en-US",
        );

        assert!(detect(&mut record, &ctx));
        assert_eq!(record.location, Some(Location::new("Germany", "DE")));
        assert_eq!(record.currency, Some(CurrencyCode::Eur));
        assert_eq!(record.natural_languages, vec!["de"]);
    }

    #[test]
    fn test_ip_location_drops_region_and_city() {
        let mut record = PreferenceRecord::default();
        let mut location = Location::new("Japan", "JP");
        location.city = Some("Osaka".into());
        location.region = Some("Osaka".into());

        detect(&mut record, &ctx(Some((location, LocationSource::IpLookup)), "en-US"));
        assert_eq!(record.location, Some(Location::new("Japan", "JP")));
    }

    #[test]
    fn test_locale_location_is_not_recorded() {
        let mut record = PreferenceRecord::default();
        let ctx = ctx(
            Some((Location::new("Canada", "CA"), LocationSource::Locale)),
            "fr-CA",
        );

        detect(&mut record, &ctx);
        assert_eq!(record.location, None);
        assert_eq!(record.currency, Some(CurrencyCode::Cad));
        // The locale's own language, not the country table's
        assert_eq!(record.natural_languages, vec!["fr"]);
    }

    #[test]
    fn test_unknown_ip_country_uses_locale_language() {
        let mut record = PreferenceRecord::default();
        let ctx = ctx(
            Some((Location::new("Netherlands", "NL"), LocationSource::IpLookup)),
            "nl-NL",
        );

        detect(&mut record, &ctx);
        assert_eq!(record.natural_languages, vec!["nl"]);
        assert_eq!(record.currency, Some(CurrencyCode::Eur));
    }

    #[test]
    fn test_nothing_resolved_falls_back_to_locale() {
        let mut record = PreferenceRecord::default();
        detect(&mut record, &ctx(None, "en-US"));

        assert_eq!(record.location, None);
        assert_eq!(record.natural_languages, vec!["en"]);
        assert_eq!(record.currency, Some(CurrencyCode::Usd));
    }

    #[test]
    fn test_populated_fields_are_never_overwritten() {
        let mut record = PreferenceRecord {
            natural_languages: vec!["ja".into()],
            location: Some(Location::new("Japan", "JP")),
            currency: Some(CurrencyCode::Btc),
            selected_language: Some("Rust".into()),
            ..Default::default()
        };
        let before = record.clone();

        let changed = detect(
            &mut record,
            &ctx(
                Some((Location::new("Germany", "DE"), LocationSource::IpLookup)),
                "en-US",
            ),
        );

        assert!(!changed);
        assert_eq!(record, before);
    }

    #[test]
    fn test_each_field_is_independent() {
        let mut record = PreferenceRecord {
            currency: Some(CurrencyCode::Gbp),
            ..Default::default()
        };

        detect(
            &mut record,
            &ctx(
                Some((Location::new("Germany", "DE"), LocationSource::IpLookup)),
                "en-US",
            ),
        );

        assert_eq!(record.currency, Some(CurrencyCode::Gbp));
        assert_eq!(record.natural_languages, vec!["de"]);
        assert!(record.location.is_some());
    }

    #[test]
    fn test_patch_refuses_populated_field() {
        let mut record = PreferenceRecord {
            natural_languages: vec!["en".into()],
            ..Default::default()
        };
        assert!(!PreferencePatch::NaturalLanguages(vec!["de".into()]).apply_if_empty(&mut record));
        assert!(PreferencePatch::Currency(CurrencyCode::Eur).apply_if_empty(&mut record));
        assert!(!PreferencePatch::Currency(CurrencyCode::Usd).apply_if_empty(&mut record));
        assert_eq!(record.currency, Some(CurrencyCode::Eur));
    }

    #[test]
    fn test_rule_order_is_fixed() {
        let names: Vec<&str> = DETECTION_RULES.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "location_from_ip",
                "currency_from_location",
                "language_from_ip_location",
                "language_from_locale",
                "currency_from_locale",
            ]
        );
    }
}

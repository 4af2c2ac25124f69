// Filter preferences: the persisted record and the store that owns it
//
// Auto-detected values are EDITABLE DEFAULTS. The detection pass only fills
// empty fields; once the user sets something it stays until they change it or
// clear everything.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::currency::currency_for_locale;
use crate::detection::{apply_detection_rules, DetectionContext, DETECTION_RULES};
use crate::language::language_for_locale;
use crate::locale::LocaleProvider;
use crate::location::{IpGeolocator, LocationResolver};
use crate::models::{CurrencyCode, Location};
use crate::storage::PreferenceStorage;

/// Storage key the record lives under
pub const STORAGE_KEY: &str = "issueFinder_filterPreferences";

/// Everything the user has chosen, or that we have guessed for them
///
/// Every field is independently empty; empty means "not detected yet", not
/// "any". Fields are read one at a time: a missing field, or one this build
/// cannot understand (a currency added by a newer version, a location without
/// a code), takes its default while the rest of the record is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreferenceRecord {
    /// Ordered, duplicate-free language codes
    #[serde(deserialize_with = "lenient")]
    pub natural_languages: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub location: Option<Location>,
    #[serde(deserialize_with = "lenient")]
    pub currency: Option<CurrencyCode>,

    // UI-only filters, opaque to the engine
    #[serde(deserialize_with = "lenient")]
    pub selected_language: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub selected_difficulty: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub selected_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub selected_framework: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub selected_last_activity: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub selected_license: Option<String>,
}

/// Read one field, falling back to its default when the stored value does not fit
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }

    Ok(T::deserialize(value).unwrap_or_else(|e| {
        warn!("Ignoring unreadable stored preference: {}", e);
        T::default()
    }))
}

/// Lifecycle of a store's one detection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Detecting,
    Ready,
}

struct StoreInner {
    record: PreferenceRecord,
    state: StoreState,
}

/// Owns the preference record
///
/// Constructed with its collaborators injected: where to persist, how to read
/// the locale, and optionally how to geolocate. Methods take `&self` so a
/// host can keep editing while the detection pass waits on the network; the
/// pass merges into whatever the record looks like when it finishes.
pub struct PreferenceStore {
    storage: Box<dyn PreferenceStorage>,
    locale: Box<dyn LocaleProvider>,
    geolocator: Option<Box<dyn IpGeolocator>>,
    inner: Mutex<StoreInner>,
}

impl PreferenceStore {
    /// Create a store and load whatever was persisted
    pub fn new(storage: Box<dyn PreferenceStorage>, locale: Box<dyn LocaleProvider>) -> Self {
        let record = load_record(storage.as_ref());

        Self {
            storage,
            locale,
            geolocator: None,
            inner: Mutex::new(StoreInner {
                record,
                state: StoreState::Uninitialized,
            }),
        }
    }

    /// Enable IP geolocation for the detection pass
    pub fn with_geolocator(mut self, geolocator: Box<dyn IpGeolocator>) -> Self {
        self.geolocator = Some(geolocator);
        self
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // All mutations are single-field writes; a panic mid-write cannot leave
        // the record half-updated, so a poisoned lock is still usable
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the current record
    pub fn preferences(&self) -> PreferenceRecord {
        self.lock().record.clone()
    }

    pub fn state(&self) -> StoreState {
        self.lock().state
    }

    /// True while the detection pass is running
    pub fn is_detecting_location(&self) -> bool {
        self.state() == StoreState::Detecting
    }

    /// Run the one-time detection pass
    ///
    /// Only the first call does anything; later calls return immediately.
    /// Location is resolved first (network, then locale) only when the record
    /// has none, then the detection rules fill whatever is still empty.
    pub async fn initialize(&self) {
        let needs_location = {
            let mut inner = self.lock();
            if inner.state != StoreState::Uninitialized {
                debug!("Detection pass already ran (state {:?}), skipping", inner.state);
                return;
            }
            inner.state = StoreState::Detecting;
            inner.record.location.is_none()
        };

        let locale = self.locale.current_locale();
        let resolved = if needs_location {
            LocationResolver::new(self.geolocator.as_deref(), &locale)
                .resolve()
                .await
        } else {
            debug!("Location already set, skipping location resolution");
            None
        };

        let ctx = DetectionContext { resolved, locale };

        let mut inner = self.lock();
        let changed = apply_detection_rules(&mut inner.record, &ctx, DETECTION_RULES);
        inner.state = StoreState::Ready;

        if changed {
            info!(
                "Detected preferences: languages={:?} currency={:?} location={:?}",
                inner.record.natural_languages,
                inner.record.currency.map(|c| c.code()),
                inner.record.location.as_ref().map(|l| l.country_code.as_str())
            );
            self.persist(&inner.record);
        } else {
            debug!("Detection pass left the record unchanged");
        }
    }

    fn update(&self, field: &str, apply: impl FnOnce(&mut PreferenceRecord)) {
        let mut inner = self.lock();
        apply(&mut inner.record);
        debug!("Updated preference {}", field);
        self.persist(&inner.record);
    }

    /// Replace the language list; blanks and duplicates are dropped, order kept
    pub fn update_natural_languages(&self, languages: Vec<String>) {
        let mut cleaned: Vec<String> = Vec::with_capacity(languages.len());
        for lang in languages {
            let lang = lang.trim().to_string();
            if !lang.is_empty() && !cleaned.contains(&lang) {
                cleaned.push(lang);
            }
        }
        self.update("naturalLanguages", |r| r.natural_languages = cleaned);
    }

    pub fn update_location(&self, location: Option<Location>) {
        self.update("location", |r| r.location = location.map(|l| l.country_only()));
    }

    pub fn update_currency(&self, currency: Option<CurrencyCode>) {
        self.update("currency", |r| r.currency = currency);
    }

    pub fn update_selected_language(&self, language: Option<String>) {
        self.update("selectedLanguage", |r| r.selected_language = language);
    }

    pub fn update_selected_difficulty(&self, difficulty: Option<String>) {
        self.update("selectedDifficulty", |r| r.selected_difficulty = difficulty);
    }

    pub fn update_selected_type(&self, kind: Option<String>) {
        self.update("selectedType", |r| r.selected_type = kind);
    }

    pub fn update_selected_framework(&self, framework: Option<String>) {
        self.update("selectedFramework", |r| r.selected_framework = framework);
    }

    pub fn update_selected_last_activity(&self, activity: Option<String>) {
        self.update("selectedLastActivity", |r| r.selected_last_activity = activity);
    }

    pub fn update_selected_license(&self, license: Option<String>) {
        self.update("selectedLicense", |r| r.selected_license = license);
    }

    /// Reset everything, then re-derive language and currency from the locale
    ///
    /// No network call: location stays empty until the user picks one.
    pub fn clear_all_preferences(&self) {
        let locale = self.locale.current_locale();
        let cleared = PreferenceRecord {
            natural_languages: vec![language_for_locale(&locale)],
            currency: Some(currency_for_locale(&locale)),
            ..Default::default()
        };

        let mut inner = self.lock();
        inner.record = cleared;
        info!("Cleared preferences (locale {})", locale);
        self.persist(&inner.record);
    }

    /// Write the full record; failures are logged and the in-memory copy stays authoritative
    fn persist(&self, record: &PreferenceRecord) {
        let json = match serde_json::to_string(record) {
            Ok(json) => json,
            Err(e) => {
                error!("Error serializing filter preferences: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set(STORAGE_KEY, &json) {
            error!("Error saving filter preferences: {}", e);
        }
    }
}

/// Load the persisted record, falling back to defaults on any problem
fn load_record(storage: &dyn PreferenceStorage) -> PreferenceRecord {
    match storage.get(STORAGE_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<PreferenceRecord>(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!("Discarding unreadable filter preferences: {}", e);
                PreferenceRecord::default()
            }
        },
        Ok(None) => PreferenceRecord::default(),
        Err(e) => {
            error!("Error loading filter preferences: {}", e);
            PreferenceRecord::default()
        }
    }
}

// Core engine: preference resolution and issue classification
pub mod config;
pub mod countries;
pub mod currency;
pub mod detection;
pub mod difficulty;
pub mod error;
pub mod language;
pub mod locale;
pub mod location;
pub mod models;
pub mod preferences;
pub mod providers;
pub mod storage;

pub use config::Config;
pub use currency::{
    currency_for_country, currency_for_locale, extract_currencies, filter_by_currency,
    filter_by_currency_with, CurrencyFilterPolicy,
};
pub use difficulty::{classify, filter_by_difficulty};
pub use error::Error;
pub use language::{language_for_country, language_for_locale};
pub use locale::{EnvLocale, FixedLocale, LocaleProvider};
pub use location::{filter_by_location, IpGeolocator, LocationResolver, LocationSource, ResolvedLocation};
pub use models::{CurrencyCode, DifficultyLevel, IssueContent, Label, Location};
pub use preferences::{PreferenceRecord, PreferenceStore, StoreState, STORAGE_KEY};
pub use providers::IpApiProvider;
pub use storage::{FileStorage, MemoryStorage, PreferenceStorage};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;

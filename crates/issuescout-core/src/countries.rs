// Static country tables - code -> name, code -> currency, code -> language
//
// Lookups are case-insensitive on the code. Each table has exactly one row
// per code.
use crate::models::CurrencyCode;

/// Countries offered in the location picker, in display order
pub const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("US", "United States"),
    ("GB", "United Kingdom"),
    ("CA", "Canada"),
    ("AU", "Australia"),
    ("DE", "Germany"),
    ("FR", "France"),
    ("IT", "Italy"),
    ("ES", "Spain"),
    ("BR", "Brazil"),
    ("IN", "India"),
    ("CN", "China"),
    ("JP", "Japan"),
    ("KR", "South Korea"),
    ("MX", "Mexico"),
    ("NL", "Netherlands"),
    ("SE", "Sweden"),
    ("NO", "Norway"),
    ("DK", "Denmark"),
    ("FI", "Finland"),
    ("PL", "Poland"),
    ("RU", "Russia"),
    ("TR", "Turkey"),
    ("SA", "Saudi Arabia"),
    ("AE", "United Arab Emirates"),
    ("SG", "Singapore"),
    ("NZ", "New Zealand"),
    ("IE", "Ireland"),
    ("PT", "Portugal"),
    ("GR", "Greece"),
    ("BE", "Belgium"),
    ("CH", "Switzerland"),
    ("AT", "Austria"),
    ("CZ", "Czech Republic"),
    ("HU", "Hungary"),
    ("RO", "Romania"),
    ("BG", "Bulgaria"),
    ("HR", "Croatia"),
    ("SK", "Slovakia"),
    ("SI", "Slovenia"),
    ("EE", "Estonia"),
    ("LV", "Latvia"),
    ("LT", "Lithuania"),
    ("LU", "Luxembourg"),
    ("IS", "Iceland"),
    ("MT", "Malta"),
    ("CY", "Cyprus"),
];

const COUNTRY_CURRENCIES: &[(&str, CurrencyCode)] = &[
    ("US", CurrencyCode::Usd),
    ("GB", CurrencyCode::Gbp),
    ("CA", CurrencyCode::Cad),
    ("AU", CurrencyCode::Aud),
    // Eurozone
    ("DE", CurrencyCode::Eur),
    ("FR", CurrencyCode::Eur),
    ("IT", CurrencyCode::Eur),
    ("ES", CurrencyCode::Eur),
    ("NL", CurrencyCode::Eur),
    ("BE", CurrencyCode::Eur),
    ("AT", CurrencyCode::Eur),
    ("PT", CurrencyCode::Eur),
    ("IE", CurrencyCode::Eur),
    ("FI", CurrencyCode::Eur),
    ("GR", CurrencyCode::Eur),
    ("LU", CurrencyCode::Eur),
    ("MT", CurrencyCode::Eur),
    ("CY", CurrencyCode::Eur),
    ("SK", CurrencyCode::Eur),
    ("SI", CurrencyCode::Eur),
    ("EE", CurrencyCode::Eur),
    ("LV", CurrencyCode::Eur),
    ("LT", CurrencyCode::Eur),
    ("JP", CurrencyCode::Jpy),
    ("CN", CurrencyCode::Cny),
    ("IN", CurrencyCode::Inr),
    ("BR", CurrencyCode::Brl),
    ("MX", CurrencyCode::Mxn),
    ("KR", CurrencyCode::Krw),
    ("SG", CurrencyCode::Sgd),
    ("HK", CurrencyCode::Hkd),
    ("NZ", CurrencyCode::Nzd),
    ("ZA", CurrencyCode::Zar),
    ("RU", CurrencyCode::Rub),
    ("TR", CurrencyCode::Try),
    ("AE", CurrencyCode::Aed),
    ("SA", CurrencyCode::Sar),
    ("CH", CurrencyCode::Chf),
    ("SE", CurrencyCode::Sek),
    ("NO", CurrencyCode::Nok),
    ("DK", CurrencyCode::Dkk),
    ("PL", CurrencyCode::Pln),
];

// Multilingual countries get their majority language: Canada -> English,
// Switzerland -> German, Belgium -> French, Singapore -> English.
const COUNTRY_LANGUAGES: &[(&str, &str)] = &[
    ("US", "en"),
    ("GB", "en"),
    ("CA", "en"),
    ("AU", "en"),
    ("NZ", "en"),
    ("IE", "en"),
    ("SG", "en"),
    ("CN", "zh"),
    ("TW", "zh"),
    ("HK", "zh"),
    ("JP", "ja"),
    ("KR", "ko"),
    ("ES", "es"),
    ("MX", "es"),
    ("AR", "es"),
    ("CO", "es"),
    ("CL", "es"),
    ("PE", "es"),
    ("VE", "es"),
    ("FR", "fr"),
    ("BE", "fr"),
    ("DE", "de"),
    ("AT", "de"),
    ("CH", "de"),
    ("PT", "pt"),
    ("BR", "pt"),
    ("RU", "ru"),
    ("SA", "ar"),
    ("AE", "ar"),
    ("EG", "ar"),
    ("IQ", "ar"),
    ("JO", "ar"),
    ("KW", "ar"),
    ("LB", "ar"),
    ("OM", "ar"),
    ("QA", "ar"),
    ("SY", "ar"),
    ("YE", "ar"),
    ("IN", "hi"),
];

fn lookup<T: Copy>(table: &[(&str, T)], code: &str) -> Option<T> {
    let code = code.trim();
    table
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(code))
        .map(|(_, value)| *value)
}

/// Display name for a country code, if we have one
pub fn country_name(code: &str) -> Option<&'static str> {
    lookup(COUNTRY_NAMES, code)
}

/// Default currency for a country, if the table knows it
pub fn country_currency(code: &str) -> Option<CurrencyCode> {
    lookup(COUNTRY_CURRENCIES, code)
}

/// Majority language for a country, if the table knows it
pub fn country_language(code: &str) -> Option<&'static str> {
    lookup(COUNTRY_LANGUAGES, code)
}

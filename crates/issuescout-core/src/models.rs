use issuescout_api::{GitHubIssue, GitHubLabel};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Issue labels come straight from the GitHub API shape
pub type Label = GitHubLabel;

/// Where the user is - or at least where we think they are
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Display name, e.g. "Germany"
    pub country: String,
    /// ISO-3166 alpha-2 code - the join key into the currency/language maps
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl Location {
    pub fn new(country: impl Into<String>, country_code: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            country_code: country_code.into(),
            region: None,
            city: None,
        }
    }

    /// Country-level view of this location, which is all the preference record keeps
    pub fn country_only(&self) -> Self {
        Self::new(self.country.clone(), self.country_code.clone())
    }
}

/// Currencies we know how to spot in bounty text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cny,
    Inr,
    Cad,
    Aud,
    Chf,
    Sek,
    Nok,
    Dkk,
    Pln,
    Brl,
    Mxn,
    Krw,
    Sgd,
    Hkd,
    Nzd,
    Zar,
    Rub,
    Try,
    Aed,
    Sar,
    Btc,
    Eth,
    Other,
}

impl CurrencyCode {
    /// Every code, in picker order
    pub const ALL: [CurrencyCode; 27] = [
        CurrencyCode::Usd,
        CurrencyCode::Eur,
        CurrencyCode::Gbp,
        CurrencyCode::Jpy,
        CurrencyCode::Cny,
        CurrencyCode::Inr,
        CurrencyCode::Cad,
        CurrencyCode::Aud,
        CurrencyCode::Chf,
        CurrencyCode::Sek,
        CurrencyCode::Nok,
        CurrencyCode::Dkk,
        CurrencyCode::Pln,
        CurrencyCode::Brl,
        CurrencyCode::Mxn,
        CurrencyCode::Krw,
        CurrencyCode::Sgd,
        CurrencyCode::Hkd,
        CurrencyCode::Nzd,
        CurrencyCode::Zar,
        CurrencyCode::Rub,
        CurrencyCode::Try,
        CurrencyCode::Aed,
        CurrencyCode::Sar,
        CurrencyCode::Btc,
        CurrencyCode::Eth,
        CurrencyCode::Other,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Jpy => "JPY",
            CurrencyCode::Cny => "CNY",
            CurrencyCode::Inr => "INR",
            CurrencyCode::Cad => "CAD",
            CurrencyCode::Aud => "AUD",
            CurrencyCode::Chf => "CHF",
            CurrencyCode::Sek => "SEK",
            CurrencyCode::Nok => "NOK",
            CurrencyCode::Dkk => "DKK",
            CurrencyCode::Pln => "PLN",
            CurrencyCode::Brl => "BRL",
            CurrencyCode::Mxn => "MXN",
            CurrencyCode::Krw => "KRW",
            CurrencyCode::Sgd => "SGD",
            CurrencyCode::Hkd => "HKD",
            CurrencyCode::Nzd => "NZD",
            CurrencyCode::Zar => "ZAR",
            CurrencyCode::Rub => "RUB",
            CurrencyCode::Try => "TRY",
            CurrencyCode::Aed => "AED",
            CurrencyCode::Sar => "SAR",
            CurrencyCode::Btc => "BTC",
            CurrencyCode::Eth => "ETH",
            CurrencyCode::Other => "OTHER",
        }
    }

    /// Human-friendly name for dropdowns
    pub fn display_name(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "US Dollar ($)",
            CurrencyCode::Eur => "Euro (€)",
            CurrencyCode::Gbp => "British Pound (£)",
            CurrencyCode::Jpy => "Japanese Yen (¥)",
            CurrencyCode::Cny => "Chinese Yuan (¥)",
            CurrencyCode::Inr => "Indian Rupee (₹)",
            CurrencyCode::Cad => "Canadian Dollar ($)",
            CurrencyCode::Aud => "Australian Dollar ($)",
            CurrencyCode::Chf => "Swiss Franc (CHF)",
            CurrencyCode::Sek => "Swedish Krona (kr)",
            CurrencyCode::Nok => "Norwegian Krone (kr)",
            CurrencyCode::Dkk => "Danish Krone (kr)",
            CurrencyCode::Pln => "Polish Złoty (zł)",
            CurrencyCode::Brl => "Brazilian Real (R$)",
            CurrencyCode::Mxn => "Mexican Peso ($)",
            CurrencyCode::Krw => "South Korean Won (₩)",
            CurrencyCode::Sgd => "Singapore Dollar ($)",
            CurrencyCode::Hkd => "Hong Kong Dollar ($)",
            CurrencyCode::Nzd => "New Zealand Dollar ($)",
            CurrencyCode::Zar => "South African Rand (R)",
            CurrencyCode::Rub => "Russian Ruble (₽)",
            CurrencyCode::Try => "Turkish Lira (₺)",
            CurrencyCode::Aed => "UAE Dirham (د.إ)",
            CurrencyCode::Sar => "Saudi Riyal (﷼)",
            CurrencyCode::Btc => "Bitcoin (₿)",
            CurrencyCode::Eth => "Ethereum (Ξ)",
            CurrencyCode::Other => "Other",
        }
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let wanted = s.trim();
        CurrencyCode::ALL
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| crate::Error::InvalidValue(format!("unknown currency code: {}", s)))
    }
}

/// How hard an issue looks, judged from its labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "beginner",
            DifficultyLevel::Intermediate => "intermediate",
            DifficultyLevel::Advanced => "advanced",
        }
    }

    /// Badge text
    pub fn label(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "Beginner",
            DifficultyLevel::Intermediate => "Intermediate",
            DifficultyLevel::Advanced => "Advanced",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "🌱",
            DifficultyLevel::Intermediate => "⚡",
            DifficultyLevel::Advanced => "🔥",
        }
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DifficultyLevel {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(DifficultyLevel::Beginner),
            "intermediate" => Ok(DifficultyLevel::Intermediate),
            "advanced" => Ok(DifficultyLevel::Advanced),
            other => Err(crate::Error::InvalidValue(format!(
                "unknown difficulty: {}",
                other
            ))),
        }
    }
}

/// Anything listing code wants to run the text filters over
///
/// The engine never knows the source schema; it only asks for these fields.
pub trait IssueContent {
    fn title(&self) -> Option<&str>;
    fn body(&self) -> Option<&str>;

    fn repository_url(&self) -> Option<&str> {
        None
    }

    fn labels(&self) -> &[Label] {
        &[]
    }

    /// Title and body joined, which is what the currency extractor scans
    fn searchable_text(&self) -> String {
        format!("{} {}", self.title().unwrap_or(""), self.body().unwrap_or(""))
    }
}

impl IssueContent for GitHubIssue {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    fn repository_url(&self) -> Option<&str> {
        self.repository_url.as_deref()
    }

    fn labels(&self) -> &[Label] {
        &self.labels
    }
}

// Currency defaults and bounty-text currency detection
use crate::countries::country_currency;
use crate::locale::locale_region;
use crate::models::{CurrencyCode, IssueContent};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Currency for a country code, USD when the table has no row
pub fn currency_for_country(country_code: &str) -> CurrencyCode {
    country_currency(country_code).unwrap_or(CurrencyCode::Usd)
}

/// Currency implied by a `language-REGION` locale, USD without a region
pub fn currency_for_locale(locale: &str) -> CurrencyCode {
    match locale_region(locale) {
        Some(region) => currency_for_country(&region),
        None => CurrencyCode::Usd,
    }
}

struct SymbolRuleDef {
    currency: CurrencyCode,
    pattern: &'static str,
    /// Match against the text with "Canadian dollar", "C$" and friends blanked out
    skip_qualified_dollars: bool,
}

const fn rule(currency: CurrencyCode, pattern: &'static str) -> SymbolRuleDef {
    SymbolRuleDef {
        currency,
        pattern,
        skip_qualified_dollars: false,
    }
}

// One rule per currency: symbol, ISO code or common name. ISO codes may touch
// digits ("500USD") but not letters. TRY and RUB are everyday English words,
// so those two codes only count in upper case.
const SYMBOL_RULES: &[SymbolRuleDef] = &[
    SymbolRuleDef {
        currency: CurrencyCode::Usd,
        pattern: r"(?i)\$|(?:\b|\d)usd(?:\b|\d)|\bdollars?\b",
        skip_qualified_dollars: true,
    },
    rule(CurrencyCode::Eur, r"(?i)€|(?:\b|\d)eur(?:\b|\d)|\beuros?\b"),
    rule(CurrencyCode::Gbp, r"(?i)£|(?:\b|\d)gbp(?:\b|\d)|\bpounds?\b|\bsterling\b"),
    rule(CurrencyCode::Jpy, r"(?i)¥|(?:\b|\d)jpy(?:\b|\d)|\byen\b"),
    rule(CurrencyCode::Cny, r"(?i)¥|(?:\b|\d)(?:cny|rmb)(?:\b|\d)|\byuan\b|\brenminbi\b"),
    rule(CurrencyCode::Inr, r"(?i)₹|(?:\b|\d)inr(?:\b|\d)|\brupees?\b"),
    rule(CurrencyCode::Cad, r"(?i)(?:\b|\d)cad(?:\b|\d)|\bcanadian\s+dollars?\b|\bca?\$"),
    rule(CurrencyCode::Aud, r"(?i)(?:\b|\d)aud(?:\b|\d)|\baustralian\s+dollars?\b|\bau?\$"),
    rule(CurrencyCode::Chf, r"(?i)(?:\b|\d)chf(?:\b|\d)|\bswiss\s+francs?\b"),
    rule(CurrencyCode::Sek, r"(?i)(?:\b|\d)sek(?:\b|\d)|\bswedish\s+kron(?:a|or)\b"),
    rule(CurrencyCode::Nok, r"(?i)(?:\b|\d)nok(?:\b|\d)|\bnorwegian\s+kron(?:e|er)\b"),
    rule(CurrencyCode::Dkk, r"(?i)(?:\b|\d)dkk(?:\b|\d)|\bdanish\s+kron(?:e|er)\b"),
    rule(CurrencyCode::Pln, r"(?i)(?:\b|\d)pln(?:\b|\d)|\bpolish\s+z[łl]oty\b|zł"),
    rule(CurrencyCode::Brl, r"(?i)\br\$|(?:\b|\d)brl(?:\b|\d)|\bbrazilian\s+reais\b|\bbrazilian\s+reals?\b"),
    rule(CurrencyCode::Mxn, r"(?i)(?:\b|\d)mxn(?:\b|\d)|\bmexican\s+pesos?\b|\bmx\$"),
    rule(CurrencyCode::Krw, r"(?i)₩|(?:\b|\d)krw(?:\b|\d)|\bkorean\s+won\b"),
    rule(CurrencyCode::Sgd, r"(?i)(?:\b|\d)sgd(?:\b|\d)|\bsingapore\s+dollars?\b|\bs\$"),
    rule(CurrencyCode::Hkd, r"(?i)(?:\b|\d)hkd(?:\b|\d)|\bhong\s+kong\s+dollars?\b|\bhk\$"),
    rule(CurrencyCode::Nzd, r"(?i)(?:\b|\d)nzd(?:\b|\d)|\bnew\s+zealand\s+dollars?\b|\bnz\$"),
    rule(CurrencyCode::Zar, r"(?i)(?:\b|\d)zar(?:\b|\d)|\bsouth\s+african\s+rand\b"),
    rule(CurrencyCode::Rub, r"₽|(?:\b|\d)RUB(?:\b|\d)|(?i:\br(?:o)?ubles?\b)"),
    rule(CurrencyCode::Try, r"₺|(?:\b|\d)TRY(?:\b|\d)|(?i:\bturkish\s+lira\b|\blira\b)"),
    rule(CurrencyCode::Aed, r"(?i)د\.إ|(?:\b|\d)aed(?:\b|\d)|\b(?:uae\s+)?dirhams?\b"),
    rule(CurrencyCode::Sar, r"(?i)﷼|(?:\b|\d)sar(?:\b|\d)|\b(?:saudi\s+)?riyals?\b"),
    rule(CurrencyCode::Btc, r"(?i)₿|(?:\b|\d)btc(?:\b|\d)|\bbitcoins?\b|\bsats\b"),
    rule(CurrencyCode::Eth, r"(?i)Ξ|(?:\b|\d)eth(?:\b|\d)|\bethereum\b|\bether\b"),
];

struct SymbolRule {
    currency: CurrencyCode,
    pattern: Regex,
    skip_qualified_dollars: bool,
}

static SYMBOL_PATTERNS: Lazy<Vec<SymbolRule>> = Lazy::new(|| {
    SYMBOL_RULES
        .iter()
        .map(|def| SymbolRule {
            currency: def.currency,
            pattern: Regex::new(def.pattern).expect("currency symbol pattern must compile"),
            skip_qualified_dollars: def.skip_qualified_dollars,
        })
        .collect()
});

/// Dollar mentions that belong to some other dollar currency
static QUALIFIED_DOLLAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:canadian|australian|singapore|hong\s+kong|new\s+zealand|mexican)\s+dollars?\b|\b(?:ca|au|hk|nz|mx|[casr])\$",
    )
    .expect("qualified dollar pattern must compile")
});

/// `<number><separators> <optional qualifier> <currency word>`
static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\d[\d,.]*\s*(?P<word>(?:(?:canadian|australian|singapore|hong\s+kong|new\s+zealand|us|swiss|swedish|norwegian|danish|polish|brazilian|mexican|south\s+korean|korean|south\s+african|russian|turkish|uae|saudi)\s+)?(?:usd|eur|gbp|jpy|cny|inr|cad|aud|chf|sek|nok|dkk|pln|brl|mxn|krw|sgd|hkd|nzd|zar|rub|try|aed|sar|btc|eth|dollars?|euros?|pounds?|yen|yuan|rupees?|francs?|kron(?:a|or|e|er)|z[łl]oty|reais|reals?|pesos?|won|rand|r(?:o)?ubles?|lira|dirhams?|riyals?|bitcoins?|ethereum|ether))\b",
    )
    .expect("amount pattern must compile")
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));

// Checked in order against the lower-cased currency word. Qualifiers come
// first so "canadian dollars" never reaches the plain "dollar" row. Bare
// "krone" is Norwegian or Danish and "real" is usually just English, so
// neither has a row.
const WORD_RULES: &[(&str, CurrencyCode)] = &[
    ("canadian", CurrencyCode::Cad),
    ("australian", CurrencyCode::Aud),
    ("singapore", CurrencyCode::Sgd),
    ("hong kong", CurrencyCode::Hkd),
    ("new zealand", CurrencyCode::Nzd),
    ("mexican", CurrencyCode::Mxn),
    ("swiss", CurrencyCode::Chf),
    ("swedish", CurrencyCode::Sek),
    ("norwegian", CurrencyCode::Nok),
    ("danish", CurrencyCode::Dkk),
    ("polish", CurrencyCode::Pln),
    ("brazilian", CurrencyCode::Brl),
    ("south african", CurrencyCode::Zar),
    ("korean", CurrencyCode::Krw),
    ("russian", CurrencyCode::Rub),
    ("turkish", CurrencyCode::Try),
    ("uae", CurrencyCode::Aed),
    ("saudi", CurrencyCode::Sar),
    ("dollar", CurrencyCode::Usd),
    ("euro", CurrencyCode::Eur),
    ("pound", CurrencyCode::Gbp),
    ("yen", CurrencyCode::Jpy),
    ("yuan", CurrencyCode::Cny),
    ("rupee", CurrencyCode::Inr),
    ("franc", CurrencyCode::Chf),
    ("krona", CurrencyCode::Sek),
    ("kronor", CurrencyCode::Sek),
    ("złoty", CurrencyCode::Pln),
    ("zloty", CurrencyCode::Pln),
    ("reais", CurrencyCode::Brl),
    ("peso", CurrencyCode::Mxn),
    ("won", CurrencyCode::Krw),
    ("rand", CurrencyCode::Zar),
    ("ruble", CurrencyCode::Rub),
    ("rouble", CurrencyCode::Rub),
    ("lira", CurrencyCode::Try),
    ("dirham", CurrencyCode::Aed),
    ("riyal", CurrencyCode::Sar),
    ("bitcoin", CurrencyCode::Btc),
    ("ether", CurrencyCode::Eth),
];

/// Map the currency word captured next to an amount to a code
fn currency_for_word(word: &str) -> Option<CurrencyCode> {
    let trimmed = word.trim();

    // Bare ISO code ("500 EUR"); the English-word codes need upper case
    if let Ok(code) = trimmed.parse::<CurrencyCode>() {
        if matches!(code, CurrencyCode::Try | CurrencyCode::Rub) && trimmed != code.code() {
            return None;
        }
        return Some(code);
    }

    let normalized = WHITESPACE.replace_all(&trimmed.to_lowercase(), " ").into_owned();
    WORD_RULES
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
        .map(|(_, code)| *code)
}

fn symbol_pass(text: &str, found: &mut BTreeSet<CurrencyCode>) {
    let unqualified = QUALIFIED_DOLLAR.replace_all(text, " ");

    for rule in SYMBOL_PATTERNS.iter() {
        let haystack: &str = if rule.skip_qualified_dollars {
            &unqualified
        } else {
            text
        };
        if rule.pattern.is_match(haystack) {
            found.insert(rule.currency);
        }
    }
}

fn amount_pass(text: &str, found: &mut BTreeSet<CurrencyCode>) {
    for caps in AMOUNT_PATTERN.captures_iter(text) {
        if let Some(code) = caps.name("word").and_then(|m| currency_for_word(m.as_str())) {
            found.insert(code);
        }
    }
}

/// Every currency mentioned in a piece of bounty text
///
/// Runs the symbol/keyword pass and the amount-adjacent pass and unions the
/// results. Blank text yields an empty set.
pub fn extract_currencies(text: &str) -> BTreeSet<CurrencyCode> {
    let mut found = BTreeSet::new();
    if text.trim().is_empty() {
        return found;
    }

    symbol_pass(text, &mut found);
    amount_pass(text, &mut found);

    found
}

/// How `filter_by_currency` treats items that mention no currency at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFilterPolicy {
    /// Keep unmarked items when filtering for USD
    #[serde(default = "default_assume_usd")]
    pub assume_usd_when_unmarked: bool,
}

fn default_assume_usd() -> bool {
    true // most bounty platforms pay in dollars
}

impl Default for CurrencyFilterPolicy {
    fn default() -> Self {
        Self {
            assume_usd_when_unmarked: default_assume_usd(),
        }
    }
}

/// Keep bounties denominated in `filter`, with the default policy
pub fn filter_by_currency<T: IssueContent>(items: Vec<T>, filter: Option<CurrencyCode>) -> Vec<T> {
    filter_by_currency_with(items, filter, CurrencyFilterPolicy::default())
}

/// Keep bounties denominated in `filter`
///
/// `None` and `OTHER` mean "no filter" and return the items untouched.
pub fn filter_by_currency_with<T: IssueContent>(
    items: Vec<T>,
    filter: Option<CurrencyCode>,
    policy: CurrencyFilterPolicy,
) -> Vec<T> {
    let wanted = match filter {
        None | Some(CurrencyCode::Other) => return items,
        Some(code) => code,
    };

    let before = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter(|item| {
            let detected = extract_currencies(&item.searchable_text());
            detected.contains(&wanted)
                || (detected.is_empty()
                    && wanted == CurrencyCode::Usd
                    && policy.assume_usd_when_unmarked)
        })
        .collect();

    debug!("Currency filter {} kept {}/{} items", wanted, kept.len(), before);
    kept
}

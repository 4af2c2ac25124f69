use anyhow::Context;
use clap::Parser;
use issuescout_core::{
    classify, countries::country_name, extract_currencies, Config, CurrencyCode, EnvLocale,
    FileStorage, FixedLocale, IpApiProvider, Label, LocaleProvider, Location, PreferenceStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "issuescout")]
#[command(version, about = "Filter preferences and issue classification for open-source contributors", long_about = None)]
struct Cli {
    /// Never call the IP geolocation service
    #[arg(long, global = true)]
    no_geo: bool,

    /// Use this locale instead of the environment's (e.g. de-DE)
    #[arg(long, global = true, env = "ISSUESCOUT_LOCALE")]
    locale: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show or edit saved filter preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
    /// Classify an issue's difficulty from its labels
    Classify {
        /// Label names, e.g. "good first issue"
        #[arg(required = true)]
        labels: Vec<String>,
    },
    /// List the currencies mentioned in a piece of text
    Currencies {
        /// Text to scan
        text: String,
    },
}

#[derive(clap::Subcommand)]
enum PrefsAction {
    /// Detect missing defaults and print the preferences as JSON
    Show,
    /// Set one preference; an empty value clears it
    Set {
        /// languages, location, currency, language, difficulty, type, framework, last-activity or license
        field: String,
        value: String,
    },
    /// Reset everything to locale defaults
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "issuescout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Prefs { action }) => {
            let config = Config::load().context("Failed to load config")?;
            let store = open_store(&config, cli.no_geo, cli.locale)?;
            run_prefs(&store, action).await?;
        }
        Some(Commands::Classify { labels }) => {
            let labels: Vec<Label> = labels.into_iter().map(Label::new).collect();
            match classify(&labels) {
                Some(level) => println!("{} {}", level.icon(), level.label()),
                None => println!("undetected"),
            }
        }
        Some(Commands::Currencies { text }) => {
            let found = extract_currencies(&text);
            if found.is_empty() {
                println!("none");
            }
            for code in found {
                println!("{}  {}", code.code(), code.display_name());
            }
        }
        None => {
            println!("No command specified. Try --help");
        }
    }

    Ok(())
}

fn open_store(config: &Config, no_geo: bool, locale: Option<String>) -> anyhow::Result<PreferenceStore> {
    let data_dir = config.storage.resolve_data_dir()?;
    tracing::debug!("Preferences directory: {}", data_dir.display());

    let locale: Box<dyn LocaleProvider> = match locale.or_else(|| config.locale.override_locale.clone()) {
        Some(locale) => Box::new(FixedLocale::new(locale)),
        None => Box::new(EnvLocale),
    };

    let store = PreferenceStore::new(Box::new(FileStorage::new(data_dir)), locale);

    if no_geo || !config.geolocation.enabled {
        tracing::info!("IP geolocation disabled");
        return Ok(store);
    }

    let provider = IpApiProvider::from_config(&config.geolocation)
        .context("Failed to create geolocation client")?;
    Ok(store.with_geolocator(Box::new(provider)))
}

async fn run_prefs(store: &PreferenceStore, action: PrefsAction) -> anyhow::Result<()> {
    match action {
        PrefsAction::Show => {
            store.initialize().await;
        }
        PrefsAction::Set { field, value } => {
            let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());
            apply_update(store, &field, value)?;
        }
        PrefsAction::Clear => {
            store.clear_all_preferences();
        }
    }

    println!("{}", serde_json::to_string_pretty(&store.preferences())?);
    Ok(())
}

fn apply_update(store: &PreferenceStore, field: &str, value: Option<String>) -> anyhow::Result<()> {
    match field {
        "languages" => store.update_natural_languages(
            value
                .map(|v| v.split(',').map(str::to_string).collect())
                .unwrap_or_default(),
        ),
        "location" => store.update_location(value.map(|code| {
            let code = code.to_uppercase();
            let name = country_name(&code).map(str::to_string).unwrap_or_else(|| code.clone());
            Location::new(name, code)
        })),
        "currency" => {
            let currency = value.map(|v| v.parse::<CurrencyCode>()).transpose()?;
            store.update_currency(currency);
        }
        "language" => store.update_selected_language(value),
        "difficulty" => store.update_selected_difficulty(value),
        "type" => store.update_selected_type(value),
        "framework" => store.update_selected_framework(value),
        "last-activity" => store.update_selected_last_activity(value),
        "license" => store.update_selected_license(value),
        other => anyhow::bail!("Unknown preference field: {}", other),
    }
    Ok(())
}

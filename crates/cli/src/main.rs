use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::debug;
use std::io::{self, BufRead, Write};

use stratos_core::api::ApiClient;
use stratos_core::config::ApiConfig;
use stratos_core::display::cards::AnalysisCard;
use stratos_core::errors::CoreError;
use stratos_core::models::alert::AlertType;
use stratos_core::views::alerts::AlertsView;
use stratos_core::views::analysis::AnalysisSource;
use stratos_core::views::forms::{AlertForm, HoldingForm};
use stratos_core::views::portfolio::PortfolioView;
use stratos_core::views::screener::ScreenerView;
use stratos_core::views::{Confirm, LoadState, NotificationLevel};

mod render;

/// Stratos - dividend-focused stock screener and portfolio tracker.
#[derive(Parser, Debug)]
#[command(name = "stratos")]
#[command(version)]
#[command(about = "Screen stocks, track a portfolio and manage price alerts.", long_about = None)]
struct Cli {
    /// Backend base URL (overrides STRATOS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log every request
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Screen stocks; unset filters are not sent
    Screen {
        #[arg(long)]
        sector: Option<String>,

        /// Minimum dividend yield in percent
        #[arg(long)]
        min_dividend_yield: Option<String>,

        #[arg(long)]
        max_pe: Option<String>,

        /// Minimum market cap in billions
        #[arg(long)]
        min_market_cap: Option<String>,

        #[arg(long)]
        max_beta: Option<String>,

        #[arg(long)]
        max_debt_to_equity: Option<String>,

        /// Start from the criteria saved under this preferences profile
        #[arg(long, value_name = "NAME")]
        preferences: Option<String>,

        /// Print the available sectors and exit
        #[arg(long)]
        list_sectors: bool,
    },

    /// Analyze one stock
    Analyze {
        symbol: String,

        /// Use the AI-backed analysis instead of the rule-based one
        #[arg(long)]
        ai: bool,
    },

    /// Add a stock to the watchlist
    Watch { symbol: String },

    /// Show holdings and totals
    Portfolio,

    /// Add a holding to the portfolio
    AddHolding {
        symbol: String,
        shares: f64,
        purchase_price: f64,

        /// Purchase date (YYYY-MM-DD), defaults to today on the backend
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove a holding by id
    RemoveHolding {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// List every alert with its status
    Alerts,

    /// Create a price alert
    AddAlert {
        symbol: String,

        /// price_above, price_below or percent_change
        alert_type: AlertType,

        target: f64,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete an alert by id
    RemoveAlert {
        id: i64,

        #[arg(long)]
        yes: bool,
    },

    /// Evaluate every active alert now
    CheckAlerts,

    /// Check that the backend is reachable
    Health,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        if e.downcast_ref::<CoreError>().is_some_and(CoreError::is_transient) {
            eprintln!("The backend may be temporarily unavailable; try again shortly.");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ApiConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config = ApiConfig {
            timeout: config.timeout,
            ..ApiConfig::with_base_url(url)?
        };
    }
    debug!("Using backend at {}", config.base_url);
    let api = ApiClient::from_config(&config)?;

    match cli.command {
        Commands::Screen {
            sector,
            min_dividend_yield,
            max_pe,
            min_market_cap,
            max_beta,
            max_debt_to_equity,
            preferences,
            list_sectors,
        } => {
            let mut view = ScreenerView::new();
            view.mount(&api).await;
            if list_sectors {
                for sector in view.sectors() {
                    println!("{sector}");
                }
                return Ok(());
            }
            if let Some(name) = preferences {
                let saved = api.get_preferences(&name).await?;
                view.apply_preferences(&saved);
            }
            let form = &mut view.form;
            for (field, value) in [
                (&mut form.sector, sector),
                (&mut form.min_dividend_yield, min_dividend_yield),
                (&mut form.max_pe_ratio, max_pe),
                (&mut form.min_market_cap, min_market_cap),
                (&mut form.max_beta, max_beta),
                (&mut form.max_debt_to_equity, max_debt_to_equity),
            ] {
                if let Some(value) = value {
                    *field = value;
                }
            }
            view.search(&api).await;

            let layout = view.layout();
            if let Some(error) = layout.error {
                bail!("{error}");
            }
            if let Some(results) = &layout.results {
                render::print_results(results);
            }
        }

        Commands::Analyze { symbol, ai } => {
            let source = if ai { AnalysisSource::Ai } else { AnalysisSource::Quick };
            let mut view = ScreenerView::new();
            view.open_analysis_with(&symbol, source);
            view.analyze(&api).await;

            let panel = view.analysis().context("analysis panel closed")?;
            match panel.state() {
                LoadState::Loaded(rec) => render::print_analysis(&AnalysisCard::from(rec)),
                LoadState::Error(message) => bail!("{message}"),
                LoadState::NotLoaded | LoadState::Loading => {}
            }
        }

        Commands::Watch { symbol } => {
            let mut view = ScreenerView::new();
            view.add_to_watchlist(&api, &symbol).await;
            let notifications = view.take_notifications();
            render::print_notifications(&notifications);
            if notifications.iter().any(|n| n.level == NotificationLevel::Error) {
                std::process::exit(1);
            }
        }

        Commands::Portfolio => {
            let mut view = PortfolioView::new();
            view.mount(&api).await;
            render::print_portfolio(view.display());
        }

        Commands::AddHolding {
            symbol,
            shares,
            purchase_price,
            date,
            notes,
        } => {
            let mut view = PortfolioView::new();
            view.form = HoldingForm {
                purchase_date: date,
                notes,
                ..HoldingForm::new(symbol, shares, purchase_price)
            };
            view.add_holding(&api).await;
            if let Some(error) = view.error() {
                bail!("{error}");
            }
            render::print_portfolio(view.display());
        }

        Commands::RemoveHolding { id, yes } => {
            let mut view = PortfolioView::new();
            view.mount(&api).await;
            let confirm = confirmer(yes);
            view.delete_holding(&api, id, confirm.as_ref()).await;
            if let Some(error) = view.error() {
                bail!("{error}");
            }
            render::print_portfolio(view.display());
        }

        Commands::Alerts => {
            let mut view = AlertsView::new();
            view.mount(&api).await;
            if let Some(error) = view.error() {
                bail!("{error}");
            }
            render::print_alerts(view.alert_list());
        }

        Commands::AddAlert {
            symbol,
            alert_type,
            target,
            notes,
        } => {
            let mut view = AlertsView::new();
            view.form = AlertForm {
                notes,
                ..AlertForm::new(symbol, alert_type, target)
            };
            view.create_alert(&api).await;
            if let Some(error) = view.error() {
                bail!("{error}");
            }
            render::print_alerts(view.alert_list());
        }

        Commands::RemoveAlert { id, yes } => {
            let mut view = AlertsView::new();
            view.mount(&api).await;
            let confirm = confirmer(yes);
            view.delete_alert(&api, id, confirm.as_ref()).await;
            if let Some(error) = view.error() {
                bail!("{error}");
            }
            render::print_alerts(view.alert_list());
        }

        Commands::CheckAlerts => {
            let mut view = AlertsView::new();
            view.mount(&api).await;
            view.check_now(&api).await;
            if let Some(error) = view.error() {
                bail!("{error}");
            }
            render::print_checks(view.triggered_checks());
            println!();
            render::print_alerts(view.alert_list());
        }

        Commands::Health => {
            let health = api.health().await?;
            println!("{} (version {})", health.status, health.version);
        }
    }

    Ok(())
}

fn confirmer(assume_yes: bool) -> Box<dyn Confirm> {
    if assume_yes {
        Box::new(|_: &str| true)
    } else {
        Box::new(ask_on_stdin)
    }
}

/// Anything but "y" or "yes" declines.
fn ask_on_stdin(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

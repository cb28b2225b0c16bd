use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use content::{CatalogSource, DEFAULT_CHECKOUT_URL, JsonFileCatalog, default_catalog, source_for};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::{CheckoutLink, StepCatalog, StepKind};
use services::{FunnelConfig, FunnelVariant};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, DesktopLinkOpener, LinkOpenerRef, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidMillis { flag: &'static str, raw: String },
    InvalidVariant { raw: String },
    MissingCatalog,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidMillis { flag, raw } => {
                write!(f, "invalid {flag} value: {raw} (expected milliseconds)")
            }
            ArgsError::InvalidVariant { raw } => write!(f, "invalid variant: {raw} (expected a or b)"),
            ArgsError::MissingCatalog => write!(f, "validate requires --catalog <path>"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_variant(raw: String) -> Result<FunnelVariant, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidVariant { raw })
}

fn parse_millis(flag: &'static str, raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidMillis { flag, raw })
}

struct DesktopApp {
    source: Arc<dyn CatalogSource>,
    config: FunnelConfig,
    opener: LinkOpenerRef,
}

impl UiApp for DesktopApp {
    fn catalog_source(&self) -> Arc<dyn CatalogSource> {
        Arc::clone(&self.source)
    }

    fn funnel_config(&self) -> FunnelConfig {
        self.config.clone()
    }

    fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.opener)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui       [--catalog <path>] [--variant a|b] [--checkout-url <url>]");
    eprintln!("                               [--select-delay-ms <ms>] [--analysis-ms <ms>]");
    eprintln!("  cargo run -p app -- validate --catalog <path>");
    eprintln!("  cargo run -p app -- export   # print the built-in funnel as JSON");
    eprintln!();
    eprintln!("Defaults for ui:");
    eprintln!("  built-in funnel, variant a, checkout {DEFAULT_CHECKOUT_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_CATALOG, QUIZ_VARIANT, QUIZ_CHECKOUT_URL, QUIZ_SELECT_DELAY_MS, QUIZ_ANALYSIS_MS");
    eprintln!("  RUST_LOG (default: info)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Validate,
    Export,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "validate" => Some(Self::Validate),
            "export" => Some(Self::Export),
            _ => None,
        }
    }
}

struct Args {
    catalog: Option<PathBuf>,
    variant: FunnelVariant,
    checkout_url: Option<String>,
    select_delay_ms: Option<u64>,
    analysis_ms: Option<u64>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let env = |key: &str| std::env::var(key).ok().filter(|value| !value.trim().is_empty());

        let mut catalog = env("QUIZ_CATALOG").map(PathBuf::from);
        let mut variant = env("QUIZ_VARIANT")
            .map(parse_variant)
            .transpose()?
            .unwrap_or(FunnelVariant::A);
        let mut checkout_url = env("QUIZ_CHECKOUT_URL");
        let mut select_delay_ms = env("QUIZ_SELECT_DELAY_MS")
            .map(|raw| parse_millis("QUIZ_SELECT_DELAY_MS", raw))
            .transpose()?;
        let mut analysis_ms = env("QUIZ_ANALYSIS_MS")
            .map(|raw| parse_millis("QUIZ_ANALYSIS_MS", raw))
            .transpose()?;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => catalog = Some(PathBuf::from(require_value(args, "--catalog")?)),
                "--variant" => variant = parse_variant(require_value(args, "--variant")?)?,
                "--checkout-url" => checkout_url = Some(require_value(args, "--checkout-url")?),
                "--select-delay-ms" => {
                    let raw = require_value(args, "--select-delay-ms")?;
                    select_delay_ms = Some(parse_millis("--select-delay-ms", raw)?);
                }
                "--analysis-ms" => {
                    let raw = require_value(args, "--analysis-ms")?;
                    analysis_ms = Some(parse_millis("--analysis-ms", raw)?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            catalog,
            variant,
            checkout_url,
            select_delay_ms,
            analysis_ms,
        })
    }

    fn funnel_config(&self) -> Result<FunnelConfig, Box<dyn std::error::Error>> {
        let mut config = FunnelConfig::for_variant(self.variant);
        if let Some(ms) = self.select_delay_ms {
            config = config.with_select_delay(Duration::from_millis(ms));
        }
        if let Some(ms) = self.analysis_ms {
            config = config.with_analysis_duration(Duration::from_millis(ms));
        }
        let checkout = self.checkout_url.as_deref().unwrap_or(DEFAULT_CHECKOUT_URL);
        config = config.with_checkout_url(CheckoutLink::parse(checkout)?);
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn summarize(catalog: &StepCatalog) -> String {
    let kinds = [
        StepKind::Intro,
        StepKind::Question,
        StepKind::Transition,
        StepKind::DateInput,
        StepKind::LoadingAnalysis,
        StepKind::PreRevelation,
    ];
    let counts = kinds
        .iter()
        .map(|kind| (kind, catalog.count_kind(*kind)))
        .filter(|(_, count)| *count > 0)
        .map(|(kind, count)| format!("{}={count}", kind.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} steps ({counts})", catalog.len())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    match cmd {
        Command::Ui => {
            let config = parsed.funnel_config()?;
            let source = source_for(parsed.catalog.clone());
            // Fail before opening a window if the catalog is broken.
            let catalog = source.load_catalog().await?;
            info!(
                source = %source.describe(),
                variant = %parsed.variant,
                steps = catalog.len(),
                "launching quiz"
            );

            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                source,
                config,
                opener: Arc::new(DesktopLinkOpener),
            });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Descubra seu Orixá")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Validate => {
            let path = parsed.catalog.clone().ok_or(ArgsError::MissingCatalog)?;
            let source = JsonFileCatalog::new(path);
            let catalog = source.load_catalog().await?;
            parsed.funnel_config()?;
            println!("{}: ok, {}", source.describe(), summarize(&catalog));
            Ok(())
        }
        Command::Export => {
            let catalog = default_catalog()?;
            println!("{}", content::to_json_pretty(&catalog)?);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

use anyhow::Context;
use clap::Parser;
use natal_core::domain::request::{HouseSystem, SelectionState};
use natal_core::ingest::provider::HttpChartService;
use natal_core::view::surface::{Region, RegionContent, ViewState};
use natal_core::viewer::{ChartViewer, FetchOutcome};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "natal_viewer")]
struct Args {
    /// Birth year. Defaults to the current year.
    #[arg(long)]
    year: Option<i32>,

    /// Birth month (1-12). Defaults to the current month.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Day of month. Defaults to 1.
    #[arg(long)]
    day: Option<u32>,

    #[arg(long, default_value_t = SelectionState::DEFAULT_HOUR,
          value_parser = clap::value_parser!(u32).range(0..=23))]
    hour: u32,

    #[arg(long, default_value_t = SelectionState::DEFAULT_MINUTE,
          value_parser = clap::value_parser!(u32).range(0..=59))]
    minute: u32,

    /// Place name or address passed to the chart service's geocoder.
    #[arg(long)]
    location: String,

    /// House system name (e.g. 整宮制) or one-letter code (e.g. P).
    #[arg(long, default_value = "")]
    house_system: String,

    /// Ask the service for AI-written interpretations.
    #[arg(long)]
    ai: bool,

    /// Print the rendered view and chart model as JSON instead of text tables.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = natal_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    let selection = selection_from_args(&args, chrono::Local::now().date_naive());
    let req = selection.to_request();
    req.validate().context("invalid birth data")?;

    let service = HttpChartService::from_settings(&settings)?;
    let viewer = ChartViewer::new(service).with_chart_size(settings.chart_size_px);

    let mut view = ViewState::default();
    let outcome = match viewer.fetch(&req, &mut view).await {
        Ok(outcome) => outcome,
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "chart request failed");
            return Err(err);
        }
    };

    if args.json {
        let out = serde_json::json!({ "outcome": outcome, "view": view });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_view(&view);
    }

    if let FetchOutcome::Failed { status } = outcome {
        anyhow::bail!("chart service returned HTTP {status}");
    }
    Ok(())
}

fn selection_from_args(args: &Args, today: chrono::NaiveDate) -> SelectionState {
    let mut selection = SelectionState::defaults_at(today);
    if let Some(year) = args.year {
        selection.set_year(year);
    }
    if let Some(month) = args.month {
        selection.set_month(month);
    }
    if let Some(day) = args.day {
        selection.day = day;
    }
    selection.hour = args.hour;
    selection.minute = args.minute;
    selection.location = args.location.clone();
    selection.house_system = HouseSystem::resolve(&args.house_system);
    selection.ai = args.ai;
    selection
}

fn print_view(view: &ViewState) {
    for (region, content) in &view.regions {
        if *region == Region::Paper {
            continue;
        }
        match content {
            RegionContent::Text(s) | RegionContent::Html(s) => {
                if !s.is_empty() {
                    println!("[{}] {}", region.id(), s);
                }
            }
            RegionContent::Table(table) => {
                println!();
                println!("[{}]", region.id());
                print!("{table}");
            }
        }
    }
}

fn init_sentry(settings: &natal_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

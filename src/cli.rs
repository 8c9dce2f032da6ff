use std::{
    env,
    path::PathBuf,
};

use anyhow::Context;
use tokio::net::TcpListener;

use activity_calendar::{
    calendar::Locale,
    export::{self, ExportPaginator},
    server,
    storage::{activity_db::ActivityDb, config::Config},
    sync::activity_store::ActivityStore,
};

pub const USAGE: &str = "Usage: activity-calendar [--serve [ADDR]] [--export [PATH]] [--help]";

#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    Interactive,
    Serve(Option<String>),
    Export(Option<PathBuf>),
    Help,
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    parse_args(env::args().skip(1))
}

pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliMode, String> {
    let mut mode = CliMode::Interactive;
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        let next = match arg.as_str() {
            "--serve" => CliMode::Serve(args.next_if(|value| !value.starts_with("--"))),
            "--export" => CliMode::Export(
                args.next_if(|value| !value.starts_with("--"))
                    .map(PathBuf::from),
            ),
            "--help" | "-h" => return Ok(CliMode::Help),
            _ => return Err(format!("Unknown argument: {}", arg)),
        };

        if mode != CliMode::Interactive {
            return Err("--serve and --export cannot be combined".to_string());
        }
        mode = next;
    }

    Ok(mode)
}

pub async fn run_service(addr: Option<String>) -> anyhow::Result<()> {
    let config = Config::load_or_create().context("Failed to load config")?;
    let addr = addr.unwrap_or_else(|| config.service.listen_addr.clone());

    let db = ActivityDb::open(&config.service.database).with_context(|| {
        format!("Failed to open database {}", config.service.database.display())
    })?;
    let listener = TcpListener::bind(addr.as_str())
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Serving activities from {}", config.service.database.display());
    server::serve(listener, db).await.context("Activity service stopped")?;
    Ok(())
}

pub async fn run_export(target: Option<PathBuf>) -> anyhow::Result<()> {
    let config = Config::load_or_create().context("Failed to load config")?;
    let target = target.unwrap_or_else(|| config.export.directory.clone());

    let store = ActivityStore::from_config(&config);
    let paginator = ExportPaginator::new(Locale::from_code(&config.ui.locale))
        .with_file_stem(config.export.file_name.clone());

    let summary = export::export_activities(&store, &paginator, &target).await?;

    println!(
        "Exported {} days on {} pages to {}",
        summary.days,
        summary.pages,
        summary.path.display()
    );
    Ok(())
}

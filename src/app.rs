use std::io::Write;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::api::{self, FoodsApi, HttpFoodsApi};
use crate::browser::event::{self, Command};
use crate::browser::state::{SearchForm, DEFAULT_PAGE_SIZE};
use crate::browser::{BrowseError, Browser, Surface};
use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::output::terminal::TerminalSurface;
use crate::output::OutputFormat;

fn print_banner() {
    const BANNER: &str = r#"
                __       _ __
   ____  __  __/ /______(_) /_  _________ _      __________
  / __ \/ / / / __/ ___/ / __ \/ ___/ __ \ | /| / / ___/ _ \
 / / / / /_/ / /_/ /  / / /_/ / /  / /_/ / |/ |/ (__  )  __/
/_/ /_/\__,_/\__/_/  /_/_.___/_/   \____/|__/|__/____/\___/
"#;
    print!("{}", BANNER);
    println!(
        "       v{} - nutrition facts catalog browser",
        env!("CARGO_PKG_VERSION")
    );
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

// stdout carries one JSON document per view in json mode, so no prompt there
fn prompt_text(format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Text => Some(format!("{} ", ">".cyan().bold())),
        OutputFormat::Json => None,
    }
}

fn prompt(format: OutputFormat) {
    if let Some(text) = prompt_text(format) {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }
}

/// Loads the year options and first page, then the requested detail. The
/// detail is skipped when the first load already failed.
pub(crate) async fn start_browser<A: FoodsApi, S: Surface>(
    browser: &mut Browser<A, S>,
    years: Vec<String>,
    detail: Option<i64>,
) -> Result<(), BrowseError> {
    browser.init(years).await?;
    if let Some(id) = detail {
        browser.load_detail(id).await?;
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nutribrowse={level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Clone, Debug, PartialEq)]
struct RunConfig {
    base_url: String,
    page_size: u32,
    timeout: u64,
    proxy: Option<String>,
    years: Vec<String>,
    format: OutputFormat,
    no_color: bool,
    form: SearchForm,
    detail: Option<i64>,
    once: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let base_url_raw = args
        .base_url
        .or(cfg.base_url)
        .unwrap_or_else(|| api::DEFAULT_BASE_URL.to_string());
    let base_url = crate::utils::normalize_base_url(&base_url_raw)
        .map_err(|e| format!("invalid base_url '{base_url_raw}': {e}"))?;

    let page_size = args.page_size.or(cfg.page_size).unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size == 0 {
        return Err("invalid page_size, expected positive integer".to_string());
    }
    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);
    if timeout == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }

    let proxy = args
        .proxy
        .or(cfg.proxy)
        .filter(|p| !p.trim().is_empty());

    // years from the config file are checked when the browser loads them
    let years = match args.years {
        Some(raw) => crate::utils::parse_year_list_csv(&raw)
            .map_err(|e| format!("invalid --years '{raw}': {e}"))?,
        None => cfg.years.unwrap_or_else(crate::utils::default_years),
    };

    let format_raw = args
        .format
        .or(cfg.format)
        .unwrap_or_else(|| "text".to_string());
    let format = OutputFormat::parse(&format_raw)
        .ok_or_else(|| format!("invalid format '{format_raw}', expected text or json"))?;

    let year_select = args.year.map(|y| y.trim().to_string()).unwrap_or_default();
    if !year_select.is_empty() && !years.contains(&year_select) {
        return Err(format!(
            "year '{year_select}' is not one of the year options ({})",
            years.join(",")
        ));
    }

    let form = SearchForm {
        search_input: args.search.unwrap_or_default(),
        year_select,
        maker_input: args.maker.unwrap_or_default(),
        code_input: args.code.unwrap_or_default(),
    };

    Ok(RunConfig {
        base_url,
        page_size,
        timeout,
        proxy,
        years,
        format,
        no_color,
        form,
        detail: args.detail,
        once: args.once,
    })
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }

    let client = api::build_client(run.proxy.as_deref(), run.timeout).map_err(|e| e.to_string())?;
    let foods = HttpFoodsApi::new(client, &run.base_url).map_err(|e| e.to_string())?;

    if run.format == OutputFormat::Text {
        print_banner();
        format_kv_line("API", foods.base_url());
        format_kv_line(
            "HTTP",
            &format!(
                "timeout={}s proxy={} page-size={}",
                run.timeout,
                if run.proxy.is_some() { "on" } else { "off" },
                run.page_size
            ),
        );
    }
    info!(base_url = foods.base_url(), "starting browser");

    let mut browser = Browser::new(foods, TerminalSurface::new(run.format), run.page_size);
    *browser.form_mut() = run.form.clone();

    let started = start_browser(&mut browser, run.years.clone(), run.detail).await;
    if run.once {
        return started.map_err(|e| e.to_string());
    }
    if let Err(e) = started {
        debug!(error = %e, "startup failed");
    }

    if run.format == OutputFormat::Text {
        println!();
        println!("{}", "Type 'help' for commands.".dimmed());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(run.format);
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(format!("failed to read input: {e}")),
        };
        match event::parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => match run.format {
                OutputFormat::Text => print!("{}", event::HELP),
                OutputFormat::Json => eprint!("{}", event::HELP),
            },
            Ok(Command::Event(ev)) => {
                if let Err(e) = browser.dispatch(ev).await {
                    debug!(error = %e, "action failed");
                }
            }
            Err(msg) => eprintln!("{} {}", "?".yellow().bold(), msg),
        }
    }

    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let explicit_config = args.config.is_some();
    let config_path = match args.config.as_deref() {
        Some(p) => Some(config::expand_tilde(p)),
        None => config::default_config_path(),
    };

    if args.init_config {
        let path = config_path.ok_or_else(|| config::ConfigError::NoConfigPath.to_string())?;
        if config::ensure_default_config_file(&path).map_err(|e| e.to_string())? {
            println!("wrote {}", path.display());
        } else {
            println!("config already exists at {}", path.display());
        }
        return Ok(());
    }

    let cfg = match config_path.as_ref() {
        Some(path) => config::load_config(path, !explicit_config).map_err(|e| e.to_string())?,
        None => ConfigFile::default(),
    };

    init_logging(args.verbose);
    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}

use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "nutribrowse",
    version,
    about = "terminal browser for a nutrition-facts food catalog",
    long_about = "Nutribrowse searches a nutrition-facts food catalog over its REST API, pages through results and shows per-food details.\n\nExamples:\n  nutribrowse\n  nutribrowse -u http://localhost:8000/api/v1 -s apple\n  nutribrowse -s ramen -y 2023 --once --format json\n  nutribrowse --once -d 42\n\nTip: Use --config to persist the API URL and year options."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'f',
        long = "fmt",
        visible_alias = "format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text or json)."
    )]
    pub format: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.nutribrowse/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "ic",
        visible_alias = "init-config",
        help_heading = "Input",
        help = "Write a default config file if none exists, then exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'u',
        long = "bu",
        visible_alias = "base-url",
        value_name = "URL",
        help_heading = "API",
        help = "Base URL of the foods API (e.g. http://localhost:8000/api/v1)."
    )]
    pub base_url: Option<String>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "API",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "API",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'n',
        long = "ps",
        visible_alias = "page-size",
        value_name = "N",
        help_heading = "Search",
        help = "Foods per page."
    )]
    pub page_size: Option<u32>,

    #[arg(
        long = "yrs",
        visible_alias = "years",
        value_name = "YEARS",
        help_heading = "Search",
        help = "Research year options (comma-separated, e.g. 2020,2021)."
    )]
    pub years: Option<String>,

    #[arg(
        short = 's',
        long = "q",
        visible_alias = "search",
        value_name = "TEXT",
        help_heading = "Search",
        help = "Initial food name search."
    )]
    pub search: Option<String>,

    #[arg(
        short = 'y',
        long = "yr",
        visible_alias = "year",
        value_name = "YYYY",
        help_heading = "Search",
        help = "Initial research year filter."
    )]
    pub year: Option<String>,

    #[arg(
        short = 'm',
        long = "mk",
        visible_alias = "maker",
        value_name = "TEXT",
        help_heading = "Search",
        help = "Initial maker filter."
    )]
    pub maker: Option<String>,

    #[arg(
        long = "cd",
        visible_alias = "code",
        value_name = "CODE",
        help_heading = "Search",
        help = "Initial food code filter."
    )]
    pub code: Option<String>,

    #[arg(
        short = 'd',
        long = "dt",
        visible_alias = "detail",
        value_name = "ID",
        help_heading = "Search",
        help = "Show details for this food id after the initial search."
    )]
    pub detail: Option<i64>,

    #[arg(
        short = 'o',
        long = "once",
        help_heading = "Mode",
        help = "Run the initial search (and --detail) and exit instead of prompting."
    )]
    pub once: bool,
}

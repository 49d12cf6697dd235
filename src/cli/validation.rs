use crate::cli::args::CliArgs;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(page_size) = args.page_size {
        if page_size == 0 {
            return Err("invalid page-size, expected positive integer".to_string());
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive integer".to_string());
        }
    }
    if let Some(raw) = args.base_url.as_deref() {
        crate::utils::normalize_base_url(raw)
            .map_err(|e| format!("invalid --base-url '{raw}': {e}"))?;
    }
    if let Some(raw) = args.years.as_deref() {
        crate::utils::parse_year_list_csv(raw)
            .map_err(|e| format!("invalid --years '{raw}': {e}"))?;
    }
    if let Some(raw) = args.year.as_deref() {
        if !raw.trim().is_empty() && !crate::utils::is_valid_year(raw.trim()) {
            return Err(format!("invalid --year '{raw}', expected YYYY"));
        }
    }
    if let Some(raw) = args.format.as_deref() {
        if crate::output::OutputFormat::parse(raw).is_none() {
            return Err(format!("invalid --format '{raw}', expected text or json"));
        }
    }
    Ok(())
}

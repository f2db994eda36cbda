use clap::{Parser, ValueEnum};
use page_inspect::OutputFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-inspect")]
#[command(about = "Fetch a webpage and report its metadata, headings and links")]
#[command(version)]
pub struct Args {
    /// URL of the page to inspect (https:// is assumed when no scheme is given)
    pub url: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the configuration file)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// User-Agent header (overrides the configuration file)
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Regex for links to leave out of the report (repeatable)
    #[arg(short, long = "exclude")]
    pub exclude: Vec<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Html,
    Json,
}

/// Convert from CLI argument format to the library's output format
pub fn convert_format(arg: FormatArg) -> OutputFormat {
    match arg {
        FormatArg::Text => OutputFormat::Text,
        FormatArg::Html => OutputFormat::Html,
        FormatArg::Json => OutputFormat::Json,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["page-inspect", "example.com"]).unwrap();
        assert_eq!(args.url, "example.com");
        assert_eq!(args.format, FormatArg::Text);
        assert!(args.config.is_none());
        assert!(args.exclude.is_empty());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "page-inspect",
            "-f",
            "json",
            "--timeout",
            "5",
            "-e",
            r"\.pdf$",
            "--exclude",
            "/login",
            "https://example.com",
        ])
        .unwrap();
        assert_eq!(convert_format(args.format), OutputFormat::Json);
        assert_eq!(args.timeout, Some(5));
        assert_eq!(args.exclude, vec![r"\.pdf$", "/login"]);
    }

    #[test]
    fn test_missing_url_is_error() {
        assert!(Args::try_parse_from(["page-inspect"]).is_err());
    }
}

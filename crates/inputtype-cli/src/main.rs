//! inputtype - Detect and validate the type of untrusted input
//!
//! Classifies each input as a domain, email address, IP address, CIDR network
//! or staged file, and optionally runs the policy check for that type.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use inputtype_core::detect::DEFAULT_STAGING_ROOT;
use inputtype_core::{
    ClassifiedInput, Detector, DetectorConfig, Input, InputType, TldStore, ValidationError,
    Validator,
};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::EnvFilter;

/// Detect and validate the type of untrusted input
#[derive(Parser, Debug)]
#[command(name = "inputtype")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Inputs to classify (read from stdin, one per line, if none are given)
    inputs: Vec<String>,

    /// TLD list, one entry per line, '#' starts a comment
    #[arg(short, long, env = "INPUTTYPE_TLD_FILE")]
    tld_file: Option<PathBuf>,

    /// Directory that file references are resolved against
    #[arg(short, long, env = "INPUTTYPE_STAGING_ROOT", default_value = DEFAULT_STAGING_ROOT)]
    staging_root: PathBuf,

    /// Run the policy check for each detected type
    #[arg(long)]
    validate: bool,

    /// Treat inputs as decimal integers (numeric IP addresses)
    #[arg(long)]
    integer: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "full")]
    format: OutputFormat,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Output format for classification results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Input, type and parsed value, tab separated
    Full,
    /// Just the type name (for scripting)
    Type,
}

/// Counts for the closing summary
#[derive(Debug, Default)]
struct Stats {
    total: usize,
    unknown: usize,
    invalid: usize,
}

impl Stats {
    fn failed(&self) -> bool {
        self.unknown > 0 || self.invalid > 0
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let tlds = match cli.tld_file {
        Some(ref path) => Some(
            TldStore::from_path(path)
                .with_context(|| format!("Failed to load TLD list: {}", path.display()))?,
        ),
        None => None,
    };

    let detector =
        Detector::with_config(DetectorConfig::new().staging_root(cli.staging_root.clone()));
    let mut stats = Stats::default();

    if cli.inputs.is_empty() {
        debug!("Reading inputs from stdin");
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read from stdin")?;
            if line.trim().is_empty() {
                continue;
            }
            process_input(&cli, &detector, tlds.as_ref(), line.trim(), &mut stats)?;
        }
    } else {
        for input in &cli.inputs {
            process_input(&cli, &detector, tlds.as_ref(), input, &mut stats)?;
        }
    }

    info!(
        "Summary: {} inputs, {} unknown, {} failed validation",
        stats.total, stats.unknown, stats.invalid
    );

    Ok(if stats.failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Classify one input, optionally validate it, and print the result
fn process_input(
    cli: &Cli,
    detector: &Detector,
    tlds: Option<&TldStore>,
    raw: &str,
    stats: &mut Stats,
) -> Result<()> {
    let classified = classify(detector, raw, cli.integer);

    stats.total += 1;
    if !classified.is_known() {
        stats.unknown += 1;
    }

    let verdict = if cli.validate && classified.is_known() {
        let verdict = check(&classified, tlds)?;
        if verdict.is_err() {
            stats.invalid += 1;
        }
        Some(verdict)
    } else {
        None
    };

    println!("{}", format_result(raw, &classified, verdict, cli.format));
    Ok(())
}

/// Classify one input. In integer mode a line that is not a non-negative
/// integer is reported as unknown rather than ending the run.
fn classify(detector: &Detector, raw: &str, integer: bool) -> ClassifiedInput {
    if !integer {
        return detector.detect(raw);
    }
    match raw.parse::<u128>() {
        Ok(n) => detector.detect(Input::Integer(n)),
        Err(err) => {
            warn!("Not a non-negative integer: {} ({})", raw, err);
            ClassifiedInput::Unknown
        }
    }
}

/// Run the policy check. Only domains and emails need the TLD store.
fn check(
    classified: &ClassifiedInput,
    tlds: Option<&TldStore>,
) -> Result<std::result::Result<(), ValidationError>> {
    match (classified.kind(), tlds) {
        (_, Some(tlds)) => Ok(Validator::new(tlds).validate(classified)),
        (InputType::Domain | InputType::Email, None) => {
            bail!("Validating domains and emails requires --tld-file")
        }
        (_, None) => {
            let unused = TldStore::from_lines(std::iter::empty::<&str>())?;
            Ok(Validator::new(&unused).validate(classified))
        }
    }
}

/// Render one result line
fn format_result(
    raw: &str,
    classified: &ClassifiedInput,
    verdict: Option<std::result::Result<(), ValidationError>>,
    format: OutputFormat,
) -> String {
    let mut line = match format {
        OutputFormat::Type => classified.kind().to_string(),
        OutputFormat::Full => match classified.error() {
            Some(err) => format!("{}\t{}\t{}", raw, classified.kind(), err),
            None => format!("{}\t{}\t{}", raw, classified.kind(), classified),
        },
    };

    if let Some(verdict) = verdict {
        line.push('\t');
        match verdict {
            Ok(()) => line.push_str("ok"),
            Err(err) => line.push_str(&err.to_string()),
        }
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_full() {
        let classified = inputtype_core::detect("10.1.2.3/8");
        assert_eq!(
            format_result("10.1.2.3/8", &classified, None, OutputFormat::Full),
            "10.1.2.3/8\tIPNet\t10.0.0.0/8"
        );
    }

    #[test]
    fn test_format_type_only() {
        let classified = inputtype_core::detect("8.8.8.8");
        assert_eq!(
            format_result("8.8.8.8", &classified, Some(Ok(())), OutputFormat::Type),
            "IP\tok"
        );
    }

    #[test]
    fn test_format_unknown() {
        assert_eq!(
            format_result("", &ClassifiedInput::Empty, None, OutputFormat::Full),
            "\tEmpty\tEmpty Input String"
        );
    }

    #[test]
    fn test_format_with_verdict() {
        let classified = inputtype_core::detect("127.0.0.1");
        let verdict = check(&classified, None).unwrap();
        assert_eq!(
            format_result("127.0.0.1", &classified, Some(verdict), OutputFormat::Full),
            "127.0.0.1\tIP\t127.0.0.1\tLoopback IP"
        );
    }

    #[test]
    fn test_check_requires_tlds_for_domains() {
        let classified = inputtype_core::detect("example.com");
        assert!(check(&classified, None).is_err());

        let tlds = TldStore::from_text("COM\n").unwrap();
        assert_eq!(check(&classified, Some(&tlds)).unwrap(), Ok(()));
    }

    #[test]
    fn test_check_staged_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sample"), b"data").unwrap();
        let detector = Detector::with_config(DetectorConfig::new().staging_root(dir.path()));

        let classified = detector.detect("sample");
        assert_eq!(classified.kind(), InputType::File);
        assert_eq!(check(&classified, None).unwrap(), Ok(()));
    }

    #[test]
    fn test_check_without_tlds() {
        let classified = inputtype_core::detect("8.8.8.8");
        assert_eq!(check(&classified, None).unwrap(), Ok(()));

        let classified = inputtype_core::detect("10.0.0.0/8");
        assert_eq!(check(&classified, None).unwrap(), Ok(()));
    }

    #[test]
    fn test_classify_integers() {
        let detector = Detector::new();
        assert_eq!(
            classify(&detector, "134744072", true),
            ClassifiedInput::Ip("8.8.8.8".parse().unwrap())
        );
        assert_eq!(classify(&detector, "0", true), ClassifiedInput::Empty);
        assert_eq!(classify(&detector, "8.8.8.8", false).kind(), InputType::Ip);
    }

    #[test]
    fn test_classify_bad_integer_is_unknown() {
        let detector = Detector::new();
        for raw in ["8.8.8.8", "-1", "abc", "340282366920938463463374607431768211456"] {
            assert_eq!(classify(&detector, raw, true), ClassifiedInput::Unknown, "{raw}");
        }
    }

    #[test]
    fn test_stats_failed() {
        let mut stats = Stats::default();
        assert!(!stats.failed());
        stats.invalid = 1;
        assert!(stats.failed());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

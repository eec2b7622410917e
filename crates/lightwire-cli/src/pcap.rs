use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::Subcommand;
use glob::glob;
use lightwire_core::CaptureReport;
use tracing::info;

use crate::CliError;

#[derive(Subcommand, Debug)]
pub(crate) enum PcapCommands {
    /// Decode the Art-Net traffic of a capture into a JSON report.
    #[command(
        after_help = "Examples:\n  lightwire pcap decode capture.pcapng -o report.json\n  lightwire pcap decode 'captures/*.pcap' --stdout --pretty"
    )]
    Decode {
        /// Path (or glob matching one file) to a .pcap or .pcapng file
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if malformed Art-Net frames were seen
        #[arg(long)]
        strict: bool,

        /// List sampled malformed frames after decoding
        #[arg(long)]
        list_malformed: bool,
    },
}

pub(crate) fn run(command: PcapCommands) -> Result<(), CliError> {
    match command {
        PcapCommands::Decode {
            input,
            report,
            stdout,
            pretty,
            compact,
            quiet,
            strict,
            list_malformed,
        } => cmd_pcap_decode(DecodeOptions {
            input,
            report: if stdout { None } else { report },
            pretty,
            compact,
            quiet,
            strict,
            list_malformed,
        }),
    }
}

struct DecodeOptions {
    input: PathBuf,
    /// `None` writes to stdout.
    report: Option<PathBuf>,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    list_malformed: bool,
}

fn cmd_pcap_decode(opts: DecodeOptions) -> Result<(), CliError> {
    let resolved_input = locate_capture(&opts.input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;

    if let Some(report_path) = opts.report.as_ref() {
        ensure_distinct_output(report_path, &input_abs)?;
    }

    let rep = lightwire_core::decode_pcap_file(&resolved_input)
        .context("PCAP/PCAPNG decoding failed")?;
    let json = serialize_report(&rep, opts.pretty, opts.compact)?;

    match opts.report.as_ref() {
        None => print!("{}", json),
        Some(report) => {
            if let Some(parent) = report.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(report, json)
                .with_context(|| format!("Failed to write report: {}", report.display()))?;
            info!(path = %report.display(), frames = rep.frames.len(), "report written");
            if !opts.quiet {
                eprintln!("OK: report written -> {}", report.display());
            }
        }
    }

    if opts.list_malformed && !opts.quiet {
        print_malformed(&rep);
    }
    if opts.strict && rep.malformed.count > 0 {
        return Err(CliError::new(
            format!("{} malformed Art-Net frame(s) detected", rep.malformed.count),
            Some("use --list-malformed to inspect".to_string()),
        ));
    }
    Ok(())
}

fn ensure_distinct_output(report_path: &Path, input_abs: &Path) -> Result<(), CliError> {
    let parent = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // A report directory that does not exist yet cannot hold the input.
    let Ok(report_dir) = fs::canonicalize(parent) else {
        return Ok(());
    };
    let file_name = report_path
        .file_name()
        .ok_or_else(|| anyhow!("Invalid report path"))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(rep: &CaptureReport, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    let json = if pretty {
        serde_json::to_string_pretty(rep)
    } else {
        serde_json::to_string(rep)
    };
    json.context("JSON serialization failed").map_err(Into::into)
}

fn print_malformed(rep: &CaptureReport) {
    eprintln!("Malformed Art-Net frames: {}", rep.malformed.count);
    for example in &rep.malformed.examples {
        eprintln!("  {}", example);
    }
}

const CAPTURE_EXTENSIONS: [&str; 2] = ["pcap", "pcapng"];

/// Resolve the positional input (a path, or a glob matching one file) to an
/// existing capture file.
fn locate_capture(input: &Path) -> Result<PathBuf, CliError> {
    let path = match input.to_str().filter(|text| is_glob_pattern(text)) {
        Some(pattern) => single_glob_match(pattern)?,
        None => input.to_path_buf(),
    };
    if !path.is_file() {
        let problem = if path.exists() {
            "input is not a file"
        } else {
            "input file not found"
        };
        return Err(capture_error(format!("{problem}: {}", path.display())));
    }
    if !has_capture_extension(&path) {
        return Err(capture_error(format!(
            "unsupported input format '{}'",
            path.display()
        )));
    }
    Ok(path)
}

fn capture_error(message: String) -> CliError {
    CliError::new(message, Some("expected a .pcap or .pcapng file".to_string()))
}

fn has_capture_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            CAPTURE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn single_glob_match(pattern: &str) -> Result<PathBuf, CliError> {
    let invalid = |detail: String| {
        CliError::new(format!("invalid input pattern '{pattern}'"), Some(detail))
    };
    let mut files = glob(pattern)
        .map_err(|err| invalid(err.msg.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| invalid(err.to_string()))?;
    files.retain(|path| path.is_file());

    let mut files = files.into_iter();
    match (files.next(), files.len()) {
        (Some(only), 0) => Ok(only),
        (None, _) => Err(CliError::new(
            format!("no files match pattern '{pattern}'"),
            Some("quote the pattern so the shell leaves it to lightwire".to_string()),
        )),
        (Some(first), rest) => Err(CliError::new(
            format!(
                "multiple files match pattern '{pattern}' ({} matches, first: {})",
                rest + 1,
                first.display()
            ),
            Some("pass one capture per run".to_string()),
        )),
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{has_capture_extension, is_glob_pattern};

    #[test]
    fn capture_extensions_ignore_case() {
        assert!(has_capture_extension(Path::new("show.PCAPNG")));
        assert!(has_capture_extension(Path::new("dir/show.pcap")));
        assert!(!has_capture_extension(Path::new("show.pcap.json")));
        assert!(!has_capture_extension(Path::new("pcap")));
    }

    #[test]
    fn glob_detection() {
        assert!(is_glob_pattern("captures/*.pcap"));
        assert!(is_glob_pattern("show?.pcapng"));
        assert!(!is_glob_pattern("captures/show.pcapng"));
    }
}

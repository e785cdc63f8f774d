use crate::common::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Tsv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// output file (`stdout`, `stderr`, or a file name; `.gz` is compressed)
    #[arg(short, long, default_value = "stdout")]
    pub output: Box<str>,

    /// output format
    #[arg(long, value_enum, default_value = "tsv")]
    pub format: OutputFormat,
}

/// Where a report goes, decided from the `--output` string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget<'a> {
    Stdout,
    Stderr,
    File { path: &'a Path, gzip: bool },
}

impl<'a> OutputTarget<'a> {
    pub fn parse(output: &'a str) -> Self {
        // stream names win over files of the same name
        if output.eq_ignore_ascii_case("stdout") {
            return OutputTarget::Stdout;
        }
        if output.eq_ignore_ascii_case("stderr") {
            return OutputTarget::Stderr;
        }
        let path = Path::new(output);
        let gzip = path.extension().and_then(|x| x.to_str()) == Some("gz");
        OutputTarget::File { path, gzip }
    }
}

///
/// Open a buffered writer for a report
///
/// * `output` - `stdout`, `stderr`, or a file name; `.gz` files are compressed
///   and missing parent directories are created
///
pub fn open_buf_writer(output: &str) -> anyhow::Result<Box<dyn Write>> {
    match OutputTarget::parse(output) {
        OutputTarget::Stdout => Ok(Box::new(BufWriter::new(std::io::stdout()))),
        OutputTarget::Stderr => Ok(Box::new(BufWriter::new(std::io::stderr()))),
        OutputTarget::File { path, gzip } => {
            // like `mkdir -p` on the parent
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)?;
            }
            let file = File::create(path)?;
            if gzip {
                let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
                Ok(Box::new(BufWriter::new(encoder)))
            } else {
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }
}

/// Write one line per item; a closed pipe (`recruit ... | head`) ends quietly
pub fn write_lines<T>(lines: &[T], output: &str) -> anyhow::Result<()>
where
    T: std::fmt::Display,
{
    let mut buf = open_buf_writer(output)?;
    for line in lines {
        match writeln!(buf, "{}", line) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => return Ok(()),
            Err(e) => return Err(anyhow::anyhow!("{}: {}", output, e)),
        }
    }
    buf.flush()?;
    Ok(())
}

fn tsv_lines(report: &Report) -> Vec<Box<str>> {
    let mut lines: Vec<Box<str>> = vec!["#series\tx\ty".into()];
    for s in report.series.iter() {
        lines.extend(s.to_tsv_lines());
    }
    lines
}

fn json_value(report: &Report) -> serde_json::Value {
    serde_json::json!({
        "scenario": report.scenario,
        "parameters": report.parameters,
        "series": report.series.iter().map(|s| s.to_json()).collect::<Vec<_>>(),
    })
}

/// Write all series of a scenario in the requested format
pub fn write_report(report: &Report, output: &str, format: OutputFormat) -> anyhow::Result<()> {
    info!(
        "{}: writing {} series ({} points) to {}",
        report.scenario,
        report.series.len(),
        report.series.iter().map(|s| s.len()).sum::<usize>(),
        output
    );

    match format {
        OutputFormat::Tsv => write_lines(&tsv_lines(report), output),
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(&json_value(report))?;
            write_lines(&[text], output)
        }
    }
}

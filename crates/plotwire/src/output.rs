use std::fmt::Write as _;
use std::io::IsTerminal;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
pub struct FrameReport<'a> {
    pub format: &'a str,
    pub bytes: usize,
    pub transmitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
}

pub fn print_frame_report(report: &FrameReport<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Pretty => {
            if report.transmitted {
                println!("transmitted {} bytes ({})", report.bytes, report.format);
            } else {
                println!("encoded {} bytes ({})", report.bytes, report.format);
            }
            if let Some(hex) = &report.hex {
                println!("{hex}");
            }
        }
    }
}

#[derive(Serialize)]
pub struct StreamReport {
    pub frames_sent: u64,
    pub frames_dropped: u64,
    pub elapsed_ms: u128,
}

pub fn print_stream_report(report: &StreamReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Pretty => {
            println!(
                "sent {} frames, dropped {}, in {} ms",
                report.frames_sent, report.frames_dropped, report.elapsed_ms
            );
        }
    }
}

/// Space-separated lowercase hex, 16 bytes per line.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(if i % 16 == 0 { '\n' } else { ' ' });
        }
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_dump_formats_bytes() {
        assert_eq!(hex_dump(&[0x00, 0x00, 0x80, 0x7F]), "00 00 80 7f");
    }

    #[test]
    fn hex_dump_wraps_lines() {
        let dump = hex_dump(&[0xAB; 17]);
        assert_eq!(dump.lines().count(), 2);
        assert!(dump.starts_with("ab ab"));
    }

    #[test]
    fn frame_report_serializes() {
        let report = FrameReport {
            format: "justfloat",
            bytes: 12,
            transmitted: true,
            hex: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"format":"justfloat","bytes":12,"transmitted":true}"#
        );
    }
}

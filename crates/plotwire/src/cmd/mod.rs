use std::fs::OpenOptions;
use std::io::Write;
use std::net::TcpStream;

use clap::{Args, Subcommand, ValueEnum};

use crate::exit::{io_error, CliResult};
use crate::output::OutputFormat;

pub mod send;
pub mod stream;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode one frame and transmit it.
    Send(SendArgs),
    /// Stream generated demo telemetry until Ctrl-C.
    Stream(StreamArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, format),
        Command::Stream(args) => stream::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum WireFormat {
    /// Binary: native-endian f32 payload plus end-of-frame tail.
    Justfloat,
    /// Text: `prefix:v0,v1,...\n`, fixed-point decimals.
    Firewater,
}

impl WireFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            WireFormat::Justfloat => "justfloat",
            WireFormat::Firewater => "firewater",
        }
    }
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Destination: `-` for stdout, `tcp:HOST:PORT`, or a device/file path.
    pub dest: String,
    /// Wire format.
    #[arg(long, short = 'f', default_value = "justfloat")]
    pub format: WireFormat,
    /// Channel values, comma-separated.
    #[arg(long, short = 'v', value_delimiter = ',', required = true)]
    pub values: Vec<f32>,
    /// FireWater prefix (end it with `:` for the viewer to parse it).
    #[arg(long, default_value = "")]
    pub prefix: String,
    /// Hex-dump the encoded frame to stdout instead of transmitting.
    #[arg(long)]
    pub hex: bool,
}

#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Destination: `-` for stdout, `tcp:HOST:PORT`, or a device/file path.
    pub dest: String,
    /// Wire format.
    #[arg(long, short = 'f', default_value = "justfloat")]
    pub format: WireFormat,
    /// Number of generated channels.
    #[arg(long, short = 'c', default_value = "2")]
    pub channels: usize,
    /// Frames per second.
    #[arg(long, short = 'r', default_value = "50")]
    pub rate: u32,
    /// Stop after this many frames (default: run until Ctrl-C).
    #[arg(long, short = 'n')]
    pub count: Option<u64>,
    /// FireWater prefix (end it with `:` for the viewer to parse it).
    #[arg(long, default_value = "")]
    pub prefix: String,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Open the transmit destination named on the command line.
pub fn open_dest(dest: &str) -> CliResult<Box<dyn Write + Send>> {
    if dest == "-" {
        return Ok(Box::new(std::io::stdout()));
    }
    if let Some(addr) = dest.strip_prefix("tcp:") {
        let stream = TcpStream::connect(addr)
            .map_err(|err| io_error(&format!("failed to connect to {addr}"), err))?;
        return Ok(Box::new(stream));
    }
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(dest)
        .map_err(|err| io_error(&format!("failed to open {dest}"), err))?;
    Ok(Box::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_dest_accepts_stdout() {
        assert!(open_dest("-").is_ok());
    }

    #[test]
    fn open_dest_rejects_unreachable_tcp() {
        // Port 1 on localhost is essentially never listening.
        let err = match open_dest("tcp:127.0.0.1:1") {
            Ok(_) => panic!("expected connection to fail"),
            Err(err) => err,
        };
        assert!(err.message.contains("127.0.0.1:1"));
    }

    #[test]
    fn wire_format_names() {
        assert_eq!(WireFormat::Justfloat.as_str(), "justfloat");
        assert_eq!(WireFormat::Firewater.as_str(), "firewater");
    }
}

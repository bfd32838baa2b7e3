use std::f32::consts::TAU;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use plotwire_frame::{FrameConfig, TelemetrySender};
use plotwire_transport::SpooledSink;
use tracing::info;

use crate::cmd::{open_dest, StreamArgs, WireFormat};
use crate::exit::{frame_error, CliError, CliResult, INTERNAL, SUCCESS, USAGE};
use crate::output::{print_stream_report, OutputFormat, StreamReport};

pub fn run(args: StreamArgs, format: OutputFormat) -> CliResult<i32> {
    if args.channels == 0 {
        return Err(CliError::new(USAGE, "--channels must be at least 1"));
    }
    if args.rate == 0 {
        return Err(CliError::new(USAGE, "--rate must be at least 1"));
    }

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    ctrlc::set_handler(move || handler_stop.store(true, Ordering::SeqCst))
        .map_err(|err| CliError::new(INTERNAL, format!("failed to install handler: {err}")))?;

    let writer = open_dest(&args.dest)?;
    let config = FrameConfig {
        max_channels: args.channels,
        ..FrameConfig::default()
    };
    let mut sender = TelemetrySender::with_config(SpooledSink::new(writer), &config);

    let period = Duration::from_secs_f64(1.0 / f64::from(args.rate));
    let started = Instant::now();
    let mut values = vec![0.0f32; args.channels];
    let mut frames_sent = 0u64;
    let mut frames_dropped = 0u64;
    let mut tick = 0u64;

    while !stop.load(Ordering::SeqCst) {
        if args.count.is_some_and(|count| frames_sent + frames_dropped >= count) {
            break;
        }

        fill_demo_frame(&mut values, tick, args.rate);
        let sent = match args.format {
            WireFormat::Justfloat => sender.send_just_float(&values),
            WireFormat::Firewater => sender.send_channels(&args.prefix, &values),
        };

        match sent {
            Ok(()) => frames_sent += 1,
            Err(err) if err.is_busy() => frames_dropped += 1,
            Err(err) => return Err(frame_error("stream failed", err)),
        }

        tick += 1;
        std::thread::sleep(period);
    }

    let report = StreamReport {
        frames_sent,
        frames_dropped,
        elapsed_ms: started.elapsed().as_millis(),
    };
    info!(
        frames_sent = report.frames_sent,
        frames_dropped = report.frames_dropped,
        "stream complete"
    );
    print_stream_report(&report, format);
    Ok(SUCCESS)
}

/// One sine cycle per second on channel 0, each further channel at the next
/// harmonic.
fn fill_demo_frame(values: &mut [f32], tick: u64, rate: u32) {
    let t = tick as f32 / rate as f32;
    for (ch, value) in values.iter_mut().enumerate() {
        *value = (TAU * t * (ch as f32 + 1.0)).sin();
    }
}

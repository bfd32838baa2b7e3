use plotwire_frame::TelemetrySender;
use plotwire_transport::DirectSink;

use crate::cmd::{open_dest, SendArgs, WireFormat};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{hex_dump, print_frame_report, FrameReport, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    if args.hex {
        let frame = encode_frame(&args)?;
        print_frame_report(
            &FrameReport {
                format: args.format.as_str(),
                bytes: frame.len(),
                transmitted: false,
                hex: Some(hex_dump(&frame)),
            },
            format,
        );
        return Ok(SUCCESS);
    }

    let writer = open_dest(&args.dest)?;
    let mut sender = TelemetrySender::new(DirectSink::new(writer));
    let sent = match args.format {
        WireFormat::Justfloat => sender.send_just_float(&args.values),
        WireFormat::Firewater => sender.send_channels(&args.prefix, &args.values),
    };
    sent.map_err(|err| frame_error("send failed", err))?;

    let frame = encode_frame(&args)?;
    print_frame_report(
        &FrameReport {
            format: args.format.as_str(),
            bytes: frame.len(),
            transmitted: true,
            hex: None,
        },
        format,
    );
    Ok(SUCCESS)
}

/// Encode the frame into memory, without transmitting it anywhere.
fn encode_frame(args: &SendArgs) -> CliResult<Vec<u8>> {
    let mut sender = TelemetrySender::new(DirectSink::new(Vec::new()));
    let encoded = match args.format {
        WireFormat::Justfloat => sender.send_just_float(&args.values),
        WireFormat::Firewater => sender.send_channels(&args.prefix, &args.values),
    };
    encoded.map_err(|err| frame_error("encoding failed", err))?;
    Ok(sender.into_sink().into_inner())
}

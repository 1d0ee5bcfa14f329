// ABOUTME: Example application for inspecting and producing SMPP timestamps from the command line
// ABOUTME: Decodes SMPP/delivery receipt timestamps or encodes a duration as a relative timestamp

use argh::FromArgs;
use chrono::{FixedOffset, TimeDelta};
use smpp_timeformat::{DlrTimeZone, TimeFormat, format_relative_duration};
use std::error::Error;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

/// Decode or encode SMPP v3.4 timestamps
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debugging
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// a 16 character SMPP timestamp to decode, e.g. 111019080000017+
    #[argh(option, short = 's')]
    smpp: Option<String>,

    /// a YYMMDDhhmm[ss] delivery receipt timestamp to decode
    #[argh(option, short = 'r')]
    receipt: Option<String>,

    /// UTC offset in minutes for receipt timestamps (default: local zone)
    #[argh(option)]
    receipt_offset: Option<i32>,

    /// a duration in seconds to encode as a relative timestamp
    #[argh(option, short = 'e')]
    encode: Option<i64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli_args.debugging {
            Level::TRACE
        } else {
            Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let mut codec = TimeFormat::new();
    if let Some(minutes) = cli_args.receipt_offset {
        let offset = FixedOffset::east_opt(minutes * 60)
            .ok_or_else(|| format!("receipt offset of {minutes} minutes is out of range"))?;
        codec = codec.with_dlr_time_zone(DlrTimeZone::Fixed(offset));
    }
    debug!(dlr_time_zone = ?codec.dlr_time_zone(), "codec configured");

    if let Some(text) = cli_args.smpp {
        let ts = codec.parse_smpp_timestamp(&text)?;
        println!("input:    {text}");
        match (ts.local_time(), ts.offset_seconds()) {
            (Some(local), _) => println!("absolute: {local}"),
            (None, Some(seconds)) => println!("absolute: offset {seconds}s"),
            (None, None) => println!("relative"),
        }
        println!("instant:  {}", ts.instant);
        println!("duration: {}s", ts.duration.num_seconds());
    }

    if let Some(text) = cli_args.receipt {
        let instant = codec.parse_dlr_timestamp(&text)?;
        println!("receipt:  {text} -> {instant}");
    }

    if let Some(seconds) = cli_args.encode {
        let duration = TimeDelta::try_seconds(seconds)
            .ok_or_else(|| format!("{seconds}s is out of range"))?;
        println!("encoded:  {}", format_relative_duration(duration)?);
    }

    Ok(())
}

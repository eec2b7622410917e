use std::net::Ipv4Addr;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use time::{OffsetDateTime, PrimitiveDateTime, format_description};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use lightwire_core::bits::{broadcast_address, hex_string, parse_hex, parse_radix};
use lightwire_core::protocols::artnet::{
    ArtNzs, ArtPoll, ArtSync, ArtTimeSync, DiagnosticsPriority, PollFlags, TimeSyncMode,
    encode_art_dmx, encode_art_poll_with, encode_art_time_sync, parse_packet,
};
use lightwire_core::protocols::channels::{ChannelBlock, DEFAULT_MTU, plan_transfer};

mod pcap;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("LIGHTWIRE_BUILD_COMMIT"),
    " ",
    env!("LIGHTWIRE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "lightwire")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Art-Net frame codec and BLE channel-block packer.",
    long_about = None,
    after_help = "Examples:\n  lightwire encode poll\n  lightwire decode 4172742D4E6574000052000E0000\n  lightwire pack --start 1 --values 0A141E\n  lightwire pcap decode capture.pcapng --stdout"
)]
struct Cli {
    /// Log filter used when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode an Art-Net frame and print it as hex.
    Encode {
        #[command(subcommand)]
        message: EncodeCommands,
    },
    /// Decode a hex Art-Net frame and print it as JSON.
    Decode {
        /// Frame bytes as hex (whitespace allowed)
        hex: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Pack channel values into MTU-sized BLE writes, one hex line each.
    Pack(PackArgs),
    /// Print the broadcast address for an IPv4 address and netmask.
    Broadcast { address: Ipv4Addr, mask: Ipv4Addr },
    /// Operations on PCAP/PCAPNG inputs.
    Pcap {
        #[command(subcommand)]
        command: pcap::PcapCommands,
    },
}

#[derive(Subcommand, Debug)]
enum EncodeCommands {
    /// ArtPoll (defaults ask for broadcast and unicast diagnostics)
    Poll {
        /// TalkToMe flags byte
        #[arg(long, value_parser = parse_u8_arg)]
        flags: Option<u8>,
        /// Minimum diagnostics priority
        #[arg(long, value_parser = parse_u8_arg)]
        priority: Option<u8>,
    },
    /// ArtSync
    Sync,
    /// ArtDmx
    Dmx {
        #[arg(long, default_value_t = 0, value_parser = parse_u8_arg)]
        sequence: u8,
        #[arg(long, default_value_t = 0, value_parser = parse_u8_arg)]
        physical: u8,
        /// 15-bit port address (net, sub-net, universe)
        #[arg(long, value_parser = parse_u16_arg)]
        port_address: u16,
        /// Channel levels as hex, 1..=512 bytes
        #[arg(long)]
        data: String,
    },
    /// ArtNzs
    Nzs {
        #[arg(long, default_value_t = 0, value_parser = parse_u8_arg)]
        sequence: u8,
        #[arg(long, default_value_t = 0, value_parser = parse_u8_arg)]
        net: u8,
        #[arg(long, default_value_t = 0, value_parser = parse_u8_arg)]
        sub_uni: u8,
        #[arg(long, value_parser = parse_u8_arg)]
        start_code: Option<u8>,
        /// Even number of bytes as hex, 2..=512
        #[arg(long)]
        data: String,
    },
    /// ArtTimeSync
    TimeSync {
        /// Local time as "YYYY-MM-DD HH:MM:SS" (defaults to now, UTC)
        #[arg(long)]
        at: Option<String>,
        /// Encode a response instead of a set request
        #[arg(long)]
        response: bool,
        /// Daylight saving time is in effect
        #[arg(long)]
        dst: bool,
    },
}

#[derive(Args, Debug)]
struct PackArgs {
    /// Largest single write in bytes
    #[arg(long, env = "LIGHTWIRE_MTU", default_value_t = DEFAULT_MTU)]
    mtu: usize,

    /// Block as START-END:HEX (repeatable, sent in order)
    #[arg(long = "block", value_parser = parse_block_arg, conflicts_with_all = ["start", "values"])]
    blocks: Vec<BlockArg>,

    /// First channel of --values
    #[arg(long, requires = "values", value_parser = parse_u16_arg)]
    start: Option<u16>,

    /// Consecutive channel levels as hex, split into 127-channel blocks
    #[arg(long, requires = "start")]
    values: Option<String>,

    /// Fail when a block does not fit in one write
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Clone)]
struct BlockArg {
    range: RangeInclusive<u16>,
    values: Vec<u8>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match cli.command {
        Commands::Encode { message } => cmd_encode(message),
        Commands::Decode { hex, pretty } => cmd_decode(&hex, pretty),
        Commands::Pack(args) => cmd_pack(args),
        Commands::Broadcast { address, mask } => {
            println!("{}", broadcast_address(address, mask));
            Ok(())
        }
        Commands::Pcap { command } => pcap::run(command),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    pub(crate) fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_encode(message: EncodeCommands) -> Result<(), CliError> {
    let frame = match message {
        EncodeCommands::Poll { flags, priority } => {
            let standard = ArtPoll::standard();
            encode_art_poll_with(&ArtPoll {
                flags: flags.map(PollFlags).unwrap_or(standard.flags),
                priority: priority.map(DiagnosticsPriority).unwrap_or(standard.priority),
            })
        }
        EncodeCommands::Sync => ArtSync::default().encode(),
        EncodeCommands::Dmx {
            sequence,
            physical,
            port_address,
            data,
        } => {
            let data = hex_arg("--data", &data)?;
            encode_art_dmx(sequence, physical, port_address, &data).map_err(|err| {
                CliError::new(
                    format!("cannot encode ArtDmx: {err}"),
                    Some("send 1..=512 bytes to a port address below 0x8000".to_string()),
                )
            })?
        }
        EncodeCommands::Nzs {
            sequence,
            net,
            sub_uni,
            start_code,
            data,
        } => {
            let mut nzs = ArtNzs::new(sequence, net, sub_uni, hex_arg("--data", &data)?);
            if let Some(start_code) = start_code {
                nzs.start_code = start_code;
            }
            nzs.encode().map_err(|err| {
                CliError::new(
                    format!("cannot encode ArtNzs: {err}"),
                    Some("ArtNzs needs an even byte count in 2..=512".to_string()),
                )
            })?
        }
        EncodeCommands::TimeSync { at, response, dst } => {
            let datetime = match at {
                Some(text) => parse_datetime(&text)?,
                None => {
                    let now = OffsetDateTime::now_utc();
                    PrimitiveDateTime::new(now.date(), now.time())
                }
            };
            let mode = if response {
                TimeSyncMode::Response
            } else {
                TimeSyncMode::Set
            };
            let sync = ArtTimeSync::from_datetime(datetime, mode, dst)
                .map_err(|err| CliError::new(err.to_string(), None))?;
            encode_art_time_sync(&sync)
        }
    };
    println!("{}", hex_string(&frame));
    Ok(())
}

fn cmd_decode(hex: &str, pretty: bool) -> Result<(), CliError> {
    let bytes = hex_arg("HEX", hex)?;
    let packet = match parse_packet(&bytes) {
        Ok(Some(packet)) => packet,
        Ok(None) => {
            return Err(CliError::new(
                "not an Art-Net frame",
                Some("Art-Net frames begin with the bytes 4172742D4E657400".to_string()),
            ));
        }
        Err(err) => {
            return Err(CliError::new(format!("malformed Art-Net frame: {err}"), None));
        }
    };
    let json = if pretty {
        serde_json::to_string_pretty(&packet)
    } else {
        serde_json::to_string(&packet)
    };
    let json = json.context("JSON serialization failed")?;
    println!("{json}");
    Ok(())
}

fn cmd_pack(args: PackArgs) -> Result<(), CliError> {
    if args.mtu == 0 {
        return Err(CliError::new(
            "--mtu must be at least 1",
            Some(format!("the fixture link uses {DEFAULT_MTU}")),
        ));
    }
    let blocks = match (&args.start, &args.values) {
        (Some(start), Some(values)) => {
            let values = hex_arg("--values", values)?;
            ChannelBlock::split(*start, &values).map_err(|err| {
                CliError::new(
                    format!("invalid channel values: {err}"),
                    Some("channels run from 1 to 512".to_string()),
                )
            })?
        }
        _ => {
            if args.blocks.is_empty() {
                return Err(CliError::new(
                    "nothing to pack",
                    Some("use --block START-END:HEX or --start with --values".to_string()),
                ));
            }
            args.blocks
                .iter()
                .map(|arg| {
                    ChannelBlock::new(arg.range.clone(), &arg.values).map_err(|err| {
                        CliError::new(
                            format!(
                                "invalid block {}-{}: {err}",
                                arg.range.start(),
                                arg.range.end()
                            ),
                            Some("a block covers 1..=127 channels within 1..=512".to_string()),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let plan = plan_transfer(&blocks, args.mtu);
    debug!(blocks = blocks.len(), writes = plan.writes.len(), "packed");
    for write in &plan.writes {
        println!("{}", hex_string(write));
    }
    if args.strict && !plan.is_complete() {
        return Err(CliError::new(
            format!("{} block(s) exceed the {}-byte mtu", plan.oversized.len(), args.mtu),
            Some("raise --mtu or send fewer channels per block".to_string()),
        ));
    }
    Ok(())
}

fn hex_arg(name: &str, text: &str) -> Result<Vec<u8>, CliError> {
    parse_hex(text).map_err(|err| {
        CliError::new(
            format!("invalid hex for {name}: {err}"),
            Some("use two hex digits per byte, e.g. 0AFF10".to_string()),
        )
    })
}

fn parse_datetime(text: &str) -> Result<PrimitiveDateTime, CliError> {
    let format = format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")
        .context("invalid time format description")?;
    PrimitiveDateTime::parse(text, &format).map_err(|err| {
        CliError::new(
            format!("invalid --at value '{text}': {err}"),
            Some("expected \"YYYY-MM-DD HH:MM:SS\"".to_string()),
        )
    })
}

fn parse_u64_arg(text: &str) -> Result<u64, String> {
    let result = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => parse_radix(hex, 16),
        None => parse_radix(text, 10),
    };
    result.map_err(|err| err.to_string())
}

fn parse_u8_arg(text: &str) -> Result<u8, String> {
    let value = parse_u64_arg(text)?;
    u8::try_from(value).map_err(|_| format!("{value} does not fit in one byte"))
}

fn parse_u16_arg(text: &str) -> Result<u16, String> {
    let value = parse_u64_arg(text)?;
    u16::try_from(value).map_err(|_| format!("{value} does not fit in two bytes"))
}

fn parse_block_arg(text: &str) -> Result<BlockArg, String> {
    let (range, hex) = text
        .split_once(':')
        .ok_or_else(|| format!("expected START-END:HEX, got '{text}'"))?;
    let (start, end) = match range.split_once('-') {
        Some((start, end)) => (parse_u16_arg(start)?, parse_u16_arg(end)?),
        None => {
            let channel = parse_u16_arg(range)?;
            (channel, channel)
        }
    };
    let values = parse_hex(hex).map_err(|err| err.to_string())?;
    Ok(BlockArg {
        range: start..=end,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_block_arg, parse_u8_arg, parse_u16_arg};

    #[test]
    fn numeric_args_accept_hex_prefix() {
        assert_eq!(parse_u8_arg("0x91"), Ok(0x91));
        assert_eq!(parse_u8_arg("12"), Ok(12));
        assert_eq!(parse_u16_arg("0X7FFF"), Ok(0x7FFF));
        assert!(parse_u8_arg("256").is_err());
        assert!(parse_u8_arg("zz").is_err());
    }

    #[test]
    fn block_arg_parses_range_and_values() {
        let block = parse_block_arg("1-3:0A141E").unwrap();
        assert_eq!(block.range, 1..=3);
        assert_eq!(block.values, vec![10, 20, 30]);

        let single = parse_block_arg("512:FF").unwrap();
        assert_eq!(single.range, 512..=512);
    }

    #[test]
    fn block_arg_rejects_missing_values() {
        assert!(parse_block_arg("1-3").is_err());
        assert!(parse_block_arg("1-3:0").is_err());
    }
}

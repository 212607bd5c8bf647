use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lorawan_profiles::{
    api::{DeviceProfile, ServiceProfile},
    codec::{self, Format, Profile},
    logger::{self, LoggerConfig},
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about = "Convert and inspect LoRaWAN service and device profiles")]
struct Args {
    /// Also append log output to this file.
    #[arg(long, env = "LORAWAN_PROFILES_LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    /// Do not log to stderr.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Re-encode a profile in another format.
    Convert {
        #[arg(long, value_enum)]
        kind: Kind,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        from: Format,
        #[arg(long, value_enum, default_value_t = Format::Binary)]
        to: Format,
        /// Read from this file instead of stdin.
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a profile with its feature toggles and preserved unknown bytes.
    Inspect {
        #[arg(long, value_enum)]
        kind: Kind,
        #[arg(long, value_enum, default_value_t = Format::Binary)]
        from: Format,
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Service,
    Device,
}

async fn read_input(input: Option<&Path>) -> Result<Vec<u8>> {
    match input {
        Some(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut bytes = Vec::new();
            tokio::io::stdin().read_to_end(&mut bytes).await?;
            Ok(bytes)
        }
    }
}

async fn convert<T: Profile>(from: Format, to: Format, input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let bytes = read_input(input).await?;
    let profile: T = codec::decode(from, &bytes).with_context(|| format!("decoding {} {}", from, T::KIND))?;

    match output {
        Some(path) => codec::store(path, to, &profile).await?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&codec::encode(to, &profile)?).await?;
            stdout.flush().await?;
        }
    }

    info!(kind = T::KIND, %from, %to, "converted");
    Ok(())
}

async fn inspect<T: Profile>(from: Format, input: Option<&Path>) -> Result<()> {
    let bytes = read_input(input).await?;
    let profile: T = codec::decode(from, &bytes).with_context(|| format!("decoding {} {}", from, T::KIND))?;

    println!("{}: {}", T::KIND, profile);
    for (name, value) in profile.features() {
        println!("  {:<20} {}", name, value);
    }
    println!("  {:<20} {} bytes", "unknown_fields", profile.unknown_fields().len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logger::init(&LoggerConfig {
        log_file: args.log_file.clone(),
        println: !args.quiet,
        ..Default::default()
    })?;

    match args.command {
        Command::Convert { kind, from, to, input, output } => match kind {
            Kind::Service => convert::<ServiceProfile>(from, to, input.as_deref(), output.as_deref()).await,
            Kind::Device => convert::<DeviceProfile>(from, to, input.as_deref(), output.as_deref()).await,
        },
        Command::Inspect { kind, from, input } => match kind {
            Kind::Service => inspect::<ServiceProfile>(from, input.as_deref()).await,
            Kind::Device => inspect::<DeviceProfile>(from, input.as_deref()).await,
        },
    }
}

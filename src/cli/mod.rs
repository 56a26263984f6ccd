pub mod emulate;
#[cfg(test)]
pub mod emulate_test;
pub mod report;
pub mod state;

use std::{error::Error, io, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use emulate::handle_emulate;
use report::{handle_descriptor, handle_encode, DescriptorFormat};
use state::StateArgs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the HID report descriptor of the emulated controller
    Descriptor {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = DescriptorFormat::Hex)]
        format: DescriptorFormat,
    },
    /// Encode an input state and print the resulting report
    Encode {
        #[command(flatten)]
        state: StateArgs,
    },
    /// Create a virtual controller and hold the given input state
    Emulate {
        /// Device configuration file (defaults to ~/.config/switchpad/device.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Stop after this many milliseconds instead of waiting for Ctrl+C
        #[arg(short, long)]
        duration_ms: Option<u64>,
        #[command(flatten)]
        state: StateArgs,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

pub async fn main_cli(args: Args) -> Result<(), Box<dyn Error>> {
    match args.cmd {
        Commands::Descriptor { format } => handle_descriptor(format)?,
        Commands::Encode { state } => handle_encode(state)?,
        Commands::Emulate {
            config,
            duration_ms,
            state,
        } => handle_emulate(config, duration_ms, state).await?,
        Commands::Completions { shell } => {
            let mut cmd = Args::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}

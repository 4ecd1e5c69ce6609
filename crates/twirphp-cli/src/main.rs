//! protoc-gen-twirp_php - Twirp code generator for PHP
//!
//! Modes:
//! - no subcommand: protoc plugin, request on stdin, response on stdout
//! - `protoc-gen-twirp_php generate` - Generate from a `FileDescriptorSet` into a directory
//! - `protoc-gen-twirp_php templates` - List the bundled templates

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use twirphp_core::GeneratorError;

mod generate;
mod plugin;
mod templates;

#[derive(Parser)]
#[command(name = "protoc-gen-twirp_php")]
#[command(author, version, about = "Twirp client and server generator for PHP", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate PHP sources from a serialized FileDescriptorSet
    Generate {
        /// Path to the descriptor set (protoc --descriptor_set_out --include_imports)
        #[arg(short, long)]
        descriptor_set: String,

        /// Output directory for generated code
        #[arg(short, long)]
        output: String,

        /// Proto file to generate (repeatable, default: files no other file in the set imports)
        #[arg(short, long)]
        file: Vec<String>,

        /// Plugin parameters, as passed with --twirp_php_opt
        #[arg(short, long, default_value = "")]
        parameter: String,
    },

    /// List the bundled templates
    Templates,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    twirphp_logging::init_logging(twirphp_core::LogLevel::Warn);

    let result = match cli.command {
        None => plugin::run(),
        Some(Commands::Generate {
            descriptor_set,
            output,
            file,
            parameter,
        }) => generate::run(&descriptor_set, &output, &file, &parameter),
        Some(Commands::Templates) => templates::run(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("protoc-gen-twirp_php: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Process exit code for a failed run.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<GeneratorError>()
        .map(GeneratorError::error_code)
        .unwrap_or(1)
}

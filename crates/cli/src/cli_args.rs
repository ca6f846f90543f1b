pub mod recursive;

use clap::{Parser, Subcommand};
use lock_export_converter::{convert, write, Translator, TranslatorConfig};
use lock_export_npmrc::Npmrc;
use miette::Context;
use pipe_trait::Pipe;
use recursive::RecursiveArgs;
use std::path::PathBuf;

/// Export pnpm-lock.yaml to other lockfile formats.
#[derive(Debug, Parser)]
#[clap(name = "pnpm-lock-export")]
#[clap(bin_name = "pnpm-lock-export")]
#[clap(version)]
#[clap(about = "Export pnpm-lock.yaml as yarn.lock")]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: CliCommand,

    /// Set working directory.
    #[clap(short = 'C', long, default_value = ".")]
    pub dir: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Write yarn.lock for the lockfile in the working directory.
    Convert,
    /// Write yarn.lock for every project of the workspace, then for the workspace root.
    Recursive(RecursiveArgs),
    /// Print the converted lockfile to stdout.
    Print,
}

impl CliArgs {
    /// Execute the command
    pub async fn run(self) -> miette::Result<()> {
        let CliArgs { command, dir } = self;
        let translator = || {
            dir.as_path().pipe(Npmrc::current).pipe(TranslatorConfig::from_npmrc).pipe(Translator::new)
        };

        match command {
            CliCommand::Convert => {
                write(&dir, &translator()).wrap_err("convert the lockfile")?;
            }
            CliCommand::Recursive(args) => args.run(&dir, &translator()).await?,
            CliCommand::Print => {
                let yarn_lock = convert(&dir, &translator()).wrap_err("convert the lockfile")?;
                print!("{yarn_lock}");
            }
        }

        Ok(())
    }
}

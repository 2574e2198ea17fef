use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use crate::config::DEFAULT_STRING_LENGTH;
use crate::processor::{Options, Processor};
use crate::secret::Passphrase;
use crate::textgen::{self, Pools};
use crate::types::{Mode, Summary};
use crate::ui;

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a file or directory with a passphrase.
    Encrypt {
        /// Input file or directory.
        #[arg(short, long)]
        input: PathBuf,

        /// Output file or directory (optional).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Passphrase (optional, will prompt if not provided).
        #[arg(short, long)]
        password: Option<String>,

        /// Descend into subdirectories.
        #[arg(short, long)]
        recursive: bool,

        /// Overwrite existing outputs instead of skipping them.
        #[arg(short, long)]
        force: bool,

        /// Delete each source file after it encrypts successfully.
        #[arg(long)]
        remove_original: bool,

        /// Report actions without touching the filesystem.
        #[arg(long)]
        dry_run: bool,
    },

    /// Decrypt a file or directory.
    Decrypt {
        /// Input file or directory.
        #[arg(short, long)]
        input: PathBuf,

        /// Output file or directory (optional).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Passphrase (optional, will prompt if not provided).
        #[arg(short, long)]
        password: Option<String>,

        /// Descend into subdirectories.
        #[arg(short, long)]
        recursive: bool,

        /// Overwrite existing outputs instead of skipping them.
        #[arg(short, long)]
        force: bool,

        /// Keep the encrypted source file after a successful decryption.
        #[arg(long)]
        keep_encrypted: bool,

        /// Report actions without touching the filesystem.
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate random strings.
    Generate {
        /// Length of each generated string.
        #[arg(short, long, default_value_t = DEFAULT_STRING_LENGTH)]
        length: usize,

        /// How many strings to generate.
        #[arg(short, long, default_value_t = 1)]
        count: usize,

        /// Leave symbols out of the alphabet.
        #[arg(long)]
        no_symbols: bool,

        /// Characters to exclude from the alphabet.
        #[arg(short, long, default_value = "")]
        exclude: String,
    },
}

#[derive(Parser)]
#[command(name = "padlock", version = "0.3.0", about = "Encrypt files with AES-256-CBC and a PBKDF2-derived key.")]
pub struct App {
    #[command(subcommand)]
    command: Commands,
}

impl App {
    pub fn init() -> Result<Self> {
        let subscriber = tracing_subscriber::fmt().with_file(true).with_line_number(true).finish();
        tracing::subscriber::set_global_default(subscriber)?;
        Ok(Self::parse())
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Encrypt { input, output, password, recursive, force, remove_original, dry_run } => {
                let options = Options { recursive, force, dry_run, remove_source: remove_original };
                Self::run_files(Mode::Encrypt, &input, output, password, options)
            }
            Commands::Decrypt { input, output, password, recursive, force, keep_encrypted, dry_run } => {
                let options = Options { recursive, force, dry_run, remove_source: !keep_encrypted };
                Self::run_files(Mode::Decrypt, &input, output, password, options)
            }
            Commands::Generate { length, count, no_symbols, exclude } => Self::run_generate(length, count, no_symbols, &exclude),
        }
    }

    fn run_files(mode: Mode, input: &Path, output: Option<PathBuf>, password: Option<String>, options: Options) -> Result<()> {
        let passphrase = match password {
            Some(password) => Passphrase::from_string(password),
            None => Self::get_passphrase(mode)?,
        };

        let processor = Processor::new(passphrase, options);
        let outcomes = processor.run(mode, input, output.as_deref());

        ui::show_outcomes(mode, &outcomes);

        let summary = Summary::tally(&outcomes);
        if summary.failed > 0 {
            bail!("{} of {} files failed", summary.failed, summary.total());
        }

        Ok(())
    }

    fn run_generate(length: usize, count: usize, no_symbols: bool, exclude: &str) -> Result<()> {
        let pools = Pools { symbols: !no_symbols, ..Pools::default() };

        for _ in 0..count {
            println!("{}", textgen::random_string(length, pools, exclude)?);
        }

        Ok(())
    }

    fn get_passphrase(mode: Mode) -> Result<Passphrase> {
        match mode {
            Mode::Encrypt => ui::prompt_encryption_passphrase(),
            Mode::Decrypt => ui::prompt_decryption_passphrase(),
        }
    }
}

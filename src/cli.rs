use std::{
    ffi::{OsStr, OsString},
    io,
    path::{Path, PathBuf},
};

use atty::Stream;
use clap::{ArgAction, Parser};
use thiserror::Error;

use crate::error::HuffError;

pub const EXTENSION: &str = "huff";

/// Largest input accepted, compressed or not.
pub const MAX_INPUT_SIZE: u64 = 20 * 1000 * 1000;

#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    Stdin,
    FileIO,
}

#[derive(Debug, Parser)]
#[command(version, about = "Chunked Huffman compression tool", long_about = None)]
pub struct Args {
    #[arg(short, long)]
    pub compress: bool,
    #[arg(short, long)]
    pub decompress: bool,
    #[arg(short, long, value_name = "INPUT", required = false)]
    pub input: Option<PathBuf>,
    #[arg(short, long)]
    pub out_file: Option<PathBuf>,
    /// Print the compressed size without writing anything
    #[arg(short, long, requires = "compress")]
    pub estimate: bool,
    /// Raise the log level, repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Path the output file name is derived from.
    pub fn base_path(&self, mode: &Mode) -> Option<&Path> {
        match mode {
            Mode::Stdin => self.out_file.as_deref(),
            Mode::FileIO => self.out_file.as_deref().or(self.input.as_deref()),
        }
    }
}

pub fn validate_inputs(args: &Args) -> Result<Mode, CliError> {
    if !(args.compress ^ args.decompress) {
        return Err(CliError::CompressionFlag);
    }

    if !atty::is(Stream::Stdin) {
        // Piped input, the output name has to come from --out-file.
        if args.out_file.is_none() && !args.estimate {
            return Err(CliError::NoOutfileProvided);
        }

        return Ok(Mode::Stdin);
    }

    let path = args.input.as_ref().ok_or(CliError::NoFilePath)?;
    if !path.exists() {
        return Err(CliError::FileDoesNotExist(path.clone()));
    }
    if args.decompress && path.extension() != Some(OsStr::new(EXTENSION)) {
        return Err(CliError::WrongFileExtension(path.clone()));
    }
    check_size(path.metadata().map_err(|e| CliError::io(path, e))?.len())?;

    Ok(Mode::FileIO)
}

pub fn check_size(len: u64) -> Result<(), CliError> {
    if len == 0 {
        return Err(CliError::EmptyInput);
    }
    if len > MAX_INPUT_SIZE {
        return Err(CliError::InputTooLarge {
            size: len,
            limit: MAX_INPUT_SIZE,
        });
    }
    Ok(())
}

pub fn compressed_path(base: &Path) -> PathBuf {
    let mut path: OsString = base.into();
    path.push(".");
    path.push(EXTENSION);
    path.into()
}

pub fn decompressed_path(base: &Path) -> PathBuf {
    let mut path = base.to_path_buf();
    if path.extension() == Some(OsStr::new(EXTENSION)) {
        path.set_extension("");
    }
    path
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Error: You must specify either --compress or --decompress, but not both.")]
    CompressionFlag,
    #[error("No file path provided. Use --help for more information.")]
    NoFilePath,
    #[error("File {0:?} does not exist. Use --help for more information.")]
    FileDoesNotExist(PathBuf),
    #[error("File {0:?} does not have the file extension '.huff'. Use --help for more information.")]
    WrongFileExtension(PathBuf),
    #[error("No outfile path provided. Use --help for more information.")]
    NoOutfileProvided,
    #[error("Input is empty, there is nothing to compress.")]
    EmptyInput,
    #[error("Input is {size} bytes, must be at most {limit} bytes.")]
    InputTooLarge { size: u64, limit: u64 },
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Codec(#[from] HuffError),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_and_decompress_are_exclusive() {
        let args = Args::try_parse_from(["huffchunk", "-c", "-d", "-i", "file.txt"]).unwrap();
        assert!(matches!(validate_inputs(&args), Err(CliError::CompressionFlag)));

        let args = Args::try_parse_from(["huffchunk", "-i", "file.txt"]).unwrap();
        assert!(matches!(validate_inputs(&args), Err(CliError::CompressionFlag)));
    }

    #[test]
    fn estimate_requires_compress() {
        assert!(Args::try_parse_from(["huffchunk", "-d", "--estimate"]).is_err());
        let args = Args::try_parse_from(["huffchunk", "-c", "-e", "-vv"]).unwrap();
        assert!(args.estimate);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn base_path_prefers_out_file() {
        let args = Args::try_parse_from(["huffchunk", "-c", "-i", "in.txt", "-o", "out.txt"]).unwrap();
        assert_eq!(args.base_path(&Mode::FileIO), Some(Path::new("out.txt")));

        let args = Args::try_parse_from(["huffchunk", "-c", "-i", "in.txt"]).unwrap();
        assert_eq!(args.base_path(&Mode::FileIO), Some(Path::new("in.txt")));
        assert_eq!(args.base_path(&Mode::Stdin), None);
    }

    #[test]
    fn output_paths_add_and_strip_extension() {
        assert_eq!(compressed_path(Path::new("data/dna.txt")), PathBuf::from("data/dna.txt.huff"));
        assert_eq!(decompressed_path(Path::new("data/dna.txt.huff")), PathBuf::from("data/dna.txt"));
        assert_eq!(decompressed_path(Path::new("data/dna")), PathBuf::from("data/dna"));
    }

    #[test]
    fn size_limits() {
        assert!(matches!(check_size(0), Err(CliError::EmptyInput)));
        assert!(check_size(1).is_ok());
        assert!(check_size(MAX_INPUT_SIZE).is_ok());
        assert!(matches!(
            check_size(MAX_INPUT_SIZE + 1),
            Err(CliError::InputTooLarge { .. })
        ));
    }

    #[test]
    fn codec_errors_pass_through() {
        let err: CliError = HuffError::invalid_input("input is empty").into();
        assert_eq!(err.to_string(), "Invalid input: input is empty");
    }
}

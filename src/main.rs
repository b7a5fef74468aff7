use huffchunk::{
    cli::{check_size, compressed_path, decompressed_path, validate_inputs, Args, CliError, Mode},
    compress, decompress, estimate_compressed_size,
    fs::{read_file, read_stdin, write_file},
    report::{format_bytes, PhaseTimer},
};

use clap::Parser;
use log::LevelFilter;

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let mut timer = PhaseTimer::start();
    let mode = validate_inputs(args)?;
    timer.section("validate");

    let buffer = match mode {
        Mode::Stdin => read_stdin().map_err(|e| CliError::io("<stdin>", e))?,
        Mode::FileIO => {
            let path = args.input.as_ref().ok_or(CliError::NoFilePath)?;
            read_file(path).map_err(|e| CliError::io(path, e))?
        }
    };
    check_size(buffer.len() as u64)?;
    timer.section("read");

    if args.estimate {
        let size = estimate_compressed_size(&buffer)?;
        timer.section("estimate");
        println!("Original file size: {}", format_bytes(buffer.len() as u64));
        println!("Estimated compressed size: {}", format_bytes(size as u64));
        return Ok(());
    }

    let base_path = args.base_path(&mode).ok_or(CliError::NoOutfileProvided)?;
    if args.compress {
        let container = compress(&buffer)?;
        timer.section("compress");

        let out_path = compressed_path(base_path);
        write_file(&out_path, &container).map_err(|e| CliError::io(&out_path, e))?;
        timer.section("write");

        println!("Original file size: {}", format_bytes(buffer.len() as u64));
        println!("Compressed file size: {}", format_bytes(container.len() as u64));
    } else {
        let decompressed = decompress(&buffer)?;
        timer.section("decompress");

        let out_path = decompressed_path(base_path);
        write_file(&out_path, &decompressed).map_err(|e| CliError::io(&out_path, e))?;
        timer.section("write");

        println!("Compressed file size: {}", format_bytes(buffer.len() as u64));
        println!("Decompressed file size: {}", format_bytes(decompressed.len() as u64));
    }

    log::info!("total: {} microseconds", timer.total().as_micros());
    Ok(())
}

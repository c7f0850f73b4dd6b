//! Command line tool to extract Galileo navigation data
//! from u-blox UBX recordings, RINEX ready.
use std::fs::File;
use std::io::{BufWriter, Read, Write};

use env_logger::{Builder, Target};

#[macro_use]
extern crate log;

use thiserror::Error;

use flate2::read::GzDecoder;

use galinav::prelude::{Decoder, NavFrame};

mod cli;
use cli::Cli;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error")]
    IoError(#[from] std::io::Error),
    #[error("decoder error")]
    DecoderError(#[from] galinav::Error),
}

pub fn main() -> Result<(), Error> {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::new();
    let input_path = cli.input_path();

    let fd = File::open(&input_path)?;
    let gzip = input_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));

    let reader: Box<dyn Read> = if gzip {
        info!("decompressing \"{}\"..", input_path.to_string_lossy());
        Box::new(GzDecoder::new(fd))
    } else {
        Box::new(fd)
    };

    let mut writer: Box<dyn Write> = match cli.output_name() {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout()),
    };

    let mut decoder = Decoder::new(reader);
    let mut records = 0_u64;

    loop {
        match decoder.next() {
            Some(Ok(NavFrame::Header(hdr))) => {
                writeln!(writer, "{}", hdr)?;
            },
            Some(Ok(NavFrame::Ephemeris(rec))) => {
                records += 1;
                writeln!(writer, "{}", rec)?;
            },
            Some(Err(e)) => {
                error!("aborting: {}", e);
                return Err(e.into());
            },
            None => break,
        }
    }
    writer.flush()?;

    if let Some(path) = cli.output_name() {
        info!("\"{}\" generated ({} records)", path, records);
    }

    if !cli.quiet() {
        eprintln!("{}", decoder.counters());
    }

    Ok(())
}

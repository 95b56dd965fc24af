//! # relannis
//!
//! Rebuilds token text, offsets and annotations from relANNIS corpus exports.
//!
//! ## Getting started
//!
//! ```sh
//! relannis 0.1.0
//! relANNIS corpus reconstruction tool.
//!
//! USAGE:
//!     relannis <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     extract    Extract documents of every corpus found in a folder
//!     help       Prints this message or the help of the given subcommand(s)
//!     inspect    Print version, document count and annotation names of each corpus
//! ```
//!
//! Logging is configured with `RUST_LOG` (e.g. `RUST_LOG=info relannis extract src dst`).
use std::io::Write;

use relannis::error::Error;
use relannis::pipelines::{ExtractCorpora, Inspect, Pipeline};
use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Relannis::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Relannis::Extract(e) => {
            let p = ExtractCorpora::new(e.src, e.dst)
                .parallel(!e.sequential)
                .metadata_spans(e.metadata_spans);
            p.run()?;
        }
        cli::Relannis::Inspect(i) => {
            let summaries = Inspect::new(i.src).run()?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for summary in summaries {
                serde_json::to_writer(&mut out, &summary)?;
                out.write_all(b"\n")?;
            }
        }
    };
    Ok(())
}

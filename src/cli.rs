//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "relannis", about = "relANNIS corpus reconstruction tool.")]
/// Holds every command that is callable by the `relannis` command.
pub enum Relannis {
    #[structopt(about = "Extract documents of every corpus found in a folder")]
    Extract(Extract),
    #[structopt(about = "Print version, document count and annotation names of each corpus")]
    Inspect(Inspect),
}

#[derive(Debug, StructOpt)]
/// Extract command and parameters.
pub struct Extract {
    #[structopt(parse(from_os_str), help = "folder containing relANNIS corpora")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "destination of the JSON lines files")]
    pub dst: PathBuf,
    #[structopt(long = "sequential", help = "process corpora and documents one at a time")]
    pub sequential: bool,
    #[structopt(
        short = "m",
        long = "metadata-spans",
        help = "also write metadata as document-wide spans"
    )]
    pub metadata_spans: bool,
}

#[derive(Debug, StructOpt)]
pub struct Inspect {
    #[structopt(parse(from_os_str), help = "folder containing relANNIS corpora")]
    pub src: PathBuf,
}

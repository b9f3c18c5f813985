use std::env::args_os;
use std::io;
use std::process::ExitCode;

use luftrom_parser::border::Borders;
use luftrom_parser::output::write_all;
use luftrom_parser::{AipParser, Filter, ParserConfig};

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let sources = args_os()
        .nth(1)
        .expect("missing argument: path to directory of AIP .txt documents");
    let norway = args_os()
        .nth(2)
        .expect("missing argument: path to Norwegian border file");
    let sweden = args_os()
        .nth(3)
        .expect("missing argument: path to Swedish border file");
    let output = args_os()
        .nth(4)
        .expect("missing argument: path to output directory");
    let filter: Option<Filter> = args_os()
        .nth(5)
        .and_then(|filter| filter.to_string_lossy().parse().ok());

    let borders = match Borders::load(norway, sweden) {
        Ok(borders) => borders,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let mut parser = AipParser::new(ParserConfig::default(), borders);
    if let Err(e) = parser.parse_directory(sources) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let collection = parser.finish(filter.as_ref());
    match write_all(&collection, output) {
        Ok(()) => {
            println!(
                "{} airspaces, {} ACC sectors",
                collection.airspaces.len(),
                collection.acc_sectors.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

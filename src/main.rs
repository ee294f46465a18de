use clap::Parser;

use commandline::{Operation, Options};
use triad::{error::PositionalError, il, il::TriadListing, parser, prelude::*, tree::ExprTree};

mod commandline;

fn main() -> Result<()> {
    let options = Options::parse();

    stderrlog::new()
        .module(module_path!())
        .quiet(options.quiet)
        .verbosity(options.verbose)
        .init()?;

    let statements = options.operation.input().load()?;
    let listings = translate(&statements)?;

    run(&options.operation, &listings)
}

/// Parses every statement independently. Stops at the first statement that
/// fails to parse.
fn translate(statements: &[String]) -> Result<Vec<TriadListing>> {
    let mut listings = vec![];

    for statement in statements {
        info!("Parsing {}", statement);
        let listing = match parser::parse(statement) {
            Ok(listing) => listing,
            Err(err) => {
                describe_error(&err, statement);
                bail!("Parsing failed");
            }
        };

        if let Err(err) = il::verify(&listing) {
            warn!("Generated triads are malformed: {}", err);
        }
        listings.push(listing);
    }

    Ok(listings)
}

fn run(operation: &Operation, listings: &[TriadListing]) -> Result<()> {
    if let Operation::Check { .. } = operation {
        println!("Parsing successful.");
    }

    if operation.prints_triads() {
        println!("Triads:");
        for listing in listings {
            print!("{}", listing);
        }
    }

    if operation.prints_tree() {
        let tree = ExprTree::reconstruct_all(listings)?;
        println!("Expression Tree:");
        print!("{}", tree);
    }

    Ok(())
}

fn describe_error(err: &impl PositionalError, statement: &str) {
    fn pad_char(ch: char, times: usize) -> String {
        std::iter::repeat(ch).take(times).collect()
    }

    let range = err.range();
    let padding = statement.get(..range.start).map_or(range.start, |s| s.chars().count());

    eprintln!("| {}", statement);
    eprintln!(
        "| {}{}--- {}",
        pad_char(' ', padding),
        pad_char('^', err.length()),
        err.describe()
    );
}

//! catalog-check: validate a hero catalog and print its hero listing
//!
//! Usage:
//!   catalog-check <catalog.json>                          # print listing JSON
//!   catalog-check <catalog.json> --rarity UR              # only UR heroes
//!   catalog-check <catalog.json> --squad-type tank        # only tank heroes
//!   catalog-check <catalog.json> -q                       # quiet: exit 0 if valid, 2 if not
//!
//! Run before shipping a catalog to the analyzer; the analyzer refuses to
//! start with an invalid one.

use battle_analyzer::catalog::Rarity;
use battle_analyzer::{HeroCatalog, HeroFilter, TroopType};
use std::env;
use std::process;

struct Args {
    path: String,
    filter: HeroFilter,
    quiet: bool,
}

fn usage() -> ! {
    eprintln!("Usage: catalog-check <catalog.json> [--rarity SR|SSR|UR] [--squad-type tank|air|missile] [-q|--quiet]");
    eprintln!("  -q  Quiet: only exit code (0=valid, 2=invalid)");
    process::exit(2);
}

fn parse_args(raw: &[String]) -> Args {
    let mut path = None;
    let mut filter = HeroFilter::default();
    let mut quiet = false;

    let mut it = raw.iter().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-q" | "--quiet" => quiet = true,
            "--rarity" => {
                let value = it.next().unwrap_or_else(|| usage());
                filter.rarity = Some(Rarity::from_literal(value).unwrap_or_else(|| {
                    eprintln!("catalog-check: unknown rarity {}", value);
                    usage()
                }));
            }
            "--squad-type" => {
                let value = it.next().unwrap_or_else(|| usage());
                filter.squad_type = Some(TroopType::from_literal(value).unwrap_or_else(|| {
                    eprintln!("catalog-check: unknown squad type {}", value);
                    usage()
                }));
            }
            other if other.starts_with('-') => usage(),
            other if path.is_none() => path = Some(other.to_string()),
            _ => usage(),
        }
    }

    Args {
        path: path.unwrap_or_else(|| usage()),
        filter,
        quiet,
    }
}

fn main() {
    let raw: Vec<String> = env::args().collect();
    let args = parse_args(&raw);

    let catalog = match HeroCatalog::load(&args.path) {
        Ok(c) => c,
        Err(e) => {
            if !args.quiet {
                eprintln!("catalog-check: {}: {}", args.path, e);
            }
            process::exit(2);
        }
    };

    if args.quiet {
        process::exit(0);
    }

    let listing = catalog.listing(&args.filter);
    match serde_json::to_string_pretty(&listing) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("catalog-check: cannot encode listing: {}", e);
            process::exit(1);
        }
    }
}

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use spellsieve::{
    dict,
    error::SieveError,
    filter::BloomFilter,
    hash::Fnv1a64,
    header::{FilterHeader, FORMAT_VERSION},
    sizing::Requirements,
    BitVec,
};

#[derive(Parser)]
#[command(name = "spellsieve", about = "Bloom-filter dictionary builder and checker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a newline-delimited word list into a filter artifact.
    Build {
        /// Dictionary text file, one member per line
        dictionary: PathBuf,
        /// Target false positive probability
        #[arg(long, default_value_t = spellsieve::DEFAULT_RATE)]
        rate: f64,
        /// Where to write the compiled filter
        #[arg(long, default_value = "dict-compiled.bf")]
        output: PathBuf,
        /// Seed CSV; read when present, written when generated
        #[arg(long, default_value = "seeds.csv")]
        seeds: PathBuf,
        /// Print the sizing report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report which of the given terms are absent from a compiled filter.
    Check {
        /// Terms to look up
        #[arg(required = true)]
        terms: Vec<String>,
        /// Compiled filter artifact
        #[arg(long, default_value = "dict-compiled.bf")]
        filter: PathBuf,
        /// Seed CSV matching the one used at build time
        #[arg(long, default_value = "seeds.csv")]
        seeds: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), SieveError> {
    match Cli::parse().command {
        Command::Build {
            dictionary,
            rate,
            output,
            seeds,
            json,
        } => build(&dictionary, rate, &output, &seeds, json),
        Command::Check {
            terms,
            filter,
            seeds,
        } => check(&terms, &filter, &seeds),
    }
}

fn build(
    dictionary: &Path,
    rate: f64,
    output: &Path,
    seed_path: &Path,
    json: bool,
) -> Result<(), SieveError> {
    let n = dict::count_members(dictionary)?;
    if n == 0 {
        return Err(SieveError::InvalidArgument(format!(
            "dictionary '{}' has no members",
            dictionary.display()
        )));
    }

    let req = Requirements::compute(rate, n)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&req).expect("report serializes"));
    } else {
        println!("{req}");
    }

    // A pre-existing seed file wins; its length fixes the hash count.
    // Otherwise derive k from the sizing and record the seeds we used.
    let seeds = if seed_path.exists() {
        dict::read_seeds(seed_path)?
    } else {
        let generated: Vec<i32> = (1..=req.hash_functions as i32).collect();
        dict::write_seeds(seed_path, &generated)?;
        generated
    };

    let hash_count = u16::try_from(seeds.len()).map_err(|_| {
        SieveError::InvalidArgument(format!("too many seeds: {}", seeds.len()))
    })?;

    let mut filter = BloomFilter::new(rate, Fnv1a64, seeds)?;
    filter.build(n)?;
    for member in dict::read_members(dictionary)? {
        filter.add(&member)?;
    }

    let bit_count = u32::try_from(filter.bit_count()).map_err(|_| {
        SieveError::InvalidArgument(format!(
            "bit array of {} bits does not fit the artifact header",
            filter.bit_count()
        ))
    })?;
    let header = FilterHeader::new(FORMAT_VERSION, hash_count, bit_count);
    dict::write_filter(output, &header, filter.as_bytes()?)?;

    println!("Wrote {} ({} members)", output.display(), n);
    Ok(())
}

fn check(terms: &[String], artifact: &Path, seed_path: &Path) -> Result<(), SieveError> {
    let (header, payload) = dict::read_filter(artifact)?;
    if header.version != FORMAT_VERSION {
        return Err(SieveError::Corrupt(format!(
            "artifact version {} does not match program version {FORMAT_VERSION}",
            header.version
        )));
    }

    // The header's hash count is authoritative; the seed file has to agree.
    let seeds = if seed_path.exists() {
        dict::read_seeds(seed_path)?
    } else {
        (1..=header.hash_count as i32).collect()
    };
    if seeds.len() != header.hash_count as usize {
        return Err(SieveError::Seeds(format!(
            "seed file holds {} seeds but the artifact was built with {}",
            seeds.len(),
            header.hash_count
        )));
    }

    let bits = BitVec::from_parts(payload, header.bit_count as usize)?;
    let mut filter = BloomFilter::new(spellsieve::DEFAULT_RATE, Fnv1a64, seeds)?;
    filter.adopt(bits)?;

    let mut absent = Vec::new();
    for term in terms {
        if !filter.contains(&term.to_lowercase())? {
            absent.push(term.as_str());
        }
    }

    println!("Not found in dictionary:");
    for term in absent {
        println!("{term}");
    }
    Ok(())
}

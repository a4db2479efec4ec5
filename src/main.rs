// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info, Level};

use raga_alap::config::{validate_config, RagaFile};
use raga_alap::generators::{AlapGenerator, GenerationRequest};
use raga_alap::music::{avoid_notes, convert_scale, Note};
use raga_alap::raga::{RagaCatalog, RagaDescriptor};

fn print_usage() {
    println!("RAGA-ALAP - Raga-constrained melody generator");
    println!();
    println!("Usage: raga-alap [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --generate <RAGA|FILE>  Generate an alap for a built-in raga or raga file");
    println!("      --duration <SECS>   Total duration in seconds (default 60)");
    println!("      --tonic <NOTE>      Tonic for Sa, e.g. C, D#, Bb (default C)");
    println!("      --seed <N>          Seed for reproducible output");
    println!("  --convert <SWARAS> [T]  Convert swara text to pitches for tonic T");
    println!("  --list-ragas            List built-in ragas");
    println!("  --validate <FILE>       Check a raga file");
    println!("  --verbose               Log each phase");
    println!("  --help                  Show this help message");
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Value following a flag, if the flag is present
fn option_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// Find a raga by file path or built-in name
fn resolve_raga(source: &str) -> Result<(RagaDescriptor, GenerationRequest)> {
    if Path::new(source).is_file() {
        let file = RagaFile::load(source)?;
        return Ok((file.raga, file.generation));
    }

    let catalog = RagaCatalog::with_builtins();
    let raga = catalog.get(source).cloned().ok_or_else(|| {
        anyhow!(
            "Unknown raga {:?}; use --list-ragas or pass a raga file",
            source
        )
    })?;
    Ok((raga, GenerationRequest::default()))
}

fn generate(args: &[String], source: &str) -> Result<()> {
    let (raga, mut request) = resolve_raga(source)?;

    if let Some(duration) = option_value(args, "--duration") {
        request.duration_secs = duration
            .parse()
            .with_context(|| format!("Invalid duration: {}", duration))?;
    }
    if let Some(tonic) = option_value(args, "--tonic") {
        request.tonic = tonic.parse()?;
    }
    if let Some(seed) = option_value(args, "--seed") {
        request.seed = Some(
            seed.parse()
                .with_context(|| format!("Invalid seed: {}", seed))?,
        );
    }

    let mut file = RagaFile::new(raga);
    file.generation = request;
    file.validate()?;

    let mut generator = AlapGenerator::for_request(&file.generation);
    let result = generator.generate_with_report(&file.raga, &file.generation);

    for phase in &result.phases {
        debug!(
            phase = phase.name,
            start = phase.start,
            elapsed = phase.elapsed,
            notes = phase.notes,
            fallback = phase.fallback,
            "phase"
        );
    }
    info!(
        raga = %file.raga.name,
        tonic = %file.generation.tonic,
        "{}",
        result.timeline.summary()
    );

    let yaml = serde_yaml::to_string(&result.timeline).context("Failed to serialize timeline")?;
    print!("{}", yaml);
    Ok(())
}

fn convert(text: &str, tonic: Option<&str>) -> Result<()> {
    let tonic: Note = match tonic {
        Some(t) => t.parse()?,
        None => Note::default(),
    };

    let scale = convert_scale(text, tonic);
    println!("Tonic:     {}", tonic);
    println!("Notes:     {}", scale.note_names().join(" "));
    println!(
        "Pitches:   {}",
        scale
            .pitches()
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!(
        "Intervals: {}",
        scale
            .intervals()
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!("Avoid:     {}", avoid_notes(text, tonic).join(" "));
    Ok(())
}

fn list_ragas() {
    let catalog = RagaCatalog::with_builtins();
    println!("Built-in ragas:");
    for name in catalog.available() {
        if let Some(raga) = catalog.get(&name) {
            println!(
                "  {:<12} aroha: {:<20} avaroha: {}",
                raga.name, raga.ascending, raga.descending
            );
        }
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    init_logging(args.iter().any(|a| a == "--verbose"));

    if args.len() < 2 {
        println!("RAGA-ALAP - Raga-constrained melody generator");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[1].as_str() {
        "--generate" => {
            if args.len() < 3 {
                eprintln!("Error: --generate requires a raga name or file");
                eprintln!("Use --list-ragas to see built-in ragas");
                std::process::exit(1);
            }
            generate(&args, &args[2])?;
        }
        "--convert" => {
            if args.len() < 3 {
                eprintln!("Error: --convert requires swara text, e.g. \"S R G M P\"");
                std::process::exit(1);
            }
            let tonic = args.get(3).filter(|a| !a.starts_with("--"));
            convert(&args[2], tonic.map(String::as_str))?;
        }
        "--list-ragas" => {
            list_ragas();
        }
        "--validate" => {
            if args.len() < 3 {
                eprintln!("Error: --validate requires a file path");
                std::process::exit(1);
            }
            let file = validate_config(&args[2])?;
            println!("{}: OK", file.raga.name);
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}

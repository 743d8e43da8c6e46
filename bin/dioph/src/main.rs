use diophantine_automata::prelude::*;

use clap::{Arg, ArgAction, ArgMatches, Command};
use itertools::Itertools;
use owo_colors::OwoColorize;
use tracing::{debug, info, trace};
use tracing_subscriber::{filter, prelude::*};

fn cli() -> clap::Command {
    Command::new("dioph")
        .about("Builds the automaton recognizing the solutions of a linear diophantine equation")
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .arg(
            Arg::new("variables")
                .short('n')
                .long("variables")
                .required(true)
                .value_parser(clap::value_parser!(usize))
                .help("number of variables"),
        )
        .arg(
            Arg::new("coefficients")
                .short('a')
                .long("coefficients")
                .required(true)
                .num_args(1..)
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(i64))
                .help("one coefficient per variable"),
        )
        .arg(
            Arg::new("constant")
                .short('c')
                .long("constant")
                .required(true)
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(i64))
                .help("the right hand side of the equation"),
        )
        .arg(
            Arg::new("table")
                .long("table")
                .action(ArgAction::SetTrue)
                .help("print the transition table"),
        )
        .arg(
            Arg::new("dot")
                .long("dot")
                .value_name("FILE")
                .help("write the automaton in DOT format to FILE"),
        )
        .arg(
            Arg::new("png")
                .long("png")
                .value_name("FILE")
                .help("render the automaton with graphviz into FILE"),
        )
        .arg(
            Arg::new("sample")
                .long("sample")
                .action(ArgAction::SetTrue)
                .help("print a random accepted word of minimal length"),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn show_word(word: &[BitSymbol]) -> String {
    if word.is_empty() {
        "ε".to_string()
    } else {
        word.iter().map(|s| s.show()).join(" ")
    }
}

fn show_assignment(values: &[u64]) -> String {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("x_{} = {v}", i + 1))
        .join(", ")
}

pub fn main() {
    let matches = cli().get_matches();

    setup_logging(&matches);

    let n = *matches.get_one::<usize>("variables").expect("required");
    let coefficients = matches
        .get_many::<i64>("coefficients")
        .expect("required")
        .copied()
        .collect_vec();
    let constant = *matches.get_one::<i64>("constant").expect("required");

    let equation = match LinearEquation::new(n, coefficients, constant) {
        Ok(eq) => eq,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            std::process::exit(2);
        }
    };
    println!("Your equation is: {}", equation.bold());

    let start = std::time::Instant::now();
    let dfa = equation.to_dfa();
    info!("construction took {}µs", start.elapsed().as_micros());
    println!(
        "The automaton has {} states over {} symbols",
        dfa.size(),
        dfa.alphabet().size()
    );

    if matches.get_flag("table") {
        println!("{}", dfa.transition_table());
    }

    if let Some(path) = matches.get_one::<String>("dot") {
        debug!("writing DOT representation to {path}");
        if let Err(e) = std::fs::write(path, dfa.dot_representation(&equation.to_string())) {
            eprintln!("{} could not write {path}: {e}", "error:".red().bold());
            std::process::exit(1);
        }
    }

    if let Some(path) = matches.get_one::<String>("png") {
        debug!("rendering automaton to {path}");
        if let Err(e) = dfa.render_to_file_name(&equation.to_string(), path) {
            eprintln!("{} {e}", "error:".red().bold());
            std::process::exit(1);
        }
    }

    match dfa.shortest_accepted_word() {
        Some(word) => {
            println!("Shortest accepted word: {}", show_word(&word).green());
            if let Some(values) = equation.decode(&word) {
                println!("Solution: {}", show_assignment(&values));
            }
            if matches.get_flag("sample") {
                let sampled = random::random_word(&dfa, word.len())
                    .expect("an accepted word of this length exists");
                println!("Random accepted word: {}", show_word(&sampled).green());
            }
        }
        None => println!("{}", "The equation has no solution".yellow()),
    }
}

// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::fs::File;
use std::process;
use std::time::Instant;

use artemis::eval::MaterialEvaluator;
use artemis::notation::parse_move;
use artemis::search::{
    AlphaBetaSearcher, CsvDataRecorder, DataRecorder, MinimaxSearcher, NullDataRecorder, Searcher,
};
use artemis::{perft, Game, Position, RulesConfig};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

fn fen_arg() -> Arg<'static, 'static> {
    Arg::with_name("FEN")
        .help("FEN string for a board position")
        .required(true)
        .index(1)
}

fn depth_arg() -> Arg<'static, 'static> {
    Arg::with_name("depth")
        .help("Depth of move tree to search")
        .value_name("DEPTH")
        .short("d")
        .long("depth")
        .takes_value(true)
        .required(true)
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(fen_arg())
                .arg(depth_arg()),
        )
        .subcommand(
            SubCommand::with_name("evaluate")
                .about("Search a board position for the best move")
                .arg(fen_arg())
                .arg(depth_arg())
                .arg(
                    Arg::with_name("alpha-beta")
                        .help("Prune the search tree with alpha-beta bounds")
                        .long("alpha-beta"),
                )
                .arg(
                    Arg::with_name("record")
                        .help("Append search statistics to a CSV file")
                        .value_name("FILE")
                        .long("record")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a sequence of coordinate moves and report the game state")
                .arg(
                    Arg::with_name("fen")
                        .help("Starting position; defaults to the standard one")
                        .value_name("FEN")
                        .long("fen")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("fifty")
                        .help("Plies without a pawn move or capture before the game is drawn")
                        .value_name("PLIES")
                        .long("fifty")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("MOVES")
                        .help("Moves such as e2e4 or e7e8q")
                        .multiple(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("perft", Some(matches)) => run_perft(matches),
        ("evaluate", Some(matches)) => run_evaluate(matches),
        ("play", Some(matches)) => run_play(matches),
        _ => unreachable!(),
    }
}

fn parse_fen_or_exit(fen: &str) -> Position {
    match Position::from_fen(fen) {
        Ok(pos) => pos,
        Err(err) => {
            eprintln!("invalid fen: {}", err);
            process::exit(1);
        }
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("FEN").unwrap_or_default();
    let depth = value_t_or_exit!(matches, "depth", u32);
    let pos = parse_fen_or_exit(fen);

    println!("fen:   {}", fen);
    println!("depth: {}", depth);
    println!();
    println!("{}", pos);
    println!();
    for i in 1..=depth {
        let start = Instant::now();
        let results = match perft(&pos, i) {
            Ok(results) => results,
            Err(err) => {
                eprintln!("can't run perft: {}", err);
                process::exit(1);
            }
        };
        let ms = start.elapsed().as_millis();
        println!("perft({}) = {} ({} ms)", i, results, ms);
    }

    process::exit(0);
}

fn run_evaluate(matches: &ArgMatches) -> ! {
    let fen = matches.value_of("FEN").unwrap_or_default();
    let depth = value_t_or_exit!(matches, "depth", u32);
    let pos = parse_fen_or_exit(fen);

    println!("fen:   {}", fen);
    println!("depth: {}", depth);
    println!();
    println!("{}", pos);
    println!();

    let recorder: Box<dyn DataRecorder> = match matches.value_of("record") {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(CsvDataRecorder::new(file)),
            Err(err) => {
                eprintln!("can't create {}: {}", path, err);
                process::exit(1);
            }
        },
        None => Box::new(NullDataRecorder),
    };

    let mut searcher: Box<dyn Searcher> = if matches.is_present("alpha-beta") {
        Box::new(AlphaBetaSearcher::<MaterialEvaluator>::new())
    } else {
        Box::new(MinimaxSearcher::<MaterialEvaluator>::new())
    };

    let result = match searcher.search(&pos, depth, recorder.as_ref()) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("search failed: {}", err);
            process::exit(1);
        }
    };

    match result.best_move {
        Some(mov) => println!("best move: {}", mov),
        None => println!("best move: (none)"),
    }
    println!("    score: {}", result.score);
    println!("    nodes: {}", result.nodes_searched);
    process::exit(0);
}

fn run_play(matches: &ArgMatches) -> ! {
    let mut config = RulesConfig::default();
    if matches.is_present("fifty") {
        config.fifty_move_threshold = value_t_or_exit!(matches, "fifty", u32);
    }

    let start = match matches.value_of("fen") {
        Some(fen) => parse_fen_or_exit(fen),
        None => Position::from_start_position(),
    };

    let mut game = match Game::from_position(start, config) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("can't start a game here: {}", err);
            process::exit(1);
        }
    };

    for text in matches.values_of("MOVES").into_iter().flatten() {
        let (origin, destination, promotion) = match parse_move(text) {
            Ok(parsed) => parsed,
            Err(err) => {
                eprintln!("{}", err);
                process::exit(1);
            }
        };

        if let Err(err) = game.play(origin, destination, promotion) {
            eprintln!("{}: {}", text, err);
            process::exit(1);
        }
    }

    println!("{}", game.current());
    println!("fen:   {}", game.current().as_fen());
    println!("plies: {}", game.ply_count());
    println!("state: {:?}", game.state());
    process::exit(0);
}

//! UCI front-end for the Castellan engine.
//!
//! A stateful line loop on stdin/stdout. Searches run on a background
//! thread so `stop` stays responsive; the interpreter runs one search at a
//! time and joins the previous one before starting the next. All errors
//! from malformed input are logged and the session continues.

use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use anyhow::Result;
use chess_core::{
    move_to_uci, set_position_from_uci, Color, Engine, GoParams, Position, SearchInfo,
    TimeControl,
};
use classical_engine::ClassicalEngine;

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let engine: Arc<Mutex<ClassicalEngine>> = Arc::new(Mutex::new(ClassicalEngine::new()));
    let mut pos = Position::startpos();
    let mut search_thread: Option<JoinHandle<()>> = None;
    let mut active_search: Option<TimeControl> = None;

    for line in stdin.lock().lines() {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            continue;
        };

        match command {
            "uci" => {
                let engine = engine.lock().unwrap();
                writeln!(stdout, "id name {}", engine.name())?;
                writeln!(stdout, "id author {}", engine.author())?;
                writeln!(stdout, "option name Hash type spin default 16 min 1 max 512")?;
                writeln!(stdout, "option name Book type string default book.bin")?;
                writeln!(stdout, "option name UseBook type check default true")?;
                writeln!(stdout, "uciok")?;
                stdout.flush()?;
            }
            "isready" => {
                writeln!(stdout, "readyok")?;
                stdout.flush()?;
            }
            "setoption" => {
                if let Some((name, value)) = parse_setoption(&parts[1..]) {
                    if !engine.lock().unwrap().set_option(&name, &value) {
                        log::debug!("ignoring unknown option {name:?}");
                    }
                }
            }
            "ucinewgame" => {
                join_search(&mut search_thread);
                pos = Position::startpos();
                engine.lock().unwrap().new_game();
            }
            "position" => {
                if let Err(err) = set_position_from_uci(&mut pos, &parts[1..]) {
                    log::warn!("bad position command: {err}");
                }
            }
            "go" => {
                join_search(&mut search_thread);
                let params = parse_go(&parts[1..]);
                let limits = params.budget(pos.side_to_move == Color::White);
                active_search = Some(limits.time_control.clone());

                let engine = Arc::clone(&engine);
                let root = pos.clone();
                search_thread = Some(std::thread::spawn(move || {
                    let sink = |info: &SearchInfo| print_info(info);
                    let result = engine.lock().unwrap().search(&root, limits, &sink);
                    match result.best_move {
                        Some(mv) => println!("bestmove {}", move_to_uci(mv)),
                        None => println!("bestmove 0000"),
                    }
                    io::stdout().flush().ok();
                }));
            }
            "stop" => {
                if let Some(tc) = &active_search {
                    tc.stop();
                }
                join_search(&mut search_thread);
            }
            "quit" => {
                // A conforming GUI stops a running search first; letting a
                // short search finish keeps the final bestmove on the wire.
                join_search(&mut search_thread);
                break;
            }
            _ => {
                log::debug!("ignoring unknown command {command:?}");
            }
        }
    }

    join_search(&mut search_thread);
    Ok(())
}

fn join_search(handle: &mut Option<JoinHandle<()>>) {
    if let Some(h) = handle.take() {
        h.join().ok();
    }
}

/// `setoption name <Name...> value <Value...>`; the value may be empty.
fn parse_setoption(args: &[&str]) -> Option<(String, String)> {
    let mut iter = args.iter();
    if iter.next() != Some(&"name") {
        return None;
    }
    let name: Vec<&str> = iter
        .by_ref()
        .take_while(|&&w| w != "value")
        .copied()
        .collect();
    if name.is_empty() {
        return None;
    }
    let value: Vec<&str> = iter.copied().collect();
    Some((name.join(" "), value.join(" ")))
}

fn parse_go(args: &[&str]) -> GoParams {
    let mut params = GoParams::default();
    let mut iter = args.iter();
    while let Some(&key) = iter.next() {
        if !matches!(
            key,
            "wtime" | "btime" | "winc" | "binc" | "movetime" | "movestogo" | "depth"
        ) {
            continue;
        }
        let value = iter.next().and_then(|v| v.parse::<u64>().ok());
        match key {
            "wtime" => params.wtime = value,
            "btime" => params.btime = value,
            "winc" => params.winc = value,
            "binc" => params.binc = value,
            "movetime" => params.movetime = value,
            "movestogo" => params.movestogo = value,
            "depth" => params.depth = value.map(|d| d.min(u8::MAX as u64) as u8),
            _ => {}
        }
    }
    params
}

fn print_info(info: &SearchInfo) {
    match info {
        SearchInfo::CurrMove {
            depth,
            mv,
            number,
            elapsed,
            nodes,
            nps,
        } => {
            println!(
                "info depth {} currmove {} currmovenumber {} time {} nodes {} nps {}",
                depth,
                move_to_uci(*mv),
                number,
                elapsed.as_millis(),
                nodes,
                nps
            );
        }
        SearchInfo::Depth {
            depth,
            score_cp,
            elapsed,
            nodes,
            nps,
            pv,
        } => {
            let pv_text: Vec<String> = pv.iter().map(|m| move_to_uci(*m)).collect();
            println!(
                "info depth {} score cp {} time {} nodes {} nps {} pv {}",
                depth,
                score_cp,
                elapsed.as_millis(),
                nodes,
                nps,
                pv_text.join(" ")
            );
        }
    }
    io::stdout().flush().ok();
}

//! A simple CLI tool for reading off the winners of an election.
//! It consumes the candidate list exactly as returned by our API, and picks
//! co-winners with the same rule the server uses.

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::BufReader;

use clap::{Arg, ArgAction, ArgMatches, Command};
use rocket::serde::json::serde_json;

use campus_ledger::model::election::{winners, Candidate};

const PROGRAM_NAME: &str = "results-cli";

const ABOUT_TEXT: &str = "Report the winner(s) of a campus election.

EXIT CODES:
     0: Results reported.
     1: Error.";

const CANDIDATES_PATH: &str = "CANDIDATES_PATH";

const CANDIDATES_PATH_HELP: &str = "The path to a JSON dump of an election's candidates,\n\
as returned by `GET /elections/<election_id>/candidates`";

/// Construct the CLI configuration.
fn cli() -> Command {
    // Make the build dirty when the toml changes.
    include_str!("../Cargo.toml");

    clap::command!(PROGRAM_NAME).about(ABOUT_TEXT).arg(
        Arg::new(CANDIDATES_PATH)
            .help(CANDIDATES_PATH_HELP)
            .action(ArgAction::Set)
            .required(true),
    )
}

/// Errors that this program may produce.
#[derive(Debug, Eq, PartialEq)]
enum Error {
    /// IO error described by the inner message.
    IO(String),
    /// Failed to decode the JSON dump.
    Format(String),
}

/// One line of the report.
#[derive(Debug, Eq, PartialEq)]
struct Standing {
    pub header: String,
    pub votes: u64,
    pub is_winner: bool,
}

impl Display for Standing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} vote{}{}",
            self.header,
            self.votes,
            if self.votes != 1 { "s" } else { "" },
            if self.is_winner { " (winner)" } else { "" }
        )
    }
}

/// Load the dump and rank the candidates, most votes first.
fn standings(path: &str) -> Result<Vec<Standing>, Error> {
    let file = BufReader::new(File::open(path).map_err(|e| Error::IO(e.to_string()))?);
    let candidates: Vec<Candidate> =
        serde_json::from_reader(file).map_err(|e| Error::Format(e.to_string()))?;

    let winning_ids = winners(&candidates)
        .into_iter()
        .map(|c| c.id)
        .collect::<Vec<_>>();
    let mut standings = candidates
        .into_iter()
        .map(|c| Standing {
            is_winner: winning_ids.contains(&c.id),
            header: c.header,
            votes: c.vote_count,
        })
        .collect::<Vec<_>>();
    // Stable, so ties keep candidate order.
    standings.sort_by(|a, b| b.votes.cmp(&a.votes));
    Ok(standings)
}

/// Produce the report and return the exit code.
fn run(args: &ArgMatches) -> u8 {
    let path: &String = args.get_one(CANDIDATES_PATH).unwrap(); // Required argument is guaranteed to be present.
    match standings(path) {
        Ok(standings) if standings.is_empty() => {
            println!("No candidates, so no winner.");
            0
        }
        Ok(standings) => {
            let count = standings.iter().filter(|s| s.is_winner).count();
            if count > 1 {
                println!("{count}-way tie.");
            }
            for standing in standings {
                println!("{standing}");
            }
            0
        }
        Err(Error::IO(msg)) => {
            println!("IO error: {msg}");
            1
        }
        Err(Error::Format(msg)) => {
            println!("Invalid JSON: {msg}");
            1
        }
    }
}

fn main() {
    let args = cli().get_matches();
    let exit_code = run(&args);
    std::process::exit(exit_code.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(header: &str, votes: u64, is_winner: bool) -> Standing {
        Standing {
            header: header.to_string(),
            votes,
            is_winner,
        }
    }

    #[test]
    fn tied_winners_reported() {
        let expected = vec![
            standing("Bob", 5, true),
            standing("Carol", 5, true),
            standing("Alice", 3, false),
            standing("Dave", 2, false),
        ];
        assert_eq!(standings("example_dumps/candidates.json"), Ok(expected));
        assert_eq!(standings("example_dumps/candidates_empty.json"), Ok(vec![]));
        assert!(matches!(
            standings("example_dumps/candidates_malformed.json"),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn standing_display() {
        assert_eq!(standing("Bob", 5, true).to_string(), "Bob: 5 votes (winner)");
        assert_eq!(standing("Dave", 1, false).to_string(), "Dave: 1 vote");
    }

    #[test]
    fn correct_cli_usage() {
        let command_line = [PROGRAM_NAME, "example_dumps/candidates.json"];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 0);

        let command_line = [PROGRAM_NAME, "example_dumps/candidates_empty.json"];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 0);

        let command_line = [PROGRAM_NAME, "example_dumps/candidates_malformed.json"];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 1);

        let command_line = [PROGRAM_NAME, "not a real file"];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 1);
    }

    #[test]
    fn bad_cli_usage() {
        let command_line = [PROGRAM_NAME, "this", "invocation", "is", "incorrect"];
        cli().try_get_matches_from(command_line).unwrap_err();

        let command_line = [PROGRAM_NAME];
        cli().try_get_matches_from(command_line).unwrap_err();
    }
}

//! Offline tooling for the voting backend: verifying a published results dump,
//! and hashing the administrator password for the server config.
//! Verification uses the server's own implementation, and so is compatible
//! with the output of `GET /results` by definition.

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::BufReader;

use clap::{Arg, ArgAction, ArgMatches, Command};
use rocket::serde::json::serde_json;

use voting_backend::model::{
    admin::{hash_password, PasswordError},
    api::election::{ElectionResults, VerificationError},
    election::ProposalId,
};

const PROGRAM_NAME: &str = "voting-cli";

const ABOUT_TEXT: &str = "Offline tooling for the plurality voting backend.";

const VERIFY_COMMAND: &str = "verify";

const VERIFY_ABOUT: &str = "Verify the outcome of a tallied election.

EXIT CODES:
     0: Verification succeeded.
   255: Ran successfully, but verification failed.
 Other: Error.";

const RESULTS_PATH: &str = "RESULTS_PATH";

const RESULTS_PATH_HELP: &str = "The path to a JSON dump of the election,\n\
as returned by `GET /results`";

const HASH_COMMAND: &str = "hash-password";

const HASH_ABOUT: &str = "Hash an administrator password for the `admin_password_hash` setting.";

const PASSWORD: &str = "PASSWORD";

/// Construct the CLI configuration.
fn cli() -> Command {
    // Make the build dirty when the toml changes.
    include_str!("../Cargo.toml");

    clap::command!(PROGRAM_NAME)
        .about(ABOUT_TEXT)
        .subcommand_required(true)
        .subcommand(
            Command::new(VERIFY_COMMAND).about(VERIFY_ABOUT).arg(
                Arg::new(RESULTS_PATH)
                    .help(RESULTS_PATH_HELP)
                    .action(ArgAction::Set)
                    .required(true),
            ),
        )
        .subcommand(
            Command::new(HASH_COMMAND).about(HASH_ABOUT).arg(
                Arg::new(PASSWORD)
                    .help("The plaintext password")
                    .action(ArgAction::Set)
                    .required(true),
            ),
        )
}

/// Errors that this program may produce.
#[derive(Debug, Eq, PartialEq)]
enum Error {
    /// IO error described by the inner message.
    IO(String),
    /// Failed to decode the JSON dump.
    Format(String),
    /// Verification failed due to the contained reason.
    Verification(VerificationError),
}

/// A friendly representation of the results for a particular proposal.
#[derive(Debug, Eq, PartialEq)]
struct FriendlyResults {
    pub proposal_id: ProposalId,
    pub description: String,
    pub votes: u64,
    pub winner: bool,
}

impl Display for FriendlyResults {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}. {}: {} vote{}{}",
            self.proposal_id,
            self.description,
            self.votes,
            if self.votes != 1 { "s" } else { "" },
            if self.winner { " (winner)" } else { "" }
        )
    }
}

/// Run verification.
fn verify(path: &str) -> Result<Vec<FriendlyResults>, Error> {
    // Load the file.
    let file = BufReader::new(File::open(path).map_err(|e| Error::IO(e.to_string()))?);
    let results: ElectionResults =
        serde_json::from_reader(file).map_err(|e| Error::Format(e.to_string()))?;

    // Run verification.
    results.verify().map_err(Error::Verification)?;

    // Turn into a list ordered by votes, then ID. The genesis placeholder is
    // never a real option, so leave it out.
    let mut results_list = results
        .proposals
        .into_iter()
        .enumerate()
        .skip(1)
        .map(|(proposal_id, proposal)| FriendlyResults {
            proposal_id,
            description: proposal.description,
            votes: proposal.vote_count,
            winner: proposal_id == results.winning_proposal_id,
        })
        .collect::<Vec<_>>();
    results_list.sort_by(|a, b| b.votes.cmp(&a.votes));

    Ok(results_list)
}

/// Run verification, report the result, and return the exit code.
fn run_verify(args: &ArgMatches) -> u8 {
    let path: &String = args.get_one(RESULTS_PATH).unwrap(); // Required argument is guaranteed to be present.
    match verify(path) {
        Ok(friendly_results) => {
            println!("Verification succeeded.");
            if friendly_results.iter().all(|result| !result.winner) {
                println!("No proposal received any votes.");
            }
            for result in friendly_results {
                println!("{result}");
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
        Err(Error::Verification(err)) => {
            println!("Verification failed: {err}.");
            255
        }
    }
}

/// Hash the password, print the hash, and return the exit code.
fn run_hash(args: &ArgMatches) -> u8 {
    let password: &String = args.get_one(PASSWORD).unwrap(); // Required argument is guaranteed to be present.
    match hash_password(password) {
        Ok(hash) => {
            println!("{hash}");
            0
        }
        Err(err @ PasswordError::TooShort) => {
            println!("{err}");
            1
        }
        Err(PasswordError::Argon2(err)) => {
            println!("Hashing failed: {err}");
            1
        }
    }
}

/// Dispatch to the chosen subcommand and return the exit code.
fn run(args: &ArgMatches) -> u8 {
    match args.subcommand() {
        Some((VERIFY_COMMAND, sub_args)) => run_verify(sub_args),
        Some((HASH_COMMAND, sub_args)) => run_hash(sub_args),
        // Unreachable as a subcommand is required, but clap can't prove it.
        _ => 2,
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

    #[test]
    fn verification() {
        // This test actually enters backend code, so enable logging.
        log4rs_test_utils::test_logging::init_logging_once_for(["voting_backend"], None, None);

        let expected_results = vec![
            FriendlyResults {
                proposal_id: 2,
                description: "Proposal Y".to_string(),
                votes: 2,
                winner: true,
            },
            FriendlyResults {
                proposal_id: 1,
                description: "Proposal X".to_string(),
                votes: 1,
                winner: false,
            },
            FriendlyResults {
                proposal_id: 3,
                description: "Proposal Z".to_string(),
                votes: 0,
                winner: false,
            },
        ];
        assert_eq!(verify("example_dumps/results.json"), Ok(expected_results));

        assert_eq!(
            verify("example_dumps/results_invalid_tally.json"),
            Err(Error::Verification(VerificationError::Tally {
                proposal_id: 1
            }))
        );
        assert_eq!(
            verify("example_dumps/results_invalid_winner.json"),
            Err(Error::Verification(VerificationError::Winner {
                claimed: 1,
                actual: 2
            }))
        );
        assert!(matches!(
            verify("example_dumps/results_not_tallied.json"),
            Err(Error::Verification(VerificationError::NotTallied { .. }))
        ));
        assert!(matches!(
            verify("example_dumps/results_malformed.json"),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn correct_cli_usage() {
        let command_line = [PROGRAM_NAME, VERIFY_COMMAND, "example_dumps/results.json"];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 0);

        let command_line = [
            PROGRAM_NAME,
            VERIFY_COMMAND,
            "example_dumps/results_invalid_tally.json",
        ];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 255);

        let command_line = [
            PROGRAM_NAME,
            VERIFY_COMMAND,
            "example_dumps/results_malformed.json",
        ];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 1);

        let command_line = [PROGRAM_NAME, VERIFY_COMMAND, "not a real file"];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 1);

        let command_line = [PROGRAM_NAME, HASH_COMMAND, "returningofficer"];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 0);

        let command_line = [PROGRAM_NAME, HASH_COMMAND, "short"];
        let args = cli().try_get_matches_from(command_line).unwrap();
        assert_eq!(run(&args), 1);
    }

    #[test]
    fn bad_cli_usage() {
        // Something very wrong.
        let command_line = [PROGRAM_NAME, "this", "invocation", "is", "incorrect"];
        cli().try_get_matches_from(command_line).unwrap_err();

        // No subcommand at all.
        let command_line = [PROGRAM_NAME];
        cli().try_get_matches_from(command_line).unwrap_err();

        // Missing path.
        let command_line = [PROGRAM_NAME, VERIFY_COMMAND];
        cli().try_get_matches_from(command_line).unwrap_err();
    }
}

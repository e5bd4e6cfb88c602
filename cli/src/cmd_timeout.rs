// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg, value_parser};
use nimbus_chunk::calculate_assemble_timeout;

use crate::formatter::format_duration;

#[derive(Debug, Clone, Copy)]
pub struct CmdTimeout {
    pub size: u64,
}

impl CmdTimeout {
    pub const NAME: &str = "timeout";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the assemble timeout for a file size")
            .arg(arg!(size: <SIZE> "File size in bytes").value_parser(value_parser!(u64)))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        match matches.get_one::<u64>("size") {
            Some(size) => Self { size: *size },
            _ => unreachable!(),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "computing assemble timeout...");
        let timeout = calculate_assemble_timeout(self.size);
        println!("{}", format_duration(timeout));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout() {
        let cmd = Command::new("test").subcommand(CmdTimeout::command());
        let matches = cmd
            .try_get_matches_from(["test", "timeout", "2000000000"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("timeout").unwrap();
        assert_eq!(CmdTimeout::from(sub_matches).size, 2_000_000_000);
    }
}

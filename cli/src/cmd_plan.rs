// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::{ArgAction, ArgMatches, Command, arg, value_parser};
use nimbus_chunk::{Chunk, DEFAULT_CHUNK_SIZE, plan_upload};

use crate::arg::{CommonArgs, OutputFormat};
use crate::formatter::PlanFormatter;

#[derive(Debug, Clone)]
pub struct CmdPlan {
    pub length: u64,
    pub chunk_size: u64,
    pub existing: Vec<Chunk>,
    pub output_format: OutputFormat,
}

impl CmdPlan {
    pub const NAME: &str = "plan";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Compute the chunks still missing from an upload")
            .arg(
                arg!(-l --length <BYTES> "Total length of the file in bytes")
                    .value_parser(value_parser!(u64))
                    .required(true),
            )
            .arg(
                arg!(-s --"chunk-size" <BYTES> "Maximum size of a chunk in bytes [default: 10 MiB]")
                    .value_parser(value_parser!(u64).range(1..))
                    .required(false),
            )
            .arg(
                arg!(-e --existing <RANGE> "Chunk already on the server, as <start>-<end>")
                    .value_parser(value_parser!(Chunk))
                    .action(ArgAction::Append)
                    .required(false),
            )
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            length: matches.get_one("length").copied().unwrap_or_default(),
            chunk_size: matches
                .get_one("chunk-size")
                .copied()
                .unwrap_or(DEFAULT_CHUNK_SIZE),
            existing: matches
                .get_many::<Chunk>("existing")
                .map(|chunks| chunks.copied().collect())
                .unwrap_or_default(),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "planning upload...");
        let plan = plan_upload(&self.existing, self.length, self.chunk_size)?;
        PlanFormatter::new(self.output_format).write_to(&plan, &mut io::stdout())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_defaults() {
        let cmd = Command::new("test").subcommand(CmdPlan::command());
        let matches = cmd
            .try_get_matches_from(["test", "plan", "--length", "100"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("plan").unwrap();
        let parsed = CmdPlan::from(sub_matches);

        assert_eq!(parsed.length, 100);
        assert_eq!(parsed.chunk_size, DEFAULT_CHUNK_SIZE);
        assert!(parsed.existing.is_empty());
        assert_eq!(parsed.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_plan_requires_length() {
        let cmd = Command::new("test").subcommand(CmdPlan::command());
        assert!(cmd.try_get_matches_from(["test", "plan"]).is_err());
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn field_args(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("name")
            .long("name")
            .required(required)
            .help("Service name (catalogue entry or any custom name)"),
    )
    .arg(
        Arg::new("price")
            .long("price")
            .required(required)
            .allow_hyphen_values(true)
            .help("Price per billing cycle"),
    )
    .arg(
        Arg::new("cycle")
            .long("cycle")
            .required(required)
            .help("monthly|quarterly|half-yearly|yearly|one-time"),
    )
    .arg(
        Arg::new("date")
            .long("date")
            .help("Next payment date YYYY-MM-DD"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Subscription id")
}

pub fn build_cli() -> Command {
    Command::new("subtrack")
        .version(crate_version!())
        .about("Track recurring and one-time subscriptions and what they cost")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Database file (overrides SUBTRACK_DB)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("sub")
                .about("Manage subscriptions")
                .subcommand(field_args(Command::new("add").about("Add a subscription"), true))
                .subcommand(field_args(
                    Command::new("edit")
                        .about("Change fields of a subscription")
                        .arg(id_arg()),
                    false,
                ))
                .subcommand(Command::new("rm").about("Delete a subscription").arg(id_arg()))
                .subcommand(json_args(
                    Command::new("show").about("Show one subscription").arg(id_arg()),
                ))
                .subcommand(json_args(
                    Command::new("list")
                        .about("List subscriptions grouped by cycle")
                        .arg(
                            Arg::new("today")
                                .long("today")
                                .help("Count down from this date instead of today"),
                        ),
                ))
                .subcommand(Command::new("services").about("List the known service names")),
        )
        .subcommand(json_args(
            Command::new("summary").about("Monthly and yearly totals with per-subscription breakdown"),
        ))
        .subcommand(
            Command::new("export").about("Export subscriptions").arg(
                Arg::new("format")
                    .long("format")
                    .required(true)
                    .help("csv|json"),
            )
            .arg(Arg::new("out").long("out").required(true).help("Output path")),
        )
        .subcommand(
            Command::new("config")
                .about("Display settings")
                .subcommand(Command::new("show").about("Show current settings"))
                .subcommand(
                    Command::new("set-currency")
                        .about("Set the currency label used for totals")
                        .arg(Arg::new("currency").required(true)),
                )
                .subcommand(
                    Command::new("set-urgent-days")
                        .about("Flag payments due within this many days")
                        .arg(
                            Arg::new("days")
                                .required(true)
                                .value_parser(value_parser!(i64).range(0..)),
                        ),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }
}

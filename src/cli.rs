// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .value_name("USERNAME")
        .help("Owning user (falls back to the default user)")
}

fn month_arg(required: bool) -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .required(required)
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("spendlog")
        .version(crate_version!())
        .about("Multi-user expense tracking, monthly budget limits, and budget reports")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("user")
                .about("Manage users")
                .subcommand(
                    Command::new("add")
                        .about("Add a user")
                        .arg(Arg::new("username").long("username").required(true))
                        .arg(Arg::new("email").long("email").required(true)),
                )
                .subcommand(Command::new("list").about("List users"))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a user and everything they own")
                        .arg(Arg::new("username").long("username").required(true)),
                )
                .subcommand(
                    Command::new("set-default")
                        .about("Set the default user for other commands")
                        .arg(Arg::new("username").long("username").required(true)),
                ),
        )
        .subcommand(
            Command::new("expense")
                .about("Record and manage expenses")
                .subcommand(
                    Command::new("add")
                        .about("Add an expense row")
                        .arg(user_arg())
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .required(true),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("subcategory").long("subcategory"))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .action(ArgAction::SetTrue)
                                .help("Regenerate this row month-forward"),
                        )
                        .arg(
                            Arg::new("bill")
                                .long("bill")
                                .action(ArgAction::SetTrue)
                                .help("Treat a subscription as a fixed bill"),
                        )
                        .arg(
                            Arg::new("inactive")
                                .long("inactive")
                                .action(ArgAction::SetTrue)
                                .help("Create the row inactive (ignored for subscriptions)"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List expenses")
                        .arg(user_arg())
                        .arg(month_arg(false))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("match")
                                .long("match")
                                .value_name("REGEX")
                                .help("Only rows whose description matches"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Edit an expense row")
                        .arg(user_arg())
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .required(true),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("subcategory").long("subcategory"))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(Arg::new("bill").long("bill").action(ArgAction::SetTrue))
                        .arg(
                            Arg::new("inactive")
                                .long("inactive")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete an expense row")
                        .arg(user_arg())
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(
                    Command::new("cancel")
                        .about("Cancel a subscription (keeps the row, flips it inactive)")
                        .arg(user_arg())
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("recurring").about("Recurring expenses").subcommand(
                Command::new("generate")
                    .about("Copy active recurring expenses into a month")
                    .arg(user_arg())
                    .arg(month_arg(true)),
            ),
        )
        .subcommand(
            Command::new("limits")
                .about("Monthly budget limits")
                .subcommand(
                    Command::new("set")
                        .about("Create or update the limits for a month")
                        .arg(user_arg())
                        .arg(month_arg(true))
                        .arg(Arg::new("fixed").long("fixed").value_name("AMOUNT"))
                        .arg(Arg::new("variable").long("variable").value_name("AMOUNT"))
                        .arg(
                            Arg::new("invest-min")
                                .long("invest-min")
                                .value_name("AMOUNT"),
                        )
                        .arg(
                            Arg::new("invest-max")
                                .long("invest-max")
                                .value_name("AMOUNT"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Show the limits for a month (defaults if unset)")
                        .arg(user_arg())
                        .arg(month_arg(true)),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly budget reports")
                .subcommand(json_flags(
                    Command::new("budget")
                        .about("Aggregate a month against its limits")
                        .arg(user_arg())
                        .arg(month_arg(true)),
                ))
                .subcommand(
                    Command::new("render")
                        .about("Render the report email bodies to files")
                        .arg(user_arg())
                        .arg(month_arg(true))
                        .arg(Arg::new("html").long("html").value_name("PATH"))
                        .arg(Arg::new("text").long("text").value_name("PATH")),
                ),
        )
        .subcommand(
            Command::new("import").about("Bulk import").subcommand(
                Command::new("expenses")
                    .about("Import expenses from CSV")
                    .arg(user_arg())
                    .arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Check the database for inconsistencies"))
}

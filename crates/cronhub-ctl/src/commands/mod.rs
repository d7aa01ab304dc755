//! Subcommand handlers for the cronhub CLI.

mod task;

pub(crate) use task::handle_task_command;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! stintrs - the command-line front end of the stint issue tracker.
//!
//! Every command resolves an acting member and a workspace, opens the
//! SQLite database under the data directory and calls one of the
//! `stint-core` services.
//!
//! # Data directory
//!
//! `STINT_HOME` if set, else the platform data directory. It holds
//! `stint.toml` and, unless configured otherwise, `stint.db`:
//!
//! ```rust,ignore
//! use stintrs::{config::data_dir, Config};
//!
//! let dir = data_dir();
//! let config = Config::load(&dir)?;
//! let db_path = config.db_path(&dir);
//! ```

mod cli;
pub mod colors;
mod commands;
mod display;
mod env;
mod help;
mod logging;

pub mod config;
pub mod error;

pub use cli::{
    Cli, Command, CommentCommand, DraftArgs, EditArgs, IssueCommand, LimitArgs, MemberCommand,
    PositionCommand, ReviewCommand, SprintCommand, WorkspaceCommand,
};
pub use config::Config;
pub use error::{Error, Result};

use clap::CommandFactory;
use clap_complete::generate;
use stint_core::SprintStatus;

use commands::{Context, Globals};

/// Flags that apply to every command.
fn globals(cli: &Cli) -> Globals {
    Globals {
        actor: cli.actor.clone(),
        workspace: cli.workspace.clone(),
        json: cli.json,
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let globals = globals(&cli);
    let data_dir = config::data_dir();

    let command = match cli.command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "stint", &mut std::io::stdout());
            return Ok(());
        }
        Command::Init {
            login,
            email,
            name,
            database,
        } => {
            logging::setup_logging(Config::default().log_level());
            return commands::init::run(
                &data_dir,
                &globals,
                &login,
                &email,
                name.as_deref(),
                database,
            );
        }
        command => command,
    };

    let config = Config::load(&data_dir)?;
    logging::setup_logging(config.log_level());
    let mut ctx = Context::open(data_dir, config, globals)?;
    dispatch(&mut ctx, command)
}

fn dispatch(ctx: &mut Context, command: Command) -> Result<()> {
    match command {
        Command::Workspace(cmd) => match cmd {
            WorkspaceCommand::Create {
                name,
                prefix,
                description,
            } => commands::workspace::create(ctx, &name, &prefix, description),
            WorkspaceCommand::Show => commands::workspace::show(ctx),
            WorkspaceCommand::Edit {
                name,
                description,
                prefix,
            } => commands::workspace::edit(ctx, name.as_deref(), description, prefix.as_deref()),
            WorkspaceCommand::List => commands::workspace::list(ctx),
            WorkspaceCommand::Use { code } => commands::workspace::use_workspace(ctx, &code),
            WorkspaceCommand::Members => commands::workspace::members(ctx),
        },
        Command::Member(cmd) => match cmd {
            MemberCommand::Register { login, email, name } => {
                commands::member::register(ctx, &login, &email, name.as_deref())
            }
            MemberCommand::Invite { login } => commands::member::invite(ctx, &login),
            MemberCommand::Accept { invitation } => commands::member::accept(ctx, invitation),
            MemberCommand::Reject { invitation } => commands::member::reject(ctx, invitation),
            MemberCommand::Role { login, role } => commands::member::role(ctx, &login, &role),
            MemberCommand::Transfer { login } => commands::member::transfer(ctx, &login),
            MemberCommand::Position { login, position } => {
                commands::member::position(ctx, &login, position)
            }
            MemberCommand::Remove { login } => commands::member::remove(ctx, &login),
            MemberCommand::Leave => commands::member::leave(ctx),
            MemberCommand::Nickname { nickname } => commands::member::nickname(ctx, &nickname),
        },
        Command::Position(cmd) => match cmd {
            PositionCommand::Create {
                name,
                color,
                description,
            } => commands::position::create(ctx, &name, &color, description),
            PositionCommand::Delete { id } => commands::position::delete(ctx, id),
        },
        Command::Issue(cmd) => match cmd {
            IssueCommand::New {
                type_or_title,
                title,
                draft,
            } => commands::issue::new(ctx, &type_or_title, title.as_deref(), &draft),
            IssueCommand::Show { key } => commands::issue::show(ctx, &key),
            IssueCommand::Edit { key, fields } => commands::issue::edit(ctx, &key, &fields),
            IssueCommand::List { status } => commands::issue::list(ctx, status.as_deref()),
            IssueCommand::Status { key, status } => commands::issue::status(ctx, &key, &status),
            IssueCommand::Severity { key, severity } => {
                commands::issue::severity(ctx, &key, &severity)
            }
            IssueCommand::Parent { key, parent } => commands::issue::parent(ctx, &key, &parent),
            IssueCommand::Unparent { key } => commands::issue::unparent(ctx, &key),
            IssueCommand::Assign { key, login } => commands::issue::assign(ctx, &key, &login),
            IssueCommand::Unassign { key, login } => commands::issue::unassign(ctx, &key, &login),
            IssueCommand::Watch { key } => commands::issue::watch(ctx, &key),
            IssueCommand::Unwatch { key } => commands::issue::unwatch(ctx, &key),
        },
        Command::Review(cmd) => match cmd {
            ReviewCommand::Add { key, login } => commands::review::add(ctx, &key, &login),
            ReviewCommand::Remove { key, login } => commands::review::remove(ctx, &key, &login),
            ReviewCommand::Request { key } => commands::review::request(ctx, &key),
            ReviewCommand::Submit {
                key,
                verdict,
                title,
                content,
            } => commands::review::submit(ctx, &key, &verdict, &title, &content),
            ReviewCommand::Status { review, verdict } => {
                commands::review::status(ctx, review, &verdict)
            }
            ReviewCommand::Edit {
                review,
                title,
                content,
            } => commands::review::edit(ctx, review, title.as_deref(), content.as_deref()),
        },
        Command::Comment(cmd) => match cmd {
            CommentCommand::Add {
                key,
                content,
                review,
                reply_to,
            } => commands::comment::add(ctx, &key, &content, review, reply_to),
            CommentCommand::Edit { id, content } => commands::comment::edit(ctx, id, &content),
            CommentCommand::Delete { id } => commands::comment::delete(ctx, id),
            CommentCommand::List { key } => commands::comment::list(ctx, &key),
        },
        Command::Relate {
            source,
            relation,
            target,
        } => commands::relation::relate(ctx, &source, &relation, &target),
        Command::Unrelate { source, target } => commands::relation::unrelate(ctx, &source, &target),
        Command::Sprint(cmd) => match cmd {
            SprintCommand::New {
                title,
                start,
                end,
                goal,
            } => commands::sprint::new(ctx, &title, &start, &end, goal),
            SprintCommand::Show { key } => commands::sprint::show(ctx, &key),
            SprintCommand::Edit {
                key,
                title,
                goal,
                start,
                end,
            } => commands::sprint::edit(ctx, &key, title, goal, start.as_deref(), end.as_deref()),
            SprintCommand::Add { sprint, issue } => commands::sprint::add(ctx, &sprint, &issue),
            SprintCommand::Remove { sprint, issue } => {
                commands::sprint::remove(ctx, &sprint, &issue)
            }
            SprintCommand::Start { key } => {
                commands::sprint::transition(ctx, &key, SprintStatus::Active)
            }
            SprintCommand::Complete { key } => {
                commands::sprint::transition(ctx, &key, SprintStatus::Completed)
            }
            SprintCommand::Cancel { key } => {
                commands::sprint::transition(ctx, &key, SprintStatus::Cancelled)
            }
        },
        Command::Log { key, limits } => commands::log::run(ctx, key.as_deref(), limits.limit),
        // Handled in `run` before the database opens.
        Command::Init { .. } | Command::Completion { .. } => Ok(()),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

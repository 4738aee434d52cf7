use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::paths::FocusDirs;
use crate::io::store::Store;
use crate::model::config::Config;
use crate::ops::{board_ops, check, session_ops};
use crate::util::time::now_ms;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let dirs = FocusDirs::resolve(cli.data_dir.as_deref())?;

    let Some(cmd) = cli.command else {
        // main.rs routes the no-subcommand case to the TUI
        return Ok(());
    };

    match cmd {
        // Read commands
        Commands::List => cmd_list(&dirs, json),
        Commands::Stats => cmd_stats(&dirs, json),
        Commands::Check => cmd_check(&dirs, json),

        // Write commands
        Commands::Add(args) => cmd_add(&dirs, args, json),
        Commands::Rm(args) => cmd_rm(&dirs, args),
        Commands::Switch(args) => cmd_switch(&dirs, args),
        Commands::Start => cmd_start(&dirs),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_config(dirs: &FocusDirs) -> Result<Config, Box<dyn std::error::Error>> {
    Ok(config_io::read_config(&dirs.config_path())?)
}

/// Open the store for a write command. Each save inside `Store::mutate`
/// takes the advisory lock for just the rewrite, so this works while a TUI
/// is running.
fn with_store<R>(
    data_dir: &Path,
    f: impl FnOnce(&mut Store) -> Result<R, Box<dyn std::error::Error>>,
) -> Result<R, Box<dyn std::error::Error>> {
    let mut store = Store::load_or_default(data_dir);
    f(&mut store)
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_list(dirs: &FocusDirs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::load_or_default(&dirs.data_dir);
    if json {
        print_json(&board_to_json(store.board()));
    } else {
        for line in format_board(store.board()) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_stats(dirs: &FocusDirs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    use crate::model::board::Container;
    let store = Store::load_or_default(&dirs.data_dir);
    let board = store.board();

    let stats = StatsJson {
        session_tasks: board.session.len(),
        backlog_tasks: board.backlog.len(),
        done_tasks: session_ops::finished_tasks(board).len(),
        session_minutes: session_ops::total_minutes(board.container_tasks(Container::Session)),
        backlog_minutes: session_ops::total_minutes(board.container_tasks(Container::Backlog)),
        active_session: board.active_session.as_ref().map(session_to_json),
    };

    if json {
        print_json(&stats);
    } else {
        println!(
            "session: {} tasks, ~{} min ({} done)",
            stats.session_tasks, stats.session_minutes, stats.done_tasks
        );
        println!(
            "backlog: {} tasks, ~{} min",
            stats.backlog_tasks, stats.backlog_minutes
        );
        if let Some(session) = &board.active_session {
            println!("{}", format_session_line(session));
        }
    }
    Ok(())
}

fn cmd_check(dirs: &FocusDirs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::load_or_default(&dirs.data_dir);
    let issues = check::check_board(store.board());

    if json {
        print_json(&CheckJson {
            ok: issues.is_empty(),
            issues: issues.iter().map(|i| i.to_string()).collect(),
        });
    } else if issues.is_empty() {
        println!("ok: {} tasks, no issues", store.board().tasks.len());
    } else {
        for issue in &issues {
            println!("issue: {}", issue);
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(format!("{} integrity issue(s) found", issues.len()).into())
    }
}

// ---------------------------------------------------------------------------
// Write command handlers
// ---------------------------------------------------------------------------

fn cmd_add(dirs: &FocusDirs, args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(dirs)?;
    let minutes = args.minutes.unwrap_or(config.default_minutes);

    with_store(&dirs.data_dir, |store| {
        let id = store.mutate(|board| {
            let id = board_ops::add_task(board, now_ms());
            board_ops::set_title(board, id, args.title.clone())?;
            board_ops::set_minutes(board, id, minutes)?;
            Ok::<_, board_ops::TaskError>(id)
        })??;
        let task = store.board().task(id).ok_or("task vanished after add")?;
        if json {
            print_json(&task_to_json(task));
        } else {
            println!("added {}", format_task_line(task));
        }
        Ok(())
    })
}

fn cmd_rm(dirs: &FocusDirs, args: RmArgs) -> Result<(), Box<dyn std::error::Error>> {
    with_store(&dirs.data_dir, |store| {
        if store.board().task(args.id).is_none() {
            return Err(format!("no task with id {}", args.id).into());
        }
        store.mutate(|board| board_ops::remove_task(board, args.id))?;
        println!("removed task {}", args.id);
        Ok(())
    })
}

fn cmd_switch(dirs: &FocusDirs, args: SwitchArgs) -> Result<(), Box<dyn std::error::Error>> {
    with_store(&dirs.data_dir, |store| {
        let dest = store
            .board()
            .container_of(args.id)
            .ok_or_else(|| format!("no task with id {}", args.id))?
            .other();
        store.mutate(|board| board_ops::switch_task(board, args.id))?;
        println!("moved task {} to {}", args.id, dest.key());
        Ok(())
    })
}

fn cmd_start(dirs: &FocusDirs) -> Result<(), Box<dyn std::error::Error>> {
    with_store(&dirs.data_dir, |store| {
        store.mutate(|board| session_ops::start_session(board, now_ms()))??;
        let count = store.board().session.len();
        println!("session started with {} task(s)", count);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dirs_in(dir: &TempDir) -> FocusDirs {
        FocusDirs::resolve(Some(dir.path())).unwrap()
    }

    #[test]
    fn add_then_rm_round_trips_through_the_store() {
        let dir = TempDir::new().unwrap();
        let dirs = dirs_in(&dir);

        cmd_add(
            &dirs,
            AddArgs {
                title: "write tests".into(),
                minutes: Some(30),
            },
            false,
        )
        .unwrap();

        let store = Store::load_or_default(&dirs.data_dir);
        let added = store
            .board()
            .tasks
            .values()
            .find(|t| t.title == "write tests")
            .expect("task persisted");
        assert_eq!(added.minutes, 30);

        cmd_rm(&dirs, RmArgs { id: added.id }).unwrap();
        let store = Store::load_or_default(&dirs.data_dir);
        assert!(store.board().task(added.id).is_none());
    }

    #[test]
    fn start_fails_on_empty_session_list() {
        let dir = TempDir::new().unwrap();
        let dirs = dirs_in(&dir);
        assert!(cmd_start(&dirs).is_err());
    }

    #[test]
    fn check_reports_clean_store() {
        let dir = TempDir::new().unwrap();
        let dirs = dirs_in(&dir);
        assert!(cmd_check(&dirs, false).is_ok());
    }

    #[test]
    fn rm_unknown_id_is_an_error() {
        let dir = TempDir::new().unwrap();
        let dirs = dirs_in(&dir);
        assert!(cmd_rm(&dirs, RmArgs { id: 99 }).is_err());
    }

    #[test]
    fn cli_writes_land_while_a_tui_store_is_open() {
        use crate::io::watcher::StoreWatcher;

        let dir = TempDir::new().unwrap();
        let dirs = dirs_in(&dir);

        // The TUI keeps its store and watcher open for its whole run; a
        // write command issued meanwhile must go through, not time out
        let mut tui_store = Store::load_or_default(&dirs.data_dir);
        let _watcher = StoreWatcher::start(&dirs.data_dir).unwrap();

        cmd_add(
            &dirs,
            AddArgs {
                title: "from the cli".into(),
                minutes: None,
            },
            false,
        )
        .unwrap();

        assert!(tui_store.reload());
        assert!(
            tui_store
                .board()
                .tasks
                .values()
                .any(|t| t.title == "from the cli")
        );
    }
}

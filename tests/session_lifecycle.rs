use focus::io::store::Store;
use focus::model::session::SessionStatus;
use focus::ops::board_ops::{add_task, set_done, set_minutes, set_title, switch_task};
use focus::ops::check::check_board;
use focus::ops::session_ops::{
    close_session, complete_active_task, end_session, start_session,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn seeded_store(dir: &TempDir, titles: &[&str]) -> (Store, Vec<i64>) {
    let mut store = Store::load_or_default(dir.path());
    let ids = store
        .mutate(|board| {
            let mut ids = Vec::new();
            for (i, title) in titles.iter().enumerate() {
                let id = add_task(board, i as i64 + 1);
                set_title(board, id, *title).unwrap();
                set_minutes(board, id, 25).unwrap();
                switch_task(board, id);
                ids.push(id);
            }
            ids
        })
        .unwrap();
    (store, ids)
}

#[test]
fn full_session_run_persists_every_step() {
    let dir = TempDir::new().unwrap();
    let (mut store, ids) = seeded_store(&dir, &["plan", "build"]);

    store
        .mutate(|b| start_session(b, 1_000).unwrap())
        .unwrap();
    assert!(Store::load_or_default(dir.path())
        .board()
        .active_session
        .unwrap()
        .is_running());

    store
        .mutate(|b| complete_active_task(b, 600_000).unwrap())
        .unwrap();
    store
        .mutate(|b| complete_active_task(b, 1_500_000).unwrap())
        .unwrap();

    // Finishing the last task ends the run
    let reopened = Store::load_or_default(dir.path());
    let session = reopened.board().active_session.unwrap();
    assert_eq!(session.status, SessionStatus::Finished);
    assert_eq!(session.end, Some(1_500_000));

    store.mutate(|b| close_session(b).unwrap()).unwrap();
    let reopened = Store::load_or_default(dir.path());
    assert!(reopened.board().active_session.is_none());
    for id in ids {
        assert!(reopened.board().task(id).is_none());
    }
}

#[test]
fn ending_early_keeps_unfinished_tasks_for_the_next_run() {
    let dir = TempDir::new().unwrap();
    let (mut store, ids) = seeded_store(&dir, &["plan", "build", "review"]);

    store
        .mutate(|b| {
            start_session(b, 0).unwrap();
            set_done(b, ids[0], true).unwrap();
            end_session(b, 30 * 60_000).unwrap();
            close_session(b).unwrap();
        })
        .unwrap();

    let reopened = Store::load_or_default(dir.path());
    assert_eq!(reopened.board().session, vec![ids[1], ids[2]]);
    assert!(reopened.board().task(ids[0]).is_none());
    assert!(check_board(reopened.board()).is_empty());
}

#[test]
fn external_writes_are_picked_up_by_reload() {
    let dir = TempDir::new().unwrap();
    let (mut store, _) = seeded_store(&dir, &["plan"]);

    let mut other = Store::load_or_default(dir.path());
    other
        .mutate(|b| {
            let id = add_task(b, 99);
            set_title(b, id, "added elsewhere").unwrap();
        })
        .unwrap();

    assert!(store.reload());
    assert!(store
        .board()
        .tasks
        .values()
        .any(|t| t.title == "added elsewhere"));
}

#[test]
fn invariants_hold_across_a_burst_of_mutations() {
    let dir = TempDir::new().unwrap();
    let (mut store, ids) = seeded_store(&dir, &["a", "b", "c", "d"]);

    store
        .mutate(|b| {
            switch_task(b, ids[1]);
            switch_task(b, ids[3]);
            focus::ops::board_ops::remove_task(b, ids[2]);
            switch_task(b, ids[1]);
        })
        .unwrap();

    let reopened = Store::load_or_default(dir.path());
    assert!(check_board(reopened.board()).is_empty());
    assert_eq!(reopened.board(), store.board());
}

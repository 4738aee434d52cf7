use crate::dnd::geometry::{Point, Rect};
use crate::model::board::{Board, Container};
use crate::model::task::TaskId;

/// Identity of a drop target: either a task row or a whole container.
/// Dropping on a container means "append at the end" (or "drop into empty").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropId {
    Container(Container),
    Task(TaskId),
}

impl DropId {
    pub fn is_container(self) -> bool {
        matches!(self, DropId::Container(_))
    }
}

/// Nearest candidate to `from` by center distance, among those passing
/// `filter`.
fn closest_center(
    from: Point,
    candidates: &[(DropId, Rect)],
    filter: impl Fn(DropId) -> bool,
) -> Option<(DropId, Rect)> {
    candidates
        .iter()
        .copied()
        .filter(|&(id, _)| filter(id))
        .min_by(|a, b| {
            let da = from.distance_squared(a.1.center());
            let db = from.distance_squared(b.1.center());
            da.total_cmp(&db)
        })
}

/// Resolve the drop target for one drag frame.
///
/// First the nearest container, then the nearest item belonging to it. An
/// empty container resolves to itself. When the nearest item is the last of
/// a container the dragged task is *not* currently in, and the dragged
/// center sits below that item's center, the container wins — otherwise the
/// slot after the last item of a foreign container would be unreachable.
pub fn resolve_target(
    board: &Board,
    dragged: TaskId,
    dragged_rect: Rect,
    candidates: &[(DropId, Rect)],
) -> Option<DropId> {
    let from = dragged_rect.center();

    let (container_id, _) = closest_center(from, candidates, |id| id.is_container())?;
    let DropId::Container(container) = container_id else {
        return None;
    };

    let members = board.items(container);
    let closest_item = closest_center(from, candidates, |id| match id {
        DropId::Task(t) => t != dragged && members.contains(&t),
        DropId::Container(_) => false,
    });
    let Some((item_id, item_rect)) = closest_item else {
        return Some(container_id);
    };

    if board.container_of(dragged) != Some(container)
        && let DropId::Task(t) = item_id
        && members.last() == Some(&t)
        && from.y > item_rect.center().y
    {
        return Some(container_id);
    }
    Some(item_id)
}

/// Remove the dragged id from its source container and insert it relative to
/// `target`, as one state transition.
///
/// The insertion index is the target's position in the destination list, or
/// the end when the target is the container itself (or has vanished). With
/// `only_when_changing_container` the move is skipped unless the containers
/// differ — the live drag-over preview; drag release passes `false` so
/// same-container reordering commits.
pub fn move_task(
    board: &mut Board,
    dragged: TaskId,
    target: DropId,
    only_when_changing_container: bool,
) {
    let Some(source) = board.container_of(dragged) else {
        return;
    };
    let destination = match target {
        DropId::Container(c) => c,
        DropId::Task(id) => match board.container_of(id) {
            Some(c) => c,
            None => return,
        },
    };

    if source == destination && only_when_changing_container {
        return;
    }

    // Index computed against the pre-removal destination list, so a
    // same-container move lands after the target when dragging downward.
    let index = match target {
        DropId::Task(id) => board
            .items(destination)
            .iter()
            .position(|&t| t == id)
            .unwrap_or(board.items(destination).len()),
        DropId::Container(_) => board.items(destination).len(),
    };

    board.items_mut(source).retain(|&t| t != dragged);
    let items = board.items_mut(destination);
    let index = index.min(items.len());
    items.insert(index, dragged);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Task;

    fn board(backlog: &[TaskId], session: &[TaskId]) -> Board {
        let mut b = Board::empty();
        for &id in backlog.iter().chain(session) {
            b.tasks.insert(id, Task::new(id, "", 20));
        }
        b.backlog = backlog.to_vec();
        b.session = session.to_vec();
        b
    }

    #[test]
    fn move_into_empty_container_appends() {
        let mut b = board(&[1, 2, 3], &[]);
        move_task(&mut b, 1, DropId::Container(Container::Session), false);
        assert_eq!(b.backlog, vec![2, 3]);
        assert_eq!(b.session, vec![1]);
    }

    #[test]
    fn move_before_an_item_in_the_other_container() {
        let mut b = board(&[1], &[2, 3]);
        move_task(&mut b, 1, DropId::Task(2), false);
        assert!(b.backlog.is_empty());
        assert_eq!(b.session, vec![1, 2, 3]);
    }

    #[test]
    fn preview_skips_same_container_reorder() {
        let mut b = board(&[1, 2, 3], &[]);
        move_task(&mut b, 3, DropId::Task(1), true);
        assert_eq!(b.backlog, vec![1, 2, 3]);

        // Commit applies it
        move_task(&mut b, 3, DropId::Task(1), false);
        assert_eq!(b.backlog, vec![3, 1, 2]);
    }

    #[test]
    fn move_of_unknown_dragged_id_is_a_noop() {
        let mut b = board(&[1], &[]);
        move_task(&mut b, 9, DropId::Container(Container::Session), false);
        assert_eq!(b.backlog, vec![1]);
        assert!(b.session.is_empty());
    }

    fn row(y: u16) -> Rect {
        Rect::new(0, y, 20, 1)
    }

    /// Candidate set: session container with items A=10, B=11 at rows 1-2,
    /// backlog container below with item C=12.
    fn candidates() -> Vec<(DropId, Rect)> {
        vec![
            (DropId::Container(Container::Session), Rect::new(0, 0, 20, 4)),
            (DropId::Task(10), row(1)),
            (DropId::Task(11), row(2)),
            (DropId::Container(Container::Backlog), Rect::new(0, 5, 20, 3)),
            (DropId::Task(12), row(6)),
        ]
    }

    #[test]
    fn resolves_nearest_item_within_nearest_container() {
        let b = board(&[12], &[10, 11]);
        // Dragging C near the top of the session targets A
        let target = resolve_target(&b, 12, row(1), &candidates());
        assert_eq!(target, Some(DropId::Task(10)));
    }

    #[test]
    fn below_last_item_of_foreign_container_resolves_to_container() {
        let b = board(&[12], &[10, 11]);
        // C's center below B's center but session still the nearest container
        let target = resolve_target(&b, 12, row(3), &candidates());
        assert_eq!(target, Some(DropId::Container(Container::Session)));
    }

    #[test]
    fn below_last_item_of_own_container_still_resolves_to_item() {
        let b = board(&[], &[10, 11, 12]);
        let mut cands = candidates();
        cands.retain(|(id, _)| *id != DropId::Task(12));
        let target = resolve_target(&b, 12, row(3), &cands);
        assert_eq!(target, Some(DropId::Task(11)));
    }

    #[test]
    fn empty_container_resolves_to_itself() {
        let b = board(&[10, 11, 12], &[]);
        let cands = vec![
            (DropId::Container(Container::Session), Rect::new(0, 0, 20, 2)),
            (DropId::Container(Container::Backlog), Rect::new(0, 5, 20, 4)),
            (DropId::Task(10), row(6)),
            (DropId::Task(11), row(7)),
            (DropId::Task(12), row(8)),
        ];
        let target = resolve_target(&b, 10, row(0), &cands);
        assert_eq!(target, Some(DropId::Container(Container::Session)));
    }

    #[test]
    fn no_candidates_resolves_to_none() {
        let b = board(&[1], &[]);
        assert_eq!(resolve_target(&b, 1, row(0), &[]), None);
    }
}

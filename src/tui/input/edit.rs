use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::store::StoreError;
use crate::ops::board_ops;
use crate::util::unicode;

use crate::tui::app::{App, Mode};

/// Title edit mode. The buffer is local; the store sees one `set_title`
/// when the edit is committed.
pub(super) fn handle(app: &mut App, key: KeyEvent) -> Result<(), StoreError> {
    let Some(edit) = app.edit.as_mut() else {
        app.mode = Mode::Navigate;
        return Ok(());
    };

    match (key.modifiers, key.code) {
        (_, KeyCode::Enter) => {
            let id = edit.id;
            let text = edit.text.clone();
            app.edit = None;
            app.mode = Mode::Navigate;
            let _ = app.store.mutate(|b| board_ops::set_title(b, id, text))?;
        }
        (_, KeyCode::Esc) => {
            app.edit = None;
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&edit.text, edit.cursor) {
                edit.text.replace_range(prev..edit.cursor, "");
                edit.cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = unicode::next_grapheme_boundary(&edit.text, edit.cursor) {
                edit.text.replace_range(edit.cursor..next, "");
            }
        }
        (_, KeyCode::Left) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&edit.text, edit.cursor) {
                edit.cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = unicode::next_grapheme_boundary(&edit.text, edit.cursor) {
                edit.cursor = next;
            }
        }
        (_, KeyCode::Home) => edit.cursor = 0,
        (_, KeyCode::End) => edit.cursor = edit.text.len(),
        (mods, KeyCode::Char(c))
            if mods.is_empty() || mods == KeyModifiers::SHIFT =>
        {
            edit.text.insert(edit.cursor, c);
            edit.cursor += c.len_utf8();
        }
        _ => {}
    }
    Ok(())
}

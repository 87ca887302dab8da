//! Document message handlers (buffer edits)

use crate::commands::Cmd;
use crate::messages::DocumentMsg;
use crate::model::AppModel;

/// Handle buffer edits
///
/// Incremental edits originate at the surface, so only a whole-buffer
/// replacement is echoed back to it. Highlighting catches up on the next
/// scheduler tick.
pub fn update_document(model: &mut AppModel, msg: DocumentMsg) -> Option<Cmd> {
    match msg {
        DocumentMsg::Insert { offset, text } => {
            model.editor.insert(offset, &text);
            None
        }
        DocumentMsg::Delete { start, end } => {
            model.editor.delete(start, end);
            None
        }
        DocumentMsg::Append(text) => {
            model.editor.append(&text);
            None
        }
        DocumentMsg::SetText(text) => {
            model.editor.replace_text(text.as_str());
            Some(Cmd::ReplaceText(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits_bump_revision() {
        let mut model = AppModel::default();
        update_document(&mut model, DocumentMsg::Append("SELECT".into()));
        update_document(
            &mut model,
            DocumentMsg::Insert {
                offset: 6,
                text: " 1".into(),
            },
        );
        assert_eq!(model.editor.text(), "SELECT 1");
        assert_eq!(model.editor.revision(), 2);

        update_document(&mut model, DocumentMsg::Delete { start: 6, end: 8 });
        assert_eq!(model.editor.text(), "SELECT");
    }

    #[test]
    fn test_set_text_echoes_to_surface() {
        let mut model = AppModel::default();
        let cmd = update_document(&mut model, DocumentMsg::SetText("DROP TABLE t".into()));
        assert!(matches!(cmd, Some(Cmd::ReplaceText(ref t)) if t == "DROP TABLE t"));
        assert_eq!(model.editor.snapshot().text.as_ref(), "DROP TABLE t");
    }
}

//! Syntax highlighting update handlers

use crate::commands::Cmd;
use crate::messages::SyntaxMsg;
use crate::model::AppModel;

/// Handle results posted by the highlight scheduler
pub fn update_syntax(model: &mut AppModel, msg: SyntaxMsg) -> Option<Cmd> {
    match msg {
        SyntaxMsg::HighlightsComputed(spans) => {
            // Skip if the buffer has been edited since the snapshot was taken
            if spans.revision() != model.editor.revision() {
                tracing::debug!(
                    "Discarding stale highlights: buffer revision {} != result revision {}",
                    model.editor.revision(),
                    spans.revision()
                );
                return None;
            }

            model.editor.set_highlights(spans.clone());

            let clear_feedback = if model.ui.clear_feedback_error() {
                Cmd::feedback("")
            } else {
                Cmd::None
            };

            Some(Cmd::batch(vec![
                clear_feedback,
                Cmd::ApplyStyles { offset: 0, spans },
            ]))
        }

        SyntaxMsg::ClassificationFailed { revision, message } => {
            if revision != model.editor.revision() {
                tracing::debug!(
                    "Discarding stale classification error for revision {}",
                    revision
                );
                return None;
            }

            // Previous highlighting stays on screen
            model.ui.set_feedback_error(message.as_str());
            Some(Cmd::feedback(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::highlight_pass;
    use crate::surface::Label;
    use crate::syntax::SqlLexer;

    fn pass(model: &AppModel) -> SyntaxMsg {
        highlight_pass(&model.editor.snapshot(), &SqlLexer)
    }

    #[test]
    fn test_current_highlights_are_applied() {
        let mut model = AppModel::default();
        model.editor.replace_text("SELECT * FROM t;");
        let msg = pass(&model);

        let cmd = update_syntax(&mut model, msg);
        match cmd {
            Some(Cmd::ApplyStyles { offset, spans }) => {
                assert_eq!(offset, 0);
                assert_eq!(spans.total_len(), 16);
            }
            other => panic!("expected ApplyStyles, got {:?}", other),
        }
        assert!(model.editor.highlights().is_some());
    }

    #[test]
    fn test_stale_highlights_are_discarded() {
        let mut model = AppModel::default();
        model.editor.replace_text("SELECT");
        let msg = pass(&model);
        model.editor.append(" 1");

        assert!(update_syntax(&mut model, msg).is_none());
        assert!(model.editor.highlights().is_none());
    }

    #[test]
    fn test_failure_sets_feedback_and_keeps_highlights() {
        let mut model = AppModel::default();
        model.editor.replace_text("SELECT 1");
        let ok = pass(&model);
        update_syntax(&mut model, ok);

        // Stored highlights belong to the older revision but stay in place
        model.editor.append(" 'oops");
        let failed = pass(&model);
        let cmd = update_syntax(&mut model, failed);

        assert!(matches!(
            cmd,
            Some(Cmd::SetLabel { label: Label::Feedback, ref text }) if text.contains("Unterminated string")
        ));
        assert!(model.ui.feedback_is_error);
        assert!(model.editor.highlights().is_some());
    }

    #[test]
    fn test_success_clears_error_feedback() {
        let mut model = AppModel::default();
        model.editor.replace_text("'open");
        let failed = pass(&model);
        update_syntax(&mut model, failed);
        assert!(model.ui.feedback_is_error);

        model.editor.replace_text("'closed'");
        let ok = pass(&model);
        let cmds = update_syntax(&mut model, ok).map(Cmd::flatten).unwrap();

        assert!(model.ui.feedback.is_empty());
        assert!(cmds.iter().any(|c| matches!(
            c,
            Cmd::SetLabel { label: Label::Feedback, text } if text.is_empty()
        )));
    }

    #[test]
    fn test_success_keeps_confirmation_feedback() {
        let mut model = AppModel::default();
        model.ui.set_feedback("Database connection successful.");
        model.editor.replace_text("SELECT");
        let ok = pass(&model);

        let cmd = update_syntax(&mut model, ok);
        assert!(matches!(cmd, Some(Cmd::ApplyStyles { .. })));
        assert_eq!(model.ui.feedback, "Database connection successful.");
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut model = AppModel::default();
        model.editor.replace_text("'open");
        let failed = pass(&model);
        model.editor.append("'");

        assert!(update_syntax(&mut model, failed).is_none());
        assert!(model.ui.feedback.is_empty());
    }
}

use super::Editor;
use crate::error::TreeError;
use crate::response::Response;
use std::sync::Arc;

/// The edit capabilities offered for one response.
///
/// Every action computes the replacement for the bound node and passes it to the
/// change callback exactly once. When an action fails the callback is not called.
pub struct ResponseActions<'e, F>
where
    F: FnMut(Option<Arc<Response>>),
{
    editor: &'e Editor,
    node: Arc<Response>,
    on_change: F,
}

impl<'e, F> ResponseActions<'e, F>
where
    F: FnMut(Option<Arc<Response>>),
{
    pub(super) fn new(editor: &'e Editor, node: Arc<Response>, on_change: F) -> Self {
        Self {
            editor,
            node,
            on_change,
        }
    }

    pub fn node(&self) -> &Arc<Response> {
        &self.node
    }

    pub fn remove(&mut self) -> Result<(), TreeError> {
        let replacement = self.editor.remove(&self.node)?;
        (self.on_change)(replacement);
        Ok(())
    }

    /// Present only when the node has a successor to swap with.
    pub fn move_down(&mut self) -> Option<MoveDown<'_, 'e, F>> {
        if self.node.has_next() {
            Some(MoveDown { actions: self })
        } else {
            None
        }
    }

    pub fn can_move_down(&self) -> bool {
        self.node.has_next()
    }

    pub fn replace(&mut self, new_response: Arc<Response>) {
        let replacement = self.editor.replace(&self.node, new_response);
        (self.on_change)(Some(replacement));
    }

    pub fn insert_before(&mut self, new_response: &Response) {
        let replacement = self.editor.insert_before(&self.node, new_response);
        (self.on_change)(Some(replacement));
    }

    pub fn wrap_in_condition(&mut self) -> Result<(), TreeError> {
        let replacement = self.editor.wrap_in_condition(&self.node)?;
        (self.on_change)(Some(replacement));
        Ok(())
    }
}

/// The move-down capability of a response that has a successor.
pub struct MoveDown<'a, 'e, F>
where
    F: FnMut(Option<Arc<Response>>),
{
    actions: &'a mut ResponseActions<'e, F>,
}

impl<F> MoveDown<'_, '_, F>
where
    F: FnMut(Option<Arc<Response>>),
{
    pub fn run(self) {
        let replacement = self.actions.editor.move_down(&self.actions.node);
        (self.actions.on_change)(Some(replacement));
    }
}

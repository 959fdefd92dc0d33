//! Hand-off point to the host's view layer.

/// Everything a component exposes for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<V> {
    pub body: V,
    pub modal: Option<V>,
    pub contextual_actions: Option<V>,
    pub sidebar: Option<V>,
}

/// Consumes frames produced after every state change.
pub trait Renderer<V>: Send + 'static {
    fn render(&mut self, frame: Frame<V>);
}

impl<V, F> Renderer<V> for F
where
    F: FnMut(Frame<V>) + Send + 'static,
{
    fn render(&mut self, frame: Frame<V>) {
        self(frame)
    }
}

/// Discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl<V> Renderer<V> for NullRenderer {
    fn render(&mut self, _frame: Frame<V>) {}
}

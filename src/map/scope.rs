//! The ambient namespace map functions read `emit` from.
//!
//! A [`Scope`] holds the callables a map pass installs for its map function.
//! The runner never touches a process global: each [`Map`](super::Map) owns
//! its scope, and [`ExposedScope`] guarantees the bindings are concealed
//! again when the pass ends, whether it returns normally, fails, or unwinds.

use super::emit::Emitter;

/// Named callables installed into a scope.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    emit: Option<Emitter>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `emit`.
    pub fn with_emit(mut self, emitter: Emitter) -> Self {
        self.emit = Some(emitter);
        self
    }

    pub fn emit(&self) -> Option<&Emitter> {
        self.emit.as_ref()
    }
}

/// A namespace that bindings can be exposed into and concealed from.
pub trait Scope {
    /// Install `bindings`, replacing any binding of the same name.
    fn expose(&mut self, bindings: Bindings);

    /// Remove every exposed binding.
    fn conceal_all(&mut self);

    /// The exposed `emit`, if any.
    fn emitter(&self) -> Option<&Emitter>;
}

/// Scope owned by a single runner.
#[derive(Debug, Default)]
pub struct LocalScope {
    bindings: Bindings,
}

impl Scope for LocalScope {
    fn expose(&mut self, bindings: Bindings) {
        if let Some(emitter) = bindings.emit {
            self.bindings.emit = Some(emitter);
        }
    }

    fn conceal_all(&mut self) {
        self.bindings = Bindings::default();
    }

    fn emitter(&self) -> Option<&Emitter> {
        self.bindings.emit()
    }
}

/// Bindings exposed for as long as this guard lives.
pub struct ExposedScope<'a, S: Scope + ?Sized> {
    scope: &'a mut S,
}

impl<'a, S: Scope + ?Sized> ExposedScope<'a, S> {
    pub fn new(scope: &'a mut S, bindings: Bindings) -> Self {
        scope.expose(bindings);
        Self { scope }
    }

    pub fn scope(&self) -> &S {
        self.scope
    }
}

impl<S: Scope + ?Sized> Drop for ExposedScope<'_, S> {
    fn drop(&mut self) {
        self.scope.conceal_all();
    }
}

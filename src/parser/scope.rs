/// What an open `{` belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// `namespace A.B { ... }`; the name may itself be dotted.
    Namespace(String),
    /// A class or struct body.
    Type(String),
    /// Any other brace pair: method bodies, initializers, property blocks.
    Block,
}

/// Stack of currently open brace scopes, innermost last.
#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: Vec<Scope>,
    type_depth: usize,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of unmatched `{`.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Number of open class/struct bodies.
    pub fn type_depth(&self) -> usize {
        self.type_depth
    }

    pub fn in_type(&self) -> bool {
        self.type_depth > 0
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn push(&mut self, scope: Scope) {
        if matches!(scope, Scope::Type(_)) {
            self.type_depth += 1;
        }
        self.frames.push(scope);
    }

    pub fn pop(&mut self) -> Option<Scope> {
        let scope = self.frames.pop()?;
        if matches!(scope, Scope::Type(_)) {
            self.type_depth -= 1;
        }
        Some(scope)
    }

    /// Returns `(namespace, name)` for a type called `name` declared at the
    /// current position: namespace frames join into the dotted namespace,
    /// type frames prefix the name with their owner names.
    pub fn qualify(&self, name: &str) -> (String, String) {
        let mut namespace = String::new();
        let mut qualified = String::new();
        for frame in &self.frames {
            match frame {
                Scope::Namespace(segment) => {
                    if !namespace.is_empty() {
                        namespace.push('.');
                    }
                    namespace.push_str(segment);
                }
                Scope::Type(owner) => {
                    qualified.push_str(owner);
                    qualified.push('.');
                }
                Scope::Block => {}
            }
        }
        qualified.push_str(name);
        (namespace, qualified)
    }
}

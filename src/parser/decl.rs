use serde::{Deserialize, Serialize};

/// A non-generic class declaration found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassDecl {
    /// Dot-joined namespace path, empty at global scope.
    pub namespace: String,
    /// Declared name, prefixed with any enclosing type names (`Outer.Inner`).
    pub name: String,
    /// Direct base types as written, with generic arguments stripped.
    pub base: Vec<String>,
    /// Declared inside another class or struct body.
    pub nested: bool,
}

impl ClassDecl {
    /// Namespace-qualified name, e.g. `Game.Actors.Player.State`.
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

use std::collections::HashMap;

/// Value stored at a key map node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Names a widget to invoke.
    Reference(String),
    /// Replays a key sequence into the input stream.
    Macro(String),
}

impl Binding {
    pub fn reference(name: impl Into<String>) -> Self {
        Binding::Reference(name.into())
    }
}

/// Result of looking up a key sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult<'a> {
    /// Exact match with no longer binding sharing this prefix
    Exact(&'a Binding),
    /// Sequence is a valid prefix of longer bindings but has no binding itself
    Prefix,
    /// Sequence has a binding AND is a prefix of longer bindings
    Ambiguous(&'a Binding),
    /// No match found
    None,
}

/// A node in the key sequence trie
#[derive(Debug, Default, Clone)]
pub struct TrieNode {
    children: HashMap<char, TrieNode>,
    binding: Option<Binding>,
}

impl TrieNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sequence, replacing any binding already there.
    pub fn insert(&mut self, keys: &[char], binding: Binding) {
        if keys.is_empty() {
            self.binding = Some(binding);
            return;
        }
        self.children
            .entry(keys[0])
            .or_default()
            .insert(&keys[1..], binding);
    }

    /// Remove the binding at a sequence. Child bindings survive.
    pub fn remove(&mut self, keys: &[char]) -> Option<Binding> {
        if keys.is_empty() {
            return self.binding.take();
        }
        self.children.get_mut(&keys[0])?.remove(&keys[1..])
    }

    /// Look up a sequence.
    ///
    /// A node holding a binding while longer bindings pass through it is
    /// reported as `Ambiguous`; the reader resolves that case by waiting
    /// for more input with a timeout.
    pub fn lookup<'a>(&'a self, keys: &[char]) -> MatchResult<'a> {
        if keys.is_empty() {
            return match (&self.binding, self.children.is_empty()) {
                (Some(b), true) => MatchResult::Exact(b),
                (Some(b), false) => MatchResult::Ambiguous(b),
                (None, false) => MatchResult::Prefix,
                (None, true) => MatchResult::None,
            };
        }
        match self.children.get(&keys[0]) {
            Some(child) => child.lookup(&keys[1..]),
            None => MatchResult::None,
        }
    }

    /// Binding at exactly this sequence, ignoring children.
    pub fn get(&self, keys: &[char]) -> Option<&Binding> {
        if keys.is_empty() {
            return self.binding.as_ref();
        }
        self.children.get(&keys[0])?.get(&keys[1..])
    }
}

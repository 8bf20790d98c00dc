//! Placeholder name registry shared by the expressions of one statement

/// Ordered placeholder names. A placeholder node stores the index of its
/// name here; the same name always maps to the same position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderRegistry {
    names: Vec<String>,
}

impl PlaceholderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of `name`, registering it if this is its first use
    pub fn position(&mut self, name: &str) -> u32 {
        match self.names.iter().position(|n| n == name) {
            Some(index) => index as u32,
            None => {
                self.names.push(name.to_string());
                (self.names.len() - 1) as u32
            }
        }
    }

    /// Position for a bare `?`: the name is the current count in decimal,
    /// so `?` and `:N` share a slot when they agree on N
    pub fn next_positional(&mut self) -> u32 {
        let name = self.names.len().to_string();
        self.position(&name)
    }

    pub fn name(&self, position: u32) -> Option<&str> {
        self.names.get(position as usize).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

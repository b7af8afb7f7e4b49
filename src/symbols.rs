use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::SymbolConflict;

/// First RAM address handed out to variable symbols.
pub const VAR_BASE: u32 = 16;

pub const SCREEN: u32 = 0x4000;
pub const KBD: u32 = 0x6000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Predefined,
    Label,
    Variable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub value: u32,
    pub kind: SymbolKind,
}

/// Name -> address bindings shared by both passes.
///
/// Append-only: a binding is never removed or changed once made. Lookups go
/// through `index`; `entries` keeps insertion order for export.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    entries: Vec<Symbol>,
    index: HashMap<String, usize>,
    next_var: u32,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// A table holding the platform's predefined symbols, variable cursor at 16.
    pub fn new() -> Self {
        let mut table = Self {
            entries: Vec::new(),
            index: HashMap::new(),
            next_var: VAR_BASE,
        };
        for (name, value) in [("SP", 0), ("LCL", 1), ("ARG", 2), ("THIS", 3), ("THAT", 4)] {
            table.push(name.to_string(), value, SymbolKind::Predefined);
        }
        for r in 0..16u32 {
            table.push(format!("R{r}"), r, SymbolKind::Predefined);
        }
        table.push("SCREEN".to_string(), SCREEN, SymbolKind::Predefined);
        table.push("KBD".to_string(), KBD, SymbolKind::Predefined);
        table
    }

    fn push(&mut self, name: String, value: u32, kind: SymbolKind) {
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push(Symbol { name, value, kind });
    }

    /// Bind `name` to `value` as a label. Rebinding to the same value is a no-op.
    pub fn define(&mut self, name: &str, value: u32) -> Result<(), SymbolConflict> {
        match self.resolve(name) {
            Some(existing) if existing == value => Ok(()),
            Some(existing) => Err(SymbolConflict {
                name: name.to_string(),
                existing,
                requested: value,
            }),
            None => {
                trace!(name, value, "label bound");
                self.push(name.to_string(), value, SymbolKind::Label);
                Ok(())
            }
        }
    }

    pub fn resolve(&self, name: &str) -> Option<u32> {
        self.index.get(name).map(|&i| self.entries[i].value)
    }

    /// Look `name` up, binding it to the next free variable address if unseen.
    pub fn resolve_or_allocate(&mut self, name: &str) -> u32 {
        if let Some(value) = self.resolve(name) {
            return value;
        }
        let value = self.next_var;
        self.next_var += 1;
        trace!(name, value, "variable allocated");
        self.push(name.to_string(), value, SymbolKind::Variable);
        value
    }

    /// Address the next new variable will receive.
    pub fn next_variable(&self) -> u32 {
        self.next_var
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bindings in insertion order: predefined first, then labels and
    /// variables as they were encountered.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}

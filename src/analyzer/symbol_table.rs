use std::collections::HashMap;
use std::fmt;

use crate::codegen::Segment;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Static,
    Field,
    Argument,
    Local,
}

impl Kind {
    /// The VM segment a variable of this kind lives in.
    pub fn segment(&self) -> Segment {
        match self {
            Kind::Static => Segment::Static,
            Kind::Field => Segment::This,
            Kind::Argument => Segment::Argument,
            Kind::Local => Segment::Local,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Static => "static",
            Kind::Field => "field",
            Kind::Argument => "argument",
            Kind::Local => "local",
        };
        f.write_str(s)
    }
}

/// Where a symbol was introduced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclContext {
    /// `static`, `field` or `var` declaration.
    VarDec,
    Parameter,
    /// The implicit `this` argument of a method.
    Receiver,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SymbolEntry {
    pub name: String,
    pub ty: String,
    pub kind: Kind,
    pub index: u16,
    pub context: DeclContext,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SymbolError {
    #[error("undefined symbol `{0}`")]
    Undefined(String),
}

/// One scope level: statics and fields for a class, or arguments and locals
/// for a subroutine.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    table: HashMap<String, SymbolEntry>,
    counts: HashMap<Kind, u16>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.table.clear();
        self.counts.clear();
    }

    /// Declares `name` with the next free index of `kind`. Redefining a name
    /// replaces the earlier entry.
    pub fn define(&mut self, name: &str, ty: &str, kind: Kind, context: DeclContext) -> u16 {
        let index = self.var_count(kind);
        self.counts.insert(kind, index + 1);

        let symbol = SymbolEntry {
            name: name.to_string(),
            ty: ty.to_string(),
            kind,
            index,
            context,
        };
        self.table.insert(name.to_string(), symbol);
        index
    }

    pub fn var_count(&self, kind: Kind) -> u16 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.table.get(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<Kind> {
        self.get(name).map(|s| s.kind)
    }

    pub fn type_of(&self, name: &str) -> Result<&str, SymbolError> {
        self.get(name)
            .map(|s| s.ty.as_str())
            .ok_or_else(|| SymbolError::Undefined(name.to_string()))
    }

    pub fn index_of(&self, name: &str) -> Result<u16, SymbolError> {
        self.get(name)
            .map(|s| s.index)
            .ok_or_else(|| SymbolError::Undefined(name.to_string()))
    }

    /// Entries ordered by kind then index, for debug dumps.
    pub fn symbols(&self) -> Vec<&SymbolEntry> {
        let mut symbols: Vec<_> = self.table.values().collect();
        symbols.sort_by_key(|s| (s.kind as u8, s.index));
        symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_per_kind_and_in_order() {
        let mut table = SymbolTable::new();
        table.define("a", "int", Kind::Field, DeclContext::VarDec);
        table.define("s", "int", Kind::Static, DeclContext::VarDec);
        table.define("b", "Point", Kind::Field, DeclContext::VarDec);

        assert_eq!(table.index_of("a"), Ok(0));
        assert_eq!(table.index_of("b"), Ok(1));
        assert_eq!(table.index_of("s"), Ok(0));
        assert_eq!(table.var_count(Kind::Field), 2);
        assert_eq!(table.var_count(Kind::Static), 1);
        assert_eq!(table.var_count(Kind::Local), 0);
        assert_eq!(table.type_of("b"), Ok("Point"));
    }

    #[test]
    fn unknown_names() {
        let table = SymbolTable::new();
        assert_eq!(table.kind_of("x"), None);
        assert_eq!(
            table.type_of("x"),
            Err(SymbolError::Undefined("x".to_string()))
        );
        assert!(table.index_of("x").is_err());
    }

    #[test]
    fn redefinition_wins() {
        let mut table = SymbolTable::new();
        table.define("x", "int", Kind::Local, DeclContext::VarDec);
        table.define("x", "char", Kind::Local, DeclContext::VarDec);

        assert_eq!(table.type_of("x"), Ok("char"));
        assert_eq!(table.index_of("x"), Ok(1));
        assert_eq!(table.var_count(Kind::Local), 2);
    }

    #[test]
    fn reset_clears_everything() {
        let mut table = SymbolTable::new();
        table.define("this", "Main", Kind::Argument, DeclContext::Receiver);
        table.define("i", "int", Kind::Local, DeclContext::VarDec);
        table.reset();

        assert_eq!(table.kind_of("i"), None);
        assert_eq!(table.var_count(Kind::Argument), 0);
        assert_eq!(table.define("j", "int", Kind::Local, DeclContext::VarDec), 0);
    }

    #[test]
    fn kinds_map_to_segments() {
        assert_eq!(Kind::Field.segment(), Segment::This);
        assert_eq!(Kind::Static.segment(), Segment::Static);
        assert_eq!(Kind::Argument.segment(), Segment::Argument);
        assert_eq!(Kind::Local.segment(), Segment::Local);
    }
}

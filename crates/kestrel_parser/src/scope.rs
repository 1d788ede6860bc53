//! Lexical scope tracking used to reject conflicting declarations.
//!
//! Every scope keeps the names declared with `var`, with a lexical declaration, and as
//! sloppy mode functions. A conflict is found while the declaration is parsed.

use bitflags::bitflags;
use kestrel_syntax::Span;
use log::trace;
use smol_str::SmolStr;
use std::collections::HashMap;

bitflags! {
    #[derive(Default)]
    pub struct ScopeFlags: u8 {
        /// The program scope.
        const TOP = 1 << 0;
        /// A function body, which also holds the parameters.
        const FUNCTION = 1 << 1;
        /// A catch clause with a single identifier as its parameter.
        const SIMPLE_CATCH = 1 << 2;
        /// The scope holds module top level declarations.
        const MODULE = 1 << 3;
        /// Scopes which stop `var` declarations from hoisting further.
        const VAR = Self::TOP.bits | Self::FUNCTION.bits;
    }
}

/// How a name is being declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `var` declarations, parameters, and functions which behave like `var`.
    Var,
    /// `let`, `const`, `class`, imports, and block level functions in strict code.
    Lexical,
    /// Sloppy mode function declarations which may be redeclared.
    Function,
    /// The parameter of a simple catch clause.
    SimpleCatch,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    pub flags: ScopeFlags,
    var: Vec<SmolStr>,
    lexical: Vec<SmolStr>,
    functions: Vec<SmolStr>,
}

impl Scope {
    pub fn new(flags: ScopeFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    /// Function declarations at the top of a script or function behave like `var`.
    pub fn treats_functions_as_var(&self) -> bool {
        self.flags.contains(ScopeFlags::FUNCTION)
            || (self.flags.contains(ScopeFlags::TOP) && !self.flags.contains(ScopeFlags::MODULE))
    }

    pub fn declares(&self, name: &str) -> bool {
        self.var.iter().any(|n| n == name)
            || self.lexical.iter().any(|n| n == name)
            || self.functions.iter().any(|n| n == name)
    }
}

/// The stack of scopes the parser is currently inside of.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    pub fn enter(&mut self, flags: ScopeFlags) {
        trace!("entering scope {:?} at depth {}", flags, self.scopes.len());
        self.scopes.push(Scope::new(flags));
    }

    pub fn exit(&mut self) {
        self.scopes.pop();
        trace!("exited scope, depth is now {}", self.scopes.len());
    }

    pub fn current(&self) -> Option<&Scope> {
        self.scopes.last()
    }

    pub fn top(&self) -> Option<&Scope> {
        self.scopes.first()
    }

    /// Whether the current scope is the program scope.
    pub fn at_top(&self) -> bool {
        self.scopes.len() == 1
    }

    /// The kind a function declaration binds its name with.
    pub fn function_binding(&self, plain_sloppy: bool, web_compat: bool) -> BindingKind {
        let treat_as_var = self.current().map_or(true, Scope::treats_functions_as_var);
        if plain_sloppy && (treat_as_var || web_compat) {
            BindingKind::Function
        } else if treat_as_var {
            BindingKind::Var
        } else {
            BindingKind::Lexical
        }
    }

    /// Whether a `var` named `name` hoists through a simple catch clause binding the
    /// same name.
    pub fn hoists_through_catch_param(&self, name: &str) -> bool {
        for scope in self.scopes.iter().rev() {
            if scope.flags.contains(ScopeFlags::SIMPLE_CATCH)
                && scope.lexical.first().map_or(false, |n| n == name)
            {
                return true;
            }
            if scope.flags.intersects(ScopeFlags::VAR) {
                break;
            }
        }
        false
    }

    /// Declare `name` in the current scope, returns `false` if it conflicts with an
    /// existing declaration.
    pub fn declare(&mut self, name: &SmolStr, kind: BindingKind) -> bool {
        match kind {
            BindingKind::Lexical => {
                let scope = match self.scopes.last_mut() {
                    Some(scope) => scope,
                    None => return true,
                };
                let redeclared = scope.declares(name);
                scope.lexical.push(name.clone());
                !redeclared
            }
            BindingKind::SimpleCatch => {
                if let Some(scope) = self.scopes.last_mut() {
                    scope.lexical.push(name.clone());
                }
                true
            }
            BindingKind::Function => {
                let scope = match self.scopes.last_mut() {
                    Some(scope) => scope,
                    None => return true,
                };
                let redeclared = if scope.treats_functions_as_var() {
                    scope.lexical.iter().any(|n| n == name)
                } else {
                    scope.lexical.iter().any(|n| n == name) || scope.var.iter().any(|n| n == name)
                };
                scope.functions.push(name.clone());
                !redeclared
            }
            BindingKind::Var => {
                let mut redeclared = false;
                for scope in self.scopes.iter_mut().rev() {
                    let catch_param = scope.flags.contains(ScopeFlags::SIMPLE_CATCH)
                        && scope.lexical.first() == Some(name);
                    if (scope.lexical.iter().any(|n| n == name) && !catch_param)
                        || (!scope.treats_functions_as_var()
                            && scope.functions.iter().any(|n| n == name))
                    {
                        redeclared = true;
                    }
                    scope.var.push(name.clone());
                    if scope.flags.intersects(ScopeFlags::VAR) {
                        break;
                    }
                }
                !redeclared
            }
        }
    }
}

/// How a private name is declared in a class body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateKind {
    Field,
    Method,
    Getter,
    Setter,
    /// A getter and a setter sharing the name.
    Accessor,
}

/// The private names of one class body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassScope {
    declared: HashMap<SmolStr, (PrivateKind, bool)>,
    used: Vec<(SmolStr, Span)>,
}

/// The class bodies the parser is inside of, innermost last.
///
/// Private names may be used before the member declaring them, so uses are only
/// resolved once the class body ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivateNameStack {
    classes: Vec<ClassScope>,
}

impl PrivateNameStack {
    pub fn enter(&mut self) {
        self.classes.push(ClassScope::default());
    }

    /// Leave the innermost class body, returning the first use no enclosing class
    /// could still declare.
    pub fn exit(&mut self) -> Option<(SmolStr, Span)> {
        let ClassScope { declared, used } = self.classes.pop()?;
        let mut unresolved = used
            .into_iter()
            .filter(|(name, _)| !declared.contains_key(name));
        match self.classes.last_mut() {
            Some(outer) => {
                outer.used.extend(unresolved);
                None
            }
            None => unresolved.next(),
        }
    }

    /// Declare a private member, returns `false` if the name is already taken. Only a
    /// getter and a setter with the same placement may share a name.
    pub fn declare(&mut self, name: &SmolStr, kind: PrivateKind, is_static: bool) -> bool {
        let class = match self.classes.last_mut() {
            Some(class) => class,
            None => return true,
        };
        match class.declared.get_mut(name) {
            None => {
                class.declared.insert(name.clone(), (kind, is_static));
                true
            }
            Some(existing) => match (existing.0, kind) {
                (PrivateKind::Getter, PrivateKind::Setter)
                | (PrivateKind::Setter, PrivateKind::Getter)
                    if existing.1 == is_static =>
                {
                    existing.0 = PrivateKind::Accessor;
                    true
                }
                _ => false,
            },
        }
    }

    /// Record a use of `#name`, returns `false` outside of every class body.
    pub fn reference(&mut self, name: SmolStr, span: Span) -> bool {
        match self.classes.last_mut() {
            Some(class) => {
                class.used.push((name, span));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> SmolStr {
        SmolStr::new(s)
    }

    #[test]
    fn lexical_conflicts() {
        let mut scopes = ScopeStack::default();
        scopes.enter(ScopeFlags::TOP);
        assert!(scopes.declare(&name("a"), BindingKind::Lexical));
        assert!(!scopes.declare(&name("a"), BindingKind::Lexical));
        assert!(!scopes.declare(&name("a"), BindingKind::Var));
    }

    #[test]
    fn var_hoists_through_blocks() {
        let mut scopes = ScopeStack::default();
        scopes.enter(ScopeFlags::TOP);
        assert!(scopes.declare(&name("a"), BindingKind::Lexical));
        scopes.enter(ScopeFlags::empty());
        assert!(!scopes.declare(&name("a"), BindingKind::Var));
        scopes.exit();

        scopes.enter(ScopeFlags::empty());
        assert!(scopes.declare(&name("b"), BindingKind::Var));
        scopes.exit();
        assert!(!scopes.declare(&name("b"), BindingKind::Lexical));
    }

    #[test]
    fn simple_catch_parameter_allows_var() {
        let mut scopes = ScopeStack::default();
        scopes.enter(ScopeFlags::FUNCTION);
        scopes.enter(ScopeFlags::SIMPLE_CATCH);
        assert!(scopes.declare(&name("e"), BindingKind::SimpleCatch));
        assert!(scopes.declare(&name("e"), BindingKind::Var));
        assert!(!scopes.declare(&name("e"), BindingKind::Lexical));
        assert!(scopes.hoists_through_catch_param("e"));
        assert!(!scopes.hoists_through_catch_param("f"));

        scopes.enter(ScopeFlags::FUNCTION);
        assert!(!scopes.hoists_through_catch_param("e"));
    }

    #[test]
    fn private_accessor_pairs() {
        let mut names = PrivateNameStack::default();
        names.enter();
        assert!(names.declare(&name("a"), PrivateKind::Getter, false));
        assert!(names.declare(&name("a"), PrivateKind::Setter, false));
        assert!(!names.declare(&name("a"), PrivateKind::Getter, false));

        assert!(names.declare(&name("b"), PrivateKind::Getter, true));
        assert!(!names.declare(&name("b"), PrivateKind::Setter, false));

        assert!(names.declare(&name("c"), PrivateKind::Field, false));
        assert!(!names.declare(&name("c"), PrivateKind::Method, false));
    }

    #[test]
    fn private_uses_resolve_against_enclosing_classes() {
        let mut names = PrivateNameStack::default();
        assert!(!names.reference(name("x"), Span::new(0, 2)));

        names.enter();
        names.declare(&name("x"), PrivateKind::Field, false);
        names.enter();
        assert!(names.reference(name("x"), Span::new(10, 12)));
        assert!(names.reference(name("y"), Span::new(14, 16)));
        assert_eq!(names.exit(), None);
        assert_eq!(names.exit(), Some((name("y"), Span::new(14, 16))));
    }

    #[test]
    fn sloppy_functions() {
        let mut scopes = ScopeStack::default();
        scopes.enter(ScopeFlags::TOP);
        assert_eq!(scopes.function_binding(true, false), BindingKind::Function);
        assert!(scopes.declare(&name("f"), BindingKind::Function));
        assert!(scopes.declare(&name("f"), BindingKind::Function));
        assert!(scopes.declare(&name("f"), BindingKind::Var));

        scopes.enter(ScopeFlags::empty());
        assert_eq!(scopes.function_binding(true, false), BindingKind::Lexical);
        assert_eq!(scopes.function_binding(true, true), BindingKind::Function);
        assert_eq!(scopes.function_binding(false, true), BindingKind::Lexical);
    }
}

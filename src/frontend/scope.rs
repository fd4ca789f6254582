//! Lexical scopes and the local resolver.
//!
//! Lark has no declaration statement: the first assignment to a bare identifier declares it in the
//! innermost scope, unless some enclosing scope already declares it (then the assignment updates
//! the outer variable). Reading an identifier that no scope in the chain declares is an error.
//!
//! Scopes are introduced by the unit itself, routine bodies, class bodies and package bodies. They
//! live in an arena ([`ScopeTree`]) and refer to each other by [`ScopeId`].

use std::collections::HashMap;
use std::fmt;

use lark_core::diagnostics::DiagnosticCode;
use lark_syntax::ast::*;
use lark_syntax::diagnostics::{Diagnostics, Reported};

/// Index of a scope inside its [`ScopeTree`].
pub type ScopeId = usize;

/// What introduced a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Unit,
    Routine,
    Class,
    Package,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKind::Unit => write!(f, "unit"),
            ScopeKind::Routine => write!(f, "routine"),
            ScopeKind::Class => write!(f, "class"),
            ScopeKind::Package => write!(f, "package"),
        }
    }
}

/// A declared identifier and where it was first declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub location: Location,
}

/// One lexical nesting level.
#[derive(Debug, Clone)]
pub struct Scope {
    pub kind: ScopeKind,
    pub location: Location,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    declarations: Vec<Declaration>,
    index: HashMap<String, usize>,
}

impl Scope {
    fn new(kind: ScopeKind, location: Location, parent: Option<ScopeId>) -> Self {
        Self {
            kind,
            location,
            parent,
            children: Vec::new(),
            declarations: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Whether this scope itself (not an ancestor) declares `name`.
    pub fn declares(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Declarations in the order they were made.
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.index.get(name).map(|&i| &self.declarations[i])
    }

    fn declare(&mut self, name: &str, location: Location) {
        if self.declares(name) {
            return;
        }
        self.index.insert(name.to_string(), self.declarations.len());
        self.declarations.push(Declaration {
            name: name.to_string(),
            location,
        });
    }
}

/// Every scope of one unit; scope `0` is the unit scope.
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    pub const ROOT: ScopeId = 0;

    fn new(location: Location) -> Self {
        Self {
            scopes: vec![Scope::new(ScopeKind::Unit, location, None)],
        }
    }

    pub fn root(&self) -> &Scope {
        &self.scopes[Self::ROOT]
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Always false: the unit scope exists from the start.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes.iter().enumerate()
    }

    /// Find the nearest scope, starting at `from` and walking outward, that declares `name`.
    pub fn lookup(&self, from: ScopeId, name: &str) -> Option<ScopeId> {
        let mut scope_idx = from;
        loop {
            let scope = self.scopes.get(scope_idx)?;
            if scope.declares(name) {
                return Some(scope_idx);
            }
            scope_idx = scope.parent?;
        }
    }

    fn push_child(&mut self, parent: ScopeId, kind: ScopeKind, location: Location) -> ScopeId {
        let id = self.scopes.len();
        self.scopes.push(Scope::new(kind, location, Some(parent)));
        self.scopes[parent].children.push(id);
        id
    }

    /// Indented outline, one scope per line: `kind line:column: name, name`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(Self::ROOT, 0, &mut out);
        out
    }

    fn render_into(&self, id: ScopeId, depth: usize, out: &mut String) {
        let scope = &self.scopes[id];
        let names = scope
            .declarations
            .iter()
            .map(|d| d.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("{} {}:", scope.kind, scope.location));
        if !names.is_empty() {
            out.push(' ');
            out.push_str(&names);
        }
        for &child in &scope.children {
            self.render_into(child, depth + 1, out);
        }
    }
}

impl fmt::Display for ScopeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Build the scope tree for `unit` and check every identifier read against it.
///
/// Keeps going after an undeclared identifier so all of them are reported in one run.
#[tracing::instrument(skip_all, fields(unit = diagnostics.source_name()))]
pub fn resolve(unit: &Block, diagnostics: &mut Diagnostics) -> Result<ScopeTree, Reported> {
    let mut resolver = LocalResolver::new(unit.location, diagnostics);
    let ok = unit.accept(&mut resolver);
    let scopes = resolver.into_scopes();
    tracing::debug!(scopes = scopes.len(), ok, "resolved unit");
    if ok { Ok(scopes) } else { Err(Reported) }
}

/// Visitor that builds a [`ScopeTree`] while walking a unit.
pub struct LocalResolver<'d> {
    scopes: ScopeTree,
    current: ScopeId,
    diagnostics: &'d mut Diagnostics,
}

impl<'d> LocalResolver<'d> {
    pub fn new(location: Location, diagnostics: &'d mut Diagnostics) -> Self {
        Self {
            scopes: ScopeTree::new(location),
            current: ScopeTree::ROOT,
            diagnostics,
        }
    }

    pub fn into_scopes(self) -> ScopeTree {
        self.scopes
    }

    fn enter_scope(&mut self, kind: ScopeKind, location: Location) {
        self.current = self.scopes.push_child(self.current, kind, location);
    }

    fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes.scopes[self.current].parent {
            self.current = parent;
        }
    }

    /// Declare in the innermost scope, even if an outer scope has the same name.
    fn declare_local(&mut self, name: &str, location: Location) {
        tracing::trace!(name, scope = self.current, "declare");
        self.scopes.scopes[self.current].declare(name, location);
    }

    /// Declare in the innermost scope unless the chain already has it.
    fn declare_on_assignment(&mut self, name: &str, location: Location) {
        if self.scopes.lookup(self.current, name).is_none() {
            self.declare_local(name, location);
        }
    }

    fn use_name(&mut self, name: &str, location: Location) -> bool {
        if self.scopes.lookup(self.current, name).is_some() {
            return true;
        }
        self.diagnostics.error_with(
            location,
            DiagnosticCode::UseOfUndeclaredIdentifier,
            format!("`{name}` is not declared in this scope"),
        );
        false
    }

    fn in_scope(
        &mut self,
        kind: ScopeKind,
        location: Location,
        visit: impl FnOnce(&mut Self) -> bool,
    ) -> bool {
        self.enter_scope(kind, location);
        let ok = visit(self);
        self.exit_scope();
        ok
    }
}

impl Visitor for LocalResolver<'_> {
    // Gaps are reported by the well-formedness pass; there is nothing to resolve in them.
    fn missing_child(&mut self, node: &'static str, field: &'static str, _location: Location) -> bool {
        tracing::trace!(node, field, "skipping empty slot");
        true
    }

    fn visit_block(&mut self, block: &Block) -> bool {
        walk::block(self, block)
    }

    fn visit_import(&mut self, stmt: &ImportStmt, location: Location) -> bool {
        if let Some(name) = stmt.binding() {
            self.declare_on_assignment(name, location);
        }
        true
    }

    fn visit_expression_statement(&mut self, expr: &RequiredExpr, location: Location) -> bool {
        walk::expression_statement(self, expr, location)
    }

    fn visit_if(&mut self, stmt: &IfStmt, location: Location) -> bool {
        walk::if_stmt(self, stmt, location)
    }

    fn visit_case(&mut self, stmt: &CaseStmt, location: Location) -> bool {
        walk::case_stmt(self, stmt, location)
    }

    fn visit_while(&mut self, stmt: &WhileStmt, location: Location) -> bool {
        walk::while_stmt(self, stmt, location)
    }

    fn visit_for(&mut self, stmt: &ForStmt, location: Location) -> bool {
        walk::for_stmt(self, stmt, location)
    }

    fn visit_foreach(&mut self, stmt: &ForeachStmt, location: Location) -> bool {
        let mut ok = walk::expr(self, &stmt.collection, "foreach statement", "collection", location);
        self.declare_on_assignment(&stmt.variable.node, stmt.variable.location);
        ok &= walk::body(self, &stmt.body, "foreach statement", location);
        ok
    }

    fn visit_break(&mut self, _location: Location) -> bool {
        true
    }

    fn visit_next(&mut self, _location: Location) -> bool {
        true
    }

    fn visit_return(&mut self, value: Option<&Located<Expr>>, _location: Location) -> bool {
        walk::return_stmt(self, value)
    }

    fn visit_identifier(&mut self, name: &str, location: Location) -> bool {
        self.use_name(name, location)
    }

    fn visit_nil(&mut self, _location: Location) -> bool {
        true
    }

    fn visit_bool(&mut self, _value: bool, _location: Location) -> bool {
        true
    }

    fn visit_integer(&mut self, _value: i64, _location: Location) -> bool {
        true
    }

    fn visit_real(&mut self, _value: f64, _location: Location) -> bool {
        true
    }

    fn visit_string(&mut self, _value: &str, _location: Location) -> bool {
        true
    }

    fn visit_this(&mut self, _location: Location) -> bool {
        true
    }

    fn visit_array(&mut self, array: &ArrayLiteral, _location: Location) -> bool {
        walk::array(self, array)
    }

    fn visit_hash(&mut self, hash: &HashLiteral, _location: Location) -> bool {
        walk::hash(self, hash)
    }

    fn visit_routine(&mut self, routine: &RoutineLiteral, location: Location) -> bool {
        self.in_scope(ScopeKind::Routine, location, |r| walk::routine(r, routine, location))
    }

    fn visit_class(&mut self, class: &ClassLiteral, location: Location) -> bool {
        self.declare_on_assignment(&class.name, location);

        let mut ok = true;
        if let Some(base) = &class.base {
            ok &= self.use_name(&base.name.node, base.name.location);
            ok &= walk::exprs(self, &base.arguments);
        }
        for include in &class.includes {
            ok &= self.use_name(&include.node, include.location);
        }

        ok &= self.in_scope(ScopeKind::Class, location, |r| {
            let mut ok = walk::parameters(r, &class.parameters);
            ok &= walk::sections(r, &class.sections);
            ok
        });
        ok
    }

    fn visit_package(&mut self, package: &PackageLiteral, location: Location) -> bool {
        self.declare_on_assignment(&package.name, location);
        self.in_scope(ScopeKind::Package, location, |r| walk::package(r, package, location))
    }

    fn visit_parenthesized(&mut self, inner: &RequiredExpr, location: Location) -> bool {
        walk::parenthesized(self, inner, location)
    }

    fn visit_index(&mut self, expr: &IndexExpr, location: Location) -> bool {
        walk::index(self, expr, location)
    }

    fn visit_call(&mut self, expr: &CallExpr, location: Location) -> bool {
        walk::call(self, expr, location)
    }

    fn visit_member(&mut self, expr: &MemberExpr, location: Location) -> bool {
        walk::member(self, expr, location)
    }

    fn visit_unary(&mut self, expr: &UnaryExpr, location: Location) -> bool {
        walk::unary(self, expr, location)
    }

    fn visit_multiplicative(&mut self, expr: &BinaryExpr, location: Location) -> bool {
        walk::binary(self, "multiplicative expression", expr, location)
    }

    fn visit_additive(&mut self, expr: &BinaryExpr, location: Location) -> bool {
        walk::binary(self, "additive expression", expr, location)
    }

    fn visit_shift(&mut self, expr: &BinaryExpr, location: Location) -> bool {
        walk::binary(self, "shift expression", expr, location)
    }

    fn visit_bitwise_and(&mut self, expr: &BinaryExpr, location: Location) -> bool {
        walk::binary(self, "bitwise-and expression", expr, location)
    }

    fn visit_bitwise_or(&mut self, expr: &BinaryExpr, location: Location) -> bool {
        walk::binary(self, "bitwise-or expression", expr, location)
    }

    fn visit_relational(&mut self, expr: &BinaryExpr, location: Location) -> bool {
        walk::binary(self, "relational expression", expr, location)
    }

    fn visit_equality(&mut self, expr: &BinaryExpr, location: Location) -> bool {
        walk::binary(self, "equality expression", expr, location)
    }

    fn visit_logical_and(&mut self, expr: &BinaryExpr, location: Location) -> bool {
        walk::binary(self, "logical-and expression", expr, location)
    }

    fn visit_logical_or(&mut self, expr: &BinaryExpr, location: Location) -> bool {
        walk::binary(self, "logical-or expression", expr, location)
    }

    fn visit_assignment(&mut self, expr: &AssignmentExpr, location: Location) -> bool {
        // Declare a bare target first so the value may refer to it (recursive routines).
        let mut ok = match expr.target.get() {
            Some(Located {
                node: Expr::Identifier(name),
                location,
            }) => {
                self.declare_on_assignment(name, *location);
                true
            }
            Some(target) => target.accept(self),
            None => self.missing_child("assignment", "target", location),
        };
        ok &= walk::expr(self, &expr.value, "assignment", "value", location);
        ok
    }

    fn visit_value_parameter(&mut self, param: &ValueParameter, location: Location) -> bool {
        let ok = walk::value_parameter(self, param);
        self.declare_local(&param.name, location);
        ok
    }

    fn visit_output_parameter(&mut self, param: &OutputParameter, location: Location) -> bool {
        self.declare_local(&param.name, location);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lark_syntax::parser;

    fn resolve_source(source: &str) -> (Result<ScopeTree, Reported>, Diagnostics) {
        let mut diags = Diagnostics::new("scope.lark");
        let unit = parser::parse_source(source, &mut diags).expect("parse failed");
        let result = resolve(&unit, &mut diags);
        (result, diags)
    }

    fn undeclared(diags: &Diagnostics) -> Vec<String> {
        diags
            .iter()
            .filter(|d| d.code == DiagnosticCode::UseOfUndeclaredIdentifier)
            .flat_map(|d| d.notes.iter().cloned())
            .collect()
    }

    #[test]
    fn assignment_declares_in_unit_scope() {
        let (scopes, diags) = resolve_source("x = 1\ny = x + 1");
        let scopes = scopes.expect("resolve failed");
        assert!(diags.is_empty());
        assert!(scopes.root().declares("x"));
        assert!(scopes.root().declares("y"));
        assert_eq!(scopes.len(), 1);
    }

    #[test]
    fn reading_before_any_assignment_fails() {
        let (result, diags) = resolve_source("y = x");
        assert!(result.is_err());
        assert_eq!(undeclared(&diags), vec!["`x` is not declared in this scope"]);
    }

    #[test]
    fn foreach_binds_variable_but_collection_must_exist() {
        let (result, diags) = resolve_source("foreach x in y do z = x end");
        assert!(result.is_err());
        assert_eq!(diags.codes(), vec![DiagnosticCode::UseOfUndeclaredIdentifier]);
        assert_eq!(undeclared(&diags), vec!["`y` is not declared in this scope"]);
    }

    #[test]
    fn routine_closes_over_outer_variable() {
        let (scopes, _) = resolve_source("x = 1\nf = routine() x = 2\ny = x end");
        let scopes = scopes.expect("resolve failed");
        let routine = scopes.get(1).expect("routine scope");
        assert_eq!(routine.kind, ScopeKind::Routine);
        assert!(!routine.declares("x"), "x belongs to the unit scope");
        assert!(routine.declares("y"));
        assert!(!scopes.root().declares("y"));
    }

    #[test]
    fn routine_locals_do_not_leak() {
        let (result, diags) = resolve_source("f = routine() y = 1 end\nz = y");
        assert!(result.is_err());
        assert_eq!(undeclared(&diags), vec!["`y` is not declared in this scope"]);
    }

    #[test]
    fn parameters_shadow_outer_variables() {
        let (scopes, _) = resolve_source("x = 1\nf = routine(x, out r) x = 2\nr = x end");
        let scopes = scopes.expect("resolve failed");
        let routine = scopes.get(1).expect("routine scope");
        assert!(routine.declares("x"));
        assert!(routine.declares("r"));
        assert_eq!(routine.declaration("x").map(|d| d.location), Some(Location::new(2, 12)));
    }

    #[test]
    fn recursive_routine_sees_its_own_name() {
        let (result, diags) = resolve_source("f = routine(n) f(n) end");
        assert!(result.is_ok(), "{}", diags.render_all());
    }

    #[test]
    fn default_arguments_are_resolved_outside_the_parameter() {
        let (result, diags) = resolve_source("f = routine(a = b) a end");
        assert!(result.is_err());
        assert_eq!(undeclared(&diags), vec!["`b` is not declared in this scope"]);
    }

    #[test]
    fn class_and_package_introduce_scopes() {
        let source = "\
package Shapes
  class Point(x, y) : Base(x) include Printable
    norm = x * x + y * y
  end
end";
        let (result, diags) = resolve_source(source);
        assert!(result.is_err());
        assert_eq!(undeclared(&diags), vec![
            "`Base` is not declared in this scope",
            "`x` is not declared in this scope",
            "`Printable` is not declared in this scope",
        ]);
    }

    #[test]
    fn class_names_are_declared_in_the_enclosing_scope() {
        let source = "\
Base = class Base() end
Point = class Point(x) : Base() public
  len = x
end";
        let (scopes, diags) = resolve_source(source);
        let scopes = scopes.unwrap_or_else(|_| panic!("{}", diags.render_all()));
        assert_eq!(
            scopes.root().declarations().iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
            vec!["Base", "Point"]
        );
        assert_eq!(scopes.render(), "unit 1:0: Base, Point\n  class 1:7:\n  class 2:8: x, len");
    }

    #[test]
    fn member_names_and_this_are_not_identifier_uses() {
        let (result, diags) = resolve_source("p = this\np.field = p.other");
        assert!(result.is_ok(), "{}", diags.render_all());
    }

    #[test]
    fn import_declares_last_segment() {
        let (scopes, _) = resolve_source("import std.io\nio.print(1)");
        let scopes = scopes.expect("resolve failed");
        assert!(scopes.root().declares("io"));
        assert!(!scopes.root().declares("std"));
    }

    #[test]
    fn every_undeclared_use_is_reported() {
        let (_, diags) = resolve_source("a = b + c\nd = [e, f]");
        assert_eq!(diags.error_count(), 4);
    }

    #[test]
    fn empty_slots_are_skipped() {
        let mut diags = Diagnostics::new("hand.lark");
        let stmt = Statement::If(IfStmt {
            condition: Required::missing(),
            then_body: Required::new(Block::new(vec![], Location::START)),
            elseif_branches: vec![],
            else_body: None,
        });
        let unit = Block::new(vec![Located::new(stmt, Location::START)], Location::START);
        assert!(resolve(&unit, &mut diags).is_ok());
        assert!(diags.is_empty());
    }
}

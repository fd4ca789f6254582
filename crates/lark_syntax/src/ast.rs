//! Abstract Syntax Tree definitions for Lark
//!
//! This module defines all AST node types for the Lark language together with the [`Visitor`]
//! protocol every analysis pass is written against.
//!
//! ## Notes
//! - Children the grammar always produces live in a [`Required`] slot. The parser fills every slot,
//!   but trees can also be built by hand, so passes must handle an empty slot (see
//!   [`Visitor::missing_child`]).
//! - Optional children are `Option<_>`, lists are `Vec<_>`.
//! - Every node carries the [`Location`] of its first token.

use std::fmt;

use lark_core::lang::operators::{BinaryLevel, OperatorId};

pub use crate::location::Location;

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Located<T> {
    pub node: T,
    pub location: Location,
}

impl<T> Located<T> {
    pub fn new(node: T, location: Location) -> Self {
        Self { node, location }
    }
}

/// Slot for a child the grammar requires.
///
/// The parser always fills it; an empty slot only appears in hand-built or damaged trees and is
/// reported by the well-formedness pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Required<T>(Option<Box<T>>);

impl<T> Required<T> {
    pub fn new(node: T) -> Self {
        Self(Some(Box::new(node)))
    }

    pub fn missing() -> Self {
        Self(None)
    }

    pub fn get(&self) -> Option<&T> {
        self.0.as_deref()
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }
}

impl<T> From<T> for Required<T> {
    fn from(node: T) -> Self {
        Self::new(node)
    }
}

/// Identifier spelling.
pub type Ident = String;

/// A required expression child.
pub type RequiredExpr = Required<Located<Expr>>;

/// A sequence of statements.
///
/// The whole unit is a block, and so is the body of every compound construct.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Located<Statement>>,
    pub location: Location,
}

impl Block {
    pub fn new(statements: Vec<Located<Statement>>, location: Location) -> Self {
        Self {
            statements,
            location,
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `import a.b.c`
    Import(ImportStmt),
    /// Expression evaluated for its effect
    Expression(RequiredExpr),
    /// `if c ... {elseif c ...} [else ...] end`
    If(IfStmt),
    /// `case v {when c then ...} [else ...] end`
    Case(CaseStmt),
    /// `while c do ... end`
    While(WhileStmt),
    /// `for init, cond, step do ... end`
    For(ForStmt),
    /// `foreach x in coll do ... end`
    Foreach(ForeachStmt),
    /// `break` - exit the innermost loop
    Break,
    /// `next` - continue with the next iteration
    Next,
    /// `return [expr]`
    Return(Option<Box<Located<Expr>>>),
}

impl Statement {
    /// Human-readable node name used in notes.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Import(_) => "import statement",
            Statement::Expression(_) => "expression statement",
            Statement::If(_) => "if statement",
            Statement::Case(_) => "case statement",
            Statement::While(_) => "while statement",
            Statement::For(_) => "for statement",
            Statement::Foreach(_) => "foreach statement",
            Statement::Break => "break statement",
            Statement::Next => "next statement",
            Statement::Return(_) => "return statement",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportStmt {
    /// Dotted path segments, outermost first.
    pub path: Vec<Ident>,
}

impl ImportStmt {
    /// Name the import binds in the current scope (its last segment).
    pub fn binding(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: RequiredExpr,
    pub then_body: Required<Block>,
    pub elseif_branches: Vec<ElseIfBranch>,
    pub else_body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseIfBranch {
    pub condition: RequiredExpr,
    pub body: Required<Block>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseStmt {
    pub subject: RequiredExpr,
    pub whens: Vec<WhenClause>,
    pub else_body: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhenClause {
    pub condition: RequiredExpr,
    pub body: Required<Block>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: RequiredExpr,
    pub body: Required<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: RequiredExpr,
    pub condition: RequiredExpr,
    pub step: RequiredExpr,
    pub body: Required<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeachStmt {
    pub variable: Located<Ident>,
    pub collection: RequiredExpr,
    pub body: Required<Block>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Primaries
    Identifier(Ident),
    Nil,
    Bool(bool),
    Integer(i64),
    Real(f64),
    String(String),
    This,
    Array(ArrayLiteral),
    Hash(HashLiteral),
    Routine(RoutineLiteral),
    Class(ClassLiteral),
    Package(PackageLiteral),
    Parenthesized(RequiredExpr),

    // Postfix
    Index(IndexExpr),
    Call(CallExpr),
    Member(MemberExpr),

    // Operators, tightest first
    Unary(UnaryExpr),
    Multiplicative(BinaryExpr),
    Additive(BinaryExpr),
    Shift(BinaryExpr),
    BitwiseAnd(BinaryExpr),
    BitwiseOr(BinaryExpr),
    Relational(BinaryExpr),
    Equality(BinaryExpr),
    LogicalAnd(BinaryExpr),
    LogicalOr(BinaryExpr),
    Assignment(AssignmentExpr),
}

impl Expr {
    /// Wrap a binary expression in the variant for its precedence level.
    pub fn binary(level: BinaryLevel, expr: BinaryExpr) -> Expr {
        match level {
            BinaryLevel::Multiplicative => Expr::Multiplicative(expr),
            BinaryLevel::Additive => Expr::Additive(expr),
            BinaryLevel::Shift => Expr::Shift(expr),
            BinaryLevel::BitwiseAnd => Expr::BitwiseAnd(expr),
            BinaryLevel::BitwiseOr => Expr::BitwiseOr(expr),
            BinaryLevel::Relational => Expr::Relational(expr),
            BinaryLevel::Equality => Expr::Equality(expr),
            BinaryLevel::LogicalAnd => Expr::LogicalAnd(expr),
            BinaryLevel::LogicalOr => Expr::LogicalOr(expr),
        }
    }

    /// Precedence level and operands of a binary expression.
    pub fn as_binary(&self) -> Option<(BinaryLevel, &BinaryExpr)> {
        match self {
            Expr::Multiplicative(b) => Some((BinaryLevel::Multiplicative, b)),
            Expr::Additive(b) => Some((BinaryLevel::Additive, b)),
            Expr::Shift(b) => Some((BinaryLevel::Shift, b)),
            Expr::BitwiseAnd(b) => Some((BinaryLevel::BitwiseAnd, b)),
            Expr::BitwiseOr(b) => Some((BinaryLevel::BitwiseOr, b)),
            Expr::Relational(b) => Some((BinaryLevel::Relational, b)),
            Expr::Equality(b) => Some((BinaryLevel::Equality, b)),
            Expr::LogicalAnd(b) => Some((BinaryLevel::LogicalAnd, b)),
            Expr::LogicalOr(b) => Some((BinaryLevel::LogicalOr, b)),
            _ => None,
        }
    }

    /// Whether this expression may appear on the left of `=`.
    pub fn is_assignable(&self) -> bool {
        matches!(self, Expr::Identifier(_) | Expr::Member(_) | Expr::Index(_))
    }

    /// Human-readable node name used in notes.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Identifier(_) => "identifier",
            Expr::Nil => "nil literal",
            Expr::Bool(_) => "bool literal",
            Expr::Integer(_) => "integer literal",
            Expr::Real(_) => "real literal",
            Expr::String(_) => "string literal",
            Expr::This => "this",
            Expr::Array(_) => "array literal",
            Expr::Hash(_) => "hash literal",
            Expr::Routine(_) => "routine literal",
            Expr::Class(_) => "class literal",
            Expr::Package(_) => "package literal",
            Expr::Parenthesized(_) => "parenthesized expression",
            Expr::Index(_) => "index expression",
            Expr::Call(_) => "call expression",
            Expr::Member(_) => "member expression",
            Expr::Unary(_) => "unary expression",
            Expr::Multiplicative(_) => "multiplicative expression",
            Expr::Additive(_) => "additive expression",
            Expr::Shift(_) => "shift expression",
            Expr::BitwiseAnd(_) => "bitwise-and expression",
            Expr::BitwiseOr(_) => "bitwise-or expression",
            Expr::Relational(_) => "relational expression",
            Expr::Equality(_) => "equality expression",
            Expr::LogicalAnd(_) => "logical-and expression",
            Expr::LogicalOr(_) => "logical-or expression",
            Expr::Assignment(_) => "assignment",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub elements: Vec<Located<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashLiteral {
    pub pairs: Vec<HashPair>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: RequiredExpr,
    pub value: RequiredExpr,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutineLiteral {
    pub parameters: Vec<Located<Parameter>>,
    pub body: Required<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassLiteral {
    pub name: Ident,
    pub parameters: Vec<Located<Parameter>>,
    pub base: Option<BaseClass>,
    /// Mixed-in packages (`include P, Q`).
    pub includes: Vec<Located<Ident>>,
    /// The leading (implicitly public) section followed by any `public`/`private` sections.
    pub sections: Vec<ClassSection>,
}

/// `: Base(args)` clause of a class literal.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseClass {
    pub name: Located<Ident>,
    pub arguments: Vec<Located<Expr>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Public,
    Private,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Public => write!(f, "public"),
            Access::Private => write!(f, "private"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassSection {
    pub access: Access,
    pub body: Required<Block>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageLiteral {
    pub name: Ident,
    pub body: Required<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub object: RequiredExpr,
    pub index: RequiredExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: RequiredExpr,
    pub arguments: Vec<Located<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: RequiredExpr,
    pub name: Ident,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: OperatorId,
    pub operand: RequiredExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: OperatorId,
    pub left: RequiredExpr,
    pub right: RequiredExpr,
}

impl BinaryExpr {
    pub fn new(op: OperatorId, left: Located<Expr>, right: Located<Expr>) -> Self {
        Self {
            op,
            left: Required::new(left),
            right: Required::new(right),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub target: RequiredExpr,
    pub value: RequiredExpr,
}

// ============================================================================
// Parameters
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    /// `name [= default]`
    Value(ValueParameter),
    /// `out name`
    Output(OutputParameter),
}

impl Parameter {
    pub fn name(&self) -> &str {
        match self {
            Parameter::Value(p) => &p.name,
            Parameter::Output(p) => &p.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueParameter {
    pub name: Ident,
    pub default: Option<Box<Located<Expr>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputParameter {
    pub name: Ident,
}

// ============================================================================
// Visitor protocol
// ============================================================================

/// One analysis pass over the tree.
///
/// Every node variant has exactly one method and none of them have a default, so adding a variant
/// breaks every pass until it handles the new node. A method returns `true` when the subtree
/// passed; passes combine sibling results with logical AND and still visit every sibling, so one
/// run reports as many problems as possible.
///
/// The [`walk`] functions implement the usual descent into children and can be called from any
/// method that has nothing node-specific to do.
pub trait Visitor {
    /// Called for every [`Required`] slot that is empty.
    fn missing_child(&mut self, node: &'static str, field: &'static str, location: Location) -> bool;

    fn visit_block(&mut self, block: &Block) -> bool;

    // Statements
    fn visit_import(&mut self, stmt: &ImportStmt, location: Location) -> bool;
    fn visit_expression_statement(&mut self, expr: &RequiredExpr, location: Location) -> bool;
    fn visit_if(&mut self, stmt: &IfStmt, location: Location) -> bool;
    fn visit_case(&mut self, stmt: &CaseStmt, location: Location) -> bool;
    fn visit_while(&mut self, stmt: &WhileStmt, location: Location) -> bool;
    fn visit_for(&mut self, stmt: &ForStmt, location: Location) -> bool;
    fn visit_foreach(&mut self, stmt: &ForeachStmt, location: Location) -> bool;
    fn visit_break(&mut self, location: Location) -> bool;
    fn visit_next(&mut self, location: Location) -> bool;
    fn visit_return(&mut self, value: Option<&Located<Expr>>, location: Location) -> bool;

    // Primaries
    fn visit_identifier(&mut self, name: &str, location: Location) -> bool;
    fn visit_nil(&mut self, location: Location) -> bool;
    fn visit_bool(&mut self, value: bool, location: Location) -> bool;
    fn visit_integer(&mut self, value: i64, location: Location) -> bool;
    fn visit_real(&mut self, value: f64, location: Location) -> bool;
    fn visit_string(&mut self, value: &str, location: Location) -> bool;
    fn visit_this(&mut self, location: Location) -> bool;
    fn visit_array(&mut self, array: &ArrayLiteral, location: Location) -> bool;
    fn visit_hash(&mut self, hash: &HashLiteral, location: Location) -> bool;
    fn visit_routine(&mut self, routine: &RoutineLiteral, location: Location) -> bool;
    fn visit_class(&mut self, class: &ClassLiteral, location: Location) -> bool;
    fn visit_package(&mut self, package: &PackageLiteral, location: Location) -> bool;
    fn visit_parenthesized(&mut self, inner: &RequiredExpr, location: Location) -> bool;

    // Postfix
    fn visit_index(&mut self, expr: &IndexExpr, location: Location) -> bool;
    fn visit_call(&mut self, expr: &CallExpr, location: Location) -> bool;
    fn visit_member(&mut self, expr: &MemberExpr, location: Location) -> bool;

    // Operators
    fn visit_unary(&mut self, expr: &UnaryExpr, location: Location) -> bool;
    fn visit_multiplicative(&mut self, expr: &BinaryExpr, location: Location) -> bool;
    fn visit_additive(&mut self, expr: &BinaryExpr, location: Location) -> bool;
    fn visit_shift(&mut self, expr: &BinaryExpr, location: Location) -> bool;
    fn visit_bitwise_and(&mut self, expr: &BinaryExpr, location: Location) -> bool;
    fn visit_bitwise_or(&mut self, expr: &BinaryExpr, location: Location) -> bool;
    fn visit_relational(&mut self, expr: &BinaryExpr, location: Location) -> bool;
    fn visit_equality(&mut self, expr: &BinaryExpr, location: Location) -> bool;
    fn visit_logical_and(&mut self, expr: &BinaryExpr, location: Location) -> bool;
    fn visit_logical_or(&mut self, expr: &BinaryExpr, location: Location) -> bool;
    fn visit_assignment(&mut self, expr: &AssignmentExpr, location: Location) -> bool;

    // Parameters
    fn visit_value_parameter(&mut self, param: &ValueParameter, location: Location) -> bool;
    fn visit_output_parameter(&mut self, param: &OutputParameter, location: Location) -> bool;
}

/// A tree node that can dispatch itself to a [`Visitor`].
pub trait Node {
    fn location(&self) -> Location;
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> bool;
}

impl Node for Block {
    fn location(&self) -> Location {
        self.location
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> bool {
        visitor.visit_block(self)
    }
}

impl Node for Located<Statement> {
    fn location(&self) -> Location {
        self.location
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> bool {
        let at = self.location;
        match &self.node {
            Statement::Import(s) => visitor.visit_import(s, at),
            Statement::Expression(e) => visitor.visit_expression_statement(e, at),
            Statement::If(s) => visitor.visit_if(s, at),
            Statement::Case(s) => visitor.visit_case(s, at),
            Statement::While(s) => visitor.visit_while(s, at),
            Statement::For(s) => visitor.visit_for(s, at),
            Statement::Foreach(s) => visitor.visit_foreach(s, at),
            Statement::Break => visitor.visit_break(at),
            Statement::Next => visitor.visit_next(at),
            Statement::Return(value) => visitor.visit_return(value.as_deref(), at),
        }
    }
}

impl Node for Located<Expr> {
    fn location(&self) -> Location {
        self.location
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> bool {
        let at = self.location;
        match &self.node {
            Expr::Identifier(name) => visitor.visit_identifier(name, at),
            Expr::Nil => visitor.visit_nil(at),
            Expr::Bool(b) => visitor.visit_bool(*b, at),
            Expr::Integer(i) => visitor.visit_integer(*i, at),
            Expr::Real(r) => visitor.visit_real(*r, at),
            Expr::String(s) => visitor.visit_string(s, at),
            Expr::This => visitor.visit_this(at),
            Expr::Array(a) => visitor.visit_array(a, at),
            Expr::Hash(h) => visitor.visit_hash(h, at),
            Expr::Routine(r) => visitor.visit_routine(r, at),
            Expr::Class(c) => visitor.visit_class(c, at),
            Expr::Package(p) => visitor.visit_package(p, at),
            Expr::Parenthesized(inner) => visitor.visit_parenthesized(inner, at),
            Expr::Index(e) => visitor.visit_index(e, at),
            Expr::Call(e) => visitor.visit_call(e, at),
            Expr::Member(e) => visitor.visit_member(e, at),
            Expr::Unary(e) => visitor.visit_unary(e, at),
            Expr::Multiplicative(e) => visitor.visit_multiplicative(e, at),
            Expr::Additive(e) => visitor.visit_additive(e, at),
            Expr::Shift(e) => visitor.visit_shift(e, at),
            Expr::BitwiseAnd(e) => visitor.visit_bitwise_and(e, at),
            Expr::BitwiseOr(e) => visitor.visit_bitwise_or(e, at),
            Expr::Relational(e) => visitor.visit_relational(e, at),
            Expr::Equality(e) => visitor.visit_equality(e, at),
            Expr::LogicalAnd(e) => visitor.visit_logical_and(e, at),
            Expr::LogicalOr(e) => visitor.visit_logical_or(e, at),
            Expr::Assignment(e) => visitor.visit_assignment(e, at),
        }
    }
}

impl Node for Located<Parameter> {
    fn location(&self) -> Location {
        self.location
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> bool {
        match &self.node {
            Parameter::Value(p) => visitor.visit_value_parameter(p, self.location),
            Parameter::Output(p) => visitor.visit_output_parameter(p, self.location),
        }
    }
}

/// Default descent into each node's children.
///
/// Every function visits all children (it does not stop at the first failure) and returns the
/// AND of their results. Empty [`Required`] slots are routed to [`Visitor::missing_child`].
pub mod walk {
    use super::*;

    pub fn expr<V: Visitor + ?Sized>(
        visitor: &mut V,
        slot: &RequiredExpr,
        node: &'static str,
        field: &'static str,
        location: Location,
    ) -> bool {
        match slot.get() {
            Some(e) => e.accept(visitor),
            None => visitor.missing_child(node, field, location),
        }
    }

    pub fn body<V: Visitor + ?Sized>(
        visitor: &mut V,
        slot: &Required<Block>,
        node: &'static str,
        location: Location,
    ) -> bool {
        match slot.get() {
            Some(b) => b.accept(visitor),
            None => visitor.missing_child(node, "body", location),
        }
    }

    pub fn exprs<V: Visitor + ?Sized>(visitor: &mut V, list: &[Located<Expr>]) -> bool {
        let mut ok = true;
        for e in list {
            ok &= e.accept(visitor);
        }
        ok
    }

    pub fn parameters<V: Visitor + ?Sized>(visitor: &mut V, list: &[Located<Parameter>]) -> bool {
        let mut ok = true;
        for p in list {
            ok &= p.accept(visitor);
        }
        ok
    }

    pub fn block<V: Visitor + ?Sized>(visitor: &mut V, block: &Block) -> bool {
        let mut ok = true;
        for stmt in &block.statements {
            ok &= stmt.accept(visitor);
        }
        ok
    }

    pub fn expression_statement<V: Visitor + ?Sized>(
        visitor: &mut V,
        slot: &RequiredExpr,
        location: Location,
    ) -> bool {
        expr(visitor, slot, "expression statement", "expression", location)
    }

    pub fn if_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &IfStmt, location: Location) -> bool {
        let mut ok = expr(visitor, &stmt.condition, "if statement", "condition", location);
        ok &= body(visitor, &stmt.then_body, "if statement", location);
        for branch in &stmt.elseif_branches {
            ok &= expr(visitor, &branch.condition, "elseif branch", "condition", branch.location);
            ok &= body(visitor, &branch.body, "elseif branch", branch.location);
        }
        if let Some(else_body) = &stmt.else_body {
            ok &= else_body.accept(visitor);
        }
        ok
    }

    pub fn case_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &CaseStmt, location: Location) -> bool {
        let mut ok = expr(visitor, &stmt.subject, "case statement", "subject", location);
        for when in &stmt.whens {
            ok &= expr(visitor, &when.condition, "when clause", "condition", when.location);
            ok &= body(visitor, &when.body, "when clause", when.location);
        }
        if let Some(else_body) = &stmt.else_body {
            ok &= else_body.accept(visitor);
        }
        ok
    }

    pub fn while_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &WhileStmt, location: Location) -> bool {
        let mut ok = expr(visitor, &stmt.condition, "while statement", "condition", location);
        ok &= body(visitor, &stmt.body, "while statement", location);
        ok
    }

    pub fn for_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &ForStmt, location: Location) -> bool {
        let mut ok = expr(visitor, &stmt.init, "for statement", "initializer", location);
        ok &= expr(visitor, &stmt.condition, "for statement", "condition", location);
        ok &= expr(visitor, &stmt.step, "for statement", "step", location);
        ok &= body(visitor, &stmt.body, "for statement", location);
        ok
    }

    /// Collection then body; binding the loop variable is up to the pass.
    pub fn foreach_stmt<V: Visitor + ?Sized>(
        visitor: &mut V,
        stmt: &ForeachStmt,
        location: Location,
    ) -> bool {
        let mut ok = expr(visitor, &stmt.collection, "foreach statement", "collection", location);
        ok &= body(visitor, &stmt.body, "foreach statement", location);
        ok
    }

    pub fn return_stmt<V: Visitor + ?Sized>(visitor: &mut V, value: Option<&Located<Expr>>) -> bool {
        value.is_none_or(|v| v.accept(visitor))
    }

    pub fn array<V: Visitor + ?Sized>(visitor: &mut V, array: &ArrayLiteral) -> bool {
        exprs(visitor, &array.elements)
    }

    pub fn hash<V: Visitor + ?Sized>(visitor: &mut V, hash: &HashLiteral) -> bool {
        let mut ok = true;
        for pair in &hash.pairs {
            ok &= expr(visitor, &pair.key, "hash pair", "key", pair.location);
            ok &= expr(visitor, &pair.value, "hash pair", "value", pair.location);
        }
        ok
    }

    pub fn routine<V: Visitor + ?Sized>(
        visitor: &mut V,
        routine: &RoutineLiteral,
        location: Location,
    ) -> bool {
        let mut ok = parameters(visitor, &routine.parameters);
        ok &= body(visitor, &routine.body, "routine literal", location);
        ok
    }

    /// Base arguments, parameters, then every section.
    pub fn class<V: Visitor + ?Sized>(visitor: &mut V, class: &ClassLiteral) -> bool {
        let mut ok = true;
        if let Some(base) = &class.base {
            ok &= exprs(visitor, &base.arguments);
        }
        ok &= parameters(visitor, &class.parameters);
        ok &= sections(visitor, &class.sections);
        ok
    }

    pub fn sections<V: Visitor + ?Sized>(visitor: &mut V, sections: &[ClassSection]) -> bool {
        let mut ok = true;
        for section in sections {
            ok &= body(visitor, &section.body, "class section", section.location);
        }
        ok
    }

    pub fn package<V: Visitor + ?Sized>(
        visitor: &mut V,
        package: &PackageLiteral,
        location: Location,
    ) -> bool {
        body(visitor, &package.body, "package literal", location)
    }

    pub fn parenthesized<V: Visitor + ?Sized>(
        visitor: &mut V,
        inner: &RequiredExpr,
        location: Location,
    ) -> bool {
        expr(visitor, inner, "parenthesized expression", "inner expression", location)
    }

    pub fn index<V: Visitor + ?Sized>(visitor: &mut V, e: &IndexExpr, location: Location) -> bool {
        let mut ok = expr(visitor, &e.object, "index expression", "object", location);
        ok &= expr(visitor, &e.index, "index expression", "index", location);
        ok
    }

    pub fn call<V: Visitor + ?Sized>(visitor: &mut V, e: &CallExpr, location: Location) -> bool {
        let mut ok = expr(visitor, &e.callee, "call expression", "callee", location);
        ok &= exprs(visitor, &e.arguments);
        ok
    }

    /// Only the object; the member name is not a variable reference.
    pub fn member<V: Visitor + ?Sized>(visitor: &mut V, e: &MemberExpr, location: Location) -> bool {
        expr(visitor, &e.object, "member expression", "object", location)
    }

    pub fn unary<V: Visitor + ?Sized>(visitor: &mut V, e: &UnaryExpr, location: Location) -> bool {
        expr(visitor, &e.operand, "unary expression", "operand", location)
    }

    pub fn binary<V: Visitor + ?Sized>(
        visitor: &mut V,
        node: &'static str,
        e: &BinaryExpr,
        location: Location,
    ) -> bool {
        let mut ok = expr(visitor, &e.left, node, "left operand", location);
        ok &= expr(visitor, &e.right, node, "right operand", location);
        ok
    }

    pub fn assignment<V: Visitor + ?Sized>(
        visitor: &mut V,
        e: &AssignmentExpr,
        location: Location,
    ) -> bool {
        let mut ok = expr(visitor, &e.target, "assignment", "target", location);
        ok &= expr(visitor, &e.value, "assignment", "value", location);
        ok
    }

    pub fn value_parameter<V: Visitor + ?Sized>(visitor: &mut V, param: &ValueParameter) -> bool {
        param.default.as_deref().is_none_or(|d| d.accept(visitor))
    }
}

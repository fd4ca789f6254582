//! Structural validation: every required child is present.
//!
//! The parser never hands back a node with an empty [`Required`] slot, but trees can be built or
//! rewritten by other code. This pass runs before anything that would dereference those slots and
//! reports each empty one as `MissingChild` instead of letting a later stage trip over it.

use lark_core::diagnostics::DiagnosticCode;
use lark_syntax::ast::*;
use lark_syntax::diagnostics::{Diagnostics, Reported};

/// Check `unit` and report every missing required child.
#[tracing::instrument(skip_all, fields(unit = diagnostics.source_name()))]
pub fn check(unit: &Block, diagnostics: &mut Diagnostics) -> Result<(), Reported> {
    let mut checker = WellFormednessChecker::new(diagnostics);
    let ok = unit.accept(&mut checker);
    tracing::debug!(missing = checker.missing, "checked structure");
    if ok { Ok(()) } else { Err(Reported) }
}

pub struct WellFormednessChecker<'d> {
    diagnostics: &'d mut Diagnostics,
    missing: usize,
}

impl<'d> WellFormednessChecker<'d> {
    pub fn new(diagnostics: &'d mut Diagnostics) -> Self {
        Self {
            diagnostics,
            missing: 0,
        }
    }

    /// Number of empty slots found so far.
    pub fn missing(&self) -> usize {
        self.missing
    }
}

impl Visitor for WellFormednessChecker<'_> {
    fn missing_child(&mut self, node: &'static str, field: &'static str, location: Location) -> bool {
        self.missing += 1;
        self.diagnostics.error_with(
            location,
            DiagnosticCode::MissingChild,
            format!("{node} is missing its {field}"),
        );
        false
    }

    fn visit_block(&mut self, block: &Block) -> bool {
        walk::block(self, block)
    }

    fn visit_import(&mut self, _stmt: &ImportStmt, _location: Location) -> bool {
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
        walk::foreach_stmt(self, stmt, location)
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

    fn visit_identifier(&mut self, _name: &str, _location: Location) -> bool {
        true
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
        walk::routine(self, routine, location)
    }

    fn visit_class(&mut self, class: &ClassLiteral, _location: Location) -> bool {
        walk::class(self, class)
    }

    fn visit_package(&mut self, package: &PackageLiteral, location: Location) -> bool {
        walk::package(self, package, location)
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
        walk::assignment(self, expr, location)
    }

    fn visit_value_parameter(&mut self, param: &ValueParameter, _location: Location) -> bool {
        walk::value_parameter(self, param)
    }

    fn visit_output_parameter(&mut self, _param: &OutputParameter, _location: Location) -> bool {
        true
    }
}

//! Static checking.
//!
//! The checker walks the unit with the same shape as the well-formedness pass: leaves pass,
//! composites AND their children, empty required slots fail. Lark has no type rules yet, so a
//! unit that got this far always passes unless a [`StatementRule`] is registered.
//!
//! Rules are consulted for every statement in every block, nested ones included, before the
//! statement itself is descended into.

use lark_core::diagnostics::DiagnosticCode;
use lark_syntax::ast::*;
use lark_syntax::diagnostics::{Diagnostics, Reported};

/// A check applied to each statement the static checker reaches.
pub trait StatementRule {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Return `false` after reporting into `diagnostics` when the statement is rejected.
    fn check(&mut self, stmt: &Located<Statement>, diagnostics: &mut Diagnostics) -> bool;
}

/// Run the static checker with no rules.
#[tracing::instrument(skip_all, fields(unit = diagnostics.source_name()))]
pub fn check(unit: &Block, diagnostics: &mut Diagnostics) -> Result<(), Reported> {
    StaticChecker::new(diagnostics).run(unit)
}

/// Walks a unit, applying every registered [`StatementRule`] to each statement.
///
/// ## Examples
/// ```rust
/// use lark::ast::{Located, Statement};
/// use lark::diagnostics::Diagnostics;
/// use lark::static_check::{StatementRule, StaticChecker};
///
/// struct CountBreaks<'a>(&'a mut usize);
///
/// impl StatementRule for CountBreaks<'_> {
///     fn name(&self) -> &'static str {
///         "count-breaks"
///     }
///
///     fn check(&mut self, stmt: &Located<Statement>, _: &mut Diagnostics) -> bool {
///         if matches!(stmt.node, Statement::Break) {
///             *self.0 += 1;
///         }
///         true
///     }
/// }
///
/// let mut diags = Diagnostics::new("loop.lark");
/// let unit = lark::parser::parse_source("while true do break end", &mut diags).unwrap();
/// let mut breaks = 0;
/// StaticChecker::new(&mut diags).with_rule(CountBreaks(&mut breaks)).run(&unit).unwrap();
/// assert_eq!(breaks, 1);
/// ```
pub struct StaticChecker<'d> {
    diagnostics: &'d mut Diagnostics,
    rules: Vec<Box<dyn StatementRule + 'd>>,
}

impl<'d> StaticChecker<'d> {
    pub fn new(diagnostics: &'d mut Diagnostics) -> Self {
        Self {
            diagnostics,
            rules: Vec::new(),
        }
    }

    pub fn with_rule(mut self, rule: impl StatementRule + 'd) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn run(mut self, unit: &Block) -> Result<(), Reported> {
        let ok = unit.accept(&mut self);
        tracing::debug!(rules = self.rules.len(), ok, "static check finished");
        if ok { Ok(()) } else { Err(Reported) }
    }

    fn apply_rules(&mut self, stmt: &Located<Statement>) -> bool {
        let mut ok = true;
        for rule in self.rules.iter_mut() {
            let passed = rule.check(stmt, self.diagnostics);
            if !passed {
                tracing::trace!(rule = rule.name(), kind = stmt.node.kind_name(), "rule rejected statement");
            }
            ok &= passed;
        }
        ok
    }
}

impl Visitor for StaticChecker<'_> {
    fn missing_child(&mut self, node: &'static str, field: &'static str, location: Location) -> bool {
        self.diagnostics.error_with(
            location,
            DiagnosticCode::MissingChild,
            format!("{node} is missing its {field}"),
        );
        false
    }

    fn visit_block(&mut self, block: &Block) -> bool {
        let mut ok = true;
        for stmt in &block.statements {
            ok &= self.apply_rules(stmt);
            ok &= stmt.accept(self);
        }
        ok
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

#[cfg(test)]
mod tests {
    use super::*;
    use lark_syntax::parser;

    fn parse(source: &str) -> (Block, Diagnostics) {
        let mut diags = Diagnostics::new("static.lark");
        let unit = parser::parse_source(source, &mut diags).expect("parse failed");
        (unit, diags)
    }

    struct CountStatements<'a>(&'a mut Vec<&'static str>);

    impl StatementRule for CountStatements<'_> {
        fn name(&self) -> &'static str {
            "count"
        }

        fn check(&mut self, stmt: &Located<Statement>, _diagnostics: &mut Diagnostics) -> bool {
            self.0.push(stmt.node.kind_name());
            true
        }
    }

    struct NoBreak;

    impl StatementRule for NoBreak {
        fn name(&self) -> &'static str {
            "no-break"
        }

        fn check(&mut self, stmt: &Located<Statement>, diagnostics: &mut Diagnostics) -> bool {
            if matches!(stmt.node, Statement::Break) {
                diagnostics.error_with(stmt.location, DiagnosticCode::MissingChild, "break is not allowed here");
                return false;
            }
            true
        }
    }

    #[test]
    fn scaffold_accepts_any_complete_tree() {
        let (unit, mut diags) = parse("x = 1\nwhile x < 3 do x = x + 1 end");
        assert_eq!(check(&unit, &mut diags), Ok(()));
        assert!(diags.is_empty());
    }

    #[test]
    fn rules_see_nested_statements() {
        let (unit, mut diags) = parse("f = routine() while true do break end end\nreturn f");
        let mut seen = Vec::new();
        let result = StaticChecker::new(&mut diags)
            .with_rule(CountStatements(&mut seen))
            .run(&unit);
        assert_eq!(result, Ok(()));
        assert_eq!(seen, vec![
            "expression statement",
            "while statement",
            "break statement",
            "return statement",
        ]);
    }

    #[test]
    fn a_rejecting_rule_fails_the_unit_but_traversal_continues() {
        let (unit, mut diags) = parse("while true do break end\nforeach x in [] do break end");
        let result = StaticChecker::new(&mut diags).with_rule(NoBreak).run(&unit);
        assert_eq!(result, Err(Reported));
        assert_eq!(diags.error_count(), 2);
    }

    #[test]
    fn missing_child_fails() {
        let unit = Block::new(
            vec![Located::new(Statement::Expression(Required::missing()), Location::START)],
            Location::START,
        );
        let mut diags = Diagnostics::new("hand.lark");
        assert_eq!(check(&unit, &mut diags), Err(Reported));
        assert_eq!(diags.codes(), vec![DiagnosticCode::MissingChild]);
    }
}

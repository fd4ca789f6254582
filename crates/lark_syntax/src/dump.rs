//! Compact S-expression rendering of a syntax tree.
//!
//! Used by `lark --parse` and by snapshot tests. Each top-level statement of the unit is rendered
//! on its own line; everything below that is rendered inline:
//!
//! ```text
//! (assign total (additive + 1 (multiplicative * 2 3)))
//! (if (relational < total 10) (block (call print total)))
//! ```
//!
//! Identifiers and literals render bare (strings re-quoted), empty required slots as `<missing>`.

use lark_core::lang::operators;

use crate::ast::*;
use crate::scanner::quote;

/// Render a whole unit, one top-level statement per line.
pub fn dump(unit: &Block) -> String {
    unit.statements
        .iter()
        .map(dump_node)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a single node inline.
pub fn dump_node<N: Node>(node: &N) -> String {
    let mut printer = Printer::default();
    node.accept(&mut printer);
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
}

impl Printer {
    fn open(&mut self, head: &str) {
        self.out.push('(');
        self.out.push_str(head);
    }

    fn close(&mut self) -> bool {
        self.out.push(')');
        true
    }

    fn atom(&mut self, text: &str) -> bool {
        self.out.push_str(text);
        true
    }

    fn space(&mut self) {
        self.out.push(' ');
    }

    fn slot(&mut self, slot: &RequiredExpr) {
        self.space();
        match slot.get() {
            Some(e) => {
                e.accept(self);
            }
            None => {
                self.out.push_str("<missing>");
            }
        }
    }

    fn body(&mut self, slot: &Required<Block>) {
        self.space();
        match slot.get() {
            Some(b) => {
                b.accept(self);
            }
            None => {
                self.out.push_str("<missing>");
            }
        }
    }

    fn list(&mut self, items: &[Located<Expr>]) {
        for item in items {
            self.space();
            item.accept(self);
        }
    }

    fn tagged_block(&mut self, tag: &str, block: &Block) {
        self.space();
        self.open(tag);
        self.space();
        block.accept(self);
        self.close();
    }

    fn params(&mut self, params: &[Located<Parameter>]) {
        self.space();
        self.open("params");
        for p in params {
            self.space();
            p.accept(self);
        }
        self.close();
    }

    fn binary(&mut self, level: &str, e: &BinaryExpr) -> bool {
        self.open(level);
        self.space();
        self.out.push_str(operators::as_str(e.op));
        self.slot(&e.left);
        self.slot(&e.right);
        self.close()
    }
}

impl Visitor for Printer {
    fn missing_child(&mut self, _node: &'static str, _field: &'static str, _location: Location) -> bool {
        self.atom("<missing>")
    }

    fn visit_block(&mut self, block: &Block) -> bool {
        self.open("block");
        for stmt in &block.statements {
            self.space();
            stmt.accept(self);
        }
        self.close()
    }

    fn visit_import(&mut self, stmt: &ImportStmt, _location: Location) -> bool {
        self.open("import ");
        self.out.push_str(&stmt.path.join("."));
        self.close()
    }

    fn visit_expression_statement(&mut self, expr: &RequiredExpr, _location: Location) -> bool {
        match expr.get() {
            Some(e) => e.accept(self),
            None => self.atom("<missing>"),
        }
    }

    fn visit_if(&mut self, stmt: &IfStmt, _location: Location) -> bool {
        self.open("if");
        self.slot(&stmt.condition);
        self.body(&stmt.then_body);
        for branch in &stmt.elseif_branches {
            self.space();
            self.open("elseif");
            self.slot(&branch.condition);
            self.body(&branch.body);
            self.close();
        }
        if let Some(else_body) = &stmt.else_body {
            self.tagged_block("else", else_body);
        }
        self.close()
    }

    fn visit_case(&mut self, stmt: &CaseStmt, _location: Location) -> bool {
        self.open("case");
        self.slot(&stmt.subject);
        for when in &stmt.whens {
            self.space();
            self.open("when");
            self.slot(&when.condition);
            self.body(&when.body);
            self.close();
        }
        if let Some(else_body) = &stmt.else_body {
            self.tagged_block("else", else_body);
        }
        self.close()
    }

    fn visit_while(&mut self, stmt: &WhileStmt, _location: Location) -> bool {
        self.open("while");
        self.slot(&stmt.condition);
        self.body(&stmt.body);
        self.close()
    }

    fn visit_for(&mut self, stmt: &ForStmt, _location: Location) -> bool {
        self.open("for");
        self.slot(&stmt.init);
        self.slot(&stmt.condition);
        self.slot(&stmt.step);
        self.body(&stmt.body);
        self.close()
    }

    fn visit_foreach(&mut self, stmt: &ForeachStmt, _location: Location) -> bool {
        self.open("foreach ");
        self.out.push_str(&stmt.variable.node);
        self.slot(&stmt.collection);
        self.body(&stmt.body);
        self.close()
    }

    fn visit_break(&mut self, _location: Location) -> bool {
        self.atom("(break)")
    }

    fn visit_next(&mut self, _location: Location) -> bool {
        self.atom("(next)")
    }

    fn visit_return(&mut self, value: Option<&Located<Expr>>, _location: Location) -> bool {
        self.open("return");
        if let Some(v) = value {
            self.space();
            v.accept(self);
        }
        self.close()
    }

    fn visit_identifier(&mut self, name: &str, _location: Location) -> bool {
        self.atom(name)
    }

    fn visit_nil(&mut self, _location: Location) -> bool {
        self.atom("nil")
    }

    fn visit_bool(&mut self, value: bool, _location: Location) -> bool {
        self.atom(if value { "true" } else { "false" })
    }

    fn visit_integer(&mut self, value: i64, _location: Location) -> bool {
        self.atom(&value.to_string())
    }

    fn visit_real(&mut self, value: f64, _location: Location) -> bool {
        self.atom(&format!("{:?}", value))
    }

    fn visit_string(&mut self, value: &str, _location: Location) -> bool {
        self.atom(&quote(value))
    }

    fn visit_this(&mut self, _location: Location) -> bool {
        self.atom("this")
    }

    fn visit_array(&mut self, array: &ArrayLiteral, _location: Location) -> bool {
        self.open("array");
        self.list(&array.elements);
        self.close()
    }

    fn visit_hash(&mut self, hash: &HashLiteral, _location: Location) -> bool {
        self.open("hash");
        for pair in &hash.pairs {
            self.space();
            self.open("pair");
            self.slot(&pair.key);
            self.slot(&pair.value);
            self.close();
        }
        self.close()
    }

    fn visit_routine(&mut self, routine: &RoutineLiteral, _location: Location) -> bool {
        self.open("routine");
        self.params(&routine.parameters);
        self.body(&routine.body);
        self.close()
    }

    fn visit_class(&mut self, class: &ClassLiteral, _location: Location) -> bool {
        self.open("class ");
        self.out.push_str(&class.name);
        self.params(&class.parameters);
        if let Some(base) = &class.base {
            self.space();
            self.open("base ");
            self.out.push_str(&base.name.node);
            self.list(&base.arguments);
            self.close();
        }
        if !class.includes.is_empty() {
            self.space();
            self.open("include");
            for name in &class.includes {
                self.space();
                self.out.push_str(&name.node);
            }
            self.close();
        }
        for section in &class.sections {
            self.space();
            self.open(&section.access.to_string());
            self.body(&section.body);
            self.close();
        }
        self.close()
    }

    fn visit_package(&mut self, package: &PackageLiteral, _location: Location) -> bool {
        self.open("package ");
        self.out.push_str(&package.name);
        self.body(&package.body);
        self.close()
    }

    fn visit_parenthesized(&mut self, inner: &RequiredExpr, _location: Location) -> bool {
        self.open("paren");
        self.slot(inner);
        self.close()
    }

    fn visit_index(&mut self, expr: &IndexExpr, _location: Location) -> bool {
        self.open("index");
        self.slot(&expr.object);
        self.slot(&expr.index);
        self.close()
    }

    fn visit_call(&mut self, expr: &CallExpr, _location: Location) -> bool {
        self.open("call");
        self.slot(&expr.callee);
        self.list(&expr.arguments);
        self.close()
    }

    fn visit_member(&mut self, expr: &MemberExpr, _location: Location) -> bool {
        self.open("member");
        self.slot(&expr.object);
        self.space();
        self.out.push_str(&expr.name);
        self.close()
    }

    fn visit_unary(&mut self, expr: &UnaryExpr, _location: Location) -> bool {
        self.open("unary ");
        self.out.push_str(operators::as_str(expr.op));
        self.slot(&expr.operand);
        self.close()
    }

    fn visit_multiplicative(&mut self, expr: &BinaryExpr, _location: Location) -> bool {
        self.binary("multiplicative", expr)
    }

    fn visit_additive(&mut self, expr: &BinaryExpr, _location: Location) -> bool {
        self.binary("additive", expr)
    }

    fn visit_shift(&mut self, expr: &BinaryExpr, _location: Location) -> bool {
        self.binary("shift", expr)
    }

    fn visit_bitwise_and(&mut self, expr: &BinaryExpr, _location: Location) -> bool {
        self.binary("bitwise-and", expr)
    }

    fn visit_bitwise_or(&mut self, expr: &BinaryExpr, _location: Location) -> bool {
        self.binary("bitwise-or", expr)
    }

    fn visit_relational(&mut self, expr: &BinaryExpr, _location: Location) -> bool {
        self.binary("relational", expr)
    }

    fn visit_equality(&mut self, expr: &BinaryExpr, _location: Location) -> bool {
        self.binary("equality", expr)
    }

    fn visit_logical_and(&mut self, expr: &BinaryExpr, _location: Location) -> bool {
        self.binary("logical-and", expr)
    }

    fn visit_logical_or(&mut self, expr: &BinaryExpr, _location: Location) -> bool {
        self.binary("logical-or", expr)
    }

    fn visit_assignment(&mut self, expr: &AssignmentExpr, _location: Location) -> bool {
        self.open("assign");
        self.slot(&expr.target);
        self.slot(&expr.value);
        self.close()
    }

    fn visit_value_parameter(&mut self, param: &ValueParameter, _location: Location) -> bool {
        match &param.default {
            Some(default) => {
                self.open("default ");
                self.out.push_str(&param.name);
                self.space();
                default.accept(self);
                self.close()
            }
            None => self.atom(&param.name),
        }
    }

    fn visit_output_parameter(&mut self, param: &OutputParameter, _location: Location) -> bool {
        self.open("out ");
        self.out.push_str(&param.name);
        self.close()
    }
}

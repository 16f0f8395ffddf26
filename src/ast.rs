use crate::expr::{Expr, ExprVisitor};
use crate::literal::Literal;
use crate::stmt::{Stmt, StmtVisitor};

/// Returns a string representation of the expression in parentheses.
macro_rules! parenthesize {
    ( $self:ident, $name:expr, $( $x:expr ),+ ) => {
        {
            let mut string = String::new();
            string += "(";
            string += $name;
            $(
                string += " ";
                string += &$x.accept($self);
            )*
            string += ")";

            string
        }
    };
}

/// Renders statements and expressions as s-expressions.
/// This is the output of the `parse` command, one statement per line.
pub struct ASTPrinter;

impl ASTPrinter {
    /// Prints the statement using the visitor pattern.
    pub fn print_stmt(&mut self, stmt: &Stmt) -> String {
        stmt.accept(self)
    }

    /// Prints the expression using the visitor pattern.
    pub fn print_expr(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }
}

impl ExprVisitor<String> for ASTPrinter {
    fn visit_literal_expr(&mut self, expr: &Expr) -> String {
        let Expr::Literal(literal) = expr else { unreachable!() };

        // Numbers print with at least one fractional digit, like the
        // literal column of the tokenizer output.
        match literal {
            Literal::Number(number) if number.fract() == 0.0 => format!("{number:.1}"),
            literal => literal.to_string(),
        }
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) -> String {
        let Expr::Grouping(grouping) = expr else { unreachable!() };

        parenthesize!(self, "group", grouping.expr)
    }

    fn visit_unary_expr(&mut self, expr: &Expr) -> String {
        let Expr::Unary(unary) = expr else { unreachable!() };

        parenthesize!(self, &unary.operator.lexeme, unary.expr)
    }

    fn visit_binary_expr(&mut self, expr: &Expr) -> String {
        let Expr::Binary(binary) = expr else { unreachable!() };

        parenthesize!(self, &binary.operator.lexeme, binary.left, binary.right)
    }

    fn visit_logical_expr(&mut self, expr: &Expr) -> String {
        let Expr::Logical(logical) = expr else { unreachable!() };

        parenthesize!(self, &logical.operator.lexeme, logical.left, logical.right)
    }

    fn visit_variable_expr(&mut self, expr: &Expr) -> String {
        let Expr::Variable(variable) = expr else { unreachable!() };

        variable.name.lexeme.clone()
    }

    fn visit_assign_expr(&mut self, expr: &Expr) -> String {
        let Expr::Assign(assign) = expr else { unreachable!() };

        parenthesize!(self, format!("= {}", assign.name.lexeme).as_str(), assign.value)
    }

    fn visit_call_expr(&mut self, expr: &Expr) -> String {
        let Expr::Call(call) = expr else { unreachable!() };

        let mut string = String::new();
        string += "(call ";
        string += &call.callee.accept(self);
        for argument in &call.arguments {
            string += " ";
            string += &argument.accept(self);
        }
        string += ")";

        string
    }

    fn visit_get_expr(&mut self, expr: &Expr) -> String {
        let Expr::Get(get) = expr else { unreachable!() };

        let object = get.object.accept(self);
        format!("(. {object} {name})", name = get.name.lexeme)
    }

    fn visit_set_expr(&mut self, expr: &Expr) -> String {
        let Expr::Set(set) = expr else { unreachable!() };

        let object = set.object.accept(self);
        let value = set.value.accept(self);
        format!("(= (. {object} {name}) {value})", name = set.name.lexeme)
    }

    fn visit_this_expr(&mut self, expr: &Expr) -> String {
        let Expr::This(_) = expr else { unreachable!() };

        String::from("this")
    }

    fn visit_super_expr(&mut self, expr: &Expr) -> String {
        let Expr::Super(super_expr) = expr else { unreachable!() };

        format!("(super {})", super_expr.method.lexeme)
    }
}

impl StmtVisitor<String> for ASTPrinter {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Expression(data) = stmt else { unreachable!() };

        data.expr.accept(self)
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Print(data) = stmt else { unreachable!() };

        parenthesize!(self, "print", data.expr)
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Var(data) = stmt else { unreachable!() };

        match &data.initializer {
            Some(initializer) => parenthesize!(self, format!("var {}", data.name.lexeme).as_str(), initializer),
            None => format!("(var {})", data.name.lexeme),
        }
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Block(data) = stmt else { unreachable!() };

        let mut string = String::new();
        string += "(block";
        for statement in &data.statements {
            string += " ";
            string += &statement.accept(self);
        }
        string += ")";

        string
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::If(data) = stmt else { unreachable!() };

        match &data.else_branch {
            Some(else_branch) => parenthesize!(self, "if", data.condition, data.then_branch, else_branch),
            None => parenthesize!(self, "if", data.condition, data.then_branch),
        }
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::While(data) = stmt else { unreachable!() };

        parenthesize!(self, "while", data.condition, data.body)
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Function(data) = stmt else { unreachable!() };

        let params = data.params.iter()
            .map(|param| param.lexeme.clone())
            .collect::<Vec<String>>()
            .join(" ");

        let mut string = format!("(fun {} ({params})", data.name.lexeme);
        for statement in &data.body {
            string += " ";
            string += &statement.accept(self);
        }
        string += ")";

        string
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Return(data) = stmt else { unreachable!() };

        match &data.value {
            Some(value) => parenthesize!(self, "return", value),
            None => String::from("(return)"),
        }
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) -> String {
        let Stmt::Class(data) = stmt else { unreachable!() };

        let mut string = format!("(class {}", data.name.lexeme);
        if let Some(superclass) = &data.superclass {
            string += " < ";
            string += &superclass.accept(self);
        }
        for method in &data.methods {
            string += " ";
            string += &method.accept(self);
        }
        string += ")";

        string
    }
}

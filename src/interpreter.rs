use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{RuntimeError, Throw, Unwind};
use crate::expr::{Expr, ExprVisitor};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::{Token, Type};

/// Executes statements against a chain of environments.
///
/// The interpreter owns the global environment (preloaded with the native
/// functions), a pointer to the environment of the code currently running,
/// and the side table of scope distances written by the resolver. All program
/// output goes through the given writer so callers can capture it.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<usize, usize>,
    output: &'a mut dyn Write,
    repl: bool,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            let name = native.name.lexeme.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }

        Interpreter {
            globals: Rc::clone(&globals),
            environment: globals,
            locals: HashMap::new(),
            output,
            repl: false,
        }
    }

    /// Interprets a list of statements.
    /// In REPL mode, expression statements print their value.
    /// A runtime error stops execution and sets the runtime error flag.
    pub fn interpret(&mut self, statements: &[Stmt], repl: bool) {
        self.repl = repl;

        for statement in statements {
            if let Err(unwind) = self.execute(statement) {
                match unwind {
                    Unwind::Error(error) => {
                        error.throw();
                        return;
                    },
                    // The resolver rejects top-level returns.
                    Unwind::Return(_) => unreachable!(),
                }
            }
        }
    }

    /// Records the scope distance of a resolvable expression.
    /// Called by the resolver; expressions without an entry are globals.
    pub fn resolve(&mut self, id: usize, distance: usize) {
        self.locals.insert(id, distance);
    }

    /// Evaluates a single expression.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        expr.accept(self)
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        stmt.accept(self)
    }

    /// Executes statements in the given environment.
    /// The previous environment is restored on every exit, normal or
    /// unwinding.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> Result<(), Unwind> {
        let previous = mem::replace(&mut self.environment, environment);

        let mut result = Ok(());
        for statement in statements {
            result = self.execute(statement);
            if result.is_err() {
                break;
            }
        }

        self.environment = previous;
        result
    }

    /// Writes a line of program output.
    pub(crate) fn println(&mut self, text: &str) {
        writeln!(self.output, "{text}").expect("output stream to be writable");
    }

    fn look_up_variable(&self, id: usize, name: &Token) -> Result<Object, RuntimeError> {
        match self.locals.get(&id) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn number_operands(
        operator: &Token,
        left: &Object,
        right: &Object,
    ) -> Result<(f64, f64), RuntimeError> {
        match (left, right) {
            (Object::Literal(Literal::Number(left)), Object::Literal(Literal::Number(right))) => {
                Ok((*left, *right))
            },
            _ => Err(Self::numbers_error(operator)),
        }
    }

    fn numbers_error(operator: &Token) -> RuntimeError {
        RuntimeError {
            token: operator.clone(),
            message: "Operands must be numbers.".to_string(),
        }
    }
}

impl<'a> ExprVisitor<Result<Object, RuntimeError>> for Interpreter<'a> {
    fn visit_literal_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Literal(literal) = expr else { unreachable!() };

        Ok(Object::from(literal.clone()))
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Grouping(grouping) = expr else { unreachable!() };

        self.evaluate(&grouping.expr)
    }

    fn visit_unary_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Unary(unary) = expr else { unreachable!() };

        let right = self.evaluate(&unary.expr)?;

        match unary.operator.r#type {
            Type::Minus => (-right).ok_or_else(|| RuntimeError {
                token: unary.operator.clone(),
                message: "Operand must be a number.".to_string(),
            }),
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Binary(binary) = expr else { unreachable!() };

        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;

        match binary.operator.r#type {
            Type::Plus => (left + right).ok_or_else(|| RuntimeError {
                token: binary.operator.clone(),
                message: "Operands must be two numbers or two strings.".to_string(),
            }),
            Type::Minus => (left - right).ok_or_else(|| Self::numbers_error(&binary.operator)),
            Type::Star => (left * right).ok_or_else(|| Self::numbers_error(&binary.operator)),
            Type::Slash => (left / right).ok_or_else(|| Self::numbers_error(&binary.operator)),
            Type::Greater => {
                let (left, right) = Self::number_operands(&binary.operator, &left, &right)?;
                Ok(Object::from(left > right))
            },
            Type::GreaterEqual => {
                let (left, right) = Self::number_operands(&binary.operator, &left, &right)?;
                Ok(Object::from(left >= right))
            },
            Type::Less => {
                let (left, right) = Self::number_operands(&binary.operator, &left, &right)?;
                Ok(Object::from(left < right))
            },
            Type::LessEqual => {
                let (left, right) = Self::number_operands(&binary.operator, &left, &right)?;
                Ok(Object::from(left <= right))
            },
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            _ => unreachable!(),
        }
    }

    fn visit_logical_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Logical(logical) = expr else { unreachable!() };

        let left = self.evaluate(&logical.left)?;

        // Short-circuit: the right operand is only evaluated when the left
        // one does not decide the result.
        match logical.operator.r#type {
            Type::Or if left.is_truthy() => Ok(left),
            Type::And if !left.is_truthy() => Ok(left),
            _ => self.evaluate(&logical.right),
        }
    }

    fn visit_variable_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Variable(variable) = expr else { unreachable!() };

        self.look_up_variable(variable.id, &variable.name)
    }

    fn visit_assign_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Assign(assign) = expr else { unreachable!() };

        let value = self.evaluate(&assign.value)?;

        match self.locals.get(&assign.id) {
            Some(distance) => {
                self.environment.borrow_mut().assign_at(*distance, &assign.name, value.clone());
            },
            None => {
                self.globals.borrow_mut().assign(&assign.name, value.clone())?;
            },
        }

        Ok(value)
    }

    fn visit_call_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Call(call) = expr else { unreachable!() };

        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let arity = match &callee {
            Object::Function(function) => function.arity(),
            Object::NativeFunction(function) => function.arity(),
            Object::Class(class) => class.arity(),
            _ => return Err(RuntimeError {
                token: call.paren.clone(),
                message: "Can only call functions and classes.".to_string(),
            }),
        };

        if arguments.len() != arity {
            return Err(RuntimeError {
                token: call.paren.clone(),
                message: format!("Expected {arity} arguments but got {}.", arguments.len()),
            });
        }

        match callee {
            Object::Function(function) => function.call(self, arguments),
            Object::NativeFunction(function) => function.call(self, arguments),
            Object::Class(class) => class.call(self, arguments),
            _ => unreachable!(),
        }
    }

    fn visit_get_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Get(get) = expr else { unreachable!() };

        match self.evaluate(&get.object)? {
            Object::Instance(instance) => instance.borrow().get(&get.name, Rc::clone(&instance)),
            _ => Err(RuntimeError {
                token: get.name.clone(),
                message: "Only instances have properties.".to_string(),
            }),
        }
    }

    fn visit_set_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Set(set) = expr else { unreachable!() };

        let Object::Instance(instance) = self.evaluate(&set.object)? else {
            return Err(RuntimeError {
                token: set.name.clone(),
                message: "Only instances have fields.".to_string(),
            });
        };

        let value = self.evaluate(&set.value)?;
        instance.borrow_mut().set(&set.name, value.clone());

        Ok(value)
    }

    fn visit_this_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::This(this) = expr else { unreachable!() };

        self.look_up_variable(this.id, &this.keyword)
    }

    fn visit_super_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Super(super_expr) = expr else { unreachable!() };

        let distance = *self.locals.get(&super_expr.id).expect("'super' to be resolved");

        let Object::Class(superclass) = self.environment.borrow().get_at(distance, &super_expr.keyword)? else {
            unreachable!()
        };

        // `this` is always bound one scope inside the `super` scope.
        let Object::Instance(instance) = self.environment.borrow().get_at(distance - 1, &Token::from("this"))? else {
            unreachable!()
        };

        let method = superclass.borrow().find_method(&super_expr.method.lexeme);
        match method {
            Some(method) => Ok(Object::from(method.bind(instance))),
            None => Err(RuntimeError {
                token: super_expr.method.clone(),
                message: format!("Undefined property '{}'.", super_expr.method.lexeme),
            }),
        }
    }
}

impl<'a> StmtVisitor<Result<(), Unwind>> for Interpreter<'a> {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Expression(data) = stmt else { unreachable!() };

        let value = self.evaluate(&data.expr)?;

        if self.repl {
            let text = value.to_string();
            self.println(&text);
        }

        Ok(())
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Print(data) = stmt else { unreachable!() };

        let value = self.evaluate(&data.expr)?;
        let text = value.to_string();
        self.println(&text);

        Ok(())
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Var(data) = stmt else { unreachable!() };

        let value = match &data.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::from(Literal::Nil),
        };

        self.environment.borrow_mut().define(&data.name.lexeme, value);

        Ok(())
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Block(data) = stmt else { unreachable!() };

        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&data.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::If(data) = stmt else { unreachable!() };

        if self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.then_branch)
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::While(data) = stmt else { unreachable!() };

        while self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.body)?;
        }

        Ok(())
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Function(data) = stmt else { unreachable!() };

        let function = Function::new(data, Rc::clone(&self.environment), false);
        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));

        Ok(())
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Return(data) = stmt else { unreachable!() };

        let value = match &data.value {
            Some(value) => self.evaluate(value)?,
            None => Object::from(Literal::Nil),
        };

        Err(Unwind::Return(value))
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        let Stmt::Class(data) = stmt else { unreachable!() };

        let superclass = match &data.superclass {
            Some(expr) => {
                let Expr::Variable(variable) = expr else { unreachable!() };

                match self.evaluate(expr)? {
                    Object::Class(class) => Some(class),
                    _ => return Err(Unwind::Error(RuntimeError {
                        token: variable.name.clone(),
                        message: "Superclass must be a class.".to_string(),
                    })),
                }
            },
            None => None,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(Literal::Nil));

        // Methods of a subclass close over an extra scope that binds `super`.
        if let Some(superclass) = &superclass {
            let environment = Environment::new(Some(Rc::clone(&self.environment)));
            self.environment = Rc::new(RefCell::new(environment));
            self.environment.borrow_mut().define("super", Object::from(Rc::clone(superclass)));
        }

        let mut methods = HashMap::new();
        for method in &data.methods {
            let Stmt::Function(function) = method else { unreachable!() };

            let is_initializer = function.name.lexeme == "init";
            methods.insert(
                function.name.lexeme.clone(),
                Function::new(function, Rc::clone(&self.environment), is_initializer),
            );
        }

        let class = Class::new(data.name.lexeme.clone(), superclass.clone(), methods);

        if superclass.is_some() {
            let enclosing = self.environment.borrow().enclosing.clone()
                .expect("'super' scope to have an enclosing environment");
            self.environment = enclosing;
        }

        self.environment.borrow_mut()
            .assign(&data.name, Object::from(Rc::new(RefCell::new(class))))?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::Parser;
    use crate::resolver::Resolver;
    use crate::scanner::Scanner;

    fn eval(source: &str) -> Result<Object, RuntimeError> {
        let tokens = Scanner::new(source).scan_tokens();
        let expr = Parser::new(tokens).parse_expression().unwrap();

        let mut output: Vec<u8> = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        interpreter.evaluate(&expr)
    }

    fn run(source: &str) -> String {
        let tokens = Scanner::new(source).scan_tokens();
        let statements = Parser::new(tokens).parse();

        let mut output: Vec<u8> = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        Resolver::new(&mut interpreter).resolve(&statements);
        interpreter.interpret(&statements, false);

        String::from_utf8(output).unwrap()
    }

    #[test]
    fn evaluate_literal() {
        assert_eq!(eval("12").unwrap(), Object::from(12.0));
        assert_eq!(eval("\"hi\"").unwrap(), Object::from("hi"));
        assert_eq!(eval("nil").unwrap(), Object::from(Literal::Nil));
    }

    #[test]
    fn evaluate_unary() {
        assert_eq!(eval("-12").unwrap(), Object::from(-12.0));
        assert_eq!(eval("!true").unwrap(), Object::from(false));
        assert_eq!(eval("!nil").unwrap(), Object::from(true));
        assert_eq!(eval("!0").unwrap(), Object::from(false));
    }

    #[test]
    fn evaluate_unary_type_error() {
        let error = eval("-\"x\"").unwrap_err();
        assert_eq!(error.message, "Operand must be a number.");
    }

    #[test]
    fn evaluate_binary() {
        assert_eq!(eval("6 - (12 - 24)").unwrap(), Object::from(18.0));
        assert_eq!(eval("10 / 4").unwrap(), Object::from(2.5));
        assert_eq!(eval("\"Hello\" + \"World\"").unwrap(), Object::from("HelloWorld"));
    }

    #[test]
    fn evaluate_binary_type_errors() {
        assert_eq!(eval("\"x\" + 1").unwrap_err().message, "Operands must be two numbers or two strings.");
        assert_eq!(eval("true * 2").unwrap_err().message, "Operands must be numbers.");
        assert_eq!(eval("\"a\" < \"b\"").unwrap_err().message, "Operands must be numbers.");
    }

    #[test]
    fn evaluate_comparison() {
        assert_eq!(eval("1 < 2").unwrap(), Object::from(true));
        assert_eq!(eval("2 <= 2").unwrap(), Object::from(true));
        assert_eq!(eval("1 > 2").unwrap(), Object::from(false));
        assert_eq!(eval("2 >= 3").unwrap(), Object::from(false));
    }

    #[test]
    fn evaluate_equality() {
        assert_eq!(eval("nil == nil").unwrap(), Object::from(true));
        assert_eq!(eval("nil == false").unwrap(), Object::from(false));
        assert_eq!(eval("1 == 1").unwrap(), Object::from(true));
        assert_eq!(eval("\"a\" == \"a\"").unwrap(), Object::from(true));
        assert_eq!(eval("1 == \"1\"").unwrap(), Object::from(false));
        assert_eq!(eval("1 != 2").unwrap(), Object::from(true));
    }

    #[test]
    fn evaluate_logical_short_circuit() {
        assert_eq!(eval("\"left\" or missing").unwrap(), Object::from("left"));
        assert_eq!(eval("false and missing").unwrap(), Object::from(false));
        assert_eq!(eval("nil or \"right\"").unwrap(), Object::from("right"));
    }

    #[test]
    fn run_print() {
        assert_eq!(run("var a = 1; var b = 2; print a + b;"), "3\n");
    }

    #[test]
    fn run_block_scoping() {
        let source = "var a = \"outer\"; { var a = \"inner\"; print a; } print a;";
        assert_eq!(run(source), "inner\nouter\n");
    }

    #[test]
    fn run_while() {
        assert_eq!(run("var i = 0; while (i < 3) { print i; i = i + 1; }"), "0\n1\n2\n");
    }

    #[test]
    fn run_function_recursion() {
        let source = "fun fib(n) { if (n <= 1) return n; return fib(n - 2) + fib(n - 1); } print fib(5);";
        assert_eq!(run(source), "5\n");
    }

    #[test]
    fn run_closure_counter() {
        let source = "\
            fun make() { var i = 0; fun count() { i = i + 1; print i; } return count; }\n\
            var counter = make();\n\
            counter();\n\
            counter();";
        assert_eq!(run(source), "1\n2\n");
    }

    #[test]
    fn run_class_with_initializer() {
        let source = "\
            class Greeter { init(name) { this.name = name; } hi() { print \"Hello, \" + this.name; } }\n\
            Greeter(\"World\").hi();";
        assert_eq!(run(source), "Hello, World\n");
    }

    #[test]
    fn run_super_method_call() {
        let source = "\
            class A { m() { return \"A\"; } }\n\
            class B < A { m() { return super.m() + \"B\"; } }\n\
            print B().m();";
        assert_eq!(run(source), "AB\n");
    }

    #[test]
    fn run_initializer_returns_instance() {
        let source = "\
            class Thing { init() { if (true) return; this.unused = 1; } }\n\
            print Thing().init();";
        assert_eq!(run(source), "Thing instance\n");
    }

    #[test]
    fn run_stringify() {
        assert_eq!(run("print 3.0;"), "3\n");
        assert_eq!(run("print 1.5;"), "1.5\n");
        assert_eq!(run("print nil;"), "nil\n");
        assert_eq!(run("fun f() {} print f;"), "<fn f>\n");
        assert_eq!(run("print clock;"), "<native fn>\n");
        assert_eq!(run("class C {} print C;"), "C\n");
        assert_eq!(run("class C {} print C();"), "C instance\n");
    }

    #[test]
    fn run_repl_mode_prints_expressions() {
        let tokens = Scanner::new("1 + 2; \"quiet\";").scan_tokens();
        let statements = Parser::new(tokens).parse();

        let mut output: Vec<u8> = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        Resolver::new(&mut interpreter).resolve(&statements);
        interpreter.interpret(&statements, true);

        assert_eq!(String::from_utf8(output).unwrap(), "3\nquiet\n");
    }

    #[test]
    fn run_return_unwinds_nested_blocks() {
        let source = "\
            fun f() { { { return \"done\"; } } print \"skipped\"; }\n\
            print f();";
        assert_eq!(run(source), "done\n");
    }

    #[test]
    fn run_fields_shadow_methods() {
        let source = "\
            class C { m() { return \"method\"; } }\n\
            var c = C();\n\
            c.m = \"field\";\n\
            print c.m;";
        assert_eq!(run(source), "field\n");
    }

    #[test]
    fn run_instance_identity() {
        let source = "\
            class C {}\n\
            var a = C();\n\
            var b = C();\n\
            print a == a;\n\
            print a == b;";
        assert_eq!(run(source), "true\nfalse\n");
    }
}

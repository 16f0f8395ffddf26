use std::cell::RefCell;
use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::class::Instance;
use crate::environment::Environment;
use crate::error::{RuntimeError, Unwind};
use crate::interpreter::Interpreter;
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{FunctionData, Stmt};
use crate::token::{Token, Type};

/// Represents a user-defined function.
/// The closure is the environment the function was declared in; calls run in
/// a fresh child of it.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl Function {
    pub fn new(declaration: &FunctionData, closure: Rc<RefCell<Environment>>, is_initializer: bool) -> Self {
        Function {
            name: declaration.name.clone(),
            params: declaration.params.clone(),
            body: declaration.body.clone(),
            closure,
            is_initializer,
        }
    }

    /// Returns a copy of this function whose closure is a new scope with
    /// `this` bound to the given instance.
    pub fn bind(&self, instance: Rc<RefCell<Instance>>) -> Function {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));
        environment.define("this", Object::from(instance));

        Function {
            closure: Rc::new(RefCell::new(environment)),
            ..self.clone()
        }
    }

    /// Returns the `this` bound in the closure.
    /// Initializers return it no matter how their body exits.
    fn this(&self) -> Result<Object, RuntimeError> {
        self.closure.borrow().get_at(0, &Token::from("this"))
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));

        self.params.iter().zip(arguments).for_each(|(param, argument)| {
            environment.define(&param.lexeme, argument);
        });

        match interpreter.execute_block(&self.body, Rc::new(RefCell::new(environment))) {
            Ok(()) => {
                if self.is_initializer {
                    return self.this();
                }

                Ok(Object::from(Literal::Nil))
            },
            Err(Unwind::Return(value)) => {
                if self.is_initializer {
                    return self.this();
                }

                Ok(value)
            },
            Err(Unwind::Error(error)) => Err(error),
        }
    }

    fn arity(&self) -> usize {
        self.params.len()
    }
}

impl PartialEq for Function {
    /// Functions compare by identity: two values are equal only when they
    /// came from the same declaration in the same closure.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Rc::ptr_eq(&self.closure, &other.closure)
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.name.lexeme)
    }
}

/// Represents a built-in function backed by a host function pointer.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: Token,
    pub arity: usize,
    pub function: fn(&mut Interpreter, Vec<Object>) -> Result<Object, RuntimeError>,
}

impl NativeFunction {
    /// Returns the native functions preloaded into the global environment.
    pub fn get_globals() -> Vec<NativeFunction> {
        vec![
            NativeFunction {
                name: Token::new(Type::Identifier, "clock".to_owned(), None, 0),
                arity: 0,
                function: |_, _| {
                    let now = std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .expect("time to flow forwards")
                        .as_secs_f64();
                    Ok(Object::from(now))
                },
            },
        ]
    }
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn>")
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn {}>", self.name.lexeme)
    }
}

mod error;
mod evaluator;
mod parser;
mod variable;

pub use error::ParseError;
pub use evaluator::Expression;
pub use parser::ExpressionBuilder;
pub use variable::Variable;

/// A node of a built expression tree.
///
/// Children are owned exclusively; `Variable` holds a shared handle to a cell the
/// host can keep mutating after the tree is built.
#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Constant(f64),
    Variable(Variable),
    Negate(Box<ASTNode>),
    BinaryOperation {
        left: Box<ASTNode>,
        operator: Operator,
        right: Box<ASTNode>,
    },
    FunctionCall {
        function: Function,
        argument: Box<ASTNode>,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    /// IEEE semantics throughout: dividing by zero yields an infinity or NaN.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Power => left.powf(right),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
        }
    }
}

/// The fixed set of builtin functions. Trigonometric functions take degrees.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Function {
    Sqrt,
    Sin,
    Cos,
    Tg,
    Ctg,
    Ln,
}

impl Function {
    /// No domain checks: out-of-domain arguments produce NaN or an infinity.
    pub fn apply(&self, argument: f64) -> f64 {
        match self {
            Function::Sqrt => argument.sqrt(),
            Function::Sin => argument.to_radians().sin(),
            Function::Cos => argument.to_radians().cos(),
            Function::Tg => argument.to_radians().tan(),
            Function::Ctg => 1.0 / argument.to_radians().tan(),
            Function::Ln => argument.ln(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Function::Sqrt => "sqrt",
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tg => "tg",
            Function::Ctg => "ctg",
            Function::Ln => "ln",
        }
    }
}

impl TryFrom<&str> for Function {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "sqrt" => Ok(Function::Sqrt),
            "sin" => Ok(Function::Sin),
            "cos" => Ok(Function::Cos),
            "tg" => Ok(Function::Tg),
            "ctg" => Ok(Function::Ctg),
            "ln" => Ok(Function::Ln),
            _ => Err(format!("Unknown function: {}", value)),
        }
    }
}

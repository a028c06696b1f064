pub mod ast;

pub use ast::{ASTNode, Expression, ExpressionBuilder, Function, Operator, ParseError, Variable};

use std::collections::HashMap;

/// Parses `expression` once and evaluates it with the given variable values.
///
/// Hosts that evaluate the same formula repeatedly should keep the [`Expression`]
/// from [`ExpressionBuilder::build`] and update [`Variable`] cells instead.
pub fn evaluate_expression(
    expression: &str,
    context: &HashMap<String, f64>,
) -> Result<f64, ParseError> {
    let builder = context
        .iter()
        .fold(ExpressionBuilder::new(expression), |builder, (name, value)| {
            builder.add_variable(name.as_str(), &Variable::new(*value))
        });

    Ok(builder.build()?.eval())
}

use crate::ast::ASTNode;

/// A built expression tree together with the text it came from.
///
/// The tree never changes after `build`; evaluating it again after a
/// [`Variable`](crate::ast::Variable) was `set` picks up the new value.
#[derive(Debug, Clone)]
pub struct Expression {
    source: String,
    root: ASTNode,
}

impl Expression {
    pub(crate) fn new(source: String, root: ASTNode) -> Self {
        Self { source, root }
    }

    /// Evaluates the tree against the current values of its variables.
    pub fn eval(&self) -> f64 {
        self.root.evaluate()
    }

    pub fn root(&self) -> &ASTNode {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl ASTNode {
    /// Recursively evaluates this node. Variables are read on every call.
    pub fn evaluate(&self) -> f64 {
        match self {
            ASTNode::Constant(value) => *value,
            ASTNode::Variable(variable) => variable.get(),
            ASTNode::Negate(operand) => -operand.evaluate(),
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => operator.apply(left.evaluate(), right.evaluate()),
            ASTNode::FunctionCall { function, argument } => function.apply(argument.evaluate()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{ExpressionBuilder, Variable};
    use rand::Rng;

    const EPSILON: f64 = 1e-9;

    fn eval(source: &str) -> f64 {
        ExpressionBuilder::new(source).build().unwrap().eval()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("1+2*3"), 7.0);
        assert_eq!(eval("(1+2)*3"), 9.0);
        assert_eq!(eval("10-2-3"), 5.0);
        assert_eq!(eval("100/10/5"), 2.0);
        assert_eq!(eval("2^3^2"), 512.0);
    }

    #[test]
    fn test_signs() {
        assert_eq!(eval("--5"), 5.0);
        assert_eq!(eval("+-5"), -5.0);
        assert_eq!(eval("-5^2"), -25.0);
        assert_eq!(eval("2^-1"), 0.5);
        assert_eq!(eval("3 - -2"), 5.0);
    }

    #[test]
    fn test_sign_binds_before_power_with_variables() {
        let x = Variable::new(0.0);
        let y = Variable::new(0.0);
        let expression = ExpressionBuilder::new("-x^y")
            .add_variable("x", &x)
            .add_variable("y", &y)
            .build()
            .unwrap();
        x.set(1.0);
        y.set(2.0);
        assert_eq!(expression.eval(), -1.0);
    }

    #[test]
    fn test_builtin_functions() {
        assert_close(eval("sin(90)"), 1.0);
        assert_close(eval("cos(0)"), 1.0);
        assert_close(eval("tg 45"), 1.0);
        assert_close(eval("ctg(45)"), 1.0);
        assert_close(eval("sqrt(16)"), 4.0);
        assert_close(eval("ln(1)"), 0.0);
        assert_close(eval("sin 30 * 2"), 1.0);
    }

    #[test]
    fn test_non_finite_results_are_values() {
        assert_eq!(eval("1/0"), f64::INFINITY);
        assert!(eval("0/0").is_nan());
        assert!(eval("sqrt(-4)").is_nan());
        assert_eq!(eval("ln 0"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_variables_are_read_live() {
        let x = Variable::new(2.0);
        let expression = ExpressionBuilder::new("x * x + 1")
            .add_variable("x", &x)
            .build()
            .unwrap();

        assert_eq!(expression.eval(), 5.0);
        x.set(3.0);
        assert_eq!(expression.eval(), 10.0);
        x.set(-1.0);
        assert_eq!(expression.eval(), 2.0);
    }

    #[test]
    fn test_one_cell_shared_by_two_expressions() {
        let r = Variable::new(1.0);
        let area = ExpressionBuilder::new("3.14159 * r^2")
            .add_variable("r", &r)
            .build()
            .unwrap();
        let perimeter = ExpressionBuilder::new("2 * 3.14159 * r")
            .add_variable("r", &r)
            .build()
            .unwrap();

        r.set(2.0);
        assert_close(area.eval(), 12.56636);
        assert_close(perimeter.eval(), 12.56636);
    }

    #[test]
    fn test_expression_outlives_builder_handles() {
        let expression = {
            let t = Variable::new(4.0);
            ExpressionBuilder::new("sqrt t")
                .add_variable("t", &t)
                .build()
                .unwrap()
        };
        assert_eq!(expression.eval(), 2.0);
    }

    #[test]
    fn test_matches_meval_on_plain_arithmetic() {
        let cases = [
            "1 + 2 * 3 - 4 / 5",
            "(1.5 + 2.25) * (3 - 7) / 2",
            "2^10 - 3^2^2",
            "-(4 - 6) * 3",
            "10 / 4 / 5 * 3",
            "0.5 * 8 + 7 - 0.25",
        ];
        for case in cases {
            let expected = meval::eval_str(case).unwrap();
            assert_close(eval(case), expected);
        }
    }

    #[test]
    fn test_random_reassignment() {
        let a = Variable::new(0.0);
        let b = Variable::new(0.0);
        let c = Variable::new(0.0);
        let expression = ExpressionBuilder::new("a * (b - c) / 2 + cos(a) - b^2")
            .add_variable("a", &a)
            .add_variable("b", &b)
            .add_variable("c", &c)
            .build()
            .unwrap();

        let mut rng = rand::rng();
        for _ in 0..1000 {
            let (av, bv, cv): (f64, f64, f64) = (
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
                rng.random_range(-100.0..100.0),
            );
            a.set(av);
            b.set(bv);
            c.set(cv);

            let expected = av * (bv - cv) / 2.0 + av.to_radians().cos() - bv.powf(2.0);
            assert_close(expression.eval(), expected);
        }
    }
}

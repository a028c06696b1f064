use formula_rs::{ExpressionBuilder, Variable};

fn main() {
    pretty_env_logger::init();

    let x = Variable::new(0.0);
    let y = Variable::new(0.0);

    let expression = match ExpressionBuilder::new("-x^y")
        .add_variable("x", &x)
        .add_variable("y", &y)
        .build()
    {
        Ok(expression) => expression,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    x.set(1.0);
    y.set(2.0);
    println!("{}", expression.eval());
}

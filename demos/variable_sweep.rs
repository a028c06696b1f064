use formula_rs::{ExpressionBuilder, Variable};
use log::debug;

fn main() {
    pretty_env_logger::init();

    let angle = Variable::default();
    let radius = Variable::new(2.0);

    let expression = match ExpressionBuilder::new("r * (sin a)^2 + r * (cos a)^2")
        .add_variable("a", &angle)
        .add_variable("r", &radius)
        .build()
    {
        Ok(expression) => expression,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };
    debug!("tree: {:?}", expression.root());

    for degrees in (0..=360).step_by(45) {
        angle.set(degrees as f64);
        println!("{} @ a = {:>3}: {}", expression.source(), angle, expression.eval());
    }
}

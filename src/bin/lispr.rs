use lispr::{cmdline, environment};
use std::rc::Rc;

fn main() -> Result<(), cmdline::Error> {
    pretty_env_logger::init();
    let env = Rc::new(environment::Environment::default());
    let args = std::env::args().collect();
    cmdline::launch(args, &env)
}

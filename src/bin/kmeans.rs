use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use kmeans::cli::{run, usage_exit_code, Args, USAGE};

fn main() -> ExitCode {
    let env = Env::default().filter_or("RUST_LOG", "warn");
    env_logger::init_from_env(env);

    let args = match Args::try_parse_from(std::env::args_os()) {
        Ok(args) => args,
        Err(err) => {
            let code = usage_exit_code(&err);
            if code == 0 {
                let _ = err.print();
            } else {
                eprintln!("{err}");
                eprintln!("{USAGE}");
            }
            return ExitCode::from(code);
        }
    };

    match run(&args) {
        Ok(evaluation) => {
            println!("{}", evaluation.correct);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

use skein::error::formatting::format_error_with_source;
use skein::repl::Repl;
use skein::{Config, Interpreter, Value};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "\
skein - a small Lisp with a register bytecode VM

USAGE:
  skein [OPTIONS] [FILE...]

OPTIONS:
  -e, --eval EXPR     Evaluate EXPR and print the result
  --max-depth N       Maximum nested procedure calls (default 1000)
  --disasm            Print bytecode instead of running
  -v                  More logging (repeat for trace)
  -h, --help          Print this help

With no FILE and no --eval, starts an interactive session.
";

struct Args {
    eval: Vec<String>,
    max_depth: Option<usize>,
    disasm: bool,
    verbosity: usize,
    files: Vec<PathBuf>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(None);
    }
    let mut verbosity = 0;
    while pargs.contains("-v") {
        verbosity += 1;
    }
    let mut eval = Vec::new();
    while let Some(expr) = pargs.opt_value_from_str(["-e", "--eval"])? {
        eval.push(expr);
    }
    let args = Args {
        eval,
        max_depth: pargs.opt_value_from_str("--max-depth")?,
        disasm: pargs.contains("--disasm"),
        verbosity,
        files: pargs
            .finish()
            .into_iter()
            .map(PathBuf::from)
            .collect(),
    };
    Ok(Some(args))
}

fn init_logging(verbosity: usize) {
    let default = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

/// Run or disassemble one source, reporting errors with an excerpt.
fn run_source(interp: &mut Interpreter, name: &str, source: &str, args: &Args, print: bool) -> bool {
    if args.disasm {
        return match interp.disassemble_source(name, source) {
            Ok(text) => {
                print!("{}", text);
                true
            }
            Err(e) => {
                eprintln!("{}", format_error_with_source(&e, source));
                false
            }
        };
    }
    match interp.eval_source(name, source) {
        Ok(Value::Void) => true,
        Ok(value) => {
            if print {
                println!("{}", value);
            }
            true
        }
        Err(e) => {
            eprintln!("{}", format_error_with_source(&e, source));
            false
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("skein: {}\n\n{}", e, HELP);
            return ExitCode::from(2);
        }
    };
    init_logging(args.verbosity);

    let mut config = Config::default().with_trace_templates(args.verbosity > 1);
    if let Some(depth) = args.max_depth {
        config = config.with_max_call_depth(depth);
    }
    let mut interp = Interpreter::with_config(config);

    for path in &args.files {
        let name = path.display().to_string();
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("skein: {}: {}", name, e);
                return ExitCode::FAILURE;
            }
        };
        if !run_source(&mut interp, &name, &source, &args, false) {
            return ExitCode::FAILURE;
        }
    }
    for expr in &args.eval {
        if !run_source(&mut interp, "<eval>", expr, &args, true) {
            return ExitCode::FAILURE;
        }
    }

    if args.files.is_empty() && args.eval.is_empty() {
        let result = Repl::new().and_then(|mut repl| repl.run(&mut interp));
        if let Err(e) = result {
            eprintln!("skein: {}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

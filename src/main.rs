use {
    crate::cli::{Args, Invocation},
    clap::Parser,
    log::{error, LevelFilter},
    mccs_script::{DisplayApi, Error, IndexPolicy, MonitorContext, Retention},
    std::{io, process::ExitCode},
};

mod cli;

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_module(
            "mccs_script",
            match args.verbose {
                0 => LevelFilter::Info,
                1 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            },
        )
        .filter_module("mccs", LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    #[cfg(windows)]
    let result = run(mccs_script::win32::Win32Display::new(), &args);
    #[cfg(not(windows))]
    let result = {
        error!("DDC/CI monitor control is only supported on Windows");
        Ok::<_, Error>(false)
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        },
    }
}

/// Returns whether the requested operation succeeded.
#[cfg_attr(not(windows), allow(dead_code))]
fn run<A: DisplayApi>(api: A, args: &Args) -> Result<bool, Error> {
    let invocation = args.invocation();

    let mut context = MonitorContext::new(api, args.index_policy())?;
    println!("Attached Monitors");
    if context.policy() == IndexPolicy::PerMonitor {
        println!("(indexed per physical monitor)");
    }
    for monitor in context.list(Retention::Retain)? {
        println!("Monitor {}: {}", monitor.index, monitor.description);
    }

    let outcome = match invocation {
        Ok(Invocation::List) => {
            println!("Please provide a script path or monitor index, command and parameter");
            Ok(true)
        },
        Ok(Invocation::RunScript(path)) => context.run_script_file(path).map(|_| true),
        Ok(Invocation::Command(command)) => context.execute(&command).map(|()| true),
        Ok(Invocation::CyclePower) => context
            .cycle_power(|monitor| {
                println!("{monitor} is off, press Enter to switch it back on");
                let mut line = String::new();
                io::stdin().read_line(&mut line).map(drop).map_err(Error::Confirmation)
            })
            .map(|()| true),
        Err(e) => {
            eprintln!("{e}");
            Ok(false)
        },
    };

    finish(context, outcome)
}

/// Report the outcome, then release retained monitors.
///
/// A release failure at teardown is logged and turns success into failure,
/// but never replaces the outcome.
#[cfg_attr(not(windows), allow(dead_code))]
fn finish<A: DisplayApi>(context: MonitorContext<A>, outcome: Result<bool, Error>) -> Result<bool, Error> {
    let outcome = match outcome {
        Err(e) if !e.is_fatal() => {
            eprintln!("{e}");
            Ok(false)
        },
        outcome => outcome,
    };

    match context.close() {
        Ok(()) => outcome,
        Err(e) => {
            error!("{e}");
            outcome.map(|_| false)
        },
    }
}

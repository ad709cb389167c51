mod args;
mod build;
mod error;
mod new;
#[cfg(feature = "serve")]
mod serve;

use clap::Parser;

fn main() {
    human_panic::setup_panic!();
    let result = run();
    proc_exit::exit(result);
}

fn run() -> proc_exit::ExitResult {
    // Let clap handle its own exit codes
    let cli = Cli::parse();

    args::init_logging(&cli.verbose);

    match cli.command {
        Command::Init(cmd) => cmd.run(),
        Command::Build(cmd) => cmd.run(),
        #[cfg(feature = "serve")]
        Command::Serve(cmd) => cmd.run(),
    }
    .map_err(|e| {
        log::error!("{e:#}");
        proc_exit::Code::FAILURE.as_exit()
    })
}

/// Static site generator with logic-less templates
#[derive(Clone, Debug, clap::Parser)]
#[command(name = "brage", version, about, propagate_version = true)]
struct Cli {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
enum Command {
    Init(new::InitArgs),
    Build(build::BuildArgs),
    #[cfg(feature = "serve")]
    Serve(serve::ServeArgs),
}

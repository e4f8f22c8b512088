// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use clap::Parser;
use tracing_subscriber::EnvFilter;

use aigcm::services::style::DEFAULT_GUIDE;
use aigcm::{App, Cli, Error};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();

    if cli.default {
        println!("\nDefault Style Guide:");
        println!("-------------------");
        println!("{}", *DEFAULT_GUIDE);
        return;
    }

    init_logging(cli.verbose);

    let result = match App::new(cli) {
        Ok(app) => app.run().await.map(|_| ()),
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        exit_with(e);
    }
}

/// `--verbose` forces debug output for this crate; otherwise `RUST_LOG`
/// applies, defaulting to warnings only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("aigcm=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aigcm=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::env::var_os("NO_COLOR").is_none())
        .without_time()
        .init();
}

fn exit_with(error: Error) -> ! {
    eprintln!("{:?}", miette::Report::new(error));
    std::process::exit(1);
}

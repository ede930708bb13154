//! mdx-scope
//!
//! Runs the MDX scope loader over wrapper modules.

use clap::{Arg, ArgAction, Command};
use gatsby_mdx_loader_cli::{run, RunOptions};
use std::path::PathBuf;
use std::process;

fn path_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("FILE")
        .value_parser(clap::value_parser!(PathBuf))
        .help(help)
}

#[tokio::main]
async fn main() {
    let matches = Command::new("mdx-scope")
        .version(gatsby_mdx_loader_cli::version())
        .about("Inject page query scopes into MDX wrapper modules")
        .arg(path_arg("pages", "JSON array of data layer nodes"))
        .arg(path_arg("results", "JSON array of { query?, result } fixtures"))
        .arg(path_arg("options", "Loader options (JSON)"))
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Write generated modules here instead of printing them"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log every pipeline decision"),
        )
        .arg(
            Arg::new("wrappers")
                .value_name("WRAPPER")
                .value_parser(clap::value_parser!(PathBuf))
                .num_args(1..)
                .required(true),
        )
        .get_matches();

    let opts = RunOptions {
        wrappers: matches
            .get_many::<PathBuf>("wrappers")
            .map(|paths| paths.cloned().collect())
            .unwrap_or_default(),
        pages: matches.get_one::<PathBuf>("pages").cloned(),
        results: matches.get_one::<PathBuf>("results").cloned(),
        options: matches.get_one::<PathBuf>("options").cloned(),
        out_dir: matches.get_one::<PathBuf>("out-dir").cloned(),
        verbose: matches.get_flag("verbose"),
    };
    let print = opts.out_dir.is_none();

    let reports = match run(opts).await {
        Ok(reports) => reports,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    };

    let mut failed = false;
    for report in reports {
        match report.result {
            Ok((source, _)) if print => {
                println!("// {}", report.wrapper.display());
                println!("{}", source);
            }
            Ok(_) => {}
            Err(err) => {
                failed = true;
                eprintln!("Error: {}: {:#}", report.wrapper.display(), err);
            }
        }
    }
    if failed {
        process::exit(1);
    }
}

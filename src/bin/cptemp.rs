use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use cptemp::{
    args::{Args, Source},
    copy::{copy_as_is, copy_rename},
    done, error, guard, info,
    picker::{pick_template, Fzf},
    resolve, trace, Config, CopyMode,
};

fn app(args: &Args) -> Result<()> {
    let config = Config::default_paths()?;
    let cwd = Config::get_current_dir()?;

    trace!("Home: {}", config.home().display());
    for root in config.search_roots() {
        trace!("Search root: {}", root.display());
    }

    let invocation = args.normalize(&cwd, &config);

    let template = match invocation.source {
        Source::Query(ref query) => resolve(query, &cwd, config.search_roots())?,
        Source::Fuzzy => pick_template(&Fzf::default(), config.search_roots(), &cwd)?,
    };

    info!("Using template: {}", config.pretty(&template));

    guard::check(&template, &invocation.targets)?;

    let report = match invocation.mode {
        CopyMode::Rename => copy_rename(&template, &invocation.targets, &config)?,
        CopyMode::AsIs => copy_as_is(&template, &invocation.targets, &config)?,
    };

    report.finish()?;

    done!();

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match app(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

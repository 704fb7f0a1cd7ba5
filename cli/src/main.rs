// Copyright 2026 The git-provenance Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use provenance_core::driver::Driver;
use provenance_core::reporter;
use provenance_core::source::gix_source::GixSource;

/// Replay a repository's commit history and report per-line authorship
/// provenance.
#[derive(Parser)]
#[command(name = "git-provenance", version)]
struct Args {
    /// Path to the repository to replay.
    repo_path: PathBuf,
}

fn main() -> ExitCode {
    logging::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args.repo_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("git-provenance: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(repo_path: &std::path::Path) -> provenance_core::error::ProvenanceResult<()> {
    tracing::info!(path = %repo_path.display(), "opening repository");
    let source = GixSource::open(repo_path)?;
    let mut driver = Driver::new(source, config::default_ignore_patterns());

    let mut replayed = 0u64;
    driver.run(|commit_id| {
        replayed += 1;
        eprintln!("commit {commit_id}");
    })?;
    tracing::info!(replayed, "history replay complete");

    let report = reporter::render(driver.engine().stats(), driver.engine().messages());
    print!("{report}");
    Ok(())
}

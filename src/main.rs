/*
 * This file is part of boardmon.
 *
 * Copyright (C) 2025 boardmon contributors
 *
 * boardmon is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * boardmon is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with boardmon. If not, see <https://www.gnu.org/licenses/>.
 */

use std::io::Write;

use anyhow::Context;
use boardmon::{cli, logging};
use clap::Parser;
use tracing::debug;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    logging::init(args.log_level.as_deref());
    debug!(?args, "Starting boardmon {}", env!("CARGO_PKG_VERSION"));

    let output = cli::run(&args)?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
        .context("Failed to write output")?;
    Ok(())
}

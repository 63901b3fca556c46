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

//! boardmon - mainboard identification and Super-I/O reports for Linux
//!
//! The detection and reporting logic lives in `bm-core`; this crate holds the
//! command line front end and logging setup.

pub mod cli;
pub mod logging;

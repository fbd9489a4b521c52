//! Shared test harness modules for the Dropoff CLI.

use super::*;

mod helpers;
mod manage_unit;

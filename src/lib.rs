// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod countdown;
pub mod db;
pub mod error;
pub mod form;
pub mod ledger;
pub mod models;
pub mod store;
pub mod utils;

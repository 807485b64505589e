// Copyright (c) 2023 Beihang University, Huawei Technologies Co.,Ltd. All rights reserved.
// Rust-Shyper is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//          http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND,
// EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT,
// MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

mod gpio;
mod status;
mod window;

use std::process;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use gpio::{gpio_decode, gpio_demo, gpio_set, gpio_status};
use log::{debug, error, LevelFilter};
use tegra_gpio::{decode, PinAddressSet};

mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

#[derive(Parser)]
#[command(
    version,
    author,
    about,
    long_about = "CommandLine Interface for Tegra X1 GPIO registers"
)]
struct CLI {
    /// physical memory device to map the registers from
    #[arg(long, default_value = "/dev/mem")]
    device: String,
    /// more log output, repeat for register writes
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    subcmd: CLISubCmd,
}

#[derive(Subcommand)]
enum CLISubCmd {
    /// decode a gpio name into its register addresses
    Decode {
        #[arg(value_parser = parse_gpio_name)]
        name: PinAddressSet,
    },
    /// print registers of one port, or of every controller
    Status {
        #[arg(value_parser = parse_gpio_name)]
        name: Option<PinAddressSet>,
        #[arg(long)]
        json: bool,
    },
    /// configure a pin as output and drive it
    Set {
        #[arg(value_parser = parse_gpio_name)]
        name: PinAddressSet,
        #[arg(value_enum)]
        level: Level,
    },
    /// run the decode, output and drive-high sequence on one pin
    Demo {
        #[arg(value_parser = parse_gpio_name, default_value = "GPIO3_PJ.07")]
        name: PinAddressSet,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Level {
    Low,
    High,
}

fn parse_gpio_name(name: &str) -> Result<PinAddressSet, String> {
    decode(name).map_err(|err| format!("{}: {}", name, err))
}

fn print_built_info() {
    debug!(
        "{} {} built at {} by {}, compiler: {}, features: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_TIME"),
        env!("HOSTNAME"),
        built_info::RUSTC_VERSION,
        built_info::FEATURES_LOWERCASE_STR,
    );
}

fn exec_cmd(device: &str, subcmd: CLISubCmd) -> tegra_gpio::Result<()> {
    match subcmd {
        CLISubCmd::Decode { name } => {
            gpio_decode(&name);
            Ok(())
        }
        CLISubCmd::Status { name, json } => gpio_status(device, name.as_ref(), json),
        CLISubCmd::Set { name, level } => gpio_set(device, &name, level == Level::High),
        CLISubCmd::Demo { name } => gpio_demo(device, &name),
    }
}

fn main() {
    let cli = CLI::parse();

    // configure logger and set log level, RUST_LOG overrides
    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();
    print_built_info();

    if let Err(err) = exec_cmd(&cli.device, cli.subcmd) {
        error!("{}", err);
        process::exit(1);
    }
}

// Copyright (c) 2023 Beihang University, Huawei Technologies Co.,Ltd. All rights reserved.
// Rust-Shyper is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//          http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND,
// EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT,
// MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

//! tegra-gpio translates Tegra X1 GPIO names such as `GPIO3_PJ.07` into the
//! physical addresses of their controller registers and drives pins through
//! masked register writes on a mapped register window.
//! The introduces of all modules are showed below:
//! * [board]: The register layout of the GPIO controllers of a specific board.
//! * [driver]: Pin name decoding and the masked-write register engine.
//! * [utils]: The bounds-checked register window accessors.
//! * [error]: Defines the error type for decoding and register access.

#![cfg_attr(not(test), no_std)]
#![allow(clippy::upper_case_acronyms)]
#![allow(clippy::module_inception)]

extern crate alloc;
#[macro_use]
extern crate log;

pub mod board;
pub mod driver;
pub mod error;
pub mod utils;

pub use driver::gpio::{
    configure_as_output, decode, mask_word, read_all_controllers_status, read_port_status, set_value,
    PinAddressSet, PortLabel, PortRegisters, PortStatus, PortStatusRow,
};
pub use error::{Error, ErrorKind, Result};
pub use utils::{check_register, read_register, write_register, MmioWindow, RegisterWindow};

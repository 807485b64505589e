// Copyright (c) 2023 Beihang University, Huawei Technologies Co.,Ltd. All rights reserved.
// Rust-Shyper is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//          http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND,
// EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT,
// MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

//! GPIO name decoding and masked register access.
//!
//! There are 8 controllers, GPIO_1 to GPIO_8, each owning 4 ports called
//! A-D, E-H, I-L and so on. Ports have 8 pins each, so `GPIO3_PC.03` is
//! port C, pin 3. A port letter's ordinal divided by 4 selects the
//! controller and the remainder selects the port inside it.

pub use self::gpio::*;
pub use self::name::*;

mod gpio;
mod name;

use crate::board::{GpioLayout, RegKind};
use crate::error::Result;

/// Absolute physical addresses of the seven registers of one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRegisters([u32; RegKind::NUM]);

impl PortRegisters {
    /// Looks up the registers of `port` (0..=3) on `controller` (1..=8).
    pub fn lookup(layout: &GpioLayout, controller: u8, port: u8) -> Result<Self> {
        let mut addrs = [0; RegKind::NUM];
        for kind in RegKind::ALL {
            addrs[kind.index()] = layout.reg_addr(controller, port, kind)?;
        }
        Ok(Self(addrs))
    }

    #[inline]
    pub fn addr(&self, kind: RegKind) -> u32 {
        self.0[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegKind, u32)> + '_ {
        RegKind::ALL.iter().map(move |&kind| (kind, self.addr(kind)))
    }
}

// Copyright (c) 2023 Beihang University, Huawei Technologies Co.,Ltd. All rights reserved.
// Rust-Shyper is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//          http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND,
// EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT,
// MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

use crate::error::{ErrorKind, Result};

/// Number of independent GPIO controllers on the SoC
pub const GPIO_CONTROLLER_NUM: usize = 8;
/// Number of ports owned by each controller
pub const GPIO_PORT_PER_CONTROLLER: usize = 4;
/// Number of pins in one port register
pub const GPIO_PIN_PER_PORT: usize = 8;
/// Number of ports addressable by a flat port-letter ordinal
pub const GPIO_PORT_NUM: usize = GPIO_CONTROLLER_NUM * GPIO_PORT_PER_CONTROLLER;

/// The register kinds present for every port, in read-back order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegKind {
    /// Configuration: 1 selects GPIO function for the pin
    Cnf,
    MskCnf,
    /// Output enable: 1 selects output direction
    Oe,
    MskOe,
    Out,
    MskOut,
    In,
}

impl RegKind {
    pub const NUM: usize = 7;

    pub const ALL: [RegKind; RegKind::NUM] = [
        RegKind::Cnf,
        RegKind::MskCnf,
        RegKind::Oe,
        RegKind::MskOe,
        RegKind::Out,
        RegKind::MskOut,
        RegKind::In,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RegKind::Cnf => "CNF",
            RegKind::MskCnf => "MSK_CNF",
            RegKind::Oe => "OE",
            RegKind::MskOe => "MSK_OE",
            RegKind::Out => "OUT",
            RegKind::MskOut => "MSK_OUT",
            RegKind::In => "IN",
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Physical register layout of a GPIO controller family.
///
/// All tables are read-only; lookups are bounds-checked and report
/// `InvalidParam` for indices outside the hardware topology.
pub struct GpioLayout {
    /// Physical base of the window covering every controller
    pub map_base: u32,
    /// Size in bytes of the window covering every controller
    pub map_size: usize,
    pub controller_base: [u32; GPIO_CONTROLLER_NUM],
    /// Byte offset of each register kind, indexed by `RegKind` then port
    pub reg_offset: [[u32; GPIO_PORT_PER_CONTROLLER]; RegKind::NUM],
}

impl GpioLayout {
    /// Base address of a controller, `controller` counted from 1.
    pub fn controller_base(&self, controller: u8) -> Result<u32> {
        let idx = (controller as usize).checked_sub(1).ok_or(ErrorKind::InvalidParam)?;
        self.controller_base.get(idx).copied().ok_or_else(|| ErrorKind::InvalidParam.into())
    }

    pub fn reg_offset(&self, kind: RegKind, port: u8) -> Result<u32> {
        self.reg_offset[kind.index()]
            .get(port as usize)
            .copied()
            .ok_or_else(|| ErrorKind::InvalidParam.into())
    }

    /// Absolute physical address of one register of a port.
    pub fn reg_addr(&self, controller: u8, port: u8, kind: RegKind) -> Result<u32> {
        Ok(self.controller_base(controller)? + self.reg_offset(kind, port)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static LAYOUT: GpioLayout = GpioLayout {
        map_base: 0x1000,
        map_size: 0x100 * GPIO_CONTROLLER_NUM,
        controller_base: [0x1000, 0x1100, 0x1200, 0x1300, 0x1400, 0x1500, 0x1600, 0x1700],
        reg_offset: [
            [0x00, 0x04, 0x08, 0x0c],
            [0x80, 0x84, 0x88, 0x8c],
            [0x10, 0x14, 0x18, 0x1c],
            [0x90, 0x94, 0x98, 0x9c],
            [0x20, 0x24, 0x28, 0x2c],
            [0xa0, 0xa4, 0xa8, 0xac],
            [0x30, 0x34, 0x38, 0x3c],
        ],
    };

    #[test]
    fn controller_lookup_is_one_based() {
        assert_eq!(LAYOUT.controller_base(1).unwrap(), 0x1000);
        assert_eq!(LAYOUT.controller_base(8).unwrap(), 0x1700);
        assert_eq!(LAYOUT.controller_base(0).unwrap_err().kind(), ErrorKind::InvalidParam);
        assert_eq!(LAYOUT.controller_base(9).unwrap_err().kind(), ErrorKind::InvalidParam);
    }

    #[test]
    fn port_offset_lookup_is_bounded() {
        assert_eq!(LAYOUT.reg_offset(RegKind::MskOut, 3).unwrap(), 0xac);
        assert_eq!(LAYOUT.reg_offset(RegKind::In, 4).unwrap_err().kind(), ErrorKind::InvalidParam);
    }

    #[test]
    fn reg_addr_sums_base_and_offset() {
        assert_eq!(LAYOUT.reg_addr(3, 1, RegKind::Oe).unwrap(), 0x1214);
    }

    #[test]
    fn kinds_are_in_read_back_order() {
        for (i, kind) in RegKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(RegKind::MskOe.name(), "MSK_OE");
    }
}

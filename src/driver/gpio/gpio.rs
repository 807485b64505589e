// Copyright (c) 2023 Beihang University, Huawei Technologies Co.,Ltd. All rights reserved.
// Rust-Shyper is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//          http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND,
// EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT,
// MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

use core::fmt;

use alloc::vec::Vec;

use super::{PinAddressSet, PortRegisters};
use crate::board::{
    RegKind, GPIO_CONTROLLER_NUM, GPIO_LAYOUT, GPIO_PIN_PER_PORT, GPIO_PORT_NUM, GPIO_PORT_PER_CONTROLLER,
};
use crate::error::{ErrorKind, Result};
use crate::utils::{check_register, read_register, write_register, RegisterWindow};

/// Builds the word written to a mask register for one pin.
///
/// The upper byte enables the update of the matching lower-byte bit, so
/// sibling pins in the same port are left untouched by the hardware.
pub fn mask_word(pin: u8, value: bool) -> Result<u16> {
    check_pin(pin)?;
    let mut data = 0x0100 << pin;
    if value {
        data |= 1 << pin;
    }
    Ok(data)
}

fn check_pin(pin: u8) -> Result<()> {
    if pin as usize >= GPIO_PIN_PER_PORT {
        warn!("gpio pin {} out of range 0-7", pin);
        return ErrorKind::InvalidParam.into();
    }
    Ok(())
}

fn masked_write<W: RegisterWindow + ?Sized>(window: &W, regs: &PortRegisters, kind: RegKind, data: u16) -> Result<()> {
    let addr = regs.addr(kind);
    trace!("writing {:#06x} to {} {:#010x}", data, kind.name(), addr);
    write_register(window, addr, data)
}

/// Selects GPIO function and output direction for the pin of `addrs`.
pub fn configure_as_output<W: RegisterWindow + ?Sized>(window: &W, addrs: &PinAddressSet) -> Result<()> {
    let data = mask_word(addrs.pin(), true)?;
    // both stores land or neither does
    check_register(window, addrs.addr(RegKind::MskCnf))?;
    check_register(window, addrs.addr(RegKind::MskOe))?;
    masked_write(window, addrs.regs(), RegKind::MskCnf, data)?;
    // same word, direction register
    masked_write(window, addrs.regs(), RegKind::MskOe, data)
}

/// Drives output `pin` of the port described by `addrs` high or low.
pub fn set_value<W: RegisterWindow + ?Sized>(window: &W, addrs: &PinAddressSet, pin: u8, value: bool) -> Result<()> {
    masked_write(window, addrs.regs(), RegKind::MskOut, mask_word(pin, value)?)
}

/// Raw register values of one port, in `RegKind` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PortStatus([u16; RegKind::NUM]);

impl PortStatus {
    pub fn get(&self, kind: RegKind) -> u16 {
        self.0[kind.index()]
    }

    pub fn values(&self) -> &[u16; RegKind::NUM] {
        &self.0
    }
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, kind) in RegKind::ALL.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={:04x}", kind.name(), self.get(*kind))?;
        }
        Ok(())
    }
}

fn read_port_registers<W: RegisterWindow + ?Sized>(window: &W, regs: &PortRegisters) -> Result<PortStatus> {
    let mut data = [0; RegKind::NUM];
    for (kind, addr) in regs.iter() {
        data[kind.index()] = read_register(window, addr)?;
    }
    Ok(PortStatus(data))
}

/// Reads all seven registers of the port containing the pin of `addrs`.
pub fn read_port_status<W: RegisterWindow + ?Sized>(window: &W, addrs: &PinAddressSet) -> Result<PortStatus> {
    read_port_registers(window, addrs.regs())
}

/// Human readable port name: `A`..`Z`, then `AA`, `BB` and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortLabel(u8);

impl PortLabel {
    /// Label of a flat port ordinal, `None` past the last port.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        if (ordinal as usize) < GPIO_PORT_NUM {
            Some(Self(ordinal))
        } else {
            None
        }
    }

    pub fn ordinal(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for PortLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 < 26 {
            write!(f, "{}", (b'A' + self.0) as char)
        } else {
            let c = (self.0 - 26 + b'A') as char;
            write!(f, "{}{}", c, c)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortStatusRow {
    pub controller: u8,
    pub port: u8,
    pub label: PortLabel,
    pub status: PortStatus,
}

/// Reads every port of every controller, addresses taken straight from the layout.
pub fn read_all_controllers_status<W: RegisterWindow + ?Sized>(window: &W) -> Result<Vec<PortStatusRow>> {
    let mut rows = Vec::with_capacity(GPIO_CONTROLLER_NUM * GPIO_PORT_PER_CONTROLLER);
    for c in 1..=GPIO_CONTROLLER_NUM as u8 {
        for p in 0..GPIO_PORT_PER_CONTROLLER as u8 {
            let regs = PortRegisters::lookup(&GPIO_LAYOUT, c, p)?;
            rows.push(PortStatusRow {
                controller: c,
                port: p,
                label: PortLabel::from_ordinal((c - 1) * GPIO_PORT_PER_CONTROLLER as u8 + p)
                    .ok_or(ErrorKind::InvalidParam)?,
                status: read_port_registers(window, &regs)?,
            });
        }
    }
    Ok(rows)
}

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
use core::str::FromStr;

use super::PortRegisters;
use crate::board::{RegKind, GPIO_LAYOUT, GPIO_PIN_PER_PORT, GPIO_PORT_PER_CONTROLLER};
use crate::error::{Error, ErrorKind, Result};

/// Only the GPIO3 controller family is recognised.
const GPIO_NAME_PREFIX: &[u8] = b"GPIO3_P";
/// Shortest accepted name, e.g. `GPIO3_PA.0`
const GPIO_NAME_MIN_LEN: usize = 10;
const PORT_CHAR_POS: usize = 7;
/// Marks a double-letter port when it holds A-E instead of `.`
const PORT_SEP_POS: usize = 8;

/// The decoded description of one GPIO pin.
///
/// Register addresses are derived from the controller and port only and
/// cannot be changed after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinAddressSet {
    controller: u8,
    port: u8,
    pin: u8,
    port_letter: char,
    regs: PortRegisters,
}

impl PinAddressSet {
    /// Controller number, 1..=8
    pub fn controller(&self) -> u8 {
        self.controller
    }

    /// Port number inside the controller, 0..=3
    pub fn port(&self) -> u8 {
        self.port
    }

    /// Bit position inside the port registers, 0..=7
    pub fn pin(&self) -> u8 {
        self.pin
    }

    pub fn port_letter(&self) -> char {
        self.port_letter
    }

    pub fn regs(&self) -> &PortRegisters {
        &self.regs
    }

    #[inline]
    pub fn addr(&self, kind: RegKind) -> u32 {
        self.regs.addr(kind)
    }
}

impl fmt::Display for PinAddressSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "controller_num[1..8]={}", self.controller)?;
        writeln!(f, "port_num[0..3]={}", self.port)?;
        write!(f, "pin[0..7]={}", self.pin)?;
        for (kind, addr) in self.regs.iter() {
            write!(f, "\n{}={:#010x}", kind.name(), addr)?;
        }
        Ok(())
    }
}

impl FromStr for PinAddressSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        decode(s)
    }
}

/// Decodes a pin name such as `GPIO3_PJ.07` into its register addresses.
///
/// The pin number is taken from the last character of the name only.
/// Double-letter ports (`AA`..`EE`) are recognised but rejected with
/// `UnsupportedPort`.
pub fn decode(name: &str) -> Result<PinAddressSet> {
    let bytes = name.as_bytes();
    if bytes.len() < GPIO_NAME_MIN_LEN {
        debug!("gpio_name {:?} is too short", name);
        return ErrorKind::TooShort.into();
    }
    if !bytes.starts_with(GPIO_NAME_PREFIX) {
        debug!("gpio_name {:?} does not start with GPIO3_P", name);
        return ErrorKind::BadPrefix.into();
    }

    let port_char = bytes[PORT_CHAR_POS];
    let sep = bytes[PORT_SEP_POS];
    let high_port = match sep {
        b'A'..=b'E' => {
            if !(b'A'..=b'E').contains(&port_char) {
                debug!("gpio_name {:?} does not contain a valid port AA-EE", name);
                return ErrorKind::BadPortChar.into();
            }
            true
        }
        b'.' => {
            if !port_char.is_ascii_uppercase() {
                debug!("gpio_name {:?} does not contain a valid port character A-Z", name);
                return ErrorKind::BadPortChar.into();
            }
            false
        }
        _ => {
            debug!("gpio_name {:?} does not contain a valid port character A-Z or AA-EE", name);
            return ErrorKind::BadPortChar.into();
        }
    };

    let pin = bytes[bytes.len() - 1].wrapping_sub(b'0');
    if pin as usize >= GPIO_PIN_PER_PORT {
        debug!("gpio_name {:?} does not contain a valid pin number 0-7", name);
        return ErrorKind::BadPinDigit.into();
    }

    if high_port {
        warn!(
            "gpio_name {:?}: port {}{} is not supported",
            name, port_char as char, sep as char
        );
        return ErrorKind::UnsupportedPort.into();
    }

    let ordinal = port_char - b'A';
    let controller = ordinal / GPIO_PORT_PER_CONTROLLER as u8 + 1;
    let port = ordinal % GPIO_PORT_PER_CONTROLLER as u8;
    let regs = PortRegisters::lookup(&GPIO_LAYOUT, controller, port)?;

    debug!(
        "gpio_name={}, controller_num[1..8]={}, port_num[0..3]={}, pin[0..7]={}",
        name, controller, port, pin
    );
    for (kind, addr) in regs.iter() {
        debug!("{}={:#010x}", kind.name(), addr);
    }

    Ok(PinAddressSet {
        controller,
        port,
        pin,
        port_letter: port_char as char,
        regs,
    })
}

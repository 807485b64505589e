// Copyright (c) 2023 Beihang University, Huawei Technologies Co.,Ltd. All rights reserved.
// Rust-Shyper is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//          http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND,
// EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT,
// MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

use std::cell::RefCell;

use tegra_gpio::board::{Platform, RegKind, GPIO_LAYOUT};
use tegra_gpio::{
    configure_as_output, decode, read_all_controllers_status, read_port_status, set_value, write_register, ErrorKind,
    MmioWindow, PortRegisters, RegisterWindow,
};

/// Distance between a plain register and its mask-write alias.
const MSK_ALIAS: usize = 0x80;
const CONTROLLER_STRIDE: usize = 0x100;

/// Models a Tegra GPIO register block: stores to a mask alias update only the
/// lower-byte bits selected by the upper byte of the stored word.
struct TegraGpioModel {
    regs: RefCell<Vec<u16>>,
}

impl TegraGpioModel {
    fn new() -> Self {
        Self {
            regs: RefCell::new(vec![0; Platform::GPIO_MAP_SIZE / 2]),
        }
    }
}

impl RegisterWindow for TegraGpioModel {
    fn phys_base(&self) -> u32 {
        Platform::GPIO_MAP_BASE
    }

    fn size(&self) -> usize {
        Platform::GPIO_MAP_SIZE
    }

    fn load(&self, idx: usize) -> u16 {
        self.regs.borrow()[idx]
    }

    fn store(&self, idx: usize, value: u16) {
        let offset = idx * 2;
        let mut regs = self.regs.borrow_mut();
        if offset % CONTROLLER_STRIDE >= MSK_ALIAS {
            let target = (offset - MSK_ALIAS) / 2;
            let enable = value >> 8;
            regs[target] = (regs[target] & !enable) | (value & enable);
        } else {
            regs[idx] = value;
        }
    }
}

#[test]
fn output_pin_is_configured_and_driven() {
    let hw = TegraGpioModel::new();
    let pin = decode("GPIO3_PJ.07").unwrap();

    configure_as_output(&hw, &pin).unwrap();
    set_value(&hw, &pin, pin.pin(), true).unwrap();

    let status = read_port_status(&hw, &pin).unwrap();
    assert_eq!(status.get(RegKind::Cnf), 0x80);
    assert_eq!(status.get(RegKind::Oe), 0x80);
    assert_eq!(status.get(RegKind::Out), 0x80);

    set_value(&hw, &pin, pin.pin(), false).unwrap();
    let status = read_port_status(&hw, &pin).unwrap();
    assert_eq!(status.get(RegKind::Out), 0x00);
    assert_eq!(status.get(RegKind::Cnf), 0x80);
}

#[test]
fn sibling_pins_are_left_untouched() {
    let hw = TegraGpioModel::new();
    let low = decode("GPIO3_PB.02").unwrap();
    let high = decode("GPIO3_PB.05").unwrap();

    configure_as_output(&hw, &low).unwrap();
    configure_as_output(&hw, &high).unwrap();
    set_value(&hw, &low, low.pin(), true).unwrap();
    set_value(&hw, &high, high.pin(), true).unwrap();
    set_value(&hw, &low, low.pin(), false).unwrap();

    let status = read_port_status(&hw, &high).unwrap();
    assert_eq!(status.get(RegKind::Cnf), 0b0010_0100);
    assert_eq!(status.get(RegKind::Oe), 0b0010_0100);
    assert_eq!(status.get(RegKind::Out), 0b0010_0000);
}

#[test]
fn other_ports_do_not_change() {
    let hw = TegraGpioModel::new();
    let pin = decode("GPIO3_PE.00").unwrap();
    configure_as_output(&hw, &pin).unwrap();
    set_value(&hw, &pin, 0, true).unwrap();

    for row in read_all_controllers_status(&hw).unwrap() {
        let touched = row.controller == pin.controller() && row.port == pin.port();
        let expected = if touched { 0x01 } else { 0x00 };
        assert_eq!(row.status.get(RegKind::Out), expected, "port {}", row.label);
    }
}

#[test]
fn dump_rows_match_decoded_addresses() {
    let hw = TegraGpioModel::new();
    for ordinal in 0u8..26 {
        let pin = decode(&format!("GPIO3_P{}.01", (b'A' + ordinal) as char)).unwrap();
        // tag the input register of each port with its own address
        let addr = pin.addr(RegKind::In);
        write_register(&hw, addr, addr as u16).unwrap();
    }

    let rows = read_all_controllers_status(&hw).unwrap();
    for row in rows.iter().take(26) {
        let pin = decode(&format!("GPIO3_P{}.01", row.label)).unwrap();
        assert_eq!((pin.controller(), pin.port()), (row.controller, row.port));
        assert_eq!(row.status.get(RegKind::In), pin.addr(RegKind::In) as u16);
        assert_eq!(pin.regs(), &PortRegisters::lookup(&GPIO_LAYOUT, row.controller, row.port).unwrap());
    }
    for row in &rows[26..] {
        assert_eq!(row.status.get(RegKind::In), 0, "port {}", row.label);
    }
}

#[test]
fn window_smaller_than_layout_rejects_far_registers() {
    let mut mem = [0u16; 0x80];
    // covers only the first controller
    let window = unsafe { MmioWindow::new(mem.as_mut_ptr(), Platform::GPIO_MAP_BASE, 0x100) };

    let near = decode("GPIO3_PA.01").unwrap();
    configure_as_output(&window, &near).unwrap();

    let far = decode("GPIO3_PE.01").unwrap();
    let err = configure_as_output(&window, &far).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfWindow);
}

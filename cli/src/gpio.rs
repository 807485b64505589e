// Copyright (c) 2023 Beihang University, Huawei Technologies Co.,Ltd. All rights reserved.
// Rust-Shyper is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//          http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND,
// EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT,
// MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

use log::info;
use tegra_gpio::{
    board::Platform, configure_as_output, read_all_controllers_status, read_port_status, set_value, PinAddressSet,
    RegisterWindow, Result,
};

use crate::{
    status::{all_status_json, format_all_status, format_port_status, port_status_json},
    window::RegisterMap,
};

fn map_registers(device: &str) -> Result<RegisterMap> {
    RegisterMap::acquire(device, Platform::GPIO_MAP_BASE, Platform::GPIO_MAP_SIZE)
}

fn print_port_status<W: RegisterWindow + ?Sized>(window: &W, pin: &PinAddressSet) -> Result<()> {
    let status = read_port_status(window, pin)?;
    println!("{}", format_port_status(pin, &status));
    Ok(())
}

fn drive_output<W: RegisterWindow + ?Sized>(window: &W, pin: &PinAddressSet, value: bool) -> Result<()> {
    print_port_status(window, pin)?;
    info!("setting GPIO to output mode...");
    configure_as_output(window, pin)?;
    info!("setting GPIO to a {}...", value as u8);
    set_value(window, pin, pin.pin(), value)?;
    print_port_status(window, pin)
}

pub fn gpio_decode(pin: &PinAddressSet) {
    println!("port{}", pin.port_letter());
    println!("{}", pin);
}

pub fn gpio_status(device: &str, pin: Option<&PinAddressSet>, json: bool) -> Result<()> {
    let map = map_registers(device)?;
    {
        let window = map.window();
        match pin {
            Some(pin) => {
                let status = read_port_status(&window, pin)?;
                if json {
                    println!("{}", port_status_json(pin, &status)?);
                } else {
                    println!("{}", format_port_status(pin, &status));
                }
            }
            None => {
                let rows = read_all_controllers_status(&window)?;
                if json {
                    println!("{}", all_status_json(&rows)?);
                } else {
                    print!("{}", format_all_status(&rows));
                }
            }
        }
    }
    map.release()
}

pub fn gpio_set(device: &str, pin: &PinAddressSet, value: bool) -> Result<()> {
    let map = map_registers(device)?;
    drive_output(&map.window(), pin, value)?;
    map.release()
}

/// Decode, configure as output, drive high and show the port before and after.
pub fn gpio_demo(device: &str, pin: &PinAddressSet) -> Result<()> {
    let map = map_registers(device)?;
    drive_output(&map.window(), pin, true)?;
    println!("done");
    map.release()
}

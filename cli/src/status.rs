// Copyright (c) 2023 Beihang University, Huawei Technologies Co.,Ltd. All rights reserved.
// Rust-Shyper is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//          http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND,
// EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT,
// MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

use std::fmt::Write;

use serde::Serialize;
use tegra_gpio::{board::RegKind, PinAddressSet, PortStatus, PortStatusRow};

#[derive(Serialize, Debug, PartialEq)]
struct RegisterValues {
    cnf: u16,
    msk_cnf: u16,
    oe: u16,
    msk_oe: u16,
    out: u16,
    msk_out: u16,
    #[serde(rename = "in")]
    input: u16,
}

impl From<&PortStatus> for RegisterValues {
    fn from(status: &PortStatus) -> Self {
        Self {
            cnf: status.get(RegKind::Cnf),
            msk_cnf: status.get(RegKind::MskCnf),
            oe: status.get(RegKind::Oe),
            msk_oe: status.get(RegKind::MskOe),
            out: status.get(RegKind::Out),
            msk_out: status.get(RegKind::MskOut),
            input: status.get(RegKind::In),
        }
    }
}

#[derive(Serialize, Debug)]
struct PortStatusJson {
    controller: u8,
    port: u8,
    label: String,
    registers: RegisterValues,
}

/// One line for the port holding `pin`, e.g. `portJ: CNF=0080, ...`.
pub fn format_port_status(pin: &PinAddressSet, status: &PortStatus) -> String {
    format!("port{}: {}", pin.port_letter(), status)
}

/// Register dump of every controller, grouped by controller.
pub fn format_all_status(rows: &[PortStatusRow]) -> String {
    let mut out = String::new();
    let mut controller = 0;
    for row in rows {
        if row.controller != controller {
            controller = row.controller;
            let _ = writeln!(out, "GPIO Controller {}", controller);
        }
        let _ = writeln!(out, "  port{} [{}]:     {}", row.label, row.port, row.status);
    }
    out
}

pub fn port_status_json(pin: &PinAddressSet, status: &PortStatus) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&PortStatusJson {
        controller: pin.controller(),
        port: pin.port(),
        label: pin.port_letter().to_string(),
        registers: status.into(),
    })
}

pub fn all_status_json(rows: &[PortStatusRow]) -> serde_json::Result<String> {
    let rows: Vec<PortStatusJson> = rows
        .iter()
        .map(|row| PortStatusJson {
            controller: row.controller,
            port: row.port,
            label: row.label.to_string(),
            registers: (&row.status).into(),
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tegra_gpio::{decode, PortLabel};

    fn rows() -> Vec<PortStatusRow> {
        (0..8u8)
            .map(|ordinal| PortStatusRow {
                controller: ordinal / 4 + 1,
                port: ordinal % 4,
                label: PortLabel::from_ordinal(ordinal).unwrap(),
                status: PortStatus::default(),
            })
            .collect()
    }

    #[test]
    fn single_port_line() {
        let pin = decode("GPIO3_PJ.07").unwrap();
        assert_eq!(
            format_port_status(&pin, &PortStatus::default()),
            "portJ: CNF=0000, MSK_CNF=0000, OE=0000, MSK_OE=0000, OUT=0000, MSK_OUT=0000, IN=0000"
        );
    }

    #[test]
    fn dump_groups_by_controller() {
        let text = format_all_status(&rows());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "GPIO Controller 1");
        assert!(lines[1].starts_with("  portA [0]:     CNF=0000"));
        assert_eq!(lines[5], "GPIO Controller 2");
        assert!(lines[6].starts_with("  portE [0]:"));
    }

    #[test]
    fn json_uses_register_names() {
        let pin = decode("GPIO3_PC.03").unwrap();
        let json = port_status_json(&pin, &PortStatus::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["controller"], 1);
        assert_eq!(value["port"], 2);
        assert_eq!(value["label"], "C");
        assert_eq!(value["registers"]["in"], 0);

        let all: serde_json::Value = serde_json::from_str(&all_status_json(&rows()).unwrap()).unwrap();
        assert_eq!(all.as_array().map(Vec::len), Some(8));
    }
}

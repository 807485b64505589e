// Copyright (c) 2023 Beihang University, Huawei Technologies Co.,Ltd. All rights reserved.
// Rust-Shyper is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//          http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND,
// EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT,
// MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

use crate::board::{GpioLayout, GPIO_CONTROLLER_NUM};

pub struct Tx1Platform;

impl Tx1Platform {
    pub const GPIO_1: u32 = 0x6000d000;
    pub const GPIO_2: u32 = 0x6000d100;
    pub const GPIO_3: u32 = 0x6000d200;
    pub const GPIO_4: u32 = 0x6000d300;
    pub const GPIO_5: u32 = 0x6000d400;
    pub const GPIO_6: u32 = 0x6000d500;
    pub const GPIO_7: u32 = 0x6000d600;
    pub const GPIO_8: u32 = 0x6000d700;

    // GPIO_1..GPIO_8 are contiguous and mapped as a single block
    pub const GPIO_MAP_BASE: u32 = Self::GPIO_1;
    pub const GPIO_MAP_SIZE: usize = 0x100 * GPIO_CONTROLLER_NUM;
}

pub static GPIO_LAYOUT: GpioLayout = GpioLayout {
    map_base: Tx1Platform::GPIO_MAP_BASE,
    map_size: Tx1Platform::GPIO_MAP_SIZE,
    controller_base: [
        Tx1Platform::GPIO_1,
        Tx1Platform::GPIO_2,
        Tx1Platform::GPIO_3,
        Tx1Platform::GPIO_4,
        Tx1Platform::GPIO_5,
        Tx1Platform::GPIO_6,
        Tx1Platform::GPIO_7,
        Tx1Platform::GPIO_8,
    ],
    reg_offset: [
        // CNF
        [0x00, 0x04, 0x08, 0x0c],
        // MSK_CNF
        [0x80, 0x84, 0x88, 0x8c],
        // OE
        [0x10, 0x14, 0x18, 0x1c],
        // MSK_OE
        [0x90, 0x94, 0x98, 0x9c],
        // OUT
        [0x20, 0x24, 0x28, 0x2c],
        // MSK_OUT
        [0xa0, 0xa4, 0xa8, 0xac],
        // IN
        [0x30, 0x34, 0x38, 0x3c],
    ],
};

// Copyright (c) 2023 Beihang University, Huawei Technologies Co.,Ltd. All rights reserved.
// Rust-Shyper is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//          http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND,
// EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT,
// MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::error::{ErrorKind, Result};

/// A block of physical address space reachable through 16-bit loads and stores.
///
/// Implementors only see element indices that [`read_register`] and
/// [`write_register`] have already checked against [`RegisterWindow::size`].
pub trait RegisterWindow {
    /// Physical address of the first byte of the window.
    fn phys_base(&self) -> u32;
    /// Size of the window in bytes.
    fn size(&self) -> usize;
    /// Loads the 16-bit element at `idx`.
    fn load(&self, idx: usize) -> u16;
    /// Stores `value` into the 16-bit element at `idx`.
    fn store(&self, idx: usize, value: u16);
}

/// Translates a physical register address into a 16-bit element index of `window`.
fn element_index<W: RegisterWindow + ?Sized>(window: &W, addr: u32) -> Result<usize> {
    let offset = match addr.checked_sub(window.phys_base()) {
        Some(offset) => offset as usize,
        None => return ErrorKind::OutOfWindow.into(),
    };
    match offset.checked_add(2) {
        Some(end) if offset % 2 == 0 && end <= window.size() => Ok(offset / 2),
        _ => ErrorKind::OutOfWindow.into(),
    }
}

/// Checks that `addr` is a register `window` can reach, without touching it.
pub fn check_register<W: RegisterWindow + ?Sized>(window: &W, addr: u32) -> Result<()> {
    element_index(window, addr).map(|_| ())
}

/// Reads the 16-bit register at physical address `addr`.
pub fn read_register<W: RegisterWindow + ?Sized>(window: &W, addr: u32) -> Result<u16> {
    let idx = element_index(window, addr)?;
    Ok(window.load(idx))
}

/// Writes `value` to the 16-bit register at physical address `addr`.
pub fn write_register<W: RegisterWindow + ?Sized>(window: &W, addr: u32, value: u16) -> Result<()> {
    let idx = element_index(window, addr)?;
    window.store(idx, value);
    Ok(())
}

/// A mapped register window accessed with volatile 16-bit operations.
#[derive(Debug)]
pub struct MmioWindow<'a> {
    ptr: NonNull<u16>,
    phys_base: u32,
    size: usize,
    _marker: PhantomData<&'a mut [u16]>,
}

impl MmioWindow<'_> {
    /// Create a new `MmioWindow` over `size` bytes starting at `ptr`
    ///
    /// ## Safety
    ///
    /// - `ptr` must be non-null and aligned to 2 bytes.
    /// - `size` bytes starting at `ptr` must stay mapped read/write for `'a`.
    pub const unsafe fn new<'a>(ptr: *mut u16, phys_base: u32, size: usize) -> MmioWindow<'a> {
        // SAFETY: `ptr` is non-null as promised by the caller.
        MmioWindow {
            ptr: NonNull::new_unchecked(ptr),
            phys_base,
            size,
            _marker: PhantomData,
        }
    }
}

impl RegisterWindow for MmioWindow<'_> {
    fn phys_base(&self) -> u32 {
        self.phys_base
    }

    fn size(&self) -> usize {
        self.size
    }

    fn load(&self, idx: usize) -> u16 {
        debug_assert!(idx < self.size / 2);
        // SAFETY: `idx` was bounds-checked against `size`, which the caller of
        // `MmioWindow::new` promised is mapped.
        unsafe { self.ptr.as_ptr().add(idx).read_volatile() }
    }

    fn store(&self, idx: usize, value: u16) {
        debug_assert!(idx < self.size / 2);
        // SAFETY: see `load`.
        unsafe { self.ptr.as_ptr().add(idx).write_volatile(value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: u32 = 0x6000d000;

    #[test]
    fn element_index_is_half_the_byte_offset() {
        let mut mem = [0u16; 8];
        let window = unsafe { MmioWindow::new(mem.as_mut_ptr(), BASE, 16) };
        write_register(&window, BASE + 6, 0xbeef).unwrap();
        assert_eq!(read_register(&window, BASE + 6).unwrap(), 0xbeef);
        drop(window);
        assert_eq!(mem[3], 0xbeef);
    }

    #[test]
    fn last_element_is_reachable() {
        let mut mem = [0u16; 4];
        let window = unsafe { MmioWindow::new(mem.as_mut_ptr(), BASE, 8) };
        assert!(write_register(&window, BASE + 6, 1).is_ok());
        assert_eq!(write_register(&window, BASE + 8, 1).unwrap_err().kind(), ErrorKind::OutOfWindow);
    }

    #[test]
    fn address_below_base_is_rejected() {
        let mut mem = [0u16; 4];
        let window = unsafe { MmioWindow::new(mem.as_mut_ptr(), BASE, 8) };
        assert_eq!(read_register(&window, BASE - 2).unwrap_err().kind(), ErrorKind::OutOfWindow);
    }

    /// Window spanning the whole address space, never dereferenced.
    struct HugeWindow;

    impl RegisterWindow for HugeWindow {
        fn phys_base(&self) -> u32 {
            0
        }

        fn size(&self) -> usize {
            usize::MAX
        }

        fn load(&self, _idx: usize) -> u16 {
            unreachable!()
        }

        fn store(&self, _idx: usize, _value: u16) {
            unreachable!()
        }
    }

    #[test]
    fn offsets_near_the_top_do_not_wrap() {
        let top = u32::MAX - 1;
        assert_eq!(element_index(&HugeWindow, top).unwrap(), (top / 2) as usize);
        assert_eq!(element_index(&HugeWindow, u32::MAX).unwrap_err().kind(), ErrorKind::OutOfWindow);
        assert!(check_register(&HugeWindow, top).is_ok());
    }

    #[test]
    fn check_register_leaves_window_untouched() {
        let mut mem = [0x1234u16; 4];
        let window = unsafe { MmioWindow::new(mem.as_mut_ptr(), BASE, 8) };
        assert!(check_register(&window, BASE + 6).is_ok());
        assert_eq!(check_register(&window, BASE + 8).unwrap_err().kind(), ErrorKind::OutOfWindow);
        drop(window);
        assert!(mem.iter().all(|&v| v == 0x1234));
    }

    #[test]
    fn unaligned_address_is_rejected() {
        let mut mem = [0u16; 4];
        let window = unsafe { MmioWindow::new(mem.as_mut_ptr(), BASE, 8) };
        assert_eq!(read_register(&window, BASE + 1).unwrap_err().kind(), ErrorKind::OutOfWindow);
    }
}

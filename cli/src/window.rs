// Copyright (c) 2023 Beihang University, Huawei Technologies Co.,Ltd. All rights reserved.
// Rust-Shyper is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//          http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND,
// EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT,
// MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

use std::{ffi::c_void, fs::OpenOptions, num::NonZeroUsize, os::unix::fs::OpenOptionsExt, ptr::NonNull};

use libc::{off_t, sysconf, O_SYNC, _SC_PAGE_SIZE};
use log::{debug, error, info, warn};
use nix::sys::mman::{mmap, munmap, MapFlags, ProtFlags};
use tegra_gpio::{ErrorKind, MmioWindow, Result};

/// A shared mapping of the GPIO controller registers taken from a
/// physical memory device.
#[derive(Debug)]
pub struct RegisterMap {
    addr: NonNull<c_void>,
    size: usize,
    phys_base: u32,
    mapped: bool,
}

impl RegisterMap {
    /// Maps `size` bytes of physical memory starting at `phys_base` through `device`.
    pub fn acquire(device: &str, phys_base: u32, size: usize) -> Result<Self> {
        let page_size = unsafe { sysconf(_SC_PAGE_SIZE) } as u64;
        if page_size == 0 || phys_base as u64 % page_size != 0 {
            error!("physical base {:#x} is not aligned to page size {:#x}", phys_base, page_size);
            return ErrorKind::InvalidParam.into();
        }
        let len = match NonZeroUsize::new(size) {
            Some(len) => len,
            None => return ErrorKind::InvalidParam.into(),
        };

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(O_SYNC)
            .open(device)
            .map_err(|err| {
                error!("cannot open {}, maybe try running as root user", device);
                ErrorKind::WindowUnavailable.wrap(Box::new(err))
            })?;

        // SAFETY: a fresh shared mapping of device memory, nothing else in
        // this process aliases it.
        let addr = unsafe {
            mmap(
                None,
                len,
                ProtFlags::PROT_READ | ProtFlags::PROT_WRITE,
                MapFlags::MAP_SHARED,
                &file,
                phys_base as off_t,
            )
        }
        .map_err(|err| {
            error!("cannot map GPIO registers");
            ErrorKind::WindowUnavailable.wrap(Box::new(err))
        })?;
        // the mapping outlives the descriptor
        drop(file);

        info!("GPIO registers {:#x}+{:#x} mapped to {:p}", phys_base, size, addr);
        Ok(Self {
            addr,
            size,
            phys_base,
            mapped: true,
        })
    }

    pub fn window(&self) -> MmioWindow<'_> {
        // SAFETY: the mapping is page aligned and stays valid until `self`
        // is released or dropped, which the returned lifetime prevents.
        unsafe { MmioWindow::new(self.addr.as_ptr() as *mut u16, self.phys_base, self.size) }
    }

    /// Unmaps the registers, reporting failure to the caller.
    pub fn release(mut self) -> Result<()> {
        self.unmap()
    }

    fn unmap(&mut self) -> Result<()> {
        if !self.mapped {
            return Ok(());
        }
        self.mapped = false;
        // SAFETY: `addr` and `size` describe the mapping created in `acquire`
        // and no `MmioWindow` borrowing `self` is alive.
        unsafe { munmap(self.addr, self.size) }.map_err(|err| {
            error!("cannot unmap GPIO registers");
            ErrorKind::UnmapFailed.wrap(Box::new(err))
        })?;
        debug!("GPIO registers unmapped");
        Ok(())
    }
}

impl Drop for RegisterMap {
    fn drop(&mut self) {
        if let Err(err) = self.unmap() {
            warn!("{}", err);
        }
    }
}

//! Recording fakes for factory/swap chain tests

use std::cell::RefCell;
use std::rc::Rc;

use super::{DeviceHandle, DxgiFactory, SwapChain, SwapChainDesc, WindowHandle};
use crate::error::Result;

pub const HWND: WindowHandle = WindowHandle(0xA11CE);
pub const DEVICE: DeviceHandle = DeviceHandle(0xD0D0);

type CallLog = Rc<RefCell<Vec<String>>>;

#[derive(Default)]
pub struct FakeFactory {
    pub log: CallLog,
}

pub struct FakeSwapChain {
    log: CallLog,
}

impl SwapChain for FakeSwapChain {
    fn present(&mut self, sync_interval: u32) -> Result<()> {
        self.log.borrow_mut().push(format!("present({sync_interval})"));
        Ok(())
    }

    fn resize_buffers(&mut self, width: u32, height: u32) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("resize_buffers({width}x{height})"));
        Ok(())
    }
}

impl DxgiFactory for FakeFactory {
    type SwapChain = FakeSwapChain;

    fn create_swap_chain_for_hwnd(
        &mut self,
        _device: DeviceHandle,
        window: WindowHandle,
        _desc: &SwapChainDesc,
    ) -> Result<Self::SwapChain> {
        self.log
            .borrow_mut()
            .push(format!("create_swap_chain_for_hwnd({:#X})", window.0));
        Ok(FakeSwapChain {
            log: Rc::clone(&self.log),
        })
    }

    fn make_window_association(&mut self, window: WindowHandle, flags: u32) -> Result<()> {
        self.log
            .borrow_mut()
            .push(format!("make_window_association({:#X}, {:#x})", window.0, flags));
        Ok(())
    }

    fn is_current(&self) -> bool {
        true
    }
}

//! DXGI factory and swap chain seam
//!
//! The real mod sits between the game and DXGI as a pass-through factory:
//! every call is forwarded verbatim to the wrapped object, and one extra
//! operation toggles the loading-screen DVD mode on the most recently
//! created swap chain. COM's reference counting is reproduced here as an
//! explicit counter on the wrapper rather than leaning on `Drop`, since the
//! game hands out and releases references on its own schedule.
//!
//! The traits model the slice of the factory surface the game exercises.
//! Interposing them requires a deployment where the game creates its factory
//! through the wrapper (a dxgi proxy DLL); a host that only injects into the
//! process has no factory to wrap and runs the checker with
//! [`DetachedFactory`] as the placeholder type.

#[cfg(test)]
pub(crate) mod fake;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Raw HWND value, carried opaquely
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHandle(pub u64);

/// Raw device interface pointer, forwarded untouched to the wrapped factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceHandle(pub u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapChainDesc {
    pub width: u32,
    pub height: u32,
    pub buffer_count: u32,
    pub format: u32,
}

/// The swap chain surface the game drives after creation.
pub trait SwapChain {
    fn present(&mut self, sync_interval: u32) -> Result<()>;
    fn resize_buffers(&mut self, width: u32, height: u32) -> Result<()>;
}

/// The factory surface the game drives.
pub trait DxgiFactory {
    type SwapChain: SwapChain;

    fn create_swap_chain_for_hwnd(
        &mut self,
        device: DeviceHandle,
        window: WindowHandle,
        desc: &SwapChainDesc,
    ) -> Result<Self::SwapChain>;

    fn make_window_association(&mut self, window: WindowHandle, flags: u32) -> Result<()>;

    fn is_current(&self) -> bool;
}

/// Stand-in factory type for hosts that run the checker without sitting
/// between the game and DXGI. Never constructed at runtime; it only names
/// the wrapper type parameter when no wrapper exists.
pub struct DetachedFactory;

/// Uninhabited: a detached factory cannot produce swap chains.
pub enum DetachedSwapChain {}

impl SwapChain for DetachedSwapChain {
    fn present(&mut self, _sync_interval: u32) -> Result<()> {
        match *self {}
    }

    fn resize_buffers(&mut self, _width: u32, _height: u32) -> Result<()> {
        match *self {}
    }
}

impl DxgiFactory for DetachedFactory {
    type SwapChain = DetachedSwapChain;

    fn create_swap_chain_for_hwnd(
        &mut self,
        _device: DeviceHandle,
        _window: WindowHandle,
        _desc: &SwapChainDesc,
    ) -> Result<Self::SwapChain> {
        Err(Error::Dxgi("no factory interposed".to_string()))
    }

    fn make_window_association(&mut self, _window: WindowHandle, _flags: u32) -> Result<()> {
        Err(Error::Dxgi("no factory interposed".to_string()))
    }

    fn is_current(&self) -> bool {
        false
    }
}

/// Wraps a created swap chain and carries the DVD-mode flag. What the mode
/// actually renders is the concern of whatever implements the wrapped chain;
/// this layer only stores and forwards state.
pub struct SwapChainWrapper<C: SwapChain> {
    target: C,
    dvd_mode: bool,
}

impl<C: SwapChain> SwapChainWrapper<C> {
    fn new(target: C) -> Self {
        Self {
            target,
            dvd_mode: false,
        }
    }

    pub fn set_dvd_mode(&mut self, enabled: bool) {
        debug!("DVD mode {}", if enabled { "enabled" } else { "disabled" });
        self.dvd_mode = enabled;
    }

    pub fn dvd_mode(&self) -> bool {
        self.dvd_mode
    }
}

impl<C: SwapChain> SwapChain for SwapChainWrapper<C> {
    fn present(&mut self, sync_interval: u32) -> Result<()> {
        self.target.present(sync_interval)
    }

    fn resize_buffers(&mut self, width: u32, height: u32) -> Result<()> {
        self.target.resize_buffers(width, height)
    }
}

/// Shared handle to a wrapped swap chain: the game holds one as its swap
/// chain while the factory wrapper retains another for DVD-mode routing.
pub struct SharedSwapChain<C: SwapChain>(Rc<RefCell<SwapChainWrapper<C>>>);

impl<C: SwapChain> Clone for SharedSwapChain<C> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<C: SwapChain> SharedSwapChain<C> {
    pub fn dvd_mode(&self) -> bool {
        self.0.borrow().dvd_mode()
    }
}

impl<C: SwapChain> SwapChain for SharedSwapChain<C> {
    fn present(&mut self, sync_interval: u32) -> Result<()> {
        self.0.borrow_mut().present(sync_interval)
    }

    fn resize_buffers(&mut self, width: u32, height: u32) -> Result<()> {
        self.0.borrow_mut().resize_buffers(width, height)
    }
}

/// Pass-through factory with the one extra DVD-mode operation.
pub struct FactoryWrapper<F: DxgiFactory> {
    /// Live references handed out, starting with the creator's
    ref_count: u32,
    target: F,
    current: Option<SharedSwapChain<F::SwapChain>>,
}

impl<F: DxgiFactory> FactoryWrapper<F> {
    pub fn new(target: F) -> Self {
        Self {
            ref_count: 1,
            target,
            current: None,
        }
    }

    pub fn add_ref(&mut self) -> u32 {
        self.ref_count += 1;
        self.ref_count
    }

    /// Drop one reference. At zero the wrapper lets go of the retained swap
    /// chain; the owner is expected to drop the wrapper itself.
    pub fn release(&mut self) -> u32 {
        self.ref_count = self.ref_count.saturating_sub(1);
        if self.ref_count == 0 {
            self.current = None;
        }
        self.ref_count
    }

    pub fn ref_count(&self) -> u32 {
        self.ref_count
    }

    /// Route a DVD-mode toggle to the most recently created swap chain.
    pub fn toggle_dvd_mode(&mut self, enabled: bool) {
        match &self.current {
            Some(chain) => chain.0.borrow_mut().set_dvd_mode(enabled),
            None => warn!("DVD mode toggled before any swap chain exists; ignoring"),
        }
    }

    /// DVD-mode state of the current swap chain, if one has been created
    pub fn dvd_mode(&self) -> Option<bool> {
        self.current.as_ref().map(|chain| chain.dvd_mode())
    }
}

impl<F: DxgiFactory> DxgiFactory for FactoryWrapper<F> {
    type SwapChain = SharedSwapChain<F::SwapChain>;

    fn create_swap_chain_for_hwnd(
        &mut self,
        device: DeviceHandle,
        window: WindowHandle,
        desc: &SwapChainDesc,
    ) -> Result<Self::SwapChain> {
        let chain = self.target.create_swap_chain_for_hwnd(device, window, desc)?;
        let shared = SharedSwapChain(Rc::new(RefCell::new(SwapChainWrapper::new(chain))));
        self.current = Some(shared.clone());
        Ok(shared)
    }

    fn make_window_association(&mut self, window: WindowHandle, flags: u32) -> Result<()> {
        self.target.make_window_association(window, flags)
    }

    fn is_current(&self) -> bool {
        self.target.is_current()
    }
}

#[cfg(test)]
mod tests {
    use super::fake::{FakeFactory, HWND, DEVICE};
    use super::*;

    #[test]
    fn test_ref_count_semantics() {
        let mut wrapper = FactoryWrapper::new(FakeFactory::default());
        assert_eq!(wrapper.ref_count(), 1);
        assert_eq!(wrapper.add_ref(), 2);
        assert_eq!(wrapper.release(), 1);
        assert_eq!(wrapper.release(), 0);
        // Releasing past zero stays at zero
        assert_eq!(wrapper.release(), 0);
    }

    #[test]
    fn test_release_to_zero_drops_retained_chain() {
        let mut wrapper = FactoryWrapper::new(FakeFactory::default());
        wrapper
            .create_swap_chain_for_hwnd(DEVICE, HWND, &SwapChainDesc::default())
            .unwrap();
        assert_eq!(wrapper.dvd_mode(), Some(false));

        wrapper.release();
        assert_eq!(wrapper.dvd_mode(), None);
    }

    #[test]
    fn test_forwards_calls_verbatim() {
        let mut wrapper = FactoryWrapper::new(FakeFactory::default());
        assert!(wrapper.is_current());

        wrapper.make_window_association(HWND, 0x2).unwrap();
        let mut chain = wrapper
            .create_swap_chain_for_hwnd(DEVICE, HWND, &SwapChainDesc::default())
            .unwrap();
        chain.present(1).unwrap();
        chain.present(1).unwrap();
        chain.resize_buffers(1280, 720).unwrap();

        let log = wrapper.target.log.borrow();
        assert_eq!(
            *log,
            vec![
                "make_window_association(0xA11CE, 0x2)".to_string(),
                "create_swap_chain_for_hwnd(0xA11CE)".to_string(),
                "present(1)".to_string(),
                "present(1)".to_string(),
                "resize_buffers(1280x720)".to_string(),
            ]
        );
    }

    #[test]
    fn test_detached_factory_never_yields_a_chain() {
        let mut wrapper = FactoryWrapper::new(DetachedFactory);
        assert!(!wrapper.is_current());
        assert!(
            wrapper
                .create_swap_chain_for_hwnd(DEVICE, HWND, &SwapChainDesc::default())
                .is_err()
        );
        assert_eq!(wrapper.dvd_mode(), None);
    }

    #[test]
    fn test_toggle_routes_to_latest_chain() {
        let mut wrapper = FactoryWrapper::new(FakeFactory::default());

        // No chain yet: the toggle is dropped, not fatal
        wrapper.toggle_dvd_mode(true);
        assert_eq!(wrapper.dvd_mode(), None);

        let first = wrapper
            .create_swap_chain_for_hwnd(DEVICE, HWND, &SwapChainDesc::default())
            .unwrap();
        let second = wrapper
            .create_swap_chain_for_hwnd(DEVICE, HWND, &SwapChainDesc::default())
            .unwrap();

        wrapper.toggle_dvd_mode(true);
        assert!(!first.dvd_mode());
        assert!(second.dvd_mode());

        wrapper.toggle_dvd_mode(false);
        assert!(!second.dvd_mode());
    }
}

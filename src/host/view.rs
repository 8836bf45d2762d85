use std::cell::RefCell;
use std::rc::Rc;

use crate::{foundation::core::Rect, host::mask::MaskSlot};

/// Host handle shared between the container and the indicator it carries.
pub type SharedHost = Rc<RefCell<HostView>>;

/// The container view an indicator is attached to: its bounds and its mask slot.
#[derive(Debug)]
pub struct HostView {
    bounds: Rect,
    mask: MaskSlot,
}

impl HostView {
    /// A host with the given bounds and no mask.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            mask: MaskSlot::default(),
        }
    }

    /// A host ready to share with an indicator.
    pub fn shared(bounds: Rect) -> SharedHost {
        Rc::new(RefCell::new(Self::new(bounds)))
    }

    /// Current bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Resize. Attached indicators pick the new bounds up on their next layout pass.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// The mask slot.
    pub fn mask(&self) -> &MaskSlot {
        &self.mask
    }

    pub(crate) fn mask_mut(&mut self) -> &mut MaskSlot {
        &mut self.mask
    }

    /// Return `true` while some mask limits what the host shows.
    pub fn is_masked(&self) -> bool {
        self.mask.is_masked()
    }
}

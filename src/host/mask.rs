use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    foundation::error::{RevealError, RevealResult},
    geometry::ring::RingShape,
};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a mask writer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndicatorId(u64);

impl IndicatorId {
    /// Allocate a process-unique id.
    pub fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Shape currently limiting which pixels of the host are visible.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    /// Who installed the mask.
    pub owner: IndicatorId,
    /// Visible region: the stroked ring.
    pub shape: RingShape,
}

/// The host's single mask slot.
///
/// Writes are owner-checked: only an empty slot can be installed into, only the owner
/// can update or clear it, and an owner that cleared its mask cannot install again.
#[derive(Debug, Default)]
pub struct MaskSlot {
    current: Option<Mask>,
    retired: BTreeSet<IndicatorId>,
    installs: u32,
    clears: u32,
}

impl MaskSlot {
    /// Installed mask, if any.
    pub fn get(&self) -> Option<&Mask> {
        self.current.as_ref()
    }

    /// Return `true` while a mask is installed.
    pub fn is_masked(&self) -> bool {
        self.current.is_some()
    }

    /// Number of successful installs over the slot's lifetime.
    pub fn install_count(&self) -> u32 {
        self.installs
    }

    /// Number of successful clears over the slot's lifetime.
    pub fn clear_count(&self) -> u32 {
        self.clears
    }

    /// Install `shape` as the mask on behalf of `owner`.
    pub fn install(&mut self, owner: IndicatorId, shape: RingShape) -> RevealResult<()> {
        if let Some(mask) = &self.current {
            return Err(RevealError::mask(format!(
                "slot already holds a mask owned by {:?}",
                mask.owner
            )));
        }
        if self.retired.contains(&owner) {
            return Err(RevealError::mask(format!(
                "{owner:?} already released its mask"
            )));
        }
        self.current = Some(Mask { owner, shape });
        self.installs += 1;
        Ok(())
    }

    /// Replace the shape of a mask `owner` holds.
    pub fn update(&mut self, owner: IndicatorId, shape: RingShape) -> RevealResult<()> {
        match &mut self.current {
            Some(mask) if mask.owner == owner => {
                mask.shape = shape;
                Ok(())
            }
            Some(mask) => Err(RevealError::mask(format!(
                "{owner:?} cannot update a mask owned by {:?}",
                mask.owner
            ))),
            None => Err(RevealError::mask("no mask installed")),
        }
    }

    /// Remove the mask `owner` holds. The owner is retired afterwards.
    pub fn clear(&mut self, owner: IndicatorId) -> RevealResult<()> {
        match &self.current {
            Some(mask) if mask.owner == owner => {
                self.current = None;
                self.retired.insert(owner);
                self.clears += 1;
                Ok(())
            }
            Some(mask) => Err(RevealError::mask(format!(
                "{owner:?} cannot clear a mask owned by {:?}",
                mask.owner
            ))),
            None => Err(RevealError::mask("no mask installed")),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/mask.rs"]
mod tests;

use std::sync::atomic::{AtomicBool, Ordering};

/// Shared per-record keep flags.
///
/// The only mutation is `discard`, which moves a flag from true to false.
/// Concurrent writers therefore always agree on the final value and need no
/// lock; a stale read can only cause an extra comparison.
#[derive(Debug)]
pub struct KeepState {
    flags: Vec<AtomicBool>,
}

impl KeepState {
    pub fn from_flags(flags: &[bool]) -> Self {
        Self {
            flags: flags.iter().map(|&f| AtomicBool::new(f)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn is_kept(&self, idx: usize) -> bool {
        self.flags[idx].load(Ordering::Relaxed)
    }

    pub fn discard(&self, idx: usize) {
        self.flags[idx].store(false, Ordering::Relaxed);
    }

    pub fn kept_count(&self) -> usize {
        self.flags.iter().filter(|f| f.load(Ordering::Relaxed)).count()
    }

    pub fn into_flags(self) -> Vec<bool> {
        self.flags.into_iter().map(AtomicBool::into_inner).collect()
    }
}

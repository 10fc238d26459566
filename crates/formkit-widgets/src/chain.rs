#![forbid(unsafe_code)]

//! Focus chain: the order in which return moves between fields.
//!
//! The order is never stored by the form. A [`ChainProvider`] is asked for the
//! first field and for the field after a given one every time, so fields can
//! be hidden, skipped or added at runtime without stale state.
//!
//! # Caller contract
//!
//! A provider must describe a finite sequence: starting from `first()` and
//! repeatedly calling `after()`, it must eventually answer `None`. A provider
//! that cycles makes [`FocusChain::iter`] non-terminating. The chain does not
//! detect this.

use formkit_core::FieldId;

/// Answers ordering questions about the fields of a form.
pub trait ChainProvider {
    /// First field of the chain, `None` for an empty form.
    fn first(&self) -> Option<FieldId>;

    /// Field following `current`, `None` at the end of the chain.
    fn after(&self, current: FieldId) -> Option<FieldId>;
}

/// A fixed order. Also the fallback a form uses without a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedChain {
    order: Vec<FieldId>,
}

impl OrderedChain {
    pub fn new(order: impl IntoIterator<Item = FieldId>) -> Self {
        Self {
            order: order.into_iter().collect(),
        }
    }

    pub fn push(&mut self, id: FieldId) {
        self.order.push(id);
    }

    pub fn remove(&mut self, id: FieldId) -> bool {
        let before = self.order.len();
        self.order.retain(|f| *f != id);
        before != self.order.len()
    }

    pub fn contains(&self, id: FieldId) -> bool {
        self.order.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl ChainProvider for OrderedChain {
    fn first(&self) -> Option<FieldId> {
        self.order.first().copied()
    }

    fn after(&self, current: FieldId) -> Option<FieldId> {
        let pos = self.order.iter().position(|f| *f == current)?;
        self.order.get(pos + 1).copied()
    }
}

/// Derived traversal operations over a provider.
#[derive(Clone, Copy)]
pub struct FocusChain<'a> {
    provider: &'a dyn ChainProvider,
}

impl<'a> FocusChain<'a> {
    pub fn new(provider: &'a dyn ChainProvider) -> Self {
        Self { provider }
    }

    pub fn first(&self) -> Option<FieldId> {
        self.provider.first()
    }

    pub fn after(&self, current: FieldId) -> Option<FieldId> {
        self.provider.after(current)
    }

    /// Whether nothing follows `field`.
    pub fn is_last(&self, field: FieldId) -> bool {
        self.after(field).is_none()
    }

    /// The last field of the chain.
    pub fn last(&self) -> Option<FieldId> {
        self.iter().last()
    }

    /// Walk the chain lazily from the first field.
    ///
    /// Each call asks the provider again; nothing is cached.
    pub fn iter(&self) -> ChainIter<'a> {
        ChainIter {
            provider: self.provider,
            next: self.provider.first(),
        }
    }
}

impl<'a> IntoIterator for FocusChain<'a> {
    type Item = FieldId;
    type IntoIter = ChainIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator returned by [`FocusChain::iter`].
pub struct ChainIter<'a> {
    provider: &'a dyn ChainProvider,
    next: Option<FieldId>,
}

impl Iterator for ChainIter<'_> {
    type Item = FieldId;

    fn next(&mut self) -> Option<FieldId> {
        let current = self.next?;
        self.next = self.provider.after(current);
        Some(current)
    }
}

impl std::iter::FusedIterator for ChainIter<'_> {}
